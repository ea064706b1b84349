//! Wave propagation through the oropharynx and nasal tubes.

use crate::config::VoiceParams;
use crate::control::frame::VocalTractCtrl;
use crate::filter::aperture::{RadiationFilter, ReflectionFilter};
use crate::utils::double_buffer::DoubleBuffer;

use super::junctions::JunctionCoefficients;
use super::sections::*;

/// Scattering-junction waveguide model of the vocal and nasal tracts.
///
/// Each call to [`TubeNetwork::process`] advances every section by one
/// sample: waves are read from the previous time step and written to the
/// current one.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeNetwork {
    state: DoubleBuffer<TubeState>,
    coefficients: JunctionCoefficients,
    damping: f64,

    mouth_reflection: ReflectionFilter,
    mouth_radiation: RadiationFilter,
    nose_reflection: ReflectionFilter,
    nose_radiation: RadiationFilter,
}

impl TubeNetwork {
    /// `mouth_aperture` and `nose_aperture` are the aperture coefficients of
    /// the open ends, both in (0, 1).
    pub fn new(voice: &VoiceParams, damping: f64, mouth_aperture: f64, nose_aperture: f64) -> Self {
        Self {
            state: DoubleBuffer::new(),
            coefficients: JunctionCoefficients::new(voice),
            damping,
            mouth_reflection: ReflectionFilter::new(mouth_aperture),
            mouth_radiation: RadiationFilter::new(mouth_aperture),
            nose_reflection: ReflectionFilter::new(nose_aperture),
            nose_radiation: RadiationFilter::new(nose_aperture),
        }
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.mouth_reflection.reset();
        self.mouth_radiation.reset();
        self.nose_reflection.reset();
        self.nose_radiation.reset();
    }

    pub fn coefficients(&self) -> &JunctionCoefficients {
        &self.coefficients
    }

    /// Wave components written by the last call to `process`.
    pub fn state(&self) -> &TubeState {
        self.state.current()
    }

    pub fn update_coefficients(&mut self, ctrl: &VocalTractCtrl, voice: &VoiceParams) {
        self.coefficients.update(ctrl, voice);
    }

    /// Steps the tubes by one sample.
    ///
    /// `input` enters at the glottal end of S1, `frication` is spread over
    /// the frication taps. Returns the sum of the mouth and nose radiation.
    #[inline]
    pub fn process(&mut self, input: f64, frication: f64) -> f64 {
        self.state.flip();
        let (prev, cur) = self.state.split();
        let coefs = &self.coefficients;
        let damping = self.damping;

        let po = &prev.oropharynx;
        let co = &mut cur.oropharynx;
        let taps = &coefs.frication_taps;
        let c = &coefs.oropharynx;

        // Glottal end
        co[S1].top = po[S1].bottom * damping + input;

        scatter(po, co, S1, c[C1], damping, 0.0);
        scatter(po, co, S2, c[C2], damping, taps[FC1] * frication);
        scatter(po, co, S3, c[C3], damping, taps[FC2] * frication);

        // Three-way junction between S4, S5 and the velum.
        let pn = &prev.nasal;
        let cn = &mut cur.nasal;
        let alpha = &coefs.alpha;
        let junction_pressure =
            alpha[LEFT] * po[S4].top + alpha[RIGHT] * po[S5].bottom + alpha[UPPER] * pn[N1].bottom;
        co[S4].bottom = (junction_pressure - po[S4].top) * damping;
        co[S5].top = (junction_pressure - po[S5].bottom) * damping + taps[FC3] * frication;
        cn[N1].top = (junction_pressure - pn[N1].bottom) * damping;

        scatter(po, co, S5, c[C4], damping, taps[FC4] * frication);

        // S6 and S7 are both region 5.
        co[S7].top = po[S6].top * damping + taps[FC5] * frication;
        co[S6].bottom = po[S7].bottom * damping;

        scatter(po, co, S7, c[C5], damping, taps[FC6] * frication);
        scatter(po, co, S8, c[C6], damping, taps[FC7] * frication);
        scatter(po, co, S9, c[C7], damping, taps[FC8] * frication);

        // Mouth
        co[S10].bottom = damping * self.mouth_reflection.process(c[C8] * po[S10].top);
        let mut output = self.mouth_radiation.process((1.0 + c[C8]) * po[S10].top);

        let nc = &coefs.nasal;
        for section in N1..N6 {
            scatter(pn, cn, section, nc[section], damping, 0.0);
        }

        // Nostrils
        cn[N6].bottom = damping * self.nose_reflection.process(nc[NC6] * pn[N6].top);
        output += self.nose_radiation.process((1.0 + nc[NC6]) * pn[N6].top);

        output
    }
}

/// Kelly-Lochbaum junction between `section` and the one after it.
#[inline]
fn scatter(
    prev: &[Wave],
    cur: &mut [Wave],
    section: usize,
    coefficient: f64,
    damping: f64,
    injection: f64,
) {
    let delta = coefficient * (prev[section].top - prev[section + 1].bottom);
    cur[section + 1].top = (prev[section].top + delta) * damping + injection;
    cur[section].bottom = (prev[section + 1].bottom + delta) * damping;
}
