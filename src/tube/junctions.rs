//! Scattering junction coefficients.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::config::VoiceParams;
use crate::control::frame::VocalTractCtrl;
use crate::tube::sections::*;
use crate::utils::units::amplitude;

/// Reflection coefficient of the junction between cross sections of radius `a` and `b`.
///
/// `(A² - B²) / (A² + B²)` lies in (-1, 1) for any pair of positive radii.
#[inline]
pub fn reflection_coefficient(a: f64, b: f64) -> f64 {
    let a2 = a * a;
    let b2 = b * b;
    (a2 - b2) / (a2 + b2)
}

/// Coefficients derived from the current control frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JunctionCoefficients {
    /// C1..C7 between adjacent regions, C8 at the mouth aperture.
    pub oropharynx: [f64; OROPHARYNX_REGIONS],
    /// NC1 at the velum, NC2..NC5 fixed, NC6 at the nostril aperture.
    pub nasal: [f64; NASAL_SECTIONS],
    /// Three-way junction weights (left, right, upper).
    pub alpha: [f64; 3],
    /// Frication injection weights for S3..S10, including the frication level.
    pub frication_taps: [f64; FRICATION_TAPS],
}

impl JunctionCoefficients {
    /// Creates coefficients with the fixed nasal part computed from `voice`.
    pub fn new(voice: &VoiceParams) -> Self {
        let mut coefficients = Self::default();
        coefficients.init_nasal_cavity(voice);
        coefficients
    }

    /// Computes the coefficients between the fixed nasal sections and at the nostrils.
    pub fn init_nasal_cavity(&mut self, voice: &VoiceParams) {
        let radii = &voice.nose_radii;
        for section in N2..N6 {
            self.nasal[section] = reflection_coefficient(radii[section], radii[section + 1]);
        }
        self.nasal[NC6] = reflection_coefficient(radii[N6], voice.aperture_radius);
    }

    /// Recomputes every frame-dependent coefficient.
    pub fn update(&mut self, ctrl: &VocalTractCtrl, voice: &VoiceParams) {
        let radii = region_radii(ctrl);

        for region in R1..R8 {
            self.oropharynx[region] = reflection_coefficient(radii[region], radii[region + 1]);
        }
        self.oropharynx[C8] = reflection_coefficient(radii[R8], voice.aperture_radius);

        // The junction sits in the middle of region 4, so both oral branches
        // share its radius.
        let r0_2 = radii[R4] * radii[R4];
        let r1_2 = r0_2;
        let r2_2 = ctrl.velum * ctrl.velum;
        let scale = 2.0 / (r0_2 + r1_2 + r2_2);
        self.alpha[LEFT] = scale * r0_2;
        self.alpha[RIGHT] = scale * r1_2;
        self.alpha[UPPER] = scale * r2_2;

        self.nasal[NC1] = reflection_coefficient(ctrl.velum, voice.nose_radii[N2]);

        self.set_frication_taps(ctrl.fric_pos, amplitude(ctrl.fric_vol));
    }

    /// Spreads the frication level over the two taps around `position`.
    ///
    /// Positions at or beyond 8 leave every tap silent; frames are checked
    /// to stay within 0..7.
    pub fn set_frication_taps(&mut self, position: f64, level: f64) {
        let integral = position.trunc();
        let complement = position - integral;
        let remainder = 1.0 - complement;

        self.frication_taps.fill(0.0);
        if integral >= 0.0 && integral < FRICATION_TAPS as f64 {
            let tap = integral as usize;
            self.frication_taps[tap] = remainder * level;
            if tap + 1 < FRICATION_TAPS {
                self.frication_taps[tap + 1] = complement * level;
            }
        }
    }
}

/// Radii of all 8 regions: the fixed glottal region followed by the controlled ones.
#[inline]
fn region_radii(ctrl: &VocalTractCtrl) -> [f64; OROPHARYNX_REGIONS] {
    let mut radii = [GLOTTAL_REGION_RADIUS; OROPHARYNX_REGIONS];
    radii[R2..].copy_from_slice(&ctrl.radii);
    radii
}
