//! Sample-rate interpolation of control frames.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::frame::{VocalTractCtrl, PARAM_COUNT};

/// Ramps the running frame linearly from the previous target to the next one
/// over one control period.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlInterpolator {
    /// Reciprocal of the control period in samples.
    control_frequency: f64,
    clamp: bool,
    last_target: Option<VocalTractCtrl>,
    current: VocalTractCtrl,
    delta: VocalTractCtrl,
    max_delta: VocalTractCtrl,
}

impl ControlInterpolator {
    pub fn new(control_period: usize, clamp: bool) -> Self {
        let control_frequency = 1.0 / control_period.max(1) as f64;

        Self {
            control_frequency,
            clamp,
            last_target: None,
            current: VocalTractCtrl::default(),
            delta: VocalTractCtrl::default().scaled(0.0),
            max_delta: VocalTractCtrl::default_max_deltas().scaled(control_frequency),
        }
    }

    pub fn reset(&mut self) {
        self.last_target = None;
        self.current = VocalTractCtrl::default();
        self.delta = VocalTractCtrl::default().scaled(0.0);
    }

    /// Starts a new control period heading for `target`.
    ///
    /// The running frame restarts at the previous target. The first target of
    /// a run is held without a ramp.
    pub fn set_target(&mut self, target: &VocalTractCtrl) {
        let previous = self.last_target.unwrap_or(*target);
        self.current = previous;
        self.delta = VocalTractCtrl::compute_deltas(&previous, target, self.control_frequency);
        if self.clamp {
            self.clamp_delta();
        }
        self.last_target = Some(*target);
    }

    /// Advances the running frame by one sample.
    #[inline]
    pub fn step(&mut self) {
        self.current += self.delta;
    }

    #[inline]
    pub fn current(&self) -> &VocalTractCtrl {
        &self.current
    }

    pub fn delta(&self) -> &VocalTractCtrl {
        &self.delta
    }

    /// Per-sample limits, applied only when clamping is enabled.
    pub fn max_delta(&self) -> &VocalTractCtrl {
        &self.max_delta
    }

    pub fn control_frequency(&self) -> f64 {
        self.control_frequency
    }

    fn clamp_delta(&mut self) {
        let limits = self.max_delta.to_array();
        let mut deltas = self.delta.to_array();
        let mut limited = 0;

        for (delta, limit) in deltas.iter_mut().zip(limits.iter()) {
            if delta.abs() > *limit {
                *delta = delta.clamp(-limit, *limit);
                limited += 1;
            }
        }

        if limited > 0 {
            log::warn!(
                "clamped {} of {} control deltas to their per-sample maximum",
                limited,
                PARAM_COUNT
            );
            self.delta = VocalTractCtrl::from_array(&deltas);
        }
    }
}
