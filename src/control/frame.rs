//! Articulatory control frame.

use core::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tube::sections::{CONTROLLED_REGIONS, FRICATION_TAPS};

/// Number of scalar parameters in a frame.
pub const PARAM_COUNT: usize = 8 + CONTROLLED_REGIONS;

/// One set of articulatory targets.
///
/// Volumes are on the 0..60 dB scale, pitch is in semitones relative to
/// middle C (before the voice's reference pitch is added), radii are in cm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VocalTractCtrl {
    pub glot_pitch: f64,
    pub glot_vol: f64,
    pub asp_vol: f64,
    pub fric_vol: f64,
    /// Frication position along the taps, 0..7.
    pub fric_pos: f64,
    pub fric_cf: f64,
    pub fric_bw: f64,
    /// Radii of regions 2..8.
    pub radii: [f64; CONTROLLED_REGIONS],
    pub velum: f64,
}

impl Default for VocalTractCtrl {
    fn default() -> Self {
        Self {
            glot_pitch: 0.0,
            glot_vol: 0.0,
            asp_vol: 0.0,
            fric_vol: 0.0,
            fric_pos: 4.0,
            fric_cf: 2500.0,
            fric_bw: 500.0,
            radii: [1.0; CONTROLLED_REGIONS],
            velum: 0.1,
        }
    }
}

impl AddAssign for VocalTractCtrl {
    fn add_assign(&mut self, rhs: Self) {
        let mut values = self.to_array();
        for (value, delta) in values.iter_mut().zip(rhs.to_array()) {
            *value += delta;
        }
        *self = Self::from_array(&values);
    }
}

impl VocalTractCtrl {
    pub fn to_array(&self) -> [f64; PARAM_COUNT] {
        let mut values = [0.0; PARAM_COUNT];
        values[..8].copy_from_slice(&[
            self.glot_pitch,
            self.glot_vol,
            self.asp_vol,
            self.fric_vol,
            self.fric_pos,
            self.fric_cf,
            self.fric_bw,
            self.velum,
        ]);
        values[8..].copy_from_slice(&self.radii);
        values
    }

    pub fn from_array(values: &[f64; PARAM_COUNT]) -> Self {
        let mut radii = [0.0; CONTROLLED_REGIONS];
        radii.copy_from_slice(&values[8..]);

        Self {
            glot_pitch: values[0],
            glot_vol: values[1],
            asp_vol: values[2],
            fric_vol: values[3],
            fric_pos: values[4],
            fric_cf: values[5],
            fric_bw: values[6],
            velum: values[7],
            radii,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.to_array().iter().any(|value| !value.is_finite()) {
            return Err(Error::invalid_config(
                "controlFrame",
                "parameters must be finite",
            ));
        }
        if let Some(region) = self.radii.iter().position(|radius| *radius <= 0.0) {
            return Err(Error::invalid_config(
                "radius",
                alloc::format!(
                    "region {} radius must be positive, got {}",
                    region + 2,
                    self.radii[region]
                ),
            ));
        }
        if self.velum < 0.0 {
            return Err(Error::invalid_config(
                "velum",
                alloc::format!("must not be negative, got {}", self.velum),
            ));
        }
        if !(0.0..=(FRICATION_TAPS - 1) as f64).contains(&self.fric_pos) {
            return Err(Error::invalid_config(
                "fricPos",
                alloc::format!(
                    "must lie in [0, {}], got {}",
                    FRICATION_TAPS - 1,
                    self.fric_pos
                ),
            ));
        }
        if !(self.fric_cf > 0.0 && self.fric_bw > 0.0) {
            return Err(Error::invalid_config(
                "frication",
                "centre frequency and bandwidth must be positive",
            ));
        }

        Ok(())
    }

    /// Largest change of each parameter over one control period.
    pub fn default_max_deltas() -> Self {
        Self {
            glot_pitch: 5.0,
            glot_vol: 30.0,
            asp_vol: 30.0,
            fric_vol: 30.0,
            fric_pos: 3.5,
            fric_cf: 2000.0,
            fric_bw: 2000.0,
            radii: [1.5; CONTROLLED_REGIONS],
            velum: 0.75,
        }
    }

    /// Per-sample increments that move `previous` to `target` in
    /// `1 / control_frequency` samples.
    pub fn compute_deltas(previous: &Self, target: &Self, control_frequency: f64) -> Self {
        let from = previous.to_array();
        let to = target.to_array();
        let mut deltas = [0.0; PARAM_COUNT];
        for (delta, (a, b)) in deltas.iter_mut().zip(from.iter().zip(to.iter())) {
            *delta = (b - a) * control_frequency;
        }
        Self::from_array(&deltas)
    }

    /// Every parameter multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut values = self.to_array();
        values.iter_mut().for_each(|value| *value *= factor);
        Self::from_array(&values)
    }
}
