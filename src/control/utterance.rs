//! Control trajectories for a whole utterance.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[allow(unused_imports)]
use num_traits::float::Float;

use serde::{Deserialize, Serialize};

use super::frame::VocalTractCtrl;
use crate::error::{Error, Result};

/// A phone or word: target frame plus how long it is held.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticulatoryUnit {
    pub ctrl: VocalTractCtrl,
    pub duration_ms: f64,
    pub transition_ms: f64,
}

impl ArticulatoryUnit {
    pub fn new(ctrl: VocalTractCtrl, duration_ms: f64, transition_ms: f64) -> Self {
        Self {
            ctrl,
            duration_ms,
            transition_ms,
        }
    }

    /// Number of control periods the unit's frame is repeated for.
    pub fn repeat_count(&self, control_period_ms: f64) -> usize {
        let count = (1.5 * (self.duration_ms + self.transition_ms) / control_period_ms).ceil();
        if count > 0.0 {
            count as usize
        } else {
            0
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.duration_ms >= 0.0 && self.transition_ms >= 0.0) {
            return Err(Error::invalid_config(
                "duration",
                "duration and transition must not be negative",
            ));
        }
        self.ctrl.validate()
    }
}

/// Ordered sequence of units synthesized in one run.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    units: Vec<ArticulatoryUnit>,
}

impl Utterance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, unit: ArticulatoryUnit) {
        self.units.push(unit);
    }

    /// Appends the unit named `name`, leaving the utterance unchanged if the
    /// table has no such entry.
    pub fn push_lookup(&mut self, table: &ArticulationTable, name: &str) -> Result<()> {
        let unit = table.lookup(name)?;
        self.units.push(*unit);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.units.iter().try_for_each(ArticulatoryUnit::validate)
    }

    pub fn units(&self) -> &[ArticulatoryUnit] {
        &self.units
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ArticulatoryUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Total number of control periods the utterance runs for.
    pub fn control_periods(&self, control_period_ms: f64) -> usize {
        self.units
            .iter()
            .map(|unit| unit.repeat_count(control_period_ms))
            .sum()
    }
}

impl FromIterator<ArticulatoryUnit> for Utterance {
    fn from_iter<I: IntoIterator<Item = ArticulatoryUnit>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

/// Named articulatory units, as loaded from a phone or word table.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticulationTable {
    entries: BTreeMap<String, ArticulatoryUnit>,
}

impl ArticulationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry, returning the previous one.
    pub fn insert(&mut self, name: &str, unit: ArticulatoryUnit) -> Option<ArticulatoryUnit> {
        self.entries.insert(name.to_string(), unit)
    }

    pub fn lookup(&self, name: &str) -> Result<&ArticulatoryUnit> {
        self.entries
            .get(name)
            .ok_or_else(|| Error::LookupNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
