//! Which criteria order candidate combinations, and the pair-weight table.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// A single combination-ordering criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Preference {
    /// Favour combinations containing configured name pairs.
    TargetPairs,
    /// Favour members who would extend a same-day neighbouring shift.
    DoubleShifts,
    /// Favour members with the lowest constraint score for the shift's kind.
    ConstraintScore,
}

impl Preference {
    pub const ALL: [Preference; 3] = [
        Preference::TargetPairs,
        Preference::DoubleShifts,
        Preference::ConstraintScore,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Preference::TargetPairs => "target_pairs",
            Preference::DoubleShifts => "double_shifts",
            Preference::ConstraintScore => "constraint_score",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "target_pairs" | "preferred_people" => Ok(Preference::TargetPairs),
            "double_shifts" => Ok(Preference::DoubleShifts),
            "constraint_score" => Ok(Preference::ConstraintScore),
            other => Err(ConfigError::UnknownPreference(other.to_string())),
        }
    }
}

/// On/off switch per [`Preference`]. All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComboPreferences {
    pub target_pairs: bool,
    pub double_shifts: bool,
    pub constraint_score: bool,
}

impl Default for ComboPreferences {
    fn default() -> Self {
        Self {
            target_pairs: true,
            double_shifts: true,
            constraint_score: true,
        }
    }
}

impl ComboPreferences {
    /// Every criterion off: combinations keep generation order.
    pub fn none() -> Self {
        Self {
            target_pairs: false,
            double_shifts: false,
            constraint_score: false,
        }
    }

    pub fn is_enabled(&self, preference: Preference) -> bool {
        match preference {
            Preference::TargetPairs => self.target_pairs,
            Preference::DoubleShifts => self.double_shifts,
            Preference::ConstraintScore => self.constraint_score,
        }
    }

    pub fn set(&mut self, preference: Preference, enabled: bool) {
        match preference {
            Preference::TargetPairs => self.target_pairs = enabled,
            Preference::DoubleShifts => self.double_shifts = enabled,
            Preference::ConstraintScore => self.constraint_score = enabled,
        }
    }

    pub fn set_by_name(&mut self, name: &str, enabled: bool) -> Result<(), ConfigError> {
        self.set(name.parse()?, enabled);
        Ok(())
    }
}

/// A weighted preference for (positive) or against (negative) two people
/// working the same shift.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetPair {
    pub first: String,
    pub second: String,
    pub weight: f64,
}

impl TargetPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>, weight: f64) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            weight,
        }
    }

    /// Whether the pair names the same person twice.
    pub fn is_self_pair(&self) -> bool {
        self.first == self.second
    }
}
