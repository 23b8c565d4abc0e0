//! Switches for the optional rule families.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Rule families that can be switched off for a whole run.
///
/// Switching a family off behaves as if every person had opted into it
/// (e.g. disabling `Consecutive` lets everyone work double shifts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintFlag {
    WeekendLimit,
    ThreeShifts,
    NightNoon,
    Consecutive,
}

impl ConstraintFlag {
    pub const ALL: [ConstraintFlag; 4] = [
        ConstraintFlag::WeekendLimit,
        ConstraintFlag::ThreeShifts,
        ConstraintFlag::NightNoon,
        ConstraintFlag::Consecutive,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ConstraintFlag::WeekendLimit => "enforce_weekend_limit",
            ConstraintFlag::ThreeShifts => "enforce_three_shifts",
            ConstraintFlag::NightNoon => "enforce_night_noon",
            ConstraintFlag::Consecutive => "enforce_consecutive",
        }
    }
}

impl fmt::Display for ConstraintFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConstraintFlag {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.name() == s)
            .ok_or_else(|| ConfigError::UnknownConstraint(s.to_string()))
    }
}

/// Which optional rule families are enforced. Everything is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConstraintFlags {
    pub enforce_weekend_limit: bool,
    pub enforce_three_shifts: bool,
    pub enforce_night_noon: bool,
    pub enforce_consecutive: bool,
}

impl Default for ConstraintFlags {
    fn default() -> Self {
        Self {
            enforce_weekend_limit: true,
            enforce_three_shifts: true,
            enforce_night_noon: true,
            enforce_consecutive: true,
        }
    }
}

impl ConstraintFlags {
    /// Every family switched off.
    pub fn relaxed() -> Self {
        Self {
            enforce_weekend_limit: false,
            enforce_three_shifts: false,
            enforce_night_noon: false,
            enforce_consecutive: false,
        }
    }

    pub fn is_enforced(&self, flag: ConstraintFlag) -> bool {
        match flag {
            ConstraintFlag::WeekendLimit => self.enforce_weekend_limit,
            ConstraintFlag::ThreeShifts => self.enforce_three_shifts,
            ConstraintFlag::NightNoon => self.enforce_night_noon,
            ConstraintFlag::Consecutive => self.enforce_consecutive,
        }
    }

    pub fn set(&mut self, flag: ConstraintFlag, enforced: bool) {
        match flag {
            ConstraintFlag::WeekendLimit => self.enforce_weekend_limit = enforced,
            ConstraintFlag::ThreeShifts => self.enforce_three_shifts = enforced,
            ConstraintFlag::NightNoon => self.enforce_night_noon = enforced,
            ConstraintFlag::Consecutive => self.enforce_consecutive = enforced,
        }
    }

    /// Sets a flag by its configuration name, e.g. `"enforce_consecutive"`.
    pub fn set_by_name(&mut self, name: &str, enforced: bool) -> Result<(), ConfigError> {
        let flag = name.parse()?;
        self.set(flag, enforced);
        Ok(())
    }
}
