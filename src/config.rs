//! Run configuration.

use std::time::Duration;

use qtty::{Quantity, Second};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::combo::{ComboPreferences, TargetPair};
use crate::constraints::ConstraintFlags;
use crate::units::{self, SameDim};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown constraint flag: '{0}'")]
    UnknownConstraint(String),

    #[error("Unknown combination preference: '{0}'")]
    UnknownPreference(String),

    #[error("{field} must be a finite, non-negative number of seconds (got {seconds})")]
    InvalidDuration { field: &'static str, seconds: f64 },

    #[error("Target pair names '{0}' twice")]
    SelfPair(String),

    #[error("Target pair {first} / {second} has a non-finite weight")]
    NonFiniteWeight { first: String, second: String },
}

/// Knobs of the search itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    /// After every trial, require each open shift to still have at least as
    /// many eligible people as it is missing.
    pub lookahead_eligibility: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            lookahead_eligibility: true,
        }
    }
}

/// Everything a run needs besides the group itself.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Wall-clock deadline for the whole search. `None` waits forever.
    pub timeout: Option<Quantity<Second>>,
    /// How long to wait for the worker to acknowledge a cancellation.
    pub cancel_grace: Quantity<Second>,
    pub constraints: ConstraintFlags,
    pub preferences: ComboPreferences,
    pub target_pairs: Vec<TargetPair>,
    pub search: SearchOptions,
}

impl SchedulerConfig {
    pub const DEFAULT_CANCEL_GRACE: Quantity<Second> = Quantity::<Second>::new(1.0);

    /// Sets the deadline in any time unit.
    pub fn with_timeout<U: SameDim<Second>>(mut self, timeout: Quantity<U>) -> Self {
        self.timeout = Some(units::convert(timeout));
        self
    }

    pub fn with_cancel_grace<U: SameDim<Second>>(mut self, grace: Quantity<U>) -> Self {
        self.cancel_grace = units::convert(grace);
        self
    }

    pub fn with_constraints(mut self, constraints: ConstraintFlags) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_preferences(mut self, preferences: ComboPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_target_pair(mut self, pair: TargetPair) -> Self {
        self.target_pairs.push(pair);
        self
    }

    pub fn timeout_duration(&self) -> Result<Option<Duration>, ConfigError> {
        self.timeout
            .map(|t| units::to_duration("timeout", t))
            .transpose()
    }

    pub fn cancel_grace_duration(&self) -> Result<Duration, ConfigError> {
        units::to_duration("cancel_grace", self.cancel_grace)
    }

    /// Rejects settings that cannot be run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timeout_duration()?;
        self.cancel_grace_duration()?;
        for pair in &self.target_pairs {
            if pair.is_self_pair() {
                return Err(ConfigError::SelfPair(pair.first.clone()));
            }
            if !pair.weight.is_finite() {
                return Err(ConfigError::NonFiniteWeight {
                    first: pair.first.clone(),
                    second: pair.second.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            cancel_grace: Self::DEFAULT_CANCEL_GRACE,
            constraints: ConstraintFlags::default(),
            preferences: ComboPreferences::default(),
            target_pairs: Vec::new(),
            search: SearchOptions::default(),
        }
    }
}
