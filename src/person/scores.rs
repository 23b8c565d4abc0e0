//! Per-category scarcity scores.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::group::GroupError;
use crate::shift::ShiftKind;

/// How urgently constrained a person is in each shift category.
///
/// Score is `eligible open shifts of that kind / remaining capacity`; lower
/// means the person has few options left relative to what they can still
/// take. A category with no capacity left scores `+inf`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintScores {
    scores: BTreeMap<ShiftKind, f64>,
}

impl ConstraintScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ShiftKind, score: f64) {
        self.scores.insert(kind, score);
    }

    /// Score for `kind`, or an error if it was never computed.
    pub fn get(&self, kind: ShiftKind) -> Result<f64, GroupError> {
        self.scores
            .get(&kind)
            .copied()
            .ok_or(GroupError::MissingConstraintScore(kind))
    }

    /// Checks that every category has a score.
    pub fn validate(&self) -> Result<(), GroupError> {
        for kind in ShiftKind::ALL {
            self.get(kind)?;
        }
        Ok(())
    }
}
