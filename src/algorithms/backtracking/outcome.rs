//! What a search run reports back.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

use crate::shift::ShiftKey;

/// Why a run ended without a roster.
///
/// These are ordinary outcomes, not errors. The display text is what the
/// serving layer shows; a deadline always reads exactly `"timed out"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The head shift had fewer eligible people than it still needs.
    NotEnoughEligible {
        shift: ShiftKey,
        eligible: usize,
        needed: u32,
    },
    /// Every combination for a non-root shift failed.
    NoValidCombination { shift: ShiftKey },
    /// Every combination for the first shift failed; nothing is left to retry.
    NoSolutionForFirstShift { shift: ShiftKey },
    Cancelled,
    TimedOut,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NotEnoughEligible {
                shift,
                eligible,
                needed,
            } => write!(
                f,
                "Not enough eligible people for {shift} ({eligible} eligible, {needed} needed)"
            ),
            FailureReason::NoValidCombination { shift } => {
                write!(f, "No valid combination for {shift}")
            }
            FailureReason::NoSolutionForFirstShift { shift } => {
                write!(f, "No solution for the first shift ({shift})")
            }
            FailureReason::Cancelled => f.write_str("cancelled"),
            FailureReason::TimedOut => f.write_str("timed out"),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for FailureReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved,
    Failed(FailureReason),
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved)
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            SearchOutcome::Solved => None,
            SearchOutcome::Failed(reason) => Some(reason),
        }
    }
}

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SearchStats {
    /// Frames entered, including the root.
    pub frames: u64,
    /// Combinations tentatively applied.
    pub trials: u64,
    /// Trials rejected by the feasibility check without recursing.
    pub pruned: u64,
    /// Trials undone after the subtree below them failed.
    pub backtracks: u64,
    pub max_depth: usize,
    /// Most combinations generated for a single shift.
    pub largest_combination_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}
