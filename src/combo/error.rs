use thiserror::Error;

use crate::group::GroupError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComboError {
    /// Ordering was asked for with nothing to order. The search checks
    /// headcount before generating combinations, so this is always a bug.
    #[error("Cannot order an empty combination list for {shift}")]
    EmptyCombinations { shift: String },

    #[error(transparent)]
    Group(#[from] GroupError),
}
