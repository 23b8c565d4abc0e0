//! The shift group: single owner of every shift and person in a run.
//!
//! Besides storage it hosts the queries that need to see more than one shift
//! at a time: the cross-shift constraint rules, the scarcity ranking used to
//! pick the next shift to fill, and snapshot / audit helpers for the search.

mod error;
mod group;
mod ranking;
mod rules;

pub use error::GroupError;
pub use group::{GroupId, GroupSnapshot, ShiftGroup};
pub use ranking::ShiftRanking;
