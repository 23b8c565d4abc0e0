//! People in the rostering pool.

mod person;
mod scores;

pub use person::{Person, PersonId, PersonLimits};
pub use scores::ConstraintScores;
