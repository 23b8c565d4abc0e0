use thiserror::Error;

use crate::combo::ComboError;
use crate::config::ConfigError;
use crate::group::GroupError;

/// Errors that abort a scheduling run.
///
/// An unsatisfiable roster is not one of these; it comes back as a
/// [`FailureReason`](crate::algorithms::FailureReason) inside `Ok`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    #[error(transparent)]
    Group(#[from] GroupError),

    #[error(transparent)]
    Combo(#[from] ComboError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to start the search worker: {0}")]
    Spawn(String),

    #[error("Search worker panicked: {0}")]
    WorkerPanicked(String),

    #[error("Search worker exited without reporting a result")]
    WorkerDisconnected,
}
