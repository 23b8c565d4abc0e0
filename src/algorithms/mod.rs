pub mod backtracking;
mod cancel;
mod supervisor;


pub use backtracking::{BacktrackingScheduler, FailureReason, SearchOutcome, SearchReport, SearchStats};
pub use cancel::CancelToken;
pub use supervisor::{SupervisedRun, Supervisor};

use crate::error::SchedulerError;
use crate::group::ShiftGroup;

/// Algorithm that fills every open shift of a group.
pub trait SchedulingAlgorithm {
    /// Runs the search in place.
    ///
    /// On [`SearchOutcome::Solved`] the group holds the roster. On any
    /// failure, cancellation included, the group is left as it was.
    ///
    /// # Arguments
    ///
    /// * `group` - Shifts and people; mutated while searching
    /// * `cancel` - Polled cooperatively; once set the run returns
    ///   [`FailureReason::Cancelled`] promptly
    fn schedule(
        &self,
        group: &mut ShiftGroup,
        cancel: &CancelToken,
    ) -> Result<SearchReport, SchedulerError>;
}
