//! Backtracking search engine.
//!
//! Each frame takes the most constrained open shift, tries its candidate
//! combinations in ranked order and recurses on the re-ranked remainder.
//!
//! # Algorithm Overview
//!
//! 1. Stop with `Cancelled` if the token is set; succeed if nothing is open
//! 2. Fail fast when the head shift has fewer eligible people than it needs
//! 3. For each combination: snapshot, apply, re-rank, run the feasibility
//!    checks, and recurse only if they pass
//! 4. A successful subtree ends the search; otherwise revert the patch,
//!    restore the snapshot and try the next combination
//! 5. When every combination fails, the root reports
//!    [`FailureReason::NoSolutionForFirstShift`], deeper frames
//!    [`FailureReason::NoValidCombination`]
//!
//! Unsatisfiable rosters come back as [`SearchOutcome::Failed`]; only broken
//! invariants surface as `Err`.

mod engine;
mod feasibility;
mod outcome;
mod patch;

pub use engine::BacktrackingScheduler;
pub use feasibility::{check_capacity, check_lookahead, Infeasible};
pub use outcome::{FailureReason, SearchOutcome, SearchReport, SearchStats};
pub use patch::{AppliedPatch, TrialPatch};
