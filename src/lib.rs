//! shiftwise - constraint-based shift rostering
//!
//! Fills a week of shifts (eight days by four time slots) from a pool of
//! people under hard per-person limits and rest rules, using a
//! most-constrained-first backtracking search that runs under a wall-clock
//! deadline with cooperative cancellation.
//!
//! ```
//! use shiftwise::{Person, ShiftGroup, SchedulerConfig, Supervisor};
//! use shiftwise::shift::{Day, TimeSlot};
//!
//! let mut group = ShiftGroup::from_requirements([
//!     (Day::Monday, TimeSlot::Morning, 1),
//!     (Day::Monday, TimeSlot::Night, 1),
//! ])
//! .unwrap();
//! group.add_person(Person::new("Dana")).unwrap();
//! group.add_person(Person::new("Eli")).unwrap();
//!
//! let result = Supervisor::new(SchedulerConfig::default()).unwrap().run(group).unwrap();
//! assert!(result.success);
//! ```

pub mod algorithms;
pub mod combo;
pub mod config;
pub mod constraints;
pub mod error;
pub mod generator;
pub mod group;
pub mod logging;
pub mod person;
pub mod schedule;
pub mod shift;
pub mod units;

pub use algorithms::{
    BacktrackingScheduler, CancelToken, FailureReason, SchedulingAlgorithm, SearchOutcome,
    SearchReport, Supervisor,
};
pub use config::SchedulerConfig;
pub use error::SchedulerError;
pub use group::ShiftGroup;
pub use person::Person;
pub use schedule::RosterResult;
// Re-export unit conversion traits for ergonomic use
pub use units::{convert, SameDim};
