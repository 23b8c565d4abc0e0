//! Hard-constraint vocabulary shared by persons, the group and the search.
//!
//! The rule evaluation itself lives next to the data it reads:
//! per-person gates in [`Person::check_eligibility`](crate::person::Person::check_eligibility)
//! and cross-shift rules in [`ShiftGroup::check_all_constraints`](crate::group::ShiftGroup::check_all_constraints).

pub mod flags;
pub mod violation;

pub use flags::{ConstraintFlag, ConstraintFlags};
pub use violation::Violation;
