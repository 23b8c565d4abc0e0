use thiserror::Error;

use crate::shift::{ShiftError, ShiftKey, ShiftKind};

/// Invariant violations inside a [`ShiftGroup`](super::ShiftGroup).
///
/// None of these describe an unsatisfiable roster; they mean the input data
/// or a previous mutation broke an assumption the search depends on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GroupError {
    #[error(transparent)]
    Shift(#[from] ShiftError),

    #[error("Shift {0} is defined more than once")]
    DuplicateShift(ShiftKey),

    #[error("Person '{0}' is defined more than once")]
    DuplicatePerson(String),

    #[error("Unknown shift id: {0}")]
    UnknownShift(usize),

    #[error("Unknown person id: {0}")]
    UnknownPerson(usize),

    #[error("Constraint score for {0} shifts is missing")]
    MissingConstraintScore(ShiftKind),

    #[error(
        "Counters of '{person}' are out of step with the roster: \
         counted {actual:?} (shifts, nights, weekend) but shifts hold {expected:?}"
    )]
    CounterMismatch {
        person: String,
        actual: (u32, u32, u32),
        expected: (u32, u32, u32),
    },

    #[error("{person} is already on {shift}")]
    AlreadyAssigned { person: String, shift: String },

    #[error("{person} was expected on {shift} but is not assigned")]
    NotAssigned { person: String, shift: String },

    #[error("Snapshot does not belong to this group: {0}")]
    SnapshotMismatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::{Day, TimeSlot};

    #[test]
    fn duplicate_shift_display() {
        let e = GroupError::DuplicateShift(ShiftKey::new(Day::Friday, TimeSlot::Night));
        assert_eq!(e.to_string(), "Shift Friday Night is defined more than once");
    }

    #[test]
    fn missing_score_display() {
        let e = GroupError::MissingConstraintScore(ShiftKind::Weekend);
        assert_eq!(e.to_string(), "Constraint score for weekend shifts is missing");
    }

    #[test]
    fn shift_errors_pass_through() {
        let e: GroupError = ShiftError::InvalidTimeSlot("Dawn".into()).into();
        assert!(e.to_string().starts_with("Invalid shift time: 'Dawn'"));
    }

    #[test]
    fn counter_mismatch_names_person() {
        let e = GroupError::CounterMismatch {
            person: "Dana".into(),
            actual: (2, 0, 0),
            expected: (1, 0, 0),
        };
        assert!(e.to_string().contains("'Dana'"));
    }
}
