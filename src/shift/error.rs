use thiserror::Error;

/// Errors raised while constructing shifts from raw input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShiftError {
    #[error("Invalid day: '{0}'. Valid days are: Last Saturday, Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday")]
    InvalidDay(String),

    #[error("Invalid shift time: '{0}'. Valid shift times are: Morning, Noon, Evening, Night")]
    InvalidTimeSlot(String),

    #[error("Shift {shift} cannot need a negative number of people ({needed})")]
    NegativeNeeded { shift: String, needed: i64 },
}
