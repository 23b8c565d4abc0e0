//! Reasons a person is ineligible for a shift.

use std::fmt;

/// The first hard rule that rules a person out of a shift.
///
/// Returned by eligibility checks so callers can log *why* a candidate was
/// dropped. Checks short-circuit, so only one violation is ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// The person is already on this shift.
    AlreadyAssigned,
    /// The shift is in the person's unavailable set.
    Blocked,
    MaxShiftsReached,
    MaxNightsReached,
    WeekendLimitReached,
    /// Morning the day after a night, or a night the day before a held morning.
    MorningAfterNight,
    /// Noon the day after a night, or a night the day before a held noon.
    NightAndNoon,
    /// Adjacent slot on the same day is already held.
    ConsecutiveShift,
    ThirdShiftInDay,
    /// Night and evening on the same day.
    NightAfterEvening,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Violation::AlreadyAssigned => "Already assigned to this shift",
            Violation::Blocked => "Shift is blocked",
            Violation::MaxShiftsReached => "Maximum shifts reached",
            Violation::MaxNightsReached => "Maximum night shifts reached",
            Violation::WeekendLimitReached => "Weekend shift limit reached",
            Violation::MorningAfterNight => "Morning after night conflict",
            Violation::NightAndNoon => "Night and noon conflict",
            Violation::ConsecutiveShift => "Consecutive shift not allowed",
            Violation::ThirdShiftInDay => "Third shift not allowed",
            Violation::NightAfterEvening => "Night after evening conflict",
        };
        f.write_str(msg)
    }
}
