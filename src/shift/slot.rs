//! The fixed scheduling grid: eight days by four time slots.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ShiftError;

/// Day of the scheduling week.
///
/// The week runs from the Saturday that closes the previous week through the
/// following Saturday, so there are eight days and `LastSaturday` has no
/// predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Day {
    #[cfg_attr(feature = "serde", serde(rename = "Last Saturday"))]
    LastSaturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All days in chronological order.
    pub const ALL: [Day; 8] = [
        Day::LastSaturday,
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Position of this day in [`Day::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn previous(self) -> Option<Day> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn next(self) -> Option<Day> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Day::LastSaturday => "Last Saturday",
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.name() == s)
            .ok_or_else(|| ShiftError::InvalidDay(s.to_string()))
    }
}

/// Time-of-day slot within a day, in the order the slots are worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeSlot {
    Morning,
    Noon,
    Evening,
    Night,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Noon,
        TimeSlot::Evening,
        TimeSlot::Night,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The slot immediately before this one on the same day.
    pub fn previous(self) -> Option<TimeSlot> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// The slot immediately after this one on the same day.
    pub fn next(self) -> Option<TimeSlot> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Noon => "Noon",
            TimeSlot::Evening => "Evening",
            TimeSlot::Night => "Night",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeSlot {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.name() == s)
            .ok_or_else(|| ShiftError::InvalidTimeSlot(s.to_string()))
    }
}

/// Capacity category a shift draws from.
///
/// A night shift is always [`ShiftKind::Night`], even when it also falls on
/// the weekend; the weekend counter is tracked separately on each person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShiftKind {
    Regular,
    Night,
    Weekend,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Regular, ShiftKind::Night, ShiftKind::Weekend];
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftKind::Regular => write!(f, "regular"),
            ShiftKind::Night => write!(f, "night"),
            ShiftKind::Weekend => write!(f, "weekend"),
        }
    }
}

/// Identity of a shift: one cell of the day × slot grid.
///
/// Keys order chronologically (by day, then by slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShiftKey {
    pub day: Day,
    pub slot: TimeSlot,
}

impl ShiftKey {
    pub const fn new(day: Day, slot: TimeSlot) -> Self {
        Self { day, slot }
    }

    /// Parses a key from display names, e.g. `("Monday", "Morning")`.
    pub fn parse(day: &str, slot: &str) -> Result<Self, ShiftError> {
        Ok(Self::new(day.parse()?, slot.parse()?))
    }

    /// Every cell of the grid in chronological order.
    pub fn all() -> impl Iterator<Item = ShiftKey> {
        Day::ALL
            .into_iter()
            .flat_map(|day| TimeSlot::ALL.into_iter().map(move |slot| ShiftKey::new(day, slot)))
    }

    pub fn weekend() -> impl Iterator<Item = ShiftKey> {
        Self::all().filter(|k| k.is_weekend())
    }

    pub fn weekday() -> impl Iterator<Item = ShiftKey> {
        Self::all().filter(|k| !k.is_weekend())
    }

    pub fn is_night(&self) -> bool {
        self.slot == TimeSlot::Night
    }

    /// Friday evening, Friday night, and all of Saturday.
    pub fn is_weekend(&self) -> bool {
        match self.day {
            Day::Friday => matches!(self.slot, TimeSlot::Evening | TimeSlot::Night),
            Day::Saturday => true,
            _ => false,
        }
    }

    pub fn kind(&self) -> ShiftKind {
        if self.is_night() {
            ShiftKind::Night
        } else if self.is_weekend() {
            ShiftKind::Weekend
        } else {
            ShiftKind::Regular
        }
    }
}

impl fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_parses_display_names() {
        assert_eq!("Last Saturday".parse::<Day>(), Ok(Day::LastSaturday));
        assert_eq!("Friday".parse::<Day>(), Ok(Day::Friday));
        assert_eq!(
            "Funday".parse::<Day>(),
            Err(ShiftError::InvalidDay("Funday".to_string()))
        );
    }

    #[test]
    fn invalid_day_message_lists_valid_days() {
        let msg = "Funday".parse::<Day>().unwrap_err().to_string();
        assert!(msg.contains("'Funday'"));
        assert!(msg.contains("Last Saturday"));
        assert!(msg.contains("Saturday"));
    }

    #[test]
    fn slot_parses_display_names() {
        assert_eq!("Night".parse::<TimeSlot>(), Ok(TimeSlot::Night));
        assert_eq!(
            "Dusk".parse::<TimeSlot>(),
            Err(ShiftError::InvalidTimeSlot("Dusk".to_string()))
        );
    }

    #[test]
    fn adjacent_days() {
        assert_eq!(Day::Wednesday.previous(), Some(Day::Tuesday));
        assert_eq!(Day::Wednesday.next(), Some(Day::Thursday));
        assert_eq!(Day::LastSaturday.previous(), None);
        assert_eq!(Day::LastSaturday.next(), Some(Day::Sunday));
        assert_eq!(Day::Saturday.previous(), Some(Day::Friday));
        assert_eq!(Day::Saturday.next(), None);
    }

    #[test]
    fn adjacent_slots() {
        assert_eq!(TimeSlot::Noon.previous(), Some(TimeSlot::Morning));
        assert_eq!(TimeSlot::Noon.next(), Some(TimeSlot::Evening));
        assert_eq!(TimeSlot::Morning.previous(), None);
        assert_eq!(TimeSlot::Night.next(), None);
    }

    #[test]
    fn weekend_cells() {
        let weekend: Vec<ShiftKey> = ShiftKey::weekend().collect();
        assert_eq!(weekend.len(), 6);
        assert!(weekend.contains(&ShiftKey::new(Day::Friday, TimeSlot::Evening)));
        assert!(weekend.contains(&ShiftKey::new(Day::Friday, TimeSlot::Night)));
        assert!(!weekend.contains(&ShiftKey::new(Day::Friday, TimeSlot::Noon)));
        assert!(!weekend.contains(&ShiftKey::new(Day::LastSaturday, TimeSlot::Night)));
        assert_eq!(ShiftKey::weekday().count(), 32 - 6);
    }

    #[test]
    fn night_takes_precedence_over_weekend() {
        assert_eq!(ShiftKey::new(Day::Friday, TimeSlot::Night).kind(), ShiftKind::Night);
        assert_eq!(ShiftKey::new(Day::Saturday, TimeSlot::Noon).kind(), ShiftKind::Weekend);
        assert_eq!(ShiftKey::new(Day::Monday, TimeSlot::Noon).kind(), ShiftKind::Regular);
    }

    #[test]
    fn keys_order_chronologically() {
        let mon_morning = ShiftKey::new(Day::Monday, TimeSlot::Morning);
        let mon_night = ShiftKey::new(Day::Monday, TimeSlot::Night);
        let tue_morning = ShiftKey::new(Day::Tuesday, TimeSlot::Morning);
        assert!(mon_morning < mon_night);
        assert!(mon_night < tue_morning);
        assert_eq!(mon_morning.to_string(), "Monday Morning");
        assert_eq!(ShiftKey::all().count(), 32);
    }
}
