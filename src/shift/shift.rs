//! A single staffed cell of the grid and its runtime assignment state.

use std::fmt;

use super::error::ShiftError;
use super::slot::{Day, ShiftKey, ShiftKind, TimeSlot};
use crate::group::GroupId;
use crate::person::PersonId;

/// Stable handle of a shift inside its owning [`ShiftGroup`](crate::group::ShiftGroup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShiftId(pub(crate) usize);

impl ShiftId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One (day, time slot) unit of required staffing.
///
/// # Invariants
///
/// - `assigned_people` never contains the same person twice
/// - `is_staffed` equals `assigned_people.len() >= needed` after every mutation
///
/// The upper bound `assigned_people.len() <= needed` is enforced by the search,
/// not by the shift itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Shift {
    id: ShiftId,
    group: GroupId,
    key: ShiftKey,
    needed: u32,
    assigned_people: Vec<PersonId>,
    is_staffed: bool,
}

impl Shift {
    /// Creates an empty shift owned by `group`.
    ///
    /// Fails if `needed` is negative.
    pub fn new(id: ShiftId, group: GroupId, key: ShiftKey, needed: i64) -> Result<Self, ShiftError> {
        let needed = validate_needed(key, needed)?;
        Ok(Self {
            id,
            group,
            key,
            needed,
            assigned_people: Vec::new(),
            is_staffed: needed == 0,
        })
    }

    /// A shift nobody needs yet; the group fills in the headcount later.
    pub(crate) fn empty(id: ShiftId, group: GroupId, key: ShiftKey) -> Self {
        Self {
            id,
            group,
            key,
            needed: 0,
            assigned_people: Vec::new(),
            is_staffed: true,
        }
    }

    pub fn id(&self) -> ShiftId {
        self.id
    }

    /// The group this shift belongs to.
    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn key(&self) -> ShiftKey {
        self.key
    }

    pub fn day(&self) -> Day {
        self.key.day
    }

    pub fn slot(&self) -> TimeSlot {
        self.key.slot
    }

    pub fn needed(&self) -> u32 {
        self.needed
    }

    /// Headcount still missing before the shift is staffed.
    pub fn missing(&self) -> u32 {
        self.needed
            .saturating_sub(self.assigned_people.len() as u32)
    }

    pub fn assigned_people(&self) -> &[PersonId] {
        &self.assigned_people
    }

    pub fn is_assigned(&self, person: PersonId) -> bool {
        self.assigned_people.contains(&person)
    }

    pub fn is_staffed(&self) -> bool {
        self.is_staffed
    }

    pub fn is_night(&self) -> bool {
        self.key.is_night()
    }

    pub fn is_weekend(&self) -> bool {
        self.key.is_weekend()
    }

    pub fn kind(&self) -> ShiftKind {
        self.key.kind()
    }

    pub(crate) fn set_needed(&mut self, needed: i64) -> Result<(), ShiftError> {
        self.needed = validate_needed(self.key, needed)?;
        self.refresh_staffed();
        Ok(())
    }

    /// Adds `person` if absent. Returns whether membership changed.
    ///
    /// This only touches the shift; use [`Person::assign_to_shift`](crate::person::Person::assign_to_shift)
    /// to keep the person's counters in step.
    pub fn assign(&mut self, person: PersonId) -> bool {
        if self.is_assigned(person) {
            return false;
        }
        self.assigned_people.push(person);
        self.refresh_staffed();
        true
    }

    /// Removes `person` if present. Returns whether membership changed.
    pub fn unassign(&mut self, person: PersonId) -> bool {
        let Some(pos) = self.assigned_people.iter().position(|&p| p == person) else {
            return false;
        };
        self.assigned_people.remove(pos);
        self.refresh_staffed();
        true
    }

    /// Independent snapshot with the same identity, owner and need, and its own
    /// copy of the assignment list.
    pub fn copy(&self) -> Shift {
        self.clone()
    }

    fn refresh_staffed(&mut self) {
        self.is_staffed = self.assigned_people.len() >= self.needed as usize;
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}

fn validate_needed(key: ShiftKey, needed: i64) -> Result<u32, ShiftError> {
    u32::try_from(needed).map_err(|_| ShiftError::NegativeNeeded {
        shift: key.to_string(),
        needed,
    })
}
