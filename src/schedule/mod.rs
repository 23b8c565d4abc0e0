use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::algorithms::{FailureReason, SearchOutcome};
use crate::group::{GroupError, ShiftGroup};
use crate::shift::{Day, TimeSlot};

/// Day → time slot → names, in the order people were assigned.
pub type Assignments = BTreeMap<Day, BTreeMap<TimeSlot, Vec<String>>>;

/// What a run hands to the serving layer.
///
/// Either a full roster with per-person counts, or a failure reason; never a
/// partial roster.
///
/// # Examples
///
/// ```
/// use shiftwise::group::ShiftGroup;
/// use shiftwise::person::Person;
/// use shiftwise::schedule::RosterResult;
/// use shiftwise::shift::{Day, TimeSlot};
///
/// let mut group = ShiftGroup::from_requirements([(Day::Monday, TimeSlot::Morning, 1)]).unwrap();
/// let dana = group.add_person(Person::new("Dana")).unwrap();
/// let shift = group.shift_by_key(Day::Monday, TimeSlot::Morning).unwrap();
/// group.assign(dana, shift).unwrap();
///
/// let result = RosterResult::success(&group).unwrap();
/// assert!(result.success);
/// assert_eq!(result.assigned(Day::Monday, TimeSlot::Morning), ["Dana"]);
/// assert_eq!(result.shift_counts.unwrap()["Dana"], 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RosterResult {
    pub success: bool,
    pub assignments: Option<Assignments>,
    pub failure_reason: Option<FailureReason>,
    pub shift_counts: Option<BTreeMap<String, u32>>,
}

impl RosterResult {
    /// Reads the roster out of a fully staffed group.
    pub fn success(group: &ShiftGroup) -> Result<Self, GroupError> {
        Ok(Self {
            success: true,
            assignments: Some(assignments(group)?),
            failure_reason: None,
            shift_counts: Some(
                group
                    .people()
                    .iter()
                    .map(|p| (p.name().to_string(), p.shift_counts()))
                    .collect(),
            ),
        })
    }

    pub fn failure(reason: FailureReason) -> Self {
        Self {
            success: false,
            assignments: None,
            failure_reason: Some(reason),
            shift_counts: None,
        }
    }

    pub fn from_outcome(outcome: &SearchOutcome, group: &ShiftGroup) -> Result<Self, GroupError> {
        match outcome {
            SearchOutcome::Solved => Self::success(group),
            SearchOutcome::Failed(reason) => Ok(Self::failure(reason.clone())),
        }
    }

    /// Names on `(day, slot)`; empty on failure or for unneeded slots.
    pub fn assigned(&self, day: Day, slot: TimeSlot) -> &[String] {
        self.assignments
            .as_ref()
            .and_then(|a| a.get(&day))
            .and_then(|slots| slots.get(&slot))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Every day and slot of the grid with the names assigned there.
pub fn assignments(group: &ShiftGroup) -> Result<Assignments, GroupError> {
    let mut out = Assignments::new();
    for day in Day::ALL {
        let slots = out.entry(day).or_default();
        for slot in TimeSlot::ALL {
            let mut names = Vec::new();
            if let Some(id) = group.shift_by_key(day, slot) {
                for &person in group.shift(id)?.assigned_people() {
                    names.push(group.person(person)?.name().to_string());
                }
            }
            slots.insert(slot, names);
        }
    }
    Ok(out)
}
