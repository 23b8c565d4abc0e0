//! Apply / revert value objects for one search trial.
//!
//! The revert path is generated from the record the apply path wrote, so the
//! two can never disagree about who was put where.

use crate::group::{GroupError, ShiftGroup};
use crate::person::PersonId;
use crate::shift::ShiftId;

/// A combination proposed for one shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialPatch {
    shift: ShiftId,
    people: Vec<PersonId>,
}

/// A patch that has been written into a group and must be reverted exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an applied patch has to be reverted or committed"]
pub struct AppliedPatch {
    shift: ShiftId,
    assigned: Vec<PersonId>,
}

impl TrialPatch {
    pub fn new(shift: ShiftId, people: Vec<PersonId>) -> Self {
        Self { shift, people }
    }

    pub fn shift(&self) -> ShiftId {
        self.shift
    }

    pub fn people(&self) -> &[PersonId] {
        &self.people
    }

    /// Assigns every member. A member already on the shift is a bookkeeping
    /// error; anything assigned before it is rolled back first.
    pub fn apply(self, group: &mut ShiftGroup) -> Result<AppliedPatch, GroupError> {
        let mut applied = AppliedPatch {
            shift: self.shift,
            assigned: Vec::with_capacity(self.people.len()),
        };
        for person in self.people {
            if !group.assign(person, self.shift)? {
                let err = GroupError::AlreadyAssigned {
                    person: group.person(person)?.name().to_string(),
                    shift: group.shift(self.shift)?.to_string(),
                };
                applied.revert(group)?;
                return Err(err);
            }
            applied.assigned.push(person);
        }
        Ok(applied)
    }
}

impl AppliedPatch {
    pub fn shift(&self) -> ShiftId {
        self.shift
    }

    pub fn assigned(&self) -> &[PersonId] {
        &self.assigned
    }

    /// Unassigns exactly the people this patch assigned, newest first.
    pub fn revert(self, group: &mut ShiftGroup) -> Result<(), GroupError> {
        for &person in self.assigned.iter().rev() {
            if !group.unassign(person, self.shift)? {
                return Err(GroupError::NotAssigned {
                    person: group.person(person)?.name().to_string(),
                    shift: group.shift(self.shift)?.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Keeps the assignment; the trial led to a full roster.
    pub fn commit(self) {}
}
