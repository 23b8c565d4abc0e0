//! The arena that owns every shift and person of one run.

use std::collections::{HashMap, HashSet};
use std::fmt;

use uuid::Uuid;

use super::error::GroupError;
use crate::constraints::ConstraintFlags;
use crate::person::{Person, PersonId};
use crate::shift::{Day, Shift, ShiftId, ShiftKey, TimeSlot};

/// Identity of a [`ShiftGroup`]. Shifts carry it as a non-owning back-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(Uuid);

impl GroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Pre-trial copy of every shift's assignment state.
#[derive(Debug, Clone)]
pub struct GroupSnapshot {
    group: GroupId,
    shifts: Vec<Shift>,
}

/// Owns all shifts and people of a single scheduling run.
///
/// Shifts are interned by `(day, slot)`: there is never more than one
/// [`Shift`] per key, and everything else refers to shifts and people through
/// [`ShiftId`] / [`PersonId`] handles into this arena.
#[derive(Debug, Clone)]
pub struct ShiftGroup {
    id: GroupId,
    shifts: Vec<Shift>,
    people: Vec<Person>,
    index: HashMap<ShiftKey, ShiftId>,
    names: HashMap<String, PersonId>,
}

impl Default for ShiftGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl ShiftGroup {
    pub fn new() -> Self {
        Self {
            id: GroupId::new(),
            shifts: Vec::new(),
            people: Vec::new(),
            index: HashMap::new(),
            names: HashMap::new(),
        }
    }

    /// Builds a group from `(day, slot, needed)` triples.
    ///
    /// A key listed twice is rejected rather than merged.
    pub fn from_requirements<I>(requirements: I) -> Result<Self, GroupError>
    where
        I: IntoIterator<Item = (Day, TimeSlot, i64)>,
    {
        let mut group = Self::new();
        let mut seen = HashSet::new();
        for (day, slot, needed) in requirements {
            let key = ShiftKey::new(day, slot);
            if !seen.insert(key) {
                return Err(GroupError::DuplicateShift(key));
            }
            group.add_shift(day, slot, needed)?;
        }
        Ok(group)
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Returns the shift for `(day, slot)`, creating an empty one if needed.
    pub fn get_or_create(&mut self, day: Day, slot: TimeSlot) -> ShiftId {
        let key = ShiftKey::new(day, slot);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = ShiftId(self.shifts.len());
        self.shifts.push(Shift::empty(id, self.id, key));
        self.index.insert(key, id);
        id
    }

    /// Sets the headcount of `(day, slot)`, interning the shift first.
    pub fn add_shift(&mut self, day: Day, slot: TimeSlot, needed: i64) -> Result<ShiftId, GroupError> {
        let id = self.get_or_create(day, slot);
        self.shifts[id.0].set_needed(needed)?;
        Ok(id)
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn shift(&self, id: ShiftId) -> Result<&Shift, GroupError> {
        self.shifts.get(id.0).ok_or(GroupError::UnknownShift(id.0))
    }

    pub fn shift_by_key(&self, day: Day, slot: TimeSlot) -> Option<ShiftId> {
        self.index.get(&ShiftKey::new(day, slot)).copied()
    }

    /// Shifts defined on `day`, in slot order.
    pub fn same_day_shifts(&self, day: Day) -> impl Iterator<Item = &Shift> + '_ {
        TimeSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.shift_by_key(day, slot))
            .map(move |id| &self.shifts[id.0])
    }

    pub fn person(&self, id: PersonId) -> Result<&Person, GroupError> {
        self.people.get(id.0).ok_or(GroupError::UnknownPerson(id.0))
    }

    pub fn person_mut(&mut self, id: PersonId) -> Result<&mut Person, GroupError> {
        self.people.get_mut(id.0).ok_or(GroupError::UnknownPerson(id.0))
    }

    pub fn person_by_name(&self, name: &str) -> Option<PersonId> {
        self.names.get(name).copied()
    }

    /// Adds a person to the pool. Names must be unique.
    pub fn add_person(&mut self, mut person: Person) -> Result<PersonId, GroupError> {
        if self.names.contains_key(person.name()) {
            return Err(GroupError::DuplicatePerson(person.name().to_string()));
        }
        let id = PersonId(self.people.len());
        person.set_id(id);
        self.names.insert(person.name().to_string(), id);
        self.people.push(person);
        Ok(id)
    }

    /// Marks `(day, slot)` as unavailable for `person`.
    pub fn block(&mut self, person: PersonId, day: Day, slot: TimeSlot) -> Result<ShiftId, GroupError> {
        self.person(person)?;
        let shift = self.get_or_create(day, slot);
        self.people[person.0].block(shift);
        Ok(shift)
    }

    /// Pairs [`Person::assign_to_shift`] with the shift it targets.
    ///
    /// No eligibility check happens here.
    pub fn assign(&mut self, person: PersonId, shift: ShiftId) -> Result<bool, GroupError> {
        let (p, s) = self.pair_mut(person, shift)?;
        Ok(p.assign_to_shift(s))
    }

    pub fn unassign(&mut self, person: PersonId, shift: ShiftId) -> Result<bool, GroupError> {
        let (p, s) = self.pair_mut(person, shift)?;
        Ok(p.unassign_from_shift(s))
    }

    fn pair_mut(&mut self, person: PersonId, shift: ShiftId) -> Result<(&mut Person, &mut Shift), GroupError> {
        let p = self
            .people
            .get_mut(person.0)
            .ok_or(GroupError::UnknownPerson(person.0))?;
        let s = self
            .shifts
            .get_mut(shift.0)
            .ok_or(GroupError::UnknownShift(shift.0))?;
        Ok((p, s))
    }

    pub fn is_person_assigned(&self, person: PersonId, day: Day, slot: TimeSlot) -> bool {
        self.shift_by_key(day, slot)
            .is_some_and(|id| self.shifts[id.0].is_assigned(person))
    }

    /// Number of slots `person` holds on `day`.
    pub fn count_shifts_in_day(&self, person: PersonId, day: Day) -> usize {
        self.same_day_shifts(day)
            .filter(|s| s.is_assigned(person))
            .count()
    }

    /// Ids of every shift that still needs people, in chronological order.
    pub fn unstaffed(&self) -> Vec<ShiftId> {
        let mut ids: Vec<_> = self
            .shifts
            .iter()
            .filter(|s| !s.is_staffed())
            .map(|s| (s.key(), s.id()))
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub fn is_fully_staffed(&self) -> bool {
        self.shifts.iter().all(Shift::is_staffed)
    }

    /// People who pass every hard constraint for `shift` right now.
    pub fn eligible_people(&self, shift: ShiftId, flags: &ConstraintFlags) -> Result<Vec<PersonId>, GroupError> {
        let s = self.shift(shift)?;
        Ok(self
            .people
            .iter()
            .filter(|p| p.is_eligible_for_shift(s, self, flags))
            .map(Person::id)
            .collect())
    }

    /// Recomputes every person's constraint scores against the current state.
    pub fn refresh_constraint_scores(&mut self, flags: &ConstraintFlags) -> Result<(), GroupError> {
        let scores: Vec<_> = self
            .people
            .iter()
            .map(|p| p.compute_constraint_scores(self, flags))
            .collect();
        for (person, scores) in self.people.iter_mut().zip(scores) {
            scores.validate()?;
            person.set_constraint_scores(scores);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            group: self.id,
            shifts: self.shifts.iter().map(Shift::copy).collect(),
        }
    }

    /// Puts every shift back to its snapshotted state.
    ///
    /// Person counters are not touched; they are checked against the restored
    /// memberships afterwards so a revert that missed a person is reported
    /// instead of silently papered over.
    pub fn restore(&mut self, snapshot: &GroupSnapshot) -> Result<(), GroupError> {
        if snapshot.group != self.id {
            return Err(GroupError::SnapshotMismatch(format!(
                "taken from group {}, restoring into {}",
                snapshot.group, self.id
            )));
        }
        if snapshot.shifts.len() != self.shifts.len() {
            return Err(GroupError::SnapshotMismatch(format!(
                "{} shifts in snapshot, {} in group",
                snapshot.shifts.len(),
                self.shifts.len()
            )));
        }
        for (current, saved) in self.shifts.iter_mut().zip(&snapshot.shifts) {
            if current != saved {
                *current = saved.copy();
            }
        }
        self.verify_counters()
    }

    /// Checks every person's counters against the shifts that list them.
    pub fn verify_counters(&self) -> Result<(), GroupError> {
        let mut expected = vec![(0u32, 0u32, 0u32); self.people.len()];
        for shift in &self.shifts {
            for &p in shift.assigned_people() {
                let entry = expected
                    .get_mut(p.0)
                    .ok_or(GroupError::UnknownPerson(p.0))?;
                entry.0 += 1;
                if shift.is_night() {
                    entry.1 += 1;
                }
                if shift.is_weekend() {
                    entry.2 += 1;
                }
            }
        }
        for (person, expected) in self.people.iter().zip(expected) {
            let actual = (person.shift_counts(), person.night_counts(), person.weekend_shifts());
            if actual != expected {
                return Err(GroupError::CounterMismatch {
                    person: person.name().to_string(),
                    actual,
                    expected,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_interns_by_key() {
        let mut group = ShiftGroup::new();
        let a = group.get_or_create(Day::Monday, TimeSlot::Noon);
        let b = group.get_or_create(Day::Monday, TimeSlot::Noon);
        assert_eq!(a, b);
        assert_eq!(group.shifts().len(), 1);
        assert_eq!(group.shift(a).unwrap().group(), group.id());
    }

    #[test]
    fn from_requirements_rejects_duplicates() {
        let err = ShiftGroup::from_requirements([
            (Day::Monday, TimeSlot::Noon, 1),
            (Day::Monday, TimeSlot::Noon, 2),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GroupError::DuplicateShift(ShiftKey::new(Day::Monday, TimeSlot::Noon))
        );
    }

    #[test]
    fn from_requirements_rejects_negative_need() {
        let err = ShiftGroup::from_requirements([(Day::Sunday, TimeSlot::Morning, -2)]).unwrap_err();
        assert!(matches!(err, GroupError::Shift(_)));
    }

    #[test]
    fn duplicate_person_names_are_rejected() {
        let mut group = ShiftGroup::new();
        group.add_person(Person::new("Dana")).unwrap();
        assert_eq!(
            group.add_person(Person::new("Dana")),
            Err(GroupError::DuplicatePerson("Dana".into()))
        );
    }

    #[test]
    fn unstaffed_is_chronological() {
        let group = ShiftGroup::from_requirements([
            (Day::Friday, TimeSlot::Night, 1),
            (Day::Sunday, TimeSlot::Evening, 1),
            (Day::Sunday, TimeSlot::Morning, 0),
            (Day::LastSaturday, TimeSlot::Noon, 2),
        ])
        .unwrap();
        let keys: Vec<_> = group
            .unstaffed()
            .into_iter()
            .map(|id| group.shift(id).unwrap().to_string())
            .collect();
        assert_eq!(keys, ["Last Saturday Noon", "Sunday Evening", "Friday Night"]);
    }

    #[test]
    fn unknown_handles_are_errors() {
        let mut group = ShiftGroup::new();
        assert_eq!(group.shift(ShiftId(3)).unwrap_err(), GroupError::UnknownShift(3));
        assert_eq!(
            group.assign(PersonId(1), ShiftId(0)).unwrap_err(),
            GroupError::UnknownPerson(1)
        );
    }

    #[test]
    fn snapshot_restores_memberships() {
        let mut group = ShiftGroup::from_requirements([(Day::Monday, TimeSlot::Morning, 2)]).unwrap();
        let a = group.add_person(Person::new("A")).unwrap();
        let b = group.add_person(Person::new("B")).unwrap();
        let sid = group.shift_by_key(Day::Monday, TimeSlot::Morning).unwrap();

        group.assign(a, sid).unwrap();
        let snapshot = group.snapshot();
        group.assign(b, sid).unwrap();
        group.unassign(b, sid).unwrap();

        group.restore(&snapshot).unwrap();
        assert_eq!(group.shift(sid).unwrap().assigned_people(), &[a]);
    }

    #[test]
    fn restore_reports_unreverted_counters() {
        let mut group = ShiftGroup::from_requirements([(Day::Monday, TimeSlot::Morning, 1)]).unwrap();
        let a = group.add_person(Person::new("A")).unwrap();
        let sid = group.shift_by_key(Day::Monday, TimeSlot::Morning).unwrap();

        let snapshot = group.snapshot();
        group.assign(a, sid).unwrap();

        let err = group.restore(&snapshot).unwrap_err();
        assert!(matches!(err, GroupError::CounterMismatch { ref person, .. } if person == "A"));
    }

    #[test]
    fn snapshot_from_another_group_is_rejected() {
        let mut group = ShiftGroup::new();
        let other = ShiftGroup::new();
        assert!(matches!(
            group.restore(&other.snapshot()),
            Err(GroupError::SnapshotMismatch(_))
        ));
    }

    #[test]
    fn block_interns_the_shift() {
        let mut group = ShiftGroup::new();
        let p = group.add_person(Person::new("A")).unwrap();
        let sid = group.block(p, Day::Tuesday, TimeSlot::Evening).unwrap();
        assert_eq!(group.shift_by_key(Day::Tuesday, TimeSlot::Evening), Some(sid));
        assert!(group.person(p).unwrap().is_shift_blocked(sid));
        assert!(group.shift(sid).unwrap().is_staffed());
    }

    #[test]
    fn count_shifts_in_day_only_counts_that_day() {
        let mut group = ShiftGroup::from_requirements([
            (Day::Monday, TimeSlot::Morning, 1),
            (Day::Monday, TimeSlot::Evening, 1),
            (Day::Tuesday, TimeSlot::Morning, 1),
        ])
        .unwrap();
        let p = group.add_person(Person::new("A")).unwrap();
        for sid in group.unstaffed() {
            group.assign(p, sid).unwrap();
        }
        assert_eq!(group.count_shifts_in_day(p, Day::Monday), 2);
        assert_eq!(group.count_shifts_in_day(p, Day::Tuesday), 1);
        assert!(group.verify_counters().is_ok());
        assert!(group.is_fully_staffed());
    }
}
