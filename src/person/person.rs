//! A rosterable person: availability, limits and running counters.

use std::collections::BTreeSet;
use std::fmt;

use super::scores::ConstraintScores;
use crate::constraints::{ConstraintFlags, Violation};
use crate::group::{GroupError, ShiftGroup};
use crate::shift::{Shift, ShiftId, ShiftKind};

/// Stable handle of a person inside its owning [`ShiftGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(pub(crate) usize);

impl PersonId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Capacity limits for one person over the whole week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonLimits {
    pub max_shifts: u32,
    pub max_nights: u32,
    pub max_weekend_shifts: u32,
}

impl Default for PersonLimits {
    fn default() -> Self {
        Self {
            max_shifts: 5,
            max_nights: 2,
            max_weekend_shifts: 1,
        }
    }
}

/// A person that can be placed on shifts.
///
/// Counters are only ever changed through [`assign_to_shift`](Self::assign_to_shift)
/// and [`unassign_from_shift`](Self::unassign_from_shift), which update the
/// shift's membership in the same call. They must always equal the number of
/// shifts of the matching category that list this person;
/// [`ShiftGroup::verify_counters`] checks exactly that.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    id: PersonId,
    name: String,
    unavailable: BTreeSet<ShiftId>,
    double_shift: bool,
    limits: PersonLimits,
    are_three_shifts_possible: bool,
    night_and_noon_possible: bool,
    shift_counts: u32,
    night_counts: u32,
    weekend_shifts: u32,
    constraint_scores: ConstraintScores,
}

impl Person {
    /// Creates a person with default limits and no preferences.
    ///
    /// The id is assigned when the person is added to a group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PersonId(0),
            name: name.into(),
            unavailable: BTreeSet::new(),
            double_shift: false,
            limits: PersonLimits::default(),
            are_three_shifts_possible: false,
            night_and_noon_possible: false,
            shift_counts: 0,
            night_counts: 0,
            weekend_shifts: 0,
            constraint_scores: ConstraintScores::new(),
        }
    }

    pub fn with_limits(mut self, limits: PersonLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_max_shifts(mut self, max_shifts: u32) -> Self {
        self.limits.max_shifts = max_shifts;
        self
    }

    pub fn with_max_nights(mut self, max_nights: u32) -> Self {
        self.limits.max_nights = max_nights;
        self
    }

    pub fn with_max_weekend_shifts(mut self, max_weekend_shifts: u32) -> Self {
        self.limits.max_weekend_shifts = max_weekend_shifts;
        self
    }

    pub fn with_double_shift(mut self, allowed: bool) -> Self {
        self.double_shift = allowed;
        self
    }

    pub fn with_three_shifts(mut self, allowed: bool) -> Self {
        self.are_three_shifts_possible = allowed;
        self
    }

    pub fn with_night_and_noon(mut self, allowed: bool) -> Self {
        self.night_and_noon_possible = allowed;
        self
    }

    pub fn with_unavailable(mut self, shifts: impl IntoIterator<Item = ShiftId>) -> Self {
        self.unavailable.extend(shifts);
        self
    }

    pub(crate) fn set_id(&mut self, id: PersonId) {
        self.id = id;
    }

    pub(crate) fn block(&mut self, shift: ShiftId) {
        self.unavailable.insert(shift);
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unavailable(&self) -> &BTreeSet<ShiftId> {
        &self.unavailable
    }

    pub fn double_shift(&self) -> bool {
        self.double_shift
    }

    pub fn limits(&self) -> PersonLimits {
        self.limits
    }

    pub fn max_shifts(&self) -> u32 {
        self.limits.max_shifts
    }

    pub fn max_nights(&self) -> u32 {
        self.limits.max_nights
    }

    pub fn max_weekend_shifts(&self) -> u32 {
        self.limits.max_weekend_shifts
    }

    pub fn set_max_weekend_shifts(&mut self, max_weekend_shifts: u32) {
        self.limits.max_weekend_shifts = max_weekend_shifts;
    }

    pub fn are_three_shifts_possible(&self) -> bool {
        self.are_three_shifts_possible
    }

    pub fn night_and_noon_possible(&self) -> bool {
        self.night_and_noon_possible
    }

    pub fn shift_counts(&self) -> u32 {
        self.shift_counts
    }

    pub fn night_counts(&self) -> u32 {
        self.night_counts
    }

    pub fn weekend_shifts(&self) -> u32 {
        self.weekend_shifts
    }

    pub fn constraint_scores(&self) -> &ConstraintScores {
        &self.constraint_scores
    }

    /// Score for the given category; missing scores are an invariant violation.
    pub fn constraint_score(&self, kind: ShiftKind) -> Result<f64, GroupError> {
        self.constraint_scores.get(kind)
    }

    pub fn is_shift_blocked(&self, shift: ShiftId) -> bool {
        self.unavailable.contains(&shift)
    }

    pub fn is_max_shifts_reached(&self) -> bool {
        self.shift_counts >= self.limits.max_shifts
    }

    pub fn is_max_nights_reached(&self) -> bool {
        self.night_counts >= self.limits.max_nights
    }

    pub fn is_max_weekend_reached(&self) -> bool {
        self.weekend_shifts >= self.limits.max_weekend_shifts
    }

    /// Puts this person on `shift` and bumps the matching counters.
    ///
    /// Returns `false` (and changes nothing) if the person was already there.
    pub fn assign_to_shift(&mut self, shift: &mut Shift) -> bool {
        if !shift.assign(self.id) {
            return false;
        }
        self.shift_counts += 1;
        if shift.is_night() {
            self.night_counts += 1;
        }
        if shift.is_weekend() {
            self.weekend_shifts += 1;
        }
        true
    }

    /// Exact inverse of [`assign_to_shift`](Self::assign_to_shift).
    pub fn unassign_from_shift(&mut self, shift: &mut Shift) -> bool {
        if !shift.unassign(self.id) {
            return false;
        }
        self.shift_counts = self.shift_counts.saturating_sub(1);
        if shift.is_night() {
            self.night_counts = self.night_counts.saturating_sub(1);
        }
        if shift.is_weekend() {
            self.weekend_shifts = self.weekend_shifts.saturating_sub(1);
        }
        true
    }

    /// Runs every hard constraint and reports the first one that fails.
    pub fn check_eligibility(
        &self,
        shift: &Shift,
        group: &ShiftGroup,
        flags: &ConstraintFlags,
    ) -> Result<(), Violation> {
        if shift.is_assigned(self.id) {
            return Err(Violation::AlreadyAssigned);
        }
        if self.is_shift_blocked(shift.id()) {
            return Err(Violation::Blocked);
        }
        if self.is_max_shifts_reached() {
            return Err(Violation::MaxShiftsReached);
        }
        if shift.is_night() && self.is_max_nights_reached() {
            return Err(Violation::MaxNightsReached);
        }
        if flags.enforce_weekend_limit && shift.is_weekend() && self.is_max_weekend_reached() {
            return Err(Violation::WeekendLimitReached);
        }

        group.check_all_constraints(
            self,
            shift,
            self.double_shift || !flags.enforce_consecutive,
            self.are_three_shifts_possible || !flags.enforce_three_shifts,
            self.night_and_noon_possible || !flags.enforce_night_noon,
        )
    }

    pub fn is_eligible_for_shift(
        &self,
        shift: &Shift,
        group: &ShiftGroup,
        flags: &ConstraintFlags,
    ) -> bool {
        self.check_eligibility(shift, group, flags).is_ok()
    }

    /// How many more shifts of `kind` this person can still take.
    ///
    /// Regular capacity is what is left of the non-night allowance.
    pub fn remaining_capacity(&self, kind: ShiftKind) -> u32 {
        match kind {
            ShiftKind::Regular => {
                let allowance = self.limits.max_shifts.saturating_sub(self.limits.max_nights);
                let used = self.shift_counts.saturating_sub(self.night_counts);
                allowance.saturating_sub(used)
            }
            ShiftKind::Night => self.limits.max_nights.saturating_sub(self.night_counts),
            ShiftKind::Weekend => self
                .limits
                .max_weekend_shifts
                .saturating_sub(self.weekend_shifts),
        }
    }

    /// Scores for all three categories against the current state of `group`.
    pub fn compute_constraint_scores(
        &self,
        group: &ShiftGroup,
        flags: &ConstraintFlags,
    ) -> ConstraintScores {
        let mut scores = ConstraintScores::new();
        for kind in ShiftKind::ALL {
            let capacity = self.remaining_capacity(kind);
            let score = if capacity == 0 {
                f64::INFINITY
            } else {
                let eligible = group
                    .shifts()
                    .iter()
                    .filter(|s| !s.is_staffed() && s.kind() == kind)
                    .filter(|s| self.is_eligible_for_shift(s, group, flags))
                    .count();
                eligible as f64 / f64::from(capacity)
            };
            scores.insert(kind, score);
        }
        scores
    }

    pub(crate) fn set_constraint_scores(&mut self, scores: ConstraintScores) {
        self.constraint_scores = scores;
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::{Day, TimeSlot};

    fn group_with(person: Person, shifts: &[(Day, TimeSlot)]) -> (ShiftGroup, PersonId, Vec<ShiftId>) {
        let mut group = ShiftGroup::new();
        let ids = shifts
            .iter()
            .map(|&(day, slot)| group.add_shift(day, slot, 1).unwrap())
            .collect();
        let pid = group.add_person(person).unwrap();
        (group, pid, ids)
    }

    fn eligible(group: &ShiftGroup, person: PersonId, shift: ShiftId) -> bool {
        let p = group.person(person).unwrap();
        let s = group.shift(shift).unwrap();
        p.is_eligible_for_shift(s, group, &ConstraintFlags::default())
    }

    #[test]
    fn assign_then_unassign_restores_everything() {
        let (mut group, pid, ids) = group_with(
            Person::new("Dana"),
            &[(Day::Friday, TimeSlot::Night), (Day::Monday, TimeSlot::Morning)],
        );
        for &sid in &ids {
            let before_person = group.person(pid).unwrap().clone();
            let before_shift = group.shift(sid).unwrap().clone();

            assert!(group.assign(pid, sid).unwrap());
            assert!(group.unassign(pid, sid).unwrap());

            let p = group.person(pid).unwrap();
            assert_eq!(p.shift_counts(), before_person.shift_counts());
            assert_eq!(p.night_counts(), before_person.night_counts());
            assert_eq!(p.weekend_shifts(), before_person.weekend_shifts());
            assert_eq!(group.shift(sid).unwrap(), &before_shift);
        }
    }

    #[test]
    fn friday_night_counts_as_night_and_weekend() {
        let (mut group, pid, ids) = group_with(Person::new("Dana"), &[(Day::Friday, TimeSlot::Night)]);
        group.assign(pid, ids[0]).unwrap();
        let p = group.person(pid).unwrap();
        assert_eq!((p.shift_counts(), p.night_counts(), p.weekend_shifts()), (1, 1, 1));
    }

    #[test]
    fn max_shifts_reached_tracks_count_exactly() {
        for max in 0..=3u32 {
            let slots: Vec<_> = [Day::Sunday, Day::Monday, Day::Tuesday, Day::Wednesday]
                .into_iter()
                .map(|d| (d, TimeSlot::Morning))
                .collect();
            let (mut group, pid, ids) = group_with(Person::new("Eli").with_max_shifts(max), &slots);

            for &sid in ids.iter().take(max as usize) {
                assert!(!group.person(pid).unwrap().is_max_shifts_reached());
                group.assign(pid, sid).unwrap();
            }
            assert!(group.person(pid).unwrap().is_max_shifts_reached());
            assert_eq!(group.person(pid).unwrap().shift_counts(), max);

            if max > 0 {
                group.unassign(pid, ids[0]).unwrap();
                assert!(!group.person(pid).unwrap().is_max_shifts_reached());
            }
        }
    }

    #[test]
    fn no_double_shift_blocks_adjacent_slot() {
        let (mut group, pid, ids) = group_with(
            Person::new("Noa").with_double_shift(false),
            &[(Day::Monday, TimeSlot::Morning), (Day::Monday, TimeSlot::Noon)],
        );
        group.assign(pid, ids[0]).unwrap();
        assert!(!eligible(&group, pid, ids[1]));
        let p = group.person(pid).unwrap();
        let s = group.shift(ids[1]).unwrap();
        assert_eq!(
            p.check_eligibility(s, &group, &ConstraintFlags::default()),
            Err(Violation::ConsecutiveShift)
        );

        group.unassign(pid, ids[0]).unwrap();
        assert!(eligible(&group, pid, ids[1]));
    }

    #[test]
    fn weekend_cap_applies_across_weekend_shifts() {
        let (mut group, pid, ids) = group_with(
            Person::new("Tom").with_max_weekend_shifts(1),
            &[(Day::Friday, TimeSlot::Evening), (Day::Saturday, TimeSlot::Noon)],
        );
        group.assign(pid, ids[0]).unwrap();
        assert!(!eligible(&group, pid, ids[1]));

        group.person_mut(pid).unwrap().set_max_weekend_shifts(2);
        assert!(eligible(&group, pid, ids[1]));

        group.person_mut(pid).unwrap().set_max_weekend_shifts(1);
        group.unassign(pid, ids[0]).unwrap();
        assert!(eligible(&group, pid, ids[1]));
    }

    #[test]
    fn weekend_cap_can_be_switched_off() {
        let (mut group, pid, ids) = group_with(
            Person::new("Tom").with_max_weekend_shifts(0),
            &[(Day::Saturday, TimeSlot::Morning)],
        );
        let flags = ConstraintFlags {
            enforce_weekend_limit: false,
            ..ConstraintFlags::default()
        };
        let p = group.person(pid).unwrap();
        let s = group.shift(ids[0]).unwrap();
        assert!(p.is_eligible_for_shift(s, &group, &flags));
        assert!(!eligible(&group, pid, ids[0]));
        assert!(group.assign(pid, ids[0]).unwrap());
    }

    #[test]
    fn gates_run_in_order() {
        let (mut group, pid, ids) = group_with(
            Person::new("Lior").with_max_nights(0),
            &[(Day::Monday, TimeSlot::Night), (Day::Tuesday, TimeSlot::Morning)],
        );
        group.block(pid, Day::Monday, TimeSlot::Night).unwrap();
        let flags = ConstraintFlags::default();

        let p = group.person(pid).unwrap();
        let night = group.shift(ids[0]).unwrap();
        assert_eq!(p.check_eligibility(night, &group, &flags), Err(Violation::Blocked));

        group.assign(pid, ids[1]).unwrap();
        let p = group.person(pid).unwrap();
        let morning = group.shift(ids[1]).unwrap();
        assert_eq!(
            p.check_eligibility(morning, &group, &flags),
            Err(Violation::AlreadyAssigned)
        );
    }

    #[test]
    fn remaining_capacity_per_category() {
        let (mut group, pid, ids) = group_with(
            Person::new("Gal").with_max_shifts(4).with_max_nights(1).with_max_weekend_shifts(1),
            &[(Day::Sunday, TimeSlot::Night), (Day::Monday, TimeSlot::Evening)],
        );
        group.assign(pid, ids[0]).unwrap();
        group.assign(pid, ids[1]).unwrap();
        let p = group.person(pid).unwrap();
        assert_eq!(p.remaining_capacity(ShiftKind::Regular), 2);
        assert_eq!(p.remaining_capacity(ShiftKind::Night), 0);
        assert_eq!(p.remaining_capacity(ShiftKind::Weekend), 1);
    }

    #[test]
    fn exhausted_category_scores_infinite() {
        let (group, pid, _) = group_with(
            Person::new("Gal").with_max_nights(0),
            &[(Day::Monday, TimeSlot::Morning), (Day::Tuesday, TimeSlot::Morning)],
        );
        let p = group.person(pid).unwrap();
        let scores = p.compute_constraint_scores(&group, &ConstraintFlags::default());
        assert!(scores.validate().is_ok());
        assert_eq!(scores.get(ShiftKind::Night), Ok(f64::INFINITY));
        // two open regular shifts over five regular slots
        assert_eq!(scores.get(ShiftKind::Regular), Ok(2.0 / 5.0));
        assert_eq!(scores.get(ShiftKind::Weekend), Ok(0.0));
    }
}
