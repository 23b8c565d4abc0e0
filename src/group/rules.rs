//! Rules that look across several shifts of the same person.

use super::group::ShiftGroup;
use crate::constraints::Violation;
use crate::person::{Person, PersonId};
use crate::shift::{Shift, ShiftKey, TimeSlot};

impl ShiftGroup {
    /// Evaluates the cross-shift rules for putting `person` on `shift`.
    ///
    /// Checked in order, first failure wins:
    ///
    /// 1. no Morning the day after a Night (nor a Night before a held Morning)
    /// 2. no Noon the day after a Night, unless `allow_night_noon`
    /// 3. no adjacent slot on the same day, unless `allow_consecutive`
    /// 4. no third slot in a day unless `allow_three_shifts`, and never when
    ///    Evening is one of the three
    /// 5. never Night and Evening on the same day
    ///
    /// Pure query; nothing is mutated.
    pub fn check_all_constraints(
        &self,
        person: &Person,
        shift: &Shift,
        allow_consecutive: bool,
        allow_three_shifts: bool,
        allow_night_noon: bool,
    ) -> Result<(), Violation> {
        let pid = person.id();
        let key = shift.key();
        let holds = |day, slot| self.is_person_assigned(pid, day, slot);
        let held_yesterday = |slot| key.day.previous().is_some_and(|d| holds(d, slot));
        let held_tomorrow = |slot| key.day.next().is_some_and(|d| holds(d, slot));

        match key.slot {
            TimeSlot::Morning if held_yesterday(TimeSlot::Night) => {
                return Err(Violation::MorningAfterNight)
            }
            TimeSlot::Night if held_tomorrow(TimeSlot::Morning) => {
                return Err(Violation::MorningAfterNight)
            }
            _ => {}
        }

        if !allow_night_noon {
            match key.slot {
                TimeSlot::Noon if held_yesterday(TimeSlot::Night) => {
                    return Err(Violation::NightAndNoon)
                }
                TimeSlot::Night if held_tomorrow(TimeSlot::Noon) => {
                    return Err(Violation::NightAndNoon)
                }
                _ => {}
            }
        }

        if !allow_consecutive && self.holds_adjacent_slot(pid, key) {
            return Err(Violation::ConsecutiveShift);
        }

        let held_today: Vec<TimeSlot> = self
            .same_day_shifts(key.day)
            .filter(|s| s.slot() != key.slot && s.is_assigned(pid))
            .map(Shift::slot)
            .collect();
        if held_today.len() >= 2
            && (!allow_three_shifts
                || key.slot == TimeSlot::Evening
                || held_today.contains(&TimeSlot::Evening))
        {
            return Err(Violation::ThirdShiftInDay);
        }

        let night_evening = match key.slot {
            TimeSlot::Night => held_today.contains(&TimeSlot::Evening),
            TimeSlot::Evening => held_today.contains(&TimeSlot::Night),
            _ => false,
        };
        if night_evening {
            return Err(Violation::NightAfterEvening);
        }

        Ok(())
    }

    /// Whether `person` holds the slot right before or after `key` on the same day.
    pub fn holds_adjacent_slot(&self, person: PersonId, key: ShiftKey) -> bool {
        [key.slot.previous(), key.slot.next()]
            .into_iter()
            .flatten()
            .any(|slot| self.is_person_assigned(person, key.day, slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::{Day, ShiftId};

    struct Fixture {
        group: ShiftGroup,
        person: PersonId,
    }

    impl Fixture {
        fn new(person: Person) -> Self {
            let mut group = ShiftGroup::new();
            for day in Day::ALL {
                for slot in TimeSlot::ALL {
                    group.add_shift(day, slot, 1).unwrap();
                }
            }
            let person = group.add_person(person).unwrap();
            Self { group, person }
        }

        fn id(&self, day: Day, slot: TimeSlot) -> ShiftId {
            self.group.shift_by_key(day, slot).unwrap()
        }

        fn hold(&mut self, day: Day, slot: TimeSlot) {
            let sid = self.id(day, slot);
            self.group.assign(self.person, sid).unwrap();
        }

        fn check(&self, day: Day, slot: TimeSlot, consecutive: bool, three: bool, night_noon: bool) -> Result<(), Violation> {
            let p = self.group.person(self.person).unwrap();
            let s = self.group.shift(self.id(day, slot)).unwrap();
            self.group.check_all_constraints(p, s, consecutive, three, night_noon)
        }

        fn strict(&self, day: Day, slot: TimeSlot) -> Result<(), Violation> {
            self.check(day, slot, false, false, false)
        }

        fn lenient(&self, day: Day, slot: TimeSlot) -> Result<(), Violation> {
            self.check(day, slot, true, true, true)
        }
    }

    #[test]
    fn morning_after_night_both_directions() {
        let mut f = Fixture::new(Person::new("A"));
        f.hold(Day::Monday, TimeSlot::Night);
        assert_eq!(f.lenient(Day::Tuesday, TimeSlot::Morning), Err(Violation::MorningAfterNight));

        let mut f = Fixture::new(Person::new("A"));
        f.hold(Day::Tuesday, TimeSlot::Morning);
        assert_eq!(f.lenient(Day::Monday, TimeSlot::Night), Err(Violation::MorningAfterNight));
    }

    #[test]
    fn night_noon_only_when_disallowed() {
        let mut f = Fixture::new(Person::new("A"));
        f.hold(Day::Sunday, TimeSlot::Night);
        assert_eq!(f.strict(Day::Monday, TimeSlot::Noon), Err(Violation::NightAndNoon));
        assert_eq!(f.lenient(Day::Monday, TimeSlot::Noon), Ok(()));

        let mut f = Fixture::new(Person::new("A"));
        f.hold(Day::Monday, TimeSlot::Noon);
        assert_eq!(f.strict(Day::Sunday, TimeSlot::Night), Err(Violation::NightAndNoon));
    }

    #[test]
    fn consecutive_slots_need_permission() {
        let mut f = Fixture::new(Person::new("A"));
        f.hold(Day::Monday, TimeSlot::Noon);
        assert_eq!(f.strict(Day::Monday, TimeSlot::Morning), Err(Violation::ConsecutiveShift));
        assert_eq!(f.strict(Day::Monday, TimeSlot::Evening), Err(Violation::ConsecutiveShift));
        assert_eq!(f.strict(Day::Monday, TimeSlot::Night), Ok(()));
        assert_eq!(f.lenient(Day::Monday, TimeSlot::Morning), Ok(()));
    }

    #[test]
    fn third_shift_rules() {
        let mut f = Fixture::new(Person::new("A"));
        f.hold(Day::Monday, TimeSlot::Morning);
        f.hold(Day::Monday, TimeSlot::Noon);
        assert_eq!(
            f.check(Day::Monday, TimeSlot::Night, true, false, true),
            Err(Violation::ThirdShiftInDay)
        );
        assert_eq!(f.lenient(Day::Monday, TimeSlot::Night), Ok(()));
        assert_eq!(f.lenient(Day::Monday, TimeSlot::Evening), Err(Violation::ThirdShiftInDay));

        let mut f = Fixture::new(Person::new("A"));
        f.hold(Day::Monday, TimeSlot::Morning);
        f.hold(Day::Monday, TimeSlot::Evening);
        assert_eq!(f.lenient(Day::Monday, TimeSlot::Noon), Err(Violation::ThirdShiftInDay));
    }

    #[test]
    fn night_and_evening_exclusive() {
        let mut f = Fixture::new(Person::new("A"));
        f.hold(Day::Wednesday, TimeSlot::Evening);
        assert_eq!(f.lenient(Day::Wednesday, TimeSlot::Night), Err(Violation::NightAfterEvening));

        let mut f = Fixture::new(Person::new("A"));
        f.hold(Day::Wednesday, TimeSlot::Night);
        assert_eq!(f.lenient(Day::Wednesday, TimeSlot::Evening), Err(Violation::NightAfterEvening));
    }

    #[test]
    fn week_edges_have_no_neighbours() {
        let mut f = Fixture::new(Person::new("A"));
        f.hold(Day::Saturday, TimeSlot::Night);
        assert_eq!(f.strict(Day::LastSaturday, TimeSlot::Morning), Ok(()));
        assert_eq!(f.strict(Day::LastSaturday, TimeSlot::Night), Ok(()));
    }

    #[test]
    fn adjacent_slot_detection() {
        let mut f = Fixture::new(Person::new("A"));
        f.hold(Day::Friday, TimeSlot::Evening);
        assert!(f.group.holds_adjacent_slot(f.person, ShiftKey::new(Day::Friday, TimeSlot::Night)));
        assert!(f.group.holds_adjacent_slot(f.person, ShiftKey::new(Day::Friday, TimeSlot::Noon)));
        assert!(!f.group.holds_adjacent_slot(f.person, ShiftKey::new(Day::Friday, TimeSlot::Morning)));
        assert!(!f.group.holds_adjacent_slot(f.person, ShiftKey::new(Day::Saturday, TimeSlot::Morning)));
    }
}
