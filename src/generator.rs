//! Seeded random roster instances.
//!
//! Used by the demos and by tests that want realistic, reproducible groups
//! without writing them out by hand.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::group::{GroupError, ShiftGroup};
use crate::person::{Person, PersonLimits};
use crate::shift::{ShiftKey, TimeSlot};

/// Shape of the generated instances.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of people in the pool.
    pub people: usize,
    /// Probability that a grid cell needs anyone at all.
    pub coverage: f64,
    /// Inclusive range of headcount for a covered cell.
    pub need_range: (i64, i64),
    /// Probability that a person cannot work a given shift.
    pub unavailability: f64,
    /// Probability that a person accepts back-to-back shifts.
    pub double_shift_rate: f64,
    pub limits: PersonLimits,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            people: 12,
            coverage: 0.6,
            need_range: (1, 2),
            unavailability: 0.1,
            double_shift_rate: 0.2,
            limits: PersonLimits::default(),
        }
    }
}

/// Produces groups from a fixed seed; the same seed and config always yield
/// the same sequence of groups.
#[derive(Debug, Clone)]
pub struct RosterGenerator {
    config: GeneratorConfig,
    seed: u64,
    rng: StdRng,
}

impl RosterGenerator {
    pub fn new(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewinds to the first instance of the sequence.
    pub fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    /// Builds the next group: requirements first, then people with their
    /// unavailability drawn over the required cells.
    pub fn generate(&mut self) -> Result<ShiftGroup, GroupError> {
        let (lo, hi) = self.config.need_range;
        let (lo, hi) = (lo.min(hi).max(0), hi.max(lo).max(0));

        let mut group = ShiftGroup::new();
        for key in ShiftKey::all() {
            if self.rng.gen::<f64>() < self.config.coverage {
                let needed = self.rng.gen_range(lo..=hi);
                group.add_shift(key.day, key.slot, needed)?;
            }
        }

        let required: Vec<ShiftKey> = group
            .shifts()
            .iter()
            .filter(|s| s.needed() > 0)
            .map(|s| s.key())
            .collect();

        for i in 0..self.config.people {
            let person = Person::new(format!("person-{i:02}"))
                .with_limits(self.config.limits)
                .with_double_shift(self.rng.gen::<f64>() < self.config.double_shift_rate)
                .with_three_shifts(false)
                .with_night_and_noon(false);
            let id = group.add_person(person)?;
            for key in &required {
                if self.rng.gen::<f64>() < self.config.unavailability {
                    group.block(id, key.day, key.slot)?;
                }
            }
        }

        Ok(group)
    }

    /// Total headcount the group asks for, split by whether it falls on nights.
    pub fn demand(group: &ShiftGroup) -> (u32, u32) {
        group.shifts().iter().fold((0, 0), |(day, night), s| {
            if s.slot() == TimeSlot::Night {
                (day, night + s.needed())
            } else {
                (day + s.needed(), night)
            }
        })
    }
}

impl Iterator for RosterGenerator {
    type Item = Result<ShiftGroup, GroupError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::Day;

    fn fingerprint(group: &ShiftGroup) -> Vec<(ShiftKey, u32, Vec<usize>)> {
        group
            .shifts()
            .iter()
            .map(|s| {
                let blocked = group
                    .people()
                    .iter()
                    .filter(|p| p.is_shift_blocked(s.id()))
                    .map(|p| p.id().index())
                    .collect();
                (s.key(), s.needed(), blocked)
            })
            .collect()
    }

    #[test]
    fn same_seed_same_instance() {
        let a = RosterGenerator::new(GeneratorConfig::default(), 7).generate().unwrap();
        let b = RosterGenerator::new(GeneratorConfig::default(), 7).generate().unwrap();
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn reset_replays_the_sequence() {
        let mut generator = RosterGenerator::new(GeneratorConfig::default(), 3);
        let first = generator.generate().unwrap();
        generator.generate().unwrap();
        generator.reset();
        assert_eq!(fingerprint(&generator.generate().unwrap()), fingerprint(&first));
    }

    #[test]
    fn needs_stay_in_range() {
        let config = GeneratorConfig {
            coverage: 1.0,
            need_range: (2, 3),
            ..GeneratorConfig::default()
        };
        let group = RosterGenerator::new(config, 11).generate().unwrap();
        assert_eq!(group.shifts().len(), Day::ALL.len() * TimeSlot::ALL.len());
        assert!(group.shifts().iter().all(|s| (2..=3).contains(&s.needed())));
    }

    #[test]
    fn reversed_range_is_normalised() {
        let config = GeneratorConfig {
            coverage: 1.0,
            need_range: (3, 1),
            ..GeneratorConfig::default()
        };
        let group = RosterGenerator::new(config, 5).generate().unwrap();
        assert!(group.shifts().iter().all(|s| (1..=3).contains(&s.needed())));
    }

    #[test]
    fn pool_has_requested_size_and_limits() {
        let config = GeneratorConfig {
            people: 4,
            unavailability: 0.0,
            limits: PersonLimits {
                max_shifts: 3,
                max_nights: 1,
                max_weekend_shifts: 1,
            },
            ..GeneratorConfig::default()
        };
        let group = RosterGenerator::new(config, 1).generate().unwrap();
        assert_eq!(group.people().len(), 4);
        assert!(group.people().iter().all(|p| p.max_shifts() == 3 && p.unavailable().is_empty()));
        assert_eq!(group.person_by_name("person-03").map(|id| id.index()), Some(3));
    }

    #[test]
    fn zero_coverage_needs_nobody() {
        let config = GeneratorConfig {
            coverage: 0.0,
            ..GeneratorConfig::default()
        };
        let group = RosterGenerator::new(config, 9).generate().unwrap();
        assert!(group.is_fully_staffed());
        assert_eq!(RosterGenerator::demand(&group), (0, 0));
    }
}
