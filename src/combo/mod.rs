//! Candidate combinations for a single shift and the order to try them in.
//!
//! Combinations are ordered by an ascending composite key:
//!
//! ```text
//! ( -Σ target-pair weights fully inside the combination,
//!   -members who would extend a same-day neighbouring shift,
//!    Σ members' constraint scores for the shift's kind )
//! ```
//!
//! Each term is zero when its [`Preference`] is off, and the sort is stable,
//! so with every preference off combinations stay in generation order.

mod combinations;
mod error;
mod preferences;

use std::cmp::Ordering;

use tracing::trace;

pub use combinations::{binomial, Combinations};
pub use error::ComboError;
pub use preferences::{ComboPreferences, Preference, TargetPair};

use crate::group::ShiftGroup;
use crate::person::PersonId;
use crate::shift::ShiftId;

/// How many combinations are produced or keyed between two polls of a stop
/// callback.
pub const STOP_CHECK_INTERVAL: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ComboKey {
    pair_weight: f64,
    doubles: u32,
    score: f64,
}

impl ComboKey {
    fn compare(&self, other: &Self) -> Ordering {
        other
            .pair_weight
            .total_cmp(&self.pair_weight)
            .then_with(|| other.doubles.cmp(&self.doubles))
            .then_with(|| self.score.total_cmp(&other.score))
    }
}

/// Orders candidate combinations for a shift.
#[derive(Debug, Clone, Default)]
pub struct ComboManager {
    preferences: ComboPreferences,
    target_pairs: Vec<TargetPair>,
}

impl ComboManager {
    pub fn new(preferences: ComboPreferences, target_pairs: Vec<TargetPair>) -> Self {
        Self {
            preferences,
            target_pairs,
        }
    }

    pub fn preferences(&self) -> &ComboPreferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut ComboPreferences {
        &mut self.preferences
    }

    pub fn target_pairs(&self) -> &[TargetPair] {
        &self.target_pairs
    }

    /// Sorts `eligible` by ascending constraint score for the shift's kind,
    /// then by name. This is the generation order of [`Self::combinations`].
    pub fn candidate_pool(
        &self,
        group: &ShiftGroup,
        shift: ShiftId,
        eligible: &[PersonId],
    ) -> Result<Vec<PersonId>, ComboError> {
        let kind = group.shift(shift)?.kind();
        let mut keyed = eligible
            .iter()
            .map(|&id| -> Result<_, ComboError> {
                let person = group.person(id)?;
                Ok((person.constraint_score(kind)?, person.name(), id))
            })
            .collect::<Result<Vec<_>, ComboError>>()?;
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));
        Ok(keyed.into_iter().map(|(_, _, id)| id).collect())
    }

    /// Every `size`-person subset of `pool`, in lexicographic pool order.
    pub fn combinations(&self, pool: &[PersonId], size: usize) -> Vec<Vec<PersonId>> {
        Combinations::new(pool, size).collect()
    }

    /// Stable-sorts `combos` by the composite key for `shift`.
    ///
    /// An empty input is an error: the caller should never have got here.
    pub fn order(
        &self,
        combos: Vec<Vec<PersonId>>,
        shift: ShiftId,
        group: &ShiftGroup,
    ) -> Result<Vec<Vec<PersonId>>, ComboError> {
        Ok(self
            .order_until(combos, shift, group, &|| false)?
            .unwrap_or_default())
    }

    /// Pool, combinations of the missing headcount, then [`order`](Self::order).
    pub fn ranked_combinations(
        &self,
        group: &ShiftGroup,
        shift: ShiftId,
        eligible: &[PersonId],
    ) -> Result<Vec<Vec<PersonId>>, ComboError> {
        Ok(self
            .ranked_combinations_until(group, shift, eligible, || false)?
            .unwrap_or_default())
    }

    /// [`ranked_combinations`](Self::ranked_combinations) that gives up early.
    ///
    /// `should_stop` is polled every [`STOP_CHECK_INTERVAL`] combinations, both
    /// while generating and while computing keys; once it returns `true` the
    /// work done so far is dropped and `Ok(None)` comes back.
    pub fn ranked_combinations_until<F>(
        &self,
        group: &ShiftGroup,
        shift: ShiftId,
        eligible: &[PersonId],
        should_stop: F,
    ) -> Result<Option<Vec<Vec<PersonId>>>, ComboError>
    where
        F: Fn() -> bool,
    {
        let missing = group.shift(shift)?.missing() as usize;
        let pool = self.candidate_pool(group, shift, eligible)?;

        let mut combos = Vec::new();
        for (i, combo) in Combinations::new(&pool, missing).enumerate() {
            if i % STOP_CHECK_INTERVAL == 0 && should_stop() {
                return Ok(None);
            }
            combos.push(combo);
        }
        self.order_until(combos, shift, group, &should_stop)
    }

    fn order_until(
        &self,
        combos: Vec<Vec<PersonId>>,
        shift: ShiftId,
        group: &ShiftGroup,
        should_stop: &dyn Fn() -> bool,
    ) -> Result<Option<Vec<Vec<PersonId>>>, ComboError> {
        let target = group.shift(shift)?;
        if combos.is_empty() {
            return Err(ComboError::EmptyCombinations {
                shift: target.to_string(),
            });
        }
        let p = &self.preferences;
        if !p.target_pairs && !p.double_shifts && !p.constraint_score {
            return Ok(Some(combos));
        }

        let pairs = self.resolve_pairs(group);
        let mut keyed = Vec::with_capacity(combos.len());
        for (i, combo) in combos.into_iter().enumerate() {
            if i % STOP_CHECK_INTERVAL == 0 && should_stop() {
                return Ok(None);
            }
            keyed.push((self.key_for(&combo, &pairs, shift, group)?, combo));
        }
        keyed.sort_by(|a, b| a.0.compare(&b.0));
        trace!(shift = %target, combos = keyed.len(), "ordered combinations");
        Ok(Some(keyed.into_iter().map(|(_, combo)| combo).collect()))
    }

    /// Target pairs whose names both exist in the group. Unknown names never match.
    fn resolve_pairs(&self, group: &ShiftGroup) -> Vec<(PersonId, PersonId, f64)> {
        if !self.preferences.target_pairs {
            return Vec::new();
        }
        self.target_pairs
            .iter()
            .filter_map(|pair| {
                let a = group.person_by_name(&pair.first)?;
                let b = group.person_by_name(&pair.second)?;
                Some((a, b, pair.weight))
            })
            .collect()
    }

    fn key_for(
        &self,
        combo: &[PersonId],
        pairs: &[(PersonId, PersonId, f64)],
        shift: ShiftId,
        group: &ShiftGroup,
    ) -> Result<ComboKey, ComboError> {
        let target = group.shift(shift)?;
        let pair_weight = pairs
            .iter()
            .filter(|(a, b, _)| combo.contains(a) && combo.contains(b))
            .map(|(_, _, w)| w)
            .sum();

        let mut doubles = 0;
        let mut score = 0.0;
        for &id in combo {
            let person = group.person(id)?;
            if self.preferences.double_shifts
                && person.double_shift()
                && group.holds_adjacent_slot(id, target.key())
            {
                doubles += 1;
            }
            if self.preferences.constraint_score {
                score += person.constraint_score(target.kind())?;
            }
        }
        Ok(ComboKey {
            pair_weight,
            doubles,
            score,
        })
    }
}
