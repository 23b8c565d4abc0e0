//! Most-constrained-first ordering of open shifts.
//!
//! Two levels of scarcity drive the order:
//!
//! - **type ratio**: for each shift category, the summed constraint scores of
//!   everyone eligible for its open shifts divided by the headcount those shifts
//!   still need. A small ratio means the whole category is tight.
//! - **shift score**: the same sum for a single shift divided by its `needed`.
//!
//! Shifts sort ascending by `(type ratio, shift score, key)`. Comparisons use
//! [`f64::total_cmp`], so `+inf` sorts last and the order is total. A shift
//! nobody is eligible for scores `0.0` and leads its category; the search
//! then fails on it without exploring anything else.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::error::GroupError;
use super::group::ShiftGroup;
use crate::constraints::ConstraintFlags;
use crate::person::PersonId;
use crate::shift::{ShiftId, ShiftKey, ShiftKind};

/// One open shift with the numbers it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftRanking {
    pub shift: ShiftId,
    pub key: ShiftKey,
    pub kind: ShiftKind,
    pub type_ratio: f64,
    pub shift_score: f64,
    /// People currently eligible for the shift.
    pub eligible: Vec<PersonId>,
    /// Headcount still missing.
    pub missing: u32,
}

impl ShiftRanking {
    fn compare(&self, other: &Self) -> Ordering {
        self.type_ratio
            .total_cmp(&other.type_ratio)
            .then_with(|| self.shift_score.total_cmp(&other.shift_score))
            .then_with(|| self.key.cmp(&other.key))
    }
}

struct OpenShift {
    id: ShiftId,
    key: ShiftKey,
    kind: ShiftKind,
    needed: u32,
    missing: u32,
    eligible: Vec<PersonId>,
    score_sum: f64,
}

impl ShiftGroup {
    fn open_shifts(&self, flags: &ConstraintFlags) -> Result<Vec<OpenShift>, GroupError> {
        self.unstaffed()
            .into_iter()
            .map(|id| -> Result<OpenShift, GroupError> {
                let shift = self.shift(id)?;
                let kind = shift.kind();
                let eligible = self.eligible_people(id, flags)?;
                let score_sum = eligible
                    .iter()
                    .map(|&p| -> Result<f64, GroupError> { self.person(p)?.constraint_score(kind) })
                    .sum::<Result<f64, GroupError>>()?;
                Ok(OpenShift {
                    id,
                    key: shift.key(),
                    kind,
                    needed: shift.needed(),
                    missing: shift.missing(),
                    eligible,
                    score_sum,
                })
            })
            .collect()
    }

    fn type_ratios_of(open: &[OpenShift]) -> BTreeMap<ShiftKind, f64> {
        let mut totals: BTreeMap<ShiftKind, (f64, u32)> = BTreeMap::new();
        for shift in open {
            let entry = totals.entry(shift.kind).or_default();
            entry.0 += shift.score_sum;
            entry.1 += shift.needed;
        }
        totals
            .into_iter()
            .map(|(kind, (sum, needed))| (kind, sum / f64::from(needed.max(1))))
            .collect()
    }

    /// Type ratio of every category that still has open shifts.
    ///
    /// Uses the scores currently stored on each person; call
    /// [`refresh_constraint_scores`](Self::refresh_constraint_scores) first.
    pub fn shift_type_ratios(&self, flags: &ConstraintFlags) -> Result<BTreeMap<ShiftKind, f64>, GroupError> {
        Ok(Self::type_ratios_of(&self.open_shifts(flags)?))
    }

    /// Refreshes constraint scores and ranks every open shift.
    pub fn rank_shifts_detailed(&mut self, flags: &ConstraintFlags) -> Result<Vec<ShiftRanking>, GroupError> {
        self.refresh_constraint_scores(flags)?;
        let open = self.open_shifts(flags)?;
        let ratios = Self::type_ratios_of(&open);

        let mut ranked: Vec<ShiftRanking> = open
            .into_iter()
            .map(|shift| {
                let shift_score = if shift.eligible.is_empty() {
                    0.0
                } else {
                    shift.score_sum / f64::from(shift.needed)
                };
                ShiftRanking {
                    shift: shift.id,
                    key: shift.key,
                    kind: shift.kind,
                    type_ratio: ratios.get(&shift.kind).copied().unwrap_or(0.0),
                    shift_score,
                    eligible: shift.eligible,
                    missing: shift.missing,
                }
            })
            .collect();
        ranked.sort_by(ShiftRanking::compare);
        Ok(ranked)
    }

    /// Open shifts, most constrained first. Staffed shifts are left out.
    pub fn rank_shifts(&mut self, flags: &ConstraintFlags) -> Result<Vec<ShiftId>, GroupError> {
        Ok(self
            .rank_shifts_detailed(flags)?
            .into_iter()
            .map(|r| r.shift)
            .collect())
    }
}
