//! Cheap necessary conditions checked after every trial.
//!
//! Neither check proves a roster exists; failing one proves it does not, so
//! the trial can be undone without recursing.

use std::collections::BTreeMap;
use std::fmt;

use crate::constraints::ConstraintFlags;
use crate::group::{ShiftGroup, ShiftRanking};
use crate::person::Person;
use crate::shift::{ShiftKey, ShiftKind};

/// Why a trial state was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasible {
    /// The pool cannot take enough shifts of this kind to cover what is open.
    Capacity {
        kind: ShiftKind,
        open: u64,
        capacity: u64,
    },
    /// An open shift has fewer eligible people than it is missing.
    Starved {
        shift: ShiftKey,
        eligible: usize,
        missing: u32,
    },
}

impl fmt::Display for Infeasible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasible::Capacity {
                kind,
                open,
                capacity,
            } => write!(f, "{open} open {kind} slots but capacity for {capacity}"),
            Infeasible::Starved {
                shift,
                eligible,
                missing,
            } => write!(f, "{shift} is missing {missing} but only {eligible} are eligible"),
        }
    }
}

/// Upper bound on how many more shifts of `kind` `person` could still take.
///
/// Everything is capped by the overall shift limit; nights and (when enforced)
/// weekends are further capped by their own limits.
fn headroom(person: &Person, kind: ShiftKind, flags: &ConstraintFlags) -> u32 {
    let overall = person.max_shifts().saturating_sub(person.shift_counts());
    match kind {
        ShiftKind::Regular => overall,
        ShiftKind::Night => overall.min(person.remaining_capacity(ShiftKind::Night)),
        ShiftKind::Weekend if flags.enforce_weekend_limit => {
            overall.min(person.remaining_capacity(ShiftKind::Weekend))
        }
        ShiftKind::Weekend => overall,
    }
}

/// Per category, total open headcount must not exceed the pool's headroom.
pub fn check_capacity(group: &ShiftGroup, flags: &ConstraintFlags) -> Result<(), Infeasible> {
    let mut open: BTreeMap<ShiftKind, u64> = BTreeMap::new();
    for shift in group.shifts().iter().filter(|s| !s.is_staffed()) {
        *open.entry(shift.kind()).or_default() += u64::from(shift.missing());
    }
    for (kind, open) in open {
        let capacity: u64 = group
            .people()
            .iter()
            .map(|p| u64::from(headroom(p, kind, flags)))
            .sum();
        if open > capacity {
            return Err(Infeasible::Capacity {
                kind,
                open,
                capacity,
            });
        }
    }
    Ok(())
}

/// Every ranked shift must still have enough eligible people.
pub fn check_lookahead(rankings: &[ShiftRanking]) -> Result<(), Infeasible> {
    match rankings
        .iter()
        .find(|r| r.eligible.len() < r.missing as usize)
    {
        Some(r) => Err(Infeasible::Starved {
            shift: r.key,
            eligible: r.eligible.len(),
            missing: r.missing,
        }),
        None => Ok(()),
    }
}
