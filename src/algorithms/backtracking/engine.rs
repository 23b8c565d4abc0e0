//! Depth-first search over shift combinations.

use tracing::{debug, info, info_span, trace};
use uuid::Uuid;

use super::feasibility::{check_capacity, check_lookahead, Infeasible};
use super::outcome::{FailureReason, SearchOutcome, SearchReport, SearchStats};
use super::patch::TrialPatch;
use crate::algorithms::{CancelToken, SchedulingAlgorithm};
use crate::combo::{binomial, ComboManager};
use crate::config::{SchedulerConfig, SearchOptions};
use crate::constraints::ConstraintFlags;
use crate::error::SchedulerError;
use crate::group::{ShiftGroup, ShiftRanking};
use crate::shift::ShiftId;

/// Most-constrained-first backtracking scheduler.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingScheduler {
    flags: ConstraintFlags,
    combos: ComboManager,
    options: SearchOptions,
}

impl BacktrackingScheduler {
    pub fn new(flags: ConstraintFlags, combos: ComboManager, options: SearchOptions) -> Self {
        Self {
            flags,
            combos,
            options,
        }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(
            config.constraints,
            ComboManager::new(config.preferences, config.target_pairs.clone()),
            config.search,
        )
    }

    pub fn flags(&self) -> &ConstraintFlags {
        &self.flags
    }

    pub fn combos(&self) -> &ComboManager {
        &self.combos
    }
}

impl SchedulingAlgorithm for BacktrackingScheduler {
    fn schedule(
        &self,
        group: &mut ShiftGroup,
        cancel: &CancelToken,
    ) -> Result<SearchReport, SchedulerError> {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "backtracking",
            %run_id,
            group = %group.id(),
            shifts = group.shifts().len(),
            people = group.people().len()
        );
        let _enter = span.enter();

        group.verify_counters()?;
        let rankings = group.rank_shifts_detailed(&self.flags)?;
        info!(open = rankings.len(), "starting search");

        let (outcome, stats) = match unfillable(&rankings) {
            Some(reason) => {
                debug!(%reason, "an open shift cannot be filled from the start");
                (SearchOutcome::Failed(reason), SearchStats::default())
            }
            None => {
                let mut search = Search {
                    scheduler: self,
                    group: &mut *group,
                    cancel,
                    stats: SearchStats::default(),
                };
                let ranked = rankings.iter().map(|r| r.shift).collect();
                let outcome = match search.frame(ranked, 0)? {
                    Step::Solved => SearchOutcome::Solved,
                    Step::Failed(reason) => SearchOutcome::Failed(reason),
                };
                (outcome, search.stats)
            }
        };

        group.verify_counters()?;
        info!(
            solved = outcome.is_solved(),
            frames = stats.frames,
            trials = stats.trials,
            pruned = stats.pruned,
            backtracks = stats.backtracks,
            max_depth = stats.max_depth,
            largest_combination_count = stats.largest_combination_count,
            "search finished"
        );
        if let SearchOutcome::Failed(reason) = &outcome {
            info!(%reason, "no roster");
        }

        Ok(SearchReport { outcome, stats })
    }
}

/// First open shift, in rank order, with fewer eligible people than it is
/// missing. No assignment can add eligible people, so the run is over before
/// any branching.
fn unfillable(rankings: &[ShiftRanking]) -> Option<FailureReason> {
    rankings
        .iter()
        .find(|r| r.eligible.len() < r.missing as usize)
        .map(|r| FailureReason::NotEnoughEligible {
            shift: r.key,
            eligible: r.eligible.len(),
            needed: r.missing,
        })
}

enum Step {
    Solved,
    Failed(FailureReason),
}

/// Mutable state of one run.
struct Search<'a> {
    scheduler: &'a BacktrackingScheduler,
    group: &'a mut ShiftGroup,
    cancel: &'a CancelToken,
    stats: SearchStats,
}

impl Search<'_> {
    /// One recursion level: fill the head of `ranked`, then recurse on the rest.
    ///
    /// On any non-success return the group is exactly as it was on entry.
    fn frame(&mut self, ranked: Vec<ShiftId>, depth: usize) -> Result<Step, SchedulerError> {
        if self.cancel.is_cancelled() {
            return Ok(Step::Failed(FailureReason::Cancelled));
        }
        self.stats.frames += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let Some(&head) = ranked.first() else {
            return Ok(Step::Solved);
        };
        let flags = self.scheduler.flags;
        let shift = self.group.shift(head)?;
        let key = shift.key();
        let missing = shift.missing();

        let eligible = self.group.eligible_people(head, &flags)?;
        if eligible.len() < missing as usize {
            debug!(depth, shift = %key, eligible = eligible.len(), missing, "not enough eligible people");
            return Ok(Step::Failed(FailureReason::NotEnoughEligible {
                shift: key,
                eligible: eligible.len(),
                needed: missing,
            }));
        }

        debug!(
            depth,
            shift = %key,
            eligible = eligible.len(),
            combos = binomial(eligible.len(), missing as usize),
            "filling shift"
        );
        let cancel = self.cancel;
        let Some(combos) = self.scheduler.combos.ranked_combinations_until(
            &*self.group,
            head,
            &eligible,
            move || cancel.is_cancelled(),
        )?
        else {
            return Ok(Step::Failed(FailureReason::Cancelled));
        };
        self.stats.largest_combination_count = self.stats.largest_combination_count.max(combos.len());

        for combo in combos {
            if self.cancel.is_cancelled() {
                return Ok(Step::Failed(FailureReason::Cancelled));
            }
            self.stats.trials += 1;

            let snapshot = self.group.snapshot();
            let applied = TrialPatch::new(head, combo).apply(self.group)?;
            let rankings = self.group.rank_shifts_detailed(&flags)?;

            let step = match self.infeasible(&rankings) {
                Some(why) => {
                    self.stats.pruned += 1;
                    trace!(depth, shift = %key, people = ?applied.assigned(), %why, "pruned");
                    None
                }
                None => {
                    let next = rankings.iter().map(|r| r.shift).collect();
                    Some(self.frame(next, depth + 1)?)
                }
            };

            match step {
                Some(Step::Solved) => {
                    applied.commit();
                    return Ok(Step::Solved);
                }
                Some(Step::Failed(FailureReason::Cancelled)) => {
                    applied.revert(self.group)?;
                    self.group.restore(&snapshot)?;
                    return Ok(Step::Failed(FailureReason::Cancelled));
                }
                Some(Step::Failed(reason)) => {
                    self.stats.backtracks += 1;
                    trace!(depth, shift = %key, %reason, "backtracking");
                    applied.revert(self.group)?;
                    self.group.restore(&snapshot)?;
                }
                None => {
                    applied.revert(self.group)?;
                    self.group.restore(&snapshot)?;
                }
            }
        }

        debug!(depth, shift = %key, "no combination worked");
        let reason = if depth == 0 {
            FailureReason::NoSolutionForFirstShift { shift: key }
        } else {
            FailureReason::NoValidCombination { shift: key }
        };
        Ok(Step::Failed(reason))
    }

    fn infeasible(&self, rankings: &[ShiftRanking]) -> Option<Infeasible> {
        if let Err(why) = check_capacity(&*self.group, &self.scheduler.flags) {
            return Some(why);
        }
        if self.scheduler.options.lookahead_eligibility {
            if let Err(why) = check_lookahead(rankings) {
                return Some(why);
            }
        }
        None
    }
}
