//! Runs a search on a worker thread against a wall-clock deadline.
//!
//! When the deadline fires the supervisor sets the cancel flag, then waits a
//! bounded grace period for the worker to acknowledge before returning
//! `"timed out"`. A worker that still has not answered is detached and a
//! warning is logged.

use std::any::Any;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn, Span};

use super::backtracking::{BacktrackingScheduler, FailureReason, SearchReport};
use super::cancel::CancelToken;
use super::SchedulingAlgorithm;
use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::group::ShiftGroup;
use crate::schedule::RosterResult;

type WorkerResult = Result<(SearchReport, ShiftGroup), SchedulerError>;

/// Everything a supervised run produced.
#[derive(Debug)]
pub struct SupervisedRun {
    pub result: RosterResult,
    /// `None` when the run timed out.
    pub report: Option<SearchReport>,
    /// The group as the worker left it; `None` when the run timed out.
    pub group: Option<ShiftGroup>,
}

/// Owns the run-level configuration and drives searches under a deadline.
#[derive(Debug, Clone)]
pub struct Supervisor {
    config: SchedulerConfig,
}

impl Supervisor {
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Runs the backtracking search configured by this supervisor.
    pub fn run(&self, group: ShiftGroup) -> Result<RosterResult, SchedulerError> {
        Ok(self.run_detailed(group)?.result)
    }

    pub fn run_detailed(&self, group: ShiftGroup) -> Result<SupervisedRun, SchedulerError> {
        self.run_with(BacktrackingScheduler::from_config(&self.config), group)
    }

    /// Runs `algorithm` on a worker thread and races it against the deadline.
    pub fn run_with<A>(&self, algorithm: A, mut group: ShiftGroup) -> Result<SupervisedRun, SchedulerError>
    where
        A: SchedulingAlgorithm + Send + 'static,
    {
        let timeout = self.config.timeout_duration()?;
        let grace = self.config.cancel_grace_duration()?;

        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        let (tx, rx) = mpsc::channel::<WorkerResult>();
        let span = Span::current();

        let handle = thread::Builder::new()
            .name("shiftwise-search".into())
            .spawn(move || {
                let _enter = span.enter();
                let result = algorithm
                    .schedule(&mut group, &worker_cancel)
                    .map(|report| (report, group));
                // nobody is listening any more if the deadline already passed
                let _ = tx.send(result);
            })
            .map_err(|e| SchedulerError::Spawn(e.to_string()))?;

        let received = match timeout {
            Some(limit) => rx.recv_timeout(limit),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(result) => {
                join(handle)?;
                let (report, group) = result?;
                let result = RosterResult::from_outcome(&report.outcome, &group)?;
                Ok(SupervisedRun {
                    result,
                    report: Some(report),
                    group: Some(group),
                })
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(join(handle).err().unwrap_or(SchedulerError::WorkerDisconnected))
            }
            Err(RecvTimeoutError::Timeout) => {
                info!(?timeout, "deadline reached, cancelling search");
                cancel.cancel();
                match rx.recv_timeout(grace) {
                    Err(RecvTimeoutError::Timeout) => {
                        warn!(?grace, "search did not stop within the grace period, detaching worker");
                    }
                    _ => match join(handle) {
                        Ok(()) => debug!("search acknowledged cancellation"),
                        Err(e) => warn!(error = %e, "search worker failed while cancelling"),
                    },
                }
                Ok(SupervisedRun {
                    result: RosterResult::failure(FailureReason::TimedOut),
                    report: None,
                    group: None,
                })
            }
        }
    }
}

fn join(handle: JoinHandle<()>) -> Result<(), SchedulerError> {
    handle
        .join()
        .map_err(|payload| SchedulerError::WorkerPanicked(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
