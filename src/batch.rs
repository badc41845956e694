use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::{WipeConfig, WipeOptions};
use crate::error::{ConfigError, WipeError};
use crate::outcome::{Residue, WipeOutcome};
use crate::report::Reporter;
use crate::shredder::wipe_file;
use crate::target::{TargetKind, WipeTarget};
use crate::tree::wipe_tree;

/// Shared flag that stops a batch before its next target.
///
/// A target that has already started always runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Totals over a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WipeStats {
    pub targets: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub files_wiped: usize,
    pub directories_removed: usize,
    pub bytes_wiped: u64,
    /// One line per failed entry, `path: detail`.
    pub errors: Vec<String>,
}

impl WipeStats {
    #[must_use]
    pub fn from_outcomes(outcomes: &[WipeOutcome]) -> Self {
        let mut stats = Self {
            targets: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            if outcome.is_success() {
                stats.succeeded += 1;
            } else {
                stats.failed += 1;
            }
            if matches!(outcome.error(), Some(WipeError::Cancelled)) {
                stats.cancelled += 1;
            }
            stats.bytes_wiped += outcome.bytes_processed;
            stats.count_entries(outcome);
            for failure in outcome.failures() {
                if let Some(err) = failure.error() {
                    stats
                        .errors
                        .push(format!("{}: {}", failure.path.display(), err.detail()));
                }
            }
        }
        stats
    }

    fn count_entries(&mut self, outcome: &WipeOutcome) {
        if outcome.children.is_empty() {
            if outcome.is_success() {
                match outcome.kind {
                    TargetKind::File => self.files_wiped += 1,
                    TargetKind::Directory => self.directories_removed += 1,
                    TargetKind::Missing | TargetKind::Other => {}
                }
            }
            return;
        }
        for child in &outcome.children {
            self.count_entries(child);
        }
    }
}

/// Outcomes in input order plus their totals.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<WipeOutcome>,
    pub stats: WipeStats,
}

impl BatchReport {
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.stats.failed == 0
    }
}

/// Wipe one target according to its discovered kind.
pub fn wipe_path(
    target: &WipeTarget,
    passes: i32,
    options: &WipeOptions,
    reporter: &dyn Reporter,
) -> WipeOutcome {
    match target.kind {
        TargetKind::Missing => WipeOutcome::success(&target.path, TargetKind::Missing, 0),
        TargetKind::Directory => wipe_tree(&target.path, passes, options, reporter),
        TargetKind::File | TargetKind::Other => {
            wipe_file(&target.path, passes, options, reporter)
        }
    }
}

/// Wipe every target, `config.jobs` at a time.
///
/// Targets never share state, so they may run on separate workers. Passes
/// within one file always stay sequential. Once `cancel` is set, targets
/// that have not started are reported as cancelled.
pub fn wipe_batch(
    targets: &[WipeTarget],
    config: &WipeConfig,
    cancel: &CancelToken,
    reporter: &dyn Reporter,
) -> Result<BatchReport, ConfigError> {
    if config.jobs == 0 {
        return Err(ConfigError::ZeroJobs);
    }

    let total = targets.len();
    let completed = AtomicUsize::new(0);
    let run_one = |target: &WipeTarget| {
        let outcome = if cancel.is_cancelled() {
            WipeOutcome::failure(
                &target.path,
                target.kind,
                WipeError::Cancelled,
                Residue::Untouched,
            )
        } else {
            reporter.target_started(&target.path, target.kind);
            wipe_path(target, config.passes, &config.options, reporter)
        };
        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
        reporter.target_finished(&outcome, done, total);
        outcome
    };

    let outcomes: Vec<WipeOutcome> = if config.jobs == 1 {
        targets.iter().map(run_one).collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .build()
            .map_err(|e| ConfigError::Pool(e.to_string()))?;
        pool.install(|| targets.par_iter().map(run_one).collect())
    };

    let stats = WipeStats::from_outcomes(&outcomes);
    Ok(BatchReport { outcomes, stats })
}
