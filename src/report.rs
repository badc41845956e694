//! Diagnostic sink handed to every engine entry point.
//!
//! The engine never installs or configures logging itself. Callers pass a
//! [`Reporter`]; [`TracingReporter`] forwards to `tracing`, and the binary
//! decides where those events go.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::WipeError;
use crate::outcome::WipeOutcome;
use crate::pattern::FillPattern;
use crate::target::TargetKind;

/// Receives progress and failure events while targets are destroyed.
///
/// All methods default to doing nothing. Implementations must be `Sync`
/// because batches may run targets on several workers.
pub trait Reporter: Sync {
    /// A top-level target is about to be processed.
    fn target_started(&self, _path: &Path, _kind: TargetKind) {}

    /// Pass `index` of `total` is about to overwrite `path`.
    fn pass_started(&self, _path: &Path, _index: usize, _total: usize, _pattern: FillPattern) {}

    /// Pass `index` has been written and synced.
    fn pass_completed(&self, _path: &Path, _index: usize, _bytes: u64) {}

    /// An entry could not be destroyed. Called once per failure.
    fn entry_failed(&self, _path: &Path, _error: &WipeError) {}

    /// A top-level target finished; `completed` of `total` targets are done.
    fn target_finished(&self, _outcome: &WipeOutcome, _completed: usize, _total: usize) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Emits every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn target_started(&self, path: &Path, kind: TargetKind) {
        info!(path = %path.display(), kind = %kind, "wiping target");
    }

    fn pass_started(&self, path: &Path, index: usize, total: usize, pattern: FillPattern) {
        debug!(
            path = %path.display(),
            pass = index + 1,
            total,
            pattern = %pattern,
            "overwrite pass started"
        );
    }

    fn pass_completed(&self, path: &Path, index: usize, bytes: u64) {
        debug!(path = %path.display(), pass = index + 1, bytes, "overwrite pass synced");
    }

    fn entry_failed(&self, path: &Path, error: &WipeError) {
        warn!(
            path = %path.display(),
            operation = error.operation().unwrap_or("-"),
            error = %error.detail(),
            "failed to destroy entry"
        );
    }

    fn target_finished(&self, outcome: &WipeOutcome, completed: usize, total: usize) {
        if outcome.is_success() {
            info!(
                path = %outcome.path.display(),
                bytes = outcome.bytes_processed,
                completed,
                total,
                "target destroyed"
            );
        } else {
            warn!(
                path = %outcome.path.display(),
                failures = outcome.failures().len(),
                completed,
                total,
                "target not fully destroyed"
            );
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use super::Reporter;
    use crate::error::WipeError;
    use crate::pattern::FillPattern;

    /// Runs `action` once, when the first pass over `trigger` starts.
    pub(crate) struct HookReporter<F> {
        trigger: PathBuf,
        action: Mutex<Option<F>>,
    }

    impl<F: FnOnce() + Send> HookReporter<F> {
        pub(crate) fn new(trigger: PathBuf, action: F) -> Self {
            Self {
                trigger,
                action: Mutex::new(Some(action)),
            }
        }
    }

    impl<F: FnOnce() + Send> Reporter for HookReporter<F> {
        fn pass_started(&self, path: &Path, _index: usize, _total: usize, _pattern: FillPattern) {
            if path != self.trigger.as_path() {
                return;
            }
            let action = self.action.lock().unwrap().take();
            if let Some(action) = action {
                action();
            }
        }
    }

    /// Records pass events and the file size observed when each pass ends.
    #[derive(Default)]
    pub(crate) struct RecordingReporter {
        pub(crate) passes: Mutex<Vec<(PathBuf, FillPattern)>>,
        pub(crate) sizes: Mutex<Vec<u64>>,
        pub(crate) failures: Mutex<Vec<PathBuf>>,
    }

    impl RecordingReporter {
        pub(crate) fn patterns(&self) -> Vec<FillPattern> {
            self.passes
                .lock()
                .unwrap()
                .iter()
                .map(|(_, p)| *p)
                .collect()
        }
    }

    impl Reporter for RecordingReporter {
        fn pass_started(&self, path: &Path, _index: usize, _total: usize, pattern: FillPattern) {
            self.passes
                .lock()
                .unwrap()
                .push((path.to_path_buf(), pattern));
        }

        fn pass_completed(&self, path: &Path, _index: usize, _bytes: u64) {
            let len = std::fs::metadata(path).map(|m| m.len()).unwrap_or(u64::MAX);
            self.sizes.lock().unwrap().push(len);
        }

        fn entry_failed(&self, path: &Path, _error: &WipeError) {
            self.failures.lock().unwrap().push(path.to_path_buf());
        }
    }
}
