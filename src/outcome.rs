use std::path::{Path, PathBuf};

use crate::error::WipeError;
use crate::target::TargetKind;

/// Success or the reason a target was not destroyed.
#[derive(Debug)]
pub enum WipeStatus {
    Success,
    Failure(WipeError),
}

/// What may still be on disk for a target after a wipe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residue {
    /// Nothing left.
    None,
    /// The original content was never touched.
    Untouched,
    /// A pass was interrupted; on-disk content is a mix of patterns and
    /// possibly original data. Not confirmed destroyed.
    PartiallyOverwritten,
    /// Content was destroyed but the entry itself could not be removed.
    Overwritten,
}

/// Result of wiping one target. Trees carry one child per entry visited.
#[derive(Debug)]
pub struct WipeOutcome {
    pub path: PathBuf,
    pub kind: TargetKind,
    pub status: WipeStatus,
    pub bytes_processed: u64,
    pub residue: Residue,
    pub children: Vec<WipeOutcome>,
}

impl WipeOutcome {
    pub(crate) fn success(path: &Path, kind: TargetKind, bytes_processed: u64) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            status: WipeStatus::Success,
            bytes_processed,
            residue: Residue::None,
            children: Vec::new(),
        }
    }

    pub(crate) fn failure(
        path: &Path,
        kind: TargetKind,
        error: WipeError,
        residue: Residue,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            status: WipeStatus::Failure(error),
            bytes_processed: 0,
            residue,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, WipeStatus::Success)
    }

    #[must_use]
    pub fn error(&self) -> Option<&WipeError> {
        match &self.status {
            WipeStatus::Success => None,
            WipeStatus::Failure(err) => Some(err),
        }
    }

    /// True when prior content may still be recoverable.
    #[must_use]
    pub fn content_may_survive(&self) -> bool {
        matches!(
            self.residue,
            Residue::Untouched | Residue::PartiallyOverwritten
        ) || self.children.iter().any(WipeOutcome::content_may_survive)
    }

    /// Every failed leaf beneath (and including) this outcome.
    #[must_use]
    pub fn failures(&self) -> Vec<&WipeOutcome> {
        let mut out = Vec::new();
        self.collect_failures(&mut out);
        out
    }

    fn collect_failures<'a>(&'a self, out: &mut Vec<&'a WipeOutcome>) {
        if self.children.is_empty() {
            if !self.is_success() {
                out.push(self);
            }
            return;
        }
        for child in &self.children {
            child.collect_failures(out);
        }
    }

    /// Per-file outcomes, excluding directory and link entries.
    pub fn file_outcomes(&self) -> impl Iterator<Item = &WipeOutcome> {
        self.children
            .iter()
            .filter(|child| child.kind == TargetKind::File)
    }
}
