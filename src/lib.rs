//! Multi-pass secure erasure of files and directory trees.
//!
//! Every regular file is overwritten in place with a repeating
//! `0x00`, `0xFF`, random schedule, synced to storage after each pass, and
//! then deleted. Directory trees are processed bottom-up and removed once
//! empty. Every target yields a [`WipeOutcome`]; failures are reported as
//! data and never abort the rest of a batch.
//!
//! This is a logical-layer wipe. Media with wear-leveling, copy-on-write or
//! snapshots may keep earlier blocks regardless of the pass count.

pub mod batch;
pub mod config;
pub mod error;
pub mod outcome;
pub mod pattern;
pub mod report;
pub mod shredder;
pub mod target;
pub mod tree;
pub mod utils;

pub use batch::{wipe_batch, wipe_path, BatchReport, CancelToken, WipeStats};
pub use config::{WipeConfig, WipeOptions, DEFAULT_PASSES, MAX_PASSES, MIN_PASSES};
pub use error::{ConfigError, WipeError, WipeResult};
pub use outcome::{Residue, WipeOutcome, WipeStatus};
pub use pattern::{FillPattern, PassPlan, CHUNK_SIZE};
pub use report::{NullReporter, Reporter, TracingReporter};
pub use shredder::wipe_file;
pub use target::{TargetKind, WipeTarget};
pub use tree::wipe_tree;
