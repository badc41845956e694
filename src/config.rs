use crate::error::ConfigError;

/// Pass count used when the caller does not choose one.
pub const DEFAULT_PASSES: i32 = 7;
/// Smallest pass count the caller policy accepts.
pub const MIN_PASSES: i32 = 3;
/// Largest pass count the caller policy accepts.
pub const MAX_PASSES: i32 = 35;

/// Per-file behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WipeOptions {
    /// Re-read each file after its final pass and compare digests.
    pub verify: bool,
}

/// Settings for a batch of targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WipeConfig {
    pub passes: i32,
    pub options: WipeOptions,
    /// Targets processed at once. `1` keeps everything on the calling thread.
    pub jobs: usize,
}

impl Default for WipeConfig {
    fn default() -> Self {
        Self {
            passes: DEFAULT_PASSES,
            options: WipeOptions::default(),
            jobs: 1,
        }
    }
}

impl WipeConfig {
    /// Check the pass count against the 3..=35 policy and the worker count.
    ///
    /// The engine itself accepts any pass count; this is the caller policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PASSES..=MAX_PASSES).contains(&self.passes) {
            return Err(ConfigError::PassesOutOfRange {
                passes: self.passes,
                min: MIN_PASSES,
                max: MAX_PASSES,
            });
        }
        if self.jobs == 0 {
            return Err(ConfigError::ZeroJobs);
        }
        Ok(())
    }
}
