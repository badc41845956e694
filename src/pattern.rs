use std::fmt;

use rand_core::{OsError, OsRng, TryRngCore};

/// Largest buffer written per call during a pass.
pub const CHUNK_SIZE: usize = 8192;

/// What a single pass writes over the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillPattern {
    Zeros,
    Ones,
    Random,
}

impl FillPattern {
    /// Pattern for pass `index` (0-based). Depends only on `index % 3`.
    #[must_use]
    pub fn for_pass(index: usize) -> Self {
        match index % 3 {
            0 => Self::Zeros,
            1 => Self::Ones,
            _ => Self::Random,
        }
    }

    /// Build a fill buffer of `len` bytes for this pattern.
    /// Random buffers are drawn from the OS generator on every call.
    pub fn fill_buffer(self, len: usize) -> Result<Vec<u8>, OsError> {
        match self {
            Self::Zeros => Ok(vec![0x00; len]),
            Self::Ones => Ok(vec![0xFF; len]),
            Self::Random => {
                let mut buf = vec![0u8; len];
                OsRng.try_fill_bytes(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

impl fmt::Display for FillPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Zeros => "0x00",
            Self::Ones => "0xFF",
            Self::Random => "random",
        })
    }
}

/// The pass schedule for a given pass count.
///
/// A count below one yields an empty plan: the file is removed without
/// being overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassPlan {
    passes: usize,
}

impl PassPlan {
    #[must_use]
    pub fn new(passes: i32) -> Self {
        Self {
            passes: usize::try_from(passes).unwrap_or(0),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.passes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passes == 0
    }

    /// Patterns in the order they are written.
    pub fn patterns(&self) -> impl Iterator<Item = FillPattern> {
        (0..self.passes).map(FillPattern::for_pass)
    }

    /// Size of the fill buffer for a file of `file_size` bytes.
    #[must_use]
    pub fn buffer_len(file_size: u64) -> usize {
        usize::try_from(file_size).map_or(CHUNK_SIZE, |size| size.min(CHUNK_SIZE))
    }
}

impl fmt::Display for PassPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(no overwrite)");
        }
        for (i, pattern) in self.patterns().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{pattern}")?;
        }
        Ok(())
    }
}
