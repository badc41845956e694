use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// What a target path turned out to be when it was inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    File,
    Directory,
    Missing,
    /// Symlink, socket, fifo or device node. Unlinked, never overwritten.
    Other,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Missing => "missing",
            Self::Other => "other",
        })
    }
}

/// A path the caller wants destroyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WipeTarget {
    pub path: PathBuf,
    pub kind: TargetKind,
}

impl WipeTarget {
    /// Inspect `path` without following symlinks.
    ///
    /// Relative paths are resolved against the current directory. Errors
    /// other than "not found" are returned so the caller can report them.
    pub fn discover(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = std::path::absolute(path.as_ref())?;
        let kind = match std::fs::symlink_metadata(&path) {
            Ok(meta) => kind_of(&meta.file_type()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => TargetKind::Missing,
            Err(e) => return Err(e),
        };
        Ok(Self { path, kind })
    }
}

pub(crate) fn kind_of(file_type: &std::fs::FileType) -> TargetKind {
    if file_type.is_file() {
        TargetKind::File
    } else if file_type.is_dir() {
        TargetKind::Directory
    } else {
        TargetKind::Other
    }
}
