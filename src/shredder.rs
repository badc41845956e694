use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::config::WipeOptions;
use crate::error::{WipeError, WipeResult};
use crate::outcome::{Residue, WipeOutcome};
use crate::pattern::{FillPattern, PassPlan};
use crate::report::Reporter;
use crate::target::{kind_of, TargetKind};

/// Writer that can force its written data to stable storage.
pub trait DurableWrite: Write + Seek {
    fn sync(&mut self) -> io::Result<()>;
}

impl DurableWrite for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

impl<T: DurableWrite + ?Sized> DurableWrite for &mut T {
    fn sync(&mut self) -> io::Result<()> {
        (**self).sync()
    }
}

/// Securely wipe a single file: overwrite it in place `passes` times with the
/// cyclic 0x00 / 0xFF / random schedule, syncing after every pass, then
/// delete it.
///
/// A missing path is a success. A file that cannot be opened is left in
/// place and reported as a failure.
pub fn wipe_file(
    path: &Path,
    passes: i32,
    options: &WipeOptions,
    reporter: &dyn Reporter,
) -> WipeOutcome {
    let outcome = wipe_file_inner(path, PassPlan::new(passes), options, reporter);
    if let Some(err) = outcome.error() {
        reporter.entry_failed(path, err);
    }
    outcome
}

fn wipe_file_inner(
    path: &Path,
    plan: PassPlan,
    options: &WipeOptions,
    reporter: &dyn Reporter,
) -> WipeOutcome {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return WipeOutcome::success(path, TargetKind::Missing, 0);
        }
        Err(e) => {
            return WipeOutcome::failure(
                path,
                TargetKind::File,
                WipeError::io("stat", path, e),
                Residue::Untouched,
            );
        }
    };

    match kind_of(&meta.file_type()) {
        TargetKind::File => {}
        TargetKind::Directory => {
            let err = io::Error::new(io::ErrorKind::InvalidInput, "not a regular file");
            return WipeOutcome::failure(
                path,
                TargetKind::Directory,
                WipeError::io("open", path, err),
                Residue::Untouched,
            );
        }
        // Links and special files carry no content of their own.
        kind => return unlink(path, kind, 0, Residue::Untouched),
    }

    let size = meta.len();
    if size == 0 || plan.is_empty() {
        return unlink(path, TargetKind::File, size, Residue::Untouched);
    }

    let mut file = match OpenOptions::new().read(true).write(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            return WipeOutcome::failure(
                path,
                TargetKind::File,
                WipeError::io("open", path, e),
                Residue::Untouched,
            );
        }
    };

    let mut overwrite = Overwrite::new(&mut file, path, size);
    let expected = match overwrite.run(plan, options.verify, reporter) {
        Ok(expected) => expected,
        Err(err) => {
            let residue = overwrite.residue();
            return WipeOutcome::failure(path, TargetKind::File, err, residue);
        }
    };

    if let Some(expected) = expected {
        if let Err(err) = verify_readback(&mut file, path, expected) {
            return WipeOutcome::failure(path, TargetKind::File, err, Residue::Overwritten);
        }
    }

    drop(file);
    unlink(path, TargetKind::File, size, Residue::Overwritten)
}

fn unlink(path: &Path, kind: TargetKind, bytes: u64, residue: Residue) -> WipeOutcome {
    match std::fs::remove_file(path) {
        Ok(()) => WipeOutcome::success(path, kind, bytes),
        Err(e) => WipeOutcome::failure(path, kind, WipeError::io("remove", path, e), residue),
    }
}

/// Pass driver over a single open file.
///
/// The write cursor never moves past `size`, so the file neither grows nor
/// shrinks while passes run.
pub struct Overwrite<'a, W> {
    out: W,
    path: &'a Path,
    size: u64,
    touched: bool,
}

impl<'a, W: DurableWrite> Overwrite<'a, W> {
    pub fn new(out: W, path: &'a Path, size: u64) -> Self {
        Self {
            out,
            path,
            size,
            touched: false,
        }
    }

    /// Run every pass of `plan` in order. When `digest_last` is set, returns
    /// the BLAKE3 digest of the bytes written by the final pass.
    pub fn run(
        &mut self,
        plan: PassPlan,
        digest_last: bool,
        reporter: &dyn Reporter,
    ) -> WipeResult<Option<blake3::Hash>> {
        let total = plan.len();
        let mut last = None;
        for (index, pattern) in plan.patterns().enumerate() {
            reporter.pass_started(self.path, index, total, pattern);
            let track = digest_last && index + 1 == total;
            last = self.pass(pattern, track)?;
            reporter.pass_completed(self.path, index, self.size);
        }
        Ok(last)
    }

    /// What may be on disk if `run` returned an error.
    pub fn residue(&self) -> Residue {
        if self.touched {
            Residue::PartiallyOverwritten
        } else {
            Residue::Untouched
        }
    }

    fn pass(&mut self, pattern: FillPattern, track: bool) -> WipeResult<Option<blake3::Hash>> {
        let buf = pattern
            .fill_buffer(PassPlan::buffer_len(self.size))
            .map_err(|source| WipeError::Random {
                path: self.path.to_path_buf(),
                source,
            })?;
        let mut hasher = track.then(blake3::Hasher::new);

        self.out
            .seek(SeekFrom::Start(0))
            .map_err(|e| WipeError::io("seek", self.path, e))?;

        let mut remaining = self.size;
        while remaining > 0 {
            let chunk = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
            self.touched = true;
            self.out
                .write_all(&buf[..chunk])
                .map_err(|e| WipeError::io("write", self.path, e))?;
            if let Some(hasher) = hasher.as_mut() {
                hasher.update(&buf[..chunk]);
            }
            remaining -= chunk as u64;
        }

        self.out
            .flush()
            .map_err(|e| WipeError::io("flush", self.path, e))?;
        self.out
            .sync()
            .map_err(|e| WipeError::io("sync", self.path, e))?;

        Ok(hasher.map(|h| h.finalize()))
    }
}

/// Re-read the file and compare it with the digest of the final pass.
///
/// The read may be served from the page cache rather than the device.
fn verify_readback(file: &mut File, path: &Path, expected: blake3::Hash) -> WipeResult<()> {
    file.seek(SeekFrom::Start(0))
        .map_err(|e| WipeError::io("seek", path, e))?;
    let mut hasher = blake3::Hasher::new();
    let mut buf = vec![0u8; 65536];
    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| WipeError::io("verify", path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    if hasher.finalize() == expected {
        Ok(())
    } else {
        Err(WipeError::Verification {
            path: path.to_path_buf(),
        })
    }
}
