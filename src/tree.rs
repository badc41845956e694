use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::config::WipeOptions;
use crate::error::WipeError;
use crate::outcome::{Residue, WipeOutcome};
use crate::report::Reporter;
use crate::shredder::wipe_file;
use crate::target::{kind_of, TargetKind};

/// Securely wipe everything under `root`, then `root` itself.
///
/// Entries are visited bottom-up so every directory is emptied before it is
/// removed. Failures are recorded per entry and never stop the walk; the
/// returned outcome succeeds only if nothing was left behind. A bare file
/// root is handed to [`wipe_file`].
pub fn wipe_tree(
    root: &Path,
    passes: i32,
    options: &WipeOptions,
    reporter: &dyn Reporter,
) -> WipeOutcome {
    let meta = match std::fs::symlink_metadata(root) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return WipeOutcome::success(root, TargetKind::Missing, 0);
        }
        Err(e) => {
            let err = WipeError::io("stat", root, e);
            reporter.entry_failed(root, &err);
            return WipeOutcome::failure(root, TargetKind::Directory, err, Residue::Untouched);
        }
    };
    if !meta.is_dir() {
        return wipe_file(root, passes, options, reporter);
    }

    let mut children = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .contents_first(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                let err = WipeError::Traversal {
                    path: path.clone(),
                    source: e,
                };
                reporter.entry_failed(&path, &err);
                children.push(WipeOutcome::failure(
                    &path,
                    TargetKind::Directory,
                    err,
                    Residue::Untouched,
                ));
                continue;
            }
        };
        // The root comes last in contents-first order; removed below.
        if entry.depth() == 0 {
            continue;
        }
        let outcome = match kind_of(&entry.file_type()) {
            TargetKind::Directory => remove_dir(entry.path(), reporter),
            _ => wipe_file(entry.path(), passes, options, reporter),
        };
        children.push(outcome);
    }

    children.push(remove_dir(root, reporter));
    aggregate(root, children)
}

fn remove_dir(path: &Path, reporter: &dyn Reporter) -> WipeOutcome {
    match std::fs::remove_dir(path) {
        Ok(()) => WipeOutcome::success(path, TargetKind::Directory, 0),
        // Already gone.
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            WipeOutcome::success(path, TargetKind::Directory, 0)
        }
        // Leftover contents carry their own residue.
        Err(e) => {
            let err = WipeError::io("remove_dir", path, e);
            reporter.entry_failed(path, &err);
            WipeOutcome::failure(path, TargetKind::Directory, err, Residue::None)
        }
    }
}

fn aggregate(root: &Path, children: Vec<WipeOutcome>) -> WipeOutcome {
    let total = children.len();
    let failed = children.iter().filter(|c| !c.is_success()).count();
    let bytes: u64 = children.iter().map(|c| c.bytes_processed).sum();

    let mut outcome = if failed == 0 {
        WipeOutcome::success(root, TargetKind::Directory, bytes)
    } else {
        WipeOutcome::failure(
            root,
            TargetKind::Directory,
            WipeError::PartialTree { failed, total },
            Residue::None,
        )
    };
    outcome.bytes_processed = bytes;
    outcome.children = children;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testing::{HookReporter, RecordingReporter};
    use crate::report::NullReporter;
    use std::fs;

    fn options() -> WipeOptions {
        WipeOptions::default()
    }

    #[test]
    fn missing_root_is_success() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outcome = wipe_tree(&dir.path().join("nope"), 7, &options(), &NullReporter);
        assert!(outcome.is_success());
        assert_eq!(outcome.bytes_processed, 0);
        assert!(outcome.children.is_empty());
    }

    #[test]
    fn nested_tree_is_removed_bottom_up() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let root = scratch.path().join("profile");
        fs::create_dir_all(root.join("a/b/c")).expect("mkdir");
        fs::create_dir_all(root.join("d")).expect("mkdir");
        fs::write(root.join("top.db"), vec![1u8; 100]).expect("write");
        fs::write(root.join("a/one"), vec![2u8; 9000]).expect("write");
        fs::write(root.join("a/b/c/deep"), vec![3u8; 10]).expect("write");
        fs::write(root.join("d/empty"), b"").expect("write");

        let outcome = wipe_tree(&root, 3, &options(), &NullReporter);

        assert!(outcome.is_success(), "{:?}", outcome.failures());
        assert_eq!(outcome.bytes_processed, 9110);
        assert_eq!(outcome.file_outcomes().count(), 4);
        assert!(!root.exists());
        assert!(scratch.path().exists());
    }

    #[test]
    fn bare_file_root_is_wiped_as_file() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let path = scratch.path().join("cookies");
        fs::write(&path, vec![5u8; 300]).expect("write");

        let outcome = wipe_tree(&path, 3, &options(), &NullReporter);

        assert!(outcome.is_success());
        assert_eq!(outcome.kind, TargetKind::File);
        assert_eq!(outcome.bytes_processed, 300);
        assert!(!path.exists());
    }

    #[test]
    fn every_file_in_tree_gets_full_schedule() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let root = scratch.path().join("cache");
        fs::create_dir_all(root.join("x")).expect("mkdir");
        fs::write(root.join("f1"), vec![1u8; 10]).expect("write");
        fs::write(root.join("x/f2"), vec![1u8; 10]).expect("write");
        let reporter = RecordingReporter::default();

        let outcome = wipe_tree(&root, 4, &options(), &reporter);

        assert!(outcome.is_success());
        let passes = reporter.passes.lock().unwrap();
        assert_eq!(passes.len(), 8);
        for file in [root.join("f1"), root.join("x/f2")] {
            assert_eq!(passes.iter().filter(|(p, _)| *p == file).count(), 4);
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_unlinked_without_touching_target() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let outside = scratch.path().join("keep.txt");
        fs::write(&outside, b"keep me").expect("write");
        let root = scratch.path().join("tree");
        fs::create_dir(&root).expect("mkdir");
        std::os::unix::fs::symlink(&outside, root.join("link")).expect("symlink");
        std::os::unix::fs::symlink(scratch.path(), root.join("dirlink")).expect("symlink");

        let outcome = wipe_tree(&root, 3, &options(), &NullReporter);

        assert!(outcome.is_success(), "{:?}", outcome.failures());
        assert!(!root.exists());
        assert_eq!(fs::read(&outside).expect("read"), b"keep me");
    }

    #[cfg(unix)]
    #[test]
    fn unremovable_directory_is_reported_but_siblings_continue() {
        use std::os::unix::fs::PermissionsExt;

        let scratch = tempfile::tempdir().expect("tempdir");
        let root = scratch.path().join("tree");
        let locked = root.join("locked");
        fs::create_dir_all(&locked).expect("mkdir");
        fs::write(locked.join("inner"), vec![1u8; 64]).expect("write");
        fs::write(root.join("sibling"), vec![1u8; 64]).expect("write");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o500)).expect("chmod");
        let marker = locked.join(".marker");
        if fs::write(&marker, b"").is_ok() {
            // Privileged test runner ignores directory modes.
            let _ = fs::remove_file(&marker);
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");
            return;
        }

        let reporter = RecordingReporter::default();
        let outcome = wipe_tree(&root, 3, &options(), &reporter);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");

        assert!(!outcome.is_success());
        assert!(matches!(
            outcome.error(),
            Some(WipeError::PartialTree { .. })
        ));
        assert!(!root.join("sibling").exists());
        assert!(locked.join("inner").exists());
        let inner = outcome
            .file_outcomes()
            .find(|c| c.path == locked.join("inner"))
            .expect("inner outcome");
        assert_eq!(inner.residue, Residue::Overwritten);
        let locked_outcome = outcome
            .children
            .iter()
            .find(|c| c.path == locked)
            .expect("locked outcome");
        assert_eq!(locked_outcome.residue, Residue::None);
        assert!(!reporter.failures.lock().unwrap().is_empty());
    }

    #[test]
    fn entry_swapped_mid_walk_fails_alone() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let root = scratch.path().join("tree");
        fs::create_dir_all(root.join("c_dir")).expect("mkdir");
        fs::write(root.join("a_first"), vec![1u8; 64]).expect("write");
        fs::write(root.join("b_swapped"), vec![2u8; 64]).expect("write");
        fs::write(root.join("c_dir/inner"), vec![3u8; 10]).expect("write");
        let swapped = root.join("b_swapped");
        let target = swapped.clone();
        let reporter = HookReporter::new(root.join("a_first"), move || {
            fs::remove_file(&target).expect("remove");
            fs::create_dir(&target).expect("mkdir");
        });

        let outcome = wipe_tree(&root, 3, &options(), &reporter);

        assert!(matches!(
            outcome.error(),
            Some(WipeError::PartialTree { .. })
        ));
        let entry_failures: Vec<_> = outcome
            .failures()
            .into_iter()
            .filter(|f| f.error().and_then(WipeError::operation) != Some("remove_dir"))
            .collect();
        assert_eq!(entry_failures.len(), 1);
        assert_eq!(entry_failures[0].path, swapped);
        assert_eq!(entry_failures[0].residue, Residue::Untouched);
        let root_outcome = outcome.children.last().expect("root outcome");
        assert_eq!(root_outcome.path, root);
        assert_eq!(root_outcome.residue, Residue::None);

        assert!(swapped.is_dir());
        assert!(!root.join("a_first").exists());
        assert!(!root.join("c_dir").exists());
        assert_eq!(outcome.bytes_processed, 74);
    }

    #[test]
    fn vanished_directory_is_a_traversal_failure() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let root = scratch.path().join("tree");
        let vanished = root.join("b_sub");
        fs::create_dir_all(&vanished).expect("mkdir");
        fs::write(root.join("a_first"), vec![1u8; 64]).expect("write");
        fs::write(vanished.join("secret"), vec![2u8; 32]).expect("write");
        fs::write(root.join("c_last"), vec![3u8; 64]).expect("write");
        let target = vanished.clone();
        let reporter = HookReporter::new(root.join("a_first"), move || {
            fs::remove_dir_all(&target).expect("remove");
        });

        let outcome = wipe_tree(&root, 3, &options(), &reporter);

        assert!(matches!(
            outcome.error(),
            Some(WipeError::PartialTree { failed: 1, .. })
        ));
        let failures = outcome.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].path, vanished);
        assert!(matches!(
            failures[0].error(),
            Some(WipeError::Traversal { .. })
        ));
        assert!(!root.join("a_first").exists());
        assert!(!root.join("c_last").exists());
        assert!(!root.exists());
        assert_eq!(outcome.bytes_processed, 128);
    }
}
