use std::path::Path;
use walkdir::WalkDir;

/// Bytes a tree wipe would overwrite: regular files only, links not followed.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// Size of a file or directory before it is destroyed. 0 when missing.
pub fn entry_size(path: &Path) -> u64 {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => dir_size(path),
        Ok(meta) if meta.is_file() => meta.len(),
        _ => 0,
    }
}

const UNITS: [(u64, &str); 3] = [(1 << 30, "GB"), (1 << 20, "MB"), (1 << 10, "KB")];

/// Bytes wiped, as shown in scan and summary output.
pub fn format_size(bytes: u64) -> String {
    UNITS
        .iter()
        .find(|(scale, _)| bytes >= *scale)
        .map_or_else(
            || format!("{bytes} B"),
            |(scale, unit)| format!("{:.2} {unit}", bytes as f64 / *scale as f64),
        )
}

/// Shorten a path for display by replacing the home dir with `~`.
pub fn display_path(path: &Path) -> String {
    match dirs::home_dir() {
        Some(home) => match path.strip_prefix(&home) {
            Ok(relative) => format!("~/{}", relative.display()),
            Err(_) => path.display().to_string(),
        },
        None => path.display().to_string(),
    }
}
