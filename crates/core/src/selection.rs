use crate::extensions::ExtensionFilter;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists the files under `root` that `filter` accepts, sorted by path.
///
/// Hidden files (leading `.`) are skipped. Directories are only descended into
/// when `recursive` is set.
pub fn collect_files(
    root: &Path,
    recursive: bool,
    filter: &ExtensionFilter,
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("folder does not exist: {}", root.display());
    }

    let mut out = Vec::new();

    if recursive {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("failed to walk folder: {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if is_hidden(path) || !filter.matches(path) {
                continue;
            }
            out.push(path.to_path_buf());
        }
    } else {
        for entry in fs::read_dir(root)
            .with_context(|| format!("failed to read folder: {}", root.display()))?
        {
            let entry =
                entry.with_context(|| format!("failed to read entry in: {}", root.display()))?;
            let path = entry.path();
            if !path.is_file() || is_hidden(&path) || !filter.matches(&path) {
                continue;
            }
            out.push(path);
        }
    }

    out.sort();
    Ok(out)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
