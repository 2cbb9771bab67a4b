use crate::engine::ProcessedFile;
use crate::error::EngineError;
use crate::fs::FileSystem;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub folder: PathBuf,
    pub exported: usize,
    pub overwrite_enabled: bool,
    pub overwritten: Vec<PathBuf>,
    /// Destinations left untouched because they existed and overwrite was off.
    pub conflicts: Vec<PathBuf>,
}

impl ExportSummary {
    pub fn overwritten_info(&self) -> String {
        if self.overwritten.is_empty() {
            return "No files were overwritten.".to_string();
        }
        format!(
            "The following files were overwritten:\n{}",
            join_paths(&self.overwritten)
        )
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exported {} files to {}",
            self.exported,
            self.folder.display()
        )?;
        if self.overwrite_enabled {
            write!(f, "\n{}", self.overwritten_info())?;
        }
        if !self.conflicts.is_empty() {
            write!(
                f,
                "\nSkipped {} existing files (overwrite disabled):\n{}",
                self.conflicts.len(),
                join_paths(&self.conflicts)
            )?;
        }
        Ok(())
    }
}

/// Copies every mapped file into `folder`, in mapping order.
///
/// Overwritten destinations are pushed to `overwritten` as they happen, so the
/// record stays accurate when a later copy fails and the error is returned.
pub(crate) fn copy_all<F: FileSystem>(
    fs: &F,
    files: &[ProcessedFile],
    folder: &Path,
    overwrite: bool,
    overwritten: &mut Vec<PathBuf>,
) -> Result<ExportSummary, EngineError> {
    let mut exported = 0usize;
    let mut conflicts = Vec::new();

    for file in files {
        let target = folder.join(&file.new_name);
        let exists = fs.exists(&target);

        if exists && !overwrite {
            warn!(destination = %target.display(), "destination exists, skipping");
            conflicts.push(target);
            continue;
        }

        fs.copy(&file.original_path, &target, overwrite)
            .map_err(|source| EngineError::Copy {
                from: file.original_path.clone(),
                to: target.clone(),
                source,
            })?;
        debug!(
            from = %file.original_path.display(),
            to = %target.display(),
            "copied"
        );

        if exists {
            overwritten.push(target);
        }
        exported += 1;
    }

    Ok(ExportSummary {
        folder: folder.to_path_buf(),
        exported,
        overwrite_enabled: overwrite,
        overwritten: overwritten.clone(),
        conflicts,
    })
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(overwrite_enabled: bool, overwritten: Vec<PathBuf>) -> ExportSummary {
        ExportSummary {
            folder: PathBuf::from("/out"),
            exported: 2,
            overwrite_enabled,
            overwritten,
            conflicts: Vec::new(),
        }
    }

    #[test]
    fn display_lists_overwritten_files_when_enabled() {
        let text = summary(true, vec![PathBuf::from("/out/Tex_00.png")]).to_string();
        assert_eq!(
            text,
            "Exported 2 files to /out\nThe following files were overwritten:\n/out/Tex_00.png"
        );
    }

    #[test]
    fn display_reports_no_overwrites() {
        let text = summary(true, Vec::new()).to_string();
        assert!(text.ends_with("No files were overwritten."));
    }

    #[test]
    fn display_omits_overwrite_info_when_disabled() {
        let mut s = summary(false, Vec::new());
        s.conflicts.push(PathBuf::from("/out/Tex_01.png"));
        let text = s.to_string();
        assert!(!text.contains("overwritten"));
        assert!(text.contains("Skipped 1 existing files"));
        assert!(text.ends_with("/out/Tex_01.png"));
    }
}
