use crate::error::EngineError;
use crate::export::{copy_all, ExportSummary};
use crate::fs::{FileSystem, StdFileSystem};
use crate::naming::compute_name;
use crate::options::NamingOptions;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const MAX_FILE_LIMIT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedFile {
    pub original_path: PathBuf,
    pub new_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddFilesReport {
    pub requested: usize,
    pub selected: usize,
}

impl AddFilesReport {
    pub fn dropped(&self) -> usize {
        self.requested - self.selected
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    pub processed: usize,
    pub missing: usize,
    /// New names produced for more than one input.
    pub duplicate_names: Vec<String>,
}

impl fmt::Display for ProcessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Processed {} files (ready for export)", self.processed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineState {
    Empty,
    HasFiles,
    Processed,
    Exported,
}

#[derive(Debug, Clone)]
struct Processed {
    files: Vec<ProcessedFile>,
    summary: ProcessSummary,
}

/// Owns the input set and naming options for one rename session.
///
/// Every change to the inputs or options drops the cached mapping, so the next
/// `process_files` recomputes it.
#[derive(Debug)]
pub struct RenameEngine<F: FileSystem = StdFileSystem> {
    fs: F,
    options: NamingOptions,
    input_files: Vec<PathBuf>,
    processed: Option<Processed>,
    exported: bool,
    overwritten: Vec<PathBuf>,
    #[cfg(test)]
    passes: usize,
}

impl RenameEngine<StdFileSystem> {
    pub fn new() -> Self {
        Self::with_options(NamingOptions::default())
    }

    pub fn with_options(options: NamingOptions) -> Self {
        Self::with_file_system(options, StdFileSystem)
    }
}

impl Default for RenameEngine<StdFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> RenameEngine<F> {
    pub fn with_file_system(options: NamingOptions, fs: F) -> Self {
        Self {
            fs,
            options,
            input_files: Vec::new(),
            processed: None,
            exported: false,
            overwritten: Vec::new(),
            #[cfg(test)]
            passes: 0,
        }
    }

    pub fn options(&self) -> &NamingOptions {
        &self.options
    }

    /// Runs `update` against the options and drops cached results if anything
    /// changed. Returns whatever `update` returns, so setter errors reach the caller.
    ///
    /// ```
    /// use file_renamer_core::RenameEngine;
    ///
    /// let mut engine = RenameEngine::new();
    /// let result = engine.update_options(|o| o.set_template("bad|name"));
    /// assert!(result.is_err());
    /// assert_eq!(engine.options().template(), "ImageName_Template");
    /// ```
    pub fn update_options<T>(&mut self, update: impl FnOnce(&mut NamingOptions) -> T) -> T {
        let before = self.options.clone();
        let out = update(&mut self.options);
        if self.options != before {
            debug!("naming options changed");
            self.invalidate();
        }
        out
    }

    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    pub fn file_count(&self) -> usize {
        self.input_files.len()
    }

    pub fn has_input_files(&self) -> bool {
        !self.input_files.is_empty()
    }

    pub fn is_at_capacity(&self) -> bool {
        self.input_files.len() >= MAX_FILE_LIMIT
    }

    pub fn is_processed(&self) -> bool {
        self.processed.is_some()
    }

    /// The mapping from the last successful `process_files`, in processing order.
    pub fn processed_files(&self) -> &[ProcessedFile] {
        self.processed
            .as_ref()
            .map(|p| p.files.as_slice())
            .unwrap_or_default()
    }

    /// Destinations overwritten by the most recent export.
    pub fn overwritten_files(&self) -> &[PathBuf] {
        &self.overwritten
    }

    pub fn state(&self) -> EngineState {
        match (&self.processed, self.exported) {
            (Some(_), true) => EngineState::Exported,
            (Some(_), false) => EngineState::Processed,
            (None, _) if self.input_files.is_empty() => EngineState::Empty,
            (None, _) => EngineState::HasFiles,
        }
    }

    pub fn add_files<I, P>(&mut self, candidates: I) -> AddFilesReport
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let room = MAX_FILE_LIMIT.saturating_sub(self.input_files.len());
        let mut requested = 0usize;
        let mut selected = 0usize;

        for candidate in candidates {
            requested += 1;
            if selected < room {
                self.input_files.push(candidate.into());
                selected += 1;
            }
        }

        let report = AddFilesReport {
            requested,
            selected,
        };
        if report.dropped() > 0 {
            warn!(
                requested,
                selected,
                limit = MAX_FILE_LIMIT,
                "Only the first {} files were selected.",
                selected
            );
        }
        if selected > 0 {
            self.invalidate();
        }
        report
    }

    pub fn remove_file(&mut self, path: &Path) -> bool {
        let Some(index) = self.input_files.iter().position(|p| p == path) else {
            return false;
        };
        self.input_files.remove(index);
        self.invalidate();
        true
    }

    pub fn clear_files(&mut self) {
        self.input_files.clear();
        self.invalidate();
    }

    /// Replaces the whole input set.
    pub fn reimport_files<I, P>(&mut self, candidates: I) -> AddFilesReport
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.clear_files();
        self.add_files(candidates)
    }

    /// Computes the old-to-new name mapping once; repeated calls without an
    /// intervening change return the cached summary.
    pub fn process_files(&mut self) -> Result<ProcessSummary, EngineError> {
        if let Some(processed) = &self.processed {
            return Ok(processed.summary.clone());
        }

        let mut files: Vec<PathBuf> = self
            .input_files
            .iter()
            .filter(|path| self.fs.exists(path))
            .cloned()
            .collect();
        let missing = self.input_files.len() - files.len();

        if files.is_empty() {
            warn!(inputs = self.input_files.len(), "no existing files to process");
            return Err(EngineError::NothingToProcess);
        }

        files.sort();
        files.dedup();
        if !self.options.sort_ascending() {
            files.reverse();
        }

        let mut cursor = u64::from(self.options.numbering_start_index());
        let mut mapping = Vec::with_capacity(files.len());
        for original_path in files {
            let named = compute_name(&original_path, cursor, &self.options);
            cursor = named.cursor;
            debug!(from = %original_path.display(), to = %named.name, "named");
            mapping.push(ProcessedFile {
                original_path,
                new_name: named.name,
            });
        }

        let duplicate_names = find_duplicate_names(&mapping);
        if !duplicate_names.is_empty() {
            warn!(
                count = duplicate_names.len(),
                "several files map to the same name; enable numbering to keep them apart"
            );
        }

        let summary = ProcessSummary {
            processed: mapping.len(),
            missing,
            duplicate_names,
        };
        info!("{}", summary);

        #[cfg(test)]
        {
            self.passes += 1;
        }
        self.processed = Some(Processed {
            files: mapping,
            summary: summary.clone(),
        });
        self.exported = false;
        Ok(summary)
    }

    /// Copies every processed file into `destination` (or its template-named
    /// subfolder). The first failing copy aborts the export; files copied before
    /// it stay in place.
    pub fn export_files(&mut self, destination: &Path) -> Result<ExportSummary, EngineError> {
        let files = match &self.processed {
            Some(processed) if !processed.files.is_empty() => &processed.files,
            _ => return Err(EngineError::NothingToExport),
        };

        if destination.as_os_str().is_empty() {
            return Err(EngineError::InvalidDestination);
        }

        self.exported = false;
        let folder = if self.options.create_sub_folder() {
            destination.join(self.options.template())
        } else {
            destination.to_path_buf()
        };
        self.fs
            .create_dir_all(&folder)
            .map_err(|source| EngineError::CreateFolder {
                path: folder.clone(),
                source,
            })?;

        self.overwritten.clear();
        let summary = copy_all(
            &self.fs,
            files,
            &folder,
            self.options.overwrite_files(),
            &mut self.overwritten,
        )?;

        if self.options.open_export_folder() {
            if let Err(err) = self.fs.open_in_viewer(&folder) {
                warn!(folder = %folder.display(), error = %err, "failed to open export folder");
            }
        }

        info!("{}", summary);
        self.exported = true;
        Ok(summary)
    }

    fn invalidate(&mut self) {
        self.processed = None;
        self.exported = false;
    }
}

fn find_duplicate_names(mapping: &[ProcessedFile]) -> Vec<String> {
    let mut counts = HashMap::<&str, usize>::new();
    for file in mapping {
        *counts.entry(file.new_name.as_str()).or_default() += 1;
    }
    let mut duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect();
    duplicates.sort();
    duplicates
}
