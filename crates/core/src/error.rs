use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Not processed: files do not exist")]
    NothingToProcess,
    #[error("Not exported: no files processed")]
    NothingToExport,
    #[error("Not exported: incorrect export path")]
    InvalidDestination,
    #[error("failed to create export folder: {}", .path.display())]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to copy {} -> {}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EngineError {
    /// True for failures reported by the file system, as opposed to unmet
    /// preconditions that leave nothing half done.
    pub fn is_io(&self) -> bool {
        matches!(self, EngineError::CreateFolder { .. } | EngineError::Copy { .. })
    }
}
