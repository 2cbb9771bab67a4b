mod config;
mod engine;
mod error;
mod export;
mod extensions;
mod fs;
mod naming;
mod options;
mod sanitize;
mod selection;

pub use config::{
    app_paths, load_config, load_config_from, save_config, save_config_to, AppConfig, AppPaths,
};
pub use engine::{
    AddFilesReport, EngineState, ProcessSummary, ProcessedFile, RenameEngine, MAX_FILE_LIMIT,
};
pub use error::EngineError;
pub use export::ExportSummary;
pub use extensions::{find_filter, ExtensionFilter, SUPPORTED_FILE_EXTENSIONS};
pub use fs::{FileSystem, StdFileSystem};
pub use naming::{compute_name, extract_numbering, preview_name, NamedFile};
pub use options::{NameField, NamingOptions, OptionsError, DEFAULT_TEMPLATE};
pub use sanitize::contains_disallowed_chars;
pub use selection::collect_files;
