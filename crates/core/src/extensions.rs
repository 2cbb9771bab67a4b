use serde::Serialize;
use std::path::Path;

/// A named group of file extensions offered to file pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtensionFilter {
    pub key: &'static str,
    pub name: &'static str,
    /// `"*"` accepts every file.
    pub extensions: &'static [&'static str],
}

pub const SUPPORTED_FILE_EXTENSIONS: &[ExtensionFilter] = &[
    ExtensionFilter {
        key: "all",
        name: "All Files",
        extensions: &["*"],
    },
    ExtensionFilter {
        key: "images",
        name: "Image Files",
        extensions: &["png", "jpg", "jpeg", "bmp", "tiff"],
    },
    ExtensionFilter {
        key: "models",
        name: "3D Models",
        extensions: &["fbx", "blender", "obj", "stl", "amf", "3ds", "iges"],
    },
    ExtensionFilter {
        key: "data",
        name: "Json/XML",
        extensions: &["json", "xml"],
    },
];

impl ExtensionFilter {
    pub fn accepts_all(&self) -> bool {
        self.extensions.contains(&"*")
    }

    pub fn matches(&self, path: &Path) -> bool {
        if self.accepts_all() {
            return true;
        }
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                self.extensions
                    .iter()
                    .any(|candidate| ext.eq_ignore_ascii_case(candidate))
            })
            .unwrap_or(false)
    }
}

pub fn find_filter(key: &str) -> Option<&'static ExtensionFilter> {
    SUPPORTED_FILE_EXTENSIONS
        .iter()
        .find(|filter| filter.key.eq_ignore_ascii_case(key))
}
