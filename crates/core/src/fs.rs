use std::fs;
use std::io;
use std::path::Path;

/// File-system operations the engine needs during processing and export.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    /// Copies `source` to `destination`. With `overwrite == false` an existing
    /// destination is an `AlreadyExists` error.
    fn copy(&self, source: &Path, destination: &Path, overwrite: bool) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Best effort; callers ignore the outcome beyond logging it.
    fn open_in_viewer(&self, path: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn copy(&self, source: &Path, destination: &Path, overwrite: bool) -> io::Result<()> {
        if !overwrite && destination.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("destination already exists: {}", destination.display()),
            ));
        }
        fs::copy(source, destination).map(|_| ())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn open_in_viewer(&self, path: &Path) -> io::Result<()> {
        open_folder(path)
    }
}

#[cfg(target_os = "macos")]
fn open_folder(path: &Path) -> io::Result<()> {
    std::process::Command::new("open").arg(path).spawn()?;
    Ok(())
}

#[cfg(target_os = "windows")]
fn open_folder(path: &Path) -> io::Result<()> {
    std::process::Command::new("explorer").arg(path).spawn()?;
    Ok(())
}

#[cfg(target_os = "linux")]
fn open_folder(path: &Path) -> io::Result<()> {
    std::process::Command::new("xdg-open").arg(path).spawn()?;
    Ok(())
}

#[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
fn open_folder(_path: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "opening folders is not supported on this platform",
    ))
}
