//! Thin filesystem helpers shared by the object store, the pointer store and
//! the working-directory view.
//!
//! Missing files and directories are reported as `None` / empty rather than
//! as errors; every other I/O failure is propagated.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Read a whole file. `Ok(None)` if it does not exist.
pub fn read_bytes(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Read a whole file as UTF-8 text with surrounding whitespace trimmed.
pub fn read_trimmed(path: &Path) -> io::Result<Option<String>> {
    match read_bytes(path)? {
        Some(bytes) => {
            let text = String::from_utf8(bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            Ok(Some(text.trim().to_string()))
        }
        None => Ok(None),
    }
}

/// Write `bytes` to `path` atomically, creating parent directories.
///
/// The data goes to a temporary file in the destination directory which is
/// then renamed over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Names of the plain files directly inside `dir`, sorted. Empty if `dir`
/// does not exist.
pub fn list_filenames(dir: &Path) -> io::Result<Vec<String>> {
    list_entries(dir, |ft| ft.is_file())
}

/// Names of the subdirectories directly inside `dir`, sorted.
pub fn list_dirs(dir: &Path) -> io::Result<Vec<String>> {
    list_entries(dir, |ft| ft.is_dir())
}

fn list_entries(dir: &Path, keep: impl Fn(&fs::FileType) -> bool) -> io::Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !keep(&entry.file_type()?) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Returns `true` if `path` exists.
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Delete a file. Returns `true` if it existed.
pub fn delete(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Create a directory and all missing parents.
pub fn mkdirs(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}
