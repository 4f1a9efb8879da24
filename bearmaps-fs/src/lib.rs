//! Capability-based file access for map extracts and request files.
#![forbid(unsafe_code)]

use std::io::{self, Read};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open the directory containing `path` and return it with the file name.
///
/// A bare file name resolves against the current directory.
///
/// # Errors
///
/// Fails when `path` has no file name component or the parent directory
/// cannot be opened.
pub fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Whether `path` exists and is a regular file.
///
/// # Errors
///
/// Propagates failures to open the parent directory. A missing file in an
/// existing directory is `Ok(false)`.
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent(path)?;
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Read a whole UTF-8 text file, such as a JSON request.
///
/// # Errors
///
/// Fails when the file cannot be opened or is not valid UTF-8.
pub fn read_utf8(path: &Utf8Path) -> io::Result<String> {
    let mut file = fs_utf8::File::open_ambient(path, ambient_authority())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}
