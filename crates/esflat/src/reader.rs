//! Module source loading

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    error::{BundleError, BundleResult},
    module_list::ModuleEntry,
};

/// Read one module's full text, resolving its path against `root`.
///
/// Line endings are normalised to `\n` before any transform sees the text,
/// so CRLF checkouts bundle the same as LF ones.
///
/// A missing file is reported as [`BundleError::MissingModule`] naming the
/// path as listed, so the caller can abort the run with a precise message.
pub fn read_module(root: &Path, entry: &ModuleEntry) -> BundleResult<String> {
    let full_path: PathBuf = root.join(&entry.path);
    debug!("Reading module {}", full_path.display());

    let source = fs::read_to_string(&full_path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => BundleError::MissingModule {
            path: entry.path.clone(),
        },
        _ => BundleError::Read {
            path: entry.path.clone(),
            source,
        },
    })?;
    Ok(normalize_newlines(source))
}

/// Convert `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
