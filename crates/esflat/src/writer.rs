//! Bundle persistence

use std::{fs, path::Path};

use log::debug;

use crate::error::{BundleError, BundleResult};

/// Write the bundle to `path`, replacing any previous file.
///
/// Returns the number of bytes written.
pub fn write_bundle(path: &Path, bundle: &str) -> BundleResult<u64> {
    debug!("Writing {} bytes to {}", bundle.len(), path.display());
    fs::write(path, bundle).map_err(|source| BundleError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let size = fs::metadata(path)
        .map_err(|source| BundleError::Write {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    Ok(size)
}

/// Size in kilobytes with one decimal place, e.g. `12.3`
pub fn format_size_kb(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}
