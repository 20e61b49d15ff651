//! Bundle assembly
//!
//! Layout of a bundle:
//!
//! ```text
//! /** generated header: title, timestamp, source manifest */
//!
//! (() => {
//!   'use strict';
//!   // banner + stripped code, once per module in list order
//! })();
//! ```
//!
//! Everything except the `Generated:` line is a pure function of the module
//! list and the stripped code, so reruns on unchanged inputs only differ there.

use std::fmt::Write;

use chrono::{DateTime, TimeZone, Timelike};
use serde::Deserialize;

use crate::module_list::ModuleEntry;

const BANNER_WIDTH: usize = 60;

/// Fixed text of the generated-file header
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct HeaderSpec {
    /// First line of the header comment
    pub title: String,
    /// Where the hand-written sources live, for the "To modify" note
    pub sources: String,
    /// Command that regenerates the bundle
    pub rebuild: String,
}

impl Default for HeaderSpec {
    fn default() -> Self {
        Self {
            title: "Skelly Ultra - Bundled Version".to_owned(),
            sources: "js/ and app-modular.js".to_owned(),
            rebuild: "build-bundle.bat (or esflat)".to_owned(),
        }
    }
}

/// One module after syntax stripping
#[derive(Debug, Clone)]
pub struct BundleChunk<'a> {
    pub entry: &'a ModuleEntry,
    pub code: String,
}

/// Header timestamp: local wall-clock time without zone, microsecond
/// precision. The fraction is omitted when it is zero.
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    let local = time.naive_local();
    let format = if local.nanosecond() / 1_000 == 0 {
        "%Y-%m-%dT%H:%M:%S"
    } else {
        "%Y-%m-%dT%H:%M:%S%.6f"
    };
    local.format(format).to_string()
}

/// Banner and code for one module
pub fn render_chunk(chunk: &BundleChunk<'_>) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!(
        "\n  // {rule}\n  // {} ({})\n  // {rule}\n{}\n",
        chunk.entry.label,
        chunk.entry.display_path(),
        chunk.code
    )
}

/// Assemble the complete bundle text.
///
/// `timestamp` is written verbatim into the `Generated:` line.
pub fn assemble(header: &HeaderSpec, chunks: &[BundleChunk<'_>], timestamp: &str) -> String {
    let mut bundle = String::new();

    bundle.push_str("/**\n");
    let _ = writeln!(bundle, " * {}", header.title);
    bundle.push_str(" * All modules combined into a single file for file:// protocol compatibility\n");
    bundle.push_str(" * \n");
    let _ = writeln!(bundle, " * Generated: {timestamp}");
    bundle.push_str(" * \n");
    bundle.push_str(" * This is an automatically generated file.\n");
    let _ = writeln!(
        bundle,
        " * To modify, edit the source modules in {}, ",
        header.sources
    );
    let _ = writeln!(bundle, " * then rebuild with: {}", header.rebuild);
    bundle.push_str(" * \n");
    bundle.push_str(" * Source modules:\n");
    for chunk in chunks {
        let _ = writeln!(bundle, " *   - {}", chunk.entry.display_path());
    }
    bundle.push_str(" */\n\n");

    bundle.push_str("(() => {\n");
    bundle.push_str("  'use strict';\n");
    for chunk in chunks {
        bundle.push_str(&render_chunk(chunk));
    }
    bundle.push_str("\n})();\n");

    bundle
}
