//! Optional warnings for text the stripper could not handle
//!
//! Stripping stays best-effort and silent. With linting enabled the run also
//! reports module syntax that survived stripping and duplicate helper copies
//! whose formatting kept them from being recognised. Findings never change the
//! bundle or the exit status.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::helper::SharedHelper;

/// Static `import`/`export` statements, possibly indented. Dynamic
/// `import(...)` calls are valid in classic scripts and are not flagged.
static RESIDUAL_SYNTAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:import|export)(?:\s|\{|\*|$)").expect("valid residual syntax pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintFinding {
    /// A line of stripped code still starts with `import` or `export`
    ResidualModuleSyntax {
        path: PathBuf,
        line: usize,
        text: String,
    },
    /// A later copy of the shared helper declaration was not replaced
    SurvivingHelper { path: PathBuf },
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResidualModuleSyntax { path, line, text } => write!(
                f,
                "{}:{line}: module syntax survived stripping: {}",
                path.display(),
                text.trim()
            ),
            Self::SurvivingHelper { path } => write!(
                f,
                "{}: duplicate shared helper declaration was not recognised and is still present",
                path.display()
            ),
        }
    }
}

/// Inspect one module's stripped code.
///
/// `suppressed` is true when this module declared the helper but was not its
/// designated holder. Line numbers refer to the stripped code.
pub fn lint_chunk(
    path: &Path,
    code: &str,
    suppressed: bool,
    helper: &SharedHelper,
) -> Vec<LintFinding> {
    let mut findings: Vec<LintFinding> = code
        .lines()
        .enumerate()
        .filter(|(_, text)| RESIDUAL_SYNTAX.is_match(text))
        .map(|(index, text)| LintFinding::ResidualModuleSyntax {
            path: path.to_path_buf(),
            line: index + 1,
            text: text.to_owned(),
        })
        .collect();

    if suppressed && code.contains(helper.declaration()) {
        findings.push(LintFinding::SurvivingHelper {
            path: path.to_path_buf(),
        });
    }

    findings
}
