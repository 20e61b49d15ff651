//! Shared helper deduplication
//!
//! Several modules declare the same tiny DOM helper. Once concatenated into a
//! single scope only one declaration may survive, otherwise the bundle throws
//! a redeclaration error at load time. The first module in list order that
//! contains the declaration keeps it; every later copy is replaced with a
//! placeholder comment by the stripper.
//!
//! Matching is exact. A copy whose comment or declaration was reformatted is
//! not recognised and survives into the bundle.

use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::error::BundleResult;

const DEFAULT_TITLE: &str = "Simple UI Helper";
const DEFAULT_DECLARATION: &str = "const $ = (selector) => document.querySelector(selector);";
const DEFAULT_PLACEHOLDER: &str = "// $ helper already defined above";

/// Textual description of the shared helper, as written in config files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct HelperSpec {
    /// Single line inside the `/** ... */` comment above the declaration
    pub title: String,
    /// The declaration itself, byte for byte
    pub declaration: String,
    /// Line substituted for every duplicate comment+declaration block
    pub placeholder: String,
}

impl Default for HelperSpec {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            declaration: DEFAULT_DECLARATION.to_owned(),
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
        }
    }
}

/// A compiled shared helper: the declaration signature plus the pattern
/// matching its full comment+declaration block
#[derive(Debug, Clone)]
pub struct SharedHelper {
    spec: HelperSpec,
    block: Regex,
}

impl SharedHelper {
    pub fn new(spec: HelperSpec) -> BundleResult<Self> {
        let pattern = format!(
            r"/\*\*\s*\n\s*\*\s*{}\s*\n\s*\*/\s*\n{}",
            regex::escape(&spec.title),
            regex::escape(&spec.declaration),
        );
        let block = Regex::new(&pattern)?;
        Ok(Self { spec, block })
    }

    /// Whether the raw module text declares the helper
    pub fn is_declared_in(&self, source: &str) -> bool {
        source.contains(&self.spec.declaration)
    }

    pub fn declaration(&self) -> &str {
        &self.spec.declaration
    }

    pub fn placeholder(&self) -> &str {
        &self.spec.placeholder
    }

    pub(crate) fn block_pattern(&self) -> &Regex {
        &self.block
    }
}

impl Default for SharedHelper {
    fn default() -> Self {
        Self::new(HelperSpec::default()).expect("default helper pattern is valid")
    }
}

/// Accumulator threaded through the fold over the module list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelperState {
    emitted: bool,
}

impl HelperState {
    pub const fn emitted(self) -> bool {
        self.emitted
    }

    /// Observe the next module's raw text.
    ///
    /// Returns the updated state and whether this module is the designated
    /// holder allowed to keep its declaration. Any module containing the
    /// declaration marks the helper as emitted, even when its comment block
    /// does not match and the stripper therefore leaves it alone.
    #[must_use]
    pub fn observe(self, helper: &SharedHelper, source: &str) -> (Self, bool) {
        let declared = helper.is_declared_in(source);
        let keep = declared && !self.emitted;
        if keep {
            debug!("Shared helper first declared here, keeping it");
        } else if declared {
            debug!("Shared helper already emitted, suppressing this copy");
        }
        (
            Self {
                emitted: self.emitted || declared,
            },
            keep,
        )
    }
}
