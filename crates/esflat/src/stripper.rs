//! ES module syntax removal
//!
//! Line-anchored regular expressions applied in a fixed order. Later patterns
//! see the output of earlier ones. Text that matches none of them passes
//! through untouched.

use std::{borrow::Cow, sync::LazyLock};

use log::trace;
use regex::{NoExpand, Regex};

use crate::helper::SharedHelper;

/// `export` keyword at the start of a line; the exported item stays
static EXPORT_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^export\s+").expect("valid export pattern"));

/// `import ... from '...';`, including destructured imports spanning lines
static IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?ms)^import\s+.*?from\s+['"].*?['"];?"#).expect("valid import pattern")
});

/// Side-effect imports: `import './file.js';`
static IMPORT_BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^import\s+['"].*?['"];?"#).expect("valid bare import pattern")
});

/// Three or more line breaks separated only by whitespace
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").expect("valid blank line pattern"));

/// Remove module syntax from one module's source.
///
/// `keep_helper` marks the module allowed to keep its shared helper
/// declaration; in every other module the helper's comment+declaration block
/// is replaced with the placeholder line.
pub fn strip_module_syntax(source: &str, keep_helper: bool, helper: &SharedHelper) -> String {
    let code = EXPORT_KEYWORD.replace_all(source, "");
    let code = IMPORT_FROM.replace_all(&code, "");
    let code = IMPORT_BARE.replace_all(&code, "");

    let code = if keep_helper {
        code
    } else {
        let replaced = helper
            .block_pattern()
            .replace_all(&code, NoExpand(helper.placeholder()));
        if matches!(replaced, Cow::Owned(_)) {
            trace!("Replaced duplicate shared helper with placeholder");
        }
        Cow::Owned(replaced.into_owned())
    };

    let code = BLANK_RUN.replace_all(&code, "\n\n");
    code.trim().to_owned()
}
