//! Flattens an ordered list of browser ES modules into one classic script.
//!
//! Module syntax is removed with line-anchored text substitutions, the result
//! is wrapped in an IIFE and prefixed with a generated-file header. There is
//! no module graph: the concatenation order is whatever the module list says.

pub mod assembler;
pub mod config;
pub mod error;
pub mod helper;
pub mod lint;
pub mod module_list;
pub mod orchestrator;
pub mod reader;
pub mod stripper;
pub mod writer;

pub use config::Config;
pub use error::{BundleError, BundleResult};
pub use orchestrator::{BundleEvent, BundleOrchestrator, BundleReport, NoProgress, ProgressSink};
