//! Bundling run orchestration
//!
//! Reads, strips and assembles every module in list order, then writes the
//! bundle once. Any failure before the write aborts the run and leaves the
//! previous output file untouched.

use std::path::PathBuf;

use chrono::Local;
use log::{debug, info, warn};

use crate::{
    assembler::{BundleChunk, assemble, format_timestamp},
    config::Config,
    error::BundleResult,
    helper::{HelperState, SharedHelper},
    lint::{LintFinding, lint_chunk},
    module_list::ModuleEntry,
    reader::read_module,
    stripper::strip_module_syntax,
    writer::write_bundle,
};

/// Progress notifications emitted during a run
#[derive(Debug, Clone, Copy)]
pub enum BundleEvent<'a> {
    /// A module is about to be read and stripped
    Processing(&'a ModuleEntry),
    /// Lint found something in the module just processed
    Lint(&'a LintFinding),
}

/// Receives progress notifications
pub trait ProgressSink {
    fn on_event(&mut self, event: BundleEvent<'_>);
}

/// Discards all progress notifications
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_event(&mut self, _event: BundleEvent<'_>) {}
}

/// The assembled bundle before it is written
#[derive(Debug, Clone)]
pub struct BundleOutput {
    pub text: String,
    /// Whether any module declared the shared helper
    pub helper_emitted: bool,
    pub findings: Vec<LintFinding>,
}

/// Summary of a successful run
#[derive(Debug, Clone)]
pub struct BundleReport {
    /// Output path as configured, relative to the project root
    pub output: PathBuf,
    /// Bytes written
    pub size: u64,
    pub module_count: usize,
    pub findings: Vec<LintFinding>,
}

#[derive(Debug)]
pub struct BundleOrchestrator {
    root: PathBuf,
    config: Config,
    helper: SharedHelper,
    lint: bool,
}

impl BundleOrchestrator {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> BundleResult<Self> {
        let helper = SharedHelper::new(config.helper.clone())?;
        Ok(Self {
            root: root.into(),
            config,
            helper,
            lint: false,
        })
    }

    /// Report text the stripper could not handle
    #[must_use]
    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }

    /// Absolute (or root-relative) path the bundle is written to
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.config.output)
    }

    /// Build and write the bundle, timestamped with the current local time
    pub fn run(&self, sink: &mut dyn ProgressSink) -> BundleResult<BundleReport> {
        let timestamp = format_timestamp(&Local::now());
        let output = self.build(&timestamp, sink)?;

        let output_path = self.output_path();
        let size = write_bundle(&output_path, &output.text)?;
        info!(
            "Wrote {} modules to {} ({size} bytes)",
            self.config.modules.len(),
            output_path.display()
        );
        if output.helper_emitted {
            info!("Shared helper `{}` emitted once", self.helper.declaration());
        } else {
            info!("No module declared the shared helper");
        }

        Ok(BundleReport {
            output: self.config.output.clone(),
            size,
            module_count: self.config.modules.len(),
            findings: output.findings,
        })
    }

    /// Read, strip and assemble every module without touching the output file
    pub fn build(&self, timestamp: &str, sink: &mut dyn ProgressSink) -> BundleResult<BundleOutput> {
        let mut state = HelperState::default();
        let mut chunks = Vec::with_capacity(self.config.modules.len());
        let mut findings = Vec::new();

        for entry in &self.config.modules {
            sink.on_event(BundleEvent::Processing(entry));
            let source = read_module(&self.root, entry)?;

            let (next, keep_helper) = state.observe(&self.helper, &source);
            let suppressed = self.helper.is_declared_in(&source) && !keep_helper;
            state = next;

            let code = strip_module_syntax(&source, keep_helper, &self.helper);
            debug!(
                "Stripped {}: {} -> {} bytes",
                entry.display_path(),
                source.len(),
                code.len()
            );

            if self.lint {
                for finding in lint_chunk(&entry.path, &code, suppressed, &self.helper) {
                    warn!("{finding}");
                    sink.on_event(BundleEvent::Lint(&finding));
                    findings.push(finding);
                }
            }

            chunks.push(BundleChunk { entry, code });
        }

        Ok(BundleOutput {
            text: assemble(&self.config.header, &chunks, timestamp),
            helper_emitted: state.emitted(),
            findings,
        })
    }
}
