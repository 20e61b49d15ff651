use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::debug;

use esflat::{
    BundleError, BundleEvent, BundleOrchestrator, BundleReport, Config, ProgressSink,
    writer::format_size_kb,
};

/// Flatten ES modules into a single script that loads under file://
#[derive(Parser, Debug)]
#[command(name = "esflat", author, version, about, long_about = None)]
struct Cli {
    /// Project root the module paths and output path are relative to
    #[arg(short = 'C', long, default_value = ".")]
    directory: PathBuf,

    /// Config file layered over any discovered esflat.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file, overriding the configured one
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Warn about import/export syntax and helper copies left after stripping
    #[arg(long)]
    lint: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    const fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Prints one line per module as it is processed
#[derive(Debug, Default)]
struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    #[allow(clippy::print_stdout)]
    fn on_event(&mut self, event: BundleEvent<'_>) {
        match event {
            BundleEvent::Processing(entry) => {
                println!("  📦 Processing {}...", entry.display_path());
            }
            BundleEvent::Lint(finding) => println!("  ⚠️  {finding}"),
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_success(report: &BundleReport) {
    let output = report.output.to_string_lossy().replace('\\', "/");
    println!("\n✅ Bundle created successfully!");
    println!("   Output: {output}");
    println!("   Size: {} KB", format_size_kb(report.size));
    if !report.findings.is_empty() {
        println!("   Lint findings: {}", report.findings.len());
    }
    println!("\n📝 To use the bundled version, update index.html:");
    println!("   <script src=\"{output}\"></script>");
    println!("\n   (Remove the type=\"module\" attribute)");
}

#[allow(clippy::print_stdout, clippy::print_stderr)]
fn print_failure(err: &anyhow::Error) {
    if let Some(BundleError::MissingModule { path }) = err.downcast_ref::<BundleError>() {
        println!("  ❌ Error: {} not found!", path.display());
        return;
    }
    println!("\n❌ Error: {err:#}");
    eprintln!("{err:?}");
}

#[allow(clippy::print_stdout)]
fn run(cli: &Cli) -> Result<BundleReport> {
    println!("🔧 Bundling ES6 modules...");

    let mut config = Config::load(&cli.directory, cli.config.as_deref())?;
    if let Some(output) = &cli.output {
        config.output.clone_from(output);
    }
    debug!("Resolved config: {config:?}");

    let orchestrator = BundleOrchestrator::new(&cli.directory, config)?.with_lint(cli.lint);
    let report = orchestrator.run(&mut ConsoleProgress)?;
    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    match run(&cli).with_context(|| format!("bundling in {}", cli.directory.display())) {
        Ok(report) => {
            print_success(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_failure(&err);
            ExitCode::FAILURE
        }
    }
}
