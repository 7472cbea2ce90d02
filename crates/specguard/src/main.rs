//! Specguard CLI.
//!
//! Checks that new versions of Swagger specs stay backwards compatible with
//! the versions clients were built against.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand, ValueEnum};

use specguard_diff::check_compatibility;
use specguard_lib::{run_check, CheckConfig, CheckError, GroupOutcome};
use specguard_spec_parser::{parse_document_file, Document};
use specguard_telemetry::{LogFormat, Telemetry, TelemetryConfig};

#[derive(Parser, Debug)]
#[command(name = "specguard", about = "Swagger backwards compatibility checker", version)]
struct Cli {
    /// Log level (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log format (json or pretty).
    #[arg(long, global = true, default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every spec in a directory against its lock file.
    ///
    /// Specs without a lock are accepted and locked. Compatible specs
    /// replace their lock. The first incompatible spec fails the run.
    Check {
        /// Directory holding the specs (*.json, *.yaml, *.yml).
        #[arg(long, default_value = specguard_lib::check::DEFAULT_SPEC_DIR)]
        source_dir: PathBuf,

        /// Directory holding the <name>.lock files.
        #[arg(long, default_value = specguard_lib::check::DEFAULT_SPEC_DIR)]
        lock_dir: PathBuf,

        /// Skip the check (env accepts 1/0, yes/no, true/false, on/off).
        #[arg(long, env = "SPECGUARD_SKIP", value_parser = BoolishValueParser::new())]
        skip: bool,
    },

    /// Compare two spec files directly.
    Diff {
        /// The previously published spec.
        #[arg(long)]
        old: PathBuf,

        /// The candidate spec.
        #[arg(long)]
        new: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format of `specguard diff`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary on stderr.
    Text,
    /// `{ "compatible", "violations" }` on stdout.
    Json,
}

/// Machine-readable result of `specguard diff`.
#[derive(serde::Serialize)]
struct DiffOutput<'a> {
    compatible: bool,
    violations: &'a [String],
}

/// Run the check command.
fn run_check_command(config: CheckConfig) -> ExitCode {
    match run_check(&config) {
        Ok(report) if report.skipped => {
            eprintln!("backwards compatibility check skipped");
            ExitCode::SUCCESS
        }
        Ok(report) => {
            for group in &report.groups {
                match group.outcome {
                    GroupOutcome::Initialized => eprintln!("✓ {} initialized", group.group),
                    GroupOutcome::Passed => eprintln!("✓ {} is backwards compatible", group.group),
                }
            }
            eprintln!();
            eprintln!(
                "checked {} spec(s): {} initialized, {} passed",
                report.groups.len(),
                report.count(GroupOutcome::Initialized),
                report.count(GroupOutcome::Passed)
            );
            ExitCode::SUCCESS
        }
        Err(CheckError::Incompatible { group, violations }) => {
            eprintln!("✗ {} has {} violation(s)", group, violations.len());
            for violation in &violations {
                eprintln!("  {}", violation);
            }
            eprintln!();
            eprintln!("error: backwards compatibility check failed for group {}", group);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn load(path: &Path) -> Result<Document, String> {
    if !path.exists() {
        return Err(format!("spec file not found: {}", path.display()));
    }
    parse_document_file(path).map_err(|e| format!("failed to parse {}: {}", path.display(), e))
}

/// Run the diff command.
fn run_diff(old: &Path, new: &Path, output_format: OutputFormat) -> ExitCode {
    let (old_doc, new_doc) = match (load(old), load(new)) {
        (Ok(o), Ok(n)) => (o, n),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let violations = check_compatibility(&old_doc, &new_doc);

    if output_format == OutputFormat::Json {
        let output = DiffOutput {
            compatible: violations.is_empty(),
            violations: &violations,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to serialize output: {}", e);
                return ExitCode::from(1);
            }
        }
    } else if violations.is_empty() {
        eprintln!("✓ {} is backwards compatible with {}", new.display(), old.display());
    } else {
        eprintln!(
            "✗ {} has {} violation(s) against {}",
            new.display(),
            violations.len(),
            old.display()
        );
        for violation in &violations {
            eprintln!("  {}", violation);
        }
    }

    if violations.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(log_format) = LogFormat::parse(&cli.log_format) else {
        eprintln!("error: invalid log format: {} (expected json or pretty)", cli.log_format);
        return ExitCode::from(2);
    };

    let telemetry_config = TelemetryConfig::new()
        .with_log_level(cli.log_level)
        .with_log_format(log_format);
    let telemetry = match Telemetry::init(telemetry_config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };
    tracing::debug!(
        command = ?cli.command,
        log_level = %telemetry.config().log_level,
        "specguard starting"
    );

    match cli.command {
        Commands::Check {
            source_dir,
            lock_dir,
            skip,
        } => run_check_command(
            CheckConfig::new()
                .with_source_dir(source_dir)
                .with_lock_dir(lock_dir)
                .with_skip(skip),
        ),
        Commands::Diff { old, new, format } => run_diff(&old, &new, format),
    }
}
