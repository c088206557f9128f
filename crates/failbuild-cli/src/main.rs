//! Build result simulator CLI
//!
//! The `failbuild` command decides build results by build number.
//!
//! ## Commands
//!
//! - `policies`: List the selectable default policies
//! - `resolve`: Decide the result of a single build
//! - `simulate`: Run a sequence of builds from build 1

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};

use failbuild_core::{
    init_tracing, policy_options, BuildRecord, Configuration, ResolutionEngine, SimulatedJob,
    StatusCode,
};

#[derive(Parser)]
#[command(name = "failbuild")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Deterministic build result simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable default policies
    Policies,

    /// Decide the result of a single build
    Resolve {
        /// Build number (1-based)
        #[arg(short, long)]
        build: i64,

        /// Status already recorded on the build (SUCCESS, UNSTABLE, FAILURE, ABORTED)
        #[arg(short, long)]
        current: Option<StatusCode>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Run consecutive builds starting at build 1
    Simulate {
        /// Number of builds to run
        #[arg(short = 'n', long, default_value = "10")]
        builds: usize,

        #[command(flatten)]
        config: ConfigArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// JSON configuration file (overrides the individual flags)
    #[arg(long, env = "FAILBUILD_CONFIG")]
    config: Option<PathBuf>,

    /// Default policy: SUCCESS, UNSTABLE, FAILURE, ABORTED or CYCLE
    #[arg(long = "default", default_value = "FAILURE")]
    default_policy: String,

    /// Build numbers forced to SUCCESS
    #[arg(long)]
    success: Option<String>,

    /// Build numbers forced to UNSTABLE
    #[arg(long)]
    unstable: Option<String>,

    /// Build numbers forced to FAILURE
    #[arg(long)]
    failure: Option<String>,

    /// Build numbers forced to ABORTED
    #[arg(long)]
    aborted: Option<String>,
}

impl ConfigArgs {
    fn load(self) -> Result<Configuration> {
        if let Some(path) = self.config {
            return Configuration::from_json_file(&path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()));
        }
        Ok(Configuration {
            default_policy: self.default_policy,
            success: self.success,
            unstable: self.unstable,
            failure: self.failure,
            aborted: self.aborted,
        })
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON report for `simulate`.
#[derive(Serialize)]
struct SimulationReport<'a> {
    generated_at: DateTime<Utc>,
    config_digest: String,
    config: &'a Configuration,
    builds: &'a [BuildRecord],
    passed: usize,
    failed: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    init_tracing(cli.json, level);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the command's build(s) passed.
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Policies => {
            cmd_policies();
            Ok(true)
        }
        Commands::Resolve {
            build,
            current,
            config,
            format,
        } => cmd_resolve(build, current, config.load()?, format),
        Commands::Simulate {
            builds,
            config,
            format,
        } => cmd_simulate(builds, config.load()?, format),
    }
}

fn cmd_policies() {
    for option in policy_options() {
        println!("{:<10} {}", option.value, option.display_name);
    }
}

fn cmd_resolve(
    build: i64,
    current: Option<StatusCode>,
    config: Configuration,
    format: OutputFormat,
) -> Result<bool> {
    debug!(config_digest = %config.digest(), "resolving build {}", build);
    let engine = ResolutionEngine::new(config);
    let resolution = engine
        .resolve(build, current)
        .with_context(|| format!("Failed to resolve build #{}", build))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolution)?),
        OutputFormat::Text => {
            for line in &resolution.log_lines {
                println!("{}", line);
            }
            println!(
                "#{} {} ({})",
                resolution.ordinal,
                resolution.merged,
                if resolution.passed { "passed" } else { "failed" }
            );
        }
    }
    Ok(resolution.passed)
}

fn cmd_simulate(builds: usize, config: Configuration, format: OutputFormat) -> Result<bool> {
    let config_digest = config.digest();
    let mut job = SimulatedJob::new(config);
    let outcome = job.run_builds(builds).map(|_| ());
    outcome.with_context(|| format!("Simulation stopped at build #{}", job.next_ordinal()))?;

    let records = job.history();
    let passed = records.iter().filter(|r| r.passed).count();
    let failed = records.len() - passed;

    match format {
        OutputFormat::Json => {
            let report = SimulationReport {
                generated_at: Utc::now(),
                config_digest,
                config: job.step().engine().config(),
                builds: records,
                passed,
                failed,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for record in records {
                println!(
                    "#{:<4} {:<9} {:<8} {}",
                    record.ordinal,
                    record.policy,
                    record.status.name(),
                    record.console.join(" | ")
                );
            }
            println!("{} passed, {} failed", passed, failed);
        }
    }
    Ok(failed == 0)
}
