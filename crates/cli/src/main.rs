use clap::{Parser, Subcommand};
use signage_application::use_cases::{CleanupOptions, ThresholdMode};
use signage_domain::{CliOverrides, Config, DeletionThreshold};
use std::process::ExitCode;
use tracing::{error, info};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "signage")]
#[command(version)]
#[command(about = "Signage content maintenance")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Database path
    #[arg(long, value_name = "PATH", global = true)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Delete orphaned or stale media, slides and channels
    Cleanup {
        /// Walk through discovery and confirmation without deleting anything
        #[arg(long)]
        dry_run: bool,

        /// Threshold date (YYYY-MM-DD or RFC 3339); skips the threshold prompts
        #[arg(long, value_name = "DATE", conflicts_with = "no_threshold")]
        threshold: Option<String>,

        /// Only delete orphaned content; skips the threshold prompts
        #[arg(long)]
        no_threshold: bool,

        /// Answer the final confirmation with yes
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Cleanup aborted");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let cli_overrides = CliOverrides {
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting signage v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Cleanup {
            dry_run,
            threshold,
            no_threshold,
            yes,
        } => {
            let options = CleanupOptions {
                dry_run,
                threshold: threshold_mode(&config, threshold.as_deref(), no_threshold)?,
                assume_yes: yes,
            };
            cleanup(&config, options).await
        }
    }
}

fn threshold_mode(
    config: &Config,
    threshold: Option<&str>,
    no_threshold: bool,
) -> anyhow::Result<ThresholdMode> {
    if no_threshold {
        return Ok(ThresholdMode::None);
    }

    match threshold {
        Some(input) => {
            let tz = config
                .cleanup
                .tz()
                .ok_or_else(|| anyhow::anyhow!("Unknown timezone '{}'", config.cleanup.timezone))?;
            Ok(ThresholdMode::Fixed(DeletionThreshold::parse(input, tz)?))
        }
        None => Ok(ThresholdMode::Ask),
    }
}

async fn cleanup(config: &Config, options: CleanupOptions) -> anyhow::Result<ExitCode> {
    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool.clone());
    let use_cases = di::UseCases::new(&repos, config);

    let report = use_cases.run_cleanup.execute(&options).await?;
    println!();
    println!("{}", report);

    pool.close().await;

    if report.failed() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
