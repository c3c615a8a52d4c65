use clap::Parser;
use color_eyre::eyre::Result;
use healthwatch::config::{read_config_file, RunConfig};
use healthwatch::logging::{init_logging, parse_rotation, LogConfig};
use healthwatch::tracker::{resolve_token, GitHubTracker};
use std::path::PathBuf;
use tracing::info;

/// Healthwatch - reconciles dated healthcheck records with tracked issues
/// and nudges the overdue ones
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the healthcheck record store
    #[arg(long, env = "HEALTHWATCH_RECORDS_DIR")]
    records_dir: Option<PathBuf>,

    /// Tracker repository in "owner/name" form
    #[arg(long, env = "HEALTHWATCH_REPO")]
    repo: Option<String>,

    /// Optional JSON configuration file
    #[arg(long, env = "HEALTHWATCH_CONFIG", default_value = "healthwatch.json")]
    config: PathBuf,

    /// API token for the tracker
    #[arg(long, env = "HEALTHWATCH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Command that prints a tracker token (e.g. "gh auth token")
    #[arg(long, env = "HEALTHWATCH_TOKEN_COMMAND")]
    token_command: Option<String>,

    /// Days since the last record before an issue counts as overdue
    #[arg(long, env = "HEALTHWATCH_MAX_STALENESS_DAYS")]
    max_staleness_days: Option<i64>,

    /// Label that pauses notifications for an issue
    #[arg(long, env = "HEALTHWATCH_SUPPRESSION_LABEL")]
    suppression_label: Option<String>,

    /// Seconds to pause between mutating tracker calls
    #[arg(long, env = "HEALTHWATCH_RATE_PAUSE_SECONDS")]
    rate_pause_seconds: Option<u64>,

    /// Compute and report intended mutations without performing them
    #[arg(long, env = "HEALTHWATCH_DRY_RUN", default_value = "false")]
    dry_run: bool,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "HEALTHWATCH_LOG_JSON", default_value = "false")]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "HEALTHWATCH_LOG_ROTATION", default_value = "daily")]
    log_rotation: String,

    /// Custom log directory (default: ~/.healthwatch/logs)
    #[arg(long, env = "HEALTHWATCH_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    let args = Args::parse();

    let mut log_config = LogConfig {
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..LogConfig::default()
    };
    if let Some(dir) = args.log_dir {
        log_config.log_dir = dir;
    }
    init_logging(log_config)?;

    let file_config = read_config_file(&args.config).await?;
    let config = RunConfig::resolve(
        file_config,
        args.records_dir,
        args.repo,
        args.max_staleness_days,
        args.suppression_label,
        args.rate_pause_seconds,
        args.dry_run,
    )?;

    info!(
        records_dir = %config.records_dir.display(),
        repo = %config.repo,
        max_staleness_days = config.max_staleness_days,
        dry_run = config.dry_run,
        "Starting reconciliation pass"
    );

    let token = resolve_token(args.token, args.token_command).await?;
    let tracker = GitHubTracker::new(&config.repo, token)?;

    // Single captured `now` for the whole pass.
    let now = chrono::Utc::now();
    healthwatch::run(&config, &tracker, now).await?;

    Ok(())
}
