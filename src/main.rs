use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use review_digest::config::AppConfig;
use review_digest::digest::DateWindow;
use review_digest::mail::{Mailer, SmtpMailer};
use review_digest::platform::github::GitHubPlatform;
use review_digest::workflow::{run_daily_report, RunOptions};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "review-digest",
    about = "Email a daily digest of bot pull request reviews"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Build the report but do not send it
    #[arg(long)]
    dry_run: bool,

    /// Also write the HTML report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report on the two days ending on this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Exit with failure if any GitHub request failed
    #[arg(long)]
    strict: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config = AppConfig::load(cli.config.as_deref())?;
    if !cli.dry_run {
        config.validate_delivery()?;
    }

    let platform = GitHubPlatform::new(&config.github)?;
    let mailer = if cli.dry_run {
        None
    } else {
        Some(SmtpMailer::new(&config.email)?)
    };

    let window = cli
        .date
        .map(DateWindow::ending_on)
        .unwrap_or_else(DateWindow::ending_today);
    let options = RunOptions {
        window,
        output: cli.output.clone(),
    };

    let summary = run_daily_report(
        &platform,
        mailer.as_ref().map(|m| m as &dyn Mailer),
        &config,
        &options,
    )
    .await?;

    Ok(summary.succeeded(cli.strict))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match run(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            tracing::error!("Daily report finished with errors");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "Daily report failed");
            ExitCode::FAILURE
        }
    }
}
