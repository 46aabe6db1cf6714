use std::path::PathBuf;

use crate::config::AppConfig;
use crate::digest::{collect_digest, DateWindow};
use crate::error::Result;
use crate::mail::Mailer;
use crate::platform::types::PrState;
use crate::platform::Platform;
use crate::render::{render_report, ReportContext};
use crate::workflow::types::{Delivery, RunSummary};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub window: DateWindow,
    /// Also write the HTML document here.
    pub output: Option<PathBuf>,
}

/// Build the report for the whole organization and send it.
///
/// Fetch failures degrade the report but never fail the run. A failed send
/// is logged and reported through [`RunSummary::delivery`]; only writing
/// `options.output` can return an error. Passing no mailer renders the
/// report without sending it.
pub async fn run_daily_report(
    platform: &dyn Platform,
    mailer: Option<&dyn Mailer>,
    config: &AppConfig,
    options: &RunOptions,
) -> Result<RunSummary> {
    let window = &options.window;
    tracing::info!(
        org = config.org(),
        today = %window.today(),
        yesterday = %window.yesterday(),
        "Building daily review report"
    );

    let digest = collect_digest(platform, config, window).await;

    if digest.is_empty() {
        tracing::info!("No pull requests with bot reviews found");
    } else {
        tracing::info!(
            open = digest.has_pulls(PrState::Open),
            closed = digest.has_pulls(PrState::Closed),
            "Found pull requests with bot reviews"
        );
    }

    let ctx = ReportContext::new(config, window.today());
    let report = render_report(&digest, &ctx);

    if let Some(path) = &options.output {
        tokio::fs::write(path, &report.html).await?;
        tracing::info!(path = %path.display(), "Wrote HTML report");
    }

    let delivery = match mailer {
        None => {
            tracing::info!(subject = %report.subject, "Dry run, email not sent");
            Delivery::Skipped
        }
        Some(mailer) => match mailer.send(&report).await {
            Ok(()) => Delivery::Sent,
            Err(e) => {
                tracing::error!(error = %e, "Failed to send report email");
                Delivery::Failed {
                    error: e.to_string(),
                }
            }
        },
    };

    let stats = digest.stats;
    tracing::info!(
        repositories = stats.repositories,
        open_in_window = stats.open_in_window,
        closed_in_window = stats.closed_in_window,
        reported = stats.reported,
        fetch_errors = stats.fetch_errors,
        "Daily report run complete"
    );

    Ok(RunSummary { stats, delivery })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::digest::testing::{pull, review, FakePlatform};
    use crate::error::AppError;
    use crate::render::RenderedReport;

    const BOT: &str = "copilot-pull-request-reviewer[bot]";

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<RenderedReport>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, report: &RenderedReport) -> Result<()> {
            self.sent.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(&self, _report: &RenderedReport) -> Result<()> {
            Err(AppError::Email("535 authentication failed".to_string()))
        }
    }

    fn config() -> AppConfig {
        AppConfig::from_toml(
            r#"
            [github]
            org = "acme"
            token = "t"
        "#,
        )
        .unwrap()
    }

    fn options() -> RunOptions {
        RunOptions {
            window: DateWindow::ending_on(NaiveDate::from_ymd_opt(2025, 6, 23).unwrap()),
            output: None,
        }
    }

    fn closed_only_platform() -> FakePlatform {
        FakePlatform {
            repo_pages: vec![vec!["api"]],
            pulls: [("api", vec![pull(42, PrState::Closed, "2025-06-23T10:00:00Z")])]
                .into_iter()
                .collect(),
            reviews: [(("api", 42), vec![review(BOT, "## Summary\n- Found 1 issue")])]
                .into_iter()
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_sends_one_report() {
        let platform = closed_only_platform();
        let mailer = RecordingMailer::default();

        let mailer_ref: &dyn Mailer = &mailer;
        let summary = run_daily_report(&platform, Some(mailer_ref), &config(), &options())
            .await
            .unwrap();

        assert_eq!(summary.delivery, Delivery::Sent);
        assert!(summary.succeeded(true));
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].subject.ends_with("- 2025-06-23"));
        assert!(sent[0].html.contains("No open pull requests"));
        assert!(sent[0].html.contains("#42: PR 42"));
        assert!(!sent[0].html.contains("No closed pull requests"));
    }

    #[tokio::test]
    async fn test_send_failure_is_reported_not_raised() {
        let platform = closed_only_platform();

        let mailer: &dyn Mailer = &FailingMailer;
        let summary = run_daily_report(&platform, Some(mailer), &config(), &options())
            .await
            .unwrap();

        assert!(
            matches!(summary.delivery, Delivery::Failed { ref error } if error.contains("535"))
        );
        assert!(!summary.succeeded(false));
    }

    #[tokio::test]
    async fn test_dry_run_writes_output() {
        let platform = closed_only_platform();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        let options = RunOptions {
            output: Some(path.clone()),
            ..options()
        };

        let summary = run_daily_report(&platform, None, &config(), &options)
            .await
            .unwrap();

        assert_eq!(summary.delivery, Delivery::Skipped);
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("#42: PR 42"));
    }

    #[tokio::test]
    async fn test_fetch_errors_only_fail_in_strict_mode() {
        let platform = FakePlatform {
            failing_repo_pages: [1].into_iter().collect(),
            ..Default::default()
        };
        let mailer = RecordingMailer::default();

        let mailer_ref: &dyn Mailer = &mailer;
        let summary = run_daily_report(&platform, Some(mailer_ref), &config(), &options())
            .await
            .unwrap();

        assert_eq!(summary.stats.fetch_errors, 1);
        assert!(summary.succeeded(false));
        assert!(!summary.succeeded(true));
        // The placeholder report still goes out.
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }
}
