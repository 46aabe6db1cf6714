use crate::digest::FetchStats;

/// What happened to the rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The email was accepted by the SMTP server.
    Sent,
    /// No mailer was configured for this run (dry run).
    Skipped,
    /// Sending failed; the run still completed.
    Failed { error: String },
}

/// Outcome of one daily report run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: FetchStats,
    pub delivery: Delivery,
}

impl RunSummary {
    /// Whether the run should exit successfully. Fetch errors only count
    /// when `strict` is set.
    pub fn succeeded(&self, strict: bool) -> bool {
        if matches!(self.delivery, Delivery::Failed { .. }) {
            return false;
        }
        !(strict && self.stats.fetch_errors > 0)
    }
}
