pub mod smtp;

use async_trait::async_trait;

use crate::error::Result;
use crate::render::RenderedReport;

pub use smtp::SmtpMailer;

/// Delivers a finished report. Called at most once per run.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, report: &RenderedReport) -> Result<()>;
}
