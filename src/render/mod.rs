pub mod html;
pub mod markup;
pub mod text;

use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::digest::Digest;
use crate::platform::types::PrState;

/// Labels shared by the HTML and plain-text renderings.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub date: NaiveDate,
    pub org_label: &'a str,
    pub bot_display_name: &'a str,
    pub footer: &'a str,
}

impl<'a> ReportContext<'a> {
    pub fn new(config: &'a AppConfig, date: NaiveDate) -> Self {
        Self {
            date,
            org_label: config.org_label(),
            bot_display_name: &config.report.bot_display_name,
            footer: &config.report.footer,
        }
    }

    pub fn subject(&self) -> String {
        format!(
            "📊 Daily Report for {} Reviews in {} Repositories - {}",
            self.bot_display_name,
            self.org_label,
            self.date.format("%Y-%m-%d")
        )
    }
}

/// A report ready to hand to a [`crate::mail::Mailer`].
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub fn render_report(digest: &Digest, ctx: &ReportContext<'_>) -> RenderedReport {
    let open = html::render_pull_request_section(&digest.repos, PrState::Open, ctx.bot_display_name);
    let closed =
        html::render_pull_request_section(&digest.repos, PrState::Closed, ctx.bot_display_name);

    RenderedReport {
        subject: ctx.subject(),
        html: html::render_document(&open, &closed, ctx),
        text: text::render_text_report(&digest.repos, ctx),
    }
}
