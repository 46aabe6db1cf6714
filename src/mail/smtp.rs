use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::EmailConfig;
use crate::error::Result;
use crate::render::RenderedReport;

use super::Mailer;

/// Sends reports through an SMTP submission server over implicit TLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let (from, to) = parse_addresses(config)?;

        // `relay` wraps the connection in TLS from the first byte (SMTPS).
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, from, to })
    }
}

fn parse_addresses(config: &EmailConfig) -> Result<(Mailbox, Vec<Mailbox>)> {
    let from: Mailbox = config.sender().parse()?;
    let to = config
        .recipients
        .iter()
        .map(|r| r.trim().parse::<Mailbox>())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((from, to))
}

/// Build the `multipart/alternative` message: plain text first, HTML last
/// so clients prefer the HTML rendering.
pub fn build_message(from: &Mailbox, to: &[Mailbox], report: &RenderedReport) -> Result<Message> {
    let mut builder = Message::builder().from(from.clone()).subject(&report.subject);
    for recipient in to {
        builder = builder.to(recipient.clone());
    }

    let message = builder.multipart(MultiPart::alternative_plain_html(
        report.text.clone(),
        report.html.clone(),
    ))?;
    Ok(message)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, report: &RenderedReport) -> Result<()> {
        let message = build_message(&self.from, &self.to, report)?;
        let response = self.transport.send(message).await?;

        tracing::info!(
            recipients = self.to.len(),
            code = %response.code(),
            "Report email sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn email_config(recipients: &[&str]) -> EmailConfig {
        EmailConfig {
            username: "bot@acme.test".to_string(),
            password: "secret".to_string(),
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    fn report() -> RenderedReport {
        RenderedReport {
            subject: "📊 Daily Report - 2025-06-23".to_string(),
            html: "<p>hello</p>".to_string(),
            text: "hello".to_string(),
        }
    }

    #[test]
    fn test_build_message_is_multipart_alternative() {
        let (from, to) = parse_addresses(&email_config(&["a@acme.test", " b@acme.test"])).unwrap();

        let message = build_message(&from, &to, &report()).unwrap();

        assert_eq!(message.envelope().to().len(), 2);
        assert_eq!(
            message.envelope().from().map(|a| a.to_string()),
            Some("bot@acme.test".to_string())
        );
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("<p>hello</p>"));
    }

    #[test]
    fn test_invalid_recipient_rejected() {
        let result = parse_addresses(&email_config(&["not an address"]));
        assert!(matches!(result, Err(AppError::Email(_))));
    }

    #[tokio::test]
    async fn test_mailer_builds_without_connecting() {
        assert!(SmtpMailer::new(&email_config(&["a@acme.test"])).is_ok());
    }
}
