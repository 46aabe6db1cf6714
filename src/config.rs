use serde::Deserialize;

use crate::error::{AppError, Result};

/// Conventional variables set by the CI job that runs the digest. They take
/// precedence over the config file and `REVIEW_DIGEST__*` overrides.
const LEGACY_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("ORG_NAME", "github.org"),
    ("GH_TOKEN", "github.token"),
    ("GMAIL_USER", "email.username"),
    ("GMAIL_PASS", "email.password"),
];

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub github: GitHubConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Deserialize, Clone)]
pub struct GitHubConfig {
    pub org: String,
    pub token: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_bot_login")]
    pub bot_login: String,
    #[serde(default = "default_repo_page_size")]
    pub repo_page_size: u32,
    #[serde(default = "default_pull_page_size")]
    pub pull_page_size: u32,
}

// Manual Debug impl to avoid leaking the API token
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("org", &self.org)
            .field("token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("bot_login", &self.bot_login)
            .field("repo_page_size", &self.repo_page_size)
            .field("pull_page_size", &self.pull_page_size)
            .finish()
    }
}

#[derive(Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Sender address. Falls back to `username`.
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub recipients: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: None,
            recipients: Vec::new(),
        }
    }
}

// Manual Debug impl to avoid leaking the SMTP password
impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from", &self.from)
            .field("recipients", &self.recipients)
            .finish()
    }
}

impl EmailConfig {
    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Name used for the bot in headings and the subject line.
    #[serde(default = "default_bot_display_name")]
    pub bot_display_name: String,
    /// Label used for the organization in the header and subject line.
    /// Falls back to the organization name.
    #[serde(default)]
    pub org_label: Option<String>,
    #[serde(default = "default_footer")]
    pub footer: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            bot_display_name: default_bot_display_name(),
            org_label: None,
            footer: default_footer(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_bot_login() -> String {
    "copilot-pull-request-reviewer[bot]".to_string()
}

fn default_repo_page_size() -> u32 {
    100
}

fn default_pull_page_size() -> u32 {
    20
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_bot_display_name() -> String {
    "Copilot".to_string()
}

fn default_footer() -> String {
    "Generated automatically by GitHub Actions".to_string()
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("review-digest").required(false));
        }

        // Environment variable overrides with REVIEW_DIGEST__ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("REVIEW_DIGEST")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("email.recipients"),
        );

        for (var, key) in LEGACY_ENV_OVERRIDES {
            let value = std::env::var(var).ok().filter(|v| !v.is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from TOML text without consulting the
    /// environment.
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings every run needs.
    pub fn validate(&self) -> Result<()> {
        if self.github.org.trim().is_empty() {
            return Err(AppError::Config("github.org must not be empty".to_string()));
        }
        if self.github.token.trim().is_empty() {
            return Err(AppError::Config(
                "github.token must not be empty (set GH_TOKEN)".to_string(),
            ));
        }
        if self.github.repo_page_size == 0 || self.github.pull_page_size == 0 {
            return Err(AppError::Config(
                "github page sizes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Check the settings needed to actually send the report.
    pub fn validate_delivery(&self) -> Result<()> {
        if self.email.username.is_empty() || self.email.password.is_empty() {
            return Err(AppError::Config(
                "email.username and email.password are required (set GMAIL_USER / GMAIL_PASS)"
                    .to_string(),
            ));
        }
        if self.email.sender().is_empty() {
            return Err(AppError::Config("email.from must not be empty".to_string()));
        }
        if self.email.recipients.is_empty() {
            return Err(AppError::Config(
                "email.recipients must list at least one address".to_string(),
            ));
        }
        Ok(())
    }

    pub fn org(&self) -> &str {
        &self.github.org
    }

    pub fn org_label(&self) -> &str {
        self.report.org_label.as_deref().unwrap_or(&self.github.org)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
        [github]
        org = "acme"
        token = "ghp_test"
    "#;

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert_eq!(config.github.bot_login, "copilot-pull-request-reviewer[bot]");
        assert_eq!(config.github.repo_page_size, 100);
        assert_eq!(config.github.pull_page_size, 20);
        assert_eq!(config.email.smtp_host, "smtp.gmail.com");
        assert_eq!(config.email.smtp_port, 465);
        assert_eq!(config.report.bot_display_name, "Copilot");
        assert_eq!(config.org_label(), "acme");
    }

    #[test]
    fn test_missing_token_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [github]
            org = "acme"
            token = ""
        "#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("github.token"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [github]
            org = "acme"
            token = "t"
            pull_page_size = 0
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_delivery_requires_recipients() {
        let config = AppConfig::from_toml(
            r#"
            [github]
            org = "acme"
            token = "t"

            [email]
            username = "bot@acme.test"
            password = "secret"
        "#,
        )
        .unwrap();
        let err = config.validate_delivery().unwrap_err().to_string();
        assert!(err.contains("recipients"));
    }

    #[test]
    fn test_sender_falls_back_to_username() {
        let mut config = AppConfig::from_toml(MINIMAL).unwrap();
        config.email.username = "bot@acme.test".to_string();
        assert_eq!(config.email.sender(), "bot@acme.test");

        config.email.from = Some("reports@acme.test".to_string());
        assert_eq!(config.email.sender(), "reports@acme.test");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = AppConfig::from_toml(MINIMAL).unwrap();
        config.email.password = "hunter2".to_string();
        let debug = format!("{config:?}");
        assert!(!debug.contains("ghp_test"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        write!(
            file,
            r#"
            [github]
            org = "acme"
            token = "t"
            bot_login = "reviewer[bot]"
            pull_page_size = 5

            [email]
            recipients = ["a@acme.test", "b@acme.test"]

            [report]
            org_label = "Acme"
        "#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.github.bot_login, "reviewer[bot]");
        assert_eq!(config.github.pull_page_size, 5);
        assert_eq!(config.email.recipients.len(), 2);
        assert_eq!(config.org_label(), "Acme");
    }
}
