use anyhow::{Context, Result};
use tracing::warn;

/// Application configuration loaded from environment variables.
/// Errors at startup only when a present variable is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset means submissions and admin reads fail with `PERSISTENCE_UNAVAILABLE`.
    pub database_url: Option<String>,
    /// Unset means every admin request is unauthorized.
    pub admin_password: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// `None` unless every SMTP variable is present.
    pub smtp: Option<SmtpConfig>,
    pub admin_dashboard_url: Option<String>,
    /// Business WhatsApp number offered to free-text respondents.
    pub whatsapp_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
    pub to: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            admin_password: optional_env("ADMIN_PASSWORD"),
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            smtp: SmtpConfig::from_vars(optional_env)?,
            admin_dashboard_url: optional_env("ADMIN_DASHBOARD_URL"),
            whatsapp_number: optional_env("WHATSAPP_NUMBER")
                .map(|n| n.chars().filter(char::is_ascii_digit).collect()),
        })
    }
}

impl SmtpConfig {
    /// All-or-nothing: a partial block logs a warning and yields `None`.
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Option<Self>> {
        let port = match var("SMTP_PORT") {
            Some(raw) => Some(
                raw.parse::<u16>()
                    .context("SMTP_PORT must be a valid port number")?,
            ),
            None => None,
        };
        let host = var("SMTP_HOST");
        let user = var("SMTP_USER");
        let pass = var("SMTP_PASS");
        let to = var("NOTIFY_EMAIL_TO");
        let from = var("NOTIFY_EMAIL_FROM").or_else(|| user.clone());

        match (host, port, user, pass, from, to) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from), Some(to)) => {
                Ok(Some(SmtpConfig {
                    host,
                    port,
                    user,
                    pass,
                    from,
                    to,
                }))
            }
            (None, None, None, None, None, None) => Ok(None),
            _ => {
                warn!("SMTP configuration is incomplete; submission e-mails are disabled");
                Ok(None)
            }
        }
    }
}

/// Reads `key`, treating an empty value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
