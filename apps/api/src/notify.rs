//! Best-effort e-mail notification for new submissions.
//!
//! Carried in `AppState` as `Arc<dyn Notifier>`. Handlers hand the message to
//! `spawn_notification`, which sends it on its own task and only logs
//! failures; a submission is never failed by its notification.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use crate::config::SmtpConfig;

/// Content of one "new submission" mail.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionNotice {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub quiz_title: String,
    pub created_at: String,
    pub admin_url: Option<String>,
}

impl SubmissionNotice {
    pub fn subject(&self) -> String {
        format!("Novo quiz: {}", self.name)
    }

    pub fn body(&self) -> String {
        let mut lines = vec![
            "Nova resposta recebida".to_string(),
            String::new(),
            format!("Nome: {}", self.name),
        ];
        if let Some(email) = &self.email {
            lines.push(format!("Email: {email}"));
        }
        if let Some(phone) = &self.phone {
            lines.push(format!("Telefone: {phone}"));
        }
        lines.push(format!("Quiz: {}", self.quiz_title));
        lines.push(format!("Data: {}", self.created_at));
        if let Some(url) = &self.admin_url {
            lines.push(String::new());
            lines.push(format!("Admin: {url}"));
        }
        lines.join("\n")
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: &SubmissionNotice) -> Result<()>;
}

/// Used when SMTP is not configured.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, _notice: &SubmissionNotice) -> Result<()> {
        Ok(())
    }
}

pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    to: String,
}

impl SmtpNotifier {
    /// Implicit TLS on port 465, STARTTLS otherwise.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let builder = if config.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .with_context(|| format!("invalid SMTP host '{}'", config.host))?;

        let mailer = builder
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .build();

        Ok(SmtpNotifier {
            mailer,
            from: config.from.clone(),
            to: config.to.clone(),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, notice: &SubmissionNotice) -> Result<()> {
        let message = Message::builder()
            .from(self.from.parse::<Mailbox>().context("invalid NOTIFY_EMAIL_FROM")?)
            .to(self.to.parse::<Mailbox>().context("invalid NOTIFY_EMAIL_TO")?)
            .subject(notice.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(notice.body())
            .context("failed to build notification e-mail")?;

        self.mailer
            .send(message)
            .await
            .context("SMTP delivery failed")?;
        Ok(())
    }
}

/// Sends `notice` in the background. Errors are logged, never returned.
pub fn spawn_notification(notifier: Arc<dyn Notifier>, notice: SubmissionNotice) {
    tokio::spawn(async move {
        match notifier.notify(&notice).await {
            Ok(()) => info!(name = %notice.name, "Submission notification sent"),
            Err(e) => warn!("Submission notification failed: {e:#}"),
        }
    });
}


#[cfg(test)]
mod tests {
    use super::*;

    fn notice() -> SubmissionNotice {
        SubmissionNotice {
            name: "Ana".to_string(),
            email: Some("ana@example.com".to_string()),
            phone: None,
            quiz_title: "Teste de Ansiedade".to_string(),
            created_at: "18/10/2026 10:00".to_string(),
            admin_url: Some("https://example.com/admin".to_string()),
        }
    }

    #[test]
    fn test_body_lists_only_present_contacts() {
        let body = notice().body();
        assert!(body.contains("Email: ana@example.com"));
        assert!(!body.contains("Telefone"));
        assert!(body.ends_with("Admin: https://example.com/admin"));
    }

    #[test]
    fn test_subject_names_respondent() {
        assert_eq!(notice().subject(), "Novo quiz: Ana");
    }

    #[tokio::test]
    async fn test_spawned_failure_is_swallowed() {
        let notifier = Arc::new(testing::RecordingNotifier {
            fail: true,
            ..Default::default()
        });
        spawn_notification(notifier.clone(), notice());
        for _ in 0..50 {
            if !notifier.sent.lock().await.is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(notifier.sent.lock().await.len(), 1);
    }
}
