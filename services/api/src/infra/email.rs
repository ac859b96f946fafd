use anyhow::Context as _;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::ApiError;

/// SMTP settings. `from_env` yields `None` when `SMTP_HOST` is unset, in
/// which case codes are only logged and never mailed (local development).
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl EmailConfig {
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            host,
            username: std::env::var("SMTP_USERNAME").expect("SMTP_USERNAME"),
            password: std::env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD"),
            from: std::env::var("SMTP_FROM").expect("SMTP_FROM"),
        })
    }
}

/// Outbound mail over SMTP with STARTTLS.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    pub fn new(config: &EmailConfig) -> Result<Self, ApiError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .context("build smtp transport")?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        let from = config
            .from
            .parse::<Mailbox>()
            .context("parse smtp from address")?;
        Ok(Self { transport, from })
    }

    pub async fn send_code(&self, to: &str, subject: &str, code: &str) -> Result<(), ApiError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>().context("parse recipient address")?)
            .subject(subject)
            .body(format!(
                "Your verification code is {code}. It expires in 5 minutes."
            ))
            .context("build email")?;
        self.transport
            .send(message)
            .await
            .context("send email")?;
        Ok(())
    }
}

/// Fire-and-forget code delivery. SMTP being down must not fail the
/// request; the code can be re-requested after it expires.
pub fn deliver_code(mailer: Option<Mailer>, to: String, subject: &'static str, code: String) {
    match mailer {
        Some(mailer) => {
            tokio::spawn(async move {
                if let Err(e) = mailer.send_code(&to, subject, &code).await {
                    tracing::error!(error = %e, %to, "failed to send code email");
                }
            });
        }
        None => {
            tracing::info!(%to, %code, "smtp not configured; code logged only");
        }
    }
}
