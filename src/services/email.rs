//! SMTP alert channel via `lettre`.

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::{
    config::SmtpConfig,
    services::notify::{AlertChannel, NotifyError},
};

pub const SUBJECT: &str = "Ferry Spots Found!";

#[derive(Debug, Clone)]
pub struct EmailChannel {
    config: SmtpConfig,
}

impl EmailChannel {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    pub fn render_body(message: &str) -> String {
        format!(
            "Ferry Scanner found available spots:\n\n{message}\n\nGo book now at https://praamid.ee"
        )
    }

    fn build_message(&self, to: &str, message: &str) -> Result<Message, NotifyError> {
        let from: Mailbox = self
            .config
            .from
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(|err: lettre::address::AddressError| {
                NotifyError::Config(format!("invalid SMTP_FROM: {err}"))
            })?;
        let to: Mailbox = to
            .parse()
            .map_err(|err: lettre::address::AddressError| NotifyError::Address(err.to_string()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(Self::render_body(message))
            .map_err(|err| NotifyError::Smtp(err.to_string()))
    }

    fn transport(&self, host: &str, port: u16) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|err| NotifyError::Smtp(err.to_string()))?
            .port(port);

        if let Some(username) = self.config.username.clone() {
            let password = self.config.password.clone().unwrap_or_default();
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(builder.build())
    }
}

#[async_trait::async_trait]
impl AlertChannel for EmailChannel {
    async fn send_alert(&self, destination: &str, message: &str) -> Result<(), NotifyError> {
        let (Some(host), Some(port)) = (self.config.host.as_deref(), self.config.port) else {
            return Err(NotifyError::Config("SMTP configuration missing".into()));
        };

        let email = self.build_message(destination, message)?;
        self.transport(host, port)?
            .send(email)
            .await
            .map_err(|err| NotifyError::Smtp(err.to_string()))?;

        info!(channel = "email", "alert email sent");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "email"
    }
}
