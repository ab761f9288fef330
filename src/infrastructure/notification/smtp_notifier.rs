use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::application::ports::{Notifier, NotifierError};
use crate::domain::{MediaKind, UsageRecord};

use super::email_template::render;

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub from_address: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Emails each result to the address it was requested for, over a STARTTLS relay.
#[derive(Debug)]
pub struct SmtpNotifier {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Result<Self, NotifierError> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| NotifierError::InvalidAddress(format!("{}: {e}", config.from_address)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotifierError::Transport(e.to_string()))?
            .port(config.port);

        if let (Some(user), Some(pass)) = (config.username, config.password) {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            from,
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    #[tracing::instrument(skip(self, record), fields(model = %record.model, kind = kind.as_str()))]
    async fn send(&self, record: &UsageRecord, kind: MediaKind) -> Result<(), NotifierError> {
        let to: Mailbox = record
            .email
            .parse()
            .map_err(|e| NotifierError::InvalidAddress(format!("recipient: {e}")))?;

        let rendered = render(record, kind);
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(rendered.subject)
            .header(ContentType::TEXT_HTML)
            .body(rendered.html_body)
            .map_err(|e| NotifierError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifierError::Transport(e.to_string()))?;

        tracing::info!("Result email sent");
        Ok(())
    }
}
