//! Alert channels and fire-and-forget dispatch.
//!
//! Each destination on an alert request gets its own spawned task. The
//! caller never waits on delivery; outcomes only show up in the logs.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::models::alert::AlertRequest;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// The channel is missing settings it needs to send anything.
    #[error("configuration error: {0}")]
    Config(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chat api returned status: {0}")]
    Status(u16),
    #[error("SMTP delivery failed: {0}")]
    Smtp(String),
    #[error("invalid address: {0}")]
    Address(String),
}

/// A notification delivery mechanism.
#[async_trait::async_trait]
pub trait AlertChannel: Send + Sync {
    async fn send_alert(&self, destination: &str, message: &str) -> Result<(), NotifyError>;

    fn channel_name(&self) -> &str;
}

#[derive(Clone)]
pub struct AlertDispatcher {
    email: Arc<dyn AlertChannel>,
    chat: Arc<dyn AlertChannel>,
}

impl AlertDispatcher {
    pub fn new(email: Arc<dyn AlertChannel>, chat: Arc<dyn AlertChannel>) -> Self {
        Self { email, chat }
    }

    /// Spawns one send per destination present on `alert` and returns
    /// immediately. A request without destinations spawns nothing.
    pub fn dispatch(&self, alert: &AlertRequest) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::with_capacity(2);

        if let Some(address) = alert.email_destination() {
            handles.push(spawn_send(
                self.email.clone(),
                address.to_string(),
                alert.message.clone(),
            ));
        }

        if let Some(chat_id) = alert.chat_destination() {
            handles.push(spawn_send(
                self.chat.clone(),
                chat_id.to_string(),
                alert.message.clone(),
            ));
        }

        if handles.is_empty() {
            debug!("alert request carried no destinations");
        }

        handles
    }
}

fn spawn_send(channel: Arc<dyn AlertChannel>, destination: String, message: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        match channel.send_alert(&destination, &message).await {
            Ok(()) => info!(channel = channel.channel_name(), "alert delivered"),
            Err(err) => error!(
                channel = channel.channel_name(),
                error = %err,
                "alert delivery failed"
            ),
        }
    })
}
