//! Telegram Bot API alert channel.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    config::TelegramConfig,
    services::notify::{AlertChannel, NotifyError},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const BANNER: &str = "🚢 Ferry Scanner Alert!";

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: String,
}

#[derive(Debug, Clone)]
pub struct TelegramChannel {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(config: TelegramConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { config, client })
    }

    pub fn render_text(message: &str) -> String {
        format!("{BANNER}\n\n{message}")
    }
}

#[async_trait::async_trait]
impl AlertChannel for TelegramChannel {
    async fn send_alert(&self, destination: &str, message: &str) -> Result<(), NotifyError> {
        let Some(token) = self.config.bot_token.as_deref() else {
            return Err(NotifyError::Config("bot token not configured".into()));
        };

        let url = format!("{}/bot{token}/sendMessage", self.config.api_url);
        let body = SendMessageBody {
            chat_id: destination,
            text: Self::render_text(message),
        };

        debug!(chat_id = %destination, "sending telegram alert");
        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        info!(chat_id = %destination, "telegram alert sent");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "telegram"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::Path, http::StatusCode, routing::post, Json, Router};
    use serde_json::Value;

    use super::*;
    use crate::test_support::serve;

    type Captured = Arc<Mutex<Vec<(String, Value)>>>;

    async fn fake_bot_api(status: StatusCode) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let sink = captured.clone();
        let router = Router::new().route(
            "/:bot/sendMessage",
            post(move |Path(bot): Path<String>, Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push((bot, body));
                    (status, r#"{"ok": true}"#)
                }
            }),
        );
        (serve(router).await, captured)
    }

    fn channel(api_url: String, bot_token: Option<&str>) -> TelegramChannel {
        TelegramChannel::new(TelegramConfig {
            bot_token: bot_token.map(str::to_string),
            api_url,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn posts_banner_and_chat_id() {
        let (api_url, captured) = fake_bot_api(StatusCode::OK).await;
        let channel = channel(api_url, Some("123:ABC"));

        channel.send_alert("-100123", "2 spots at 09:10").await.unwrap();

        let captured = captured.lock().unwrap().clone();
        assert_eq!(captured.len(), 1);
        let (bot, body) = &captured[0];
        assert_eq!(bot, "bot123:ABC");
        assert_eq!(body["chat_id"], "-100123");
        assert_eq!(
            body["text"],
            "🚢 Ferry Scanner Alert!\n\n2 spots at 09:10"
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (api_url, _) = fake_bot_api(StatusCode::FORBIDDEN).await;
        let channel = channel(api_url, Some("123:ABC"));

        let err = channel.send_alert("42", "hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::Status(403)), "got: {err}");
    }

    #[tokio::test]
    async fn unreachable_api_is_an_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let channel = channel(format!("http://{addr}"), Some("123:ABC"));

        let err = channel.send_alert("42", "hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::Http(_)), "got: {err}");
    }

    #[tokio::test]
    async fn missing_token_is_a_config_error() {
        let (api_url, captured) = fake_bot_api(StatusCode::OK).await;
        let channel = channel(api_url, None);

        let err = channel.send_alert("42", "hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::Config(_)), "got: {err}");
        assert!(captured.lock().unwrap().is_empty());
    }
}
