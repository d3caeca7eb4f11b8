use std::{env, net::SocketAddr, path::PathBuf};

use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub ferry_api_url: String,
    pub smtp: SmtpConfig,
    pub telegram: TelegramConfig,
}

/// SMTP settings for the email channel. Every field is optional here; the
/// channel itself refuses to send without a host and port.
#[derive(Debug, Clone, Default)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
        }
    }
}

pub const DEFAULT_FERRY_API_URL: &str = "https://www.praamid.ee";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let port: u16 = optional_var("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid PORT: {err}")))?;
        let listen_addr = SocketAddr::from(([0, 0, 0, 0], port));

        let static_dir = optional_var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static"));

        let ferry_api_url = base_url("FERRY_API_URL", DEFAULT_FERRY_API_URL)?;

        let smtp_port = optional_var("SMTP_PORT")
            .map(|raw| {
                raw.parse::<u16>()
                    .map_err(|err| AppError::Config(format!("invalid SMTP_PORT: {err}")))
            })
            .transpose()?;

        let smtp = SmtpConfig {
            host: optional_var("SMTP_HOST"),
            port: smtp_port,
            username: optional_var("SMTP_USER"),
            password: optional_var("SMTP_PASS"),
            from: optional_var("SMTP_FROM"),
        };

        let telegram = TelegramConfig {
            bot_token: optional_var("TELEGRAM_BOT_TOKEN"),
            api_url: base_url("TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL)?,
        };

        Ok(Self {
            listen_addr,
            static_dir,
            ferry_api_url,
            smtp,
            telegram,
        })
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn base_url(key: &str, fallback: &str) -> Result<String, AppError> {
    let raw = optional_var(key).unwrap_or_else(|| fallback.to_string());
    Url::parse(&raw).map_err(|err| AppError::Config(format!("invalid {key}: {err}")))?;
    Ok(raw.trim_end_matches('/').to_string())
}
