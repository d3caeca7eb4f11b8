use std::sync::Arc;

use ferry_scanner::config::AppConfig;
use ferry_scanner::error::AppError;
use ferry_scanner::routes::create_router;
use ferry_scanner::services::{
    email::EmailChannel, ferry::FerryClient, notify::AlertDispatcher, telegram::TelegramChannel,
};
use ferry_scanner::state::AppState;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;

    let ferry = FerryClient::new(config.ferry_api_url.clone())?;

    if config.smtp.host.is_none() || config.smtp.port.is_none() {
        warn!("SMTP_HOST/SMTP_PORT not set, email alerts will fail");
    }
    if config.telegram.bot_token.is_none() {
        warn!("TELEGRAM_BOT_TOKEN not set, telegram alerts will fail");
    }
    let email = EmailChannel::new(config.smtp.clone());
    let telegram = TelegramChannel::new(config.telegram.clone())?;
    let alerts = AlertDispatcher::new(Arc::new(email), Arc::new(telegram));

    let state = AppState::new(config.clone(), ferry, alerts);

    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,ferry_scanner=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
