//! send-push: deliver one notification to one subscription
//!
//! Reads VAPID keys and the target subscription from the environment (see
//! `PushConfig::from_env`), sends a single message and exits. Any failure
//! is logged and turns into a non-zero exit status.

use gym_push::{PushConfig, PushSender, WebPushClient};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gym_push=info,send_push=info".into()),
        )
        .init();

    let config = PushConfig::from_env().inspect_err(|e| {
        tracing::error!("Invalid push configuration: {e}");
    })?;

    let sender = PushSender::new(WebPushClient::new(&config)?);
    sender.send_once(&config.subscription, &config.payload).await?;
    Ok(())
}
