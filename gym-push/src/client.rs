//! HTTP delivery to a Web Push service

use crate::config::PushConfig;
use crate::ece;
use crate::error::{PushError, PushResult};
use crate::sender::PushTransport;
use crate::vapid::VapidSigner;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE};
use shared::models::{NotificationPayload, PushSubscription};
use std::time::Duration;

/// Production [`PushTransport`]: encrypts with `aes128gcm`, signs with VAPID
/// and POSTs to the subscription endpoint.
#[derive(Debug)]
pub struct WebPushClient {
    http: Client,
    signer: VapidSigner,
    ttl: u32,
}

impl WebPushClient {
    pub fn new(config: &PushConfig) -> PushResult<Self> {
        let signer = VapidSigner::from_base64(
            config.vapid_subject.clone(),
            &config.vapid_public_key,
            &config.vapid_private_key,
        )?;
        Self::with_signer(signer, config.ttl, config.timeout)
    }

    pub fn with_signer(signer: VapidSigner, ttl: u32, timeout: u64) -> PushResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;
        Ok(Self { http, signer, ttl })
    }

    pub fn signer(&self) -> &VapidSigner {
        &self.signer
    }
}

fn decode_subscription_key(value: &str, which: &str) -> PushResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(value.trim().trim_end_matches('='))
        .map_err(|e| PushError::InvalidSubscription(format!("{which} is not base64url: {e}")))
}

#[async_trait]
impl PushTransport for WebPushClient {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
    ) -> PushResult<()> {
        let ua_public = decode_subscription_key(&subscription.keys.p256dh, "p256dh")?;
        let auth_secret = decode_subscription_key(&subscription.keys.auth, "auth")?;

        let plaintext = payload.to_json()?;
        let body = ece::encrypt(&ua_public, &auth_secret, plaintext.as_bytes())?;
        let authorization = self
            .signer
            .authorization(&subscription.endpoint, chrono::Utc::now().timestamp())?;

        let response = self
            .http
            .post(&subscription.endpoint)
            .header(AUTHORIZATION, authorization)
            .header("TTL", self.ttl.to_string())
            .header(CONTENT_ENCODING, "aes128gcm")
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "Push service accepted message");
            return Ok(());
        }

        let status = status.as_u16();
        if matches!(status, 404 | 410) {
            return Err(PushError::SubscriptionGone { status });
        }
        let body = response.text().await?;
        Err(PushError::Rejected { status, body })
    }
}
