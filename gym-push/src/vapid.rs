//! VAPID application-server identification (RFC 8292)
//!
//! Each request carries `Authorization: vapid t=<jwt>, k=<public key>` where
//! the JWT is ES256-signed with the application server's P-256 key.

use crate::error::{PushError, PushResult};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::Url;
use ring::rand::SystemRandom;
use ring::signature::{ECDSA_P256_SHA256_FIXED_SIGNING, EcdsaKeyPair, KeyPair};
use serde::{Deserialize, Serialize};

/// Token lifetime; push services reject anything past 24h
pub const TOKEN_TTL_SECS: i64 = 12 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct VapidClaims {
    pub aud: String,
    pub exp: i64,
    pub sub: String,
}

/// Signs VAPID tokens for one application server identity
pub struct VapidSigner {
    key_pair: EcdsaKeyPair,
    subject: String,
    public_key_b64: String,
    rng: SystemRandom,
}

impl std::fmt::Debug for VapidSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VapidSigner")
            .field("subject", &self.subject)
            .field("public_key", &self.public_key_b64)
            .finish_non_exhaustive()
    }
}

fn check_subject(subject: &str) -> PushResult<()> {
    if subject.starts_with("mailto:") || subject.starts_with("https:") {
        Ok(())
    } else {
        Err(PushError::Config(format!(
            "VAPID subject must be a mailto: or https: URI, got {subject:?}"
        )))
    }
}

impl VapidSigner {
    /// Build from the URL-safe base64 key pair the way VAPID keys are usually
    /// distributed: a 65-byte uncompressed public point and a 32-byte scalar.
    pub fn from_base64(
        subject: impl Into<String>,
        public_key: &str,
        private_key: &str,
    ) -> PushResult<Self> {
        let subject = subject.into();
        check_subject(&subject)?;

        let public = decode_key(public_key, "public")?;
        let private = decode_key(private_key, "private")?;
        if public.len() != 65 {
            return Err(PushError::InvalidVapidKey(format!(
                "public key must be 65 bytes, got {}",
                public.len()
            )));
        }
        if private.len() != 32 {
            return Err(PushError::InvalidVapidKey(format!(
                "private key must be 32 bytes, got {}",
                private.len()
            )));
        }

        let rng = SystemRandom::new();
        let key_pair = EcdsaKeyPair::from_private_key_and_public_key(
            &ECDSA_P256_SHA256_FIXED_SIGNING,
            &private,
            &public,
            &rng,
        )
        .map_err(|e| PushError::InvalidVapidKey(format!("key pair rejected: {e}")))?;

        Ok(Self::with_key_pair(subject, key_pair, rng))
    }

    /// Build from a PKCS#8 DER document
    pub fn from_pkcs8(subject: impl Into<String>, pkcs8: &[u8]) -> PushResult<Self> {
        let subject = subject.into();
        check_subject(&subject)?;

        let rng = SystemRandom::new();
        let key_pair = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, pkcs8, &rng)
            .map_err(|e| PushError::InvalidVapidKey(format!("PKCS#8 rejected: {e}")))?;

        Ok(Self::with_key_pair(subject, key_pair, rng))
    }

    fn with_key_pair(subject: String, key_pair: EcdsaKeyPair, rng: SystemRandom) -> Self {
        let public_key_b64 = URL_SAFE_NO_PAD.encode(key_pair.public_key().as_ref());
        Self {
            key_pair,
            subject,
            public_key_b64,
            rng,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Public key as sent in the `k=` parameter
    pub fn public_key(&self) -> &str {
        &self.public_key_b64
    }

    /// Signed JWT for `endpoint`, issued at `now` (unix seconds)
    pub fn sign(&self, endpoint: &str, now: i64) -> PushResult<String> {
        let claims = VapidClaims {
            aud: audience(endpoint)?,
            exp: now + TOKEN_TTL_SECS,
            sub: self.subject.clone(),
        };

        let header = URL_SAFE_NO_PAD.encode(br#"{"typ":"JWT","alg":"ES256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signing_input = format!("{header}.{payload}");

        let signature = self
            .key_pair
            .sign(&self.rng, signing_input.as_bytes())
            .map_err(|_| PushError::Encryption("ES256 signing failed"))?;

        Ok(format!(
            "{signing_input}.{}",
            URL_SAFE_NO_PAD.encode(signature.as_ref())
        ))
    }

    /// `Authorization` header value for `endpoint`
    pub fn authorization(&self, endpoint: &str, now: i64) -> PushResult<String> {
        let token = self.sign(endpoint, now)?;
        Ok(format!("vapid t={token}, k={}", self.public_key_b64))
    }
}

fn decode_key(value: &str, which: &str) -> PushResult<Vec<u8>> {
    // Keys are sometimes pasted with padding
    URL_SAFE_NO_PAD
        .decode(value.trim().trim_end_matches('='))
        .map_err(|e| PushError::InvalidVapidKey(format!("{which} key is not base64url: {e}")))
}

/// Origin of the push endpoint (scheme, host, port)
pub fn audience(endpoint: &str) -> PushResult<String> {
    let url = Url::parse(endpoint)
        .map_err(|e| PushError::InvalidSubscription(format!("endpoint is not a URL: {e}")))?;
    if !matches!(url.scheme(), "https" | "http") {
        return Err(PushError::InvalidSubscription(format!(
            "unsupported endpoint scheme: {}",
            url.scheme()
        )));
    }
    Ok(url.origin().ascii_serialization())
}
