//! Web Push message encryption (`aes128gcm`, RFC 8291 over RFC 8188)
//!
//! Output layout: `salt(16) || rs(u32 BE) || idlen(1) || keyid(65) || record`
//! where `keyid` is our ephemeral P-256 public key and `record` is a single
//! AES-128-GCM record holding `plaintext || 0x02`.

use crate::error::{PushError, PushResult};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes128Gcm, KeyInit, Nonce};
use ring::agreement::{self, ECDH_P256, EphemeralPrivateKey, UnparsedPublicKey};
use ring::hkdf;
use ring::rand::SystemRandom;
use zeroize::Zeroizing;

pub const RECORD_SIZE: u32 = 4096;
pub const SALT_LEN: usize = 16;
/// Uncompressed P-256 point
pub const PUBLIC_KEY_LEN: usize = 65;
pub const AUTH_SECRET_LEN: usize = 16;
const TAG_LEN: usize = 16;
const HEADER_LEN: usize = SALT_LEN + 4 + 1 + PUBLIC_KEY_LEN;
/// Largest plaintext that fits one record inside a 4096-byte push body
pub const MAX_PLAINTEXT: usize = RECORD_SIZE as usize - HEADER_LEN - TAG_LEN - 1;

const PADDING_DELIMITER: u8 = 0x02;

/// Encrypt `plaintext` for the user agent owning `ua_public` / `auth_secret`
pub fn encrypt(ua_public: &[u8], auth_secret: &[u8], plaintext: &[u8]) -> PushResult<Vec<u8>> {
    let rng = SystemRandom::new();
    let as_private = EphemeralPrivateKey::generate(&ECDH_P256, &rng)
        .map_err(|_| PushError::Encryption("ephemeral key generation failed"))?;

    let mut salt = [0u8; SALT_LEN];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut salt);

    encrypt_with(as_private, salt, ua_public, auth_secret, plaintext)
}

fn encrypt_with(
    as_private: EphemeralPrivateKey,
    salt: [u8; SALT_LEN],
    ua_public: &[u8],
    auth_secret: &[u8],
    plaintext: &[u8],
) -> PushResult<Vec<u8>> {
    if ua_public.len() != PUBLIC_KEY_LEN {
        return Err(PushError::InvalidSubscription(format!(
            "p256dh must be {PUBLIC_KEY_LEN} bytes, got {}",
            ua_public.len()
        )));
    }
    if auth_secret.len() != AUTH_SECRET_LEN {
        return Err(PushError::InvalidSubscription(format!(
            "auth must be {AUTH_SECRET_LEN} bytes, got {}",
            auth_secret.len()
        )));
    }
    if plaintext.len() > MAX_PLAINTEXT {
        return Err(PushError::PayloadTooLarge {
            size: plaintext.len(),
            max: MAX_PLAINTEXT,
        });
    }

    let as_public = as_private
        .compute_public_key()
        .map_err(|_| PushError::Encryption("public key derivation failed"))?;
    let as_public = as_public.as_ref();

    let ecdh_secret = agreement::agree_ephemeral(
        as_private,
        &UnparsedPublicKey::new(&ECDH_P256, ua_public),
        |shared| Zeroizing::new(shared.to_vec()),
    )
    .map_err(|_| PushError::InvalidSubscription("p256dh is not a valid P-256 point".into()))?;

    let (cek, nonce) = derive_cek_and_nonce(&ecdh_secret, auth_secret, ua_public, as_public, &salt)?;

    let mut record = Zeroizing::new(Vec::with_capacity(plaintext.len() + 1));
    record.extend_from_slice(plaintext);
    record.push(PADDING_DELIMITER);

    let cipher =
        Aes128Gcm::new_from_slice(&cek[..]).map_err(|_| PushError::Encryption("invalid CEK"))?;
    let ciphertext = cipher
        .encrypt(&Nonce::from(nonce), record.as_slice())
        .map_err(|_| PushError::Encryption("AES-GCM encryption failed"))?;

    let mut body = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    body.extend_from_slice(&salt);
    body.extend_from_slice(&RECORD_SIZE.to_be_bytes());
    body.push(PUBLIC_KEY_LEN as u8);
    body.extend_from_slice(as_public);
    body.extend_from_slice(&ciphertext);
    Ok(body)
}

/// Key schedule shared by both ends (RFC 8291 section 3.4)
fn derive_cek_and_nonce(
    ecdh_secret: &[u8],
    auth_secret: &[u8],
    ua_public: &[u8],
    as_public: &[u8],
    salt: &[u8],
) -> PushResult<(Zeroizing<[u8; 16]>, [u8; 12])> {
    let mut key_info = Vec::with_capacity(14 + 2 * PUBLIC_KEY_LEN);
    key_info.extend_from_slice(b"WebPush: info\0");
    key_info.extend_from_slice(ua_public);
    key_info.extend_from_slice(as_public);

    let ikm = hkdf_sha256::<32>(auth_secret, ecdh_secret, &key_info)?;
    let prk = hkdf::Salt::new(hkdf::HKDF_SHA256, salt).extract(&ikm[..]);
    let cek = expand::<16>(&prk, b"Content-Encoding: aes128gcm\0")?;
    let nonce = expand::<12>(&prk, b"Content-Encoding: nonce\0")?;
    Ok((cek, *nonce))
}

/// Output length for [`hkdf::Prk::expand`]
struct OkmLen(usize);

impl hkdf::KeyType for OkmLen {
    fn len(&self) -> usize {
        self.0
    }
}

fn expand<const N: usize>(prk: &hkdf::Prk, info: &[u8]) -> PushResult<Zeroizing<[u8; N]>> {
    let mut out = Zeroizing::new([0u8; N]);
    prk.expand(&[info], OkmLen(N))
        .and_then(|okm| okm.fill(&mut out[..]))
        .map_err(|_| PushError::Encryption("HKDF output too long"))?;
    Ok(out)
}

/// HKDF-SHA256 (RFC 5869) with an `N`-byte output
fn hkdf_sha256<const N: usize>(
    salt: &[u8],
    ikm: &[u8],
    info: &[u8],
) -> PushResult<Zeroizing<[u8; N]>> {
    expand(&hkdf::Salt::new(hkdf::HKDF_SHA256, salt).extract(ikm), info)
}

/// User-agent side of the exchange, used to check what we send
#[cfg(test)]
pub(crate) fn decrypt(
    ua_private: EphemeralPrivateKey,
    ua_public: &[u8],
    auth_secret: &[u8],
    body: &[u8],
) -> PushResult<Vec<u8>> {
    if body.len() < HEADER_LEN + TAG_LEN {
        return Err(PushError::Encryption("body shorter than header"));
    }
    let salt = &body[..SALT_LEN];
    let rs = u32::from_be_bytes([body[16], body[17], body[18], body[19]]);
    assert_eq!(rs, RECORD_SIZE);
    let idlen = body[20] as usize;
    let as_public = &body[21..21 + idlen];
    let ciphertext = &body[21 + idlen..];

    let ecdh_secret = agreement::agree_ephemeral(
        ua_private,
        &UnparsedPublicKey::new(&ECDH_P256, as_public),
        |shared| shared.to_vec(),
    )
    .map_err(|_| PushError::Encryption("ECDH failed"))?;

    let (cek, nonce) = derive_cek_and_nonce(&ecdh_secret, auth_secret, ua_public, as_public, salt)?;
    let cipher =
        Aes128Gcm::new_from_slice(&cek[..]).map_err(|_| PushError::Encryption("invalid CEK"))?;
    let mut plaintext = cipher
        .decrypt(&Nonce::from(nonce), ciphertext)
        .map_err(|_| PushError::Encryption("AES-GCM decryption failed"))?;

    while plaintext.last() == Some(&0) {
        plaintext.pop();
    }
    if plaintext.pop() != Some(PADDING_DELIMITER) {
        return Err(PushError::Encryption("missing last-record delimiter"));
    }
    Ok(plaintext)
}
