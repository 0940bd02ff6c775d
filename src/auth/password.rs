use anyhow::Context;
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

lazy_static! {
    /// Stand-in digest verified when the email is unknown, so both signin
    /// failures pay for one Argon2 run.
    static ref DUMMY_HASH: Option<String> = hash_password("bookmarkd-no-such-user").ok();
}

/// Argon2id (v19, default params) with a fresh random salt, PHC-encoded.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            anyhow::anyhow!("argon2: {e}")
        })
}

/// `Ok(false)` on mismatch. A stored digest that does not parse, or that
/// names parameters Argon2 rejects, is an error rather than a mismatch.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password hash is unreadable");
        anyhow::anyhow!("argon2: {e}")
    })?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            error!(error = %e, "password verification failed");
            Err(anyhow::anyhow!("argon2: {e}"))
        }
    }
}

// Hashing and verification must not run on executor threads.

pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("hash task panicked")?
}

pub async fn verify_password_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .context("verify task panicked")?
}

/// Runs one verification against [`DUMMY_HASH`] and discards the outcome.
pub async fn verify_dummy_blocking(plain: String) {
    if let Some(hash) = DUMMY_HASH.clone() {
        let _ = verify_password_blocking(plain, hash).await;
    }
}
