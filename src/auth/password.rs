use anyhow::Context;
use tracing::error;

/// Hashes `plain` with bcrypt at `cost`. Each call draws a fresh salt, which
/// is embedded in the returned string.
///
/// bcrypt is CPU-bound, so the work runs on the blocking pool.
pub async fn hash_password(plain: &str, cost: u32) -> anyhow::Result<String> {
    let plain = plain.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
        .await
        .context("hash_password task join")?
        .map_err(|e| {
            error!(error = %e, "bcrypt hash error");
            anyhow::anyhow!(e)
        })
}

/// Checks `plain` against a stored bcrypt `hash`. Returns `Ok(false)` on a
/// mismatch and an error only when `hash` cannot be parsed.
pub async fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let plain = plain.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
        .await
        .context("verify_password task join")?
        .map_err(|e| {
            error!(error = %e, "bcrypt parse hash error");
            anyhow::anyhow!(e)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BCRYPT_COST;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password, TEST_COST).await.expect("hashing should succeed");
        assert_ne!(hash, password);
        assert!(verify_password(password, &hash).await.expect("verify should succeed"));
    }

    #[tokio::test]
    async fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password, TEST_COST).await.expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash)
            .await
            .expect("verify should not error"));
        assert!(!verify_password("Correct-horse-battery-staple", &hash)
            .await
            .expect("verify should not error"));
    }

    #[tokio::test]
    async fn each_hash_uses_a_fresh_salt() {
        let a = hash_password("pswd1234", TEST_COST).await.unwrap();
        let b = hash_password("pswd1234", TEST_COST).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn production_cost_is_encoded_in_hash() {
        let hash = hash_password("pswd1234", BCRYPT_COST).await.unwrap();
        assert!(hash.starts_with("$2b$10$"), "unexpected hash prefix: {hash}");
    }

    #[tokio::test]
    async fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").await.unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
