/**
 * Password Hashing
 *
 * bcrypt hash and verify, run on tokio's blocking pool.
 */

use crate::backend::error::BackendError;

/// Hash a plaintext password with bcrypt at `cost`
pub async fn hash_password(password: &str, cost: u32) -> Result<String, BackendError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("password hash task failed: {e}")))?
        .map_err(BackendError::from)
}

/// Compare a plaintext password against a stored bcrypt hash
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, BackendError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::internal(format!("password verify task failed: {e}")))?
        .map_err(BackendError::from)
}
