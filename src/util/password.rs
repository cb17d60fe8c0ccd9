use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use error_stack::{Result, ResultExt};
use once_cell::sync::Lazy;
use rand_core::OsRng;
use thiserror::Error;

static CONTEXT: Lazy<Argon2<'static>> =
    Lazy::new(|| Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT));

#[derive(Debug, Error)]
#[error("Failed to generate password hash")]
pub struct HashPasswordError;

/// Hashes a player's password into a PHC string.
///
/// This is CPU heavy, call it from a blocking thread.
pub fn hash(password: impl AsRef<[u8]>) -> Result<String, HashPasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = CONTEXT
        .hash_password(password.as_ref(), &salt)
        .change_context(HashPasswordError)?;

    Ok(password_hash.to_string())
}

#[derive(Debug, Error)]
#[error("Failed to verify password")]
pub struct VerifyPasswordError;

pub fn verify(password: &[u8], hash: &str) -> Result<bool, VerifyPasswordError> {
    let hash = PasswordHash::new(hash)
        .change_context(VerifyPasswordError)
        .attach_printable("could not parse password hash")?;

    match CONTEXT.verify_password(password, &hash) {
        Ok(..) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(error) => Err(error).change_context(VerifyPasswordError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash("pw").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify(b"pw", &hash).unwrap());
        assert!(!verify(b"wp", &hash).unwrap());
    }

    #[test]
    fn rejects_malformed_hash() {
        assert!(verify(b"pw", "not a hash").is_err());
    }
}
