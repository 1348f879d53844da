use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Version,
};

use crate::config::PasswordCost;
use crate::error::AppError;

/// An Argon2id password hash in PHC string form.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash `plain_text` with a fresh random salt.
    pub fn hash(plain_text: &str, cost: PasswordCost) -> Result<Self, AppError> {
        let params = cost
            .params()
            .map_err(|e| AppError::Internal(format!("Invalid password hash parameters: {e}")))?;
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hash failed: {e}")))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Parameters are read back from the stored hash, so hashes made under an
    /// older cost setting still verify.
    pub fn verify(&self, plain_text: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            tracing::warn!("Stored password hash is not a valid PHC string");
            return false;
        };
        Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }
}
