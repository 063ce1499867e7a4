use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Failed to hash credential: {0}")]
    Hashing(String),
}

/// Argon2id hash of a secret in PHC string form. The secret itself is never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    phc: String,
}

impl Credential {
    pub fn new(secret: &str) -> Result<Self, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|err| CredentialError::Hashing(err.to_string()))?
            .to_string();
        Ok(Self { phc })
    }

    /// An unparsable stored hash never verifies.
    pub fn verify(&self, candidate: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.phc) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_matches_only_the_hashed_secret() {
        let cred = Credential::new("pw1").unwrap();
        assert!(cred.verify("pw1"));
        assert!(!cred.verify("pw2"));
        assert!(!cred.verify(""));
    }

    #[test]
    fn same_secret_gets_different_salts() {
        let a = Credential::new("secret").unwrap();
        let b = Credential::new("secret").unwrap();
        assert_ne!(a.phc, b.phc);
        assert!(a.verify("secret") && b.verify("secret"));
    }

    #[test]
    fn stored_form_is_argon2_phc() {
        let cred = Credential::new("hunter2").unwrap();
        assert!(cred.phc.starts_with("$argon2id$"));
        let json = serde_json::to_string(&cred).unwrap();
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn corrupted_hash_never_verifies() {
        let mut cred = Credential::new("pw").unwrap();
        cred.phc = "not a phc string".to_string();
        assert!(!cred.verify("pw"));
    }
}
