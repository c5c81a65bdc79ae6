// Password hashing and verification service

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::RngCore;
use std::sync::Arc;

use crate::auth::error::AuthError;

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// Argon2 parameters for this cost, rejected if out of range
    pub fn params(&self) -> Result<Params, argon2::Error> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
    }
}

/// Password service for hashing and verification
///
/// Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`) so
/// verification needs nothing but the stored string.
#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: HashCost,
    dummy_hash: Arc<str>,
}

impl PasswordService {
    /// Create a PasswordService with the given cost parameters
    ///
    /// Hashes a throwaway password up front so logins for unknown users can
    /// pay the same verification cost as real ones.
    pub fn new(cost: HashCost) -> Result<Self, AuthError> {
        let dummy_hash = hash_with(cost, "dummy password for unknown logins")?;
        Ok(Self {
            cost,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub fn cost(&self) -> HashCost {
        self.cost
    }

    /// Hash that no user's password is checked against
    pub fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }

    /// Hash a password using Argon2id with a fresh random salt
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        hash_with(self.cost, password)
    }

    /// Verify a password against a stored hash
    ///
    /// The cost parameters are read from the hash itself. A hash that cannot
    /// be parsed never verifies.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

fn hash_with(cost: HashCost, password: &str) -> Result<String, AuthError> {
    let params = cost.params().map_err(|e| {
        tracing::error!("Invalid Argon2 parameters: {}", e);
        AuthError::PasswordHashError
    })?;

    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &generate_salt()?)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("Argon2 hashing failed: {}", e);
            AuthError::PasswordHashError
        })
}

fn generate_salt() -> Result<SaltString, AuthError> {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    SaltString::encode_b64(&bytes).map_err(|_| AuthError::PasswordHashError)
}

#[cfg(test)]
pub(crate) fn test_cost() -> HashCost {
    HashCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_password_service() -> PasswordService {
        PasswordService::new(test_cost()).unwrap()
    }

    #[test]
    fn test_hash_is_self_describing() {
        let service = test_password_service();
        let hash = service.hash_password("s3cret!").unwrap();

        assert!(hash.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        assert_ne!(hash, "s3cret!");
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let service = test_password_service();
        let first = service.hash_password("s3cret!").unwrap();
        let second = service.hash_password("s3cret!").unwrap();

        assert_ne!(first, second);
        assert!(service.verify_password("s3cret!", &first));
        assert!(service.verify_password("s3cret!", &second));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let service = test_password_service();
        let hash = service.hash_password("s3cret!").unwrap();

        assert!(!service.verify_password("wrong", &hash));
        assert!(!service.verify_password("", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let service = test_password_service();
        assert!(!service.verify_password("s3cret!", ""));
        assert!(!service.verify_password("s3cret!", "s3cret!"));
        assert!(!service.verify_password("s3cret!", "$argon2id$garbage"));
    }

    #[test]
    fn test_hash_verifies_with_different_service_cost() {
        let hash = test_password_service().hash_password("s3cret!").unwrap();
        let other = PasswordService::new(HashCost::default()).unwrap();

        assert!(other.verify_password("s3cret!", &hash));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        let cost = HashCost {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(cost.params().is_err());
        assert!(matches!(
            PasswordService::new(cost),
            Err(AuthError::PasswordHashError)
        ));
    }

    #[test]
    fn test_dummy_hash_uses_configured_cost() {
        let service = test_password_service();

        assert!(service.dummy_hash().starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        assert!(!service.verify_password("s3cret!", service.dummy_hash()));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_hash_never_equals_password(password in "\\PC{1,40}") {
            let service = test_password_service();
            let hash = service.hash_password(&password).unwrap();
            prop_assert_ne!(&hash, &password);
            prop_assert!(service.verify_password(&password, &hash));
        }

        #[test]
        fn prop_other_password_does_not_verify(
            password in "[a-zA-Z0-9!@#]{1,24}",
            other in "[a-zA-Z0-9!@#]{1,24}",
        ) {
            prop_assume!(password != other);
            let service = test_password_service();
            let hash = service.hash_password(&other).unwrap();
            prop_assert!(!service.verify_password(&password, &hash));
        }
    }
}
