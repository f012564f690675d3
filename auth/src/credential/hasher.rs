use hmac::Hmac;
use hmac::Mac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;

use super::errors::CredentialError;

type HmacSha512 = Hmac<Sha512>;

/// Length in bytes of the random key used to salt a credential.
pub const SALT_LENGTH: usize = 64;

/// Length in bytes of the derived hash (SHA-512 output width).
pub const HASH_LENGTH: usize = 64;

/// A derived credential: the keyed hash of a password and the key it was
/// derived under. Both fields are set together and are only meaningful as a
/// pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub hash: Vec<u8>,
    pub salt: Vec<u8>,
}

/// Credential hashing implementation.
///
/// Derives and verifies salted password hashes (internally HMAC-SHA512 with
/// the salt as the keyed-hash key).
pub struct CredentialHasher;

impl CredentialHasher {
    /// Create a new credential hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Derive a fresh credential from a plaintext password.
    ///
    /// Draws a random 64-byte key from the OS entropy source and computes
    /// the keyed hash of the password under it.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Credential holding the derived hash and the generated salt
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty
    /// * `SaltGeneration` - OS random source failed
    pub fn create(&self, password: &str) -> Result<Credential, CredentialError> {
        if password.is_empty() {
            return Err(CredentialError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }

        let mut salt = vec![0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| CredentialError::SaltGeneration(e.to_string()))?;

        let hash = keyed_digest(&salt, password)?;

        Ok(Credential { hash, salt })
    }

    /// Verify a password against a stored hash and salt.
    ///
    /// Recomputes the keyed hash under the stored salt and compares it to the
    /// stored hash in constant time, so a mismatch takes as long as a match.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored credential hash
    /// * `salt` - Stored credential salt
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidInput` - Salt is empty
    pub fn verify(
        &self,
        password: &str,
        hash: &[u8],
        salt: &[u8],
    ) -> Result<bool, CredentialError> {
        if salt.is_empty() {
            return Err(CredentialError::InvalidInput(
                "salt must not be empty".to_string(),
            ));
        }

        let mut mac = HmacSha512::new_from_slice(salt)
            .map_err(|e| CredentialError::InvalidInput(e.to_string()))?;
        mac.update(password.as_bytes());

        // verify_slice compares in fixed time over the full tag length
        Ok(mac.verify_slice(hash).is_ok())
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn keyed_digest(key: &[u8], password: &str) -> Result<Vec<u8>, CredentialError> {
    let mut mac =
        HmacSha512::new_from_slice(key).map_err(|e| CredentialError::InvalidInput(e.to_string()))?;
    mac.update(password.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify() {
        let hasher = CredentialHasher::new();
        let password = "my_secure_password";

        let credential = hasher.create(password).expect("Failed to create credential");

        assert_eq!(credential.hash.len(), HASH_LENGTH);
        assert_eq!(credential.salt.len(), SALT_LENGTH);

        // Verify correct password
        assert!(hasher
            .verify(password, &credential.hash, &credential.salt)
            .expect("Failed to verify credential"));

        // Verify incorrect password
        assert!(!hasher
            .verify("wrong_password", &credential.hash, &credential.salt)
            .expect("Failed to verify credential"));
    }

    #[test]
    fn test_single_byte_password_mutation_fails() {
        let hasher = CredentialHasher::new();
        let password = "correct horse battery staple";

        let credential = hasher.create(password).expect("Failed to create credential");

        // Flip each byte of the password in turn; none may verify
        let bytes = password.as_bytes();
        for i in 0..bytes.len() {
            let mut mutated = bytes.to_vec();
            mutated[i] ^= 0x01;
            let mutated = String::from_utf8(mutated).expect("Mutation produced invalid UTF-8");
            assert!(
                !hasher
                    .verify(&mutated, &credential.hash, &credential.salt)
                    .expect("Failed to verify credential"),
                "Mutated password at byte {} verified",
                i
            );
        }
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = CredentialHasher::new();

        let first = hasher.create("password").expect("Failed to create credential");
        let second = hasher.create("password").expect("Failed to create credential");

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.hash, second.hash);
    }

    #[test]
    fn test_create_empty_password() {
        let hasher = CredentialHasher::new();
        let result = hasher.create("");
        assert!(matches!(result, Err(CredentialError::InvalidInput(_))));
    }

    #[test]
    fn test_verify_empty_salt() {
        let hasher = CredentialHasher::new();
        let result = hasher.verify("password", &[0u8; HASH_LENGTH], &[]);
        assert!(matches!(result, Err(CredentialError::InvalidInput(_))));
    }

    #[test]
    fn test_verify_truncated_hash() {
        let hasher = CredentialHasher::new();
        let credential = hasher.create("password").expect("Failed to create credential");

        let truncated = &credential.hash[..HASH_LENGTH / 2];
        assert!(!hasher
            .verify("password", truncated, &credential.salt)
            .expect("Failed to verify credential"));
    }
}
