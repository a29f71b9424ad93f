use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl HashCost {
    /// Floor below which no configured cost is accepted.
    pub const MINIMUM: Self = Self {
        memory_kib: 4096,
        iterations: 1,
        parallelism: 1,
    };

    /// OWASP recommended Argon2id parameters (m=19 MiB, t=2, p=1).
    pub const RECOMMENDED: Self = Self {
        memory_kib: 19456,
        iterations: 2,
        parallelism: 1,
    };

    /// Raise every parameter to at least the [`HashCost::MINIMUM`] value.
    pub fn clamped(self) -> Self {
        Self {
            memory_kib: self.memory_kib.max(Self::MINIMUM.memory_kib),
            iterations: self.iterations.max(Self::MINIMUM.iterations),
            parallelism: self.parallelism.max(Self::MINIMUM.parallelism),
        }
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self::RECOMMENDED
    }
}

/// Stored password hash in PHC string format.
///
/// The record carries algorithm, version, cost parameters, salt and digest,
/// so a record hashed under an older cost still verifies after the cost changes.
#[derive(Clone, PartialEq, Eq)]
pub struct HashRecord(String);

impl HashRecord {
    /// Wrap a PHC string loaded from storage.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for HashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashRecord").field(&"<redacted>").finish()
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
/// Both operations are CPU and memory heavy; async callers should run them on
/// a blocking thread.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a new password hasher with the recommended cost.
    pub fn new() -> Self {
        Self {
            params: Params::new(
                HashCost::RECOMMENDED.memory_kib,
                HashCost::RECOMMENDED.iterations,
                HashCost::RECOMMENDED.parallelism,
                None,
            )
            .unwrap_or_default(),
        }
    }

    /// Create a password hasher with a custom cost.
    ///
    /// The cost is clamped up to [`HashCost::MINIMUM`].
    ///
    /// # Errors
    /// * `InvalidCost` - Argon2 rejected the parameter combination
    pub fn with_cost(cost: HashCost) -> Result<Self, PasswordError> {
        let cost = cost.clamped();
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordError::InvalidCost(e.to_string()))?;

        Ok(Self { params })
    }

    /// Cost used for newly created hashes.
    pub fn cost(&self) -> HashCost {
        HashCost {
            memory_kib: self.params.m_cost(),
            iterations: self.params.t_cost(),
            parallelism: self.params.p_cost(),
        }
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed (e.g. memory exhaustion)
    pub fn hash(&self, password: &str) -> Result<HashRecord, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| HashRecord(hash.to_string()))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns `false` on mismatch and on a record that is not a valid PHC
    /// string. Digest comparison is constant time.
    pub fn verify(&self, password: &str, record: &HashRecord) -> bool {
        let parsed_hash = match PasswordHash::new(record.as_str()) {
            Ok(parsed_hash) => parsed_hash,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
                return false;
            }
        };

        // Verification takes its parameters from the record, not from `self.params`.
        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::distributions::Alphanumeric;
    use rand::distributions::DistString;
    use rand::Rng;

    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_cost(HashCost::MINIMUM).expect("Minimum cost must be valid")
    }

    fn random_password(rng: &mut impl Rng) -> String {
        let length = rng.gen_range(1..=24);
        Alphanumeric.sample_string(rng, length)
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher();

        let first = hasher.hash("hunter2").expect("Failed to hash password");
        let second = hasher.hash("hunter2").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(first.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();
        assert!(!hasher.verify("password", &HashRecord::from_phc("invalid_hash")));
    }

    #[test]
    fn test_cost_is_clamped_to_minimum() {
        let hasher = PasswordHasher::with_cost(HashCost {
            memory_kib: 8,
            iterations: 0,
            parallelism: 0,
        })
        .expect("Clamped cost must be valid");

        assert_eq!(hasher.cost(), HashCost::MINIMUM);
    }

    #[test]
    fn test_record_verifies_under_different_cost() {
        let record = fast_hasher().hash("hunter2").expect("Failed to hash password");
        let stronger = PasswordHasher::with_cost(HashCost {
            memory_kib: 8192,
            iterations: 2,
            parallelism: 1,
        })
        .expect("Cost must be valid");

        assert!(stronger.verify("hunter2", &record));
    }

    #[test]
    fn test_debug_does_not_leak_hash() {
        let record = fast_hasher().hash("hunter2").expect("Failed to hash password");
        assert!(!format!("{:?}", record).contains("argon2"));
    }

    #[test]
    fn test_randomized_password_pairs() {
        let hasher = fast_hasher();
        let mut rng = rand::thread_rng();

        for _ in 0..1000 {
            let password = random_password(&mut rng);
            let mut other = random_password(&mut rng);
            if other == password {
                other.push('x');
            }

            let record = hasher.hash(&password).expect("Failed to hash password");
            assert!(hasher.verify(&password, &record));
            assert!(!hasher.verify(&other, &record));
        }
    }
}
