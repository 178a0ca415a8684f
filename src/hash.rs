use std::fmt;

/// One-way digest of a password, stored as lowercase hex. The plaintext is
/// never kept.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    inner: blake3::Hash,
}

impl PasswordHash {
    pub fn of(password: &str) -> Self {
        Self {
            inner: blake3::hash(password.as_bytes()),
        }
    }

    pub fn to_hex(&self) -> String {
        self.inner.to_hex().to_string()
    }
}

// Keep digests out of logs.
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_fixed_length_and_deterministic() {
        let a = PasswordHash::of("secret");
        let b = PasswordHash::of("secret");
        assert_eq!(a, b);
        assert_eq!(a.to_hex().len(), 64);
        assert_eq!(PasswordHash::of("").to_hex().len(), 64);
        assert_ne!(a, PasswordHash::of("Secret"));
        assert!(!a.to_hex().contains("secret"));
    }
}
