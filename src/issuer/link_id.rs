use anyhow::{Result, anyhow};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque identifier tying a payment link to its session.
///
/// Eight random bytes shown as 16 lowercase hex characters, so ids are
/// URL-safe and collisions within a link's lifetime are negligible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkId([u8; 8]);

impl LinkId {
    pub fn generate() -> Self {
        let bytes: [u8; 8] = rand::random();
        Self(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 8 {
            return Err(anyhow!("link id must be 8 bytes"));
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Serialize for LinkId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LinkId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_display_is_url_safe_hex() {
        let id = LinkId::generate();
        let s = id.to_string();
        assert_eq!(s.len(), 16);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hex_roundtrip() {
        let id = LinkId::generate();
        let parsed = LinkId::from_hex(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_rejects_malformed_ids() {
        assert!(LinkId::from_hex("not hex at all").is_err());
        assert!(LinkId::from_hex("abcd").is_err());
        assert!(LinkId::from_hex("00112233445566778899").is_err());
    }

    #[test]
    fn test_no_duplicates_across_many_generations() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(LinkId::generate()));
        }
    }
}
