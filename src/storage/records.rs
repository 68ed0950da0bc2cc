//! Stored Record Types
//!
//! The two payloads the certificate store persists: a site record (one
//! domain's certificate material) and a user record (one ACME account).
//! Both serialize to field-tagged JSON with base64-encoded byte fields,
//! matching the shape of objects already in storage, so existing data stays
//! readable and stored objects stay human-inspectable.

use serde::{Deserialize, Serialize};

/// Certificate material for one domain.
///
/// A record is either fully present (all three fields as last written) or
/// absent. Partial records are a possible failure mode under non-atomic
/// writes, accepted as a known risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// PEM-encoded certificate chain.
    #[serde(with = "base64_bytes")]
    pub cert: Vec<u8>,
    /// PEM-encoded private key.
    #[serde(with = "base64_bytes")]
    pub key: Vec<u8>,
    /// Opaque metadata owned by the caller (typically issuer/registration
    /// metadata).
    #[serde(with = "base64_bytes")]
    pub meta: Vec<u8>,
}

/// One ACME account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Registration data returned by the CA.
    #[serde(with = "base64_bytes")]
    pub reg: Vec<u8>,
    /// PEM-encoded account private key.
    #[serde(with = "base64_bytes")]
    pub key: Vec<u8>,
}

impl SiteRecord {
    /// Serialize to the stored JSON payload. Cannot fail for well-formed
    /// in-memory records; byte fields have no value restrictions.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode a stored payload. Empty or malformed input fails with a
    /// decode error; this never yields a zero-valued record.
    pub fn decode(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

impl UserRecord {
    /// Serialize to the stored JSON payload.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode a stored payload. Fails on empty or malformed input.
    pub fn decode(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

/// Serde helper for byte fields as standard base64 strings.
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(&encoded).map_err(serde::de::Error::custom)
    }
}
