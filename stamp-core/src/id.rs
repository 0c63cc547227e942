//! The identifier value assigned to host objects.
//!
//! An [`Id`] is an opaque 30-character token: a freshly generated v4 UUID,
//! rendered in its canonical hyphenated text form, base64-encoded, and
//! truncated to a fixed prefix. The format is frozen — ids persisted by
//! earlier process lifetimes must compare equal byte-for-byte — so the
//! derivation here must never change.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed length of every generated id, in characters.
pub const ID_LEN: usize = 30;

/// Attachment key under which an [`Id`] is stored on a host object.
///
/// All stores share this key; one object carries at most one id.
pub const ID_KEY: &str = "unique-id";

/// A globally unique, immutable identifier for a host object.
///
/// Uniqueness is probabilistic (128 bits of randomness behind the encoding)
/// and is not checked or reserved anywhere. Once attached to an object the
/// value never changes for that object's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Generate a fresh id, independent of all previously generated values.
    ///
    /// Never fails; there is no counter and no collision check.
    pub fn random() -> Self {
        Self(encode(Uuid::new_v4()))
    }

    /// Wrap an id string read back from persisted state.
    ///
    /// No validation — persisted ids are trusted as written.
    pub fn from_persisted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The stored string, stable for the object's lifetime.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// `uuid` → hyphenated text → standard base64 → first [`ID_LEN`] chars.
fn encode(uuid: Uuid) -> String {
    let mut encoded = STANDARD.encode(uuid.hyphenated().to_string());
    encoded.truncate(ID_LEN);
    encoded
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn is_base64_alphabet(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='
    }

    #[test]
    fn random_id_is_fixed_length_base64() {
        for _ in 0..100 {
            let id = Id::random();
            assert_eq!(id.as_str().len(), ID_LEN);
            assert!(id.as_str().chars().all(is_base64_alphabet), "got: {id}");
        }
    }

    #[test]
    fn random_ids_are_distinct() {
        let a = Id::random();
        let b = Id::random();
        assert_ne!(a, b);
    }

    // base64 of the hyphenated uuid text, truncated — frozen for
    // interoperability with previously persisted ids.
    #[rstest]
    #[case("00000000-0000-0000-0000-000000000000", "MDAwMDAwMDAtMDAwMC0wMDAwLTAwMD")]
    #[case("deadbeef-cafe-4bad-8bad-0123456789ab", "ZGVhZGJlZWYtY2FmZS00YmFkLThiYW")]
    fn encoding_matches_frozen_format(#[case] uuid: &str, #[case] expected: &str) {
        let uuid: Uuid = uuid.parse().expect("uuid");
        assert_eq!(encode(uuid), expected);
    }

    #[test]
    fn display_and_from_persisted_roundtrip() {
        let id = Id::random();
        let reread = Id::from_persisted(id.to_string());
        assert_eq!(id, reread);
        assert_eq!(reread.as_str(), id.as_str());
    }

    #[test]
    fn serializes_as_bare_string() {
        let id = Id::from_persisted("MDAwMDAwMDAtMDAwMC0wMDAwLTAwMD");
        let yaml = serde_yaml::to_string(&id).expect("serialize");
        assert_eq!(yaml.trim(), "MDAwMDAwMDAtMDAwMC0wMDAwLTAwMD");
        let back: Id = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(back, id);
    }
}
