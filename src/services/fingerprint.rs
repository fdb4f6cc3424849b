use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex SHA-256 of a normalized question text. Stable across processes, so the
/// store can use it as a duplicate lookup key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ContentFingerprint(String);

impl ContentFingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case and whitespace differences do not produce new fingerprints.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn fingerprint(question_text: &str) -> ContentFingerprint {
    let digest = Sha256::digest(normalize(question_text).as_bytes());
    ContentFingerprint(format!("{:x}", digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        let a = fingerprint("What is a binary search tree?");
        let b = fingerprint("What is a binary search tree?");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_fingerprint_ignores_case_and_spacing() {
        assert_eq!(
            fingerprint("Define   Entropy."),
            fingerprint("define entropy.")
        );
    }

    #[test]
    fn test_fingerprint_differs_for_different_text() {
        assert_ne!(fingerprint("Define entropy."), fingerprint("Define enthalpy."));
    }

    #[test]
    fn test_fingerprint_matches_known_digest() {
        // sha256("abc")
        assert_eq!(
            fingerprint("ABC").as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
