//! Hashing utilities for fingerprinting.

use sha2::{Digest, Sha256};

/// A hasher for building fingerprints from multiple components.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    /// Create a new fingerprint builder.
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    /// Add a string component to the fingerprint.
    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0"); // Separator
        self
    }

    /// Finalize and return the fingerprint as a hex string.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }

    /// Finalize and return a short fingerprint (first 16 chars).
    pub fn finish_short(self) -> String {
        self.finish()[..16].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        let build = |parts: &[&str]| {
            let mut fp = Fingerprint::new();
            for part in parts {
                fp.update_str(part);
            }
            fp.finish()
        };

        assert_eq!(build(&["-O2", "-Wall"]), build(&["-O2", "-Wall"]));
        assert_ne!(build(&["-O2", "-Wall"]), build(&["-O2"]));
        // The separator keeps adjacent components distinct.
        assert_ne!(build(&["-O2 -Wall"]), build(&["-O2", "-Wall"]));
    }

    #[test]
    fn test_finish_short_length() {
        let mut fp = Fingerprint::new();
        fp.update_str("-O2");
        assert_eq!(fp.finish_short().len(), 16);
    }
}
