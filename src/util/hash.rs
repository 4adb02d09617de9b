//! Fingerprinting of resolved alias tables.

use sha2::{Digest, Sha256};

/// A hasher for building fingerprints from ordered string pairs.
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
        self.hasher.update(b"\0");
        self
    }

    /// Add a key/value entry.
    pub fn update_entry(&mut self, key: &str, value: &str) -> &mut Self {
        self.update_str(key).update_str(value)
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
    fn test_fingerprint() {
        let fp1 = {
            let mut fp = Fingerprint::new();
            fp.update_entry("~", "/p/src");
            fp.finish()
        };

        let fp2 = {
            let mut fp = Fingerprint::new();
            fp.update_entry("~", "/p/src");
            fp.finish()
        };

        // The separator keeps ("ab", "c") apart from ("a", "bc").
        let fp3 = {
            let mut fp = Fingerprint::new();
            fp.update_entry("~/", "p/src");
            fp.finish()
        };

        assert_eq!(fp1, fp2);
        assert_ne!(fp1, fp3);
        assert_eq!(fp1.len(), 64);
    }

    #[test]
    fn test_finish_short() {
        let mut fp = Fingerprint::new();
        fp.update_str("hello");
        assert_eq!(fp.finish_short().len(), 16);
    }
}
