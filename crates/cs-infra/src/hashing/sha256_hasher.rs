use anyhow::Result;
use cs_core::clipboard::ContentHash;
use cs_core::ports::ContentHashPort;
use sha2::{Digest, Sha256};

/// SHA-256 over the raw image bytes; used for image deduplication.
pub struct Sha256Hasher;

impl ContentHashPort for Sha256Hasher {
    fn hash_bytes(&self, bytes: &[u8]) -> Result<ContentHash> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Ok(ContentHash(hasher.finalize().into()))
    }
}
