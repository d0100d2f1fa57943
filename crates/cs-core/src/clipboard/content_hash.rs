use serde::{Deserialize, Serialize};
use std::fmt;

/// Digest of raw clipboard bytes, used as the dedup key of image entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for ContentHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short form is enough for logs
        write!(f, "{}", &self.to_hex()[..12])
    }
}

impl TryFrom<&[u8]> for ContentHash {
    type Error = anyhow::Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| anyhow::anyhow!("content hash must be 32 bytes, got {}", bytes.len()))?;
        Ok(Self(arr))
    }
}
