use sha2::{Digest, Sha256};

use crate::level::Level;

/// SHA-256 over the canonical JSON encoding of the level.
pub(crate) fn level_fingerprint(level: &Level) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(level)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(to_hex_lower(&hasher.finalize()))
}

fn to_hex_lower(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        use std::fmt::Write as _;
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}
