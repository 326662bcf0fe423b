//! Content fingerprinting for change detection
//!
//! The fingerprint is the single authority for deciding whether an upload
//! needs reprocessing. Any byte-level difference between two uploads
//! produces a different digest; identical bytes always produce the same
//! digest, which is what makes repeated ingestion of the same file a no-op.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hex digest of the raw upload bytes
pub fn fingerprint(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Decide whether the index is stale relative to a new upload
///
/// Returns true when the digests differ or when nothing has been indexed
/// yet.
pub fn has_changed(current: &str, indexed: Option<&str>) -> bool {
    match indexed {
        Some(previous) => previous != current,
        None => true,
    }
}
