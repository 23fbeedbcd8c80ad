//! Synthetic primary key generation for rows without a natural unique id.

use sha1::{Digest, Sha1};

/// `id = SHA1-hex(tx_hash + "." + msg_index + suffix)`.
///
/// `suffix` is empty for single-output messages, `.i.<n>` / `.o.<n>` for
/// MultiSend inputs/outputs, and `.s` / `.d` for the two legs of a
/// redelegation. Stable across runs and processes: same inputs always hash to
/// the same id, which is what makes replay after a crash idempotent.
pub fn make_id(tx_hash: &str, msg_index: usize, suffix: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(tx_hash.as_bytes());
    hasher.update(b".");
    hasher.update(msg_index.to_string().as_bytes());
    hasher.update(suffix.as_bytes());
    hex::encode(hasher.finalize())
}
