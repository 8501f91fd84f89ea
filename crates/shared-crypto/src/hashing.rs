//! # SHA-256 Hashing
//!
//! One-shot helpers over `sha2`.

use sha2::{Digest, Sha256};

/// SHA-256 output (256-bit).
pub type Hash = [u8; 32];

/// Hash data with SHA-256 (one-shot).
#[must_use]
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Hash the concatenation of several inputs without allocating.
#[must_use]
pub fn hashv(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize().into()
}

/// 8-byte type tag: the first 8 bytes of `sha256("<namespace>:<name>")`.
///
/// Used to tag stored accounts (`account:Pixel`) and instructions
/// (`global:create_pixel`).
#[must_use]
pub fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let hash = hashv(&[namespace.as_bytes(), b":", name.as_bytes()]);
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash[..8]);
    out
}
