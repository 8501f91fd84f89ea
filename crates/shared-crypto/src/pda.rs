//! # Program-Derived Addresses
//!
//! Deterministic addresses that belong to a program rather than to a key
//! holder.
//!
//! ```text
//! address = sha256(seed_0 || ... || seed_n || program_id || "ProgramDerivedAddress")
//! ```
//!
//! An address is only valid if it is NOT a point on the ed25519 curve, which
//! guarantees nobody can produce a signature for it. `find_program_address`
//! appends a one-byte bump seed, walking down from 255, until the hash falls
//! off the curve.
//!
//! ## Security Properties
//!
//! - Addresses cannot be signed for externally, only re-derived.
//! - The same seeds and program id always yield the same `(address, bump)`.

use crate::errors::PdaError;
use crate::hashing::hashv;
use ed25519_dalek::VerifyingKey;

/// Raw 32-byte public key / address.
pub type Pubkey = [u8; 32];

/// Maximum number of seeds, including the bump.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Returns true if the bytes decompress to a valid ed25519 point.
#[must_use]
pub fn is_on_curve(bytes: &Pubkey) -> bool {
    VerifyingKey::from_bytes(bytes).is_ok()
}

/// Derives an address from exact seeds (bump included, if any).
///
/// # Errors
///
/// - `MaxSeedsExceeded` / `MaxSeedLengthExceeded` on oversized input
/// - `OnCurve` if the resulting hash is a valid curve point
pub fn create_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<Pubkey, PdaError> {
    if seeds.len() > MAX_SEEDS {
        return Err(PdaError::MaxSeedsExceeded {
            count: seeds.len(),
            max: MAX_SEEDS,
        });
    }
    if let Some(seed) = seeds.iter().find(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(PdaError::MaxSeedLengthExceeded {
            len: seed.len(),
            max: MAX_SEED_LEN,
        });
    }

    let mut parts: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 2);
    parts.extend_from_slice(seeds);
    parts.push(program_id);
    parts.push(PDA_MARKER);

    let hash = hashv(&parts);
    if is_on_curve(&hash) {
        return Err(PdaError::OnCurve);
    }
    Ok(hash)
}

/// Finds the canonical `(address, bump)` for the given seeds.
///
/// Bumps are tried from 255 downwards; the first off-curve result wins.
///
/// # Errors
///
/// Seed limit errors are returned immediately. `NoViableBump` if all 256
/// bumps land on the curve.
pub fn find_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8), PdaError> {
    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = seeds.to_vec();
        with_bump.push(&bump_seed);

        match create_program_address(&with_bump, program_id) {
            Ok(address) => return Ok((address, bump)),
            Err(PdaError::OnCurve) => continue,
            Err(other) => return Err(other),
        }
    }
    Err(PdaError::NoViableBump)
}
