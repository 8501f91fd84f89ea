//! Crypto error types.

use thiserror::Error;

/// Program-derived address errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PdaError {
    /// Too many seeds supplied.
    #[error("max seeds exceeded: {count} > {max}")]
    MaxSeedsExceeded {
        /// Seeds supplied (bump included)
        count: usize,
        /// Maximum allowed
        max: usize,
    },

    /// A single seed is too long.
    #[error("max seed length exceeded: {len} > {max} bytes")]
    MaxSeedLengthExceeded {
        /// Offending seed length
        len: usize,
        /// Maximum allowed
        max: usize,
    },

    /// The hash landed on the ed25519 curve and so may have a private key.
    #[error("provided seeds do not result in a valid address")]
    OnCurve,

    /// No bump in 0..=255 produced an off-curve address.
    #[error("unable to find a viable program address bump seed")]
    NoViableBump,
}
