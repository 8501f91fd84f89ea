//! # Error Types
//!
//! Two layers of failure:
//!
//! - [`CanvasError`]: rejected by the canvas program itself. Numbered from
//!   6000 and reported in the program logs by name.
//! - [`LedgerError`]: raised by the ledger around the program (address
//!   authorization, allocation, account decoding) or wrapping a program
//!   error.
//!
//! Every failure aborts the whole transaction. None is retriable without the
//! caller changing the request.

use shared_crypto::PdaError;
use shared_types::entities::Address;
use thiserror::Error;

// =============================================================================
// PROGRAM ERRORS
// =============================================================================

/// Errors returned by the canvas program's own validation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasError {
    /// X outside `0..=99`.
    #[error("the given X co-ordinate is not between 0-99")]
    InvalidXCoordinate,

    /// Y outside `0..=99`.
    #[error("the given Y co-ordinate is not between 0-99")]
    InvalidYCoordinate,
}

impl CanvasError {
    /// First program error number.
    pub const ERROR_CODE_OFFSET: u32 = 6000;

    /// Numeric error code as reported in the logs.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::InvalidXCoordinate => Self::ERROR_CODE_OFFSET,
            Self::InvalidYCoordinate => Self::ERROR_CODE_OFFSET + 1,
        }
    }

    /// Variant name as reported in the logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InvalidXCoordinate => "InvalidXCoordinate",
            Self::InvalidYCoordinate => "InvalidYCoordinate",
        }
    }

    /// Message as written in the `Error Message:` log line.
    #[must_use]
    pub const fn log_message(&self) -> &'static str {
        match self {
            Self::InvalidXCoordinate => "The given X co-ordinate is not between 0-99",
            Self::InvalidYCoordinate => "The given Y co-ordinate is not between 0-99",
        }
    }
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors that abort a transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The canvas program rejected the instruction.
    #[error(transparent)]
    Program(#[from] CanvasError),

    /// Create targeted an address that already holds an account.
    #[error("account {0} already in use")]
    AccountAlreadyInUse(Address),

    /// The supplied address is not the one derived from the instruction's
    /// coordinates, so the program cannot sign for it.
    #[error("cross-program invocation with unauthorized signer: {supplied} is not the derived address {expected}")]
    PrivilegeEscalation {
        /// Address the caller supplied.
        supplied: Address,
        /// Address derived from the coordinates.
        expected: Address,
    },

    /// No account at the address.
    #[error("account {0} not initialized")]
    AccountNotInitialized(Address),

    /// The account exists but another program owns it.
    #[error("account {address} owned by {owner}, not this program")]
    AccountOwnedByWrongProgram {
        /// Account address.
        address: Address,
        /// Actual owner.
        owner: Address,
    },

    /// The account's type tag is not a pixel's.
    #[error("account discriminator did not match what was expected")]
    AccountDiscriminatorMismatch,

    /// The account payload could not be decoded.
    #[error("failed to deserialize the account")]
    AccountDidNotDeserialize,

    /// The record could not be encoded.
    #[error("failed to serialize the account")]
    AccountDidNotSerialize,

    /// Stored coordinates and bump do not re-derive the account address.
    #[error("a seeds constraint was violated for {0}")]
    ConstraintSeeds(Address),

    /// Instruction data too short to carry a method tag.
    #[error("instruction discriminator not provided")]
    InstructionMissing,

    /// Method tag matches no instruction.
    #[error("fallback functions are not supported")]
    InstructionFallbackNotFound,

    /// Instruction arguments could not be decoded.
    #[error("the program could not deserialize the given instruction")]
    InstructionDidNotDeserialize,

    /// Instruction arguments could not be encoded.
    #[error("the program could not serialize the given instruction")]
    InstructionDidNotSerialize,

    /// Address derivation failed.
    #[error("address derivation failed: {0}")]
    Derivation(#[from] PdaError),

    /// Ledger storage lock was poisoned by a panicking writer.
    #[error("ledger storage lock poisoned")]
    LockPoisoned,
}

/// Coarse classification of a [`LedgerError`], used for stats and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Program validation (bad coordinates).
    Validation,
    /// Create raced or repeated against an existing account.
    AllocationConflict,
    /// Address does not match its derivation.
    Authorization,
    /// Account missing or not decodable as a pixel.
    Account,
    /// Instruction bytes malformed.
    Instruction,
    /// Storage or derivation failure.
    Internal,
}

impl LedgerError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Program(_) => FailureKind::Validation,
            Self::AccountAlreadyInUse(_) => FailureKind::AllocationConflict,
            Self::PrivilegeEscalation { .. } | Self::ConstraintSeeds(_) => {
                FailureKind::Authorization
            }
            Self::AccountNotInitialized(_)
            | Self::AccountOwnedByWrongProgram { .. }
            | Self::AccountDiscriminatorMismatch
            | Self::AccountDidNotDeserialize
            | Self::AccountDidNotSerialize => FailureKind::Account,
            Self::InstructionMissing
            | Self::InstructionFallbackNotFound
            | Self::InstructionDidNotDeserialize
            | Self::InstructionDidNotSerialize => FailureKind::Instruction,
            Self::Derivation(_) | Self::LockPoisoned => FailureKind::Internal,
        }
    }

    /// The program error, if the program itself rejected the instruction.
    #[must_use]
    pub const fn program_error(&self) -> Option<CanvasError> {
        match self {
            Self::Program(error) => Some(*error),
            _ => None,
        }
    }

    /// Variant name, as shown in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Program(error) => error.name(),
            Self::AccountAlreadyInUse(_) => "AccountAlreadyInUse",
            Self::PrivilegeEscalation { .. } => "PrivilegeEscalation",
            Self::AccountNotInitialized(_) => "AccountNotInitialized",
            Self::AccountOwnedByWrongProgram { .. } => "AccountOwnedByWrongProgram",
            Self::AccountDiscriminatorMismatch => "AccountDiscriminatorMismatch",
            Self::AccountDidNotDeserialize => "AccountDidNotDeserialize",
            Self::AccountDidNotSerialize => "AccountDidNotSerialize",
            Self::ConstraintSeeds(_) => "ConstraintSeeds",
            Self::InstructionMissing => "InstructionMissing",
            Self::InstructionFallbackNotFound => "InstructionFallbackNotFound",
            Self::InstructionDidNotDeserialize => "InstructionDidNotDeserialize",
            Self::InstructionDidNotSerialize => "InstructionDidNotSerialize",
            Self::Derivation(_) => "Derivation",
            Self::LockPoisoned => "LockPoisoned",
        }
    }
}
