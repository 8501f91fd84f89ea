//! # Instruction Codec
//!
//! Wire form: 8-byte method tag (`sha256("global:<method>")[..8]`) followed
//! by `bincode`-encoded arguments.

use crate::domain::value_objects::{Color, Coordinate};
use crate::errors::LedgerError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_crypto::discriminator;

/// Length of the method tag.
pub const METHOD_TAG_LEN: usize = 8;

/// Instructions understood by the canvas program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasInstruction {
    /// Allocate the record for a coordinate and paint it.
    CreatePixel {
        /// Position. Must derive the target address.
        coordinate: Coordinate,
        /// Initial color.
        color: Color,
    },
    /// Repaint an existing record.
    UpdatePixel {
        /// New color.
        color: Color,
    },
}

#[derive(Serialize, Deserialize)]
struct CreatePixelArgs {
    pos_x: u8,
    pos_y: u8,
    init_col_r: u8,
    init_col_g: u8,
    init_col_b: u8,
}

#[derive(Serialize, Deserialize)]
struct UpdatePixelArgs {
    new_col_r: u8,
    new_col_g: u8,
    new_col_b: u8,
}

impl CanvasInstruction {
    /// Method name of the create instruction.
    pub const CREATE_PIXEL: &'static str = "create_pixel";

    /// Method name of the update instruction.
    pub const UPDATE_PIXEL: &'static str = "update_pixel";

    /// Method name, as hashed into the tag.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::CreatePixel { .. } => Self::CREATE_PIXEL,
            Self::UpdatePixel { .. } => Self::UPDATE_PIXEL,
        }
    }

    /// Display name, as shown in program logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreatePixel { .. } => "CreatePixel",
            Self::UpdatePixel { .. } => "UpdatePixel",
        }
    }

    /// Method tag for a method name.
    #[must_use]
    pub fn tag(method: &str) -> [u8; METHOD_TAG_LEN] {
        discriminator("global", method)
    }

    /// Encodes the instruction.
    pub fn pack(&self) -> Result<Vec<u8>, LedgerError> {
        let args = match *self {
            Self::CreatePixel { coordinate, color } => bincode::serialize(&CreatePixelArgs {
                pos_x: coordinate.x,
                pos_y: coordinate.y,
                init_col_r: color.r,
                init_col_g: color.g,
                init_col_b: color.b,
            }),
            Self::UpdatePixel { color } => bincode::serialize(&UpdatePixelArgs {
                new_col_r: color.r,
                new_col_g: color.g,
                new_col_b: color.b,
            }),
        }
        .map_err(|_| LedgerError::InstructionDidNotSerialize)?;

        let mut data = Vec::with_capacity(METHOD_TAG_LEN + args.len());
        data.extend_from_slice(&Self::tag(self.method()));
        data.extend_from_slice(&args);
        Ok(data)
    }

    /// Decodes instruction bytes.
    ///
    /// # Errors
    ///
    /// - `InstructionMissing` if shorter than the method tag
    /// - `InstructionFallbackNotFound` for an unknown tag
    /// - `InstructionDidNotDeserialize` for malformed arguments
    pub fn unpack(data: &[u8]) -> Result<Self, LedgerError> {
        let (tag, args) = data
            .split_at_checked(METHOD_TAG_LEN)
            .ok_or(LedgerError::InstructionMissing)?;

        if tag == Self::tag(Self::CREATE_PIXEL).as_slice() {
            let args: CreatePixelArgs = decode_args(args)?;
            Ok(Self::CreatePixel {
                coordinate: Coordinate::new(args.pos_x, args.pos_y),
                color: Color::new(args.init_col_r, args.init_col_g, args.init_col_b),
            })
        } else if tag == Self::tag(Self::UPDATE_PIXEL).as_slice() {
            let args: UpdatePixelArgs = decode_args(args)?;
            Ok(Self::UpdatePixel {
                color: Color::new(args.new_col_r, args.new_col_g, args.new_col_b),
            })
        } else {
            Err(LedgerError::InstructionFallbackNotFound)
        }
    }
}

fn decode_args<T: DeserializeOwned>(args: &[u8]) -> Result<T, LedgerError> {
    bincode::deserialize(args).map_err(|_| LedgerError::InstructionDidNotDeserialize)
}
