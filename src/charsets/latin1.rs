/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::buf::{ByteBuf, CharBuf};
use crate::impls::{Coder, Decoder, Encoder};
use crate::traits::{CoderResult, CodingLoop, LoopError};

/// ISO-8859-1, byte→char direction.
///
/// Total: every byte maps to the code point with the same value, so this
/// loop never reports malformed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct Latin1ByteToChar;

impl CodingLoop for Latin1ByteToChar {
    type In = u8;
    type Out = char;

    fn coding_loop(
        &mut self,
        input: &mut ByteBuf,
        output: &mut CharBuf,
        _end_of_input: bool,
    ) -> Result<CoderResult, LoopError> {
        while input.has_remaining() {
            if !output.has_remaining() {
                return Ok(CoderResult::Overflow);
            }
            let b = input.get()?;
            output.put(b as char)?;
        }
        Ok(CoderResult::Underflow)
    }
}

/// ISO-8859-1, char→byte direction.
///
/// A character above U+00FF is unmappable input of length 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct Latin1CharToByte;

impl CodingLoop for Latin1CharToByte {
    type In = char;
    type Out = u8;

    fn coding_loop(
        &mut self,
        input: &mut CharBuf,
        output: &mut ByteBuf,
        _end_of_input: bool,
    ) -> Result<CoderResult, LoopError> {
        while input.has_remaining() {
            let c = input.peek()?;
            if c as u32 > 0xFF {
                return Err(LoopError::UnmappableOutput { len: 1 });
            }
            if !output.has_remaining() {
                return Ok(CoderResult::Overflow);
            }
            input.get()?;
            output.put(c as u8)?;
        }
        Ok(CoderResult::Underflow)
    }
}

/// A ready-made Latin-1 byte→char coder. One byte, one char.
#[must_use]
pub fn latin1_encoder() -> Encoder<Latin1ByteToChar> {
    Encoder::new(Coder::new(Latin1ByteToChar, 1.0, 1.0, 1.0))
}

/// A ready-made Latin-1 char→byte coder.
#[must_use]
pub fn latin1_decoder() -> Decoder<Latin1CharToByte> {
    Decoder::new(Coder::new(Latin1CharToByte, 1.0, 1.0, 1.0))
}
