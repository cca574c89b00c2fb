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

/// Strict 7-bit US-ASCII, byte→char direction.
///
/// A byte above `0x7F` is malformed input of length 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct AsciiByteToChar;

impl CodingLoop for AsciiByteToChar {
    type In = u8;
    type Out = char;

    fn coding_loop(
        &mut self,
        input: &mut ByteBuf,
        output: &mut CharBuf,
        _end_of_input: bool,
    ) -> Result<CoderResult, LoopError> {
        while input.has_remaining() {
            let b = input.peek()?;
            if b > 0x7F {
                return Err(LoopError::MalformedInput { len: 1 });
            }
            if !output.has_remaining() {
                return Ok(CoderResult::Overflow);
            }
            input.get()?;
            output.put(b as char)?;
        }
        Ok(CoderResult::Underflow)
    }
}

/// Strict 7-bit US-ASCII, char→byte direction.
///
/// A character above U+007F is unmappable input of length 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct AsciiCharToByte;

impl CodingLoop for AsciiCharToByte {
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
            if c as u32 > 0x7F {
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

/// A ready-made ASCII byte→char coder. One byte, one char.
#[must_use]
pub fn ascii_encoder() -> Encoder<AsciiByteToChar> {
    Encoder::new(Coder::new(AsciiByteToChar, 1.0, 1.0, 1.0))
}

/// A ready-made ASCII char→byte coder.
#[must_use]
pub fn ascii_decoder() -> Decoder<AsciiCharToByte> {
    Decoder::new(Coder::new(AsciiCharToByte, 1.0, 1.0, 1.0))
}
