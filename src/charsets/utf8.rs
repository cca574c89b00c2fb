/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::buf::{ByteBuf, CharBuf};
use crate::impls::{Coder, Decoder, Encoder};
use crate::traits::{CoderResult, CodingLoop, LoopError};

/// UTF-8, byte→char direction, with full validation.
///
/// Invalid start bytes, stray continuation bytes, overlong forms,
/// surrogates, and out-of-range sequences are malformed input; the
/// reported length is that of the invalid prefix, which is left
/// unconsumed.
///
/// A trailing partial sequence is left unconsumed and reported as
/// [`Underflow`](CoderResult::Underflow), so callers streaming input in
/// chunks must carry the unconsumed tail into the next input buffer. On a
/// final call the engine turns that leftover into a malformed-input error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct Utf8ByteToChar;

impl CodingLoop for Utf8ByteToChar {
    type In = u8;
    type Out = char;

    fn coding_loop(
        &mut self,
        input: &mut ByteBuf,
        output: &mut CharBuf,
        _end_of_input: bool,
    ) -> Result<CoderResult, LoopError> {
        while input.has_remaining() {
            let start = input.position();
            let b0 = input.get()?;
            // Start bytes 0xC0, 0xC1, and 0xF5..=0xFF can never begin a
            // valid sequence; 0x80..=0xBF is a stray continuation byte.
            let (len, first_payload, min) = match b0 {
                0x00..=0x7F => (1, b0 as u32, 0),
                0xC2..=0xDF => (2, (b0 & 0x1F) as u32, 0x80),
                0xE0..=0xEF => (3, (b0 & 0x0F) as u32, 0x800),
                0xF0..=0xF4 => (4, (b0 & 0x07) as u32, 0x10000),
                _ => {
                    input.set_position(start)?;
                    return Err(LoopError::MalformedInput { len: 1 });
                }
            };
            let mut cp = first_payload;
            for i in 1..len {
                if !input.has_remaining() {
                    // Partial sequence: hand it back to the engine.
                    input.set_position(start)?;
                    return Ok(CoderResult::Underflow);
                }
                let b = input.peek()?;
                if b & 0xC0 != 0x80 {
                    input.set_position(start)?;
                    return Err(LoopError::MalformedInput { len: i });
                }
                input.get()?;
                cp = (cp << 6) | (b & 0x3F) as u32;
            }
            if cp < min {
                input.set_position(start)?;
                return Err(LoopError::MalformedInput { len });
            }
            // Rejects surrogates and code points above U+10FFFF.
            let Some(c) = char::from_u32(cp) else {
                input.set_position(start)?;
                return Err(LoopError::MalformedInput { len });
            };
            if !output.has_remaining() {
                input.set_position(start)?;
                return Ok(CoderResult::Overflow);
            }
            output.put(c)?;
        }
        Ok(CoderResult::Underflow)
    }
}

/// UTF-8, char→byte direction.
///
/// Total: every Unicode scalar value has a UTF-8 representation, so this
/// loop never reports malformed or unmappable input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct Utf8CharToByte;

impl CodingLoop for Utf8CharToByte {
    type In = char;
    type Out = u8;

    fn coding_loop(
        &mut self,
        input: &mut CharBuf,
        output: &mut ByteBuf,
        _end_of_input: bool,
    ) -> Result<CoderResult, LoopError> {
        let mut tmp = [0u8; 4];
        while input.has_remaining() {
            let c = input.peek()?;
            let encoded = c.encode_utf8(&mut tmp).as_bytes();
            if output.remaining() < encoded.len() {
                return Ok(CoderResult::Overflow);
            }
            input.get()?;
            output.put_slice(encoded)?;
        }
        Ok(CoderResult::Underflow)
    }
}

/// A ready-made UTF-8 byte→char coder. A byte yields at most one char.
#[must_use]
pub fn utf8_encoder() -> Encoder<Utf8ByteToChar> {
    Encoder::new(Coder::new(Utf8ByteToChar, 1.0, 1.0, 1.0))
}

/// A ready-made UTF-8 char→byte coder. A char yields up to four bytes,
/// slightly more than one on mostly-ASCII text.
#[must_use]
pub fn utf8_decoder() -> Decoder<Utf8CharToByte> {
    Decoder::new(Coder::new(Utf8CharToByte, 0.25, 1.1, 4.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::CoderError;

    #[test]
    fn test_malformed_prefixes() {
        // (bytes, reported malformed length)
        for (bytes, len) in [
            (&[0x80u8][..], 1),            // stray continuation byte
            (&[0xC0, 0xAF][..], 1),        // overlong 2-byte start
            (&[0xC2, 0x41][..], 1),        // bad continuation byte
            (&[0xE0, 0x80, 0x80][..], 3),  // overlong 3-byte form
            (&[0xED, 0xA0, 0x80][..], 3),  // surrogate
            (&[0xF4, 0x90, 0x80, 0x80][..], 4), // above U+10FFFF
            (&[0xF5, 0x80, 0x80, 0x80][..], 1), // invalid start byte
        ] {
            let mut encoder = utf8_encoder();
            assert_eq!(
                encoder.encode(bytes),
                Err(CoderError::MalformedInput { len }),
                "input {:x?}",
                bytes
            );
        }
    }

    #[test]
    fn test_truncated_sequence() {
        let mut encoder = utf8_encoder();
        // The first two bytes of a three-byte sequence.
        assert_eq!(
            encoder.encode(&[0xE2, 0x82]),
            Err(CoderError::MalformedInput { len: 2 })
        );
    }
}
