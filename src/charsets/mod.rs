/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Concrete byte↔char transcoding rules.

Each charset provides a pair of [`CodingLoop`](crate::traits::CodingLoop)
implementations (one per direction) plus ready-made constructors binding
them to a [`Coder`](crate::impls::Coder) with their natural sizing ratios:

- [`ascii`]: strict 7-bit US-ASCII; a high byte is malformed input on the
  byte→char side, a character above U+007F is unmappable on the char→byte
  side.
- [`latin1`]: ISO-8859-1; total on the byte→char side, characters above
  U+00FF are unmappable on the char→byte side.
- [`utf8`]: UTF-8 with full validation (continuation bytes, overlong
  forms, surrogates, range), mid-sequence underflow on chunked input, and
  per-sequence malformed-length reporting.

*/

pub mod ascii;
pub use ascii::{ascii_decoder, ascii_encoder, AsciiByteToChar, AsciiCharToByte};

pub mod latin1;
pub use latin1::{latin1_decoder, latin1_encoder, Latin1ByteToChar, Latin1CharToByte};

pub mod utf8;
pub use utf8::{utf8_decoder, utf8_encoder, Utf8ByteToChar, Utf8CharToByte};
