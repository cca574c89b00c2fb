/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of the generic coder engine and its directional wrappers.

The [`Coder`] owns the state machine, the sizing ratios, and the
growth-on-overflow convenience loop; the actual transcoding arithmetic is
supplied by a [`CodingLoop`](crate::traits::CodingLoop), typically one of
those in [`charsets`](crate::charsets).

[`Encoder`] and [`Decoder`] bind the engine to the two directions
(byte→char and char→byte) and expose single-call conversions to and from
standard string types.

*/

mod coder;
pub use coder::*;

mod decoder;
pub use decoder::*;

mod encoder;
pub use encoder::*;
