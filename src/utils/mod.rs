/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Debug helpers.

[`CountCodingLoop`] wraps a [`CodingLoop`](crate::traits::CodingLoop) and
keeps track of the number of units consumed and produced, optionally
printing on standard error the operations performed on the loop.

*/

mod count;
pub use count::*;
