/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use alloc::string::String;
use core::ops::{Deref, DerefMut};

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::buf::ByteBuf;
use crate::impls::{Coder, CoderError};
use crate::traits::CodingLoop;

/// A byte→char coder: binds a [`Coder`] whose loop consumes bytes and
/// produces characters, and exposes a single-call conversion to text.
///
/// Dereferences to the underlying [`Coder`] for low-level, chunked
/// conversion via [`code_into`](Coder::code_into) and
/// [`flush_into`](Coder::flush_into).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct Encoder<L: CodingLoop<In = u8, Out = char>> {
    coder: Coder<L>,
}

impl<L: CodingLoop<In = u8, Out = char>> Encoder<L> {
    #[must_use]
    pub fn new(coder: Coder<L>) -> Self {
        Self { coder }
    }

    /// Convert a whole byte slice to a [`String`].
    ///
    /// This is a complete, self-contained conversion: partial or resumable
    /// encoding of a sub-range is not supported in a single call, so
    /// callers with that use case must pre-slice the input and use the
    /// low-level interface instead. On success the underlying coder is
    /// reset, ready for another independent conversion.
    pub fn encode(&mut self, bytes: &[u8]) -> Result<String, CoderError> {
        let mut input = ByteBuf::from_slice(bytes);
        let output = self.coder.code(&mut input)?;
        Ok(output.as_slice().iter().collect())
    }

    /// Consume the wrapper and return the underlying [`Coder`].
    #[must_use]
    pub fn into_inner(self) -> Coder<L> {
        self.coder
    }
}

impl<L: CodingLoop<In = u8, Out = char>> Deref for Encoder<L> {
    type Target = Coder<L>;

    fn deref(&self) -> &Self::Target {
        &self.coder
    }
}

impl<L: CodingLoop<In = u8, Out = char>> DerefMut for Encoder<L> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.coder
    }
}
