/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::buf::CharBuf;
use crate::impls::{Coder, CoderError};
use crate::traits::CodingLoop;

/// A char→byte coder: the mirror of [`Encoder`](crate::impls::Encoder),
/// consuming characters and producing raw bytes.
///
/// Dereferences to the underlying [`Coder`] for low-level, chunked
/// conversion.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct Decoder<L: CodingLoop<In = char, Out = u8>> {
    coder: Coder<L>,
}

impl<L: CodingLoop<In = char, Out = u8>> Decoder<L> {
    #[must_use]
    pub fn new(coder: Coder<L>) -> Self {
        Self { coder }
    }

    /// Convert a whole string to its byte representation.
    ///
    /// On success the underlying coder is reset, ready for another
    /// independent conversion.
    pub fn decode(&mut self, text: &str) -> Result<Vec<u8>, CoderError> {
        let chars: Vec<char> = text.chars().collect();
        let mut input = CharBuf::from_slice(&chars);
        let output = self.coder.code(&mut input)?;
        Ok(output.as_slice().into())
    }

    /// Consume the wrapper and return the underlying [`Coder`].
    #[must_use]
    pub fn into_inner(self) -> Coder<L> {
        self.coder
    }
}

impl<L: CodingLoop<In = char, Out = u8>> Deref for Decoder<L> {
    type Target = Coder<L>;

    fn deref(&self) -> &Self::Target {
        &self.coder
    }
}

impl<L: CodingLoop<In = char, Out = u8>> DerefMut for Decoder<L> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.coder
    }
}
