/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Fixed-capacity sequential buffers with position/limit cursors.

A [`CoderBuf`] is the unit of exchange between a
[`Coder`](crate::impls::Coder) and its caller: the engine only reads from
input buffers and writes into output buffers, and ownership never
transfers. The same type serves both roles, monomorphized to the unit
type ([`ByteBuf`] and [`CharBuf`] are the two instantiations the shipped
coders use).

A buffer is either in write mode (`position` is the write cursor, `limit`
is the capacity) or, after [`flip`](CoderBuf::flip), in read mode
(`position` is the read cursor, `limit` marks the end of valid data).

*/

use alloc::boxed::Box;
use alloc::vec;

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::traits::BufError;

/// A fixed-capacity sequential container with a cursor and a limit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct CoderBuf<T> {
    data: Box<[T]>,
    pos: usize,
    limit: usize,
}

/// A buffer of raw bytes.
pub type ByteBuf = CoderBuf<u8>;
/// A buffer of Unicode scalar values.
pub type CharBuf = CoderBuf<char>;

impl<T: Copy + Default> CoderBuf<T> {
    /// Allocate a buffer of the given capacity, in write mode.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![T::default(); capacity].into_boxed_slice(),
            pos: 0,
            limit: capacity,
        }
    }

    /// Copy a slice into a new buffer, in read mode.
    #[must_use]
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            limit: data.len(),
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The number of units between the cursor and the limit.
    #[inline(always)]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    #[inline(always)]
    #[must_use]
    pub fn has_remaining(&self) -> bool {
        self.pos < self.limit
    }

    /// Move the cursor, which must not pass the limit.
    #[inline]
    pub fn set_position(&mut self, pos: usize) -> Result<(), BufError> {
        if pos > self.limit {
            return Err(BufError::Overflow);
        }
        self.pos = pos;
        Ok(())
    }

    /// Read the unit at the cursor without advancing.
    #[inline(always)]
    pub fn peek(&self) -> Result<T, BufError> {
        if self.pos >= self.limit {
            return Err(BufError::Underflow);
        }
        Ok(self.data[self.pos])
    }

    /// Read the unit at the cursor and advance.
    #[inline(always)]
    pub fn get(&mut self) -> Result<T, BufError> {
        if self.pos >= self.limit {
            return Err(BufError::Underflow);
        }
        let res = self.data[self.pos];
        self.pos += 1;
        Ok(res)
    }

    /// Write a unit at the cursor and advance.
    #[inline(always)]
    pub fn put(&mut self, unit: T) -> Result<(), BufError> {
        if self.pos >= self.limit {
            return Err(BufError::Overflow);
        }
        self.data[self.pos] = unit;
        self.pos += 1;
        Ok(())
    }

    /// Append a whole slice, which must fit in the remaining space.
    pub fn put_slice(&mut self, units: &[T]) -> Result<(), BufError> {
        if units.len() > self.remaining() {
            return Err(BufError::Overflow);
        }
        self.data[self.pos..self.pos + units.len()].copy_from_slice(units);
        self.pos += units.len();
        Ok(())
    }

    /// Switch from write mode to read mode: the limit moves to the cursor
    /// and the cursor returns to the start.
    pub fn flip(&mut self) -> &mut Self {
        self.limit = self.pos;
        self.pos = 0;
        self
    }

    /// Reset to write mode over the whole capacity. The content is not
    /// erased, just forgotten.
    pub fn clear(&mut self) -> &mut Self {
        self.pos = 0;
        self.limit = self.data.len();
        self
    }

    /// The units between the cursor and the limit.
    ///
    /// On a [flipped](CoderBuf::flip) buffer this is the whole readable
    /// content.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data[self.pos..self.limit]
    }
}
