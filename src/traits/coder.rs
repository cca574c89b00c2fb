/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

#[cfg(feature = "alloc")]
use crate::buf::CoderBuf;

/// The outcome of a well-behaved conversion step.
///
/// Every low-level conversion call resolves to exactly one of these two
/// values or to an error: there is no silent partial success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoderResult {
    /// The input buffer ran out first: more input is wanted, or there is
    /// nothing more to produce right now. Not an error.
    Underflow,
    /// The output buffer ran out first: the caller must provide more output
    /// space and retry. Not an error.
    Overflow,
}

/// The five lifecycle phases a [`Coder`](crate::impls::Coder) passes through.
///
/// A coder advances monotonically through
/// `Config → Reset → Coding → End → Flushed` within a single conversion
/// cycle; a successful whole-buffer conversion then re-arms it to `Reset`.
/// Configuration is permitted only before or between conversions
/// (`Config`/`Reset`), and flushing only once end of input has been
/// signaled (`End`/`Flushed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CodingState {
    /// Freshly constructed or reconfigured; nothing has run yet.
    Config,
    /// Ready to start a conversion.
    Reset,
    /// Mid-conversion; more input may follow.
    Coding,
    /// End of input has been signaled.
    End,
    /// Flushed; only a no-op flush or a reset is legal.
    Flushed,
}

impl core::fmt::Display for CodingState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            CodingState::Config => "Config",
            CodingState::Reset => "Reset",
            CodingState::Coding => "Coding",
            CodingState::End => "End",
            CodingState::Flushed => "Flushed",
        })
    }
}

/// Replacement of [`std::io::Error`] for the raw buffer primitives.
///
/// These are raised by [`CoderBuf`](crate::buf::CoderBuf) when a cursor is
/// moved past its limit. A coding loop letting one of these escape is a
/// bookkeeping bug, not bad input data, and the engine reports it as a
/// [`Malfunction`](crate::impls::CoderError::Malfunction).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufError {
    /// A read was attempted past the buffer limit.
    Underflow,
    /// A write was attempted past the buffer limit.
    Overflow,
}

impl core::error::Error for BufError {}
impl core::fmt::Display for BufError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BufError::Underflow => write!(f, "Read past the buffer limit"),
            BufError::Overflow => write!(f, "Write past the buffer limit"),
        }
    }
}

/// The errors a [`CodingLoop`] may raise.
///
/// The data-level variants describe properties of the input, and the engine
/// hands them to the caller for a content-level decision; [`Buf`](LoopError::Buf)
/// wraps a raw buffer fault escaping the loop, which the engine upgrades to
/// a fatal malfunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopError {
    /// The input contains a unit sequence that cannot be validly transcoded.
    /// Carries the length of the offending prefix, which is left unconsumed.
    MalformedInput { len: usize },
    /// The input is well formed but has no representation in the target
    /// form. Carries the length of the unrepresentable prefix, which is
    /// left unconsumed.
    UnmappableOutput { len: usize },
    /// A buffer primitive signaled under/overflow inside the loop itself.
    Buf(BufError),
}

impl From<BufError> for LoopError {
    fn from(e: BufError) -> Self {
        LoopError::Buf(e)
    }
}

impl core::error::Error for LoopError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            LoopError::Buf(e) => Some(e),
            _ => None,
        }
    }
}

impl core::fmt::Display for LoopError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoopError::MalformedInput { len } => {
                write!(f, "Malformed input of length {}", len)
            }
            LoopError::UnmappableOutput { len } => {
                write!(f, "Unmappable input of length {}", len)
            }
            LoopError::Buf(e) => write!(f, "Buffer fault in coding loop: {}", e),
        }
    }
}

/// The per-unit transcoding rule driven by a [`Coder`](crate::impls::Coder).
///
/// This is the strategy side of the engine: the coder owns the lifecycle,
/// the sizing ratios, and the growth machinery, and delegates the actual
/// arithmetic to an implementation of this trait. Only
/// [`coding_loop`](CodingLoop::coding_loop) is mandatory; the remaining
/// hooks default to no-ops.
///
/// # Contract
///
/// [`coding_loop`](CodingLoop::coding_loop) must consume as much of `input`
/// as possible, producing into `output`, and return
/// [`Overflow`](CoderResult::Overflow) if output space ran out first or
/// [`Underflow`](CoderResult::Underflow) if input ran out first (including
/// a trailing partial unit sequence that needs more input to resolve).
/// On a data error the loop must leave the offending units unconsumed and
/// the cursors otherwise consistent, so the caller can inspect the exact
/// error position.
#[cfg(feature = "alloc")]
pub trait CodingLoop {
    /// The input unit type.
    type In: Copy + Default;
    /// The output unit type.
    type Out: Copy + Default;

    /// Transcode as many units as the two buffers allow.
    fn coding_loop(
        &mut self,
        input: &mut CoderBuf<Self::In>,
        output: &mut CoderBuf<Self::Out>,
        end_of_input: bool,
    ) -> Result<CoderResult, LoopError>;

    /// One-time lazy initialization, run on first use after construction
    /// or reconfiguration.
    fn init(&mut self) {}

    /// Reset loop-internal conversion state (pending units, counters).
    fn reset_loop(&mut self) {}

    /// Emit any pending output at end of conversion.
    ///
    /// The default reports [`Underflow`](CoderResult::Underflow), meaning
    /// there is nothing to flush.
    fn flush_loop(
        &mut self,
        _output: &mut CoderBuf<Self::Out>,
    ) -> Result<CoderResult, LoopError> {
        Ok(CoderResult::Underflow)
    }

    /// Copy loop-specific configuration from another instance.
    ///
    /// Only tunables may be copied, never mutable conversion state.
    fn configure_from(&mut self, _other: &Self) {}
}
