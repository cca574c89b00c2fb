/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::buf::CoderBuf;
use crate::traits::{BufError, CoderResult, CodingLoop, CodingState, LoopError};

/// The errors a [`Coder`] may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoderError {
    /// An operation was invoked from a lifecycle state that forbids it.
    /// Always a caller bug; the instance should be discarded or reset.
    IllegalState {
        op: &'static str,
        state: CodingState,
    },
    /// End of input was reached with unconsumed or invalid input data.
    /// Carries the length of the offending prefix.
    MalformedInput { len: usize },
    /// The input has no representation in the target form. Carries the
    /// length of the unrepresentable prefix.
    UnmappableOutput { len: usize },
    /// A buffer primitive signaled under/overflow during the transcoding
    /// loop itself. This is a bug in the loop's bookkeeping, not bad input
    /// data: it is fatal and never retried.
    Malfunction(BufError),
}

impl From<LoopError> for CoderError {
    fn from(e: LoopError) -> Self {
        match e {
            LoopError::MalformedInput { len } => CoderError::MalformedInput { len },
            LoopError::UnmappableOutput { len } => CoderError::UnmappableOutput { len },
            LoopError::Buf(e) => CoderError::Malfunction(e),
        }
    }
}

impl core::error::Error for CoderError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            CoderError::Malfunction(e) => Some(e),
            _ => None,
        }
    }
}

impl core::fmt::Display for CoderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoderError::IllegalState { op, state } => {
                write!(f, "Illegal call to {} in state {}", op, state)
            }
            CoderError::MalformedInput { len } => {
                write!(f, "Malformed input of length {}", len)
            }
            CoderError::UnmappableOutput { len } => {
                write!(f, "Unmappable input of length {}", len)
            }
            CoderError::Malfunction(e) => write!(f, "Coder malfunction: {}", e),
        }
    }
}

/// The generic buffered two-phase conversion engine.
///
/// A `Coder` drives a [`CodingLoop`] through the lifecycle described by
/// [`CodingState`], managing incremental output-buffer growth and the
/// flush/reset protocol. It is single-owner mutable state: one logical
/// conversion session owns the instance exclusively, and no internal
/// buffer is ever aliased between instances.
///
/// The three sizing ratios describe the expected size relationship between
/// input and output units for the bound loop, and are used to pre-size
/// output buffers; they are fixed at construction and only change when the
/// coder is [configured](Coder::configure_from) from another instance.
///
/// # Example
/// ```
/// use charcoder::prelude::*;
///
/// let mut coder = Coder::new(AsciiByteToChar, 1.0, 1.0, 1.0);
/// let mut input = ByteBuf::from_slice(b"hello");
/// let output = coder.code(&mut input)?;
/// assert_eq!(output.as_slice().iter().collect::<String>(), "hello");
/// # Ok::<(), CoderError>(())
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct Coder<L: CodingLoop> {
    coding_loop: L,
    state: CodingState,
    min_input_per_output: f32,
    average_output_per_input: f32,
    max_output_per_input: f32,
}

/// `ceil(n * ratio)` without `std` floating-point intrinsics.
#[inline]
fn ceil_mul(n: usize, ratio: f32) -> usize {
    let exact = n as f32 * ratio;
    let trunc = exact as usize;
    if (trunc as f32) < exact { trunc + 1 } else { trunc }
}

impl<L: CodingLoop> Coder<L> {
    /// Create a new `Coder` around a [`CodingLoop`] with the given sizing
    /// ratios.
    ///
    /// Concrete loops come with natural ratios; see the constructors in
    /// [`charsets`](crate::charsets).
    #[must_use]
    pub fn new(
        coding_loop: L,
        min_input_per_output: f32,
        average_output_per_input: f32,
        max_output_per_input: f32,
    ) -> Self {
        debug_assert!(min_input_per_output > 0.0);
        debug_assert!(average_output_per_input >= 0.0);
        debug_assert!(max_output_per_input >= average_output_per_input);
        Self {
            coding_loop,
            state: CodingState::Config,
            min_input_per_output,
            average_output_per_input,
            max_output_per_input,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn state(&self) -> CodingState {
        self.state
    }

    /// The minimum number of input units needed to produce one output unit.
    #[inline(always)]
    #[must_use]
    pub fn min_input_per_output(&self) -> f32 {
        self.min_input_per_output
    }

    /// The average number of output units produced per input unit, used to
    /// pre-size output buffers.
    #[inline(always)]
    #[must_use]
    pub fn average_output_per_input(&self) -> f32 {
        self.average_output_per_input
    }

    /// The maximum number of output units one input unit can produce.
    #[inline(always)]
    #[must_use]
    pub fn max_output_per_input(&self) -> f32 {
        self.max_output_per_input
    }

    /// A shared reference to the bound coding loop.
    #[must_use]
    pub fn coding_loop(&self) -> &L {
        &self.coding_loop
    }

    /// Consume the coder and return the bound coding loop.
    #[must_use]
    pub fn into_coding_loop(self) -> L {
        self.coding_loop
    }

    /// Copy the configuration of `other` into this coder.
    ///
    /// Legal only from [`Config`](CodingState::Config) or
    /// [`Reset`](CodingState::Reset); configuring always forces the state
    /// back to `Config`, so the next [`reset`](Coder::reset) or conversion
    /// re-runs lazy initialization. The sizing ratios and the loop's own
    /// tunables (via [`CodingLoop::configure_from`]) are copied; mutable
    /// conversion state is not.
    ///
    /// Returns `&mut Self` for chaining.
    pub fn configure_from(&mut self, other: &Self) -> Result<&mut Self, CoderError> {
        match self.state {
            CodingState::Config | CodingState::Reset => {}
            state => {
                return Err(CoderError::IllegalState {
                    op: "configure_from",
                    state,
                });
            }
        }
        self.state = CodingState::Config;
        self.min_input_per_output = other.min_input_per_output;
        self.average_output_per_input = other.average_output_per_input;
        self.max_output_per_input = other.max_output_per_input;
        self.coding_loop.configure_from(&other.coding_loop);
        Ok(self)
    }

    /// Create an independent copy of this coder, ready for a new
    /// conversion.
    ///
    /// The copy starts in [`Config`](CodingState::Config) regardless of
    /// this coder's current state, and is then configured from `self` so
    /// loop-specific tunables propagate.
    #[must_use]
    pub fn duplicate(&self) -> Self
    where
        L: Clone,
    {
        let mut copy = Self {
            coding_loop: self.coding_loop.clone(),
            state: CodingState::Config,
            min_input_per_output: self.min_input_per_output,
            average_output_per_input: self.average_output_per_input,
            max_output_per_input: self.max_output_per_input,
        };
        copy.coding_loop.configure_from(&self.coding_loop);
        copy
    }

    /// Reset the coder, preparing it for a new conversion.
    ///
    /// Runs the loop's [`reset_loop`](CodingLoop::reset_loop) hook; if the
    /// state prior to the reset was [`Config`](CodingState::Config), the
    /// one-time [`init`](CodingLoop::init) hook runs as well. Always
    /// succeeds.
    pub fn reset(&mut self) -> &mut Self {
        let was_config = matches!(self.state, CodingState::Config);
        self.coding_loop.reset_loop();
        if was_config {
            self.coding_loop.init();
        }
        self.state = CodingState::Reset;
        self
    }

    /// Low-level, stateful conversion step. No growth: the caller owns
    /// both buffers.
    ///
    /// The caller must eventually call this with `end_of_input = true` to
    /// signal the true end of the logical input stream; repeating the end
    /// signal from [`End`](CodingState::End) is legal and idempotent. Any
    /// other state mismatch is an
    /// [`IllegalState`](CoderError::IllegalState).
    ///
    /// Returns [`Underflow`](CoderResult::Underflow) when the input ran
    /// out first and [`Overflow`](CoderResult::Overflow) when the output
    /// ran out first. An `Underflow` on a final call that leaves input
    /// unconsumed is reclassified as
    /// [`MalformedInput`](CoderError::MalformedInput) carrying the
    /// remaining length: end of input must consume everything or error.
    pub fn code_into(
        &mut self,
        input: &mut CoderBuf<L::In>,
        output: &mut CoderBuf<L::Out>,
        end_of_input: bool,
    ) -> Result<CoderResult, CoderError> {
        match (self.state, end_of_input) {
            (CodingState::Config, _) => self.coding_loop.init(),
            (CodingState::Reset | CodingState::Coding, _) => {}
            (CodingState::End, true) => {}
            (state, _) => {
                return Err(CoderError::IllegalState {
                    op: "code_into",
                    state,
                });
            }
        }
        self.state = if end_of_input {
            CodingState::End
        } else {
            CodingState::Coding
        };

        #[cfg(feature = "checks")]
        let cursors = (input.position(), output.position());

        let result = self
            .coding_loop
            .coding_loop(input, output, end_of_input)
            .map_err(CoderError::from)?;

        #[cfg(feature = "checks")]
        if input.position() < cursors.0 || output.position() < cursors.1 {
            return Err(CoderError::Malfunction(BufError::Underflow));
        }

        if end_of_input && result == CoderResult::Underflow && input.has_remaining() {
            return Err(CoderError::MalformedInput {
                len: input.remaining(),
            });
        }
        Ok(result)
    }

    /// Flush any pending output after end of input.
    ///
    /// Legal from [`End`](CodingState::End), moving to `Flushed` once the
    /// loop reports [`Underflow`](CoderResult::Underflow) (an
    /// [`Overflow`](CoderResult::Overflow) keeps the state at `End` so the
    /// flush can be retried with more output space), and from
    /// [`Flushed`](CodingState::Flushed), where it is a no-op reporting
    /// `Underflow`.
    pub fn flush_into(
        &mut self,
        output: &mut CoderBuf<L::Out>,
    ) -> Result<CoderResult, CoderError> {
        match self.state {
            CodingState::End => {
                let result = self
                    .coding_loop
                    .flush_loop(output)
                    .map_err(CoderError::from);
                // An Overflow leaves the state at End so the flush can be
                // retried with a grown buffer.
                if result == Ok(CoderResult::Underflow) {
                    self.state = CodingState::Flushed;
                }
                result
            }
            CodingState::Flushed => Ok(CoderResult::Underflow),
            state => Err(CoderError::IllegalState {
                op: "flush_into",
                state,
            }),
        }
    }

    /// Whole-buffer convenience conversion with transparent output growth.
    ///
    /// The output buffer is pre-sized to
    /// `ceil(input.remaining() * average_output_per_input)` and doubled
    /// (`(capacity << 1) | 1`, so growth happens even from zero) on every
    /// [`Overflow`](CoderResult::Overflow), copying the units already
    /// produced; the strictly increasing capacity bounds the number of
    /// retries. Data errors abort immediately and are returned to the
    /// caller.
    ///
    /// On success the coder is [reset](Coder::reset), ready for another
    /// independent conversion, and the output buffer is returned
    /// [flipped](CoderBuf::flip) for reading. A zero-length input yields a
    /// zero-length output, with the reset still performed.
    pub fn code(
        &mut self,
        input: &mut CoderBuf<L::In>,
    ) -> Result<CoderBuf<L::Out>, CoderError> {
        let mut output: CoderBuf<L::Out> =
            CoderBuf::with_capacity(ceil_mul(input.remaining(), self.average_output_per_input));
        loop {
            // The end signal must be sent at least once, even for empty
            // input, or the flush below would be illegal.
            let pending_end = !matches!(self.state, CodingState::End | CodingState::Flushed);
            let result = if input.has_remaining() || pending_end {
                self.code_into(input, &mut output, true)?
            } else {
                CoderResult::Underflow
            };
            let result = match result {
                CoderResult::Underflow => self.flush_into(&mut output)?,
                result => result,
            };
            match result {
                CoderResult::Underflow => break,
                CoderResult::Overflow => {
                    let mut bigger = CoderBuf::with_capacity((output.capacity() << 1) | 1);
                    output.flip();
                    bigger
                        .put_slice(output.as_slice())
                        .map_err(CoderError::Malfunction)?;
                    output = bigger;
                }
            }
        }
        self.reset();
        output.flip();
        Ok(output)
    }
}
