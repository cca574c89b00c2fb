/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::buf::CoderBuf;
use crate::traits::{CoderResult, CodingLoop, LoopError};

/// Wrapping struct that keeps track of the units moved through a
/// [`CodingLoop`]. Optionally, prints to standard error information about
/// methods called.
#[derive(Debug, Clone, Default)]
pub struct CountCodingLoop<L: CodingLoop, const PRINT: bool = false> {
    coding_loop: L,
    /// The number of input units consumed so far by the underlying loop.
    pub units_consumed: usize,
    /// The number of output units produced so far by the underlying loop.
    pub units_produced: usize,
    /// The number of calls to [`coding_loop`](CodingLoop::coding_loop).
    pub calls: usize,
}

impl<L: CodingLoop, const PRINT: bool> CountCodingLoop<L, PRINT> {
    pub fn new(coding_loop: L) -> Self {
        Self {
            coding_loop,
            units_consumed: 0,
            units_produced: 0,
            calls: 0,
        }
    }
}

impl<L: CodingLoop, const PRINT: bool> CodingLoop for CountCodingLoop<L, PRINT> {
    type In = L::In;
    type Out = L::Out;

    fn coding_loop(
        &mut self,
        input: &mut CoderBuf<Self::In>,
        output: &mut CoderBuf<Self::Out>,
        end_of_input: bool,
    ) -> Result<CoderResult, LoopError> {
        let in_before = input.position();
        let out_before = output.position();
        let result = self.coding_loop.coding_loop(input, output, end_of_input);
        self.units_consumed += input.position() - in_before;
        self.units_produced += output.position() - out_before;
        self.calls += 1;
        if PRINT {
            eprintln!(
                "coding_loop(end_of_input = {}) = {:?} (consumed = {}, produced = {})",
                end_of_input, result, self.units_consumed, self.units_produced
            );
        }
        result
    }

    fn init(&mut self) {
        if PRINT {
            eprintln!("init()");
        }
        self.coding_loop.init();
    }

    fn reset_loop(&mut self) {
        if PRINT {
            eprintln!("reset_loop()");
        }
        self.coding_loop.reset_loop();
    }

    fn flush_loop(
        &mut self,
        output: &mut CoderBuf<Self::Out>,
    ) -> Result<CoderResult, LoopError> {
        let out_before = output.position();
        let result = self.coding_loop.flush_loop(output);
        self.units_produced += output.position() - out_before;
        if PRINT {
            eprintln!(
                "flush_loop() = {:?} (produced = {})",
                result, self.units_produced
            );
        }
        result
    }

    fn configure_from(&mut self, other: &Self) {
        self.coding_loop.configure_from(&other.coding_loop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charsets::Utf8ByteToChar;
    use crate::impls::Coder;
    use crate::prelude::ByteBuf;

    #[test]
    fn test_count() -> Result<(), anyhow::Error> {
        let mut coder: Coder<CountCodingLoop<Utf8ByteToChar>> =
            Coder::new(CountCodingLoop::new(Utf8ByteToChar), 1.0, 1.0, 1.0);
        let mut input = ByteBuf::from_slice("ma così".as_bytes());
        let output = coder.code(&mut input)?;
        assert_eq!(output.remaining(), 7);
        assert_eq!(coder.coding_loop().units_consumed, 8);
        assert_eq!(coder.coding_loop().units_produced, 7);
        assert!(coder.coding_loop().calls >= 1);
        Ok(())
    }
}
