/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::charsets::Utf8ByteToChar;
use crate::impls::{Coder, CoderError};
use crate::prelude::*;
use alloc::vec::Vec;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug, Clone)]
pub struct FuzzCase {
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug, Clone)]
enum RandomCommand {
    Code {
        bytes: Vec<u8>,
        end_of_input: bool,
        output_capacity: u8,
    },
    Flush {
        output_capacity: u8,
    },
    Reset,
    Configure,
    Duplicate,
    CodeAll {
        bytes: Vec<u8>,
    },
}

/// Drive a UTF-8 byte→char coder through an arbitrary operation sequence.
///
/// Whatever the sequence, the only errors that may surface are the
/// documented ones: a coder malfunction is a bug in the engine or in the
/// loop's bookkeeping and makes the harness panic.
pub fn harness(data: FuzzCase) {
    let template = Coder::new(Utf8ByteToChar, 1.0, 1.0, 1.0);
    let mut coder = template.duplicate();
    for command in data.commands {
        match command {
            RandomCommand::Code {
                bytes,
                end_of_input,
                output_capacity,
            } => {
                let mut input = ByteBuf::from_slice(&bytes);
                let mut output = CharBuf::with_capacity(output_capacity as usize);
                match coder.code_into(&mut input, &mut output, end_of_input) {
                    Ok(_) => {
                        assert!(matches!(
                            coder.state(),
                            CodingState::Coding | CodingState::End
                        ));
                    }
                    Err(CoderError::Malfunction(e)) => {
                        panic!("coder malfunction: {}", e)
                    }
                    Err(_) => {}
                }
            }
            RandomCommand::Flush { output_capacity } => {
                let mut output = CharBuf::with_capacity(output_capacity as usize);
                match coder.flush_into(&mut output) {
                    Ok(_) => assert_eq!(coder.state(), CodingState::Flushed),
                    Err(CoderError::Malfunction(e)) => {
                        panic!("coder malfunction: {}", e)
                    }
                    Err(_) => {}
                }
            }
            RandomCommand::Reset => {
                coder.reset();
                assert_eq!(coder.state(), CodingState::Reset);
            }
            RandomCommand::Configure => {
                if coder.configure_from(&template).is_ok() {
                    assert_eq!(coder.state(), CodingState::Config);
                }
            }
            RandomCommand::Duplicate => {
                let copy = coder.duplicate();
                assert_eq!(copy.state(), CodingState::Config);
                coder = copy;
            }
            RandomCommand::CodeAll { bytes } => {
                let mut input = ByteBuf::from_slice(&bytes);
                match coder.code(&mut input) {
                    Ok(output) => {
                        // A successful whole-buffer conversion re-arms the
                        // coder and consumes the input exactly.
                        assert_eq!(coder.state(), CodingState::Reset);
                        assert!(!input.has_remaining());
                        assert_eq!(
                            output.as_slice().iter().collect::<alloc::string::String>(),
                            core::str::from_utf8(&bytes).unwrap()
                        );
                    }
                    Err(CoderError::Malfunction(e)) => {
                        panic!("coder malfunction: {}", e)
                    }
                    Err(_) => {
                        // A data or state error may leave the coder
                        // mid-cycle; re-arm it like a caller would.
                        coder.reset();
                    }
                }
            }
        }
    }
}
