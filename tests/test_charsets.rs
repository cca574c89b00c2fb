/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use charcoder::prelude::*;
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};
use std::error::Error;

#[test]
fn test_ascii() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let mut encoder = ascii_encoder();
    let mut decoder = ascii_decoder();

    let text = encoder.encode(b"plain old text")?;
    assert_eq!(text, "plain old text");
    assert_eq!(decoder.decode(&text)?, b"plain old text");

    // A high byte is malformed input, not unmappable.
    assert_eq!(
        encoder.encode(&[b'a', 0xE8]),
        Err(CoderError::MalformedInput { len: 1 })
    );
    // A high character cannot be represented.
    encoder.reset();
    assert_eq!(
        decoder.decode("caffè"),
        Err(CoderError::UnmappableOutput { len: 1 })
    );
    Ok(())
}

#[test]
fn test_latin1() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let mut encoder = latin1_encoder();
    let mut decoder = latin1_decoder();

    // Latin-1 decoding is total: any byte sequence round-trips.
    let bytes: Vec<u8> = (0..=255).collect();
    let text = encoder.encode(&bytes)?;
    assert_eq!(text.chars().count(), 256);
    assert_eq!(decoder.decode(&text)?, bytes);

    assert_eq!(
        decoder.decode("snowman ☃"),
        Err(CoderError::UnmappableOutput { len: 1 })
    );
    Ok(())
}

#[test]
fn test_utf8_round_trip() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let mut encoder = utf8_encoder();
    let mut decoder = utf8_decoder();

    for text in ["", "ascii only", "péché", "混合, mixed, ελληνικά", "🦀🦀"] {
        let recovered = encoder.encode(text.as_bytes())?;
        assert_eq!(recovered, text);
        assert_eq!(decoder.decode(&recovered)?, text.as_bytes());
    }
    Ok(())
}

#[test]
fn test_utf8_random_round_trip() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let mut r = SmallRng::seed_from_u64(0);
    let mut encoder = utf8_encoder();
    let mut decoder = utf8_decoder();

    for _ in 0..1000 {
        let len = r.random_range(0..64);
        let text: String = (0..len)
            .map(|_| loop {
                if let Some(c) = char::from_u32(r.random_range(0..=0x10FFFF)) {
                    break c;
                }
            })
            .collect();
        let bytes = decoder.decode(&text)?;
        assert_eq!(bytes, text.as_bytes());
        assert_eq!(encoder.encode(&bytes)?, text);
    }
    Ok(())
}

#[test]
fn test_utf8_chunked_with_carry() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    // Stream a multi-byte character split across two chunks: the loop
    // leaves the partial tail unconsumed and the caller carries it over.
    let bytes = "naïve".as_bytes(); // ï is 0xC3 0xAF
    let (first, second) = bytes.split_at(3); // splits ï in half

    let mut coder = Coder::new(Utf8ByteToChar, 1.0, 1.0, 1.0);
    let mut output = CharBuf::with_capacity(8);

    let mut input = ByteBuf::from_slice(first);
    assert_eq!(
        coder.code_into(&mut input, &mut output, false)?,
        CoderResult::Underflow
    );
    assert_eq!(input.remaining(), 1, "partial sequence left unconsumed");

    // Carry the tail into the next chunk, as a streaming caller must.
    let mut carried: Vec<u8> = input.as_slice().into();
    carried.extend_from_slice(second);
    let mut input = ByteBuf::from_slice(&carried);
    assert_eq!(
        coder.code_into(&mut input, &mut output, true)?,
        CoderResult::Underflow
    );
    assert_eq!(coder.flush_into(&mut output)?, CoderResult::Underflow);

    output.flip();
    assert_eq!(output.as_slice().iter().collect::<String>(), "naïve");
    Ok(())
}

#[test]
fn test_utf8_growth_with_multibyte() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    // All four-byte characters: the decoder's average ratio of 1.1
    // undersizes the output, forcing repeated growth.
    let text: String = std::iter::repeat('𝄞').take(100).collect();
    let mut decoder = utf8_decoder();
    let bytes = decoder.decode(&text)?;
    assert_eq!(bytes.len(), 400);
    assert_eq!(bytes, text.as_bytes());
    Ok(())
}

#[test]
fn test_error_position_is_preserved() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    // On a data error the cursor stops at the offending unit, so the
    // caller can tell exactly where the problem is.
    let mut coder = Coder::new(Utf8ByteToChar, 1.0, 1.0, 1.0);
    let mut input = ByteBuf::from_slice(&[b'o', b'k', 0xC3, 0x28, b'x']);
    let mut output = CharBuf::with_capacity(8);
    assert_eq!(
        coder.code_into(&mut input, &mut output, true),
        Err(CoderError::MalformedInput { len: 1 })
    );
    assert_eq!(input.position(), 2, "cursor parked on the bad sequence");
    assert_eq!(output.position(), 2, "good prefix already produced");
    Ok(())
}
