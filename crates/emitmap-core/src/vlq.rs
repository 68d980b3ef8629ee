//! Base64 variable-length quantities
//!
//! Each signed value is folded so the sign sits in the lowest bit, then
//! written five bits at a time, least significant group first. Bit 6 of
//! every digit except the last is the continuation flag.

use crate::error::{Result, SourceMapError};

const BASE64_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const VLQ_BASE_SHIFT: u32 = 5;
const VLQ_BASE_MASK: u64 = (1 << VLQ_BASE_SHIFT) - 1;
const VLQ_CONTINUATION_BIT: u64 = 1 << VLQ_BASE_SHIFT;

/// Append the VLQ digits for `value` to `out`
///
/// Zero still produces one digit (`A`).
pub fn encode(value: i64, out: &mut String) {
    let mut vlq = to_vlq_signed(value);
    loop {
        let mut digit = vlq & VLQ_BASE_MASK;
        vlq >>= VLQ_BASE_SHIFT;
        if vlq > 0 {
            digit |= VLQ_CONTINUATION_BIT;
        }
        out.push(BASE64_CHARS[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}

/// Decode one VLQ value from the front of `input`
///
/// Returns the value and the number of bytes consumed. `position` is only
/// used to report where in the whole mappings string a failure happened.
pub fn decode(input: &[u8], position: usize) -> Result<(i64, usize)> {
    let mut vlq: u64 = 0;
    let mut shift = 0u32;

    for (consumed, &byte) in input.iter().enumerate() {
        let digit = base64_value(byte).ok_or_else(|| {
            SourceMapError::decode(
                position + consumed,
                format!("invalid base64 digit {:?}", byte as char),
            )
        })?;

        let bits = digit & VLQ_BASE_MASK;
        // The last group (shift 60) only has room for 4 bits
        if shift >= 64 || (bits << shift) >> shift != bits {
            return Err(SourceMapError::decode(position, "VLQ value overflows 64 bits"));
        }
        vlq |= bits << shift;

        if digit & VLQ_CONTINUATION_BIT == 0 {
            return Ok((from_vlq_signed(vlq), consumed + 1));
        }
        shift += VLQ_BASE_SHIFT;
    }

    Err(SourceMapError::decode(
        position + input.len(),
        "unterminated VLQ value",
    ))
}

fn to_vlq_signed(value: i64) -> u64 {
    let magnitude = value.unsigned_abs();
    if value < 0 {
        (magnitude << 1) | 1
    } else {
        magnitude << 1
    }
}

fn from_vlq_signed(vlq: u64) -> i64 {
    let magnitude = (vlq >> 1) as i64;
    if vlq & 1 == 1 { -magnitude } else { magnitude }
}

fn base64_value(byte: u8) -> Option<u64> {
    let value = match byte {
        b'A'..=b'Z' => byte - b'A',
        b'a'..=b'z' => byte - b'a' + 26,
        b'0'..=b'9' => byte - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => return None,
    };
    Some(u64::from(value))
}
