//! Base64 encode and decode with automatic padding repair.
//!
//! Base64 is encoding, not encryption; it is included because ciphertext is
//! often shuttled around in this form. Decoding tolerates input whose `=`
//! padding was stripped in transit by repairing it to a multiple of four
//! characters first.

use crate::error::{Error, Result};

const BASE64_CHARS: &[u8] =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/".as_bytes();

pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let group = (chunk[0] as u32) << 16
            | (chunk.get(1).copied().unwrap_or(0) as u32) << 8
            | chunk.get(2).copied().unwrap_or(0) as u32;
        out.push(BASE64_CHARS[(group >> 18) as usize & 0x3f] as char);
        out.push(BASE64_CHARS[(group >> 12) as usize & 0x3f] as char);
        out.push(if chunk.len() > 1 {
            BASE64_CHARS[(group >> 6) as usize & 0x3f] as char
        } else {
            '='
        });
        out.push(if chunk.len() > 2 {
            BASE64_CHARS[group as usize & 0x3f] as char
        } else {
            '='
        });
    }
    out
}

pub fn decode(s: &str) -> Result<Vec<u8>> {
    let repaired = repair_padding(s.trim());
    let payload = repaired.trim_end_matches('=');

    let mut out = Vec::with_capacity(payload.len() * 3 / 4);
    let mut acc = 0u32;
    let mut bits = 0u32;
    for c in payload.chars() {
        acc = acc << 6 | u32::from(char_index(c)?);
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
        }
    }
    Ok(out)
}

/// Append `=` until the length is a multiple of four. Input that already has
/// full padding is returned unchanged.
pub fn repair_padding(s: &str) -> String {
    let mut repaired = s.to_string();
    while repaired.len() % 4 != 0 {
        repaired.push('=');
    }
    repaired
}

fn char_index(c: char) -> Result<u8> {
    match c {
        'A'..='Z' => Ok(c as u8 - b'A'),
        'a'..='z' => Ok(c as u8 - b'a' + 26),
        '0'..='9' => Ok(c as u8 - b'0' + 52),
        '+' => Ok(62),
        '/' => Ok(63),
        _ => Err(Error::InvalidInput(format!("unknown base64 char '{c}'"))),
    }
}
