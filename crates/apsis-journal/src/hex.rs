//! Hexadecimal encode/decode for journal text lines.
//!
//! Encoding always produces uppercase digits; decoding accepts either
//! case. Both directions are table-driven and support in-place
//! operation on a single buffer, which keeps record framing
//! allocation-free on the hot path: encoding walks back-to-front so
//! the expanded digits never overwrite bytes not yet read, and
//! decoding walks front-to-back for the same reason.

use crate::error::JournalError;

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Marker in [`DECODE`] for bytes that are not hexadecimal digits.
const INVALID: u8 = 0xFF;

/// Uppercase two-digit expansion of every byte value.
const ENCODE: [[u8; 2]; 256] = {
    let mut table = [[0u8; 2]; 256];
    let mut b = 0usize;
    while b < 256 {
        table[b] = [DIGITS[b >> 4], DIGITS[b & 0x0F]];
        b += 1;
    }
    table
};

/// Digit value of every byte, with [`INVALID`] for non-digits.
/// Both `A..=F` and `a..=f` map to `10..=15`.
const DECODE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut v = 0u8;
    while v < 10 {
        table[(b'0' + v) as usize] = v;
        v += 1;
    }
    let mut v = 0u8;
    while v < 6 {
        table[(b'A' + v) as usize] = 10 + v;
        table[(b'a' + v) as usize] = 10 + v;
        v += 1;
    }
    table
};

/// Encode `bytes` as an uppercase hexadecimal string.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        let [hi, lo] = ENCODE[b as usize];
        out.push(hi as char);
        out.push(lo as char);
    }
    out
}

/// Encode the first `len` bytes of `buffer` in place.
///
/// On return `buffer[..2 * len]` holds the uppercase digits. The
/// expansion runs back-to-front, so each source byte is read before
/// its slot is overwritten even though input and output share storage.
///
/// # Panics
///
/// Panics if `buffer.len() < 2 * len`.
pub fn encode_in_place(buffer: &mut [u8], len: usize) {
    assert!(
        buffer.len() >= 2 * len,
        "encode_in_place needs {} bytes of room, buffer has {}",
        2 * len,
        buffer.len()
    );
    for i in (0..len).rev() {
        let [hi, lo] = ENCODE[buffer[i] as usize];
        buffer[2 * i] = hi;
        buffer[2 * i + 1] = lo;
    }
}

/// Decode a hexadecimal string into bytes.
///
/// Accepts both uppercase and lowercase digits. If `digits` has odd
/// length the trailing digit is ignored, matching the journal's
/// byte-pair framing.
pub fn decode(digits: &[u8]) -> Result<Vec<u8>, JournalError> {
    let mut out = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        out.push(decode_pair(pair[0], pair[1])?);
    }
    Ok(out)
}

/// Decode hexadecimal digits in place, returning the decoded length.
///
/// On success `buffer[..returned]` holds the decoded bytes. The
/// contraction runs front-to-back, so each digit pair is read before
/// its slot is overwritten. A trailing odd digit is ignored.
pub fn decode_in_place(buffer: &mut [u8]) -> Result<usize, JournalError> {
    let pairs = buffer.len() / 2;
    for i in 0..pairs {
        buffer[i] = decode_pair(buffer[2 * i], buffer[2 * i + 1])?;
    }
    Ok(pairs)
}

fn decode_pair(hi: u8, lo: u8) -> Result<u8, JournalError> {
    let h = DECODE[hi as usize];
    if h == INVALID {
        return Err(JournalError::InvalidHexDigit { digit: hi });
    }
    let l = DECODE[lo as usize];
    if l == INVALID {
        return Err(JournalError::InvalidHexDigit { digit: lo });
    }
    Ok((h << 4) | l)
}
