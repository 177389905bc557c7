//! UTF-8 decoding, encoding and cursor stepping
//!
//! The decoding helpers assume well-formed input; callers holding untrusted
//! bytes must run [`validate`] first. Offsets are byte offsets.

pub use std::str::Utf8Error;

/// Number of bytes in the sequence introduced by `lead`
///
/// Continuation bytes report 1 so that stepping over malformed data still
/// makes progress.
pub const fn sequence_length(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Whether `byte` is a continuation byte (`10xxxxxx`)
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decode the codepoint at the start of `bytes`
///
/// Returns the character and the number of bytes it occupies, or `None` for
/// empty input.
pub fn decode(bytes: &[u8]) -> Option<(char, usize)> {
    let lead = *bytes.first()?;
    let len = sequence_length(lead).min(bytes.len());
    let mut code = match len {
        1 => u32::from(lead),
        2 => u32::from(lead & 0x1F),
        3 => u32::from(lead & 0x0F),
        _ => u32::from(lead & 0x07),
    };
    for &byte in &bytes[1..len] {
        code = (code << 6) | u32::from(byte & 0x3F);
    }
    Some((char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER), len))
}

/// A character encoded as UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedChar {
    bytes: [u8; 4],
    len: usize,
}

impl EncodedChar {
    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of encoded bytes
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always false; an encoded character has at least one byte
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Encode a character as UTF-8
pub fn encode(ch: char) -> EncodedChar {
    let mut bytes = [0u8; 4];
    let len = ch.encode_utf8(&mut bytes).len();
    EncodedChar { bytes, len }
}

/// Check that `bytes` are well-formed UTF-8
pub fn validate(bytes: &[u8]) -> Result<&str, Utf8Error> {
    std::str::from_utf8(bytes)
}

/// Byte offset of the character following the one at `offset`
///
/// Clamped to `bytes.len()`.
pub fn next_boundary(bytes: &[u8], offset: usize) -> usize {
    match bytes.get(offset) {
        Some(&lead) => (offset + sequence_length(lead)).min(bytes.len()),
        None => bytes.len(),
    }
}

/// Byte offset of the character preceding `offset`
///
/// Returns 0 at the start of the buffer.
pub fn prev_boundary(bytes: &[u8], offset: usize) -> usize {
    let mut offset = offset.min(bytes.len());
    while offset > 0 {
        offset -= 1;
        if !is_continuation(bytes[offset]) {
            break;
        }
    }
    offset
}

/// Largest char boundary not greater than `offset`
pub fn floor_boundary(bytes: &[u8], offset: usize) -> usize {
    let mut offset = offset.min(bytes.len());
    while offset > 0 && offset < bytes.len() && is_continuation(bytes[offset]) {
        offset -= 1;
    }
    offset
}

/// Iterator over `(byte_offset, char)` pairs of a UTF-8 byte range
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Codepoints<'a> {
    /// Iterate over well-formed UTF-8 bytes
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }
}

impl Iterator for Codepoints<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.offset;
        let (ch, len) = decode(&self.bytes[start..])?;
        self.offset += len;
        Some((start, ch))
    }
}

/// Iterate over the codepoints of `text`
pub fn codepoints(text: &str) -> Codepoints<'_> {
    Codepoints::new(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_multibyte_sequences() {
        assert_eq!(decode(b"A"), Some(('A', 1)));
        assert_eq!(decode("é".as_bytes()), Some(('é', 2)));
        assert_eq!(decode("€".as_bytes()), Some(('€', 3)));
        assert_eq!(decode("𝄞".as_bytes()), Some(('𝄞', 4)));
        assert_eq!(decode(b""), None);
    }

    #[test]
    fn test_encode_matches_std() {
        for ch in ['a', 'ß', '中', '🙂'] {
            let encoded = encode(ch);
            let mut buf = [0u8; 4];
            assert_eq!(encoded.as_bytes(), ch.encode_utf8(&mut buf).as_bytes());
            assert_eq!(encoded.len(), ch.len_utf8());
        }
    }

    #[test]
    fn test_validate_rejects_malformed() {
        assert!(validate(b"hello").is_ok());
        assert!(validate(&[0xC3, 0x28]).is_err());
        assert!(validate(&[0xFF]).is_err());
    }

    #[test]
    fn test_codepoints_yield_byte_offsets() {
        let items: Vec<_> = codepoints("aé€").collect();
        assert_eq!(items, vec![(0, 'a'), (1, 'é'), (3, '€')]);
    }

    #[test]
    fn test_boundary_stepping() {
        let text = "aé€b".as_bytes();
        assert_eq!(next_boundary(text, 0), 1);
        assert_eq!(next_boundary(text, 1), 3);
        assert_eq!(next_boundary(text, 3), 6);
        assert_eq!(next_boundary(text, 7), 7);
        assert_eq!(prev_boundary(text, 7), 6);
        assert_eq!(prev_boundary(text, 6), 3);
        assert_eq!(prev_boundary(text, 3), 1);
        assert_eq!(prev_boundary(text, 0), 0);
        assert_eq!(floor_boundary(text, 2), 1);
        assert_eq!(floor_boundary(text, 100), 7);
    }
}
