//! Character decoding
//!
//! Source text is scanned one character at a time straight out of the byte
//! buffer, so lambdas can stay byte slices and error offsets stay byte
//! offsets. Sources are UTF-8; a NUL byte, a malformed sequence, or a
//! sequence cut short by the end of the current slice is `BadMultibyte`.

use false_core::ErrorKind;

/// Decode the character at the start of `bytes`
///
/// Returns the character and the number of bytes it occupies (1 to 4).
pub fn decode(bytes: &[u8]) -> Result<(char, usize), ErrorKind> {
    let first = *bytes.first().ok_or(ErrorKind::BadMultibyte)?;
    let width = match first {
        0x01..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Err(ErrorKind::BadMultibyte),
    };

    let sequence = bytes.get(..width).ok_or(ErrorKind::BadMultibyte)?;
    // from_utf8 rejects overlong forms, surrogates and bad continuation bytes
    let text = std::str::from_utf8(sequence).map_err(|_| ErrorKind::BadMultibyte)?;
    text.chars()
        .next()
        .map(|c| (c, width))
        .ok_or(ErrorKind::BadMultibyte)
}
