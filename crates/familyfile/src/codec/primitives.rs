//! Byte-level primitives for the family file formats.
//!
//! Bounds-checked little-endian reads and string-boundary scans over borrowed
//! slices. Nothing here panics on short input.

use crate::error::ShortRead;

// =============================================================================
// FIXED-WIDTH READS
// =============================================================================

/// Reads a little-endian u16 at `offset`.
#[inline]
pub fn u16_le(data: &[u8], offset: usize) -> Result<u16, ShortRead> {
    let bytes = take(data, offset, 2)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Reads a little-endian u32 at `offset`.
#[inline]
pub fn u32_le(data: &[u8], offset: usize) -> Result<u32, ShortRead> {
    let bytes = take(data, offset, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Borrows exactly `width` bytes at `offset`.
#[inline]
pub fn take(data: &[u8], offset: usize, width: usize) -> Result<&[u8], ShortRead> {
    let short = ShortRead {
        offset,
        width,
        len: data.len(),
    };
    let end = offset.checked_add(width).ok_or(short)?;
    data.get(offset..end).ok_or(short)
}

// =============================================================================
// STRING SCANS
// =============================================================================

/// Reads a null-terminated string starting at `offset`.
///
/// Returns the text and the bytes consumed including the terminator. Without a
/// terminator the rest of the buffer is returned.
pub fn read_null_terminated(data: &[u8], offset: usize) -> (String, usize) {
    read_terminated(data, offset, 0)
}

/// Reads a newline-terminated string starting at `offset`.
pub fn read_newline_terminated(data: &[u8], offset: usize) -> (String, usize) {
    read_terminated(data, offset, b'\n')
}

fn read_terminated(data: &[u8], offset: usize, terminator: u8) -> (String, usize) {
    let rest = data.get(offset..).unwrap_or(&[]);
    match rest.iter().position(|&b| b == terminator) {
        Some(end) => (lossy(&rest[..end]), end + 1),
        None => (lossy(rest), rest.len()),
    }
}

/// Reads a string prefixed by a one-byte length.
///
/// Returns the text and the bytes consumed including the length byte.
pub fn read_len_prefixed(data: &[u8], offset: usize) -> Result<(String, usize), ShortRead> {
    let len = *data.get(offset).ok_or(ShortRead {
        offset,
        width: 1,
        len: data.len(),
    })? as usize;
    let bytes = take(data, offset + 1, len)?;
    Ok((lossy(bytes), len + 1))
}

/// Decodes bytes as UTF-8, replacing invalid sequences.
#[inline]
pub fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Returns the text up to the last non-null byte.
pub fn clean_string(data: &[u8]) -> String {
    match data.iter().rposition(|&b| b != 0) {
        Some(last) => lossy(&data[..=last]),
        None => String::new(),
    }
}

/// Removes every null byte.
pub fn strip_nulls(data: &[u8]) -> Vec<u8> {
    data.iter().copied().filter(|&b| b != 0).collect()
}

/// Renders bytes as lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Returns true for printable 7-bit ASCII.
#[inline]
pub fn is_printable_ascii(b: u8) -> bool {
    (0x20..0x7F).contains(&b)
}

/// Finds the first run of printable characters (ASCII or valid multi-byte UTF-8).
///
/// Control characters and invalid UTF-8 bytes end the run.
pub fn extract_printable(data: &[u8]) -> String {
    let mut start: Option<usize> = None;
    let mut i = 0;
    while i < data.len() {
        match decode_char(&data[i..]) {
            Some((c, size)) if is_printable_char(c) => {
                start.get_or_insert(i);
                i += size;
            }
            Some((_, size)) => {
                if let Some(s) = start {
                    return lossy(&data[s..i]);
                }
                i += size;
            }
            None => {
                if let Some(s) = start {
                    return lossy(&data[s..i]);
                }
                i += 1;
            }
        }
    }
    start.map(|s| lossy(&data[s..])).unwrap_or_default()
}

fn is_printable_char(c: char) -> bool {
    !c.is_control() && c != '\u{7F}' && c != '\u{FFFD}'
}

/// Decodes one UTF-8 scalar from the front of `data`.
fn decode_char(data: &[u8]) -> Option<(char, usize)> {
    let first = *data.first()?;
    let width = match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return None,
    };
    let bytes = data.get(..width)?;
    let s = std::str::from_utf8(bytes).ok()?;
    s.chars().next().map(|c| (c, width))
}

// =============================================================================
// CURSOR
// =============================================================================

/// Cursor over a byte slice for sequential little-endian reads.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a reader positioned at `pos`.
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ShortRead> {
        let bytes = take(self.data, self.pos, n)?;
        self.pos += n;
        Ok(bytes)
    }

    /// Skips n bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), ShortRead> {
        self.read_bytes(n).map(|_| ())
    }

    /// Reads a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, ShortRead> {
        let v = u16_le(self.data, self.pos)?;
        self.pos += 2;
        Ok(v)
    }

    /// Reads a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, ShortRead> {
        let v = u32_le(self.data, self.pos)?;
        self.pos += 4;
        Ok(v)
    }
}
