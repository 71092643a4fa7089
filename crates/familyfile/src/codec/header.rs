//! Primary data file header.
//!
//! The file opens with the 8-byte magic. Somewhere after byte 80 the writing
//! device left four strings: device ID, model and serial (newline-terminated)
//! followed by the application path (null-terminated).

use crate::codec::primitives::{is_printable_ascii, read_newline_terminated, read_null_terminated, take};
use crate::error::ShortRead;
use crate::limits::{HEADER_SCAN_LIMIT, HEADER_STRINGS_OFFSET};
use crate::model::Header;

const MAGIC_LEN: usize = 8;

/// Decodes the header. Only a buffer too short for the magic is an error.
pub fn decode_header(data: &[u8]) -> Result<Header, ShortRead> {
    let magic = take(data, 0, MAGIC_LEN)?;
    let mut header = Header {
        magic: String::from_utf8_lossy(magic).into_owned(),
        ..Default::default()
    };

    let scan_end = data.len().min(HEADER_SCAN_LIMIT);
    let Some(mut pos) = (HEADER_STRINGS_OFFSET..scan_end).find(|&i| is_printable_ascii(data[i])) else {
        return Ok(header);
    };

    for slot in [&mut header.device_id, &mut header.model, &mut header.serial] {
        let (text, consumed) = read_newline_terminated(data, pos);
        *slot = text;
        pos += consumed;
    }
    header.app_path = read_null_terminated(data, pos).0;

    Ok(header)
}
