//! Size-prefix varint used by the compressed blob format.
//!
//! Values are written as 1 to 5 bytes of seven bits each, most significant
//! group first. The final byte carries the `0x80` flag; every other byte has
//! it clear. Leading zero groups are omitted, so zero encodes as `0x80`.

use std::io::{Read, Write};

use byteorder::ReadBytesExt;

use crate::error::{CascadeError, Result};

/// Maximum encoded length of a u32.
pub const MAX_VARINT_LEN: usize = 5;

const END_FLAG: u8 = 0x80;

/// Encode a u32 value.
pub fn encode_u32(value: u32) -> Vec<u8> {
    let mut groups = [0u8; MAX_VARINT_LEN];
    for (i, group) in groups.iter_mut().enumerate() {
        let shift = 7 * (MAX_VARINT_LEN - 1 - i);
        *group = ((value >> shift) & 0x7F) as u8;
    }

    let first = groups[..MAX_VARINT_LEN - 1]
        .iter()
        .position(|&g| g != 0)
        .unwrap_or(MAX_VARINT_LEN - 1);
    let mut bytes = groups[first..].to_vec();
    if let Some(last) = bytes.last_mut() {
        *last |= END_FLAG;
    }
    bytes
}

/// Write a varint-encoded u32 to a writer.
pub fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<usize> {
    let bytes = encode_u32(value);
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}

/// Read a varint-encoded u32 from a reader.
pub fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut result = 0u64;

    for _ in 0..MAX_VARINT_LEN {
        let byte = reader
            .read_u8()
            .map_err(|_| CascadeError::compression("Incomplete VarInt"))?;
        result = (result << 7) | u64::from(byte & 0x7F);
        if byte & END_FLAG != 0 {
            return u32::try_from(result).map_err(|_| CascadeError::compression("VarInt overflow"));
        }
    }

    Err(CascadeError::compression("Incomplete VarInt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode_u32(0), vec![0x80]);
        assert_eq!(encode_u32(5), vec![0x85]);
        assert_eq!(encode_u32(127), vec![0xFF]);
        assert_eq!(encode_u32(128), vec![0x01, 0x80]);
        assert_eq!(encode_u32(300), vec![0x02, 0xAC]);
        assert_eq!(encode_u32(u32::MAX), vec![0x0F, 0x7F, 0x7F, 0x7F, 0xFF]);
    }

    #[test]
    fn test_read_leaves_reader_after_value() {
        let mut bytes = encode_u32(16384);
        assert_eq!(bytes.len(), 3);
        bytes.extend_from_slice(b"tail");
        let mut reader = &bytes[..];
        assert_eq!(read_u32(&mut reader).unwrap(), 16384);
        assert_eq!(reader, &b"tail"[..]);
    }

    #[test]
    fn test_write_read_u32() {
        let mut buffer = Vec::new();
        let value = 12345u32;

        let bytes_written = write_u32(&mut buffer, value).unwrap();
        assert_eq!(bytes_written, buffer.len());

        let mut cursor = Cursor::new(buffer);
        assert_eq!(read_u32(&mut cursor).unwrap(), value);
    }

    #[test]
    fn test_incomplete_varint() {
        assert!(read_u32(&mut &b""[..]).is_err());
        assert!(read_u32(&mut &b"\x01\x02"[..]).is_err());
        // Terminator past the fifth byte is not accepted.
        assert!(read_u32(&mut &b"\x00\x00\x00\x00\x00\x81"[..]).is_err());
        assert!(read_u32(&mut Cursor::new(vec![0x01])).is_err());
    }

    #[test]
    fn test_overflow() {
        assert!(read_u32(&mut &b"\x7f\x7f\x7f\x7f\xff"[..]).is_err());
    }
}
