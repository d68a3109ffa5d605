//! Compression helpers for stored document text.
//!
//! A compressed blob is laid out as
//!
//! ```text
//! 0xF8 | size varint (1-5 bytes) | zlib stream
//! ```
//!
//! The marker byte never occurs in UTF-8, so plain text stored next to
//! compressed blobs is recognised without touching zlib. `uncompress` hands
//! back anything that does not look like a blob unchanged.
//!
//! # Examples
//!
//! ```
//! use snowcascade::compress::{compress, is_compressed, uncompress};
//!
//! let blob = compress(b"the quick brown fox").unwrap();
//! assert!(is_compressed(&blob));
//! assert_eq!(uncompress(&blob).unwrap(), b"the quick brown fox");
//!
//! // Plain text passes through.
//! assert_eq!(uncompress(b"plain").unwrap(), b"plain");
//! ```

use std::io::{self, Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::error::{CascadeError, Result};
use crate::util::varint;

/// First byte of every compressed blob.
pub const COMPRESSED_MARKER: u8 = 0xF8;

/// Compress `input` into the blob format.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let size = u32::try_from(input.len()).map_err(|_| {
        CascadeError::compression(format!("input of {} bytes is too large", input.len()))
    })?;

    let mut out = Vec::with_capacity(input.len() / 2 + 16);
    out.push(COMPRESSED_MARKER);
    varint::write_u32(&mut out, size)?;

    let mut encoder = ZlibEncoder::new(out, Compression::default());
    encoder
        .write_all(input)
        .map_err(|e| CascadeError::compression(format!("deflate failed: {e}")))?;
    encoder
        .finish()
        .map_err(|e| CascadeError::compression(format!("deflate failed: {e}")))
}

/// Split a blob into its declared size and zlib stream.
fn parse_blob(input: &[u8]) -> Option<(u32, &[u8])> {
    let (&marker, mut stream) = input.split_first()?;
    if marker != COMPRESSED_MARKER {
        return None;
    }
    // Reading through the slice leaves it positioned at the zlib stream.
    let size = varint::read_u32(&mut stream).ok()?;
    valid_zlib_header(stream).then_some((size, stream))
}

fn valid_zlib_header(stream: &[u8]) -> bool {
    match stream {
        [cmf, flg, ..] => *cmf == 0x78 && (u16::from(*cmf) * 256 + u16::from(*flg)) % 31 == 0,
        _ => false,
    }
}

/// Whether `input` is a blob produced by [`compress`].
pub fn is_compressed(input: &[u8]) -> bool {
    parse_blob(input).is_some()
}

/// Restore the original bytes of a blob.
///
/// Input that is not a blob, or whose zlib stream is corrupt, is returned
/// unchanged. A stream that inflates past its declared size is an error.
pub fn uncompress(input: &[u8]) -> Result<Vec<u8>> {
    let Some((size, stream)) = parse_blob(input) else {
        return Ok(input.to_vec());
    };

    let mut out = Vec::with_capacity(size as usize);
    let mut decoder = ZlibDecoder::new(stream).take(u64::from(size) + 1);
    match decoder.read_to_end(&mut out) {
        Ok(_) => {}
        Err(e) if is_corrupt_stream(&e) => return Ok(input.to_vec()),
        Err(e) => return Err(CascadeError::compression(format!("inflate failed: {e}"))),
    }

    if out.len() > size as usize {
        return Err(CascadeError::compression(format!(
            "stream inflates past its declared size of {size} bytes"
        )));
    }
    Ok(out)
}

fn is_corrupt_stream(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof
    )
}
