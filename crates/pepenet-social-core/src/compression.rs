//! Compression adapter for social payloads.
//!
//! Feature payloads are zstd frames at a fixed level. The level is part of
//! consensus: the compressed size of `msg` is checked against a limit, so
//! every node must produce the same bytes for the same input.

use std::io::Read;

use crate::error::{CoreError, Result};

/// zstd level used for every social payload.
pub const COMPRESSION_LEVEL: i32 = 19;

/// Upper bound on decompressed payload size (64 KiB).
///
/// Far above any valid feature; anything larger is treated as corrupt.
pub const MAX_DECOMPRESSED_SIZE: usize = 64 * 1024;

/// Compress a byte buffer.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    zstd::encode_all(data, COMPRESSION_LEVEL).map_err(|e| CoreError::Compression(e.to_string()))
}

/// Decompress a byte buffer produced by [`compress`].
///
/// Fails on empty input, corrupt or truncated frames, and output larger
/// than [`MAX_DECOMPRESSED_SIZE`]. No partial output is ever returned.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(CoreError::Decompression("empty input".into()));
    }

    let decoder =
        zstd::stream::read::Decoder::new(data).map_err(|e| CoreError::Decompression(e.to_string()))?;

    let mut out = Vec::new();
    decoder
        .take(MAX_DECOMPRESSED_SIZE as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|e| CoreError::Decompression(e.to_string()))?;

    if out.len() > MAX_DECOMPRESSED_SIZE {
        return Err(CoreError::Decompression(format!(
            "output exceeds {} bytes",
            MAX_DECOMPRESSED_SIZE
        )));
    }
    Ok(out)
}

/// Compressed size of a string, as used by the message size limits.
pub fn compressed_len(data: &[u8]) -> Result<usize> {
    compress(data).map(|c| c.len())
}
