//! BLAKE3 content hashing with streaming support.
//!
//! # Overview
//!
//! Digest equality is used as content equality throughout the engine;
//! collisions are treated as impossible at 256 bits. Two entry points:
//! [`hash_reader`] streams arbitrary byte sources in fixed-size chunks
//! (bounded memory on large files), [`hash_line`] digests a single
//! trimmed text line.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// A 256-bit BLAKE3 content digest.
pub type Digest = [u8; 32];

/// Chunk size for streaming reads (64 KiB).
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Hash the full contents of a reader, streaming in [`CHUNK_SIZE`] chunks.
///
/// # Errors
///
/// Propagates any I/O error raised by the reader.
pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<Digest> {
    let mut hasher = blake3::Hasher::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(*hasher.finalize().as_bytes())
}

/// Hash the raw byte content of a file at `path`.
///
/// # Errors
///
/// Propagates the I/O error if the file cannot be opened or read.
pub fn hash_file(path: &Path) -> io::Result<Digest> {
    hash_reader(File::open(path)?)
}

/// Hash a single line of UTF-8 text.
///
/// The caller is expected to trim the line first; this function digests
/// exactly the bytes it is given.
#[must_use]
pub fn hash_line(line: &str) -> Digest {
    *blake3::hash(line.as_bytes()).as_bytes()
}

/// Convert a digest to a lowercase hexadecimal string.
#[must_use]
pub fn digest_to_hex(digest: &Digest) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
