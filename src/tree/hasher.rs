//! Content hashing for tracked files using BLAKE3
//!
//! Files are streamed through the hasher in fixed-size chunks, so memory use is
//! bounded by the chunk size no matter how large the file is.

use crate::error::ScanIssue;
use crate::types::{Hash, HASH_HEX_LEN};
use blake3::Hasher;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Default read chunk size (64 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Stream a reader through BLAKE3 and return the digest
///
/// Reads `chunk_size` bytes at a time until EOF. Interrupted reads are retried;
/// any other read error is returned as-is.
pub fn hash_reader<R: Read>(mut reader: R, chunk_size: usize) -> io::Result<Hash> {
    let mut hasher = Hasher::new();
    let mut buf = vec![0u8; chunk_size.max(1)];

    loop {
        let read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..read]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Hash the full content of the file at `path`
pub fn hash_file(path: &Path, chunk_size: usize) -> Result<Hash, ScanIssue> {
    let hashing_failed = |source| ScanIssue::HashingFailed {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(hashing_failed)?;
    hash_reader(file, chunk_size).map_err(hashing_failed)
}

/// Compute content hash for in-memory bytes
pub fn compute_content_hash(content: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}

/// Render a digest as lowercase hex
pub fn to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Parse a hex digest. Returns None unless it is exactly 64 hex characters.
pub fn from_hex(digest: &str) -> Option<Hash> {
    if digest.len() != HASH_HEX_LEN {
        return None;
    }
    let mut hash = [0u8; 32];
    hex::decode_to_slice(digest, &mut hash).ok()?;
    Some(hash)
}
