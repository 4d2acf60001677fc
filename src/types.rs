//! Core types for fixity manifests.

/// Hash: 256-bit BLAKE3 digest of a file's full byte content
pub type Hash = [u8; 32];

/// Length of a [`Hash`] rendered as lowercase hex.
pub const HASH_HEX_LEN: usize = 64;
