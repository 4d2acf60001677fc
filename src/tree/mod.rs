//! Directory tree fingerprinting
//!
//! Walks a root, streams every regular file through BLAKE3 and assembles the
//! current fingerprint set keyed by root-relative path.

pub mod builder;
pub mod hasher;
pub mod path;
pub mod walker;
