//! Fixity: Content-Hash Manifests for Long-Term Data Custody
//!
//! Records a BLAKE3 fingerprint of every regular file under a directory in a
//! sorted, line-oriented manifest, and reconciles later scans against it to
//! report changed, missing and new files.

pub mod cli;
pub mod config;
pub mod custodian;
pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod manifest;
pub mod reconcile;
pub mod tree;
pub mod types;
