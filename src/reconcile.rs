//! Reconciliation of a recorded fingerprint set against a fresh scan
//!
//! Every path lands in exactly one of four categories:
//!
//! | category  | recorded | current | digests |
//! |-----------|----------|---------|---------|
//! | `ok`      | yes      | yes     | equal   |
//! | `changed` | yes      | yes     | differ  |
//! | `missing` | yes      | no      |         |
//! | `new`     | no       | yes     |         |

use crate::fingerprint::FingerprintSet;
use serde::Serialize;
use std::collections::BTreeSet;

/// Classification of every path known to either set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub ok: BTreeSet<String>,
    pub changed: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    pub new: BTreeSet<String>,
}

/// Per-category path counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub ok: usize,
    pub changed: usize,
    pub missing: usize,
    pub new: usize,
}

impl Reconciliation {
    /// True when nothing changed, went missing or appeared
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty() && self.missing.is_empty() && self.new.is_empty()
    }

    pub fn difference_count(&self) -> usize {
        self.changed.len() + self.missing.len() + self.new.len()
    }

    pub fn counts(&self) -> Counts {
        Counts {
            ok: self.ok.len(),
            changed: self.changed.len(),
            missing: self.missing.len(),
            new: self.new.len(),
        }
    }
}

/// Classify every path of `old` and `current`
///
/// Pure: no I/O, neither input is modified.
pub fn reconcile(old: &FingerprintSet, current: &FingerprintSet) -> Reconciliation {
    let mut result = Reconciliation::default();

    for (rel, old_hash) in old {
        match current.get(rel) {
            Some(hash) if hash == old_hash => {
                result.ok.insert(rel.clone());
            }
            Some(_) => {
                result.changed.insert(rel.clone());
            }
            None => {
                result.missing.insert(rel.clone());
            }
        }
    }

    for (rel, _) in current {
        if !old.contains(rel) {
            result.new.insert(rel.clone());
        }
    }

    result
}
