// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable identities for marks and groups.

/// Stable identity of a mark across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id from a base and a string key (for example a category name).
    ///
    /// The same `(base, key)` pair always yields the same id, so marks keyed by data
    /// survive re-renders even when their position in the input changes.
    pub fn for_key(base: u64, key: &str) -> Self {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
        let mut h = FNV_OFFSET ^ base;
        for b in key.bytes() {
            h ^= u64::from(b);
            h = h.wrapping_mul(FNV_PRIME);
        }
        Self(h)
    }

    /// Derives an id from a base and an index.
    pub const fn for_index(base: u64, index: usize) -> Self {
        Self(base.wrapping_add(index as u64))
    }
}

/// Identity of a scene group (one chart subtree, one layer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u64);
