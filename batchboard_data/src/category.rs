// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category sets derived from batch records.

use std::collections::BTreeSet;

use crate::{BatchRecord, DataType};

/// The synthetic residual category. It is always last in a [`CategorySet`].
pub const OTHER: &str = "Other";

/// The sorted union of category keys across a list of records, with [`OTHER`] appended.
///
/// Order determines stack order and color assignment downstream, so it depends only on
/// the key set: re-deriving from the same records always yields the same order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySet {
    keys: Vec<String>,
}

impl CategorySet {
    /// Derives the category set for `data_type`.
    pub fn from_records(records: &[BatchRecord], data_type: DataType) -> Self {
        let unique: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| r.category_among_total(data_type).keys())
            .map(String::as_str)
            .filter(|k| *k != OTHER)
            .collect();
        let mut keys: Vec<String> = unique.into_iter().map(str::to_owned).collect();
        keys.push(OTHER.to_owned());
        Self { keys }
    }

    /// Returns all keys, [`OTHER`] last.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the real (non-[`OTHER`]) keys in sorted order.
    pub fn real(&self) -> &[String] {
        &self.keys[..self.keys.len() - 1]
    }

    /// Returns the number of keys, including [`OTHER`].
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if there are no real categories.
    pub fn is_empty(&self) -> bool {
        self.keys.len() <= 1
    }

    /// Returns `true` if `key` belongs to the set.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }
}
