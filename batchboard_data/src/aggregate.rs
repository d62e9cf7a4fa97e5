// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-batch records with precomputed percentages.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{BatchCode, BatchStats, OTHER};

/// Which category family a chart shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Industry categories.
    #[default]
    Industries,
    /// Free-form tags.
    Tags,
}

impl DataType {
    /// Returns the other data type.
    pub fn toggled(self) -> Self {
        match self {
            Self::Industries => Self::Tags,
            Self::Tags => Self::Industries,
        }
    }

    /// Returns a human-readable plural label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Industries => "Industries",
            Self::Tags => "Tags",
        }
    }
}

/// A pair of values, one per [`DataType`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerType<T> {
    /// Value for [`DataType::Industries`].
    pub industries: T,
    /// Value for [`DataType::Tags`].
    pub tags: T,
}

impl<T> PerType<T> {
    /// Returns the value for `data_type`.
    pub fn get(&self, data_type: DataType) -> &T {
        match data_type {
            DataType::Industries => &self.industries,
            DataType::Tags => &self.tags,
        }
    }
}

/// One accelerator batch, ready for charting.
///
/// Both percentage families are computed once at construction; the record is never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchRecord {
    code: BatchCode,
    name: String,
    total: u32,
    hiring_count: u32,
    companies_per_category: PerType<BTreeMap<String, f64>>,
    category_among_total: PerType<BTreeMap<String, f64>>,
    locations: BTreeMap<String, u32>,
}

impl BatchRecord {
    /// Builds a record from raw counts.
    ///
    /// - `companies_per_category = 100 * count / total`
    /// - `category_among_total = 100 * count / sum(counts)` where the sum is the stored
    ///   `*_count` field, or the sum of the per-category counts if that field is zero.
    ///
    /// A zero denominator yields zero percentages.
    pub fn from_stats(code: BatchCode, stats: &BatchStats) -> Self {
        let companies_per_category = PerType {
            industries: percentages(&stats.industries, stats.total),
            tags: percentages(&stats.tags, stats.total),
        };
        let category_among_total = PerType {
            industries: percentages(
                &stats.industries,
                denominator(stats.industry_count, &stats.industries),
            ),
            tags: percentages(&stats.tags, denominator(stats.tag_count, &stats.tags)),
        };
        let record = Self {
            code,
            name: code.to_string(),
            total: stats.total,
            hiring_count: stats.hiring,
            companies_per_category,
            category_among_total,
            locations: stats.locations.clone(),
        };
        for data_type in [DataType::Industries, DataType::Tags] {
            let sum = record.category_sum(data_type);
            if sum > 100.0 + 1e-9 {
                tracing::warn!(
                    batch = %record.name,
                    ?data_type,
                    sum,
                    "category shares exceed 100%; stored count is below the category counts"
                );
            }
        }
        record
    }

    /// Returns the batch code.
    pub fn code(&self) -> BatchCode {
        self.code
    }

    /// Returns the batch name (`"S21"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of companies.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Returns the number of hiring companies.
    pub fn hiring_count(&self) -> u32 {
        self.hiring_count
    }

    /// Returns company counts per ISO country code.
    pub fn locations(&self) -> &BTreeMap<String, u32> {
        &self.locations
    }

    /// Share of the batch's companies in `category`, in percent.
    pub fn companies_per_category(&self, data_type: DataType) -> &BTreeMap<String, f64> {
        self.companies_per_category.get(data_type)
    }

    /// Share of `category` among all category assignments of the batch, in percent.
    pub fn category_among_total(&self, data_type: DataType) -> &BTreeMap<String, f64> {
        self.category_among_total.get(data_type)
    }

    /// Single-category value: the share of companies in `category` (0 if absent).
    pub fn company_share(&self, data_type: DataType, category: &str) -> f64 {
        self.companies_per_category(data_type)
            .get(category)
            .copied()
            .unwrap_or(0.0)
    }

    /// Stacked value for `category` (0 if absent).
    ///
    /// For [`OTHER`] this is the residual `max(0, 100 - sum of the real categories)`,
    /// never the stored value, so a stacked batch always totals exactly 100.
    pub fn stacked_share(&self, data_type: DataType, category: &str) -> f64 {
        if category == OTHER {
            return self.other_share(data_type);
        }
        self.category_among_total(data_type)
            .get(category)
            .copied()
            .unwrap_or(0.0)
    }

    /// Residual share assigned to [`OTHER`].
    pub fn other_share(&self, data_type: DataType) -> f64 {
        (100.0 - self.category_sum(data_type)).max(0.0)
    }

    /// Sum of the stacked shares of the real categories. Above 100 only for inconsistent
    /// input, which is logged when the record is built.
    pub fn category_sum(&self, data_type: DataType) -> f64 {
        self.category_among_total(data_type)
            .iter()
            .filter(|(k, _)| k.as_str() != OTHER)
            .map(|(_, v)| *v)
            .sum()
    }
}

fn denominator(stored: u32, counts: &BTreeMap<String, u32>) -> u32 {
    if stored != 0 {
        stored
    } else {
        counts.values().sum()
    }
}

fn percentages(counts: &BTreeMap<String, u32>, denominator: u32) -> BTreeMap<String, f64> {
    counts
        .iter()
        .map(|(k, &count)| {
            let pct = if denominator == 0 {
                0.0
            } else {
                100.0 * f64::from(count) / f64::from(denominator)
            };
            (k.clone(), pct)
        })
        .collect()
}

/// Sums company counts per ISO country code over a set of records.
pub fn location_totals(records: &[BatchRecord]) -> BTreeMap<String, u32> {
    let mut out: BTreeMap<String, u32> = BTreeMap::new();
    for record in records {
        for (country, count) in record.locations() {
            *out.entry(country.clone()).or_default() += count;
        }
    }
    out
}
