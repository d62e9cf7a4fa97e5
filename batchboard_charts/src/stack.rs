// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked series (`y0`/`y1` per batch) for the category charts.

use batchboard_data::{BatchRecord, CategorySet, DataType, OTHER};

/// One band of a stack: its key and `(y0, y1)` per batch, in batch order.
#[derive(Clone, Debug, PartialEq)]
pub struct StackSeries {
    /// Category key.
    pub key: String,
    /// Bottom and top of the band per batch.
    pub values: Vec<(f64, f64)>,
}

/// An ordered set of bands, bottom band first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackLayout {
    series: Vec<StackSeries>,
}

impl StackLayout {
    /// Stacks every category of `categories` using the stacked shares of `records`.
    ///
    /// Real categories are ordered by descending total share across all batches, ties keeping
    /// their `categories` order; [`OTHER`] is always the top band. Each batch sums to 100.
    pub fn stacked(records: &[BatchRecord], categories: &CategorySet, data_type: DataType) -> Self {
        let mut order: Vec<(&str, f64)> = categories
            .real()
            .iter()
            .map(|key| {
                let total = records
                    .iter()
                    .map(|r| r.stacked_share(data_type, key))
                    .sum();
                (key.as_str(), total)
            })
            .collect();
        order.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut base = vec![0.0; records.len()];
        let series = order
            .into_iter()
            .map(|(key, _)| key)
            .chain(core::iter::once(OTHER))
            .map(|key| {
                let values = records
                    .iter()
                    .zip(base.iter_mut())
                    .map(|(record, y0)| {
                        let y1 = *y0 + record.stacked_share(data_type, key);
                        let band = (*y0, y1);
                        *y0 = y1;
                        band
                    })
                    .collect();
                StackSeries {
                    key: key.to_owned(),
                    values,
                }
            })
            .collect();
        Self { series }
    }

    /// A single band for `category`, from zero up to its share of companies per batch.
    pub fn focused(records: &[BatchRecord], data_type: DataType, category: &str) -> Self {
        let values = records
            .iter()
            .map(|r| (0.0, r.company_share(data_type, category)))
            .collect();
        Self {
            series: vec![StackSeries {
                key: category.to_owned(),
                values,
            }],
        }
    }

    /// Returns the bands, bottom first.
    pub fn series(&self) -> &[StackSeries] {
        &self.series
    }

    /// Returns the band keys, bottom first.
    pub fn keys(&self) -> Vec<String> {
        self.series.iter().map(|s| s.key.clone()).collect()
    }

    /// Returns the band for `key`.
    pub fn get(&self, key: &str) -> Option<&StackSeries> {
        self.series.iter().find(|s| s.key == key)
    }

    /// Returns the largest band top, or zero for an empty layout.
    pub fn max_top(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().map(|v| v.1))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use batchboard_data::BatchStats;

    use super::*;

    fn record(code: &str, industries: &[(&str, u32)], count: u32) -> BatchRecord {
        let stats = BatchStats {
            total: count,
            industry_count: count,
            industries: industries
                .iter()
                .map(|(k, v)| ((*k).to_owned(), *v))
                .collect(),
            ..BatchStats::default()
        };
        BatchRecord::from_stats(code.parse().unwrap(), &stats)
    }

    #[test]
    fn bands_are_ordered_by_size_with_other_on_top() {
        let records = [
            record("W20", &[("AI", 1), ("B2B", 6), ("Gov", 1)], 10),
            record("S20", &[("AI", 2), ("B2B", 4), ("Gov", 2)], 10),
        ];
        let cats = CategorySet::from_records(&records, DataType::Industries);
        let layout = StackLayout::stacked(&records, &cats, DataType::Industries);
        // AI and Gov tie; the tie keeps alphabetical order.
        assert_eq!(layout.keys(), ["B2B", "AI", "Gov", "Other"]);

        let other = layout.get(OTHER).unwrap();
        for (y0, y1) in &other.values {
            assert!((y1 - 100.0).abs() < 1e-9, "each batch tops out at 100");
            assert!(*y0 <= *y1);
        }
        assert_eq!(layout.series()[0].values[0], (0.0, 60.0));
        assert_eq!(layout.series()[1].values[0], (60.0, 70.0));
    }

    #[test]
    fn focused_layout_uses_company_shares() {
        let records = [record("W20", &[("FinTech", 5)], 10)];
        let layout = StackLayout::focused(&records, DataType::Industries, "FinTech");
        assert_eq!(layout.series()[0].values, [(0.0, 50.0)]);
        assert_eq!(layout.max_top(), 50.0);
    }
}
