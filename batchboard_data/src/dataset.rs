// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding of the bundled stats file and the date-range aggregation step.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{BatchCode, BatchRecord, DataError};

/// Raw per-batch counts as stored in the stats file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct BatchStats {
    /// Number of companies in the batch.
    #[serde(default)]
    pub total: u32,
    /// Number of companies hiring.
    #[serde(default)]
    pub hiring: u32,
    /// Company count per industry.
    #[serde(default)]
    pub industries: BTreeMap<String, u32>,
    /// Company count per tag.
    #[serde(default)]
    pub tags: BTreeMap<String, u32>,
    /// Company count per ISO country code.
    #[serde(default)]
    pub locations: BTreeMap<String, u32>,
    /// Sum of all tag counts. Zero means "derive from `tags`".
    #[serde(default)]
    pub tag_count: u32,
    /// Sum of all industry counts. Zero means "derive from `industries`".
    #[serde(default)]
    pub industry_count: u32,
}

/// The `stats` section of the stats file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Stats {
    /// Counts keyed by batch code.
    #[serde(rename = "byBatch", default)]
    pub by_batch: BTreeMap<String, BatchStats>,
}

/// The bundled stats file: every known batch code plus per-batch counts.
///
/// `batches` may contain legacy or otherwise invalid codes; they are filtered during
/// aggregation, never here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Dataset {
    /// All known batch codes, in file order.
    #[serde(default)]
    pub batches: Vec<String>,
    /// Per-batch counts.
    #[serde(default)]
    pub stats: Stats,
}

impl Dataset {
    /// Decodes a dataset from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the ordered per-batch records for a calendar date range (inclusive).
    ///
    /// Both dates are mapped to batch codes by quarter bucket first; see
    /// [`Dataset::aggregate_batches`].
    pub fn aggregate(&self, start: NaiveDate, end: NaiveDate) -> Vec<BatchRecord> {
        self.aggregate_batches(BatchCode::from_date(start), BatchCode::from_date(end))
    }

    /// Builds the ordered per-batch records for an inclusive batch-code range.
    ///
    /// Codes that do not parse as `[W|S|F][YY]` (such as `IK12`) and codes without
    /// counts in `stats.byBatch` are skipped. Each retained code yields exactly one record,
    /// sorted ascending by `(year, season)`. An empty range yields an empty list.
    pub fn aggregate_batches(&self, start: BatchCode, end: BatchCode) -> Vec<BatchRecord> {
        let mut codes: Vec<BatchCode> = self
            .batches
            .iter()
            .filter_map(|raw| raw.parse::<BatchCode>().ok())
            .filter(|code| (start..=end).contains(code))
            .collect();
        codes.sort();
        codes.dedup();

        let records: Vec<BatchRecord> = codes
            .into_iter()
            .filter_map(|code| {
                let stats = self.stats.by_batch.get(&code.to_string());
                if stats.is_none() {
                    tracing::debug!(batch = %code, "skipping batch without counts");
                }
                stats.map(|stats| BatchRecord::from_stats(code, stats))
            })
            .collect();

        tracing::info!(
            start = %start,
            end = %end,
            batches = records.len(),
            "aggregated batch range"
        );
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "batches": ["F06", "IK12", "W06", "S06", "W07", "S07"],
        "stats": { "byBatch": {
            "W06": { "total": 10, "hiring": 2, "industries": {"FinTech": 5, "B2B": 5},
                     "tags": {"AI": 2}, "locations": {"USA": 9, "CAN": 1},
                     "tag_count": 2, "industry_count": 10 },
            "S06": { "total": 4, "industries": {"FinTech": 1}, "industry_count": 4 },
            "F06": { "total": 8, "industries": {"B2B": 2}, "industry_count": 8 },
            "IK12": { "total": 3, "industries": {"B2B": 3}, "industry_count": 3 },
            "W07": { "total": 5, "industries": {"B2B": 5}, "industry_count": 5 }
        } }
    }"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn full_range_is_sorted_and_drops_legacy_and_missing_batches() {
        let ds = Dataset::from_json(SAMPLE).unwrap();
        let records = ds.aggregate(date(2005, 1, 1), date(2025, 12, 31));
        let names: Vec<&str> = records.iter().map(BatchRecord::name).collect();
        // IK12 never parses; S07 is listed but has no counts.
        assert_eq!(names, ["W06", "S06", "F06", "W07"]);
    }

    #[test]
    fn range_bounds_are_inclusive_by_season() {
        let ds = Dataset::from_json(SAMPLE).unwrap();
        let records = ds.aggregate(date(2006, 6, 1), date(2006, 10, 1));
        let names: Vec<&str> = records.iter().map(BatchRecord::name).collect();
        assert_eq!(names, ["S06", "F06"]);
    }

    #[test]
    fn inverted_or_empty_range_yields_no_records() {
        let ds = Dataset::from_json(SAMPLE).unwrap();
        assert!(ds.aggregate(date(2007, 1, 1), date(2006, 1, 1)).is_empty());
        assert!(ds.aggregate(date(2015, 1, 1), date(2016, 1, 1)).is_empty());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Dataset::from_json("{\"batches\": 3}"),
            Err(DataError::Json(_))
        ));
    }
}
