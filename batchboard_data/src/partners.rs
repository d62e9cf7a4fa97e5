// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partner rosters: which companies each partner worked with, per batch.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{BatchCode, DataError, YearRange};

/// One company in a partner's roster.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Company {
    /// Display name.
    pub company_name: String,
    /// Team size (drives bubble radius).
    #[serde(default)]
    pub team_size: u32,
}

/// A partner's companies, keyed by batch code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PartnerEntry {
    /// Companies per batch code.
    #[serde(default)]
    pub bybatch: BTreeMap<String, Vec<Company>>,
}

/// A partner with the companies retained by a range filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partner {
    /// Partner name.
    pub name: String,
    /// Companies in chronological batch order.
    pub companies: Vec<Company>,
}

/// The partner file: `partnerName -> { bybatch: { code -> [company] } }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PartnerDataset {
    /// Entries keyed by partner name.
    pub partners: BTreeMap<String, PartnerEntry>,
}

impl PartnerDataset {
    /// Decodes a partner dataset from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns partners (sorted by name) with the companies whose batch year lies in
    /// `range`. Partners left without companies are dropped; unparseable batch codes are
    /// ignored.
    pub fn partners_in_range(&self, range: &YearRange) -> Vec<Partner> {
        self.partners
            .iter()
            .filter_map(|(name, entry)| {
                let mut batches: Vec<(BatchCode, &Vec<Company>)> = entry
                    .bybatch
                    .iter()
                    .filter_map(|(raw, companies)| {
                        let code = raw.parse::<BatchCode>().ok()?;
                        range
                            .contains_year(code.full_year())
                            .then_some((code, companies))
                    })
                    .collect();
                batches.sort_by_key(|(code, _)| *code);
                let companies: Vec<Company> = batches
                    .into_iter()
                    .flat_map(|(_, companies)| companies.iter().cloned())
                    .collect();
                (!companies.is_empty()).then(|| Partner {
                    name: name.clone(),
                    companies,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Zed": { "bybatch": { "W21": [ {"company_name": "Acme", "team_size": 4} ] } },
        "Amy": { "bybatch": {
            "S12": [ {"company_name": "Old", "team_size": 1} ],
            "IK12": [ {"company_name": "Legacy", "team_size": 2} ],
            "F20": [ {"company_name": "Late", "team_size": 9} ],
            "W20": [ {"company_name": "Early", "team_size": 1} ]
        } }
    }"#;

    #[test]
    fn range_filter_keeps_matching_companies_in_batch_order() {
        let ds = PartnerDataset::from_json(SAMPLE).unwrap();
        let partners = ds.partners_in_range(&YearRange::new(2019, 2022).unwrap());
        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0].name, "Amy");
        let names: Vec<&str> = partners[0]
            .companies
            .iter()
            .map(|c| c.company_name.as_str())
            .collect();
        assert_eq!(names, ["Early", "Late"]);
    }

    #[test]
    fn partners_without_companies_in_range_are_dropped() {
        let ds = PartnerDataset::from_json(SAMPLE).unwrap();
        let partners = ds.partners_in_range(&YearRange::new(2010, 2013).unwrap());
        assert_eq!(partners.len(), 1);
        assert_eq!(partners[0].companies[0].company_name, "Old");
    }
}
