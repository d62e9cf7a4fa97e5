// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset side of batchboard.
//!
//! This crate provides:
//! - [`BatchCode`] parsing and chronological ordering (`W < S < F` within a year),
//! - decoding of the bundled stats and partner JSON files,
//! - the aggregation step that turns a date range into an ordered list of
//!   [`BatchRecord`]s with precomputed percentages, and
//! - the [`YearRange`] control that feeds it.
//!
//! Records are immutable once built; charts only read them.

mod aggregate;
mod batch;
mod category;
mod dataset;
mod error;
mod partners;
mod range;

pub use aggregate::{BatchRecord, DataType, PerType, location_totals};
pub use batch::{BatchCode, Season};
pub use category::{CategorySet, OTHER};
pub use dataset::{BatchStats, Dataset, Stats};
pub use error::DataError;
pub use partners::{Company, Partner, PartnerDataset, PartnerEntry};
pub use range::YearRange;
