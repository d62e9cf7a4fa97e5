// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The year-range control.

use chrono::NaiveDate;

use crate::{BatchCode, DataError};

/// An inclusive range of calendar years with fixed bounds and a minimum span.
///
/// Dragging an endpoint clamps that endpoint, never the other one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
    min: i32,
    max: i32,
}

impl YearRange {
    /// Lowest selectable year.
    pub const MIN_YEAR: i32 = 2005;
    /// Highest selectable year.
    pub const MAX_YEAR: i32 = 2025;
    /// Minimum distance between the endpoints, in years.
    pub const MIN_SPAN: i32 = 1;

    /// Creates a range within the default bounds.
    pub fn new(start: i32, end: i32) -> Result<Self, DataError> {
        Self::with_bounds(start, end, Self::MIN_YEAR, Self::MAX_YEAR)
    }

    /// Creates a range within custom bounds.
    pub fn with_bounds(start: i32, end: i32, min: i32, max: i32) -> Result<Self, DataError> {
        let valid = min + Self::MIN_SPAN <= max
            && min <= start
            && end <= max
            && start + Self::MIN_SPAN <= end;
        if !valid {
            return Err(DataError::InvalidYearRange { start, end });
        }
        Ok(Self {
            start,
            end,
            min,
            max,
        })
    }

    /// Returns the first year.
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Returns the last year.
    pub fn end(&self) -> i32 {
        self.end
    }

    /// Moves the start endpoint, clamped to `[min, end - MIN_SPAN]`.
    pub fn drag_start(&mut self, year: i32) {
        self.start = year.clamp(self.min, self.end - Self::MIN_SPAN);
    }

    /// Moves the end endpoint, clamped to `[start + MIN_SPAN, max]`.
    pub fn drag_end(&mut self, year: i32) {
        self.end = year.clamp(self.start + Self::MIN_SPAN, self.max);
    }

    /// Returns `true` if `year` lies within the range.
    pub fn contains_year(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Returns the first and last calendar day covered by the range.
    pub fn dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((
            NaiveDate::from_ymd_opt(self.start, 1, 1)?,
            NaiveDate::from_ymd_opt(self.end, 12, 31)?,
        ))
    }

    /// Returns the first and last batch codes covered by the range.
    pub fn batch_bounds(&self) -> (BatchCode, BatchCode) {
        (
            BatchCode::first_of_year(self.start),
            BatchCode::last_of_year(self.end),
        )
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: Self::MIN_YEAR,
            end: Self::MAX_YEAR,
            min: Self::MIN_YEAR,
            max: Self::MAX_YEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dragging_clamps_the_dragged_endpoint() {
        let mut r = YearRange::new(2010, 2015).unwrap();
        r.drag_start(2020);
        assert_eq!((r.start(), r.end()), (2014, 2015));
        r.drag_end(2000);
        assert_eq!((r.start(), r.end()), (2014, 2015));
        r.drag_end(2030);
        assert_eq!(r.end(), 2025);
        r.drag_start(1990);
        assert_eq!(r.start(), 2005);
    }

    #[test]
    fn construction_validates_bounds_and_span() {
        assert!(YearRange::new(2004, 2010).is_err());
        assert!(YearRange::new(2010, 2010).is_err());
        assert!(YearRange::new(2012, 2010).is_err());
        assert!(YearRange::new(2024, 2025).is_ok());
    }

    #[test]
    fn bounds_map_to_first_and_last_batches() {
        let r = YearRange::new(2006, 2007).unwrap();
        let (a, b) = r.batch_bounds();
        assert_eq!((a.to_string(), b.to_string()), ("W06".into(), "F07".into()));
        let (d0, d1) = r.dates().unwrap();
        assert_eq!((BatchCode::from_date(d0), BatchCode::from_date(d1)), (a, b));
    }
}
