// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch codes (`W21`, `S22`, `F24`, ...).

use core::fmt;
use core::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::DataError;

/// Program season. Declaration order is chronological order within a year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    /// Winter batch (January to April).
    W,
    /// Summer batch (May to August).
    S,
    /// Fall batch (September to December).
    F,
}

impl Season {
    /// Returns the season a calendar month (1-12) belongs to.
    ///
    /// Months outside `1..=12` fall into the last bucket.
    pub fn for_month(month: u32) -> Self {
        match month {
            1..=4 => Self::W,
            5..=8 => Self::S,
            _ => Self::F,
        }
    }

    /// Returns the rank used for ordering (`W=0`, `S=1`, `F=2`).
    pub fn rank(self) -> u8 {
        match self {
            Self::W => 0,
            Self::S => 1,
            Self::F => 2,
        }
    }

    fn letter(self) -> char {
        match self {
            Self::W => 'W',
            Self::S => 'S',
            Self::F => 'F',
        }
    }
}

/// A regular batch code: one season letter followed by a two-digit year.
///
/// Ordering is chronological: by year, then by season rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchCode {
    // Field order matters for the derived `Ord`.
    year: u8,
    season: Season,
}

impl BatchCode {
    /// Creates a code from a season and a two-digit year (`0..=99`).
    pub fn new(season: Season, year: u8) -> Result<Self, DataError> {
        if year > 99 {
            return Err(DataError::InvalidBatchCode(format!("{}{year}", season.letter())));
        }
        Ok(Self { year, season })
    }

    /// Maps a calendar date to the batch running in that quarter bucket.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: two_digit_year(date.year()),
            season: Season::for_month(date.month()),
        }
    }

    /// First batch of a calendar year.
    pub fn first_of_year(year: i32) -> Self {
        Self {
            year: two_digit_year(year),
            season: Season::W,
        }
    }

    /// Last batch of a calendar year.
    pub fn last_of_year(year: i32) -> Self {
        Self {
            year: two_digit_year(year),
            season: Season::F,
        }
    }

    /// Returns the season.
    pub fn season(self) -> Season {
        self.season
    }

    /// Returns the two-digit year.
    pub fn year(self) -> u8 {
        self.year
    }

    /// Returns the full calendar year, assuming the 2000s.
    pub fn full_year(self) -> i32 {
        2000 + i32::from(self.year)
    }
}

fn two_digit_year(year: i32) -> u8 {
    u8::try_from(year.rem_euclid(100)).unwrap_or(0)
}

impl FromStr for BatchCode {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DataError::InvalidBatchCode(s.to_owned());
        let mut chars = s.chars();
        let season = match chars.next() {
            Some('W' | 'w') => Season::W,
            Some('S' | 's') => Season::S,
            Some('F' | 'f') => Season::F,
            _ => return Err(invalid()),
        };
        let digits = chars.as_str();
        if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = digits.parse::<u8>().map_err(|_| invalid())?;
        Ok(Self { year, season })
    }
}

impl fmt::Display for BatchCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.season.letter(), self.year)
    }
}
