// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny scale utilities.
//!
//! Batches map onto a [`ScaleBand`]; percentages map onto a [`ScaleLinear`].

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps everything to the middle of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return (r0 + r1) * 0.5;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns “nice-ish” tick values for the domain, clipped to it.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        nice_ticks(lo, hi, count)
            .into_iter()
            .filter(|v| *v >= lo - 1e-9 && *v <= hi + 1e-9)
            .collect()
    }
}

pub(crate) fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    // Round away accumulated error so labels print as `0.1`, not `0.30000000000000004`.
    (0..=n)
        .map(|i| ((start + step * i as f64) * 1e9).round() / 1e9)
        .collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete band scale for categorical axes.
///
/// Padding follows the usual band-scale convention: `padding_inner` is a fraction of the
/// step left empty between bands, `padding_outer` a fraction of the step before the first
/// and after the last band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`, with 0.1 padding.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding. Inner padding is clamped to `[0, 1]`.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        let span = (r1 - r0).abs();
        let denom = (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        span / denom
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the start position of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let start = r0.min(r1);
        let step = self.step();
        let used = step * (self.count as f64 - self.padding_inner);
        let offset = ((r1 - r0).abs() - used) * 0.5;
        start + offset + step * index as f64
    }

    /// Returns the center position of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + self.band_width() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_scale_fills_range_symmetrically() {
        let band = ScaleBand::new((0.0, 100.0), 4).with_padding(0.0, 0.0);
        assert!((band.band_width() - 25.0).abs() < 1e-9, "no padding splits evenly");
        assert!((band.x(0) - 0.0).abs() < 1e-9, "first band at range start");
        assert!((band.center(3) - 87.5).abs() < 1e-9, "last band centered");

        let padded = ScaleBand::new((0.0, 100.0), 4);
        let first = padded.x(0);
        let last_end = padded.x(3) + padded.band_width();
        assert!((first - (100.0 - last_end)).abs() < 1e-9, "outer padding is symmetric");
        assert!(padded.band_width() < padded.step(), "inner padding shrinks bands");
    }

    #[test]
    fn empty_band_scale_is_degenerate_not_nan() {
        let band = ScaleBand::new((0.0, 100.0), 0);
        assert_eq!(band.band_width(), 0.0);
        assert!(band.x(0).is_finite());
    }

    #[test]
    fn linear_scale_inverts_range_and_ticks_stay_in_domain() {
        let s = ScaleLinear::new((0.0, 47.0), (300.0, 0.0));
        assert_eq!(s.map(0.0), 300.0);
        assert_eq!(s.map(47.0), 0.0);
        let ticks = s.ticks(10);
        assert_eq!(ticks.first(), Some(&0.0));
        assert!(ticks.iter().all(|t| *t <= 47.0), "ticks clipped to the domain");
        assert_eq!(ticks.last(), Some(&45.0));
    }
}
