// ── Scales ──
//
// Domain-to-range projections plus declarative tick sequences. A
// degenerate domain (single point, or equal endpoints) projects to the
// range midpoint rather than dividing by zero.

use chrono::{DateTime, Utc};

/// One axis tick: projected position and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

// ── Time scale ────────────────────────────────────────────────────

/// Maps timestamps in `[domain.0, domain.1]` onto a pixel range.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    domain: (DateTime<Utc>, DateTime<Utc>),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Smallest-to-largest extent over the given dates; `None` when
    /// the iterator is empty.
    pub fn fit(
        dates: impl IntoIterator<Item = DateTime<Utc>>,
        range: (f64, f64),
    ) -> Option<Self> {
        let mut dates = dates.into_iter();
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self::new((min, max), range))
    }

    pub fn domain(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        self.domain
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn project(&self, at: DateTime<Utc>) -> f64 {
        let start = self.domain.0.timestamp_millis() as f64;
        let end = self.domain.1.timestamp_millis() as f64;
        let t = if end > start {
            ((at.timestamp_millis() as f64) - start) / (end - start)
        } else {
            0.5
        };
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// `count` evenly spaced ticks across the domain, endpoints
    /// included, labelled with the given strftime format.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn ticks(&self, count: usize, format: &str) -> Vec<Tick> {
        if count == 0 {
            return Vec::new();
        }
        let start = self.domain.0.timestamp_millis();
        let span = (self.domain.1.timestamp_millis() - start) as f64;
        (0..count)
            .map(|i| {
                let t = if count > 1 {
                    i as f64 / (count - 1) as f64
                } else {
                    0.0
                };
                let at = DateTime::from_timestamp_millis(start + (span * t) as i64)
                    .unwrap_or(self.domain.0);
                Tick {
                    position: self.project(at),
                    label: at.format(format).to_string(),
                }
            })
            .collect()
    }
}

// ── Linear scale ──────────────────────────────────────────────────

/// Maps values in `[domain.0, domain.1]` onto a pixel range. The
/// range may be inverted (start larger than end) for y axes.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Extent over the values, padded 5% below the minimum and 5%
    /// above the maximum. NaNs are skipped; `None` when nothing
    /// comparable remains.
    pub fn fit_padded(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Option<Self> {
        let mut extent: Option<(f64, f64)> = None;
        for v in values {
            if v.is_nan() {
                continue;
            }
            extent = Some(match extent {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
        let (min, max) = extent?;
        Some(Self::new((min * 0.95, max * 1.05), range))
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn project(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let t = if (d1 - d0).abs() > f64::EPSILON {
            (value - d0) / (d1 - d0)
        } else {
            0.5
        };
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Round-valued ticks covering the domain, at a 1/2/5 step sized
    /// for roughly `count` intervals.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        let (d0, d1) = self.domain;
        if count == 0 || !(d1 - d0).is_finite() || (d1 - d0).abs() < f64::EPSILON {
            return Vec::new();
        }
        let step = tick_increment(d0, d1, count);
        let precision = label_precision(step);
        let first = (d0 / step).ceil() as i64;
        let last = (d1 / step + 1e-9).floor() as i64;
        (first..=last)
            .map(|i| {
                let value = i as f64 * step;
                Tick {
                    position: self.project(value),
                    label: format!("{value:.precision$}"),
                }
            })
            .collect()
    }
}

/// Nice step size: a power of ten scaled by 1, 2 or 5, chosen so the
/// domain divides into about `count` intervals.
#[allow(clippy::cast_precision_loss)]
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / (count.max(1) as f64);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

/// Decimal places needed to print multiples of `step` exactly.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn label_precision(step: f64) -> usize {
    let places = -step.log10().floor();
    if places > 0.0 { places as usize } else { 0 }
}
