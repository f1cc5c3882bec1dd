//! Linear and point scales for laying out SVG charts.

/// Maps a continuous domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// A zero-width domain maps everything to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (a, b) = self.domain;
        let (start, stop) = (a.min(b), a.max(b));
        if !start.is_finite() || !stop.is_finite() {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }

        let step = tick_step(stop - start, count.max(1));
        let first = (start / step).ceil() as i64;
        let last = (stop / step).floor() as i64;
        (first..=last)
            .map(|index| {
                if step >= 1.0 {
                    index as f64 * step
                } else {
                    index as f64 / (1.0 / step).round()
                }
            })
            .collect()
    }
}

/// 1, 2 or 5 times a power of ten, close to `span / count`.
fn tick_step(span: f64, count: usize) -> f64 {
    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Evenly spaced positions for an ordered set of categories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale {
    count: usize,
    range: (f64, f64),
}

impl PointScale {
    pub fn new(count: usize, range: (f64, f64)) -> Self {
        Self { count, range }
    }

    pub fn position(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        if self.count <= 1 {
            return (r0 + r1) / 2.0;
        }
        r0 + index as f64 * (r1 - r0) / (self.count - 1) as f64
    }
}
