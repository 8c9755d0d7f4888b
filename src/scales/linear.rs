/// Affine map from a numeric domain onto a numeric range.
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

    pub fn scale(&self, value: f64) -> f64 {
        interpolate(self.range, normalize(self.domain, value))
    }

    pub fn invert(&self, value: f64) -> f64 {
        interpolate(self.domain, normalize(self.range, value))
    }

    /// Roughly `count` round values inside the domain, stepping by 1, 2 or 5
    /// times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if lo == hi || count == 0 {
            return vec![lo];
        }

        let step = tick_step(lo, hi, count);
        if !step.is_finite() || step <= 0.0 {
            return Vec::new();
        }

        // Sub-unit steps divide by the inverse so ticks land on exact decimals
        if step < 1.0 {
            let inverse = (1.0 / step).round();
            let (first, last) = ((lo * inverse).ceil() as i64, (hi * inverse).floor() as i64);
            (first..=last).map(|i| i as f64 / inverse).collect()
        } else {
            let (first, last) = ((lo / step).ceil() as i64, (hi / step).floor() as i64);
            (first..=last).map(|i| i as f64 * step).collect()
        }
    }
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let base = 10f64.powf(raw.log10().floor());
    let error = raw / base;

    if error >= 50f64.sqrt() {
        base * 10.0
    } else if error >= 10f64.sqrt() {
        base * 5.0
    } else if error >= 2f64.sqrt() {
        base * 2.0
    } else {
        base
    }
}

/// Position of `value` within `(a, b)` as a fraction; a zero-width span
/// puts everything at the midpoint.
pub(crate) fn normalize((a, b): (f64, f64), value: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        0.5
    } else {
        (value - a) / span
    }
}

fn interpolate((a, b): (f64, f64), t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_invert() {
        let scale = LinearScale::new((-10.0, 30.0), (0.0, 100.0));

        assert_eq!(scale.scale(-10.0), 0.0);
        assert_eq!(scale.scale(10.0), 50.0);
        assert_eq!(scale.scale(30.0), 100.0);
        assert_eq!(scale.invert(25.0), 0.0);
        assert_eq!(scale.invert(100.0), 30.0);
    }

    #[test]
    fn test_reversed_range() {
        let scale = LinearScale::new((0.0, 20.0), (40.0, 0.0));
        assert_eq!(scale.scale(0.0), 40.0);
        assert_eq!(scale.scale(20.0), 0.0);
        assert_eq!(scale.scale(5.0), 30.0);
    }

    #[test]
    fn test_ticks_are_round_numbers() {
        let scale = LinearScale::new((-8.0, 33.0), (0.0, 100.0));
        assert_eq!(scale.ticks(5), vec![0.0, 10.0, 20.0, 30.0]);

        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        assert_eq!(scale.ticks(5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);

        let scale = LinearScale::new((-12.5, 41.0), (0.0, 100.0));
        assert_eq!(scale.ticks(5), vec![-10.0, 0.0, 10.0, 20.0, 30.0, 40.0]);

        let scale = LinearScale::new((7.0, 7.0), (0.0, 100.0));
        assert_eq!(scale.ticks(5), vec![7.0]);
    }

    #[test]
    fn test_degenerate_domain_maps_to_midpoint() {
        let scale = LinearScale::new((7.0, 7.0), (0.0, 60.0));
        assert_eq!(scale.scale(7.0), 30.0);
        assert_eq!(scale.scale(100.0), 30.0);
    }
}
