/// Divides a continuous range into equal bands, one per domain value.
///
/// Inner and outer padding are the same fraction of a step, and the bands
/// are centered in the range.
#[derive(Debug, Clone)]
pub struct BandScale<T> {
    domain: Vec<T>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl<T: PartialEq> BandScale<T> {
    pub fn new(domain: Vec<T>, range: (f64, f64), padding: f64) -> Self {
        let (r0, r1) = range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let n = domain.len() as f64;
        let padding = padding.clamp(0.0, 1.0);

        let step = (hi - lo) / (n - padding + padding * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - padding)) * 0.5;

        Self {
            domain,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Left/top edge of the band for `value`
    pub fn position(&self, value: &T) -> Option<f64> {
        self.domain
            .iter()
            .position(|v| v == value)
            .map(|i| self.start + self.step * i as f64)
    }

    pub fn center(&self, value: &T) -> Option<f64> {
        self.position(value).map(|p| p + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bands_without_padding_tile_the_range() {
        let scale = BandScale::new(vec![0u32, 1, 2, 3], (0.0, 400.0), 0.0);

        assert_eq!(scale.bandwidth(), 100.0);
        assert_eq!(scale.position(&0), Some(0.0));
        assert_eq!(scale.position(&3), Some(300.0));
        assert_eq!(scale.position(&4), None);
    }

    #[test]
    fn test_padded_bands_are_centered() {
        let scale = BandScale::new(vec![2010, 2020], (0.0, 750.0), 0.05);

        let first = scale.position(&2010).unwrap();
        let last = scale.position(&2020).unwrap();
        let right_gap = 750.0 - (last + scale.bandwidth());

        assert!(first > 0.0);
        assert!(approx(first, right_gap));
        assert!(approx(scale.bandwidth(), scale.step() * 0.95));
        assert!(approx(last - first, scale.step()));
    }

    #[test]
    fn test_center() {
        let scale = BandScale::new(vec!["a", "b"], (0.0, 200.0), 0.0);
        assert_eq!(scale.center(&"b"), Some(150.0));
    }

    #[test]
    fn test_empty_domain() {
        let scale: BandScale<i32> = BandScale::new(vec![], (0.0, 100.0), 0.05);
        assert_eq!(scale.position(&1), None);
        assert!(scale.domain().is_empty());
    }
}
