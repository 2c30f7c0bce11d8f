//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to positions. The chart compositor resolves
//! one shared domain per axis; renderers instantiate these against pixel
//! ranges.

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is degenerate.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f64::EPSILON {
            return Err(Error::ScaleDomain("domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Logarithmic scale (base 10 by default).
///
/// Construction fails on a non-positive domain; values are validated long
/// before they get here (at reshape and composition time), so this is the
/// last line of defense, not the first.
#[derive(Debug, Clone, Copy)]
pub struct LogScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
    base: f64,
}

impl LogScale {
    /// Create a new logarithmic scale with base 10.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain contains non-positive values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        Self::with_base(domain, range, 10.0)
    }

    /// Create a logarithmic scale with a custom base.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain contains non-positive values or the
    /// base is invalid.
    pub fn with_base(domain: (f64, f64), range: (f64, f64), base: f64) -> Result<Self> {
        if domain.0 <= 0.0 || domain.1 <= 0.0 {
            return Err(Error::ScaleDomain("log scale domain must be positive".to_string()));
        }

        if base <= 0.0 || (base - 1.0).abs() < f64::EPSILON {
            return Err(Error::ScaleDomain("log scale base must be positive and not 1".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
            base,
        })
    }
}

impl Scale<f64, f64> for LogScale {
    fn scale(&self, value: f64) -> f64 {
        let log_base = self.base.ln();
        let log_min = self.domain_min.ln() / log_base;
        let log_max = self.domain_max.ln() / log_base;
        let log_val = value.max(f64::MIN_POSITIVE).ln() / log_base;

        let t = (log_val - log_min) / (log_max - log_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Band scale: ordered categories mapped to centered positions along a
/// continuous range. Used for the antibiotic axis.
#[derive(Debug, Clone)]
pub struct BandScale {
    categories: Vec<String>,
    range_min: f64,
    range_max: f64,
}

impl BandScale {
    /// Create a new band scale over the given categories, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if no categories are given.
    pub fn new(categories: Vec<String>, range: (f64, f64)) -> Result<Self> {
        if categories.is_empty() {
            return Err(Error::ScaleDomain("band scale requires at least one category".to_string()));
        }

        Ok(Self { categories, range_min: range.0, range_max: range.1 })
    }

    /// Center position of a category, or `None` if it is not in the domain.
    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        let index = self.categories.iter().position(|c| c == category)?;
        let step = (self.range_max - self.range_min) / self.categories.len() as f64;
        Some(self.range_min + step * (index as f64 + 0.5))
    }

    /// Width of one band.
    #[must_use]
    pub fn band_width(&self) -> f64 {
        ((self.range_max - self.range_min) / self.categories.len() as f64).abs()
    }

    /// The ordered categories.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The range extent.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("valid scale");
        assert_relative_eq!(scale.scale(0.0), 0.0);
        assert_relative_eq!(scale.scale(50.0), 0.5);
        assert_relative_eq!(scale.scale(100.0), 1.0);
    }

    #[test]
    fn test_linear_scale_invert() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("valid scale");
        assert_relative_eq!(scale.invert(0.5), 50.0);
    }

    #[test]
    fn test_linear_scale_equal_domain_error() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_log_scale_decades() {
        let scale = LogScale::new((1.0, 1000.0), (0.0, 3.0)).expect("valid scale");
        assert_relative_eq!(scale.scale(1.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(scale.scale(10.0), 1.0, epsilon = 1e-9);
        assert_relative_eq!(scale.scale(100.0), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_log_scale_rejects_non_positive_domain() {
        assert!(LogScale::new((-1.0, 100.0), (0.0, 1.0)).is_err());
        assert!(LogScale::new((0.0, 100.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_log_scale_rejects_bad_base() {
        assert!(LogScale::with_base((1.0, 100.0), (0.0, 1.0), 0.0).is_err());
        assert!(LogScale::with_base((1.0, 100.0), (0.0, 1.0), 1.0).is_err());
    }

    #[test]
    fn test_log_scale_sub_unit_domain() {
        // MIC values live well below 1.0
        let scale = LogScale::new((0.001, 1000.0), (0.0, 6.0)).expect("valid scale");
        assert_relative_eq!(scale.scale(0.001), 0.0, epsilon = 1e-9);
        assert_relative_eq!(scale.scale(1.0), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_band_scale_positions() {
        let scale = BandScale::new(
            vec!["Penicillin".into(), "Streptomycin".into(), "Neomycin".into()],
            (0.0, 300.0),
        )
        .expect("valid scale");

        assert_relative_eq!(scale.position("Penicillin").expect("in domain"), 50.0);
        assert_relative_eq!(scale.position("Streptomycin").expect("in domain"), 150.0);
        assert_relative_eq!(scale.position("Neomycin").expect("in domain"), 250.0);
        assert!(scale.position("Erythromycin").is_none());
    }

    #[test]
    fn test_band_scale_inverted_range() {
        // Screen-space y runs downward; centers must still land inside bands
        let scale = BandScale::new(vec!["a".into(), "b".into()], (200.0, 0.0)).expect("valid");
        assert_relative_eq!(scale.position("a").expect("in domain"), 150.0);
        assert_relative_eq!(scale.position("b").expect("in domain"), 50.0);
        assert_relative_eq!(scale.band_width(), 100.0);
    }

    #[test]
    fn test_band_scale_empty_error() {
        assert!(BandScale::new(vec![], (0.0, 1.0)).is_err());
    }
}
