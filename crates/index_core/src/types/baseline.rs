//! Index-level scalar anchors.

use super::error::ConfigurationError;

/// Current price level and reference multiple of the whole index.
///
/// `base_eps` is derived once on construction as
/// `base_price / reference_multiple` and never recomputed.
///
/// # Examples
///
/// ```
/// use index_core::types::IndexBaseline;
///
/// let baseline = IndexBaseline::new(6858.47, 22.0).unwrap();
/// assert!((baseline.base_eps() - 311.7486).abs() < 1e-3);
///
/// assert!(IndexBaseline::new(0.0, 22.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexBaseline {
    base_price: f64,
    reference_multiple: f64,
    base_eps: f64,
}

impl IndexBaseline {
    /// Creates a validated baseline.
    ///
    /// # Errors
    ///
    /// - `NonFiniteValue` if either input is NaN or infinite
    /// - `NonPositivePrice` if `base_price <= 0`
    /// - `NonPositiveReferenceMultiple` if `reference_multiple <= 0`
    pub fn new(base_price: f64, reference_multiple: f64) -> Result<Self, ConfigurationError> {
        if !base_price.is_finite() {
            return Err(ConfigurationError::NonFiniteValue {
                field: "base_price".to_string(),
                value: base_price,
            });
        }
        if !reference_multiple.is_finite() {
            return Err(ConfigurationError::NonFiniteValue {
                field: "reference_multiple".to_string(),
                value: reference_multiple,
            });
        }
        if base_price <= 0.0 {
            return Err(ConfigurationError::NonPositivePrice(base_price));
        }
        if reference_multiple <= 0.0 {
            return Err(ConfigurationError::NonPositiveReferenceMultiple(
                reference_multiple,
            ));
        }
        Ok(Self {
            base_price,
            reference_multiple,
            base_eps: base_price / reference_multiple,
        })
    }

    /// Current observed index price.
    #[inline]
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Index-level multiple used to back out `base_eps`.
    #[inline]
    pub fn reference_multiple(&self) -> f64 {
        self.reference_multiple
    }

    /// Current index earnings per share.
    #[inline]
    pub fn base_eps(&self) -> f64 {
        self.base_eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_base_eps_derivation() {
        let baseline = IndexBaseline::new(5000.0, 20.0).unwrap();
        assert_relative_eq!(baseline.base_eps(), 250.0);
        assert_eq!(baseline.base_price(), 5000.0);
        assert_eq!(baseline.reference_multiple(), 20.0);
    }

    #[test]
    fn test_non_positive_price() {
        assert_eq!(
            IndexBaseline::new(-1.0, 20.0),
            Err(ConfigurationError::NonPositivePrice(-1.0))
        );
    }

    #[test]
    fn test_non_positive_reference_multiple() {
        assert_eq!(
            IndexBaseline::new(5000.0, 0.0),
            Err(ConfigurationError::NonPositiveReferenceMultiple(0.0))
        );
    }

    #[test]
    fn test_non_finite_inputs() {
        assert!(matches!(
            IndexBaseline::new(f64::NAN, 20.0),
            Err(ConfigurationError::NonFiniteValue { .. })
        ));
        assert!(matches!(
            IndexBaseline::new(5000.0, f64::INFINITY),
            Err(ConfigurationError::NonFiniteValue { .. })
        ));
    }
}
