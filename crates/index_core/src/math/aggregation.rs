//! Weighted aggregation of per-sector values.
//!
//! Index price/earnings is (sum of sector prices) / (sum of sector earnings).
//! When sector weights stand in for each sector's share of earnings, that
//! ratio reduces to the weighted harmonic mean of the sector multiples:
//!
//! ```text
//! M_index = 1 / Σ (w_i / m_i)
//! ```
//!
//! Growth, by contrast, is aggregated additively: `g_index = Σ w_i g_i`.

use num_traits::Float;

/// Additive weighted sum `Σ w_i x_i`.
///
/// # Examples
///
/// ```
/// use index_core::math::weighted_sum;
///
/// let total = weighted_sum([(0.5_f64, 0.10), (0.5, -0.10)]);
/// assert_eq!(total, 0.0);
/// ```
pub fn weighted_sum<T, I>(pairs: I) -> T
where
    T: Float,
    I: IntoIterator<Item = (T, T)>,
{
    pairs
        .into_iter()
        .fold(T::zero(), |acc, (weight, value)| acc + weight * value)
}

/// Harmonic denominator `Σ w_i / x_i`.
///
/// Returns `None` if any value is not strictly positive and finite, since
/// the term `w_i / x_i` is then undefined or meaningless.
///
/// # Examples
///
/// ```
/// use index_core::math::harmonic_denominator;
///
/// let d = harmonic_denominator([(0.5_f64, 10.0), (0.5, 20.0)]).unwrap();
/// assert!((d - 0.075).abs() < 1e-12);
///
/// assert!(harmonic_denominator([(1.0_f64, 0.0)]).is_none());
/// ```
pub fn harmonic_denominator<T, I>(pairs: I) -> Option<T>
where
    T: Float,
    I: IntoIterator<Item = (T, T)>,
{
    let mut denominator = T::zero();
    for (weight, value) in pairs {
        if value <= T::zero() || !value.is_finite() {
            return None;
        }
        denominator = denominator + weight / value;
    }
    Some(denominator)
}

/// Weighted harmonic mean `1 / Σ (w_i / x_i)`.
///
/// Returns `None` if any value is not strictly positive and finite, or if
/// the denominator is not strictly positive (all weights zero).
///
/// # Examples
///
/// ```
/// use index_core::math::weighted_harmonic_mean;
///
/// let m = weighted_harmonic_mean([(0.5_f64, 10.0), (0.5, 20.0)]).unwrap();
/// assert!((m - 40.0 / 3.0).abs() < 1e-12);
/// ```
pub fn weighted_harmonic_mean<T, I>(pairs: I) -> Option<T>
where
    T: Float,
    I: IntoIterator<Item = (T, T)>,
{
    let denominator = harmonic_denominator(pairs)?;
    if denominator > T::zero() {
        Some(denominator.recip())
    } else {
        None
    }
}
