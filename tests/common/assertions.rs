//! Assertion utilities for testing.
//!
//! Floating-point comparisons that treat NaN as equal to NaN, since missing
//! cells and degenerate normalizations are expected to produce it.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// Two NaNs compare equal; infinities must match exactly.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    if actual.is_nan() && expected.is_nan() {
        return;
    }
    if actual.is_infinite() || expected.is_infinite() {
        assert_eq!(actual, expected, "Infinite values differ");
        return;
    }

    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that two slices of floating-point values are approximately element-wise equal.
///
/// # Panics
///
/// Panics if the slices have different lengths or if any element-wise comparison fails.
pub fn assert_array_approx_eq<'a, A, E>(actual: A, expected: E, epsilon: Option<f64>)
where
    A: IntoIterator<Item = &'a f64>,
    E: IntoIterator<Item = &'a f64>,
{
    let actual: Vec<f64> = actual.into_iter().copied().collect();
    let expected: Vec<f64> = expected.into_iter().copied().collect();

    assert_eq!(
        actual.len(),
        expected.len(),
        "Arrays have different lengths: actual = {}, expected = {}",
        actual.len(),
        expected.len()
    );

    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_approx_eq(*a, *e, epsilon);
    }
}

/// Assert that a value is within expected bounds (inclusive).
pub fn assert_in_range(actual: f64, min: f64, max: f64) {
    assert!(
        actual >= min && actual <= max,
        "Value not in range: actual = {}, min = {}, max = {}",
        actual,
        min,
        max
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0 + 1e-12, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
        assert_approx_eq(f64::NAN, f64::NAN, None);
    }

    #[test]
    fn test_assert_array_approx_eq() {
        assert_array_approx_eq(&[1.0, f64::NAN, 3.0], &[1.0, f64::NAN, 3.0], None);
        assert_array_approx_eq(&[1.0, 2.0], &[1.001, 2.001], Some(0.01));
    }

    #[test]
    fn test_assert_in_range() {
        assert_in_range(5.0, 0.0, 10.0);
        assert_in_range(10.0, 0.0, 10.0);
    }
}
