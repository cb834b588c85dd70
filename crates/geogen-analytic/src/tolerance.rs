//! Shared epsilon policy for every canonicalization and equality check.
//!
//! All ε-tolerant comparisons in this crate go through [`approx_eq`] so the
//! scaling rule lives in one place. Divergent tolerance logic between types
//! is exactly what breaks the transitivity of "equal within ε" across
//! pictures (see the configuration's design notes on tolerance transitivity).

/// Absolute floor for the tolerance, used when both operands are near zero.
pub const EPSILON: f64 = 1e-9;

/// Compares two scalars for equality within [`EPSILON`], scaled by the
/// magnitude of the larger operand so that comparisons on large-magnitude
/// coordinates don't spuriously fail.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON * (1.0 + a.abs().max(b.abs()))
}

/// Like [`approx_eq`] but against an explicit zero, for "is this quantity
/// negligible" checks (determinants, cross products, etc.) where there is
/// no second operand to scale against.
pub fn approx_zero(a: f64) -> bool {
    a.abs() < EPSILON
}

/// Quantization grid used by the canonical-key hash bucket in
/// [`crate::picture`]. Coarser than `EPSILON` itself so that two values
/// within tolerance of each other, but straddling a bucket boundary, still
/// land in adjacent cells that the near-duplicate scan checks.
pub(crate) fn quantize(v: f64) -> i64 {
    (v / (EPSILON * 8.0)).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_values_are_equal() {
        assert!(approx_eq(1.0, 1.0));
    }

    #[test]
    fn tiny_differences_are_equal() {
        assert!(approx_eq(1.0, 1.0 + 1e-12));
    }

    #[test]
    fn large_magnitude_differences_scale() {
        assert!(approx_eq(1e9, 1e9 + 1e-4));
        assert!(!approx_eq(1e9, 1e9 + 10.0));
    }

    #[test]
    fn real_differences_are_not_equal() {
        assert!(!approx_eq(1.0, 1.1));
    }
}
