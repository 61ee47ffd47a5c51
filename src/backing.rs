// ============================================================================
// Backing Integer
// Bound alias for the signed primitives that can store a numeric value
// ============================================================================

use num_integer::Integer;
use num_traits::{
    CheckedAdd, CheckedDiv, CheckedMul, CheckedNeg, CheckedSub, FromPrimitive, PrimInt, Signed,
    ToPrimitive,
};
use std::fmt;
use std::hash::Hash;

/// Signed primitive integer usable as backing storage for [`FixedPoint`] and
/// [`Rational`].
///
/// Implemented automatically for `i8`, `i16`, `i32`, `i64` and `i128`. The
/// trait only bundles the `num-traits`/`num-integer` capabilities the value
/// types need (checked arithmetic, gcd/lcm, bounds, primitive casts); it adds
/// no methods of its own.
///
/// [`FixedPoint`]: crate::FixedPoint
/// [`Rational`]: crate::Rational
pub trait BackingInt:
    PrimInt
    + Signed
    + Integer
    + CheckedAdd
    + CheckedSub
    + CheckedMul
    + CheckedDiv
    + CheckedNeg
    + FromPrimitive
    + ToPrimitive
    + Hash
    + fmt::Display
    + fmt::Debug
{
}

impl<T> BackingInt for T where
    T: PrimInt
        + Signed
        + Integer
        + CheckedAdd
        + CheckedSub
        + CheckedMul
        + CheckedDiv
        + CheckedNeg
        + FromPrimitive
        + ToPrimitive
        + Hash
        + fmt::Display
        + fmt::Debug
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_backing<T: BackingInt>() {}

    #[test]
    fn test_signed_primitives_qualify() {
        assert_backing::<i8>();
        assert_backing::<i16>();
        assert_backing::<i32>();
        assert_backing::<i64>();
        assert_backing::<i128>();
    }
}
