// ============================================================================
// Rational Number
// Exact fractions kept in lowest terms with a canonical sign
// ============================================================================

use crate::backing::BackingInt;
use crate::errors::{NumericError, NumericResult};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Exact rational number backed by a pair of signed integers.
///
/// Every value is canonical: the denominator is positive, the overall sign is
/// carried by the numerator, and `gcd(numerator, denominator) == 1`. The
/// invariant is restored after every construction and every arithmetic
/// operation, so equality is plain field comparison.
///
/// # Example
/// ```
/// use exact_numeric::Rational;
///
/// let a = Rational::new(2, 3)?;
/// let b = Rational::new(5, 9)?;
/// assert_eq!(a.checked_add(b)?, Rational::new(11, 9)?);
/// assert_eq!(Rational::new(6, -4)?.to_string(), "(-3 / 2)");
/// # Ok::<(), exact_numeric::NumericError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rational<T = i64> {
    numer: T,
    denom: T,
}

/// Numerators of two rationals brought to their least common denominator.
struct ScaledNumerators<T> {
    lhs: T,
    rhs: T,
    lcm: T,
}

impl<T: BackingInt> Rational<T> {
    /// Rationals are never an integral type, even when the value happens to
    /// be whole. Counterpart of a `numeric_limits`-style capability flag.
    pub const IS_INTEGER: bool = false;

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a reduced rational from a numerator and denominator.
    ///
    /// The fraction is reduced by the gcd immediately, and the sign is
    /// canonicalized onto the numerator: the gcd divisor is negated when the
    /// supplied denominator is negative, so the stored denominator is always
    /// positive. `Rational::new(6, -4)` stores `(-3, 2)`.
    ///
    /// # Errors
    /// Returns `InvalidDenominator` if `denominator` is zero.
    #[inline]
    pub fn new(numerator: T, denominator: T) -> NumericResult<Self> {
        if denominator.is_zero() {
            return Err(NumericError::InvalidDenominator);
        }

        let mut gcd = numerator.gcd(&denominator);
        if denominator < T::zero() {
            gcd = -gcd;
        }

        Ok(Self {
            numer: numerator / gcd,
            denom: denominator / gcd,
        })
    }

    /// Create a whole-number rational (denominator 1).
    #[inline]
    pub fn from_integer(value: T) -> Self {
        Self {
            numer: value,
            denom: T::one(),
        }
    }

    /// Zero (0 / 1).
    #[inline]
    pub fn zero() -> Self {
        Self::from_integer(T::zero())
    }

    /// One (1 / 1).
    #[inline]
    pub fn one() -> Self {
        Self::from_integer(T::one())
    }

    /// Minimum representable value, the backing integer's lower bound over 1.
    #[inline]
    pub fn min_value() -> Self {
        Self::from_integer(T::min_value())
    }

    /// Maximum representable value, the backing integer's upper bound over 1.
    #[inline]
    pub fn max_value() -> Self {
        Self::from_integer(T::max_value())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The reduced numerator; carries the sign of the fraction.
    #[inline]
    pub fn numerator(self) -> T {
        self.numer
    }

    /// The reduced denominator; always positive.
    #[inline]
    pub fn denominator(self) -> T {
        self.denom
    }

    /// Check if the value is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.numer.is_zero()
    }

    /// Check if the value is positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.numer > T::zero()
    }

    /// Check if the value is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.numer < T::zero()
    }

    /// Convert to a floating-point approximation of `numerator / denominator`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        match (self.numer.to_f64(), self.denom.to_f64()) {
            (Some(n), Some(d)) => n / d,
            _ => f64::NAN,
        }
    }

    // ========================================================================
    // Common Denominator
    // ========================================================================

    // Scale both numerators to the least common multiple of the denominators.
    // Using the lcm instead of the raw product keeps the intermediate
    // magnitudes as small as possible.
    #[inline]
    fn to_common_denominator(self, other: Self) -> ScaledNumerators<T> {
        let lcm = self.denom.lcm(&other.denom);
        ScaledNumerators {
            lhs: self.numer * (lcm / self.denom),
            rhs: other.numer * (lcm / other.denom),
            lcm,
        }
    }

    #[inline]
    fn checked_common_denominator(self, other: Self) -> NumericResult<ScaledNumerators<T>> {
        let gcd = self.denom.gcd(&other.denom);
        let lcm = (self.denom / gcd)
            .checked_mul(&other.denom)
            .ok_or(NumericError::Overflow)?;
        let lhs = self
            .numer
            .checked_mul(&(lcm / self.denom))
            .ok_or(NumericError::Overflow)?;
        let rhs = other
            .numer
            .checked_mul(&(lcm / other.denom))
            .ok_or(NumericError::Overflow)?;

        Ok(ScaledNumerators { lhs, rhs, lcm })
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked negation.
    ///
    /// # Errors
    /// Returns `Overflow` when negating the minimum numerator.
    #[inline]
    pub fn checked_neg(self) -> NumericResult<Self> {
        let numer = self.numer.checked_neg().ok_or(NumericError::Overflow)?;
        Ok(Self {
            numer,
            denom: self.denom,
        })
    }

    /// Checked addition over the least common denominator; the result is
    /// re-reduced.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if scaling or summing the
    /// numerators leaves the representable range.
    #[inline]
    pub fn checked_add(self, other: Self) -> NumericResult<Self> {
        let scaled = self.checked_common_denominator(other)?;
        let sum = scaled.lhs.checked_add(&scaled.rhs).ok_or_else(|| {
            if scaled.rhs > T::zero() {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })?;

        Self::new(sum, scaled.lcm)
    }

    /// Checked subtraction, as addition of the negated operand.
    #[inline]
    pub fn checked_sub(self, other: Self) -> NumericResult<Self> {
        self.checked_add(other.checked_neg()?)
    }

    /// Checked multiplication; the result is re-reduced.
    ///
    /// # Errors
    /// Returns `Overflow` if either cross product leaves the range.
    #[inline]
    pub fn checked_mul(self, other: Self) -> NumericResult<Self> {
        let numer = self
            .numer
            .checked_mul(&other.numer)
            .ok_or(NumericError::Overflow)?;
        let denom = self
            .denom
            .checked_mul(&other.denom)
            .ok_or(NumericError::Overflow)?;

        Self::new(numer, denom)
    }

    /// Checked division, as multiplication by the inverted divisor; the
    /// result is re-reduced.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero-valued divisor, `Overflow` if
    /// either cross product leaves the range.
    #[inline]
    pub fn checked_div(self, other: Self) -> NumericResult<Self> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        let numer = self
            .numer
            .checked_mul(&other.denom)
            .ok_or(NumericError::Overflow)?;
        let denom = self
            .denom
            .checked_mul(&other.numer)
            .ok_or(NumericError::Overflow)?;

        Self::new(numer, denom)
    }

    /// Returns the minimum of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Returns the maximum of two values.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<T: BackingInt> Default for Rational<T> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: BackingInt> PartialOrd for Rational<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: BackingInt> Ord for Rational<T> {
    /// Total order through the common-denominator scaled numerators.
    ///
    /// Scaling is unchecked here; comparisons of values whose lcm-scaled
    /// numerators exceed the backing integer range are outside the contract.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        let scaled = self.to_common_denominator(*other);
        scaled.lhs.cmp(&scaled.rhs)
    }
}

impl<T: BackingInt> Neg for Rational<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.checked_neg().expect("Rational negation overflow")
    }
}

// Infallible operators for ergonomics (panic on error - use checked_* in
// production). The compound assignments require exclusive access for the
// duration of the call, like any non-atomic read-modify-write.
impl<T: BackingInt> Add for Rational<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("Rational addition overflow")
    }
}

impl<T: BackingInt> AddAssign for Rational<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: BackingInt> Sub for Rational<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("Rational subtraction overflow")
    }
}

impl<T: BackingInt> SubAssign for Rational<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: BackingInt> Mul for Rational<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).expect("Rational multiplication overflow")
    }
}

impl<T: BackingInt> MulAssign for Rational<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: BackingInt> Div for Rational<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs).expect("Rational division error")
    }
}

impl<T: BackingInt> DivAssign for Rational<T> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

// ============================================================================
// Widening Conversion
// ============================================================================

// A rational may be copied into one over a strictly wider backing integer;
// the reduced pair is preserved verbatim. There is no narrowing direction.
macro_rules! impl_widening_from {
    ($narrow:ty => $($wide:ty),+) => {
        $(
            impl From<Rational<$narrow>> for Rational<$wide> {
                #[inline]
                fn from(value: Rational<$narrow>) -> Self {
                    Self {
                        numer: <$wide>::from(value.numer),
                        denom: <$wide>::from(value.denom),
                    }
                }
            }
        )+
    };
}

impl_widening_from!(i8 => i16, i32, i64, i128);
impl_widening_from!(i16 => i32, i64, i128);
impl_widening_from!(i32 => i64, i128);
impl_widening_from!(i64 => i128);

// ============================================================================
// Serde
// ============================================================================

// Derived Deserialize would fill the fields verbatim, letting external input
// violate the reduction invariants that Eq and Ord rely on; deserialize an
// unchecked pair and route it through `new` instead.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRational<T> {
    numer: T,
    denom: T,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Rational<T>
where
    T: BackingInt + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <RawRational<T> as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(raw.numer, raw.denom).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<T: BackingInt> fmt::Debug for Rational<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({} / {})", self.numer, self.denom)
    }
}

impl<T: BackingInt> fmt::Display for Rational<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} / {})", self.numer, self.denom)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use num_integer::Integer;
    use proptest::prelude::*;

    type R64 = Rational<i64>;

    fn parts<T: BackingInt>(r: Rational<T>) -> (T, T) {
        (r.numerator(), r.denominator())
    }

    #[test]
    fn test_default_is_zero() {
        let zero = R64::default();
        assert_eq!(parts(zero), (0, 1));
        assert!(zero.is_zero());
    }

    #[test]
    fn test_new_reduces() {
        assert_eq!(parts(R64::new(6, 4).unwrap()), (3, 2));
        assert_eq!(parts(R64::new(2, 3).unwrap()), (2, 3));
        assert_eq!(parts(R64::new(12, 3).unwrap()), (4, 1));
        assert_eq!(parts(R64::new(0, 7).unwrap()), (0, 1));
    }

    #[test]
    fn test_new_zero_denominator() {
        assert_eq!(R64::new(1, 0), Err(NumericError::InvalidDenominator));
        assert_eq!(R64::new(0, 0), Err(NumericError::InvalidDenominator));
    }

    #[test]
    fn test_sign_canonicalization() {
        // Sign always lands on the numerator, denominator stays positive
        assert_eq!(parts(R64::new(6, -4).unwrap()), (-3, 2));
        assert_eq!(parts(R64::new(-6, 4).unwrap()), (-3, 2));
        assert_eq!(parts(R64::new(-6, -4).unwrap()), (3, 2));
        assert_eq!(parts(R64::new(0, -5).unwrap()), (0, 1));
    }

    #[test]
    fn test_reduction_idempotent() {
        let first = R64::new(252, -105).unwrap();
        let second = R64::new(first.numerator(), first.denominator()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.numerator().gcd(&first.denominator()), 1);
    }

    #[test]
    fn test_from_integer() {
        assert_eq!(parts(R64::from_integer(42)), (42, 1));
        assert_eq!(parts(R64::from_integer(-7)), (-7, 1));
    }

    #[test]
    fn test_negation() {
        let x = R64::new(3, 4).unwrap();
        assert_eq!(parts(-x), (-3, 4));
        assert_eq!(-(-x), x);
        assert_eq!(x.checked_neg().unwrap(), -x);

        assert_eq!(
            R64::min_value().checked_neg(),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    #[should_panic(expected = "Rational negation overflow")]
    fn test_neg_operator_panics_on_min_value() {
        let _ = -R64::min_value();
    }

    #[test]
    fn test_checked_add() {
        // Differing denominators meet at the lcm, result re-reduces
        let sum = R64::new(2, 3).unwrap().checked_add(R64::new(5, 9).unwrap());
        assert_eq!(sum.unwrap(), R64::new(11, 9).unwrap());

        let whole = R64::new(1, 2).unwrap().checked_add(R64::new(1, 2).unwrap());
        assert_eq!(parts(whole.unwrap()), (1, 1));

        assert_eq!(
            R64::max_value().checked_add(R64::one()),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_checked_sub() {
        let diff = R64::new(2, 3).unwrap().checked_sub(R64::new(5, 9).unwrap());
        assert_eq!(diff.unwrap(), R64::new(1, 9).unwrap());

        let neg = R64::new(1, 4).unwrap().checked_sub(R64::new(3, 4).unwrap());
        assert_eq!(parts(neg.unwrap()), (-1, 2));
    }

    #[test]
    fn test_checked_mul() {
        let product = R64::new(2, 3).unwrap().checked_mul(R64::new(3, 4).unwrap());
        assert_eq!(parts(product.unwrap()), (1, 2));

        let signs = R64::new(-2, 3).unwrap().checked_mul(R64::new(3, 5).unwrap());
        assert_eq!(parts(signs.unwrap()), (-2, 5));

        let big = R64::from_integer(i64::MAX);
        assert_eq!(big.checked_mul(big), Err(NumericError::Overflow));
    }

    #[test]
    fn test_checked_div() {
        let quotient = R64::new(2, 3).unwrap().checked_div(R64::new(4, 9).unwrap());
        assert_eq!(parts(quotient.unwrap()), (3, 2));

        // Dividing by a negative re-canonicalizes the sign
        let negative = R64::new(1, 2).unwrap().checked_div(R64::new(-3, 4).unwrap());
        assert_eq!(parts(negative.unwrap()), (-2, 3));

        assert_eq!(
            R64::one().checked_div(R64::zero()),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_compound_assignment() {
        let mut x = R64::new(2, 3).unwrap();
        x += R64::new(5, 9).unwrap();
        assert_eq!(x, R64::new(11, 9).unwrap());

        x -= R64::new(2, 9).unwrap();
        assert_eq!(x, R64::new(1, 1).unwrap());

        x *= R64::new(3, 7).unwrap();
        assert_eq!(x, R64::new(3, 7).unwrap());

        x /= R64::new(3, 7).unwrap();
        assert_eq!(x, R64::one());
    }

    #[test]
    fn test_equality_on_canonical_form() {
        assert_eq!(R64::new(1, 2).unwrap(), R64::new(2, 4).unwrap());
        assert_eq!(R64::new(-1, 2).unwrap(), R64::new(1, -2).unwrap());
        assert_ne!(R64::new(1, 2).unwrap(), R64::new(1, 3).unwrap());
    }

    #[test]
    fn test_ordering() {
        let half = R64::new(1, 2).unwrap();
        let two_thirds = R64::new(2, 3).unwrap();
        let neg = R64::new(-1, 2).unwrap();

        assert!(half < two_thirds);
        assert!(neg < half);
        assert!(two_thirds > neg);
        assert!(half <= half);
        assert_eq!(half.min(two_thirds), half);
        assert_eq!(half.max(two_thirds), two_thirds);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(R64::new(1, 2).unwrap().to_f64(), 0.5);
        assert_eq!(R64::new(-3, 2).unwrap().to_f64(), -1.5);
        assert!((R64::new(1, 3).unwrap().to_f64() - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_display() {
        assert_eq!(R64::new(6, -4).unwrap().to_string(), "(-3 / 2)");
        assert_eq!(R64::new(2, 3).unwrap().to_string(), "(2 / 3)");
        assert_eq!(R64::new(0, -5).unwrap().to_string(), "(0 / 1)");
        assert_eq!(R64::from_integer(7).to_string(), "(7 / 1)");
    }

    #[test]
    fn test_widening_from() {
        let narrow = Rational::<i32>::new(6, -4).unwrap();
        let wide = Rational::<i64>::from(narrow);
        assert_eq!(parts(wide), (-3, 2));

        let tiny = Rational::<i8>::new(3, 9).unwrap();
        assert_eq!(parts(Rational::<i128>::from(tiny)), (1, 3));
    }

    #[test]
    fn test_limits() {
        assert_eq!(parts(R64::min_value()), (i64::MIN, 1));
        assert_eq!(parts(R64::max_value()), (i64::MAX, 1));
        assert!(R64::min_value() < R64::max_value());
        assert!(!R64::IS_INTEGER);
    }

    proptest! {
        #[test]
        fn prop_reduction_idempotent(n in -10_000i64..10_000, d in 1i64..10_000) {
            let first = R64::new(n, d).unwrap();
            let second = R64::new(first.numerator(), first.denominator()).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(first.numerator().gcd(&first.denominator()), 1);
            prop_assert!(first.denominator() > 0);
        }

        #[test]
        fn prop_additive_identity(n in -10_000i64..10_000, d in 1i64..10_000) {
            let x = R64::new(n, d).unwrap();
            prop_assert_eq!(x.checked_add(R64::zero()).unwrap(), x);
        }

        #[test]
        fn prop_negation_involution(n in -10_000i64..10_000, d in 1i64..10_000) {
            let x = R64::new(n, d).unwrap();
            prop_assert_eq!(-(-x), x);
        }

        #[test]
        fn prop_addition_commutative(
            an in -1_000i64..1_000, ad in 1i64..1_000,
            bn in -1_000i64..1_000, bd in 1i64..1_000,
        ) {
            let a = R64::new(an, ad).unwrap();
            let b = R64::new(bn, bd).unwrap();
            prop_assert_eq!(a.checked_add(b).unwrap(), b.checked_add(a).unwrap());
        }

        #[test]
        fn prop_order_matches_cross_multiplication(
            an in -1_000i64..1_000, ad in 1i64..1_000,
            bn in -1_000i64..1_000, bd in 1i64..1_000,
        ) {
            let a = R64::new(an, ad).unwrap();
            let b = R64::new(bn, bd).unwrap();
            let cross_lhs = a.numerator() * b.denominator();
            let cross_rhs = b.numerator() * a.denominator();
            prop_assert_eq!(a.cmp(&b), cross_lhs.cmp(&cross_rhs));
        }

        #[test]
        fn prop_sign_on_numerator(n in -10_000i64..10_000, d in -10_000i64..10_000) {
            prop_assume!(d != 0);
            let x = R64::new(n, d).unwrap();
            prop_assert!(x.denominator() > 0);
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_deserialize_reduces_and_canonicalizes() {
        let r: Rational<i64> = serde_json::from_str(r#"{"numer":2,"denom":4}"#).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (1, 2));

        let neg: Rational<i64> = serde_json::from_str(r#"{"numer":6,"denom":-4}"#).unwrap();
        assert_eq!((neg.numerator(), neg.denominator()), (-3, 2));
    }

    #[test]
    fn test_deserialize_rejects_zero_denominator() {
        let zero: Result<Rational<i64>, _> = serde_json::from_str(r#"{"numer":1,"denom":0}"#);
        assert!(zero.is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let x = Rational::<i64>::new(6, -4).unwrap();
        let json = serde_json::to_string(&x).unwrap();
        let back: Rational<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, x);
    }
}
