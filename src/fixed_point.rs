// ============================================================================
// Fixed-Point Decimal
// Exact decimal arithmetic with compile-time precision
// ============================================================================

use crate::backing::BackingInt;
use crate::errors::{NumericError, NumericResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Fixed-point decimal number with compile-time precision.
///
/// Internally stores `value × 10^SCALE` in a single signed integer `T`.
///
/// # Type Parameters
/// - `SCALE`: Number of fractional decimal digits. Must be greater than zero,
///   and `10^SCALE` must be representable in `T`.
/// - `T`: Backing signed integer. Default is `i64`.
///
/// # Semantics
/// All arithmetic truncates toward zero where precision below one scaled unit
/// would be needed (multiplication and division); nothing ever rounds. The
/// checked operations report range violations as errors instead of wrapping.
///
/// # Example
/// ```
/// use exact_numeric::FixedPoint;
///
/// let price = FixedPoint::<2>::from_parts(7, 90)?; // 7.90
/// let tax = FixedPoint::<2>::from_f64(11.3)?;      // 11.30
/// let total = price.checked_add(tax)?;             // 19.20
/// assert_eq!(total.to_string(), "19.20");
/// # Ok::<(), exact_numeric::NumericError>(())
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedPoint<const SCALE: u8, T = i64>(T);

impl<const SCALE: u8, T: BackingInt> FixedPoint<SCALE, T> {
    // Evaluated from factor(); rejects SCALE == 0 when the type is used.
    const SCALE_NONZERO: () = assert!(SCALE > 0, "SCALE must be greater than zero");

    /// The scale factor (10^SCALE), in the backing integer type.
    ///
    /// Overflows the backing type if `10^SCALE` does not fit; callers pick a
    /// `SCALE`/`T` combination where it does.
    #[inline]
    pub fn factor() -> T {
        let _: () = Self::SCALE_NONZERO;
        let ten = T::from_u8(10).expect("10 is representable in every backing integer");
        let mut factor = T::one();
        for _ in 0..SCALE {
            factor = factor * ten;
        }
        factor
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from raw internal representation.
    ///
    /// Use this when you already have a value scaled by `10^SCALE`.
    #[inline]
    pub const fn from_raw(raw: T) -> Self {
        Self(raw)
    }

    /// Create from an integer value.
    ///
    /// # Errors
    /// Returns `Overflow` if the scaled value is too large to represent.
    #[inline]
    pub fn from_integer(whole: T) -> NumericResult<Self> {
        whole
            .checked_mul(&Self::factor())
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Create from whole and fractional-digit parts.
    ///
    /// The fractional input is taken as already scaled to `SCALE` digits, so
    /// with `SCALE = 2`, `from_parts(7, 90)` denotes 7.90. It is combined as
    /// `whole × 10^SCALE + fractional × signum(whole)` with no range
    /// validation: fractional digits at or above `10^SCALE` carry into the
    /// whole part through plain integer arithmetic.
    ///
    /// # Errors
    /// Returns `Overflow` if the combined value is out of range.
    #[inline]
    pub fn from_parts(whole: T, fractional: T) -> NumericResult<Self> {
        let signed_frac = if whole >= T::zero() {
            fractional
        } else {
            fractional.checked_neg().ok_or(NumericError::Overflow)?
        };

        whole
            .checked_mul(&Self::factor())
            .ok_or(NumericError::Overflow)?
            .checked_add(&signed_frac)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Create from a floating-point value, truncating toward zero.
    ///
    /// The value is scaled by `10^SCALE` and the excess fractional precision
    /// is dropped, never rounded: `from_f64(3.14159)` at `SCALE = 2` is 3.14.
    ///
    /// # Errors
    /// Returns `InvalidInput` for non-finite input, `Overflow` if the scaled
    /// value does not fit the backing integer.
    #[inline]
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }

        let factor = Self::factor().to_f64().ok_or(NumericError::InvalidInput)?;
        let scaled = (value * factor).trunc();
        T::from_f64(scaled).map(Self).ok_or(NumericError::Overflow)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (scaled by `10^SCALE`).
    #[inline]
    pub fn raw_value(self) -> T {
        self.0
    }

    /// Get the whole part (truncated toward zero).
    #[inline]
    pub fn whole(self) -> T {
        self.0 / Self::factor()
    }

    /// Get the fractional digits as a non-negative value in `[0, 10^SCALE)`.
    #[inline]
    pub fn fractional(self) -> T {
        (self.0 - self.whole() * Self::factor()).abs()
    }

    /// Check if value is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == T::zero()
    }

    /// Check if value is positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > T::zero()
    }

    /// Check if value is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < T::zero()
    }

    /// Zero (0.0…0).
    #[inline]
    pub fn zero() -> Self {
        Self(T::zero())
    }

    /// One (1.0…0).
    #[inline]
    pub fn one() -> Self {
        Self(Self::factor())
    }

    /// Minimum representable value, from the backing integer's lower bound.
    #[inline]
    pub fn min_value() -> Self {
        Self(T::min_value())
    }

    /// Maximum representable value, from the backing integer's upper bound.
    #[inline]
    pub fn max_value() -> Self {
        Self(T::max_value())
    }

    /// Convert to a floating-point approximation.
    #[inline]
    pub fn to_f64(self) -> f64 {
        match (self.0.to_f64(), Self::factor().to_f64()) {
            (Some(raw), Some(factor)) => raw / factor,
            _ => f64::NAN,
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked negation.
    ///
    /// # Errors
    /// Returns `Overflow` when negating the minimum value.
    #[inline]
    pub fn checked_neg(self) -> NumericResult<Self> {
        self.0.checked_neg().map(Self).ok_or(NumericError::Overflow)
    }

    /// Checked absolute value.
    #[inline]
    pub fn checked_abs(self) -> NumericResult<Self> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Ok(self)
        }
    }

    /// Checked addition.
    ///
    /// Both operands share the scale factor, so the raw values add directly.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_add(&rhs.0).map(Self).ok_or_else(|| {
            if rhs.0 > T::zero() {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_sub(&rhs.0).map(Self).ok_or_else(|| {
            if rhs.0 < T::zero() {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    /// Checked multiplication with truncation.
    ///
    /// Multiplies the raw values and divides by `10^SCALE` once to undo the
    /// double scaling. Precision below one scaled unit is truncated, not
    /// rounded: at `SCALE = 2`, 2.03 × 5.09 = 10.3327 becomes 10.33.
    ///
    /// # Errors
    /// Returns `Overflow` if the intermediate product does not fit the
    /// backing integer.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        let product = self.0.checked_mul(&rhs.0).ok_or(NumericError::Overflow)?;
        Ok(Self(product / Self::factor()))
    }

    /// Checked division with truncation.
    ///
    /// Scales the dividend up by `10^SCALE` before dividing, preserving
    /// `SCALE` digits of precision; non-exact results truncate toward zero.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero divisor, `Overflow` if the scaled
    /// dividend or the quotient is out of range.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        self.0
            .checked_mul(&Self::factor())
            .ok_or(NumericError::Overflow)?
            .checked_div(&rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Returns the minimum of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Returns the maximum of two values.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<const SCALE: u8, T: BackingInt> Default for FixedPoint<SCALE, T> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<const SCALE: u8, T: BackingInt> PartialEq for FixedPoint<SCALE, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<const SCALE: u8, T: BackingInt> Eq for FixedPoint<SCALE, T> {}

impl<const SCALE: u8, T: BackingInt> PartialOrd for FixedPoint<SCALE, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const SCALE: u8, T: BackingInt> Ord for FixedPoint<SCALE, T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<const SCALE: u8, T: BackingInt> Hash for FixedPoint<SCALE, T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<const SCALE: u8, T: BackingInt> Neg for FixedPoint<SCALE, T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.checked_neg().expect("FixedPoint negation overflow")
    }
}

// Infallible operators for ergonomics (panic on error - use checked_* in
// production). The compound assignments require exclusive access for the
// duration of the call, like any non-atomic read-modify-write.
impl<const SCALE: u8, T: BackingInt> Add for FixedPoint<SCALE, T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("FixedPoint addition overflow")
    }
}

impl<const SCALE: u8, T: BackingInt> AddAssign for FixedPoint<SCALE, T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const SCALE: u8, T: BackingInt> Sub for FixedPoint<SCALE, T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("FixedPoint subtraction overflow")
    }
}

impl<const SCALE: u8, T: BackingInt> SubAssign for FixedPoint<SCALE, T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const SCALE: u8, T: BackingInt> Mul for FixedPoint<SCALE, T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).expect("FixedPoint multiplication overflow")
    }
}

impl<const SCALE: u8, T: BackingInt> MulAssign for FixedPoint<SCALE, T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const SCALE: u8, T: BackingInt> Div for FixedPoint<SCALE, T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs).expect("FixedPoint division error")
    }
}

impl<const SCALE: u8, T: BackingInt> DivAssign for FixedPoint<SCALE, T> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<const SCALE: u8, T: BackingInt> fmt::Debug for FixedPoint<SCALE, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedPoint<{}>({}, raw={})", SCALE, self, self.0)
    }
}

impl<const SCALE: u8, T: BackingInt> fmt::Display for FixedPoint<SCALE, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.whole();
        let frac = self.fractional();

        if self.is_negative() && whole == T::zero() {
            // Truncating division eats the sign of -0.xxx
            write!(f, "-0.{:0>width$}", frac, width = SCALE as usize)
        } else {
            write!(f, "{}.{:0>width$}", whole, frac, width = SCALE as usize)
        }
    }
}

// ============================================================================
// Conversion to/from rust_decimal (for API boundaries)
// ============================================================================

impl<const SCALE: u8, T: BackingInt> FixedPoint<SCALE, T> {
    /// Convert from `rust_decimal::Decimal`.
    ///
    /// This is intended for API boundaries only (normalizing external input).
    /// The conversion goes through the decimal's 96-bit mantissa, so wide
    /// backings keep their full range.
    ///
    /// # Errors
    /// - `PrecisionLoss` if significant digits below `SCALE` would be lost
    /// - `Overflow` if the scaled value is too large for the backing integer
    pub fn from_decimal(d: rust_decimal::Decimal) -> NumericResult<Self> {
        let mantissa = d.mantissa();
        let scale = d.scale();

        let raw = if scale <= u32::from(SCALE) {
            let pow = 10_i128
                .checked_pow(u32::from(SCALE) - scale)
                .ok_or(NumericError::Overflow)?;
            mantissa.checked_mul(pow).ok_or(NumericError::Overflow)?
        } else {
            let pow = 10_i128
                .checked_pow(scale - u32::from(SCALE))
                .ok_or(NumericError::Overflow)?;
            if mantissa % pow != 0 {
                return Err(NumericError::PrecisionLoss);
            }
            mantissa / pow
        };

        T::from_i128(raw).map(Self).ok_or(NumericError::Overflow)
    }

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// Returns `Overflow` if the raw value exceeds the decimal's 96-bit
    /// mantissa, or `InvalidInput` for a `SCALE` beyond what `Decimal`
    /// supports (28 fractional digits).
    pub fn to_decimal(self) -> NumericResult<rust_decimal::Decimal> {
        if SCALE > 28 {
            return Err(NumericError::InvalidInput);
        }

        let raw = self.0.to_i128().ok_or(NumericError::Overflow)?;
        rust_decimal::Decimal::try_from_i128_with_scale(raw, u32::from(SCALE))
            .map_err(|_| NumericError::Overflow)
    }
}

// ============================================================================
// Type Aliases for Common Use Cases
// ============================================================================

/// Money-like value with 2 fractional digits
pub type Money = FixedPoint<2, i64>;

// ============================================================================
// Tests
// ============================================================================
