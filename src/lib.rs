// ============================================================================
// Exact Numeric Library
// Fixed-point and rational value types for deterministic arithmetic
// ============================================================================

//! # Exact Numeric
//!
//! Two exact, allocation-free numeric value types for systems that must avoid
//! floating-point rounding error:
//!
//! - [`FixedPoint`]: fixed-point decimal with a compile-time number of
//!   fractional digits, backed by a single signed integer
//! - [`Rational`]: exact fraction stored as a reduced numerator/denominator
//!   pair with a canonical sign
//!
//! Both are immutable `Copy` values; every operation produces a new instance.
//! Arithmetic is checked throughout: the `checked_*` methods surface range
//! violations as [`NumericError`] instead of wrapping, and the operator
//! overloads panic on the same conditions for use where the inputs are known
//! to be in range.
//!
//! ## Example
//!
//! ```rust
//! use exact_numeric::{FixedPoint, Rational};
//!
//! // Money-like fixed point: 2 fractional digits over i64
//! let mut balance = FixedPoint::<2>::from_f64(7.9)?;
//! balance += FixedPoint::<2>::from_f64(11.3)?;
//! assert_eq!(balance.to_string(), "19.20");
//!
//! // Exact fractions, always in lowest terms
//! let sum = Rational::new(2, 3)?.checked_add(Rational::new(5, 9)?)?;
//! assert_eq!(sum, Rational::new(11, 9)?);
//! assert_eq!(sum.to_string(), "(11 / 9)");
//! # Ok::<(), exact_numeric::NumericError>(())
//! ```

mod backing;
mod errors;
mod fixed_point;
mod rational;

pub use backing::BackingInt;
pub use errors::{NumericError, NumericResult};
pub use fixed_point::{FixedPoint, Money};
pub use rational::Rational;
