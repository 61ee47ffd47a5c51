// ============================================================================
// Numeric Errors
// Error types for exact arithmetic operations
// ============================================================================

use std::fmt;

/// Errors that can occur during exact arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the maximum of the backing integer
    Overflow,
    /// Result below the minimum of the backing integer
    Underflow,
    /// Attempted division by a zero-valued operand
    DivisionByZero,
    /// Rational constructed with a zero denominator
    InvalidDenominator,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Input value is invalid (e.g. a non-finite float)
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::Underflow => {
                write!(f, "arithmetic underflow: result below minimum value")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidDenominator => {
                write!(f, "invalid denominator: rational denominator must be nonzero")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not convert value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
