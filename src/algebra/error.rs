//! Error kinds shared by every calculator and group constructor.
//!
//! Broken invariants (a generator set that is not closed, a buggy calculator that makes a
//! group-table lookup fail) are not represented here: they panic at the point of detection.
use std::fmt;

/// Error types for algebraic computations
#[derive(Debug, Clone, PartialEq)]
pub enum AlgebraError {
    /// reciprocal or inverse of an element that has none (zero, non-unit residue)
    NotInvertible(String),
    /// value outside the domain of the operation, e.g. square root of a negative number
    OutOfDomain(String),
    /// the calculator cannot perform this operation for its number type
    UnsupportedCalculation(String),
    /// structural query that is not implemented for this kind of structure
    UnsupportedOperation(String),
    /// rejected at the API boundary before any computation
    InvalidArgument(String),
    /// malformed settings document
    Config(String),
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlgebraError::NotInvertible(msg) => write!(f, "Element is not invertible: {}", msg),
            AlgebraError::OutOfDomain(msg) => write!(f, "Argument out of domain: {}", msg),
            AlgebraError::UnsupportedCalculation(msg) => {
                write!(f, "Unsupported calculation: {}", msg)
            }
            AlgebraError::UnsupportedOperation(msg) => {
                write!(f, "Operation is not implemented for this structure: {}", msg)
            }
            AlgebraError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            AlgebraError::Config(msg) => write!(f, "Invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for AlgebraError {}

pub type AlgebraResult<T> = Result<T, AlgebraError>;
