//! Error types for the Pylon core library.
//!
//! This module defines the error types shared by the date, tenor, calendar,
//! and day count components.

use thiserror::Error;

/// A specialized Result type for Pylon core operations.
pub type PylonResult<T> = Result<T, PylonError>;

/// The main error type for Pylon core operations.
#[derive(Error, Debug, Clone)]
pub enum PylonError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Tenor literal could not be parsed.
    #[error("Invalid tenor literal: {input:?}")]
    InvalidTenor {
        /// The offending raw text.
        input: String,
    },

    /// Arithmetic on a tenor that does not admit it (e.g. a ratio against
    /// a zero-length tenor).
    #[error("Invalid tenor arithmetic: {reason}")]
    InvalidTenorArithmetic {
        /// Description of the degenerate operation.
        reason: String,
    },

}

impl PylonError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid tenor literal error.
    #[must_use]
    pub fn invalid_tenor(input: impl Into<String>) -> Self {
        Self::InvalidTenor {
            input: input.into(),
        }
    }

    /// Creates an invalid tenor arithmetic error.
    #[must_use]
    pub fn invalid_tenor_arithmetic(reason: impl Into<String>) -> Self {
        Self::InvalidTenorArithmetic {
            reason: reason.into(),
        }
    }
}
