//! Error types for trace compilation and playback control
//!
//! Compilers never fail once they have a valid input, so every input problem
//! is reported by [`InputError`] when the input value is constructed. No
//! partial trace exists for a rejected input.

use thiserror::Error;

/// A malformed algorithm input, rejected before any trace is compiled
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Binary search needs a non-decreasing sequence
    #[error("values must be sorted: {previous} at index {index} is followed by {next}")]
    Unsorted { index: usize, previous: i64, next: i64 },

    /// Sliding window of size zero
    #[error("window size must be positive")]
    EmptyWindow,

    /// Sliding window larger than the input sequence
    #[error("window size {window} exceeds sequence length {len}")]
    WindowTooLarge { window: usize, len: usize },

    /// Queue operation text that is neither an enqueue nor a dequeue
    #[error("invalid queue operation '{0}' (expected 'enqueue <n>' or 'dequeue')")]
    InvalidOperation(String),
}

/// Errors raised by the playback control surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("speed multiplier must be positive and finite, got {0}")]
    InvalidSpeed(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = InputError::WindowTooLarge { window: 4, len: 2 };
        assert_eq!(err.to_string(), "window size 4 exceeds sequence length 2");

        let err = PlaybackError::InvalidSpeed(-1.0);
        assert!(err.to_string().contains("-1"));
    }
}
