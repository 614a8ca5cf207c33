//! Error types for option serialization.
//!
//! Encoding a [`JsValue`](crate::JsValue) tree never fails. Errors only come
//! from the serde entry points (a map key that is not a string, or a custom
//! error raised by a `Serialize` impl), from writers, and from compiling a
//! caller-supplied detection pattern.
//!
//! ## Examples
//!
//! ```rust
//! use admin_text_field::{to_string, Error};
//! use std::collections::BTreeMap;
//!
//! let mut map = BTreeMap::new();
//! map.insert(vec![1u8], "value");
//!
//! let result = to_string(&map);
//! assert!(matches!(result, Err(Error::KeyMustBeString(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while serializing options.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Map key that cannot be written as an object-literal key
    #[error("Map key must be a string, found {0}")]
    KeyMustBeString(String),

    /// Function detection pattern failed to compile
    #[error("Invalid function detection pattern `{pattern}`: {msg}")]
    InvalidPattern { pattern: String, msg: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an error for a map key of the given kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_text_field::Error;
    ///
    /// let err = Error::key_must_be_string("sequence");
    /// assert!(err.to_string().contains("sequence"));
    /// ```
    pub fn key_must_be_string(found: &str) -> Self {
        Error::KeyMustBeString(found.to_string())
    }

    /// Creates an error for a detection pattern that does not compile.
    pub fn invalid_pattern(pattern: &str, msg: &str) -> Self {
        Error::InvalidPattern {
            pattern: pattern.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_text_field::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
