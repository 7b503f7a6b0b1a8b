/// Error types for the resource data model and converter.
use std::fmt;

/// Typed-access failure against a resource's data mapping.
#[derive(Debug)]
pub enum DataError {
    /// No entry under the requested key.
    Missing {
        /// The key that was looked up.
        key: String,
    },

    /// The stored value cannot be converted to the requested type.
    Coercion {
        /// The key that was looked up.
        key: String,
        /// The requested target type.
        expected: &'static str,
        /// Textual form of the stored value.
        value: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Missing { key } => write!(f, "no data entry named '{}'", key),
            DataError::Coercion {
                key,
                expected,
                value,
            } => write!(
                f,
                "data entry '{}' cannot be read as {}: {:?}",
                key, expected, value
            ),
        }
    }
}

impl std::error::Error for DataError {}

/// Failure while converting a `Serialize` value into resource data.
#[derive(Debug)]
pub enum ConvertError {
    /// A map key that has no scalar form.
    UnsupportedKey(String),

    /// Custom error message.
    Custom(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::UnsupportedKey(kind) => {
                write!(f, "map keys of type {} are not supported", kind)
            }
            ConvertError::Custom(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConvertError {}

impl serde::ser::Error for ConvertError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ConvertError::Custom(msg.to_string())
    }
}
