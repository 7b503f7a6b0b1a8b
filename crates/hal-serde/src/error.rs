/// Error types for HAL resource serialization and deserialization.
#[derive(Debug)]
pub enum CodecError {
    /// JSON serialization or deserialization error
    Json(serde_json::Error),

    /// XML serialization or deserialization error
    #[cfg(feature = "xml")]
    Xml(quick_xml::Error),

    /// IO error during serialization/deserialization
    Io(std::io::Error),

    /// The document is well-formed but is not a resource representation
    Malformed(String),

    /// Custom error message
    Custom(String),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Json(e) => write!(f, "JSON error: {}", e),
            #[cfg(feature = "xml")]
            CodecError::Xml(e) => write!(f, "XML error: {}", e),
            CodecError::Io(e) => write!(f, "IO error: {}", e),
            CodecError::Malformed(msg) => write!(f, "malformed document: {}", msg),
            CodecError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Json(e) => Some(e),
            #[cfg(feature = "xml")]
            CodecError::Xml(e) => Some(e),
            CodecError::Io(e) => Some(e),
            CodecError::Malformed(_) => None,
            CodecError::Custom(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Json(err)
    }
}

#[cfg(feature = "xml")]
impl From<quick_xml::Error> for CodecError {
    fn from(err: quick_xml::Error) -> Self {
        CodecError::Xml(err)
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err)
    }
}

impl From<String> for CodecError {
    fn from(msg: String) -> Self {
        CodecError::Custom(msg)
    }
}

impl From<&str> for CodecError {
    fn from(msg: &str) -> Self {
        CodecError::Custom(msg.to_string())
    }
}

/// Result type alias for HAL serialization operations
pub type Result<T> = std::result::Result<T, CodecError>;
