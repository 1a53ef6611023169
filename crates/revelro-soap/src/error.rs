//! SOAP backend errors

use thiserror::Error;

/// Errors raised while converting provider XML
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// The reader rejected the document
    #[error("XML syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// Document ended with elements still open
    #[error("Unexpected end of document inside <{open}>")]
    UnexpectedEof { open: String },

    /// Closing tag without a matching opening tag
    #[error("Unbalanced closing tag at byte {position}")]
    UnbalancedEnd { position: u64 },

    /// No root element at all (empty or text-only body)
    #[error("Document has no root element")]
    EmptyDocument,

    /// A second top-level element after the root closed
    #[error("Document has more than one root element")]
    MultipleRoots,

    /// Non-whitespace text before or after the root element
    #[error("Text outside the root element")]
    TextOutsideRoot,

    /// Elements nested deeper than the converter accepts
    #[error("Elements nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = XmlError::UnexpectedEof {
            open: "Envelope".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected end of document inside <Envelope>"
        );

        let err = ConfigError::Missing("REGCHECK_USERNAME");
        assert_eq!(err.to_string(), "Missing required setting: REGCHECK_USERNAME");
    }
}
