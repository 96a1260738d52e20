use thiserror::Error;

/// Errors raised while extracting WSCT payloads or encoding IVA Turismo files.
///
/// `Parse` and `MissingNode` cover malformed SOAP input, `Format` a
/// non-numeric value in a numeric field, and `Encoding` / `Overflow` any
/// condition that would otherwise produce an invalid AFIP file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AfipError {
    /// The XML could not be read, or AFIP answered with a SOAP fault.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// A required structural node is absent from the document.
    #[error("missing required XML node <{0}>")]
    MissingNode(String),

    /// A numeric or date field holds text that cannot be interpreted.
    #[error("invalid value {value:?} for field {field}")]
    Format {
        /// Name of the offending field.
        field: String,
        /// Raw text found in the input.
        value: String,
    },

    /// The report cannot be encoded (empty set, missing required source field).
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A value does not fit its fixed-width slot.
    #[error("field {field} value {value:?} exceeds {width} characters")]
    Overflow {
        /// Name of the offending field.
        field: String,
        /// Declared width of the slot.
        width: usize,
        /// Rendered value that did not fit.
        value: String,
    },

    /// Remittance sequencing or reporting period error.
    #[error("numbering error: {0}")]
    Numbering(String),
}

impl AfipError {
    /// Build a [`AfipError::Format`] for `field`.
    pub fn format(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Format {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True for the failures that abort file generation at encode time.
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding(_) | Self::Overflow { .. })
    }
}
