//! Error types for the ISO 19115 library.

use thiserror::Error;

/// Errors that can occur when working with metadata records.
#[derive(Error, Debug)]
pub enum Error {
    /// XML serialization error
    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    /// XML parsing error
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid date or date-time value
    #[error("Invalid date value: {0}")]
    InvalidDate(String),

    /// A code list value outside the controlled vocabulary
    #[error("Unknown {code_list} value: {value}")]
    UnknownCode {
        /// The code list the value was checked against
        code_list: &'static str,
        /// The offending value
        value: String,
    },

    /// A required element was absent from the document
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// Configuration rejected by the JSON Schema for its version
    #[error("Configuration does not conform to schema {version}: {}", errors.join("; "))]
    ConfigValidation {
        /// The schema version the configuration was validated against
        version: String,
        /// One entry per violation, each naming the instance path
        errors: Vec<String>,
    },

    /// An embedded JSON Schema failed to compile
    #[error("Schema compilation failed: {0}")]
    SchemaCompile(String),

    /// Emitted XML rejected by the XML Schema Definition
    #[error("Record failed XSD validation: {0}")]
    RecordValidation(String),

    /// A value combination the configuration schema should have excluded
    #[error("Inconsistent record: {0}")]
    Inconsistency(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip archive error
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias for metadata record operations.
pub type Result<T> = std::result::Result<T, Error>;
