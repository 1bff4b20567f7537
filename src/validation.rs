//! XSD validation for emitted metadata records.
//!
//! Encoding produces schema-valid XML by construction; this module is the
//! independent check on that claim. It validates a document against an ISO
//! 19139 XML Schema Definition and surfaces every violation as a typed
//! error. A failure here indicates a mapping defect, not bad input:
//! configuration-side JSON Schema validation can never catch a composite
//! that emits structurally-invalid XML.
//!
//! # Requirements
//!
//! This module requires the `validation` feature to be enabled and depends
//! on libxml2 being installed on the system.
//!
//! ## Installing libxml2
//!
//! **Ubuntu/Debian:**
//! ```bash
//! sudo apt-get install libxml2-dev
//! ```
//!
//! **macOS:**
//! ```bash
//! brew install libxml2
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use iso19115::records::MetadataRecord;
//! use iso19115::validation::validate_record;
//!
//! let record = MetadataRecord::with_identification("Test Record", "A test record.");
//! validate_record(&record, None)?;
//! ```

use std::path::Path;

use libxml::parser::Parser;
use libxml::schemas::{SchemaParserContext, SchemaValidationContext};

use crate::error::{Error, Result};
use crate::records::MetadataRecord;

/// Default path to the ISO 19139 schema file (relative to the crate root).
pub const DEFAULT_SCHEMA_PATH: &str = "external/iso19139/gmd/gmd.xsd";

fn build_validation_context(schema_path: &str) -> Result<SchemaValidationContext> {
    if !Path::new(schema_path).exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Schema file not found: {}", schema_path),
        )));
    }

    let mut schema_parser = SchemaParserContext::from_file(schema_path);
    SchemaValidationContext::from_parser(&mut schema_parser).map_err(|errors| {
        let msg = errors
            .iter()
            .map(|e| e.message.clone().unwrap_or_default())
            .collect::<Vec<_>>()
            .join("; ");
        Error::RecordValidation(format!("Failed to parse schema: {}", msg))
    })
}

/// Validates a metadata record file against the XML Schema.
///
/// When `schema_path` is `None` the default schema location at
/// [`DEFAULT_SCHEMA_PATH`] is used.
pub fn validate_file<P: AsRef<Path>>(xml_path: P, schema_path: Option<&str>) -> Result<()> {
    let xml_path = xml_path.as_ref();
    if !xml_path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("XML file not found: {}", xml_path.display()),
        )));
    }

    let mut validation_context =
        build_validation_context(schema_path.unwrap_or(DEFAULT_SCHEMA_PATH))?;

    let parser = Parser::default();
    let doc = parser
        .parse_file(xml_path.to_string_lossy().as_ref())
        .map_err(|e| Error::RecordValidation(format!("Failed to parse XML document: {:?}", e)))?;

    validation_context
        .validate_document(&doc)
        .map_err(|e| Error::RecordValidation(format!("Validation failed: {:?}", e)))?;

    Ok(())
}

/// Validates a metadata record XML string against the XML Schema.
pub fn validate_str(xml: &str, schema_path: Option<&str>) -> Result<()> {
    let mut validation_context =
        build_validation_context(schema_path.unwrap_or(DEFAULT_SCHEMA_PATH))?;

    let parser = Parser::default();
    let doc = parser
        .parse_string(xml)
        .map_err(|e| Error::RecordValidation(format!("Failed to parse XML string: {:?}", e)))?;

    validation_context
        .validate_document(&doc)
        .map_err(|e| Error::RecordValidation(format!("Validation failed: {:?}", e)))?;

    Ok(())
}

/// Serializes a record and validates the result against the XML Schema.
pub fn validate_record(record: &MetadataRecord, schema_path: Option<&str>) -> Result<()> {
    let xml = crate::writer::to_string(record)?;
    validate_str(&xml, schema_path)
}
