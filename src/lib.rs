//! Bidirectional, lossless mapping between typed configuration structures
//! and ISO 19115 XML metadata records.
//!
//! Given a configuration, the crate produces a canonical, schema-valid XML
//! record; given such a record, it recovers the configuration that would
//! reproduce it byte-for-byte. The round trip is lossless in both
//! directions: decoding an encoded record yields an equal record, and
//! re-encoding a decoded document yields identical bytes.
//!
//! # Quick Start
//!
//! ```rust
//! use iso19115::records::MetadataRecord;
//! use iso19115::records::codes::DateType;
//!
//! let mut record = MetadataRecord::with_identification(
//!     "Test Record",
//!     "A record demonstrating the round trip.",
//! );
//! record.identification.citation.dates =
//!     [(DateType::Creation, "2018".parse().unwrap())].into_iter().collect();
//!
//! let xml = record.to_xml().unwrap();
//! let decoded = MetadataRecord::from_xml(&xml).unwrap();
//! assert_eq!(decoded, record);
//! assert_eq!(decoded.to_xml().unwrap(), xml);
//! ```
//!
//! # JSON configuration
//!
//! Records load from and dump to JSON through [`config::RecordConfig`],
//! which validates against a versioned JSON Schema at the boundary. Date
//! strings carry their own precision ("2018", "2018-03", "2018-03-15" or a
//! full timestamp) and survive the round trip unchanged.
//!
//! # Module Structure
//!
//! - [`records`] - Typed record structures and code lists
//! - [`writer`] - Record to XML encoding
//! - [`reader`] - XML to record decoding
//! - [`config`] - JSON load/dump and schema validation
//! - [`namespaces`] - Namespace registry for qualified names
//! - [`archive`] - Single-entry zip packaging
//! - [`error`] - Error types
//!
//! # Optional Features
//!
//! - `validation` - XSD validation of emitted records (requires libxml2)

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod archive;
pub mod config;
pub mod error;
pub mod namespaces;
pub mod reader;
pub mod records;
#[cfg(feature = "validation")]
pub mod validation;
pub mod writer;

// Re-export commonly used types at the crate root
pub use config::{RecordConfig, SchemaVersion};
pub use error::{Error, Result};
pub use records::{CharacterText, Date, DatePrecision, Identification, MetadataRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
