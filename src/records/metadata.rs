//! MetadataRecord - the root container for one ISO 19115 record.

use crate::error::Result;
use crate::records::citation::ResponsibleParty;
use crate::records::codes::ScopeCode;
use crate::records::common::{Date, Identifier, MetadataStandard, OnlineResource};
use crate::records::identification::{Format, Identification};
use serde::{Deserialize, Serialize};

/// One complete metadata record.
///
/// A `MetadataRecord` fully determines the XML document the writer emits,
/// and is exactly what the reader recovers from such a document. Optional
/// fields that are `None` (and collections that are empty) produce no XML
/// at all, mirroring the reader's behavior of only populating fields whose
/// elements are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Unique identifier for the record itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_identifier: Option<String>,
    /// Record language (ISO 639-2 code)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Record character set (e.g. "utf8")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_set: Option<String>,
    /// The class of resource the record describes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy_level: Option<ScopeCode>,
    /// Parties responsible for the record (not the resource)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<ResponsibleParty>,
    /// When the record was last updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_stamp: Option<Date>,
    /// The metadata standard the record declares itself against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_standard: Option<MetadataStandard>,
    /// The spatial reference system of the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_system: Option<Identifier>,
    /// Identification of the resource
    pub identification: Identification,
    /// Formats the resource is distributed in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub distribution_formats: Vec<Format>,
    /// Parties distributing the resource
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub distributors: Vec<ResponsibleParty>,
    /// Where the resource can be obtained
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfer_options: Vec<OnlineResource>,
}

impl MetadataRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record with a titled, abstracted identification section.
    pub fn with_identification(title: impl Into<String>, abstract_text: impl Into<String>) -> Self {
        Self {
            identification: Identification::new(title, abstract_text),
            ..Default::default()
        }
    }

    /// Serializes this record to pretty-printed UTF-8 XML.
    ///
    /// Convenience for [`crate::writer::to_string`].
    pub fn to_xml(&self) -> Result<String> {
        crate::writer::to_string(self)
    }

    /// Parses a record from UTF-8 XML.
    ///
    /// Convenience for [`crate::reader::from_str`].
    pub fn from_xml(xml: &str) -> Result<Self> {
        crate::reader::from_str(xml)
    }

    /// Returns true if the record has any distribution information.
    pub fn has_distribution(&self) -> bool {
        !self.distribution_formats.is_empty()
            || !self.distributors.is_empty()
            || !self.transfer_options.is_empty()
    }
}
