//! Resource identification: keywords, constraints, extents, formats, lineage.

use crate::records::citation::{Citation, ResponsibleParty};
use crate::records::codes::{KeywordType, MaintenanceFrequency, Progress, Restriction};
use crate::records::common::{CharacterText, Date};
use serde::{Deserialize, Serialize};

/// A set of keywords, optionally typed and attributed to a thesaurus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    /// The keywords, each optionally linked to a vocabulary term
    pub terms: Vec<CharacterText>,
    /// What the keywords classify by
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub keyword_type: Option<KeywordType>,
    /// The thesaurus the keywords are drawn from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thesaurus: Option<Citation>,
}

/// A limitation on access to a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessConstraint {
    /// The kind of restriction
    pub restriction: Restriction,
    /// Human-readable statement of the restriction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<CharacterText>,
    /// Machine-readable permissions payload, embedded as JSON text in the
    /// emitted record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<serde_json::Value>,
}

impl AccessConstraint {
    /// Creates an access constraint with no statement.
    pub fn new(restriction: Restriction) -> Self {
        Self {
            restriction,
            statement: None,
            permissions: None,
        }
    }
}

/// A limitation on use of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageConstraint {
    /// The kind of restriction
    pub restriction: Restriction,
    /// The licence the resource is released under, usually linked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_licence: Option<CharacterText>,
}

impl UsageConstraint {
    /// Creates a usage constraint with no licence.
    pub fn new(restriction: Restriction) -> Self {
        Self {
            restriction,
            copyright_licence: None,
        }
    }
}

/// Access and usage constraints on a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Access constraints, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access: Vec<AccessConstraint>,
    /// Usage constraints, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub usage: Vec<UsageConstraint>,
}

impl Constraints {
    /// Returns true if no constraints are declared.
    pub fn is_empty(&self) -> bool {
        self.access.is_empty() && self.usage.is_empty()
    }
}

/// A geographic bounding box in decimal degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western-most longitude
    pub west_longitude: f64,
    /// Eastern-most longitude
    pub east_longitude: f64,
    /// Southern-most latitude
    pub south_latitude: f64,
    /// Northern-most latitude
    pub north_latitude: f64,
}

/// A period in time bounding a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalExtent {
    /// Start of the period
    pub start: Date,
    /// End of the period; open-ended when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Date>,
}

/// A vertical range bounding a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalExtent {
    /// Lowest point, in CRS units
    pub minimum: f64,
    /// Highest point, in CRS units
    pub maximum: f64,
    /// Reference to the vertical CRS definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs_href: Option<String>,
}

/// The spatial, temporal and vertical coverage of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Geographic bounding box
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geographic: Option<BoundingBox>,
    /// Temporal period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalExtent>,
    /// Vertical range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VerticalExtent>,
}

impl Extent {
    /// Returns true if no element is set.
    pub fn is_empty(&self) -> bool {
        self.geographic.is_none() && self.temporal.is_none() && self.vertical.is_none()
    }
}

/// A format a resource is distributed in.
///
/// The version element is schema-mandated: when no version is known the
/// record carries an empty version element with `gco:nilReason="missing"`
/// rather than omitting it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Format {
    /// Format name, optionally linked to its specification
    pub name: CharacterText,
    /// Format version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Format {
    /// Creates a format with a plain-text name and no version.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: CharacterText::plain(name),
            version: None,
        }
    }
}

/// The lineage of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineage {
    /// General explanation of the producer's knowledge of the resource
    pub statement: CharacterText,
}

/// The identification section of a metadata record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    /// Citation for the resource
    pub citation: Citation,
    /// Brief narrative summary
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Why the resource was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Recognition of those who contributed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    /// Production status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Progress>,
    /// Parties to contact about the resource
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<ResponsibleParty>,
    /// How often the resource is updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_frequency: Option<MaintenanceFrequency>,
    /// Keyword sets describing the resource
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<KeywordSet>,
    /// Access and usage constraints
    #[serde(default, skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,
    /// ISO topic categories
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    /// Coverage of the resource
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extents: Vec<Extent>,
    /// Lineage of the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineage: Option<Lineage>,
}

impl Identification {
    /// Creates an identification with a titled citation and abstract.
    pub fn new(title: impl Into<String>, abstract_text: impl Into<String>) -> Self {
        Self {
            citation: Citation::with_title(title),
            abstract_text: abstract_text.into(),
            ..Default::default()
        }
    }
}
