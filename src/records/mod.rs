//! Typed record structures.
//!
//! This module contains the data structures that fully determine a
//! metadata record's content:
//!
//! - [`MetadataRecord`] - The root record container
//! - [`Identification`] - Resource identification (citation, keywords,
//!   constraints, extents, lineage)
//! - [`Citation`] and [`ResponsibleParty`] - Citations and contacts
//!
//! Also provides common leaf types:
//! - [`Date`] - Dates carrying their own precision
//! - [`CharacterText`] - Optionally hyperlinked text (anchor values)
//! - [`NilReason`] - Placeholders for mandated-but-absent values
//! - the code list enums in [`codes`]

pub mod codes;
mod common;
mod citation;
mod identification;
mod metadata;

// Re-export common leaf types
pub use common::{
    CharacterText, Date, DatePrecision, Identifier, MetadataStandard, NilReason, OnlineResource,
};

// Re-export main record types
pub use citation::{Address, Citation, CitationDates, ResponsibleParty};
pub use identification::{
    AccessConstraint, BoundingBox, Constraints, Extent, Format, Identification, KeywordSet,
    Lineage, TemporalExtent, UsageConstraint, VerticalExtent,
};
pub use metadata::MetadataRecord;
