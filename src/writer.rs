//! Record writer: serializes a [`MetadataRecord`] to ISO 19115 XML.
//!
//! The writer emits children in schema order and checks every optional
//! field for presence before emitting anything, so a field absent from the
//! record produces no XML at all. Output is stable: namespace declarations,
//! attribute order and indentation are reproduced identically on every
//! call, which is what makes decoded documents re-encode byte-for-byte.
//!
//! # Example
//!
//! ```rust
//! use iso19115::records::MetadataRecord;
//! use iso19115::writer;
//!
//! let record = MetadataRecord::with_identification("Test Record", "A test record.");
//! let xml = writer::to_string(&record).unwrap();
//! assert!(xml.contains("<gmd:MD_Metadata"));
//! ```

use crate::error::{Error, Result};
use crate::namespaces::NamespaceRegistry;
use crate::records::codes::{
    DateType, KeywordType, MaintenanceFrequency, OnlineFunction, Progress, Restriction, Role,
    ScopeCode,
};
use crate::records::{
    AccessConstraint, Address, BoundingBox, CharacterText, Citation, Date, Extent, Format,
    Identification, Identifier, KeywordSet, Lineage, MetadataRecord, NilReason, OnlineResource,
    ResponsibleParty, TemporalExtent, UsageConstraint, VerticalExtent,
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use sha2::{Digest, Sha256};
use std::io::Write;
use tracing::debug;

/// Code list URI for record languages (ISO 639-2).
const LANGUAGE_CODE_LIST: &str = "http://www.loc.gov/standards/iso639-2/php/code_list.php";

/// Code list URI for character sets.
const CHARACTER_SET_CODE_LIST: &str = "http://standards.iso.org/ittf/PubliclyAvailableStandards/\
ISO_19139_Schemas/resources/codelist/gmxCodelists.xml#MD_CharacterSetCode";

/// Configuration options for the record writer.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Whether to indent the output for readability
    pub indent: bool,
    /// Indentation string, applied once per nesting level (default: two
    /// spaces). The underlying writer repeats a single character, so this
    /// must be a run of one repeated ASCII character such as `"  "` or
    /// `"\t"`.
    pub indent_string: String,
    /// Whether to include the XML declaration
    pub xml_declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: true,
            indent_string: "  ".to_string(),
            xml_declaration: true,
        }
    }
}

impl WriterConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compact configuration (no indentation).
    pub fn compact() -> Self {
        Self {
            indent: false,
            indent_string: String::new(),
            xml_declaration: true,
        }
    }

    /// Sets whether to include the XML declaration.
    pub fn with_xml_declaration(mut self, xml_declaration: bool) -> Self {
        self.xml_declaration = xml_declaration;
        self
    }
}

/// ISO 19115 record writer.
pub struct RecordWriter {
    config: WriterConfig,
    ns: NamespaceRegistry,
}

impl RecordWriter {
    /// Creates a new writer with default configuration.
    pub fn new() -> Self {
        Self {
            config: WriterConfig::default(),
            ns: NamespaceRegistry::iso_19115(),
        }
    }

    /// Creates a new writer with the specified configuration.
    pub fn with_config(config: WriterConfig) -> Self {
        Self {
            config,
            ns: NamespaceRegistry::iso_19115(),
        }
    }

    /// Writes a record to a string.
    pub fn write_to_string(&self, record: &MetadataRecord) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(record, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Writes a record to any `Write` implementation.
    pub fn write<W: Write>(&self, record: &MetadataRecord, writer: W) -> Result<()> {
        debug!(file_identifier = ?record.file_identifier, "encoding metadata record");
        let mut xml = if self.config.indent {
            let indent = self.config.indent_string.as_bytes();
            Writer::new_with_indent(writer, indent.first().copied().unwrap_or(b' '), indent.len())
        } else {
            Writer::new(writer)
        };

        if self.config.xml_declaration {
            xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
            if self.config.indent {
                xml.get_mut().write_all(b"\n")?;
            }
        }

        // Root element with namespace declarations and schema location
        let mut root = BytesStart::new("gmd:MD_Metadata");
        for (attr, uri) in self.ns.xmlns_attributes(false) {
            root.push_attribute((attr.as_str(), uri.as_str()));
        }
        root.push_attribute(("xsi:schemaLocation", self.ns.schema_location().as_str()));
        xml.write_event(Event::Start(root))?;

        if let Some(ref file_identifier) = record.file_identifier {
            self.write_character_string(&mut xml, "gmd:fileIdentifier", file_identifier)?;
        }
        if let Some(ref language) = record.language {
            self.write_code(
                &mut xml,
                "gmd:language",
                "gmd:LanguageCode",
                LANGUAGE_CODE_LIST,
                language,
            )?;
        }
        if let Some(ref character_set) = record.character_set {
            self.write_code(
                &mut xml,
                "gmd:characterSet",
                "gmd:MD_CharacterSetCode",
                CHARACTER_SET_CODE_LIST,
                character_set,
            )?;
        }
        if let Some(hierarchy_level) = record.hierarchy_level {
            self.write_code(
                &mut xml,
                "gmd:hierarchyLevel",
                "gmd:MD_ScopeCode",
                &ScopeCode::code_list(),
                hierarchy_level.as_str(),
            )?;
        }
        for contact in &record.contacts {
            self.write_responsible_party(&mut xml, "gmd:contact", contact)?;
        }
        if let Some(ref date_stamp) = record.date_stamp {
            self.write_date_leaf(&mut xml, "gmd:dateStamp", date_stamp)?;
        }
        if let Some(ref standard) = record.metadata_standard {
            self.write_character_string(&mut xml, "gmd:metadataStandardName", &standard.name)?;
            if let Some(ref version) = standard.version {
                self.write_character_string(&mut xml, "gmd:metadataStandardVersion", version)?;
            }
        }
        if let Some(ref reference_system) = record.reference_system {
            self.write_reference_system(&mut xml, reference_system)?;
        }

        xml.write_event(Event::Start(BytesStart::new("gmd:identificationInfo")))?;
        self.write_identification(&mut xml, &record.identification)?;
        xml.write_event(Event::End(BytesEnd::new("gmd:identificationInfo")))?;

        if record.has_distribution() {
            self.write_distribution(&mut xml, record)?;
        }
        if let Some(ref lineage) = record.identification.lineage {
            self.write_data_quality(&mut xml, lineage)?;
        }

        xml.write_event(Event::End(BytesEnd::new("gmd:MD_Metadata")))?;
        Ok(())
    }

    fn write_reference_system<W: Write>(
        &self,
        xml: &mut Writer<W>,
        identifier: &Identifier,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:referenceSystemInfo")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:MD_ReferenceSystem")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:referenceSystemIdentifier")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:RS_Identifier")))?;
        self.write_text_or_anchor(xml, "gmd:code", &identifier.as_text())?;
        xml.write_event(Event::End(BytesEnd::new("gmd:RS_Identifier")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:referenceSystemIdentifier")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:MD_ReferenceSystem")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:referenceSystemInfo")))?;
        Ok(())
    }

    /// Writes the identification section.
    fn write_identification<W: Write>(
        &self,
        xml: &mut Writer<W>,
        identification: &Identification,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:MD_DataIdentification")))?;

        xml.write_event(Event::Start(BytesStart::new("gmd:citation")))?;
        self.write_citation(xml, &identification.citation)?;
        xml.write_event(Event::End(BytesEnd::new("gmd:citation")))?;

        self.write_character_string(xml, "gmd:abstract", &identification.abstract_text)?;
        if let Some(ref purpose) = identification.purpose {
            self.write_character_string(xml, "gmd:purpose", purpose)?;
        }
        if let Some(ref credit) = identification.credit {
            self.write_character_string(xml, "gmd:credit", credit)?;
        }
        if let Some(status) = identification.status {
            self.write_code(
                xml,
                "gmd:status",
                "gmd:MD_ProgressCode",
                &Progress::code_list(),
                status.as_str(),
            )?;
        }
        for contact in &identification.contacts {
            self.write_responsible_party(xml, "gmd:pointOfContact", contact)?;
        }
        if let Some(frequency) = identification.maintenance_frequency {
            xml.write_event(Event::Start(BytesStart::new("gmd:resourceMaintenance")))?;
            xml.write_event(Event::Start(BytesStart::new("gmd:MD_MaintenanceInformation")))?;
            self.write_code(
                xml,
                "gmd:maintenanceAndUpdateFrequency",
                "gmd:MD_MaintenanceFrequencyCode",
                &MaintenanceFrequency::code_list(),
                frequency.as_str(),
            )?;
            xml.write_event(Event::End(BytesEnd::new("gmd:MD_MaintenanceInformation")))?;
            xml.write_event(Event::End(BytesEnd::new("gmd:resourceMaintenance")))?;
        }
        for keyword_set in &identification.keywords {
            self.write_keywords(xml, keyword_set)?;
        }
        for access in &identification.constraints.access {
            self.write_access_constraint(xml, access)?;
        }
        for usage in &identification.constraints.usage {
            self.write_usage_constraint(xml, usage)?;
        }
        for topic in &identification.topics {
            xml.write_event(Event::Start(BytesStart::new("gmd:topicCategory")))?;
            self.write_text_element(xml, "gmd:MD_TopicCategoryCode", topic)?;
            xml.write_event(Event::End(BytesEnd::new("gmd:topicCategory")))?;
        }
        for (index, extent) in identification.extents.iter().enumerate() {
            self.write_extent(xml, extent, index)?;
        }

        xml.write_event(Event::End(BytesEnd::new("gmd:MD_DataIdentification")))?;
        Ok(())
    }

    fn write_citation<W: Write>(&self, xml: &mut Writer<W>, citation: &Citation) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:CI_Citation")))?;

        self.write_text_or_anchor(xml, "gmd:title", &citation.title)?;
        for (date_type, date) in citation.dates.iter() {
            self.write_citation_date(xml, date_type, date)?;
        }
        if let Some(ref edition) = citation.edition {
            self.write_character_string(xml, "gmd:edition", edition)?;
        }
        for identifier in &citation.identifiers {
            xml.write_event(Event::Start(BytesStart::new("gmd:identifier")))?;
            xml.write_event(Event::Start(BytesStart::new("gmd:MD_Identifier")))?;
            self.write_text_or_anchor(xml, "gmd:code", &identifier.as_text())?;
            xml.write_event(Event::End(BytesEnd::new("gmd:MD_Identifier")))?;
            xml.write_event(Event::End(BytesEnd::new("gmd:identifier")))?;
        }
        if let Some(ref contact) = citation.contact {
            if contact.roles.len() != 1 {
                return Err(Error::Inconsistency(format!(
                    "a cited responsible party must have exactly one role, found {}",
                    contact.roles.len()
                )));
            }
            self.write_responsible_party(xml, "gmd:citedResponsibleParty", contact)?;
        }

        xml.write_event(Event::End(BytesEnd::new("gmd:CI_Citation")))?;
        Ok(())
    }

    fn write_citation_date<W: Write>(
        &self,
        xml: &mut Writer<W>,
        date_type: DateType,
        date: &Date,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:date")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:CI_Date")))?;
        self.write_date_leaf(xml, "gmd:date", date)?;
        self.write_code(
            xml,
            "gmd:dateType",
            "gmd:CI_DateTypeCode",
            &DateType::code_list(),
            date_type.as_str(),
        )?;
        xml.write_event(Event::End(BytesEnd::new("gmd:CI_Date")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:date")))?;
        Ok(())
    }

    fn write_responsible_party<W: Write>(
        &self,
        xml: &mut Writer<W>,
        wrapper: &str,
        party: &ResponsibleParty,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new(wrapper)))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:CI_ResponsibleParty")))?;

        if let Some(ref individual) = party.individual {
            self.write_text_or_anchor(xml, "gmd:individualName", individual)?;
        }
        if let Some(ref organisation) = party.organisation {
            self.write_text_or_anchor(xml, "gmd:organisationName", organisation)?;
        }
        if party.has_contact_info() {
            self.write_contact_info(xml, party)?;
        }
        for role in &party.roles {
            self.write_code(
                xml,
                "gmd:role",
                "gmd:CI_RoleCode",
                &Role::code_list(),
                role.as_str(),
            )?;
        }

        xml.write_event(Event::End(BytesEnd::new("gmd:CI_ResponsibleParty")))?;
        xml.write_event(Event::End(BytesEnd::new(wrapper)))?;
        Ok(())
    }

    fn write_contact_info<W: Write>(
        &self,
        xml: &mut Writer<W>,
        party: &ResponsibleParty,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:contactInfo")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:CI_Contact")))?;

        if let Some(ref phone) = party.phone {
            xml.write_event(Event::Start(BytesStart::new("gmd:phone")))?;
            xml.write_event(Event::Start(BytesStart::new("gmd:CI_Telephone")))?;
            self.write_character_string(xml, "gmd:voice", phone)?;
            xml.write_event(Event::End(BytesEnd::new("gmd:CI_Telephone")))?;
            xml.write_event(Event::End(BytesEnd::new("gmd:phone")))?;
        }
        // email lives inside CI_Address, so either triggers the wrapper
        if party.address.is_some() || party.email.is_some() {
            xml.write_event(Event::Start(BytesStart::new("gmd:address")))?;
            xml.write_event(Event::Start(BytesStart::new("gmd:CI_Address")))?;
            if let Some(ref address) = party.address {
                self.write_address(xml, address)?;
            }
            if let Some(ref email) = party.email {
                self.write_character_string(xml, "gmd:electronicMailAddress", email)?;
            }
            xml.write_event(Event::End(BytesEnd::new("gmd:CI_Address")))?;
            xml.write_event(Event::End(BytesEnd::new("gmd:address")))?;
        }
        if let Some(ref online_resource) = party.online_resource {
            xml.write_event(Event::Start(BytesStart::new("gmd:onlineResource")))?;
            self.write_online_resource(xml, online_resource)?;
            xml.write_event(Event::End(BytesEnd::new("gmd:onlineResource")))?;
        }

        xml.write_event(Event::End(BytesEnd::new("gmd:CI_Contact")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:contactInfo")))?;
        Ok(())
    }

    fn write_address<W: Write>(&self, xml: &mut Writer<W>, address: &Address) -> Result<()> {
        if let Some(ref delivery_point) = address.delivery_point {
            self.write_character_string(xml, "gmd:deliveryPoint", delivery_point)?;
        }
        if let Some(ref city) = address.city {
            self.write_character_string(xml, "gmd:city", city)?;
        }
        if let Some(ref administrative_area) = address.administrative_area {
            self.write_character_string(xml, "gmd:administrativeArea", administrative_area)?;
        }
        if let Some(ref postal_code) = address.postal_code {
            self.write_character_string(xml, "gmd:postalCode", postal_code)?;
        }
        if let Some(ref country) = address.country {
            self.write_character_string(xml, "gmd:country", country)?;
        }
        Ok(())
    }

    fn write_online_resource<W: Write>(
        &self,
        xml: &mut Writer<W>,
        resource: &OnlineResource,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:CI_OnlineResource")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:linkage")))?;
        self.write_text_element(xml, "gmd:URL", &resource.href)?;
        xml.write_event(Event::End(BytesEnd::new("gmd:linkage")))?;
        if let Some(ref title) = resource.title {
            self.write_character_string(xml, "gmd:name", title)?;
        }
        if let Some(ref description) = resource.description {
            self.write_character_string(xml, "gmd:description", description)?;
        }
        if let Some(function) = resource.function {
            self.write_code(
                xml,
                "gmd:function",
                "gmd:CI_OnLineFunctionCode",
                &OnlineFunction::code_list(),
                function.as_str(),
            )?;
        }
        xml.write_event(Event::End(BytesEnd::new("gmd:CI_OnlineResource")))?;
        Ok(())
    }

    fn write_keywords<W: Write>(&self, xml: &mut Writer<W>, keywords: &KeywordSet) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:descriptiveKeywords")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:MD_Keywords")))?;
        for term in &keywords.terms {
            self.write_text_or_anchor(xml, "gmd:keyword", term)?;
        }
        if let Some(keyword_type) = keywords.keyword_type {
            self.write_code(
                xml,
                "gmd:type",
                "gmd:MD_KeywordTypeCode",
                &KeywordType::code_list(),
                keyword_type.as_str(),
            )?;
        }
        if let Some(ref thesaurus) = keywords.thesaurus {
            xml.write_event(Event::Start(BytesStart::new("gmd:thesaurusName")))?;
            self.write_citation(xml, thesaurus)?;
            xml.write_event(Event::End(BytesEnd::new("gmd:thesaurusName")))?;
        }
        xml.write_event(Event::End(BytesEnd::new("gmd:MD_Keywords")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:descriptiveKeywords")))?;
        Ok(())
    }

    /// Writes an access constraint.
    ///
    /// A machine-readable permissions payload is embedded as compact JSON
    /// text, and the constraints element gains a content-derived id so the
    /// same payload always produces the same document.
    fn write_access_constraint<W: Write>(
        &self,
        xml: &mut Writer<W>,
        constraint: &AccessConstraint,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:resourceConstraints")))?;

        let mut legal = BytesStart::new("gmd:MD_LegalConstraints");
        let permissions_json = match constraint.permissions {
            Some(ref permissions) => {
                let json = serde_json::to_string(permissions)?;
                legal.push_attribute(("id", permissions_id(&json).as_str()));
                Some(json)
            }
            None => None,
        };
        xml.write_event(Event::Start(legal))?;

        self.write_code(
            xml,
            "gmd:accessConstraints",
            "gmd:MD_RestrictionCode",
            &Restriction::code_list(),
            constraint.restriction.as_str(),
        )?;
        if let Some(ref statement) = constraint.statement {
            self.write_text_or_anchor(xml, "gmd:otherConstraints", statement)?;
        }
        if let Some(json) = permissions_json {
            self.write_character_string(xml, "gmd:otherConstraints", &json)?;
        }

        xml.write_event(Event::End(BytesEnd::new("gmd:MD_LegalConstraints")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:resourceConstraints")))?;
        Ok(())
    }

    fn write_usage_constraint<W: Write>(
        &self,
        xml: &mut Writer<W>,
        constraint: &UsageConstraint,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:resourceConstraints")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:MD_LegalConstraints")))?;
        self.write_code(
            xml,
            "gmd:useConstraints",
            "gmd:MD_RestrictionCode",
            &Restriction::code_list(),
            constraint.restriction.as_str(),
        )?;
        if let Some(ref licence) = constraint.copyright_licence {
            self.write_text_or_anchor(xml, "gmd:otherConstraints", licence)?;
        }
        xml.write_event(Event::End(BytesEnd::new("gmd:MD_LegalConstraints")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:resourceConstraints")))?;
        Ok(())
    }

    /// Writes one extent. The index keeps `gml:id` values unique.
    fn write_extent<W: Write>(
        &self,
        xml: &mut Writer<W>,
        extent: &Extent,
        index: usize,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:extent")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:EX_Extent")))?;
        if let Some(ref bounding_box) = extent.geographic {
            self.write_bounding_box(xml, bounding_box)?;
        }
        if let Some(ref temporal) = extent.temporal {
            self.write_temporal_extent(xml, temporal, index)?;
        }
        if let Some(ref vertical) = extent.vertical {
            self.write_vertical_extent(xml, vertical)?;
        }
        xml.write_event(Event::End(BytesEnd::new("gmd:EX_Extent")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:extent")))?;
        Ok(())
    }

    fn write_bounding_box<W: Write>(&self, xml: &mut Writer<W>, bbox: &BoundingBox) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:geographicElement")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:EX_GeographicBoundingBox")))?;
        for (name, value) in [
            ("gmd:westBoundLongitude", bbox.west_longitude),
            ("gmd:eastBoundLongitude", bbox.east_longitude),
            ("gmd:southBoundLatitude", bbox.south_latitude),
            ("gmd:northBoundLatitude", bbox.north_latitude),
        ] {
            xml.write_event(Event::Start(BytesStart::new(name)))?;
            self.write_text_element(xml, "gco:Decimal", &value.to_string())?;
            xml.write_event(Event::End(BytesEnd::new(name)))?;
        }
        xml.write_event(Event::End(BytesEnd::new("gmd:EX_GeographicBoundingBox")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:geographicElement")))?;
        Ok(())
    }

    fn write_temporal_extent<W: Write>(
        &self,
        xml: &mut Writer<W>,
        temporal: &TemporalExtent,
        index: usize,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:temporalElement")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:EX_TemporalExtent")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:extent")))?;

        let mut period = BytesStart::new("gml:TimePeriod");
        period.push_attribute(("gml:id", format!("boundingExtent{}", index + 1).as_str()));
        xml.write_event(Event::Start(period))?;
        self.write_text_element(xml, "gml:beginPosition", &temporal.start.to_string())?;
        match temporal.end {
            Some(ref end) => self.write_text_element(xml, "gml:endPosition", &end.to_string())?,
            // open-ended period, the element itself is still required
            None => xml.write_event(Event::Empty(BytesStart::new("gml:endPosition")))?,
        }
        xml.write_event(Event::End(BytesEnd::new("gml:TimePeriod")))?;

        xml.write_event(Event::End(BytesEnd::new("gmd:extent")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:EX_TemporalExtent")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:temporalElement")))?;
        Ok(())
    }

    fn write_vertical_extent<W: Write>(
        &self,
        xml: &mut Writer<W>,
        vertical: &VerticalExtent,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:verticalElement")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:EX_VerticalExtent")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:minimumValue")))?;
        self.write_text_element(xml, "gco:Real", &vertical.minimum.to_string())?;
        xml.write_event(Event::End(BytesEnd::new("gmd:minimumValue")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:maximumValue")))?;
        self.write_text_element(xml, "gco:Real", &vertical.maximum.to_string())?;
        xml.write_event(Event::End(BytesEnd::new("gmd:maximumValue")))?;
        if let Some(ref crs_href) = vertical.crs_href {
            let mut crs = BytesStart::new("gmd:verticalCRS");
            crs.push_attribute(("xlink:href", crs_href.as_str()));
            xml.write_event(Event::Empty(crs))?;
        }
        xml.write_event(Event::End(BytesEnd::new("gmd:EX_VerticalExtent")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:verticalElement")))?;
        Ok(())
    }

    fn write_distribution<W: Write>(
        &self,
        xml: &mut Writer<W>,
        record: &MetadataRecord,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:distributionInfo")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:MD_Distribution")))?;

        for format in &record.distribution_formats {
            self.write_format(xml, format)?;
        }
        for distributor in &record.distributors {
            xml.write_event(Event::Start(BytesStart::new("gmd:distributor")))?;
            xml.write_event(Event::Start(BytesStart::new("gmd:MD_Distributor")))?;
            self.write_responsible_party(xml, "gmd:distributorContact", distributor)?;
            xml.write_event(Event::End(BytesEnd::new("gmd:MD_Distributor")))?;
            xml.write_event(Event::End(BytesEnd::new("gmd:distributor")))?;
        }
        for transfer_option in &record.transfer_options {
            xml.write_event(Event::Start(BytesStart::new("gmd:transferOptions")))?;
            xml.write_event(Event::Start(BytesStart::new("gmd:MD_DigitalTransferOptions")))?;
            xml.write_event(Event::Start(BytesStart::new("gmd:onLine")))?;
            self.write_online_resource(xml, transfer_option)?;
            xml.write_event(Event::End(BytesEnd::new("gmd:onLine")))?;
            xml.write_event(Event::End(BytesEnd::new("gmd:MD_DigitalTransferOptions")))?;
            xml.write_event(Event::End(BytesEnd::new("gmd:transferOptions")))?;
        }

        xml.write_event(Event::End(BytesEnd::new("gmd:MD_Distribution")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:distributionInfo")))?;
        Ok(())
    }

    fn write_format<W: Write>(&self, xml: &mut Writer<W>, format: &Format) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:distributionFormat")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:MD_Format")))?;
        self.write_text_or_anchor(xml, "gmd:name", &format.name)?;
        match format.version {
            Some(ref version) => self.write_character_string(xml, "gmd:version", version)?,
            // the version element is schema-mandated even when unknown
            None => {
                let mut version = BytesStart::new("gmd:version");
                version.push_attribute(("gco:nilReason", NilReason::Missing.as_str()));
                xml.write_event(Event::Empty(version))?;
            }
        }
        xml.write_event(Event::End(BytesEnd::new("gmd:MD_Format")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:distributionFormat")))?;
        Ok(())
    }

    fn write_data_quality<W: Write>(&self, xml: &mut Writer<W>, lineage: &Lineage) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("gmd:dataQualityInfo")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:DQ_DataQuality")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:lineage")))?;
        xml.write_event(Event::Start(BytesStart::new("gmd:LI_Lineage")))?;
        self.write_text_or_anchor(xml, "gmd:statement", &lineage.statement)?;
        xml.write_event(Event::End(BytesEnd::new("gmd:LI_Lineage")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:lineage")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:DQ_DataQuality")))?;
        xml.write_event(Event::End(BytesEnd::new("gmd:dataQualityInfo")))?;
        Ok(())
    }

    /// Writes a date inside the named wrapper as `gco:Date` or
    /// `gco:DateTime` depending on its precision.
    fn write_date_leaf<W: Write>(
        &self,
        xml: &mut Writer<W>,
        wrapper: &str,
        date: &Date,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new(wrapper)))?;
        let leaf = if date.has_time() { "gco:DateTime" } else { "gco:Date" };
        self.write_text_element(xml, leaf, &date.to_string())?;
        xml.write_event(Event::End(BytesEnd::new(wrapper)))?;
        Ok(())
    }

    /// Writes a code list value inside the named wrapper.
    fn write_code<W: Write>(
        &self,
        xml: &mut Writer<W>,
        wrapper: &str,
        code_node: &str,
        code_list: &str,
        value: &str,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new(wrapper)))?;
        let mut code = BytesStart::new(code_node);
        code.push_attribute(("codeList", code_list));
        code.push_attribute(("codeListValue", value));
        xml.write_event(Event::Start(code))?;
        xml.write_event(Event::Text(BytesText::new(value)))?;
        xml.write_event(Event::End(BytesEnd::new(code_node)))?;
        xml.write_event(Event::End(BytesEnd::new(wrapper)))?;
        Ok(())
    }

    /// Writes a plain string inside the named wrapper as
    /// `gco:CharacterString`.
    fn write_character_string<W: Write>(
        &self,
        xml: &mut Writer<W>,
        wrapper: &str,
        value: &str,
    ) -> Result<()> {
        self.write_text_or_anchor(xml, wrapper, &CharacterText::plain(value))
    }

    /// Writes a text value inside the named wrapper, as either a plain
    /// `gco:CharacterString` or a link-bearing `gmx:Anchor`.
    fn write_text_or_anchor<W: Write>(
        &self,
        xml: &mut Writer<W>,
        wrapper: &str,
        text: &CharacterText,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new(wrapper)))?;
        if text.is_anchor() {
            let mut anchor = BytesStart::new("gmx:Anchor");
            if let Some(ref href) = text.href {
                anchor.push_attribute(("xlink:href", href.as_str()));
            }
            if let Some(ref title) = text.title {
                anchor.push_attribute(("xlink:title", title.as_str()));
            }
            xml.write_event(Event::Start(anchor))?;
            xml.write_event(Event::Text(BytesText::new(text.visible_text())))?;
            xml.write_event(Event::End(BytesEnd::new("gmx:Anchor")))?;
        } else {
            self.write_text_element(xml, "gco:CharacterString", &text.value)?;
        }
        xml.write_event(Event::End(BytesEnd::new(wrapper)))?;
        Ok(())
    }

    fn write_text_element<W: Write>(
        &self,
        xml: &mut Writer<W>,
        name: &str,
        value: &str,
    ) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new(name)))?;
        xml.write_event(Event::Text(BytesText::new(value)))?;
        xml.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}

impl Default for RecordWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives a stable element id from a permissions payload.
///
/// Same content always yields the same id; collision resistance beyond
/// that is not required.
pub(crate) fn permissions_id(json: &str) -> String {
    let digest = Sha256::digest(json.as_bytes());
    format!("perm-{}", &hex::encode(digest)[..8])
}

/// Convenience function to write a record to a string.
pub fn to_string(record: &MetadataRecord) -> Result<String> {
    RecordWriter::new().write_to_string(record)
}

/// Convenience function to write a record without an XML declaration.
pub fn to_string_without_declaration(record: &MetadataRecord) -> Result<String> {
    RecordWriter::with_config(WriterConfig::new().with_xml_declaration(false))
        .write_to_string(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::codes::{DateType, Role};
    use crate::records::{CitationDates, Constraints};

    fn minimal_record() -> MetadataRecord {
        MetadataRecord::with_identification("Test Record", "A test record.")
    }

    #[test]
    fn test_write_minimal_record() {
        let xml = to_string(&minimal_record()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<gmd:MD_Metadata"));
        assert!(xml.contains("xmlns:gmd=\"http://www.isotc211.org/2005/gmd\""));
        assert!(xml.contains("xsi:schemaLocation="));
        assert!(xml.contains("<gco:CharacterString>Test Record</gco:CharacterString>"));
        assert!(xml.contains("</gmd:MD_Metadata>"));
    }

    #[test]
    fn test_plain_title_has_no_link_attributes() {
        let xml = to_string(&minimal_record()).unwrap();
        assert!(!xml.contains("gmx:Anchor"));
        assert!(!xml.contains("xlink:href"));
    }

    #[test]
    fn test_anchor_title() {
        let mut record = minimal_record();
        record.identification.citation.title =
            CharacterText::linked("Test Record", "https://example.com/record");
        let xml = to_string(&record).unwrap();
        assert!(xml.contains(
            "<gmx:Anchor xlink:href=\"https://example.com/record\">Test Record</gmx:Anchor>"
        ));
    }

    #[test]
    fn test_year_precision_date_truncates() {
        let mut record = minimal_record();
        record.identification.citation.dates =
            [(DateType::Creation, "2018".parse().unwrap())].into_iter().collect();
        let xml = to_string(&record).unwrap();
        assert!(xml.contains("<gco:Date>2018</gco:Date>"));
        assert!(!xml.contains("2018-01"));
    }

    #[test]
    fn test_absent_fields_emit_nothing() {
        let xml = to_string(&minimal_record()).unwrap();
        assert!(!xml.contains("gmd:fileIdentifier"));
        assert!(!xml.contains("gmd:distributionInfo"));
        assert!(!xml.contains("gmd:dataQualityInfo"));
        assert!(!xml.contains("gmd:extent"));
    }

    #[test]
    fn test_code_list_attributes() {
        let mut record = minimal_record();
        record.hierarchy_level = Some(ScopeCode::Dataset);
        let xml = to_string(&record).unwrap();
        assert!(xml.contains("codeListValue=\"dataset\">dataset</gmd:MD_ScopeCode>"));
        assert!(xml.contains("#MD_ScopeCode\""));
    }

    #[test]
    fn test_format_version_nil_reason() {
        let mut record = minimal_record();
        record.distribution_formats.push(Format::named("netCDF"));
        let xml = to_string(&record).unwrap();
        assert!(xml.contains("<gmd:version gco:nilReason=\"missing\"/>"));
    }

    #[test]
    fn test_multi_role_citation_contact_rejected() {
        let mut record = minimal_record();
        let mut contact = ResponsibleParty::organisation("Example", Role::Publisher);
        contact.roles.push(Role::Author);
        record.identification.citation.contact = Some(contact);

        let err = to_string(&record).unwrap_err();
        assert!(matches!(err, Error::Inconsistency(_)));
        assert!(err.to_string().contains("exactly one role"));
    }

    #[test]
    fn test_permissions_embedded_with_stable_id() {
        let mut record = minimal_record();
        record.identification.constraints = Constraints {
            access: vec![AccessConstraint {
                restriction: Restriction::Restricted,
                statement: None,
                permissions: Some(serde_json::json!({"foo": "bar"})),
            }],
            usage: vec![],
        };
        let first = to_string(&record).unwrap();
        let second = to_string(&record).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("<gmd:MD_LegalConstraints id=\"perm-"));
        assert!(first.contains("{&quot;foo&quot;:&quot;bar&quot;}"));
    }

    #[test]
    fn test_tab_indent_string_indents_with_tabs() {
        let config = WriterConfig {
            indent: true,
            indent_string: "\t".to_string(),
            xml_declaration: false,
        };
        let xml = RecordWriter::with_config(config)
            .write_to_string(&minimal_record())
            .unwrap();
        assert!(xml.contains("\n\t<gmd:identificationInfo>"));
        assert!(!xml.contains("\n "));
    }

    #[test]
    fn test_citation_dates_keep_insertion_order() {
        let mut record = minimal_record();
        let mut dates = CitationDates::new();
        dates.set(DateType::Publication, "2019".parse().unwrap());
        dates.set(DateType::Creation, "2018".parse().unwrap());
        record.identification.citation.dates = dates;

        let xml = to_string(&record).unwrap();
        let publication = xml.find("codeListValue=\"publication\"").unwrap();
        let creation = xml.find("codeListValue=\"creation\"").unwrap();
        assert!(publication < creation);
    }
}
