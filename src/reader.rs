//! Record reader: parses ISO 19115 XML back into a [`MetadataRecord`].
//!
//! The reader is namespace-aware and tolerant of unknown elements: anything
//! it does not recognize is skipped, and only elements that are present
//! populate fields. It is the inverse of the writer; a document produced by
//! [`crate::writer::to_string`] decodes to a structurally equal record, and
//! re-encoding that record reproduces the document byte-for-byte.
//!
//! # Example
//!
//! ```rust
//! use iso19115::records::MetadataRecord;
//! use iso19115::{reader, writer};
//!
//! let record = MetadataRecord::with_identification("Test Record", "A test record.");
//! let xml = writer::to_string(&record).unwrap();
//! let decoded = reader::from_str(&xml).unwrap();
//! assert_eq!(decoded, record);
//! ```

use crate::error::{Error, Result};
use crate::namespaces::{NS_GCO, NS_GMD, NS_GML, NS_GMX, NS_XLINK};
use crate::records::codes::{
    DateType, KeywordType, MaintenanceFrequency, OnlineFunction, Progress, Restriction, Role,
    ScopeCode,
};
use crate::records::{
    AccessConstraint, Address, BoundingBox, CharacterText, Citation, CitationDates, Constraints,
    Date, Extent, Format, Identification, Identifier, KeywordSet, Lineage, MetadataRecord,
    MetadataStandard, OnlineResource, ResponsibleParty, TemporalExtent, UsageConstraint,
    VerticalExtent,
};
use roxmltree::{Document, Node};
use std::str::FromStr;
use tracing::debug;

/// Parses a metadata record from UTF-8 XML.
pub fn from_str(xml: &str) -> Result<MetadataRecord> {
    let document = Document::parse(xml)?;
    let root = document.root_element();
    if !root.has_tag_name((NS_GMD, "MD_Metadata")) {
        return Err(Error::MissingElement("gmd:MD_Metadata".to_string()));
    }
    read_record(root)
}

fn read_record(root: Node) -> Result<MetadataRecord> {
    let mut record = MetadataRecord::new();

    record.file_identifier =
        child(root, NS_GMD, "fileIdentifier").map(|n| read_character_text(n).value);
    record.language = child(root, NS_GMD, "language").and_then(read_open_code);
    record.character_set = child(root, NS_GMD, "characterSet").and_then(read_open_code);
    record.hierarchy_level = read_code::<ScopeCode>(root, "hierarchyLevel")?;
    for contact in children(root, NS_GMD, "contact") {
        record.contacts.push(read_responsible_party(contact)?);
    }
    record.date_stamp = child(root, NS_GMD, "dateStamp")
        .map(read_date_leaf)
        .transpose()?;
    record.metadata_standard = read_metadata_standard(root);
    record.reference_system = read_reference_system(root);

    let identification = child(root, NS_GMD, "identificationInfo")
        .and_then(|n| child(n, NS_GMD, "MD_DataIdentification"))
        .ok_or_else(|| Error::MissingElement("gmd:identificationInfo".to_string()))?;
    record.identification = read_identification(identification)?;

    if let Some(distribution) =
        child(root, NS_GMD, "distributionInfo").and_then(|n| child(n, NS_GMD, "MD_Distribution"))
    {
        read_distribution(distribution, &mut record)?;
    }
    record.identification.lineage = read_data_quality(root);

    debug!(file_identifier = ?record.file_identifier, "decoded metadata record");
    Ok(record)
}

fn read_metadata_standard(root: Node) -> Option<MetadataStandard> {
    let name = child(root, NS_GMD, "metadataStandardName").map(|n| read_character_text(n).value)?;
    Some(MetadataStandard {
        name,
        version: child(root, NS_GMD, "metadataStandardVersion").map(|n| read_character_text(n).value),
    })
}

fn read_reference_system(root: Node) -> Option<Identifier> {
    let code = child(root, NS_GMD, "referenceSystemInfo")
        .and_then(|n| child(n, NS_GMD, "MD_ReferenceSystem"))
        .and_then(|n| child(n, NS_GMD, "referenceSystemIdentifier"))
        .and_then(|n| child(n, NS_GMD, "RS_Identifier"))
        .and_then(|n| child(n, NS_GMD, "code"))?;
    Some(identifier_from_text(read_character_text(code)))
}

fn read_identification(node: Node) -> Result<Identification> {
    let citation = child(node, NS_GMD, "citation")
        .and_then(|n| child(n, NS_GMD, "CI_Citation"))
        .ok_or_else(|| Error::MissingElement("gmd:citation".to_string()))?;

    let mut identification = Identification {
        citation: read_citation(citation)?,
        abstract_text: child(node, NS_GMD, "abstract")
            .map(|n| read_character_text(n).value)
            .ok_or_else(|| Error::MissingElement("gmd:abstract".to_string()))?,
        ..Default::default()
    };

    identification.purpose = child(node, NS_GMD, "purpose").map(|n| read_character_text(n).value);
    identification.credit = child(node, NS_GMD, "credit").map(|n| read_character_text(n).value);
    identification.status = read_code::<Progress>(node, "status")?;
    for contact in children(node, NS_GMD, "pointOfContact") {
        identification.contacts.push(read_responsible_party(contact)?);
    }
    if let Some(maintenance) = child(node, NS_GMD, "resourceMaintenance")
        .and_then(|n| child(n, NS_GMD, "MD_MaintenanceInformation"))
    {
        identification.maintenance_frequency =
            read_code::<MaintenanceFrequency>(maintenance, "maintenanceAndUpdateFrequency")?;
    }
    for keywords in children(node, NS_GMD, "descriptiveKeywords") {
        if let Some(set) = child(keywords, NS_GMD, "MD_Keywords") {
            identification.keywords.push(read_keywords(set)?);
        }
    }
    identification.constraints = read_constraints(node)?;
    for topic in children(node, NS_GMD, "topicCategory") {
        if let Some(code) = child(topic, NS_GMD, "MD_TopicCategoryCode") {
            identification.topics.push(text_of(code));
        }
    }
    for extent in children(node, NS_GMD, "extent") {
        if let Some(extent) = child(extent, NS_GMD, "EX_Extent") {
            identification.extents.push(read_extent(extent)?);
        }
    }

    Ok(identification)
}

fn read_citation(node: Node) -> Result<Citation> {
    let mut citation = Citation {
        title: child(node, NS_GMD, "title")
            .map(read_character_text)
            .ok_or_else(|| Error::MissingElement("gmd:title".to_string()))?,
        ..Default::default()
    };

    let mut dates = CitationDates::new();
    for wrapper in children(node, NS_GMD, "date") {
        if let Some(ci_date) = child(wrapper, NS_GMD, "CI_Date") {
            let date = child(ci_date, NS_GMD, "date")
                .map(read_date_leaf)
                .transpose()?
                .ok_or_else(|| Error::MissingElement("gmd:date".to_string()))?;
            let date_type = read_code::<DateType>(ci_date, "dateType")?
                .ok_or_else(|| Error::MissingElement("gmd:dateType".to_string()))?;
            // duplicate types: the later date wins
            dates.set(date_type, date);
        }
    }
    citation.dates = dates;

    citation.edition = child(node, NS_GMD, "edition").map(|n| read_character_text(n).value);
    for identifier in children(node, NS_GMD, "identifier") {
        if let Some(code) = child(identifier, NS_GMD, "MD_Identifier")
            .and_then(|n| child(n, NS_GMD, "code"))
        {
            citation
                .identifiers
                .push(identifier_from_text(read_character_text(code)));
        }
    }
    citation.contact = children(node, NS_GMD, "citedResponsibleParty")
        .next()
        .map(read_responsible_party)
        .transpose()?;

    Ok(citation)
}

fn read_responsible_party(wrapper: Node) -> Result<ResponsibleParty> {
    let node = child(wrapper, NS_GMD, "CI_ResponsibleParty")
        .ok_or_else(|| Error::MissingElement("gmd:CI_ResponsibleParty".to_string()))?;

    let mut party = ResponsibleParty {
        individual: child(node, NS_GMD, "individualName").map(read_character_text),
        organisation: child(node, NS_GMD, "organisationName").map(read_character_text),
        ..Default::default()
    };

    if let Some(contact_info) = child(node, NS_GMD, "contactInfo")
        .and_then(|n| child(n, NS_GMD, "CI_Contact"))
    {
        party.phone = child(contact_info, NS_GMD, "phone")
            .and_then(|n| child(n, NS_GMD, "CI_Telephone"))
            .and_then(|n| child(n, NS_GMD, "voice"))
            .map(|n| read_character_text(n).value);
        if let Some(ci_address) = child(contact_info, NS_GMD, "address")
            .and_then(|n| child(n, NS_GMD, "CI_Address"))
        {
            let address = read_address(ci_address);
            if !address.is_empty() {
                party.address = Some(address);
            }
            party.email = child(ci_address, NS_GMD, "electronicMailAddress")
                .map(|n| read_character_text(n).value);
        }
        party.online_resource = child(contact_info, NS_GMD, "onlineResource")
            .map(read_online_resource)
            .transpose()?;
    }

    for role in children(node, NS_GMD, "role") {
        if let Some(role) = code_value::<Role>(role)? {
            party.roles.push(role);
        }
    }

    Ok(party)
}

fn read_address(node: Node) -> Address {
    Address {
        delivery_point: child(node, NS_GMD, "deliveryPoint").map(|n| read_character_text(n).value),
        city: child(node, NS_GMD, "city").map(|n| read_character_text(n).value),
        administrative_area: child(node, NS_GMD, "administrativeArea")
            .map(|n| read_character_text(n).value),
        postal_code: child(node, NS_GMD, "postalCode").map(|n| read_character_text(n).value),
        country: child(node, NS_GMD, "country").map(|n| read_character_text(n).value),
    }
}

fn read_online_resource(wrapper: Node) -> Result<OnlineResource> {
    let node = child(wrapper, NS_GMD, "CI_OnlineResource")
        .ok_or_else(|| Error::MissingElement("gmd:CI_OnlineResource".to_string()))?;
    let href = child(node, NS_GMD, "linkage")
        .and_then(|n| child(n, NS_GMD, "URL"))
        .map(text_of)
        .ok_or_else(|| Error::MissingElement("gmd:linkage".to_string()))?;

    Ok(OnlineResource {
        href,
        title: child(node, NS_GMD, "name").map(|n| read_character_text(n).value),
        description: child(node, NS_GMD, "description").map(|n| read_character_text(n).value),
        function: read_code::<OnlineFunction>(node, "function")?,
    })
}

fn read_keywords(node: Node) -> Result<KeywordSet> {
    let mut set = KeywordSet {
        terms: children(node, NS_GMD, "keyword").map(read_character_text).collect(),
        keyword_type: read_code::<KeywordType>(node, "type")?,
        thesaurus: None,
    };
    if let Some(thesaurus) = child(node, NS_GMD, "thesaurusName")
        .and_then(|n| child(n, NS_GMD, "CI_Citation"))
    {
        set.thesaurus = Some(read_citation(thesaurus)?);
    }
    Ok(set)
}

/// Reads all resource constraints, splitting access from usage by which
/// restriction element the legal constraints node carries.
fn read_constraints(node: Node) -> Result<Constraints> {
    let mut constraints = Constraints::default();

    for wrapper in children(node, NS_GMD, "resourceConstraints") {
        let Some(legal) = child(wrapper, NS_GMD, "MD_LegalConstraints") else {
            continue;
        };
        if let Some(restriction) = read_code::<Restriction>(legal, "accessConstraints")? {
            constraints.access.push(read_access_constraint(legal, restriction)?);
        } else if let Some(restriction) = read_code::<Restriction>(legal, "useConstraints")? {
            constraints.usage.push(UsageConstraint {
                restriction,
                copyright_licence: child(legal, NS_GMD, "otherConstraints")
                    .map(read_character_text),
            });
        }
    }

    Ok(constraints)
}

fn read_access_constraint(legal: Node, restriction: Restriction) -> Result<AccessConstraint> {
    let mut constraint = AccessConstraint::new(restriction);

    for other in children(legal, NS_GMD, "otherConstraints") {
        let text = read_character_text(other);
        // embedded permissions payloads are JSON objects, statements are not
        if let Ok(value @ serde_json::Value::Object(_)) =
            serde_json::from_str::<serde_json::Value>(&text.value)
        {
            if constraint.permissions.is_none() {
                constraint.permissions = Some(value);
                continue;
            }
        }
        if constraint.statement.is_none() {
            constraint.statement = Some(text);
        }
    }

    Ok(constraint)
}

fn read_extent(node: Node) -> Result<Extent> {
    let mut extent = Extent::default();

    if let Some(bbox) = child(node, NS_GMD, "geographicElement")
        .and_then(|n| child(n, NS_GMD, "EX_GeographicBoundingBox"))
    {
        extent.geographic = Some(BoundingBox {
            west_longitude: read_decimal(bbox, "westBoundLongitude")?,
            east_longitude: read_decimal(bbox, "eastBoundLongitude")?,
            south_latitude: read_decimal(bbox, "southBoundLatitude")?,
            north_latitude: read_decimal(bbox, "northBoundLatitude")?,
        });
    }
    if let Some(period) = child(node, NS_GMD, "temporalElement")
        .and_then(|n| child(n, NS_GMD, "EX_TemporalExtent"))
        .and_then(|n| child(n, NS_GMD, "extent"))
        .and_then(|n| child(n, NS_GML, "TimePeriod"))
    {
        extent.temporal = Some(read_time_period(period)?);
    }
    if let Some(vertical) = child(node, NS_GMD, "verticalElement")
        .and_then(|n| child(n, NS_GMD, "EX_VerticalExtent"))
    {
        extent.vertical = Some(VerticalExtent {
            minimum: read_real(vertical, "minimumValue")?,
            maximum: read_real(vertical, "maximumValue")?,
            crs_href: child(vertical, NS_GMD, "verticalCRS")
                .and_then(|n| n.attribute((NS_XLINK, "href")))
                .map(str::to_string),
        });
    }

    Ok(extent)
}

fn read_time_period(period: Node) -> Result<TemporalExtent> {
    let start = child(period, NS_GML, "beginPosition")
        .map(text_of)
        .ok_or_else(|| Error::MissingElement("gml:beginPosition".to_string()))?
        .parse()?;
    // an empty end position means the period is open-ended
    let end = match child(period, NS_GML, "endPosition").map(text_of) {
        Some(text) if !text.is_empty() => Some(text.parse()?),
        _ => None,
    };
    Ok(TemporalExtent { start, end })
}

fn read_distribution(node: Node, record: &mut MetadataRecord) -> Result<()> {
    for wrapper in children(node, NS_GMD, "distributionFormat") {
        if let Some(format) = child(wrapper, NS_GMD, "MD_Format") {
            record.distribution_formats.push(read_format(format)?);
        }
    }
    for wrapper in children(node, NS_GMD, "distributor") {
        if let Some(contact) = child(wrapper, NS_GMD, "MD_Distributor")
            .and_then(|n| child(n, NS_GMD, "distributorContact"))
        {
            record.distributors.push(read_responsible_party(contact)?);
        }
    }
    for wrapper in children(node, NS_GMD, "transferOptions") {
        if let Some(online) = child(wrapper, NS_GMD, "MD_DigitalTransferOptions")
            .and_then(|n| child(n, NS_GMD, "onLine"))
        {
            record.transfer_options.push(read_online_resource(online)?);
        }
    }
    Ok(())
}

fn read_format(node: Node) -> Result<Format> {
    let name = child(node, NS_GMD, "name")
        .map(read_character_text)
        .ok_or_else(|| Error::MissingElement("gmd:name".to_string()))?;
    // a nil version element decodes to no version at all
    let version = child(node, NS_GMD, "version")
        .filter(|n| n.attribute((NS_GCO, "nilReason")).is_none())
        .map(|n| read_character_text(n).value);
    Ok(Format { name, version })
}

fn read_data_quality(root: Node) -> Option<Lineage> {
    let statement = child(root, NS_GMD, "dataQualityInfo")
        .and_then(|n| child(n, NS_GMD, "DQ_DataQuality"))
        .and_then(|n| child(n, NS_GMD, "lineage"))
        .and_then(|n| child(n, NS_GMD, "LI_Lineage"))
        .and_then(|n| child(n, NS_GMD, "statement"))?;
    Some(Lineage {
        statement: read_character_text(statement),
    })
}

// ============================================================================
// Low-level helpers
// ============================================================================

/// Finds the first direct child element with the given namespace and name.
fn child<'a, 'input>(node: Node<'a, 'input>, ns: &str, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name && n.tag_name().namespace() == Some(ns))
}

/// Iterates the direct child elements with the given namespace and name,
/// in document order.
fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    ns: &'a str,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| {
        n.is_element() && n.tag_name().name() == name && n.tag_name().namespace() == Some(ns)
    })
}

/// The trimmed text content of an element.
fn text_of(node: Node) -> String {
    node.text().unwrap_or("").trim().to_string()
}

/// Reads the text value of a wrapper element: either a plain
/// `gco:CharacterString` or a link-bearing `gmx:Anchor`.
///
/// An anchor whose visible text repeats its own target decodes to the
/// href-only form. Href-only values render the href as their anchor text on
/// encode, so this is the inverse that keeps them round-trippable, whatever
/// field they sit in.
fn read_character_text(wrapper: Node) -> CharacterText {
    if let Some(anchor) = child(wrapper, NS_GMX, "Anchor") {
        let mut text = CharacterText {
            value: text_of(anchor),
            href: anchor.attribute((NS_XLINK, "href")).map(str::to_string),
            title: anchor.attribute((NS_XLINK, "title")).map(str::to_string),
        };
        if text.href.as_deref() == Some(text.value.as_str()) {
            text.value = String::new();
        }
        return text;
    }
    CharacterText::plain(
        child(wrapper, NS_GCO, "CharacterString")
            .map(text_of)
            .unwrap_or_default(),
    )
}

fn identifier_from_text(text: CharacterText) -> Identifier {
    Identifier {
        identifier: text.value,
        href: text.href,
        title: text.title,
    }
}

/// Reads a closed code list value from the named wrapper child.
///
/// The `codeListValue` attribute is authoritative; element text is a
/// fallback. A value outside the code list is an error, not a skip.
fn read_code<T: FromStr<Err = Error>>(node: Node, wrapper: &str) -> Result<Option<T>> {
    match child(node, NS_GMD, wrapper) {
        Some(wrapper) => code_value(wrapper),
        None => Ok(None),
    }
}

/// Reads a code value from the code node inside a wrapper element.
fn code_value<T: FromStr<Err = Error>>(wrapper: Node) -> Result<Option<T>> {
    let Some(code) = wrapper.children().find(|n| n.is_element()) else {
        return Ok(None);
    };
    let value = code
        .attribute("codeListValue")
        .map(str::to_string)
        .unwrap_or_else(|| text_of(code));
    Ok(Some(value.parse()?))
}

/// Reads an open (free-string) code such as a language, keeping whatever
/// value the document carries.
fn read_open_code(wrapper: Node) -> Option<String> {
    let code = wrapper.children().find(|n| n.is_element())?;
    Some(
        code.attribute("codeListValue")
            .map(str::to_string)
            .unwrap_or_else(|| text_of(code)),
    )
}

/// Reads a `gco:Date` or `gco:DateTime` leaf from a wrapper element.
fn read_date_leaf(wrapper: Node) -> Result<Date> {
    let text = child(wrapper, NS_GCO, "Date")
        .or_else(|| child(wrapper, NS_GCO, "DateTime"))
        .map(text_of)
        .ok_or_else(|| Error::MissingElement("gco:Date".to_string()))?;
    text.parse()
}

fn read_decimal(node: Node, wrapper: &str) -> Result<f64> {
    read_number(node, wrapper, "Decimal")
}

fn read_real(node: Node, wrapper: &str) -> Result<f64> {
    read_number(node, wrapper, "Real")
}

fn read_number(node: Node, wrapper: &str, leaf: &str) -> Result<f64> {
    let text = child(node, NS_GMD, wrapper)
        .and_then(|n| child(n, NS_GCO, leaf))
        .map(text_of)
        .ok_or_else(|| Error::MissingElement(format!("gmd:{}", wrapper)))?;
    text.parse()
        .map_err(|_| Error::Inconsistency(format!("invalid number in gmd:{}: {}", wrapper, text)))
}
