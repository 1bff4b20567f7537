//! End-to-end round-trip tests over fully-populated records.

use iso19115::config::{RecordConfig, SchemaVersion};
use iso19115::records::codes::{
    DateType, KeywordType, MaintenanceFrequency, OnlineFunction, Progress, Restriction, Role,
    ScopeCode,
};
use iso19115::records::{
    AccessConstraint, Address, BoundingBox, CharacterText, Citation, Constraints, Extent, Format,
    Identifier, KeywordSet, Lineage, MetadataRecord, MetadataStandard, OnlineResource,
    ResponsibleParty, TemporalExtent, UsageConstraint, VerticalExtent,
};
use iso19115::{reader, writer, Error};
use pretty_assertions::assert_eq;
use serde_json::json;

fn contact(organisation: &str, role: Role) -> ResponsibleParty {
    let mut party = ResponsibleParty::organisation(organisation, role);
    party.individual = Some(CharacterText::linked(
        "A. Researcher",
        "https://orcid.org/0000-0002-1825-0097",
    ));
    party.phone = Some("+44 1234 567890".to_string());
    party.address = Some(Address {
        delivery_point: Some("1 Example Road".to_string()),
        city: Some("Cambridge".to_string()),
        administrative_area: Some("Cambridgeshire".to_string()),
        postal_code: Some("CB2 1AB".to_string()),
        country: Some("United Kingdom".to_string()),
    });
    party.email = Some("info@example.com".to_string());
    party.online_resource = Some(OnlineResource {
        href: "https://example.com".to_string(),
        title: Some("Example Institute".to_string()),
        description: Some("Institute home page".to_string()),
        function: Some(OnlineFunction::Information),
    });
    party
}

/// A record exercising every mapped section.
fn full_record() -> MetadataRecord {
    let mut record = MetadataRecord::with_identification(
        "Test Record",
        "A record exercising every mapped element.",
    );
    record.file_identifier = Some("86f11dd7-b7bc-42cd-8bb5-6047376291fc".to_string());
    record.language = Some("eng".to_string());
    record.character_set = Some("utf8".to_string());
    record.hierarchy_level = Some(ScopeCode::Dataset);
    record.contacts = vec![contact("Example Institute", Role::PointOfContact)];
    record.date_stamp = Some("2024-03-15T10:30:00+00:00".parse().unwrap());
    record.metadata_standard = Some(MetadataStandard {
        name: "ISO 19115".to_string(),
        version: Some("2003".to_string()),
    });
    record.reference_system = Some(Identifier {
        identifier: "EPSG:4326".to_string(),
        href: Some("https://epsg.io/4326".to_string()),
        title: None,
    });

    let identification = &mut record.identification;
    identification.citation.title =
        CharacterText::linked("Test Record", "https://doi.org/10.5072/test");
    identification.citation.dates = [
        (DateType::Creation, "2018".parse().unwrap()),
        (DateType::Publication, "2019-06".parse().unwrap()),
        (DateType::Revision, "2020-01-05".parse().unwrap()),
    ]
    .into_iter()
    .collect();
    identification.citation.edition = Some("2".to_string());
    identification.citation.identifiers = vec![Identifier {
        identifier: "10.5072/test".to_string(),
        href: Some("https://doi.org/10.5072/test".to_string()),
        title: None,
    }];
    identification.citation.contact = Some(ResponsibleParty::organisation(
        "Example Publisher",
        Role::Publisher,
    ));
    identification.purpose = Some("Round-trip testing.".to_string());
    identification.credit = Some("Funded by Example.".to_string());
    identification.status = Some(Progress::Completed);
    identification.contacts = vec![contact("Example Institute", Role::PointOfContact)];
    identification.maintenance_frequency = Some(MaintenanceFrequency::AsNeeded);
    identification.keywords = vec![KeywordSet {
        terms: vec![
            CharacterText::plain("sea ice"),
            CharacterText::linked(
                "Atmosphere",
                "https://vocab.nerc.ac.uk/collection/P64/current/atmosphere/",
            ),
        ],
        keyword_type: Some(KeywordType::Theme),
        thesaurus: Some(Citation {
            title: CharacterText::plain("Example Thesaurus"),
            dates: [(DateType::Publication, "2017".parse().unwrap())]
                .into_iter()
                .collect(),
            ..Default::default()
        }),
    }];
    identification.constraints = Constraints {
        access: vec![AccessConstraint {
            restriction: Restriction::Restricted,
            statement: Some(CharacterText::plain("Restricted until embargo ends.")),
            permissions: Some(json!({"read": ["public"], "embargo": "2026-01-01"})),
        }],
        usage: vec![UsageConstraint {
            restriction: Restriction::Licence,
            copyright_licence: Some(CharacterText::linked(
                "Open Government Licence v3.0",
                "https://www.nationalarchives.gov.uk/doc/open-government-licence/version/3/",
            )),
        }],
    };
    identification.topics = vec![
        "environment".to_string(),
        "oceans".to_string(),
        "climatologyMeteorologyAtmosphere".to_string(),
    ];
    identification.extents = vec![Extent {
        geographic: Some(BoundingBox {
            west_longitude: -45.61,
            east_longitude: -27.04,
            south_latitude: 74.06,
            north_latitude: 83.63,
        }),
        temporal: Some(TemporalExtent {
            start: "2018-03".parse().unwrap(),
            end: Some("2021-10-01".parse().unwrap()),
        }),
        vertical: Some(VerticalExtent {
            minimum: 20.0,
            maximum: 40.0,
            crs_href: Some("http://www.opengis.net/def/crs/EPSG/0/5714".to_string()),
        }),
    }];
    identification.lineage = Some(Lineage {
        statement: CharacterText::plain("Derived from in-situ observations."),
    });

    record.distribution_formats = vec![
        Format {
            name: CharacterText::plain("netCDF"),
            version: Some("4".to_string()),
        },
        Format::named("CSV"),
    ];
    record.distributors = vec![ResponsibleParty::organisation(
        "Example Data Centre",
        Role::Distributor,
    )];
    record.transfer_options = vec![OnlineResource {
        href: "https://example.com/download/test-record".to_string(),
        title: Some("Download".to_string()),
        description: None,
        function: Some(OnlineFunction::Download),
    }];

    record
}

#[test]
fn roundtrip_identity_on_full_record() {
    let record = full_record();
    let xml = writer::to_string(&record).unwrap();
    let decoded = reader::from_str(&xml).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn roundtrip_byte_identity_on_full_record() {
    let record = full_record();
    let xml = writer::to_string(&record).unwrap();
    let reencoded = writer::to_string(&reader::from_str(&xml).unwrap()).unwrap();
    assert_eq!(reencoded, xml);
}

#[test]
fn roundtrip_identity_through_json_config() {
    let record = full_record();
    let config = RecordConfig::new(record.clone(), SchemaVersion::V2);
    let json = config.dumps().unwrap();
    let reloaded = RecordConfig::loads(&json, SchemaVersion::V2).unwrap();
    assert_eq!(reloaded.record(), &record);
}

#[test]
fn encoded_config_json_is_schema_valid() {
    let config = RecordConfig::new(full_record(), SchemaVersion::V2);
    let value = config.to_value().unwrap();
    assert!(iso19115::config::validate_value(&value, SchemaVersion::V2).is_ok());
}

#[test]
fn omitted_fields_produce_no_elements() {
    let record = MetadataRecord::with_identification("Test Record", "A test record.");
    let xml = writer::to_string(&record).unwrap();
    for element in [
        "gmd:fileIdentifier",
        "gmd:language",
        "gmd:hierarchyLevel",
        "gmd:contact",
        "gmd:dateStamp",
        "gmd:referenceSystemInfo",
        "gmd:descriptiveKeywords",
        "gmd:resourceConstraints",
        "gmd:extent",
        "gmd:distributionInfo",
        "gmd:dataQualityInfo",
    ] {
        assert!(!xml.contains(element), "unexpected {element} in:\n{xml}");
    }
}

#[test]
fn code_values_always_carry_their_vocabulary() {
    let xml = writer::to_string(&full_record()).unwrap();
    for code_node in [
        "gmd:CI_DateTypeCode",
        "gmd:CI_RoleCode",
        "gmd:MD_ScopeCode",
        "gmd:MD_RestrictionCode",
        "gmd:CI_OnLineFunctionCode",
    ] {
        let open = format!("<{code_node} ");
        assert!(xml.contains(&open), "missing {code_node}");
        for (index, _) in xml.match_indices(&open) {
            let tail = &xml[index..];
            let tag_end = tail.find('>').unwrap();
            assert!(tail[..tag_end].contains("codeList="));
            assert!(tail[..tag_end].contains("codeListValue="));
        }
    }
}

#[test]
fn anchor_collapse_for_url_only_statement() {
    let mut record = MetadataRecord::with_identification("Test Record", "A test record.");
    record.identification.constraints.access.push(AccessConstraint {
        restriction: Restriction::OtherRestrictions,
        statement: Some(CharacterText::href_only("https://example.com/policy")),
        permissions: None,
    });

    let xml = writer::to_string(&record).unwrap();
    let decoded = reader::from_str(&xml).unwrap();
    let statement = decoded.identification.constraints.access[0]
        .statement
        .as_ref()
        .unwrap();
    assert_eq!(statement.value, "");
    assert_eq!(statement.href.as_deref(), Some("https://example.com/policy"));
    assert_eq!(decoded, record);
}

#[test]
fn href_only_anchors_roundtrip_in_every_field() {
    let mut record = MetadataRecord::with_identification("Test Record", "A test record.");
    record.reference_system = Some(Identifier {
        identifier: String::new(),
        href: Some("https://epsg.io/4326".to_string()),
        title: None,
    });
    record.identification.citation.identifiers = vec![Identifier {
        identifier: String::new(),
        href: Some("https://doi.org/10.5072/test".to_string()),
        title: None,
    }];
    record.identification.keywords = vec![KeywordSet {
        terms: vec![CharacterText::href_only(
            "https://vocab.nerc.ac.uk/collection/P64/current/atmosphere/",
        )],
        keyword_type: None,
        thesaurus: None,
    }];
    record.identification.constraints = Constraints {
        access: vec![AccessConstraint {
            restriction: Restriction::OtherRestrictions,
            statement: Some(CharacterText::href_only("https://example.com/policy")),
            permissions: None,
        }],
        usage: vec![UsageConstraint {
            restriction: Restriction::Licence,
            copyright_licence: Some(CharacterText::href_only(
                "https://www.nationalarchives.gov.uk/doc/open-government-licence/version/3/",
            )),
        }],
    };

    let xml = writer::to_string(&record).unwrap();
    let decoded = reader::from_str(&xml).unwrap();
    assert_eq!(decoded, record);
    assert_eq!(writer::to_string(&decoded).unwrap(), xml);
}

#[test]
fn multi_value_ordering_preserved() {
    for count in [0usize, 1, 5] {
        let mut record = MetadataRecord::with_identification("Test Record", "A test record.");
        for i in 0..count {
            record.contacts.push(ResponsibleParty::organisation(
                format!("Organisation {i}"),
                Role::PointOfContact,
            ));
            record.identification.topics.push(format!("topic{i}"));
        }
        let decoded = reader::from_str(&writer::to_string(&record).unwrap()).unwrap();
        assert_eq!(decoded.contacts, record.contacts);
        assert_eq!(decoded.identification.topics, record.identification.topics);
    }
}

#[test]
fn plain_title_roundtrips_without_link_keys() {
    let record = MetadataRecord::with_identification("Test Record", "A test record.");
    let xml = writer::to_string(&record).unwrap();
    assert!(xml.contains("<gmd:title>"));
    assert!(!xml.contains("xlink:href"));

    let decoded = reader::from_str(&xml).unwrap();
    assert_eq!(
        decoded.identification.citation.title,
        CharacterText::plain("Test Record")
    );
    assert!(decoded.identification.citation.title.href.is_none());
}

#[test]
fn year_precision_date_roundtrips_as_year() {
    let mut record = MetadataRecord::with_identification("Test Record", "A test record.");
    record.identification.citation.dates = [(DateType::Creation, "2018".parse().unwrap())]
        .into_iter()
        .collect();

    let xml = writer::to_string(&record).unwrap();
    assert!(xml.contains("<gco:Date>2018</gco:Date>"));

    let decoded = reader::from_str(&xml).unwrap();
    assert_eq!(
        decoded.identification.citation.dates.get(DateType::Creation),
        Some(&"2018".parse().unwrap())
    );
}

#[test]
fn permissions_payload_roundtrips_as_json() {
    let permissions = json!({"read": ["public"], "write": ["admin"]});
    let mut record = MetadataRecord::with_identification("Test Record", "A test record.");
    record.identification.constraints.access.push(AccessConstraint {
        restriction: Restriction::Restricted,
        statement: None,
        permissions: Some(permissions.clone()),
    });

    let decoded = reader::from_str(&writer::to_string(&record).unwrap()).unwrap();
    assert_eq!(
        decoded.identification.constraints.access[0].permissions,
        Some(permissions)
    );
    assert_eq!(decoded, record);
}

#[test]
fn invalid_config_names_the_missing_key() {
    let value = json!({
        "identification": {
            "citation": { "title": { "value": "Test Record" } },
            "abstract": "A test record."
        }
    });
    let err = RecordConfig::from_value(value, SchemaVersion::V2).unwrap_err();
    match err {
        Error::ConfigValidation { errors, .. } => {
            assert!(errors.iter().any(|e| e.contains("dates")), "{errors:?}");
        }
        other => panic!("expected ConfigValidation, got {other}"),
    }
}
