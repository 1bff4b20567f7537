//! Record configuration: JSON load/dump plus schema validation.
//!
//! A [`RecordConfig`] is the JSON-facing side of a record: it validates raw
//! configuration JSON against the embedded JSON Schema for its declared
//! version, deserializes it into a typed [`MetadataRecord`], and serializes
//! back out. Validation happens once at this boundary; everything past it
//! works with typed optional fields.
//!
//! Two schema versions exist. They differ in the identification section:
//! v1 carries `lineage` as a bare string and has no `purpose` or `credit`
//! fields; v2 carries `lineage` as a `{"statement": {...}}` object and adds
//! both fields. [`upgrade`] converts v1 JSON to v2 losslessly; [`downgrade`]
//! converts v2 to v1 and drops `purpose` and `credit` (v1 cannot express
//! them), logging each dropped field.

use crate::error::{Error, Result};
use crate::records::MetadataRecord;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const SCHEMA_V1: &str = include_str!("../resources/schemas/v1/record.json");
const SCHEMA_V2: &str = include_str!("../resources/schemas/v2/record.json");

/// A configuration schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVersion {
    /// First published configuration shape
    V1,
    /// Current configuration shape
    #[default]
    V2,
}

impl SchemaVersion {
    /// The version label used in error messages and file layouts.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::V1 => "v1",
            SchemaVersion::V2 => "v2",
        }
    }

    /// The most recent schema version.
    pub fn latest() -> Self {
        SchemaVersion::V2
    }

    fn schema_source(&self) -> &'static str {
        match self {
            SchemaVersion::V1 => SCHEMA_V1,
            SchemaVersion::V2 => SCHEMA_V2,
        }
    }
}

/// A typed record bound to the schema version its JSON form conforms to.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordConfig {
    record: MetadataRecord,
    schema_version: SchemaVersion,
}

impl RecordConfig {
    /// Wraps an in-memory record under the given schema version.
    pub fn new(record: MetadataRecord, schema_version: SchemaVersion) -> Self {
        Self {
            record,
            schema_version,
        }
    }

    /// Parses and validates configuration JSON.
    ///
    /// The JSON is validated against the schema for `version` before any
    /// deserialization; v1 input is upgraded to the current shape after
    /// validation, so the in-memory record is always the same type.
    pub fn loads(json: &str, version: SchemaVersion) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value, version)
    }

    /// Reads and validates a configuration JSON file.
    pub fn load(path: impl AsRef<Path>, version: SchemaVersion) -> Result<Self> {
        Self::loads(&fs::read_to_string(path)?, version)
    }

    /// Validates an already-parsed JSON value and converts it to a config.
    pub fn from_value(value: Value, version: SchemaVersion) -> Result<Self> {
        validate_value(&value, version)?;
        let value = match version {
            SchemaVersion::V1 => upgrade(value),
            SchemaVersion::V2 => value,
        };
        debug!(version = version.as_str(), "configuration validated");
        Ok(Self {
            record: serde_json::from_value(value)?,
            schema_version: version,
        })
    }

    /// Serializes the configuration to pretty-printed JSON in its declared
    /// schema version's shape.
    pub fn dumps(&self) -> Result<String> {
        let value = self.to_value()?;
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Writes the configuration to a JSON file.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.dumps()?)?;
        Ok(())
    }

    /// The configuration as a JSON value in its declared version's shape.
    pub fn to_value(&self) -> Result<Value> {
        let value = serde_json::to_value(&self.record)?;
        Ok(match self.schema_version {
            SchemaVersion::V1 => downgrade(value),
            SchemaVersion::V2 => value,
        })
    }

    /// The typed record.
    pub fn record(&self) -> &MetadataRecord {
        &self.record
    }

    /// Consumes the config, returning the typed record.
    pub fn into_record(self) -> MetadataRecord {
        self.record
    }

    /// The schema version this configuration conforms to.
    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }
}

/// Validates a JSON value against the schema for a version.
///
/// Collects every violation rather than stopping at the first; each entry
/// names the instance path it applies to.
pub fn validate_value(value: &Value, version: SchemaVersion) -> Result<()> {
    let schema: Value = serde_json::from_str(version.schema_source())
        .map_err(|e| Error::SchemaCompile(e.to_string()))?;
    let validator = jsonschema::Validator::new(&schema)
        .map_err(|e| Error::SchemaCompile(format!("failed to compile schema: {e}")))?;

    let errors: Vec<String> = validator
        .iter_errors(value)
        .map(|e| {
            let path = e.instance_path().to_string();
            if path.is_empty() {
                e.to_string()
            } else {
                format!("{path}: {e}")
            }
        })
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::ConfigValidation {
            version: version.as_str().to_string(),
            errors,
        })
    }
}

/// Converts v1 configuration JSON to the v2 shape. Lossless.
///
/// The only structural difference going up is lineage: v1's bare string
/// becomes v2's statement object.
pub fn upgrade(mut value: Value) -> Value {
    if let Some(identification) = value.get_mut("identification") {
        if let Some(lineage) = identification.get_mut("lineage") {
            if let Value::String(statement) = lineage.take() {
                *lineage = serde_json::json!({ "statement": { "value": statement } });
            }
        }
    }
    value
}

/// Converts v2 configuration JSON to the v1 shape. Lossy.
///
/// Drops `identification.purpose` and `identification.credit`, which v1
/// cannot express, and flattens lineage to its statement text (a statement
/// hyperlink, if any, is also dropped).
pub fn downgrade(mut value: Value) -> Value {
    if let Some(identification) = value.get_mut("identification").and_then(Value::as_object_mut) {
        for field in ["purpose", "credit"] {
            if identification.remove(field).is_some() {
                warn!(field, "dropping field with no v1 equivalent");
            }
        }
        if let Some(lineage) = identification.get_mut("lineage") {
            let statement = lineage
                .get("statement")
                .and_then(|s| s.get("value"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if lineage.get("statement").and_then(|s| s.get("href")).is_some() {
                warn!("dropping lineage statement hyperlink with no v1 equivalent");
            }
            *lineage = Value::String(statement);
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_config() -> Value {
        json!({
            "identification": {
                "citation": {
                    "title": { "value": "Test Record" },
                    "dates": { "creation": "2018" }
                },
                "abstract": "A test record."
            }
        })
    }

    #[test]
    fn test_loads_valid_config() {
        let config =
            RecordConfig::loads(&minimal_config().to_string(), SchemaVersion::V2).unwrap();
        assert_eq!(config.record().identification.citation.title.value, "Test Record");
        assert_eq!(
            config.record().identification.citation.dates.len(),
            1
        );
    }

    #[test]
    fn test_missing_required_key_names_it() {
        let mut value = minimal_config();
        value["identification"]
            .as_object_mut()
            .unwrap()
            .remove("abstract");

        let err = RecordConfig::from_value(value, SchemaVersion::V2).unwrap_err();
        match err {
            Error::ConfigValidation { version, errors } => {
                assert_eq!(version, "v2");
                assert!(errors.iter().any(|e| e.contains("abstract")), "{errors:?}");
            }
            other => panic!("expected ConfigValidation, got {other}"),
        }
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut value = minimal_config();
        value["identification"]["citation"]["publisher"] = json!("Example");
        assert!(RecordConfig::from_value(value, SchemaVersion::V2).is_err());
    }

    #[test]
    fn test_dump_load_roundtrip() {
        let mut value = minimal_config();
        value["identification"]["purpose"] = json!("Testing.");
        let config = RecordConfig::from_value(value, SchemaVersion::V2).unwrap();

        let json = config.dumps().unwrap();
        let again = RecordConfig::loads(&json, SchemaVersion::V2).unwrap();
        assert_eq!(again, config);
    }

    #[test]
    fn test_v1_lineage_upgrades() {
        let mut value = minimal_config();
        value["identification"]["lineage"] = json!("Derived from observations.");

        let config = RecordConfig::from_value(value, SchemaVersion::V1).unwrap();
        let lineage = config.record().identification.lineage.as_ref().unwrap();
        assert_eq!(lineage.statement.value, "Derived from observations.");

        // dumping in v1 shape flattens back to the string
        let dumped: Value = serde_json::from_str(&config.dumps().unwrap()).unwrap();
        assert_eq!(
            dumped["identification"]["lineage"],
            json!("Derived from observations.")
        );
    }

    #[test]
    fn test_v1_rejects_v2_only_fields() {
        let mut value = minimal_config();
        value["identification"]["purpose"] = json!("Testing.");
        let err = RecordConfig::from_value(value, SchemaVersion::V1).unwrap_err();
        assert!(err.to_string().contains("v1"));
    }

    #[test]
    fn test_downgrade_drops_v2_only_fields() {
        let mut value = minimal_config();
        value["identification"]["purpose"] = json!("Testing.");
        value["identification"]["credit"] = json!("Funded by Example.");
        value["identification"]["lineage"] = json!({ "statement": { "value": "Observed." } });

        let downgraded = downgrade(value);
        assert!(downgraded["identification"].get("purpose").is_none());
        assert!(downgraded["identification"].get("credit").is_none());
        assert_eq!(downgraded["identification"]["lineage"], json!("Observed."));
        assert!(validate_value(&downgraded, SchemaVersion::V1).is_ok());
    }

    #[test]
    fn test_upgrade_then_downgrade_is_identity_for_v1() {
        let mut value = minimal_config();
        value["identification"]["lineage"] = json!("Observed.");
        assert_eq!(downgrade(upgrade(value.clone())), value);
    }

    #[test]
    fn test_date_precision_survives_config_roundtrip() {
        let mut value = minimal_config();
        value["identification"]["citation"]["dates"]["publication"] = json!("2019-06");
        let config = RecordConfig::from_value(value.clone(), SchemaVersion::V2).unwrap();
        let dumped: Value = serde_json::from_str(&config.dumps().unwrap()).unwrap();
        assert_eq!(
            dumped["identification"]["citation"]["dates"]["publication"],
            json!("2019-06")
        );
    }
}
