//! Common leaf types shared across record elements.
//!
//! This module contains the foundational values used throughout a metadata
//! record:
//! - [`Date`] - A calendar date or date-time carrying its own precision
//! - [`CharacterText`] - Text that may carry a hyperlink (anchor values)
//! - [`NilReason`] - Placeholder codes for structurally-required but absent values
//! - [`Identifier`] and [`OnlineResource`] - Simple reusable leaves

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Dates with precision
// ============================================================================

/// The granularity at which a date value is known and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePrecision {
    /// Year only ("2018")
    Year,
    /// Year and month ("2018-01")
    Month,
    /// Full calendar date ("2018-01-01")
    Day,
    /// Date and time of day
    DateTime,
}

/// A date value that remembers its own precision.
///
/// A bare ISO date string cannot by itself tell you whether "2018-01-01"
/// meant "January 2018" or "1 Jan 2018", so the precision is part of the
/// value and survives every round trip. Values serialize to the shortest
/// ISO 8601 string their precision allows and parse back by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Date {
    /// A year ("2018")
    Year(i32),
    /// A year and month ("2018-01")
    Month {
        /// Calendar year
        year: i32,
        /// Month of year, 1-12
        month: u32,
    },
    /// A full calendar date ("2018-01-01")
    Day(NaiveDate),
    /// A date with time of day and offset (RFC 3339)
    DateTime(DateTime<FixedOffset>),
}

impl Date {
    /// Returns the precision of this value.
    pub fn precision(&self) -> DatePrecision {
        match self {
            Date::Year(_) => DatePrecision::Year,
            Date::Month { .. } => DatePrecision::Month,
            Date::Day(_) => DatePrecision::Day,
            Date::DateTime(_) => DatePrecision::DateTime,
        }
    }

    /// Returns true if this value carries a time of day.
    ///
    /// Determines whether the XML leaf is `gco:Date` or `gco:DateTime`.
    pub fn has_time(&self) -> bool {
        matches!(self, Date::DateTime(_))
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parses an ISO 8601 string, inferring precision from its shape.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.len() {
            4 => {
                let year: i32 = s
                    .parse()
                    .map_err(|_| Error::InvalidDate(s.to_string()))?;
                Ok(Date::Year(year))
            }
            7 => {
                let (y, m) = s
                    .split_once('-')
                    .ok_or_else(|| Error::InvalidDate(s.to_string()))?;
                let year: i32 = y.parse().map_err(|_| Error::InvalidDate(s.to_string()))?;
                let month: u32 = m.parse().map_err(|_| Error::InvalidDate(s.to_string()))?;
                if !(1..=12).contains(&month) {
                    return Err(Error::InvalidDate(s.to_string()));
                }
                Ok(Date::Month { year, month })
            }
            10 => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Date::Day)
                .map_err(|_| Error::InvalidDate(s.to_string())),
            _ => DateTime::parse_from_rfc3339(s)
                .map(Date::DateTime)
                .map_err(|_| Error::InvalidDate(s.to_string())),
        }
    }
}

impl fmt::Display for Date {
    /// Renders the value truncated to its precision.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Date::Year(year) => write!(f, "{:04}", year),
            Date::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Date::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Date::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

// ============================================================================
// Anchor / character text values
// ============================================================================

/// A text leaf that may carry an associated hyperlink.
///
/// Encodes as a plain `gco:CharacterString` when no `href` is set, and as a
/// `gmx:Anchor` carrying `xlink:href` / `xlink:title` attributes otherwise.
/// When `value` is empty and `href` is set, the href doubles as the visible
/// text to satisfy schemas that require text content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterText {
    /// The visible text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Hyperlink target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Link title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CharacterText {
    /// Creates a plain (link-free) text value.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            href: None,
            title: None,
        }
    }

    /// Creates a linked text value.
    pub fn linked(value: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            href: Some(href.into()),
            title: None,
        }
    }

    /// Creates a value whose visible text is its hyperlink target.
    pub fn href_only(href: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            href: Some(href.into()),
            title: None,
        }
    }

    /// The text to render: the value, or the href when the value is empty.
    pub fn visible_text(&self) -> &str {
        if self.value.is_empty() {
            self.href.as_deref().unwrap_or("")
        } else {
            &self.value
        }
    }

    /// Returns true if this value should encode as an anchor element.
    pub fn is_anchor(&self) -> bool {
        self.href.is_some()
    }
}

impl From<&str> for CharacterText {
    fn from(value: &str) -> Self {
        Self::plain(value)
    }
}

// ============================================================================
// Nil reasons
// ============================================================================

/// Controlled reasons for a structurally-required but absent value.
///
/// Some elements are schema-mandated even when their value is unknown; those
/// fields emit an empty element carrying a `gco:nilReason` attribute instead
/// of being omitted. Which fields do so is decided per field, not per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NilReason {
    /// The value does not apply
    Inapplicable,
    /// The value should exist but is not known to exist
    Missing,
    /// The value will be supplied later
    Template,
    /// The value exists but is not known
    Unknown,
    /// The value is deliberately withheld
    Withheld,
}

impl NilReason {
    /// Returns the attribute value for this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            NilReason::Inapplicable => "inapplicable",
            NilReason::Missing => "missing",
            NilReason::Template => "template",
            NilReason::Unknown => "unknown",
            NilReason::Withheld => "withheld",
        }
    }
}

impl FromStr for NilReason {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inapplicable" => Ok(NilReason::Inapplicable),
            "missing" => Ok(NilReason::Missing),
            "template" => Ok(NilReason::Template),
            "unknown" => Ok(NilReason::Unknown),
            "withheld" => Ok(NilReason::Withheld),
            _ => Err(Error::UnknownCode {
                code_list: "nilReason",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for NilReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Simple reusable leaves
// ============================================================================

/// An identifier, optionally hyperlinked to its register entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    /// The identifier value (e.g. a DOI, an EPSG code)
    pub identifier: String,
    /// Link to the identifier's register entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Link title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Identifier {
    /// Creates an identifier without a link.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            href: None,
            title: None,
        }
    }

    /// The anchor representation of this identifier.
    pub fn as_text(&self) -> CharacterText {
        CharacterText {
            value: self.identifier.clone(),
            href: self.href.clone(),
            title: self.title.clone(),
        }
    }
}

/// An online resource: a linkage with optional descriptive fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnlineResource {
    /// Resource URL
    pub href: String,
    /// Resource name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// What the resource is or does
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The function the linkage performs (code list)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<crate::records::codes::OnlineFunction>,
}

impl OnlineResource {
    /// Creates an online resource with just a linkage.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: None,
            description: None,
            function: None,
        }
    }
}

/// The metadata standard a record declares itself against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataStandard {
    /// Standard name
    pub name: String,
    /// Standard version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_parse_by_shape() {
        assert_eq!("2018".parse::<Date>().unwrap(), Date::Year(2018));
        assert_eq!(
            "2018-03".parse::<Date>().unwrap(),
            Date::Month { year: 2018, month: 3 }
        );
        assert_eq!(
            "2018-03-15".parse::<Date>().unwrap(),
            Date::Day(NaiveDate::from_ymd_opt(2018, 3, 15).unwrap())
        );
        assert!(matches!(
            "2018-03-15T10:30:00+00:00".parse::<Date>().unwrap(),
            Date::DateTime(_)
        ));
    }

    #[test]
    fn test_date_display_truncates_to_precision() {
        assert_eq!(Date::Year(2018).to_string(), "2018");
        assert_eq!(Date::Month { year: 2018, month: 3 }.to_string(), "2018-03");
        assert_eq!(
            Date::Day(NaiveDate::from_ymd_opt(2018, 3, 15).unwrap()).to_string(),
            "2018-03-15"
        );
    }

    #[test]
    fn test_date_roundtrip_preserves_precision() {
        for s in ["2018", "2018-03", "2018-03-15", "2018-03-15T10:30:00+00:00"] {
            let date: Date = s.parse().unwrap();
            assert_eq!(date.to_string(), s);
            let again: Date = date.to_string().parse().unwrap();
            assert_eq!(again, date);
        }
    }

    #[test]
    fn test_date_invalid() {
        assert!("18".parse::<Date>().is_err());
        assert!("2018-13".parse::<Date>().is_err());
        assert!("2018-02-30".parse::<Date>().is_err());
        assert!("yesterday".parse::<Date>().is_err());
    }

    #[test]
    fn test_date_json() {
        let date: Date = serde_json::from_str("\"2018\"").unwrap();
        assert_eq!(date, Date::Year(2018));
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2018\"");
    }

    #[test]
    fn test_character_text_visible_text() {
        let plain = CharacterText::plain("Test Record");
        assert_eq!(plain.visible_text(), "Test Record");
        assert!(!plain.is_anchor());

        let href_only = CharacterText::href_only("https://example.com/licence");
        assert_eq!(href_only.visible_text(), "https://example.com/licence");
        assert!(href_only.is_anchor());
    }

    #[test]
    fn test_character_text_json_omits_empty_value() {
        let href_only = CharacterText::href_only("https://example.com");
        let json = serde_json::to_value(&href_only).unwrap();
        assert!(json.get("value").is_none());
        assert_eq!(json["href"], "https://example.com");
    }

    #[test]
    fn test_nil_reason_roundtrip() {
        for reason in [
            NilReason::Inapplicable,
            NilReason::Missing,
            NilReason::Template,
            NilReason::Unknown,
            NilReason::Withheld,
        ] {
            assert_eq!(reason.as_str().parse::<NilReason>().unwrap(), reason);
        }
        assert!("unwilling".parse::<NilReason>().is_err());
    }
}
