//! Citations and responsible parties.

use crate::records::codes::{DateType, Role};
use crate::records::common::{CharacterText, Date, Identifier, OnlineResource};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The typed dates of a citation, keyed by the event they refer to.
///
/// Dates are stored in insertion order, which the writer reproduces exactly.
/// On decode the `dateType` code becomes the key; a document carrying two
/// dates with the same type keeps the later one (the standard treats the
/// type as unique among siblings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CitationDates {
    dates: IndexMap<DateType, Date>,
}

impl CitationDates {
    /// Creates an empty date set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date for an event type, replacing any existing entry.
    pub fn set(&mut self, date_type: DateType, date: Date) {
        self.dates.insert(date_type, date);
    }

    /// Gets the date for an event type.
    pub fn get(&self, date_type: DateType) -> Option<&Date> {
        self.dates.get(&date_type)
    }

    /// Returns the number of dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if no dates are set.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterates over (event type, date) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DateType, &Date)> {
        self.dates.iter().map(|(t, d)| (*t, d))
    }
}

impl FromIterator<(DateType, Date)> for CitationDates {
    fn from_iter<I: IntoIterator<Item = (DateType, Date)>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Street address line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_point: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State, province or region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,
    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Country
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.delivery_point.is_none()
            && self.city.is_none()
            && self.administrative_area.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
    }
}

/// A person or organisation responsible for a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsibleParty {
    /// Individual name, optionally linked (e.g. to an ORCID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual: Option<CharacterText>,
    /// Organisation name, optionally linked (e.g. to a ROR)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisation: Option<CharacterText>,
    /// Voice telephone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// The party's web presence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_resource: Option<OnlineResource>,
    /// The functions this party performs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
}

impl ResponsibleParty {
    /// Creates a party for an organisation with one role.
    pub fn organisation(name: impl Into<String>, role: Role) -> Self {
        Self {
            organisation: Some(CharacterText::plain(name)),
            roles: vec![role],
            ..Default::default()
        }
    }

    /// Returns true if any contact detail (phone, address, email, online
    /// resource) is set.
    pub fn has_contact_info(&self) -> bool {
        self.phone.is_some()
            || self.address.is_some()
            || self.email.is_some()
            || self.online_resource.is_some()
    }
}

/// A citation for a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Resource title, optionally linked
    pub title: CharacterText,
    /// Typed reference dates
    #[serde(default, skip_serializing_if = "CitationDates::is_empty")]
    pub dates: CitationDates,
    /// Edition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    /// Identifiers for the cited resource
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<Identifier>,
    /// The party responsible for the cited resource.
    ///
    /// The standard allows exactly one role here; the writer rejects any
    /// other cardinality as an inconsistency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ResponsibleParty>,
}

impl Citation {
    /// Creates a citation with a plain-text title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: CharacterText::plain(title),
            ..Default::default()
        }
    }
}
