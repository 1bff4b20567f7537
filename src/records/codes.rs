//! Controlled vocabularies (code lists) used by metadata records.
//!
//! Each code list is a closed enum carrying the URI of the vocabulary it
//! belongs to and the local name of its XML code node. Values encode as a
//! code element with `codeList` and `codeListValue` attributes and matching
//! text; values outside the enum are unrepresentable, so the writer can
//! never emit an illegal code.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const GMX_CODELISTS: &str = "http://standards.iso.org/ittf/PubliclyAvailableStandards/\
ISO_19139_Schemas/resources/codelist/gmxCodelists.xml";

macro_rules! code_list {
    (
        $(#[$doc:meta])*
        $name:ident, $node:literal, {
            $($(#[$vdoc:meta])* $variant:ident => $code:literal,)+
        }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vdoc])*
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Every legal value of this code list.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The local name of this code list's XML code node.
            pub const NODE_NAME: &'static str = $node;

            /// Returns the code string for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// The URI of the controlled vocabulary this value belongs to.
            pub fn code_list() -> String {
                format!("{}#{}", GMX_CODELISTS, $node)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| Error::UnknownCode {
                        code_list: $node,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

code_list! {
    /// The event a citation date refers to.
    DateType, "CI_DateTypeCode", {
        /// Resource was created
        Creation => "creation",
        /// Resource was published
        Publication => "publication",
        /// Resource was revised
        Revision => "revision",
        /// Resource was adopted
        Adopted => "adopted",
        /// Resource was released to the public
        Released => "released",
        /// Resource was superseded
        Superseded => "superseded",
    }
}

code_list! {
    /// The function a party performs for a resource.
    Role, "CI_RoleCode", {
        /// Author of the resource
        Author => "author",
        /// Accepts accountability for the resource
        Custodian => "custodian",
        /// Distributes the resource
        Distributor => "distributor",
        /// Created the resource
        Originator => "originator",
        /// Owns the resource
        Owner => "owner",
        /// Can be contacted about the resource
        PointOfContact => "pointOfContact",
        /// Published the resource
        Publisher => "publisher",
        /// Supplies the resource
        ResourceProvider => "resourceProvider",
    }
}

code_list! {
    /// The class of resource a record describes.
    ScopeCode, "MD_ScopeCode", {
        /// A dataset
        Dataset => "dataset",
        /// A series of datasets
        Series => "series",
        /// A service
        Service => "service",
        /// Information not tied to geography
        NonGeographicDataset => "nonGeographicDataset",
    }
}

code_list! {
    /// How often a resource is updated.
    MaintenanceFrequency, "MD_MaintenanceFrequencyCode", {
        /// Repeatedly and frequently
        Continual => "continual",
        /// Every day
        Daily => "daily",
        /// Every week
        Weekly => "weekly",
        /// Every month
        Monthly => "monthly",
        /// Every year
        Annually => "annually",
        /// When deemed necessary
        AsNeeded => "asNeeded",
        /// At uneven intervals
        Irregular => "irregular",
        /// No updates planned
        NotPlanned => "notPlanned",
        /// Update schedule not known
        Unknown => "unknown",
    }
}

code_list! {
    /// The production status of a resource.
    Progress, "MD_ProgressCode", {
        /// Production is complete
        Completed => "completed",
        /// Continually being updated
        OnGoing => "onGoing",
        /// Production is planned
        Planned => "planned",
        /// No longer relevant
        Obsolete => "obsolete",
        /// Currently being produced
        UnderDevelopment => "underDevelopment",
    }
}

code_list! {
    /// A limitation placed on access to or use of a resource.
    Restriction, "MD_RestrictionCode", {
        /// Protected by copyright
        Copyright => "copyright",
        /// Formal permission required
        Licence => "licence",
        /// Rights to intellectual property apply
        IntellectualPropertyRights => "intellectualPropertyRights",
        /// Withheld from general circulation
        Restricted => "restricted",
        /// Limitation not listed
        OtherRestrictions => "otherRestrictions",
        /// No constraints apply
        Unrestricted => "unrestricted",
    }
}

code_list! {
    /// The function an online linkage performs.
    OnlineFunction, "CI_OnLineFunctionCode", {
        /// Retrieves the resource
        Download => "download",
        /// Provides information about the resource
        Information => "information",
        /// Accesses an offline copy
        OfflineAccess => "offlineAccess",
        /// Orders the resource
        Order => "order",
        /// Searches for the resource
        Search => "search",
    }
}

code_list! {
    /// The subject matter a keyword set classifies by.
    KeywordType, "MD_KeywordTypeCode", {
        /// Branch of knowledge
        Discipline => "discipline",
        /// Location
        Place => "place",
        /// Layer of the earth
        Stratum => "stratum",
        /// Time period
        Temporal => "temporal",
        /// Topic or subject
        Theme => "theme",
    }
}
