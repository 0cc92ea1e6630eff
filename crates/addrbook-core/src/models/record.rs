//! Resident record data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A family name as resolved by the family-name extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyName {
    /// Canonical display form (or the raw word for unknown names).
    pub name: String,

    /// External identifier (Wikidata) for known names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl FamilyName {
    pub fn known(name: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external_id: Some(external_id.into()),
        }
    }

    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external_id: None,
        }
    }

    /// Whether the name was found in the family-name dictionary.
    pub fn is_resolved(&self) -> bool {
        self.external_id.is_some()
    }
}

/// A geocoded street address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street name.
    pub street: String,

    /// House number, including a sub-unit letter if any.
    pub house_number: String,

    /// Postal code.
    pub postcode: String,

    /// City.
    pub city: String,

    /// Latitude, 6 fractional digits.
    pub latitude: Decimal,

    /// Longitude, 6 fractional digits.
    pub longitude: Decimal,
}

/// One resident entry of an address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Family name.
    pub surname: String,

    /// External identifier of the family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname_id: Option<String>,

    /// Given name(s) as printed, e.g. "Hans Peter".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    /// Publication date of the address book.
    pub date: NaiveDate,

    /// Resolved address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// Normalized phone numbers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phones: Vec<String>,

    /// Page identifier of the source scan.
    pub page_id: u64,

    /// Printed page label; bracketed when synthesized.
    pub page_label: String,
}

impl Record {
    /// All phone numbers joined into a single column value.
    pub fn phone(&self) -> String {
        self.phones.join(", ")
    }
}
