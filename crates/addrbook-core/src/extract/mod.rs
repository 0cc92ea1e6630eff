//! Dictionary-backed field extractors for address book lines.
//!
//! Each extractor consumes part of a residual line and hands back the
//! field it found together with whatever is left of the line. The
//! pipeline applies them in a fixed order: family name, given name,
//! phone, address.

pub mod address;
pub mod family;
pub mod given_name;
pub mod patterns;
pub mod phone;

pub use address::{expand_abbreviation, extract_address, AddressExtractor};
pub use family::{extract_family_name, FamilyNameExtractor};
pub use given_name::{extract_given_name, GivenNameExtractor};
pub use phone::{extract_phones, normalize_phone, phone_era, PhoneEra, PhoneExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from a residual line.
    fn extract(&self, line: &str) -> Extracted<Self::Output>;
}

/// Outcome of running one extractor over a residual line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<T> {
    /// The extracted field, if any.
    pub field: Option<T>,
    /// The unconsumed remainder of the line.
    pub rest: String,
    /// The token that could not be resolved, for unknown-token reports.
    pub unmatched: Option<String>,
}

impl<T> Extracted<T> {
    pub fn matched(field: T, rest: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            rest: rest.into(),
            unmatched: None,
        }
    }

    /// No field; the line is passed on as given.
    pub fn absent(rest: impl Into<String>) -> Self {
        Self {
            field: None,
            rest: rest.into(),
            unmatched: None,
        }
    }

    pub fn with_unmatched(mut self, token: impl Into<String>) -> Self {
        self.unmatched = Some(token.into());
        self
    }

    pub fn is_match(&self) -> bool {
        self.field.is_some()
    }
}

/// Trim commas and whitespace from the start of a residual line.
pub(crate) fn trim_leading_separators(s: &str) -> &str {
    s.trim_start_matches(|c: char| c == ',' || c.is_whitespace())
}

/// Trim commas and whitespace from the end of a residual line.
pub(crate) fn trim_trailing_separators(s: &str) -> &str {
    s.trim_end_matches(|c: char| c == ',' || c.is_whitespace())
}
