//! Street address extraction against the static address table.

use std::cmp::Reverse;

use super::{trim_trailing_separators, Extracted, FieldExtractor};
use crate::dictionary::AddressTable;
use crate::models::config::{Abbreviation, AddressConfig};
use crate::models::Address;

/// Address field extractor.
///
/// Takes the last two tokens of the line as street and house number and
/// looks them up in the address table.
pub struct AddressExtractor<'a> {
    addresses: &'a AddressTable,
    config: &'a AddressConfig,
}

impl<'a> AddressExtractor<'a> {
    pub fn new(addresses: &'a AddressTable, config: &'a AddressConfig) -> Self {
        Self { addresses, config }
    }

    /// Remove neighbourhood names and separator noise from the line end.
    fn strip_trailing_noise<'l>(&self, line: &'l str) -> &'l str {
        let mut line = trim_trailing_separators(line);
        loop {
            let before = line.len();
            for suffix in &self.config.neighborhood_suffixes {
                if let Some(head) = line.strip_suffix(suffix.as_str()) {
                    if head.is_empty() || head.ends_with(|c: char| c == ',' || c.is_whitespace()) {
                        line = trim_trailing_separators(head);
                    }
                }
            }
            if line.len() == before {
                return line;
            }
        }
    }
}

impl FieldExtractor for AddressExtractor<'_> {
    type Output = Address;

    fn extract(&self, line: &str) -> Extracted<Address> {
        let cleaned = self.strip_trailing_noise(line);
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        if tokens.len() < 2 {
            let result = Extracted::absent(line);
            return if cleaned.is_empty() {
                result
            } else {
                result.with_unmatched(cleaned)
            };
        }

        let house_number = trim_trailing_separators(tokens[tokens.len() - 1]);
        let street_token = trim_trailing_separators(tokens[tokens.len() - 2]);
        let street = if street_token.ends_with('.') {
            expand_abbreviation(street_token, &self.config.abbreviations, self.addresses)
        } else {
            street_token.to_string()
        };

        match self.addresses.get(&street, house_number) {
            Some(address) => {
                let rest = tokens[..tokens.len() - 2].join(" ");
                Extracted::matched(address.clone(), trim_trailing_separators(&rest))
            }
            None => Extracted::absent(line)
                .with_unmatched(format!("{} {}", street_token, house_number)),
        }
    }
}

/// Extract an address from a line.
pub fn extract_address(
    addresses: &AddressTable,
    config: &AddressConfig,
    line: &str,
) -> Extracted<Address> {
    AddressExtractor::new(addresses, config).extract(line)
}

/// Expand an abbreviated street name such as "Bahnhofstr." by replacing its
/// suffix. Longer suffixes are tried first; an expansion naming a known
/// street wins over one that does not.
pub fn expand_abbreviation(
    street: &str,
    abbreviations: &[Abbreviation],
    addresses: &AddressTable,
) -> String {
    let lower = street.to_lowercase();
    let mut matching: Vec<&Abbreviation> = abbreviations
        .iter()
        .filter(|a| lower.ends_with(&a.suffix.to_lowercase()))
        .collect();
    matching.sort_by_key(|a| Reverse(a.suffix.chars().count()));

    let candidates: Vec<String> = matching
        .iter()
        .map(|a| {
            let keep = street.chars().count().saturating_sub(a.suffix.chars().count());
            let stem: String = street.chars().take(keep).collect();
            format!("{}{}", stem, a.expansion)
        })
        .collect();

    candidates
        .iter()
        .find(|c| addresses.has_street(c))
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| street.to_string())
}
