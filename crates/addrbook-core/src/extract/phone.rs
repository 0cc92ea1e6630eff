//! Phone number extraction.
//!
//! The address books changed their phone notation over time. Early volumes
//! print a bare 2-4 digit number after the house number; later volumes put
//! five-digit numbers in square brackets, sometimes several per line.

use super::patterns::{BRACKETED_PHONE, TRAILING_PHONE};
use super::{Extracted, FieldExtractor};
use crate::models::config::PhoneConfig;

/// Phone notation used in a given publication year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneEra {
    /// Bare trailing number: "Marktgasse 5 1234".
    TrailingDigits,
    /// Bracketed five-digit numbers: "Marktgasse 5 [12345]".
    Bracketed,
}

/// Notation for a publication year, or `None` if the year has no phones.
pub fn phone_era(config: &PhoneConfig, year: i32) -> Option<PhoneEra> {
    if config.trailing_digits.contains(year) {
        Some(PhoneEra::TrailingDigits)
    } else if config.bracketed.contains(year) {
        Some(PhoneEra::Bracketed)
    } else {
        None
    }
}

/// Strip whitespace and, from the grouping year on, format five-digit
/// numbers as `d dd dd`.
pub fn normalize_phone(config: &PhoneConfig, year: i32, raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if year >= config.grouping_from_year
        && digits.len() == 5
        && digits.chars().all(|c| c.is_ascii_digit())
    {
        format!("{} {} {}", &digits[0..1], &digits[1..3], &digits[3..5])
    } else {
        digits
    }
}

/// Phone field extractor for one publication year.
pub struct PhoneExtractor<'a> {
    config: &'a PhoneConfig,
    year: i32,
}

impl<'a> PhoneExtractor<'a> {
    pub fn new(config: &'a PhoneConfig, year: i32) -> Self {
        Self { config, year }
    }

    pub fn era(&self) -> Option<PhoneEra> {
        phone_era(self.config, self.year)
    }
}

impl FieldExtractor for PhoneExtractor<'_> {
    type Output = Vec<String>;

    fn extract(&self, line: &str) -> Extracted<Vec<String>> {
        match self.era() {
            None => Extracted::absent(line),
            Some(PhoneEra::TrailingDigits) => {
                let Some(caps) = TRAILING_PHONE.captures(line.trim()) else {
                    return Extracted::absent(line);
                };
                let phone = normalize_phone(self.config, self.year, &caps[2]);
                Extracted::matched(vec![phone], caps[1].trim())
            }
            Some(PhoneEra::Bracketed) => {
                let phones: Vec<String> = BRACKETED_PHONE
                    .captures_iter(line)
                    .map(|caps| normalize_phone(self.config, self.year, &caps[1]))
                    .collect();
                if phones.is_empty() {
                    return Extracted::absent(line);
                }

                let rest = BRACKETED_PHONE.replace_all(line, " ");
                let rest = rest.split_whitespace().collect::<Vec<_>>().join(" ");
                Extracted::matched(phones, rest.replace(" ,", ","))
            }
        }
    }
}

/// Extract phone numbers from a line published in `year`.
pub fn extract_phones(config: &PhoneConfig, year: i32, line: &str) -> Extracted<Vec<String>> {
    PhoneExtractor::new(config, year).extract(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_phone_era() {
        let config = PhoneConfig::default();
        assert_eq!(phone_era(&config, 1905), Some(PhoneEra::TrailingDigits));
        assert_eq!(phone_era(&config, 1917), Some(PhoneEra::TrailingDigits));
        assert_eq!(phone_era(&config, 1918), Some(PhoneEra::Bracketed));
        assert_eq!(phone_era(&config, 1945), Some(PhoneEra::Bracketed));
        assert_eq!(phone_era(&config, 1880), None);
        assert_eq!(phone_era(&config, 1946), None);
    }

    #[test]
    fn test_normalize_grouping() {
        let config = PhoneConfig::default();
        assert_eq!(normalize_phone(&config, 1944, "12345"), "1 23 45");
        assert_eq!(normalize_phone(&config, 1944, "2 34 56"), "2 34 56");
        assert_eq!(normalize_phone(&config, 1930, "2 34 56"), "23456");
        assert_eq!(normalize_phone(&config, 1910, "1234"), "1234");
    }

    #[test]
    fn test_normalize_regroups_to_stripped_digits() {
        let config = PhoneConfig::default();
        let normalized = normalize_phone(&config, 1944, "12345");
        assert_eq!(normalized, "1 23 45");
        assert_eq!(normalized.replace(' ', ""), "12345");
        assert_eq!(normalize_phone(&config, 1944, &normalized), normalized);
    }

    #[test]
    fn test_bracketed_multiple() {
        let config = PhoneConfig::default();
        let result = extract_phones(&config, 1944, "Marktgasse 3 [12345] [2 34 56]");
        assert_eq!(result.field, Some(vec!["1 23 45".to_string(), "2 34 56".to_string()]));
        assert_eq!(result.rest, "Marktgasse 3");
    }

    #[test]
    fn test_bracketed_mid_line() {
        let config = PhoneConfig::default();
        let result = extract_phones(&config, 1944, "Marktgasse 3 [12345], Bümpliz");
        assert_eq!(result.rest, "Marktgasse 3, Bümpliz");
    }

    #[test]
    fn test_trailing_digits() {
        let config = PhoneConfig::default();
        let result = extract_phones(&config, 1910, "Marktgasse 5a 1234");
        assert_eq!(result.field, Some(vec!["1234".to_string()]));
        assert_eq!(result.rest, "Marktgasse 5a");

        let result = extract_phones(&config, 1910, "Marktgasse 15");
        assert_eq!(result.field, None);
        assert_eq!(result.rest, "Marktgasse 15");
    }

    #[test]
    fn test_no_phone_outside_eras() {
        let config = PhoneConfig::default();
        let line = "Marktgasse 3 [12345]";
        let result = extract_phones(&config, 1870, line);
        assert_eq!(result.field, None);
        assert_eq!(result.rest, line);
    }
}
