//! Given-name extraction.

use super::{trim_leading_separators, Extracted, FieldExtractor};
use crate::dictionary::GivenNameTable;

/// Given-name field extractor.
///
/// The candidate is the text before the first comma. Compound names such
/// as "Hans Peter" are accepted only if every part is a known given name.
pub struct GivenNameExtractor<'a> {
    given_names: &'a GivenNameTable,
}

impl<'a> GivenNameExtractor<'a> {
    pub fn new(given_names: &'a GivenNameTable) -> Self {
        Self { given_names }
    }
}

impl FieldExtractor for GivenNameExtractor<'_> {
    type Output = String;

    fn extract(&self, line: &str) -> Extracted<String> {
        let line = line.trim();
        let (candidate, after) = match line.split_once(',') {
            Some((candidate, after)) => (candidate.trim(), after),
            None => (line, ""),
        };

        if candidate.is_empty() {
            return Extracted::absent(line);
        }

        let all_known = candidate
            .split_whitespace()
            .all(|fragment| self.given_names.contains(fragment));

        if all_known {
            Extracted::matched(candidate.to_string(), trim_leading_separators(after))
        } else {
            Extracted::absent(line).with_unmatched(candidate)
        }
    }
}

/// Extract a given name from a line.
pub fn extract_given_name(given_names: &GivenNameTable, line: &str) -> Extracted<String> {
    GivenNameExtractor::new(given_names).extract(line)
}
