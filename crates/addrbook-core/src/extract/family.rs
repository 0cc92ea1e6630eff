//! Family-name extraction by longest-prefix dictionary match.

use super::{trim_leading_separators, Extracted, FieldExtractor};
use crate::dictionary::FamilyTable;
use crate::models::FamilyName;

/// Family-name field extractor.
pub struct FamilyNameExtractor<'a> {
    families: &'a FamilyTable,
}

impl<'a> FamilyNameExtractor<'a> {
    pub fn new(families: &'a FamilyTable) -> Self {
        Self { families }
    }
}

impl FieldExtractor for FamilyNameExtractor<'_> {
    type Output = FamilyName;

    /// Match the longest word span at the start of the line that is a known
    /// family name. On a miss, the first word is returned as an unresolved
    /// name and reported in `unmatched`.
    fn extract(&self, line: &str) -> Extracted<FamilyName> {
        let line = clean_family_prefix(line);
        let (head, tail) = match line.split_once(',') {
            Some((head, tail)) => (head, Some(tail)),
            None => (line.as_str(), None),
        };

        let words: Vec<&str> = head.split_whitespace().collect();
        let Some(first) = words.first() else {
            return Extracted::absent(trim_leading_separators(&line));
        };

        let longest = self.families.max_word_count().min(words.len());
        for n in (1..=longest).rev() {
            let key = words[..n].join(" ").to_lowercase();
            if let Some(name) = self.families.get(&key) {
                return Extracted::matched(name.clone(), join_rest(&words[n..], tail));
            }
        }

        Extracted::matched(FamilyName::unknown(*first), join_rest(&words[1..], tail))
            .with_unmatched(*first)
    }
}

/// Extract a family name from a line.
pub fn extract_family_name(families: &FamilyTable, line: &str) -> Extracted<FamilyName> {
    FamilyNameExtractor::new(families).extract(line)
}

/// Undo the typesetting quirks around family names: a stray leading comma,
/// hyphens set with spaces ("Meyer - Huber") and the "v." nobiliary prefix.
fn clean_family_prefix(line: &str) -> String {
    let line = line.trim();
    let line = line.strip_prefix(',').unwrap_or(line).trim_start();
    let line = line.replace(" - ", "-");

    match line.strip_prefix("v.") {
        Some(rest) => format!("von {}", rest.trim()),
        None => line,
    }
}

fn join_rest(words: &[&str], tail: Option<&str>) -> String {
    let head = words.join(" ");
    let tail = tail.map(str::trim).unwrap_or_default();

    let rest = match (head.is_empty(), tail.is_empty()) {
        (_, true) => head,
        (true, false) => tail.to_string(),
        (false, false) => format!("{}, {}", head, tail),
    };
    trim_leading_separators(&rest).to_string()
}
