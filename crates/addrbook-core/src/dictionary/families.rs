//! Family-name dictionary.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use super::{collapse_whitespace, open_source, Result};
use crate::error::DictionaryError;
use crate::models::FamilyName;

/// Family names keyed by their lower-cased form.
#[derive(Debug, Clone, Default)]
pub struct FamilyTable {
    entries: HashMap<String, FamilyName>,
    max_word_count: usize,
}

impl FamilyTable {
    /// Load from a `name;wikidata_id` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        open_source(path)
            .and_then(load_families)
            .map_err(|e| e.with_path(path))
    }

    pub fn insert(&mut self, name: &str, external_id: &str) {
        let name = collapse_whitespace(name);
        let key = name.to_lowercase();
        self.max_word_count = self.max_word_count.max(key.split(' ').count());
        self.entries.insert(key, FamilyName::known(name, external_id));
    }

    /// Look up a lower-cased, single-spaced key.
    pub fn get(&self, key: &str) -> Option<&FamilyName> {
        self.entries.get(key)
    }

    /// Word count of the longest key; bounds the extractor's lookahead.
    pub fn max_word_count(&self) -> usize {
        self.max_word_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FamilyName)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Parse a family-name table, one `name;wikidata_id` per line.
pub fn load_families<R: Read>(source: R) -> Result<FamilyTable> {
    let mut table = FamilyTable::default();

    for (idx, line) in BufReader::new(source).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(';').map(str::trim).collect();
        match fields.as_slice() {
            [name, id] if !name.is_empty() && !id.is_empty() => table.insert(name, id),
            _ => {
                return Err(DictionaryError::parse(
                    idx as u64 + 1,
                    format!("expected `name;id`, got {:?}", line),
                ));
            }
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FAMILIES: &str = "\
# Bern family names
Müller;Q1

von Arx;Q2
Arx;Q3
";

    #[test]
    fn test_load_families() {
        let table = load_families(FAMILIES.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("müller"), Some(&FamilyName::known("Müller", "Q1")));
        assert_eq!(table.get("von arx").unwrap().name, "von Arx");
        assert_eq!(table.max_word_count(), 2);
    }

    #[test]
    fn test_keys_collapse_whitespace() {
        let table = load_families("von  Arx;Q2\nde\tQuervain ;Q5\n".as_bytes()).unwrap();
        assert_eq!(table.get("von arx"), Some(&FamilyName::known("von Arx", "Q2")));
        assert_eq!(table.get("de quervain").unwrap().name, "de Quervain");
        assert_eq!(table.max_word_count(), 2);
    }

    #[test]
    fn test_malformed_row_is_fatal() {
        let err = load_families("Müller;Q1\nBrawer\n".as_bytes()).unwrap_err();
        match err {
            DictionaryError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }

        assert!(load_families("a;b;c\n".as_bytes()).is_err());
        assert!(load_families(";Q1\n".as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = FamilyTable::from_path(Path::new("/nonexistent/families.txt")).unwrap_err();
        assert!(matches!(err, DictionaryError::Missing(_)));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("families.txt");
        std::fs::write(&path, "Müller\n").unwrap();

        let err = FamilyTable::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("families.txt:1"));
    }

    #[test]
    fn test_read_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("families.txt");
        std::fs::write(&path, b"M\xfcller;Q1\n").unwrap();

        let err = FamilyTable::from_path(&path).unwrap_err();
        assert!(matches!(err, DictionaryError::Read { .. }));
        assert!(err.to_string().contains("families.txt"));
    }
}
