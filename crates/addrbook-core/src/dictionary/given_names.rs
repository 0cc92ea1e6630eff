//! Given-name dictionary.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use super::{collapse_whitespace, open_source, Result};
use crate::error::DictionaryError;

/// Given names keyed by their lower-cased form.
#[derive(Debug, Clone, Default)]
pub struct GivenNameTable {
    entries: HashMap<String, String>,
}

impl GivenNameTable {
    /// Load from a `name[,canonical]` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        open_source(path)
            .and_then(load_given_names)
            .map_err(|e| e.with_path(path))
    }

    pub fn insert(&mut self, name: &str, canonical: &str) {
        self.entries
            .insert(collapse_whitespace(name).to_lowercase(), canonical.to_string());
    }

    /// Canonical form of a given name, matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&collapse_whitespace(name).to_lowercase())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a given-name table, one `name,canonical` (or bare `name`) per line.
pub fn load_given_names<R: Read>(source: R) -> Result<GivenNameTable> {
    let mut table = GivenNameTable::default();

    for (idx, line) in BufReader::new(source).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match fields.as_slice() {
            [name] if !name.is_empty() => table.insert(name, name),
            [name, canonical] if !name.is_empty() && !canonical.is_empty() => {
                table.insert(name, canonical)
            }
            _ => {
                return Err(DictionaryError::parse(
                    idx as u64 + 1,
                    format!("expected `name,canonical`, got {:?}", line),
                ));
            }
        }
    }

    Ok(table)
}
