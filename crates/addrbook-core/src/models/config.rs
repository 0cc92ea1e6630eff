//! Configuration structures for the address book pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the addrbook pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddrbookConfig {
    /// Dictionary file locations.
    pub dictionaries: DictionaryConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Corpus input configuration.
    pub corpus: CorpusConfig,
}

/// Dictionary source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Family names, one `name;wikidata_id` per line.
    pub families: PathBuf,

    /// Given names, one `name[,canonical]` per line.
    pub given_names: PathBuf,

    /// Address table with a header row.
    pub addresses: PathBuf,

    /// Field delimiter of the address table.
    pub address_delimiter: char,

    /// Only addresses in this city are loaded.
    pub target_city: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            families: PathBuf::from("data/families.txt"),
            given_names: PathBuf::from("data/givennames.txt"),
            addresses: PathBuf::from("data/addresses.csv"),
            address_delimiter: ',',
            target_city: "Bern".to_string(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Which fields a line must yield before a record is emitted.
    pub emission: EmissionPolicy,

    /// What to do with a family name missing from the dictionary.
    pub unknown_family: UnknownFamilyPolicy,

    /// Phone notation eras.
    pub phone: PhoneConfig,

    /// Address cleanup rules.
    pub address: AddressConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            emission: EmissionPolicy::default(),
            unknown_family: UnknownFamilyPolicy::RawWord,
            phone: PhoneConfig::default(),
            address: AddressConfig::default(),
        }
    }
}

/// Mandatory fields for emitting a record. A surname is always required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionPolicy {
    /// The surname must be found in the family-name dictionary.
    pub require_resolved_surname: bool,

    /// A given name must be resolved.
    pub require_given_name: bool,

    /// An address must be resolved.
    pub require_address: bool,
}

impl EmissionPolicy {
    /// Emit whenever any surname is present.
    pub fn relaxed() -> Self {
        Self {
            require_resolved_surname: false,
            require_given_name: false,
            require_address: false,
        }
    }
}

impl Default for EmissionPolicy {
    fn default() -> Self {
        Self {
            require_resolved_surname: true,
            require_given_name: true,
            require_address: true,
        }
    }
}

/// Handling of family names that are not in the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFamilyPolicy {
    /// Keep the first word of the line as an unresolved surname.
    RawWord,
    /// Treat the surname as absent.
    Absent,
}

/// Inclusive range of publication years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// Phone number notation by publication year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneConfig {
    /// Years printing a bare trailing 2-4 digit number.
    pub trailing_digits: YearRange,

    /// Years printing bracketed five-digit numbers.
    pub bracketed: YearRange,

    /// From this year on, five-digit numbers are grouped as `d dd dd`.
    pub grouping_from_year: i32,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            trailing_digits: YearRange::new(1900, 1917),
            bracketed: YearRange::new(1918, 1945),
            grouping_from_year: 1944,
        }
    }
}

/// A street-name abbreviation expanded by suffix substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abbreviation {
    /// Abbreviated suffix including the trailing period, e.g. "str.".
    pub suffix: String,
    /// Full suffix, e.g. "strasse".
    pub expansion: String,
}

impl Abbreviation {
    pub fn new(suffix: impl Into<String>, expansion: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            expansion: expansion.into(),
        }
    }
}

/// Address cleanup rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressConfig {
    /// Neighbourhood names printed after the address.
    pub neighborhood_suffixes: Vec<String>,

    /// Street abbreviations.
    pub abbreviations: Vec<Abbreviation>,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            neighborhood_suffixes: [
                "Bümpliz",
                "Bethlehem",
                "Kirchenfeld",
                "Länggasse",
                "Lorraine",
                "Mattenhof",
                "Breitenrain",
                "Brunnadern",
                "Wabern",
                "Weissenbühl",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            abbreviations: vec![
                Abbreviation::new("str.", "strasse"),
                Abbreviation::new("w.", "weg"),
                Abbreviation::new("g.", "gasse"),
                Abbreviation::new("pl.", "platz"),
                Abbreviation::new("gäss.", "gässchen"),
            ],
        }
    }
}

/// Corpus input configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Directory holding the proofread page files.
    pub input_dir: PathBuf,

    /// Only process files whose name starts with this year.
    pub year: Option<i32>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("proofread"),
            year: None,
        }
    }
}

impl AddrbookConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range_inclusive() {
        let range = YearRange::new(1900, 1917);
        assert!(range.contains(1900));
        assert!(range.contains(1917));
        assert!(!range.contains(1918));
        assert!(!range.contains(1899));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AddrbookConfig =
            serde_json::from_str(r#"{"corpus": {"year": 1944}}"#).unwrap();
        assert_eq!(config.corpus.year, Some(1944));
        assert_eq!(config.dictionaries.target_city, "Bern");
        assert_eq!(config.extraction.phone.grouping_from_year, 1944);
        assert!(config.extraction.emission.require_address);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AddrbookConfig::default();
        config.extraction.unknown_family = UnknownFamilyPolicy::Absent;
        config.save(&path).unwrap();

        let loaded = AddrbookConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.unknown_family, UnknownFamilyPolicy::Absent);
    }
}
