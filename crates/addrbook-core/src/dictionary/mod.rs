//! Static lookup tables: family names, given names, and street addresses.
//!
//! All tables are keyed by lower-cased strings and never change after
//! loading. A malformed row aborts the load.

pub mod addresses;
pub mod families;
pub mod given_names;

pub use addresses::{load_addresses, AddressTable, AddressTableOptions};
pub use families::{load_families, FamilyTable};
pub use given_names::{load_given_names, GivenNameTable};

use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::error::DictionaryError;
use crate::models::config::DictionaryConfig;

/// Result type for dictionary loading.
pub type Result<T> = std::result::Result<T, DictionaryError>;

/// The three lookup tables used by the extractors.
#[derive(Debug, Clone, Default)]
pub struct Dictionaries {
    pub families: FamilyTable,
    pub given_names: GivenNameTable,
    pub addresses: AddressTable,
}

impl Dictionaries {
    /// Load all tables named in the configuration.
    pub fn load(config: &DictionaryConfig) -> Result<Self> {
        if !config.address_delimiter.is_ascii() {
            return Err(DictionaryError::parse(
                0,
                format!("address delimiter {:?} is not ASCII", config.address_delimiter),
            ));
        }
        let options = AddressTableOptions {
            delimiter: config.address_delimiter as u8,
            target_city: config.target_city.clone(),
        };

        let families = FamilyTable::from_path(&config.families)?;
        let given_names = GivenNameTable::from_path(&config.given_names)?;
        let addresses = AddressTable::from_path(&config.addresses, &options)?;

        info!(
            "Loaded {} family names, {} given names, {} addresses",
            families.len(),
            given_names.len(),
            addresses.len()
        );

        Ok(Self {
            families,
            given_names,
            addresses,
        })
    }
}

/// Collapse whitespace runs to single spaces, the form the extractors look up.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn open_source(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(DictionaryError::Missing(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}
