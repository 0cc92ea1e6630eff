//! Street address table with coordinates.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::{open_source, Result};
use crate::error::DictionaryError;
use crate::models::Address;

/// Fractional digits kept for latitude and longitude.
pub const COORDINATE_SCALE: u32 = 6;

/// Options for reading an address table.
#[derive(Debug, Clone)]
pub struct AddressTableOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Rows from other cities are skipped.
    pub target_city: String,
}

impl Default for AddressTableOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            target_city: "Bern".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AddressRow {
    street: String,
    housenumber: String,
    postcode: String,
    city: String,
    lat: String,
    lon: String,
}

/// Addresses keyed by lower-cased (street, house number).
#[derive(Debug, Clone, Default)]
pub struct AddressTable {
    entries: HashMap<(String, String), Address>,
    streets: HashSet<String>,
}

impl AddressTable {
    /// Load from a delimited file with a header row.
    pub fn from_path(path: &Path, options: &AddressTableOptions) -> Result<Self> {
        open_source(path)
            .and_then(|source| load_addresses(source, options))
            .map_err(|e| e.with_path(path))
    }

    pub fn insert(&mut self, address: Address) {
        let street = address.street.to_lowercase();
        let number = address.house_number.to_lowercase();
        self.streets.insert(street.clone());
        self.entries.insert((street, number), address);
    }

    /// Exact, case-insensitive lookup.
    pub fn get(&self, street: &str, house_number: &str) -> Option<&Address> {
        self.entries
            .get(&(street.to_lowercase(), house_number.to_lowercase()))
    }

    /// Whether any address exists on this street.
    pub fn has_street(&self, street: &str) -> bool {
        self.streets.contains(&street.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse an address table with columns
/// `street, housenumber, postcode, city, lat, lon`.
pub fn load_addresses<R: Read>(source: R, options: &AddressTableOptions) -> Result<AddressTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = reader.headers()?.clone();

    let mut table = AddressTable::default();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: AddressRow = record.deserialize(Some(&headers))?;

        if !row.city.eq_ignore_ascii_case(&options.target_city) {
            skipped += 1;
            continue;
        }
        if row.street.is_empty() || row.housenumber.is_empty() {
            return Err(DictionaryError::parse(line, "empty street or house number"));
        }

        let latitude = parse_coordinate(&row.lat, line)?;
        let longitude = parse_coordinate(&row.lon, line)?;

        table.insert(Address {
            street: row.street,
            house_number: row.housenumber,
            postcode: row.postcode,
            city: row.city,
            latitude,
            longitude,
        });
    }

    debug!(
        "Loaded {} addresses in {}, skipped {} from other cities",
        table.len(),
        options.target_city,
        skipped
    );

    Ok(table)
}

fn parse_coordinate(value: &str, line: u64) -> Result<Decimal> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| DictionaryError::parse(line, format!("invalid coordinate {:?}", value)))?;

    Decimal::from_f64(parsed)
        .map(|d| d.round_dp(COORDINATE_SCALE))
        .ok_or_else(|| DictionaryError::parse(line, format!("coordinate out of range {:?}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    const ADDRESSES: &str = "\
street,housenumber,postcode,city,lat,lon
Bahnhofstrasse,5,3011,Bern,46.9480123456,7.4398765432
Bahnhofstrasse,5a,3011,Bern,46.948,7.44
Bahnhofstrasse,5,8001,Zürich,47.37,8.54
";

    #[test]
    fn test_load_addresses_filters_city() {
        let table = load_addresses(ADDRESSES.as_bytes(), &AddressTableOptions::default()).unwrap();
        assert_eq!(table.len(), 2);

        let address = table.get("bahnhofstrasse", "5").unwrap();
        assert_eq!(address.city, "Bern");
        assert_eq!(address.postcode, "3011");
        assert!(table.get("Bahnhofstrasse", "5A").is_some());
        assert!(table.has_street("BAHNHOFSTRASSE"));
    }

    #[test]
    fn test_coordinates_rounded() {
        let table = load_addresses(ADDRESSES.as_bytes(), &AddressTableOptions::default()).unwrap();
        let address = table.get("Bahnhofstrasse", "5").unwrap();
        assert_eq!(address.latitude, Decimal::from_str("46.948012").unwrap());
        assert_eq!(address.longitude, Decimal::from_str("7.439877").unwrap());
    }

    #[test]
    fn test_semicolon_delimiter() {
        let options = AddressTableOptions {
            delimiter: b';',
            ..Default::default()
        };
        let data = "street;housenumber;postcode;city;lat;lon\nMarktgasse;1;3011;Bern;46.9;7.4\n";
        let table = load_addresses(data.as_bytes(), &options).unwrap();
        assert!(table.get("marktgasse", "1").is_some());
    }

    #[test]
    fn test_bad_coordinate_is_fatal() {
        let data = "street,housenumber,postcode,city,lat,lon\nMarktgasse,1,3011,Bern,north,7.4\n";
        let err = load_addresses(data.as_bytes(), &AddressTableOptions::default()).unwrap_err();
        match err {
            DictionaryError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let data = "street,housenumber,city\nMarktgasse,1,Bern\n";
        assert!(load_addresses(data.as_bytes(), &AddressTableOptions::default()).is_err());
    }

    #[test]
    fn test_table_error_names_file_and_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("addresses.csv");
        std::fs::write(&path, "street,housenumber,city,lat,lon\nMarktgasse,1,Bern,46.9,7.4\n").unwrap();

        let err = AddressTable::from_path(&path, &AddressTableOptions::default()).unwrap_err();
        match &err {
            DictionaryError::Parse {
                source_name, line, ..
            } => {
                assert!(source_name.ends_with("addresses.csv"));
                assert_eq!(*line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        let message = err.to_string();
        assert!(message.contains("addresses.csv:2"), "{message}");
        assert!(message.contains("postcode"), "{message}");
    }
}
