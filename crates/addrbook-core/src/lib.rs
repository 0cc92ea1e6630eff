//! Core library for extracting resident records from the Bern address books.
//!
//! This crate provides:
//! - Dictionary loading (family names, given names, geocoded addresses)
//! - Field extractors for family name, given name, phone, and address
//! - A line pipeline that assembles records under a configurable policy
//! - A corpus driver that streams records from proofread page files
//!
//! ```no_run
//! use addrbook_core::{AddrbookConfig, Corpus, Dictionaries, LineParser};
//!
//! # fn main() -> addrbook_core::Result<()> {
//! let config = AddrbookConfig::default();
//! let dictionaries = Dictionaries::load(&config.dictionaries)?;
//! let parser = LineParser::new(&dictionaries).with_config(config.extraction.clone());
//!
//! let mut records = Corpus::from_dir(&config.corpus.input_dir, Some(1944))?.records(parser);
//! for record in records.by_ref() {
//!     let record = record?;
//!     println!("{} {:?}", record.surname, record.given_name);
//! }
//! let stats = records.into_statistics();
//! println!("family names known: {}%", stats.family_names.percent());
//! # Ok(())
//! # }
//! ```

pub mod corpus;
pub mod dictionary;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod stats;

pub use corpus::{classify_line, parse_directive, Corpus, LineKind, RecordAssembler, RecordStream};
pub use dictionary::{AddressTable, Dictionaries, FamilyTable, GivenNameTable};
pub use error::{AddrbookError, CorpusError, DictionaryError, Result};
pub use extract::{Extracted, FieldExtractor};
pub use models::{
    AddrbookConfig, Address, EmissionPolicy, FamilyName, PageContext, Record, UnknownFamilyPolicy,
};
pub use pipeline::{LineParser, ParsedLine};
pub use stats::{Counter, FieldCounts, FieldKind, Statistics};
