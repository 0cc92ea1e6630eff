//! Data models for address book records and configuration.

pub mod config;
pub mod context;
pub mod record;

pub use config::{AddrbookConfig, EmissionPolicy, UnknownFamilyPolicy};
pub use context::{resolve_publication_date, volume_year, PageContext};
pub use record::{Address, FamilyName, Record};
