//! Line pipeline: runs the extractor chain over one line and decides
//! whether the result becomes a record.

use tracing::{debug, warn};

use crate::dictionary::Dictionaries;
use crate::extract::{
    AddressExtractor, FamilyNameExtractor, FieldExtractor, GivenNameExtractor, PhoneExtractor,
};
use crate::models::config::{EmissionPolicy, ExtractionConfig, UnknownFamilyPolicy};
use crate::models::{Address, FamilyName, PageContext, Record};
use crate::stats::Statistics;

/// Fields recovered from a single line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    pub family: Option<FamilyName>,
    pub given_name: Option<String>,
    pub phones: Vec<String>,
    pub address: Option<Address>,
    /// Text no extractor consumed (occupations, titles, noise).
    pub rest: String,
}

/// Extractor chain over the loaded dictionaries.
pub struct LineParser<'d> {
    dictionaries: &'d Dictionaries,
    config: ExtractionConfig,
}

impl<'d> LineParser<'d> {
    /// Create a parser with the default (strict) configuration.
    pub fn new(dictionaries: &'d Dictionaries) -> Self {
        Self {
            dictionaries,
            config: ExtractionConfig::default(),
        }
    }

    /// Replace the whole extraction configuration.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set which fields a record requires.
    pub fn with_emission_policy(mut self, policy: EmissionPolicy) -> Self {
        self.config.emission = policy;
        self
    }

    /// Set the handling of family names missing from the dictionary.
    pub fn with_unknown_family_policy(mut self, policy: UnknownFamilyPolicy) -> Self {
        self.config.unknown_family = policy;
        self
    }

    /// Parse a line that starts with a family name.
    pub fn parse_data_line(
        &self,
        ctx: &PageContext,
        line: &str,
        stats: &mut Statistics,
    ) -> ParsedLine {
        let family = FamilyNameExtractor::new(&self.dictionaries.families).extract(line);
        stats
            .family_names
            .record(family.field.as_ref().is_some_and(FamilyName::is_resolved));

        if let Some(token) = &family.unmatched {
            stats.unknown_family_names.add(token.as_str());
            debug!(date = %ctx.date, page = ctx.page_id, "unknown family name {:?}: {}", token, line);
        }

        let surname = match (family.field, self.config.unknown_family) {
            (Some(name), UnknownFamilyPolicy::Absent) if !name.is_resolved() => None,
            (name, _) => name,
        };

        self.parse_fields(ctx, surname, &family.rest, stats)
    }

    /// Parse a continuation line, reusing the family name of the previous
    /// data line. The family-name extractor is not consulted, so the
    /// family-name counters are left alone.
    pub fn parse_continuation_line(
        &self,
        ctx: &PageContext,
        line: &str,
        carried: Option<&FamilyName>,
        stats: &mut Statistics,
    ) -> ParsedLine {
        if carried.is_none() {
            warn!(date = %ctx.date, page = ctx.page_id, "continuation line without family: {}", line);
        }

        self.parse_fields(ctx, carried.cloned(), line, stats)
    }

    fn parse_fields(
        &self,
        ctx: &PageContext,
        family: Option<FamilyName>,
        line: &str,
        stats: &mut Statistics,
    ) -> ParsedLine {
        let given = GivenNameExtractor::new(&self.dictionaries.given_names).extract(line);
        stats.given_names.record(given.is_match());
        if let Some(candidate) = &given.unmatched {
            stats.unknown_given_names.add(candidate.as_str());
            debug!(page = ctx.page_id, "unknown given name {:?}", candidate);
        }

        let phone_extractor = PhoneExtractor::new(&self.config.phone, ctx.volume_year());
        let phones = phone_extractor.extract(&given.rest);
        if phone_extractor.era().is_some() {
            stats.phones.record(phones.is_match());
        }

        let address = AddressExtractor::new(&self.dictionaries.addresses, &self.config.address)
            .extract(&phones.rest);
        stats.addresses.record(address.is_match());
        if let Some(token) = &address.unmatched {
            stats.unknown_addresses.add(token.as_str());
            debug!(page = ctx.page_id, "unknown address {:?}", token);
        }

        ParsedLine {
            family,
            given_name: given.field,
            phones: phones.field.unwrap_or_default(),
            address: address.field,
            rest: address.rest,
        }
    }

    /// Build a record if the parsed line has every field the emission
    /// policy requires.
    pub fn assemble(&self, ctx: &PageContext, parsed: ParsedLine) -> Option<Record> {
        let policy = self.config.emission;
        let family = parsed.family?;

        if policy.require_resolved_surname && !family.is_resolved() {
            return None;
        }
        if policy.require_given_name && parsed.given_name.is_none() {
            return None;
        }
        if policy.require_address && parsed.address.is_none() {
            return None;
        }

        Some(Record {
            surname: family.name,
            surname_id: family.external_id,
            given_name: parsed.given_name,
            date: ctx.date,
            address: parsed.address,
            phones: parsed.phones,
            page_id: ctx.page_id,
            page_label: ctx.page_label.clone(),
        })
    }
}
