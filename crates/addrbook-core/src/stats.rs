//! Data-quality statistics gathered while processing a corpus.

use std::collections::HashMap;

use serde::Serialize;

/// Frequency table of unresolved tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counter {
    counts: HashMap<String, usize>,
}

impl Counter {
    pub fn add(&mut self, token: impl Into<String>) {
        *self.counts.entry(token.into()).or_insert(0) += 1;
    }

    pub fn get(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// The `n` most frequent tokens, ties broken alphabetically.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}

/// Match/no-match tally for one field kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldCounts {
    pub good: usize,
    pub bad: usize,
}

impl FieldCounts {
    pub fn record(&mut self, matched: bool) {
        if matched {
            self.good += 1;
        } else {
            self.bad += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.bad
    }

    /// Share of good matches in percent, rounded half up. Zero when empty.
    pub fn percent(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.good as f64 * 100.0 / total as f64 + 0.5) as u32
    }
}

/// Which field a statistic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    FamilyName,
    GivenName,
    Phone,
    Address,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::FamilyName,
        FieldKind::GivenName,
        FieldKind::Phone,
        FieldKind::Address,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::FamilyName => "family names",
            FieldKind::GivenName => "given names",
            FieldKind::Phone => "phones",
            FieldKind::Address => "addresses",
        }
    }
}

/// Accumulated counts for a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Data and continuation lines seen.
    pub lines: usize,
    /// Records emitted.
    pub records: usize,
    pub family_names: FieldCounts,
    pub given_names: FieldCounts,
    pub phones: FieldCounts,
    pub addresses: FieldCounts,
    pub unknown_family_names: Counter,
    pub unknown_given_names: Counter,
    pub unknown_addresses: Counter,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self, kind: FieldKind) -> &FieldCounts {
        match kind {
            FieldKind::FamilyName => &self.family_names,
            FieldKind::GivenName => &self.given_names,
            FieldKind::Phone => &self.phones,
            FieldKind::Address => &self.addresses,
        }
    }

    /// Unknown-token table for a field; phones have none.
    pub fn unknown(&self, kind: FieldKind) -> Option<&Counter> {
        match kind {
            FieldKind::FamilyName => Some(&self.unknown_family_names),
            FieldKind::GivenName => Some(&self.unknown_given_names),
            FieldKind::Address => Some(&self.unknown_addresses),
            FieldKind::Phone => None,
        }
    }

    /// Emitted records as a percentage of input lines.
    pub fn yield_percent(&self) -> u32 {
        FieldCounts {
            good: self.records,
            bad: self.lines.saturating_sub(self.records),
        }
        .percent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_most_common() {
        let mut counter = Counter::default();
        for token in ["Zzyx", "Abc", "Zzyx", "Qrs", "Abc", "Zzyx"] {
            counter.add(token);
        }
        assert_eq!(counter.most_common(2), vec![("Zzyx", 3), ("Abc", 2)]);
        assert_eq!(counter.get("Qrs"), 1);
        assert_eq!(counter.get("nope"), 0);
        assert_eq!(counter.total(), 6);
        assert_eq!(counter.len(), 3);
    }

    #[test]
    fn test_percent_rounds_half_up() {
        let counts = FieldCounts { good: 1, bad: 1 };
        assert_eq!(counts.percent(), 50);
        let counts = FieldCounts { good: 2, bad: 1 };
        assert_eq!(counts.percent(), 67);
        let counts = FieldCounts { good: 1, bad: 7 };
        assert_eq!(counts.percent(), 13);
        assert_eq!(FieldCounts::default().percent(), 0);
    }

    #[test]
    fn test_yield_percent() {
        let stats = Statistics {
            lines: 4,
            records: 3,
            ..Default::default()
        };
        assert_eq!(stats.yield_percent(), 75);
    }
}
