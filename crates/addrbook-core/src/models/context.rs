//! Publication context of the page currently being processed.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date and page information set by a directive line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    /// Publication date of the address book.
    pub date: NaiveDate,

    /// Page identifier of the source scan.
    pub page_id: u64,

    /// Printed page label, e.g. "12" or "[11]".
    pub page_label: String,
}

impl PageContext {
    pub fn new(date: NaiveDate, page_id: u64, page_label: impl Into<String>) -> Self {
        Self {
            date,
            page_id,
            page_label: page_label.into(),
        }
    }

    /// Nominal year of the address book volume, used to pick the phone
    /// notation.
    ///
    /// Volumes went to press in December of the preceding year, so a
    /// December date belongs to the next year's volume.
    pub fn volume_year(&self) -> i32 {
        volume_year(self.date)
    }
}

/// Resolve a publication date given either as `YYYY-MM-DD` or as a bare year.
///
/// Address books were printed at the end of the year before their nominal
/// year, so a bare `YYYY` maps to December 15 of `YYYY - 1`.
pub fn resolve_publication_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(year - 1, 12, 15);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Nominal volume year for a publication date.
pub fn volume_year(date: NaiveDate) -> i32 {
    if date.month() == 12 {
        date.year() + 1
    } else {
        date.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_iso_date() {
        assert_eq!(
            resolve_publication_date("1944-03-01"),
            NaiveDate::from_ymd_opt(1944, 3, 1)
        );
    }

    #[test]
    fn test_resolve_bare_year() {
        assert_eq!(
            resolve_publication_date("1920"),
            NaiveDate::from_ymd_opt(1919, 12, 15)
        );
    }

    #[test]
    fn test_resolve_invalid() {
        assert_eq!(resolve_publication_date("1944-13-01"), None);
        assert_eq!(resolve_publication_date("abcd"), None);
        assert_eq!(resolve_publication_date(""), None);
    }

    #[test]
    fn test_volume_year_of_december_date() {
        let ctx = PageContext::new(NaiveDate::from_ymd_opt(1943, 12, 15).unwrap(), 1, "[3]");
        assert_eq!(ctx.volume_year(), 1944);
    }

    #[test]
    fn test_volume_year_of_bare_year() {
        let date = resolve_publication_date("1944").unwrap();
        assert_eq!(volume_year(date), 1944);
    }

    #[test]
    fn test_volume_year_within_year() {
        assert_eq!(volume_year(NaiveDate::from_ymd_opt(1944, 1, 15).unwrap()), 1944);
        assert_eq!(volume_year(NaiveDate::from_ymd_opt(1917, 11, 30).unwrap()), 1917);
    }
}
