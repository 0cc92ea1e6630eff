//! Common regex patterns for address book lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Page directive: "# Date: 1943-12-15 Page: 1234567/[11]"
    pub static ref PAGE_DIRECTIVE: Regex = Regex::new(
        r"^# Date: (\d{4}(?:-\d\d-\d\d)?) Page: (\d+)/([\[\]\d]+)$"
    ).unwrap();

    // Trailing phone number after the house number: "Marktgasse 5a 1234"
    pub static ref TRAILING_PHONE: Regex = Regex::new(
        r"^(.*\d[a-z]?)\s+(\d{2,4})$"
    ).unwrap();

    // Bracketed five-digit phone number: "[2 34 56]"
    pub static ref BRACKETED_PHONE: Regex = Regex::new(
        r"\[\s*((?:\d\s*){5})\]"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_directive() {
        let caps = PAGE_DIRECTIVE
            .captures("# Date: 1943-12-15 Page: 1234567/[11]")
            .unwrap();
        assert_eq!(&caps[1], "1943-12-15");
        assert_eq!(&caps[2], "1234567");
        assert_eq!(&caps[3], "[11]");

        assert!(PAGE_DIRECTIVE.is_match("# Date: 1944 Page: 1/12"));
        assert!(!PAGE_DIRECTIVE.is_match("# Date: 1944-01-01"));
        assert!(!PAGE_DIRECTIVE.is_match("# Page: 1/12"));
    }

    #[test]
    fn test_bracketed_phone() {
        let found: Vec<_> = BRACKETED_PHONE
            .captures_iter("Marktg. 3 [12345] [2 34 56]")
            .map(|c| c[1].to_string())
            .collect();
        assert_eq!(found, vec!["12345", "2 34 56"]);
        assert!(!BRACKETED_PHONE.is_match("[123456]"));
        assert!(!BRACKETED_PHONE.is_match("[1234]"));
    }

    #[test]
    fn test_trailing_phone() {
        let caps = TRAILING_PHONE.captures("Marktgasse 5a 1234").unwrap();
        assert_eq!(&caps[1], "Marktgasse 5a");
        assert_eq!(&caps[2], "1234");
        assert!(!TRAILING_PHONE.is_match("Marktgasse 15"));
        assert!(!TRAILING_PHONE.is_match("Marktgasse 5 12345"));
    }
}
