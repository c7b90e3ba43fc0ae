//! Header/footer resolution
//!
//! Picks the literal header or footer markup for a page from the document's
//! per-page variant settings. The first-page rule wins over the odd/even rule,
//! which wins over the base content.
//!
//! Footers additionally substitute the `[Page #]`, `[Total Pages]` and
//! `[Current Date]` placeholders. Headers are returned verbatim; the two
//! resolvers intentionally differ here.

use crate::{DocumentMetadata, PageVariantSettings};
use chrono::{Local, NaiveDate};

/// Placeholder replaced with the page number
pub const PAGE_NUMBER_TOKEN: &str = "[Page #]";
/// Placeholder replaced with the total page count
pub const TOTAL_PAGES_TOKEN: &str = "[Total Pages]";
/// Placeholder replaced with the export date
pub const CURRENT_DATE_TOKEN: &str = "[Current Date]";

/// Which band of the page is being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderFooterKind {
    Header,
    Footer,
}

impl HeaderFooterKind {
    /// Variant settings for this band
    pub fn settings(self, metadata: &DocumentMetadata) -> &PageVariantSettings {
        match self {
            HeaderFooterKind::Header => &metadata.header_settings,
            HeaderFooterKind::Footer => &metadata.footer_settings,
        }
    }

    /// Base content for this band
    pub fn base_content(self, metadata: &DocumentMetadata) -> &str {
        match self {
            HeaderFooterKind::Header => &metadata.header_content,
            HeaderFooterKind::Footer => &metadata.footer_content,
        }
    }

    /// Whether this band is shown
    pub fn is_visible(self, metadata: &DocumentMetadata) -> bool {
        match self {
            HeaderFooterKind::Header => metadata.header_visible,
            HeaderFooterKind::Footer => metadata.footer_visible,
        }
    }
}

/// Select the raw markup for a page from variant settings
///
/// `page_number` is 1-based.
pub fn select_variant<'a>(
    settings: &'a PageVariantSettings,
    base: &'a str,
    page_number: u32,
) -> &'a str {
    if settings.different_first_page && page_number == 1 {
        return settings.first_page();
    }
    if settings.different_odd_even {
        return if page_number % 2 == 0 {
            settings.even_page()
        } else {
            settings.odd_page()
        };
    }
    base
}

/// Resolve the header markup for a page
///
/// No placeholder substitution is performed.
pub fn resolve_header(metadata: &DocumentMetadata, page_number: u32, _total_pages: u32) -> String {
    select_variant(&metadata.header_settings, &metadata.header_content, page_number).to_string()
}

/// Resolve the footer markup for a page, substituting placeholders with
/// today's local date
pub fn resolve_footer(metadata: &DocumentMetadata, page_number: u32, total_pages: u32) -> String {
    resolve_footer_on(metadata, page_number, total_pages, Local::now().date_naive())
}

/// Resolve the footer markup for a page with an explicit date
pub fn resolve_footer_on(
    metadata: &DocumentMetadata,
    page_number: u32,
    total_pages: u32,
    date: NaiveDate,
) -> String {
    let content = select_variant(&metadata.footer_settings, &metadata.footer_content, page_number);
    substitute_placeholders(content, page_number, total_pages, date)
}

/// Resolve either band for a page
pub fn resolve(
    kind: HeaderFooterKind,
    metadata: &DocumentMetadata,
    page_number: u32,
    total_pages: u32,
    date: NaiveDate,
) -> String {
    match kind {
        HeaderFooterKind::Header => resolve_header(metadata, page_number, total_pages),
        HeaderFooterKind::Footer => resolve_footer_on(metadata, page_number, total_pages, date),
    }
}

/// Replace footer placeholders
///
/// Tokens are exact, case-sensitive literals; anything else in brackets is
/// left untouched.
pub fn substitute_placeholders(
    content: &str,
    page_number: u32,
    total_pages: u32,
    date: NaiveDate,
) -> String {
    content
        .replace(PAGE_NUMBER_TOKEN, &page_number.to_string())
        .replace(TOTAL_PAGES_TOKEN, &total_pages.to_string())
        .replace(CURRENT_DATE_TOKEN, &format_long_date(date))
}

/// Format a date as "Month D, YYYY"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn metadata() -> DocumentMetadata {
        DocumentMetadata::new("Doc", "Ada")
            .with_header("Base header")
            .with_footer("Base footer")
    }

    #[test]
    fn test_base_content_without_variants() {
        let meta = metadata();
        for page in 1..=4 {
            assert_eq!(resolve_header(&meta, page, 4), "Base header");
            assert_eq!(resolve_footer_on(&meta, page, 4, date()), "Base footer");
        }
    }

    #[test]
    fn test_first_page_wins_over_odd_even() {
        let settings = PageVariantSettings::new()
            .with_first_page("Cover")
            .with_odd_even("Odd", "Even");
        let meta = metadata().with_header_settings(settings);

        assert_eq!(resolve_header(&meta, 1, 3), "Cover");
        assert_eq!(resolve_header(&meta, 2, 3), "Even");
        assert_eq!(resolve_header(&meta, 3, 3), "Odd");
    }

    #[test]
    fn test_unset_variant_content_is_empty() {
        let mut settings = PageVariantSettings::new();
        settings.different_first_page = true;
        settings.different_odd_even = true;
        let meta = metadata().with_footer_settings(settings);

        assert_eq!(resolve_footer_on(&meta, 1, 2, date()), "");
        assert_eq!(resolve_footer_on(&meta, 2, 2, date()), "");
    }

    #[test]
    fn test_first_page_rule_only_applies_to_page_one() {
        let meta = metadata().with_header_settings(PageVariantSettings::new().with_first_page("Cover"));
        assert_eq!(resolve_header(&meta, 1, 2), "Cover");
        assert_eq!(resolve_header(&meta, 2, 2), "Base header");
    }

    #[test]
    fn test_footer_placeholders() {
        let meta = metadata().with_footer("Page [Page #] of [Total Pages]");
        assert_eq!(resolve_footer_on(&meta, 3, 10, date()), "Page 3 of 10");
    }

    #[test]
    fn test_footer_date_placeholder() {
        let meta = metadata().with_footer("Printed [Current Date]");
        assert_eq!(resolve_footer_on(&meta, 1, 1, date()), "Printed March 5, 2024");
    }

    #[test]
    fn test_unknown_tokens_untouched() {
        let meta = metadata().with_footer("[Page #] [page #] [Author] [Total Pages]");
        assert_eq!(resolve_footer_on(&meta, 2, 7, date()), "2 [page #] [Author] 7");
    }

    #[test]
    fn test_header_keeps_placeholders() {
        let meta = metadata().with_header("Page [Page #]");
        assert_eq!(resolve_header(&meta, 4, 9), "Page [Page #]");
    }

    #[test]
    fn test_footer_variant_is_substituted() {
        let settings = PageVariantSettings::new().with_odd_even("Odd [Page #]", "Even [Page #]");
        let meta = metadata().with_footer_settings(settings);
        assert_eq!(resolve_footer_on(&meta, 1, 2, date()), "Odd 1");
        assert_eq!(resolve_footer_on(&meta, 2, 2, date()), "Even 2");
    }

    #[test]
    fn test_resolve_dispatch() {
        let meta = metadata().with_header("[Page #]").with_footer("[Page #]");
        assert_eq!(resolve(HeaderFooterKind::Header, &meta, 2, 2, date()), "[Page #]");
        assert_eq!(resolve(HeaderFooterKind::Footer, &meta, 2, 2, date()), "2");
        assert!(HeaderFooterKind::Footer.is_visible(&meta));
    }

    #[test]
    fn test_long_date_format() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(format_long_date(d), "October 16, 2026");
    }

    proptest! {
        #[test]
        fn prop_odd_even_alternates(page in 1u32..10_000, total in 1u32..10_000) {
            let settings = PageVariantSettings::new().with_odd_even("O", "E");
            let meta = metadata()
                .with_header_settings(settings.clone())
                .with_footer_settings(settings);
            let expected = if page % 2 == 0 { "E" } else { "O" };
            prop_assert_eq!(resolve_header(&meta, page, total), expected);
            prop_assert_eq!(resolve_footer_on(&meta, page, total, date()), expected);
        }
    }
}
