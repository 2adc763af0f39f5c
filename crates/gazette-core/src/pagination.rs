//! Listing pagination.
//!
//! Page numbers are one-based. A page token that is not a positive number
//! falls back to the first page; a number past the end of the listing,
//! however large, is clamped to the last page rather than rejected.

use std::num::IntErrorKind;

use serde::Serialize;

/// Default number of posts on a listing page.
pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// One page of results with its position in the full listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn empty(page_size: u64) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size,
            total_items: 0,
            total_pages: 0,
        }
    }
}

/// Parse a raw page token, falling back to page 1 for anything that is
/// not a positive integer. A numeral too large for `u64` saturates, so
/// downstream clamping treats it like any other page past the end.
pub fn parse_page_token(token: Option<&str>) -> u64 {
    match token.map(|raw| raw.trim().parse::<u64>()) {
        Some(Ok(page)) if page > 0 => page,
        Some(Err(e)) if matches!(e.kind(), IntErrorKind::PosOverflow) => u64::MAX,
        _ => 1,
    }
}

/// Clamp a requested page into `1..=total_pages`.
///
/// An empty listing still reports page 1.
pub fn clamp_page(requested: u64, total_pages: u64) -> u64 {
    if total_pages == 0 {
        1
    } else {
        requested.min(total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_numeric_token_falls_back_to_first_page() {
        assert_eq!(parse_page_token(Some("abc")), 1);
        assert_eq!(parse_page_token(Some("")), 1);
        assert_eq!(parse_page_token(Some("-3")), 1);
        assert_eq!(parse_page_token(Some("1.5")), 1);
        assert_eq!(parse_page_token(None), 1);
    }

    #[test]
    fn test_zero_falls_back_to_first_page() {
        assert_eq!(parse_page_token(Some("0")), 1);
    }

    #[test]
    fn test_numeric_token_parses() {
        assert_eq!(parse_page_token(Some("2")), 2);
        assert_eq!(parse_page_token(Some(" 7 ")), 7);
    }

    #[test]
    fn test_overflowing_numeric_token_clamps_to_last_page() {
        let token = "18446744073709551616";
        assert_eq!(parse_page_token(Some(token)), u64::MAX);
        assert_eq!(clamp_page(parse_page_token(Some(token)), 2), 2);
    }

    #[test]
    fn test_out_of_range_page_clamps_to_last() {
        assert_eq!(clamp_page(9999, 2), 2);
        assert_eq!(clamp_page(2, 2), 2);
        assert_eq!(clamp_page(1, 2), 1);
    }

    #[test]
    fn test_empty_listing_stays_on_page_one() {
        assert_eq!(clamp_page(5, 0), 1);
    }
}
