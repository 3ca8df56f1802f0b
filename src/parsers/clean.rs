//! Normalisation of raw extracted text into typed values.
//!
//! Everything here is pure and never fails: text that does not fit the
//! expected shape comes back as `None`.

use regex::Regex;
use std::sync::LazyLock;

static RATING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]+$").expect("rating pattern is valid"));

static REVIEWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9,]+)\s+Reviews").expect("reviews pattern is valid"));

/// Parse a price, ignoring everything except digits and the decimal point.
///
/// `"₹1,299.00"` becomes `1299.0`; text with no digits or more than one
/// decimal point gives `None`.
pub fn clean_money(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    digits.parse::<f64>().ok()
}

/// Accept a rating only when the whole text is a plain number
pub fn clean_rating(text: &str) -> Option<f64> {
    if RATING.is_match(text) {
        text.parse::<f64>().ok()
    } else {
        None
    }
}

/// Count from the first `<digits> Reviews` run, thousands separators removed
pub fn clean_review_count(text: &str) -> Option<u64> {
    let caps = REVIEWS.captures(text)?;
    caps[1].replace(',', "").parse::<u64>().ok()
}

/// First whitespace-delimited token
pub fn first_token(text: &str) -> Option<String> {
    text.split_whitespace().next().map(str::to_string)
}

/// First keyword, in list order, found case-insensitively inside `name`
pub fn match_keyword(name: &str, keywords: &[String]) -> Option<String> {
    let name = name.to_lowercase();
    keywords
        .iter()
        .find(|kw| name.contains(&kw.to_lowercase()))
        .cloned()
}
