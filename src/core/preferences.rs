use crate::models::CatalogGift;

/// Split a comma separated free-text answer into lowercase tokens
///
/// `"Hiking, Board games ,"` becomes `["hiking", "board games"]`.
pub fn interest_tokens(text: &str) -> Vec<String> {
    text.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Catalog tags overlapping any of the tokens
///
/// A tag matches when it contains a token or a token contains it, ignoring
/// case. Each tag counts at most once.
pub fn matching_tags<'a>(gift: &'a CatalogGift, tokens: &[String]) -> Vec<&'a str> {
    if tokens.is_empty() {
        return Vec::new();
    }

    gift.tags
        .iter()
        .filter(|tag| {
            let tag = tag.to_lowercase();
            tokens
                .iter()
                .any(|token| tag.contains(token.as_str()) || token.contains(tag.as_str()))
        })
        .map(String::as_str)
        .collect()
}

/// Parse a budget answer by keeping only its digits
///
/// `"$1,500"` reads as 1500. Returns `None` when there are no digits.
pub fn parse_budget(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}
