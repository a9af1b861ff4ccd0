use std::sync::LazyLock;

use regex::Regex;

use crate::models::ExampleProduct;

/// `1. `, `2. ` ... list marker candidates; `90. ` in `Air Max 90. ` matches too
static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\.\s+").expect("valid list marker pattern"));

/// Trailing `(~$150)` price annotation
static PRICE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*~?\s*([^()]*?)\s*\)$").expect("valid price pattern"));

/// Split a theme's example-products text into individual products
///
/// Accepts the numbered form `"1. Spa voucher (~$200). 2. Wine tour (~$180)."`
/// and the comma separated form `"Spa voucher (~$200), Wine tour (~$180)"`.
/// Commas inside parentheses never split an entry.
pub fn parse_example_products(text: &str) -> Vec<ExampleProduct> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let segments = split_numbered(text).unwrap_or_else(|| split_top_level_commas(text));

    segments.into_iter().filter_map(parse_product).collect()
}

/// Split on list markers that continue the sequence opened at the start of
/// the text, so numbers inside product names stay put
fn split_numbered(text: &str) -> Option<Vec<&str>> {
    let mut markers = NUMBERED_MARKER.captures_iter(text);
    let first = markers.next()?;
    let opening = first.get(0)?;
    if opening.start() != 0 {
        return None;
    }

    let mut expected = first[1].parse::<u32>().ok()?.saturating_add(1);
    let mut segments = Vec::new();
    let mut start = opening.end();

    for caps in markers {
        let Some(marker) = caps.get(0) else { continue };
        let in_sequence = caps[1].parse::<u32>().is_ok_and(|n| n == expected);
        if in_sequence && text[..marker.start()].ends_with(char::is_whitespace) {
            segments.push(&text[start..marker.start()]);
            start = marker.end();
            expected = expected.saturating_add(1);
        }
    }
    segments.push(&text[start..]);

    Some(segments)
}

fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                segments.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&text[start..]);

    segments
}

fn parse_product(segment: &str) -> Option<ExampleProduct> {
    let segment = segment.trim().trim_end_matches(['.', ';']).trim();
    if segment.is_empty() {
        return None;
    }

    if let Some(caps) = PRICE_SUFFIX.captures(segment) {
        let name = segment[..caps.get(0).map_or(segment.len(), |m| m.start())].trim();
        let price = caps.get(1).map(|m| m.as_str().trim()).filter(|p| !p.is_empty());
        if !name.is_empty() {
            return Some(ExampleProduct {
                name: name.to_string(),
                price: price.map(str::to_string),
            });
        }
    }

    Some(ExampleProduct {
        name: segment.to_string(),
        price: None,
    })
}
