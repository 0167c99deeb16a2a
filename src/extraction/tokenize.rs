// Cell tokenizer: pulls zero or more marker-delimited items out of one
// cell's text. Pure — no walker or registry state is touched here.

use std::sync::LazyLock;

use regex::Regex;

use super::types::ItemToken;

/// Item marker glyph printed before every ordinal in the scale.
pub const ITEM_MARKER: char = '□';

/// `□<ordinal><label up to the next marker or end of text>`.
static ITEM_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"□(\d+)([^□]*)").unwrap());

/// Tokenize one cell. Cells without the marker glyph yield an empty
/// sequence — most cells are structural, not item-bearing. Tokens whose
/// label is whitespace-only after marker stripping are dropped.
pub fn tokenize_cell(text: &str) -> impl Iterator<Item = ItemToken> + '_ {
    ITEM_TOKEN.captures_iter(text).filter_map(|caps| {
        let ordinal: u32 = caps[1].parse().ok()?;
        let raw_label = &caps[2];

        let caregiver_report = raw_label.contains('R');
        let priority = raw_label.contains('*') || raw_label.contains('＊');

        let label: String = raw_label
            .chars()
            .filter(|c| !matches!(c, 'R' | '*' | '＊'))
            .collect::<String>()
            .trim()
            .to_string();
        if label.is_empty() {
            return None;
        }

        Some(ItemToken {
            ordinal,
            label,
            caregiver_report,
            priority,
        })
    })
}

/// Whether a cell carries at least one item marker.
pub fn has_item_marker(text: &str) -> bool {
    text.contains(ITEM_MARKER)
}
