// Grid walker: row classification and the domain/age context state machine.
// The context is immutable per step and advanced by pure transition
// functions, so every transition is testable on its own; the orchestrator
// owns the loop and the diagnostics.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Domain;

use super::tokenize::{has_item_marker, tokenize_cell};
use super::types::{HeaderBlock, ItemToken};

/// Literal first-cell text of a header row ("item" placeholder above the
/// label column).
pub const HEADER_PLACEHOLDER: &str = "项目";

/// Age header cell, e.g. `9 月龄`.
static AGE_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*月龄").unwrap());

/// Walk state, derived from which context pieces are established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    /// No active domain or age mapping; item rows are orphaned here.
    NoContext,
    /// A section marker has been seen; the age mapping is still absent.
    DomainActive,
    /// Both a domain and a header block are active.
    Ready,
}

/// Active (domain, header block) context, carried between rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkContext {
    domain: Option<Domain>,
    header: Option<HeaderBlock>,
}

impl WalkContext {
    pub fn state(&self) -> WalkState {
        match (self.domain, &self.header) {
            (Some(_), Some(_)) => WalkState::Ready,
            (Some(_), None) => WalkState::DomainActive,
            (None, _) => WalkState::NoContext,
        }
    }

    pub fn domain(&self) -> Option<Domain> {
        self.domain
    }

    pub fn header(&self) -> Option<&HeaderBlock> {
        self.header.as_ref()
    }

    /// A section marker establishes the active domain.
    pub fn with_domain(&self, domain: Domain) -> WalkContext {
        WalkContext {
            domain: Some(domain),
            header: self.header.clone(),
        }
    }

    /// A header row replaces any existing header block.
    pub fn with_header(&self, header: HeaderBlock) -> WalkContext {
        WalkContext {
            domain: self.domain,
            header: Some(header),
        }
    }

    /// An unrecognized section title clears the active domain so nothing
    /// gets silently miscategorized under it.
    pub fn without_domain(&self) -> WalkContext {
        WalkContext {
            domain: None,
            header: self.header.clone(),
        }
    }
}

/// Structural classification of one grid row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    /// First cell equals the `项目` placeholder; a fresh header block
    /// parsed from the remaining cells.
    Header(HeaderBlock),
    /// First cell names one of the five domains. The row may still carry
    /// item cells in its non-first columns.
    Section(Domain),
    /// First cell is non-empty text outside the closed domain set.
    UnknownSection(String),
    /// Candidate item row (first cell empty or itself item-bearing).
    Items,
    /// Nothing but whitespace.
    Blank,
}

pub fn classify_row(cells: &[String]) -> RowKind {
    let first = cells.first().map(|c| c.trim()).unwrap_or("");

    if first == HEADER_PLACEHOLDER {
        return RowKind::Header(parse_header_block(cells));
    }
    if let Some(domain) = Domain::from_section_title(first) {
        return RowKind::Section(domain);
    }
    if !first.is_empty() && !has_item_marker(first) {
        return RowKind::UnknownSection(first.to_string());
    }
    if cells.iter().any(|c| !c.trim().is_empty()) {
        return RowKind::Items;
    }
    RowKind::Blank
}

/// Parse the non-first cells of a header row into a header block. Cells
/// that do not match the `N 月龄` pattern are skipped; the source leaves
/// spacer columns blank.
pub fn parse_header_block(cells: &[String]) -> HeaderBlock {
    let mut block = HeaderBlock::new();
    for (column, cell) in cells.iter().enumerate().skip(1) {
        if let Some(caps) = AGE_HEADER.captures(cell) {
            if let Ok(age) = caps[1].parse::<u32>() {
                block.set(column, age);
            }
        }
    }
    block
}

/// Tokens of one item row, each placed at its column's age.
#[derive(Debug, Default, PartialEq)]
pub struct RowItems {
    pub placed: Vec<(ItemToken, u32)>,
    /// Tokens anchored in the label column, attributed to the first age of
    /// the active header block (known layout quirk; logged by the caller).
    pub label_column_ambiguities: usize,
    /// Tokens under a column the active header block carries no age for.
    /// The engine never invents an age; these are dropped.
    pub unmapped_tokens: usize,
}

/// Place every token of an item row against the header block.
///
/// The first cell is the label column: any items anchored there get the
/// first age of the block (tie-break for a layout quirk where an item sits
/// beside the section title instead of under a dated column).
pub fn collect_row_items(header: &HeaderBlock, cells: &[String]) -> RowItems {
    let mut out = RowItems::default();

    if let Some(first) = cells.first() {
        for token in tokenize_cell(first) {
            match header.first_age() {
                Some(age) => {
                    out.placed.push((token, age));
                    out.label_column_ambiguities += 1;
                }
                None => out.unmapped_tokens += 1,
            }
        }
    }

    for (column, cell) in cells.iter().enumerate().skip(1) {
        for token in tokenize_cell(cell) {
            match header.age_for_column(column) {
                Some(age) => out.placed.push((token, age)),
                None => out.unmapped_tokens += 1,
            }
        }
    }

    out
}

/// Total item tokens in a row, regardless of placement. Used to count
/// orphans when a row is skipped outside `Ready`.
pub fn count_row_tokens(cells: &[String]) -> usize {
    cells.iter().map(|c| tokenize_cell(c).count()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    // --- classify_row ---

    #[test]
    fn header_row_classified() {
        let kind = classify_row(&row(&["项目", "1 月龄", "2 月龄", "3 月龄"]));
        match kind {
            RowKind::Header(block) => {
                assert_eq!(block.age_for_column(1), Some(1));
                assert_eq!(block.age_for_column(3), Some(3));
            }
            other => panic!("expected header, got {other:?}"),
        }
    }

    #[test]
    fn section_row_classified() {
        assert_eq!(
            classify_row(&row(&["大 运 动", "", ""])),
            RowKind::Section(Domain::GrossMotor)
        );
    }

    #[test]
    fn section_row_with_items_still_section() {
        assert_eq!(
            classify_row(&row(&["大运动", "□1 抬肩坐起", "□2 头竖直片刻"])),
            RowKind::Section(Domain::GrossMotor)
        );
    }

    #[test]
    fn unknown_section_classified() {
        assert_eq!(
            classify_row(&row(&["认知能力", "", ""])),
            RowKind::UnknownSection("认知能力".into())
        );
    }

    #[test]
    fn item_rows_classified() {
        assert_eq!(classify_row(&row(&["", "□3 翻身", ""])), RowKind::Items);
        // Label-column anchored item: the first cell is item-bearing, not a title.
        assert_eq!(classify_row(&row(&["□9 独坐自如", "", ""])), RowKind::Items);
    }

    #[test]
    fn blank_row_classified() {
        assert_eq!(classify_row(&row(&["", "  ", ""])), RowKind::Blank);
        assert_eq!(classify_row(&[]), RowKind::Blank);
    }

    // --- parse_header_block ---

    #[test]
    fn header_block_skips_blank_and_label_columns() {
        let block = parse_header_block(&row(&["项目", "15 月龄", "", "18 月龄"]));
        assert_eq!(block.age_for_column(1), Some(15));
        assert_eq!(block.age_for_column(2), None);
        assert_eq!(block.age_for_column(3), Some(18));
    }

    #[test]
    fn header_block_tolerates_spacing_variants() {
        let block = parse_header_block(&row(&["项目", "6月龄", "7  月龄"]));
        assert_eq!(block.age_for_column(1), Some(6));
        assert_eq!(block.age_for_column(2), Some(7));
    }

    // --- context transitions ---

    #[test]
    fn state_progression() {
        let ctx = WalkContext::default();
        assert_eq!(ctx.state(), WalkState::NoContext);

        let ctx = ctx.with_domain(Domain::Language);
        assert_eq!(ctx.state(), WalkState::DomainActive);

        let ctx = ctx.with_header(parse_header_block(&row(&["项目", "1 月龄"])));
        assert_eq!(ctx.state(), WalkState::Ready);
    }

    #[test]
    fn header_alone_is_not_ready() {
        let ctx = WalkContext::default()
            .with_header(parse_header_block(&row(&["项目", "1 月龄"])));
        assert_eq!(ctx.state(), WalkState::NoContext);
        assert_eq!(ctx.with_domain(Domain::Social).state(), WalkState::Ready);
    }

    #[test]
    fn new_header_replaces_old() {
        let ctx = WalkContext::default()
            .with_domain(Domain::GrossMotor)
            .with_header(parse_header_block(&row(&["项目", "1 月龄", "2 月龄"])));
        let ctx = ctx.with_header(parse_header_block(&row(&["项目", "15 月龄", "18 月龄"])));
        assert_eq!(ctx.header().unwrap().age_for_column(1), Some(15));
    }

    #[test]
    fn unknown_section_clears_domain() {
        let ctx = WalkContext::default()
            .with_domain(Domain::Adaptive)
            .with_header(parse_header_block(&row(&["项目", "1 月龄"])));
        let ctx = ctx.without_domain();
        assert_eq!(ctx.state(), WalkState::NoContext);
        assert!(ctx.header().is_some(), "header survives a domain reset");
    }

    // --- collect_row_items ---

    #[test]
    fn tokens_placed_at_column_ages() {
        let header = parse_header_block(&row(&["项目", "1 月龄", "2 月龄"]));
        let items = collect_row_items(&header, &row(&["", "□1 抬肩坐起", "□2 头竖直片刻"]));

        assert_eq!(items.placed.len(), 2);
        assert_eq!(items.placed[0].0.ordinal, 1);
        assert_eq!(items.placed[0].1, 1);
        assert_eq!(items.placed[1].0.ordinal, 2);
        assert_eq!(items.placed[1].1, 2);
        assert_eq!(items.label_column_ambiguities, 0);
        assert_eq!(items.unmapped_tokens, 0);
    }

    #[test]
    fn label_column_item_gets_first_age() {
        let header = parse_header_block(&row(&["项目", "15 月龄", "18 月龄"]));
        let items = collect_row_items(&header, &row(&["□101 独自行走", "", ""]));

        assert_eq!(items.placed.len(), 1);
        assert_eq!(items.placed[0].1, 15);
        assert_eq!(items.label_column_ambiguities, 1);
    }

    #[test]
    fn unmapped_column_token_dropped_not_invented() {
        let header = parse_header_block(&row(&["项目", "1 月龄"]));
        let items = collect_row_items(&header, &row(&["", "□1 抬肩坐起", "□2 头竖直片刻"]));

        assert_eq!(items.placed.len(), 1);
        assert_eq!(items.unmapped_tokens, 1);
    }

    #[test]
    fn token_counting_spans_all_cells() {
        assert_eq!(count_row_tokens(&row(&["□1 a", "□2 b□3 c", ""])), 3);
        assert_eq!(count_row_tokens(&row(&["", "无项目", ""])), 0);
    }
}
