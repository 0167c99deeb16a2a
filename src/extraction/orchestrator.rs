// Extraction orchestrator: drives the grid walk front to back and owns the
// per-walk state (context, registry, diagnostic counters). Data flows
// strictly forward: rows → classification → tokenizing → assembly →
// dedup → cross-reference join → emit.

use tracing::{debug, info, warn};

use super::assemble::assemble_item;
use super::crossref::join_cross_references;
use super::emit::emit_report;
use super::registry::{DedupRegistry, DuplicateOrdinal};
use super::types::{ExtractionReport, OutOfBracketItem, RejectedDuplicate, SecondaryRow};
use super::walker::{classify_row, collect_row_items, count_row_tokens, RowKind, WalkContext, WalkState};
use super::ExtractionError;

/// Walk the primary grid and join the operation-method appendix.
///
/// Never aborts on malformed rows: every recoverable problem (orphan items,
/// duplicate ordinals, out-of-bracket ages, unresolved joins) is recovered
/// locally and accounted for in the report. The only hard failure is a grid
/// with no recognizable header/section structure at all.
pub fn extract_scale(
    grid: &[Vec<String>],
    secondary: &[Vec<String>],
) -> Result<ExtractionReport, ExtractionError> {
    let appendix = parse_appendix(secondary);

    let mut ctx = WalkContext::default();
    let mut reached_ready = false;
    let mut registry = DedupRegistry::new();
    let mut dropped_orphans = 0usize;
    let mut rejected_duplicates: Vec<RejectedDuplicate> = Vec::new();
    let mut out_of_bracket: Vec<OutOfBracketItem> = Vec::new();

    for (row_index, cells) in grid.iter().enumerate() {
        match classify_row(cells) {
            RowKind::Header(block) => {
                if block.is_empty() {
                    warn!(row_index, "header row with no parsable age cells");
                }
                ctx = ctx.with_header(block);
            }
            RowKind::Section(domain) => {
                debug!(row_index, domain = domain.as_str(), "section marker");
                ctx = ctx.with_domain(domain);
                // The section row may itself carry item cells; the domain
                // takes effect for this same row.
                process_item_row(
                    &ctx,
                    row_index,
                    cells,
                    &mut registry,
                    &mut dropped_orphans,
                    &mut rejected_duplicates,
                    &mut out_of_bracket,
                );
            }
            RowKind::UnknownSection(title) => {
                warn!(row_index, title = %title, "unrecognized section title; clearing active domain");
                ctx = ctx.without_domain();
                let orphans = count_row_tokens(cells);
                if orphans > 0 {
                    dropped_orphans += orphans;
                    warn!(row_index, count = orphans, "items under unrecognized section dropped");
                }
            }
            RowKind::Items => {
                process_item_row(
                    &ctx,
                    row_index,
                    cells,
                    &mut registry,
                    &mut dropped_orphans,
                    &mut rejected_duplicates,
                    &mut out_of_bracket,
                );
            }
            RowKind::Blank => {}
        }

        if ctx.state() == WalkState::Ready {
            reached_ready = true;
        }
    }

    if !reached_ready {
        return Err(ExtractionError::NoTableStructure);
    }

    let mut items = registry.into_items();
    let unresolved_joins = join_cross_references(&mut items, &appendix);
    if unresolved_joins > 0 {
        warn!(count = unresolved_joins, "items without operation/pass-criterion match");
    }

    let report = emit_report(
        items,
        dropped_orphans,
        unresolved_joins,
        rejected_duplicates,
        out_of_bracket,
    );

    info!(
        items = report.items.len(),
        dropped_orphans = report.summary.dropped_orphans,
        unresolved_joins = report.summary.unresolved_joins,
        rejected_duplicates = report.summary.rejected_duplicates,
        out_of_bracket = report.out_of_bracket.len(),
        "extraction walk complete"
    );

    Ok(report)
}

/// Parse the raw secondary table, skipping rows too short to join against.
fn parse_appendix(secondary: &[Vec<String>]) -> Vec<SecondaryRow> {
    let mut rows = Vec::new();
    for (row_index, cells) in secondary.iter().enumerate() {
        match SecondaryRow::from_cells(cells) {
            Some(row) => rows.push(row),
            None => debug!(row_index, "appendix row without key/procedure/criterion skipped"),
        }
    }
    rows
}

/// Tokenize, place, score, and register every item of one row — or count
/// the row's tokens as orphans when no domain/age context is established.
#[allow(clippy::too_many_arguments)]
fn process_item_row(
    ctx: &WalkContext,
    row_index: usize,
    cells: &[String],
    registry: &mut DedupRegistry,
    dropped_orphans: &mut usize,
    rejected_duplicates: &mut Vec<RejectedDuplicate>,
    out_of_bracket: &mut Vec<OutOfBracketItem>,
) {
    let (Some(domain), Some(header)) = (ctx.domain(), ctx.header()) else {
        let orphans = count_row_tokens(cells);
        if orphans > 0 {
            *dropped_orphans += orphans;
            warn!(
                row_index,
                count = orphans,
                state = ?ctx.state(),
                "item-bearing row before domain/age context established; dropped"
            );
        }
        return;
    };

    let row_items = collect_row_items(header, cells);

    if row_items.label_column_ambiguities > 0 {
        // Known layout quirk, not a guess to hide: surfaced on every occurrence.
        warn!(
            row_index,
            count = row_items.label_column_ambiguities,
            "label-column items attributed to first age of active header block"
        );
    }
    if row_items.unmapped_tokens > 0 {
        *dropped_orphans += row_items.unmapped_tokens;
        warn!(
            row_index,
            count = row_items.unmapped_tokens,
            "items under columns with no age mapping; dropped"
        );
    }

    for (token, age_months) in row_items.placed {
        match assemble_item(token, domain, age_months) {
            Ok(item) => {
                if let Err(DuplicateOrdinal(dup)) = registry.register(item) {
                    warn!(
                        ordinal = dup.rejected.ordinal,
                        kept = %dup.kept.label,
                        rejected = %dup.rejected.label,
                        "duplicate ordinal; first registration kept"
                    );
                    rejected_duplicates.push(dup);
                }
            }
            Err(err) => {
                warn!(
                    ordinal = err.ordinal,
                    age_months = err.age_months,
                    "age outside every scoring bracket; item excluded"
                );
                out_of_bracket.push(err);
            }
        }
    }
}
