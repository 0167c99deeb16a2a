// Normalizer/emitter: deterministic ordering and the coverage summary.

use std::collections::BTreeMap;

use crate::models::{AssessmentItem, CoverageSummary};

use super::types::{ExtractionReport, OutOfBracketItem, RejectedDuplicate};

/// Sort items by (age ascending, canonical domain order, ordinal ascending)
/// so re-runs on the same input are byte-for-byte identical.
pub fn sort_items(items: &mut [AssessmentItem]) {
    items.sort_by(|a, b| {
        (a.age_months, a.domain, a.ordinal).cmp(&(b.age_months, b.domain, b.ordinal))
    });
}

/// Assemble the final report from the walked items and the walk diagnostics.
pub fn emit_report(
    mut items: Vec<AssessmentItem>,
    dropped_orphans: usize,
    unresolved_joins: usize,
    rejected_duplicates: Vec<RejectedDuplicate>,
    out_of_bracket: Vec<OutOfBracketItem>,
) -> ExtractionReport {
    sort_items(&mut items);

    let mut per_domain_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut per_age_counts: BTreeMap<u32, usize> = BTreeMap::new();
    for item in &items {
        *per_domain_counts.entry(item.domain.as_str().to_string()).or_default() += 1;
        *per_age_counts.entry(item.age_months).or_default() += 1;
    }

    let summary = CoverageSummary {
        per_domain_counts,
        per_age_counts,
        dropped_orphans,
        unresolved_joins,
        rejected_duplicates: rejected_duplicates.len(),
    };

    ExtractionReport {
        items,
        summary,
        rejected_duplicates,
        out_of_bracket,
    }
}
