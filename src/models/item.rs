use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Domain;

/// One normalized test item of the scale.
///
/// Created once by the item assembler, mutated exactly once by the
/// cross-reference joiner (filling `operation` / `pass_criterion`), and
/// immutable thereafter. `ordinal` is the globally unique identifier printed
/// next to the item in the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentItem {
    pub ordinal: u32,
    pub domain: Domain,
    pub age_months: u32,
    pub label: String,
    pub score: f64,
    /// Operation procedure from the appendix table; empty when unresolved.
    pub operation: String,
    /// Pass criterion from the appendix table; empty when unresolved.
    pub pass_criterion: String,
    /// Item may be scored from caregiver report (marker `R` in the source).
    pub caregiver_report_eligible: bool,
    /// Priority/attention item (marker `*` in the source).
    pub priority_item: bool,
}

/// Honest accounting of what the walk could and could not resolve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    pub per_domain_counts: BTreeMap<String, usize>,
    pub per_age_counts: BTreeMap<u32, usize>,
    pub dropped_orphans: usize,
    pub unresolved_joins: usize,
    pub rejected_duplicates: usize,
}
