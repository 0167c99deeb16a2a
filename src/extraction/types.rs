use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{AssessmentItem, CoverageSummary, Domain};

/// Column-index → age-in-months mapping parsed from one header row.
///
/// Valid from the row after it appears until superseded by the next header
/// row. The source tiles several age ranges side by side and repeats the
/// header on each tile, so a single grid carries multiple header blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    ages: BTreeMap<usize, u32>,
}

impl HeaderBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: usize, age_months: u32) {
        self.ages.insert(column, age_months);
    }

    pub fn age_for_column(&self, column: usize) -> Option<u32> {
        self.ages.get(&column).copied()
    }

    /// Age of the lowest-indexed dated column. Used for the label-column
    /// attribution tie-break.
    pub fn first_age(&self) -> Option<u32> {
        self.ages.values().next().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    pub fn observed_ages(&self) -> impl Iterator<Item = u32> + '_ {
        self.ages.values().copied()
    }
}

/// One marker-delimited item parsed out of a cell, before domain/age
/// attribution. Marker characters are already stripped from `label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemToken {
    pub ordinal: u32,
    pub label: String,
    /// Label carried the `R` marker: scorable from caregiver report.
    pub caregiver_report: bool,
    /// Label carried the `*` marker: priority/attention item.
    pub priority: bool,
}

/// One row of the operation-method appendix (表 B.1).
///
/// `lookup_key` is loosely structured, typically `<ordinal><punctuation>
/// <label-fragment>` like `12．扶站片刻`, transcribed independently of the
/// primary grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryRow {
    pub lookup_key: String,
    pub operation: String,
    pub pass_criterion: String,
}

impl SecondaryRow {
    /// Build from a raw table row; rows with fewer than three columns or an
    /// empty key carry nothing to join against and yield `None`.
    pub fn from_cells(cells: &[String]) -> Option<SecondaryRow> {
        if cells.len() < 3 {
            return None;
        }
        let lookup_key = cells[0].trim().to_string();
        if lookup_key.is_empty() {
            return None;
        }
        Some(SecondaryRow {
            lookup_key,
            operation: cells[1].trim().to_string(),
            pass_criterion: cells[2].trim().to_string(),
        })
    }
}

/// A rejected re-registration of an already-seen ordinal, kept whole so the
/// data-quality problem stays inspectable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedDuplicate {
    pub kept: AssessmentItem,
    pub rejected: AssessmentItem,
}

/// An item whose age falls in none of the scoring brackets. Excluded from
/// the output, never emitted with a defaulted score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutOfBracketItem {
    pub ordinal: u32,
    pub domain: Domain,
    pub age_months: u32,
    pub label: String,
}

/// Final output of one extraction walk: the normalized item collection plus
/// an honest accounting of everything that could not be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub items: Vec<AssessmentItem>,
    pub summary: CoverageSummary,
    pub rejected_duplicates: Vec<RejectedDuplicate>,
    pub out_of_bracket: Vec<OutOfBracketItem>,
}
