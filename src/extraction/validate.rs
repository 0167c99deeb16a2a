// Post-walk plausibility checks on a finished report. Read-only: findings
// are returned as human-readable warnings for manual review, the report is
// never mutated and no gap is ever papered over with synthesized content.

use std::collections::BTreeSet;

use crate::models::{is_standard_age, Domain};

use super::assemble::score_for_age;
use super::types::ExtractionReport;

/// Below this join-coverage ratio the appendix table is probably the wrong
/// file or a different edition.
const MIN_JOIN_COVERAGE: f64 = 0.50;

/// Validate a report against the published structure of the scale.
pub fn validate_report(report: &ExtractionReport) -> Vec<String> {
    let mut warnings = Vec::new();

    check_ordinal_uniqueness(report, &mut warnings);
    check_ages_on_schedule(report, &mut warnings);
    check_score_consistency(report, &mut warnings);
    check_domain_presence(report, &mut warnings);
    check_join_coverage(report, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(warning_count = warnings.len(), "report validation warnings");
    }

    warnings
}

fn check_ordinal_uniqueness(report: &ExtractionReport, warnings: &mut Vec<String>) {
    let mut seen = BTreeSet::new();
    for item in &report.items {
        if !seen.insert(item.ordinal) {
            warnings.push(format!(
                "Ordinal {} appears more than once in the emitted collection",
                item.ordinal
            ));
        }
    }
}

fn check_ages_on_schedule(report: &ExtractionReport, warnings: &mut Vec<String>) {
    for item in &report.items {
        if !is_standard_age(item.age_months) {
            warnings.push(format!(
                "Item {} sits at {} months, not a standard assessment age",
                item.ordinal, item.age_months
            ));
        }
    }
}

fn check_score_consistency(report: &ExtractionReport, warnings: &mut Vec<String>) {
    for item in &report.items {
        match score_for_age(item.age_months) {
            Some(expected) if item.score == expected => {}
            Some(expected) => warnings.push(format!(
                "Item {} scored {} but its bracket says {}",
                item.ordinal, item.score, expected
            )),
            None => warnings.push(format!(
                "Item {} emitted despite age {} outside every bracket",
                item.ordinal, item.age_months
            )),
        }
    }
}

fn check_domain_presence(report: &ExtractionReport, warnings: &mut Vec<String>) {
    for domain in Domain::ALL {
        let count = report
            .summary
            .per_domain_counts
            .get(domain.as_str())
            .copied()
            .unwrap_or(0);
        if count == 0 {
            warnings.push(format!(
                "Domain '{}' has no items; a whole section was likely missed",
                domain.as_str()
            ));
        }
    }
}

fn check_join_coverage(report: &ExtractionReport, warnings: &mut Vec<String>) {
    if report.items.is_empty() {
        return;
    }
    let unresolved = report.summary.unresolved_joins;
    let ratio = 1.0 - unresolved as f64 / report.items.len() as f64;
    if ratio < MIN_JOIN_COVERAGE {
        warnings.push(format!(
            "Only {:.0}% of items matched an appendix row ({unresolved} unresolved)",
            ratio * 100.0
        ));
    }
}
