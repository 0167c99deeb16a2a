// Item assembler: (token, domain, age) → candidate AssessmentItem, with
// the fixed per-bracket score. An age outside every bracket is an error for
// that item, never a defaulted score.

use crate::models::{AssessmentItem, Domain};

use super::types::{ItemToken, OutOfBracketItem};

/// Fixed, non-overlapping scoring brackets: (min age, max age, per-item score).
pub const SCORE_BRACKETS: [(u32, u32, f64); 3] =
    [(1, 12, 1.0), (15, 36, 3.0), (42, 84, 6.0)];

/// Per-item score for an age, or `None` when the age falls in no bracket.
pub fn score_for_age(age_months: u32) -> Option<f64> {
    SCORE_BRACKETS
        .iter()
        .find(|(min, max, _)| (*min..=*max).contains(&age_months))
        .map(|(_, _, score)| *score)
}

/// Build an item candidate from a placed token and the active context.
///
/// `operation` / `pass_criterion` start empty; the cross-reference joiner
/// fills them later, exactly once.
pub fn assemble_item(
    token: ItemToken,
    domain: Domain,
    age_months: u32,
) -> Result<AssessmentItem, OutOfBracketItem> {
    let Some(score) = score_for_age(age_months) else {
        return Err(OutOfBracketItem {
            ordinal: token.ordinal,
            domain,
            age_months,
            label: token.label,
        });
    };

    Ok(AssessmentItem {
        ordinal: token.ordinal,
        domain,
        age_months,
        label: token.label,
        score,
        operation: String::new(),
        pass_criterion: String::new(),
        caregiver_report_eligible: token.caregiver_report,
        priority_item: token.priority,
    })
}
