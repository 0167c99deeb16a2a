// Cross-reference joiner: attach operation procedure and pass criterion
// from the appendix table. The appendix labels are transcribed independently
// of the grid and diverge slightly, so exact join keys cannot be assumed;
// the policy is an ordered matcher list, first success wins, kept explicit
// so it stays auditable and extensible.

use crate::models::AssessmentItem;

use super::types::SecondaryRow;

type Matcher = fn(&AssessmentItem, &SecondaryRow) -> bool;

/// Matching tiers, applied in order per item.
const MATCHERS: [(&str, Matcher); 2] = [
    ("ordinal-prefix", ordinal_prefix_matches),
    ("ordinal-and-label", ordinal_and_label_contained),
];

/// Tier 1: the key starts with the ordinal's digits followed immediately by
/// punctuation, e.g. `12．扶站片刻` for ordinal 12. The punctuation
/// requirement keeps ordinal 1 from claiming `12．...`.
fn ordinal_prefix_matches(item: &AssessmentItem, row: &SecondaryRow) -> bool {
    let Some(rest) = row.lookup_key.strip_prefix(&item.ordinal.to_string()) else {
        return false;
    };
    match rest.chars().next() {
        Some(c) => !c.is_alphanumeric() && !c.is_whitespace(),
        None => false,
    }
}

/// Tier 2 fallback: the key contains both the ordinal's decimal string and
/// the item's label as substrings.
fn ordinal_and_label_contained(item: &AssessmentItem, row: &SecondaryRow) -> bool {
    row.lookup_key.contains(&item.ordinal.to_string()) && row.lookup_key.contains(&item.label)
}

/// Fill `operation` / `pass_criterion` on every item that matches an
/// appendix row; items with no match keep both fields empty (never a
/// placeholder sentence). Returns the number of unresolved items.
pub fn join_cross_references(items: &mut [AssessmentItem], table: &[SecondaryRow]) -> usize {
    let mut unresolved = 0;

    for item in items.iter_mut() {
        let hit = MATCHERS.iter().find_map(|(tier, matcher)| {
            table
                .iter()
                .find(|row| matcher(item, row))
                .map(|row| (*tier, row))
        });

        match hit {
            Some((tier, row)) => {
                item.operation = row.operation.clone();
                item.pass_criterion = row.pass_criterion.clone();
                tracing::debug!(ordinal = item.ordinal, tier, "cross-reference matched");
            }
            None => {
                unresolved += 1;
                tracing::debug!(
                    ordinal = item.ordinal,
                    label = %item.label,
                    "no appendix row matched; leaving procedure/criterion empty"
                );
            }
        }
    }

    unresolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Domain;

    fn item(ordinal: u32, label: &str) -> AssessmentItem {
        AssessmentItem {
            ordinal,
            domain: Domain::GrossMotor,
            age_months: 9,
            label: label.into(),
            score: 1.0,
            operation: String::new(),
            pass_criterion: String::new(),
            caregiver_report_eligible: false,
            priority_item: false,
        }
    }

    fn row(key: &str, operation: &str, criterion: &str) -> SecondaryRow {
        SecondaryRow {
            lookup_key: key.into(),
            operation: operation.into(),
            pass_criterion: criterion.into(),
        }
    }

    #[test]
    fn exact_prefix_match_fills_both_fields() {
        let mut items = vec![item(12, "扶站片刻")];
        let table = vec![row("12．扶站片刻", "扶着栏杆让小儿站立", "独自扶站5秒以上")];

        let unresolved = join_cross_references(&mut items, &table);

        assert_eq!(unresolved, 0);
        assert_eq!(items[0].operation, "扶着栏杆让小儿站立");
        assert_eq!(items[0].pass_criterion, "独自扶站5秒以上");
    }

    #[test]
    fn short_ordinal_does_not_claim_longer_key() {
        let mut items = vec![item(1, "抬肩坐起")];
        let table = vec![
            row("12．扶站片刻", "wrong", "wrong"),
            row("1．抬肩坐起", "拉腕坐起", "头部能跟随躯干抬起"),
        ];

        join_cross_references(&mut items, &table);
        assert_eq!(items[0].operation, "拉腕坐起");
    }

    #[test]
    fn prefix_tier_accepts_varied_punctuation() {
        for key in ["5．伸手抓物", "5.伸手抓物", "5、伸手抓物"] {
            let mut items = vec![item(5, "伸手抓物")];
            let table = vec![row(key, "op", "crit")];
            assert_eq!(join_cross_references(&mut items, &table), 0, "key {key}");
            assert_eq!(items[0].operation, "op");
        }
    }

    #[test]
    fn fallback_matches_diverged_transcription() {
        // Appendix key has extra annotation text before the ordinal, so the
        // prefix tier misses; containment of ordinal + label still joins it.
        let mut items = vec![item(62, "懂得简单命令")];
        let table = vec![row("附62、懂得简单命令（R）", "向小儿发出指令", "执行其中一项")];

        let unresolved = join_cross_references(&mut items, &table);
        assert_eq!(unresolved, 0);
        assert_eq!(items[0].operation, "向小儿发出指令");
    }

    #[test]
    fn prefix_tier_wins_over_fallback() {
        let mut items = vec![item(7, "独坐片刻")];
        let table = vec![
            row("注释提到7以及独坐片刻的行", "fallback-op", "fallback-crit"),
            row("7．独坐片刻", "prefix-op", "prefix-crit"),
        ];

        join_cross_references(&mut items, &table);
        assert_eq!(items[0].operation, "prefix-op");
    }

    #[test]
    fn miss_leaves_fields_empty_and_counts() {
        let mut items = vec![item(99, "不存在的项目"), item(12, "扶站片刻")];
        let table = vec![row("12．扶站片刻", "op", "crit")];

        let unresolved = join_cross_references(&mut items, &table);

        assert_eq!(unresolved, 1);
        assert!(items[0].operation.is_empty());
        assert!(items[0].pass_criterion.is_empty());
        assert_eq!(items[1].operation, "op");
    }

    #[test]
    fn bare_ordinal_key_without_punctuation_is_not_a_prefix_hit() {
        let r = row("12扶站片刻", "op", "crit");
        assert!(!ordinal_prefix_matches(&item(12, "扶站片刻"), &r));
        // It still joins through the containment tier.
        let mut items = vec![item(12, "扶站片刻")];
        assert_eq!(join_cross_references(&mut items, &[r]), 0);
    }

    #[test]
    fn empty_table_counts_every_item_unresolved() {
        let mut items = vec![item(1, "a"), item(2, "b")];
        assert_eq!(join_cross_references(&mut items, &[]), 2);
    }
}
