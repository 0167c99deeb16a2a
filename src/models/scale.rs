// Static metadata of the 儿心量表-Ⅱ scale (WS/T 580-2017): the canonical
// age schedule and the development-quotient interpretation table. Nothing
// here is derived from a walked grid; it is the published standard.

use serde::{Deserialize, Serialize};

/// Official scale name.
pub const SCALE_NAME: &str = "0岁～6岁儿童发育行为评估量表（儿心量表-Ⅱ）";

/// Issuing standard identifier.
pub const STANDARD_ID: &str = "WS/T 580—2017";

/// The 28 assessment ages of the standard: monthly through 12 months,
/// quarterly through 36, semi-annually through 84.
pub const STANDARD_AGE_SCHEDULE: [u32; 28] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, // monthly
    15, 18, 21, 24, 27, 30, 33, 36, // quarterly
    42, 48, 54, 60, 66, 72, 78, 84, // semi-annually
];

/// Whether `age_months` is one of the standard assessment ages.
pub fn is_standard_age(age_months: u32) -> bool {
    STANDARD_AGE_SCHEDULE.contains(&age_months)
}

/// Interpretation bands for the development quotient (DQ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DevelopmentLevel {
    /// DQ >= 130
    Excellent,
    /// 110 <= DQ <= 129
    Good,
    /// 80 <= DQ <= 109
    Average,
    /// 70 <= DQ <= 79
    BorderlineLow,
    /// DQ < 70
    Impaired,
}

impl DevelopmentLevel {
    /// Chinese band name as printed in the standard.
    pub fn title(&self) -> &'static str {
        match self {
            DevelopmentLevel::Excellent => "优秀",
            DevelopmentLevel::Good => "良好",
            DevelopmentLevel::Average => "中等",
            DevelopmentLevel::BorderlineLow => "临界偏低",
            DevelopmentLevel::Impaired => "智力发育障碍",
        }
    }
}

/// Classify a development quotient into its interpretation band.
pub fn classify_development_quotient(dq: u32) -> DevelopmentLevel {
    match dq {
        130.. => DevelopmentLevel::Excellent,
        110..=129 => DevelopmentLevel::Good,
        80..=109 => DevelopmentLevel::Average,
        70..=79 => DevelopmentLevel::BorderlineLow,
        _ => DevelopmentLevel::Impaired,
    }
}
