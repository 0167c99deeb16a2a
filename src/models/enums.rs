use serde::{Deserialize, Serialize};

use super::ModelError;

/// The five developmental domains of the scale, in canonical order.
///
/// Derived `Ord` follows declaration order, which is the fixed sort order
/// used when emitting the final item collection. Serialized names match the
/// original dataset files (`motor`, `fineMotor`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Domain {
    #[serde(rename = "motor")]
    GrossMotor,
    #[serde(rename = "fineMotor")]
    FineMotor,
    #[serde(rename = "language")]
    Language,
    #[serde(rename = "adaptive")]
    Adaptive,
    #[serde(rename = "social")]
    Social,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::GrossMotor,
        Domain::FineMotor,
        Domain::Language,
        Domain::Adaptive,
        Domain::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::GrossMotor => "motor",
            Domain::FineMotor => "fineMotor",
            Domain::Language => "language",
            Domain::Adaptive => "adaptive",
            Domain::Social => "social",
        }
    }

    /// Chinese section title as printed in the scale.
    pub fn title(&self) -> &'static str {
        match self {
            Domain::GrossMotor => "大运动",
            Domain::FineMotor => "精细动作",
            Domain::Language => "语言",
            Domain::Adaptive => "适应能力",
            Domain::Social => "社会行为",
        }
    }

    /// Match a section-title cell against the five domain titles.
    ///
    /// The source document pads titles with irregular spacing ("大 运 动",
    /// "语    言", full-width U+3000 included), so all whitespace is collapsed
    /// before comparison. Returns `None` for anything outside the closed set.
    pub fn from_section_title(text: &str) -> Option<Domain> {
        let collapsed: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        Domain::ALL.into_iter().find(|d| d.title() == collapsed)
    }
}

impl std::str::FromStr for Domain {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ModelError::InvalidEnum {
                field: "Domain".into(),
                value: s.into(),
            })
    }
}
