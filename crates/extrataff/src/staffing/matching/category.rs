use serde::{Deserialize, Serialize};

/// Quality band a scored mission lands in. Scores below the acceptable
/// floor carry no category and stay off the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchCategory {
    Excellent,
    Good,
    Acceptable,
}

impl MatchCategory {
    pub const EXCELLENT_FLOOR: u8 = 90;
    pub const GOOD_FLOOR: u8 = 75;
    pub const ACCEPTABLE_FLOOR: u8 = 60;

    pub fn for_score(score: u8) -> Option<Self> {
        if score >= Self::EXCELLENT_FLOOR {
            Some(MatchCategory::Excellent)
        } else if score >= Self::GOOD_FLOOR {
            Some(MatchCategory::Good)
        } else if score >= Self::ACCEPTABLE_FLOOR {
            Some(MatchCategory::Acceptable)
        } else {
            None
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchCategory::Excellent => "excellent",
            MatchCategory::Good => "good",
            MatchCategory::Acceptable => "acceptable",
        }
    }
}
