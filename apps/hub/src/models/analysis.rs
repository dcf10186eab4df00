use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u32 = 100;

/// Score and improvement suggestions returned for one uploaded résumé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAnalysisResult")]
pub struct AnalysisResult {
    pub score: u32, // 0 – 100
    pub suggestions: Vec<String>,
}

/// Wire shape before the score range is checked.
#[derive(Deserialize)]
struct RawAnalysisResult {
    score: u32,
    suggestions: Vec<String>,
}

impl TryFrom<RawAnalysisResult> for AnalysisResult {
    type Error = String;

    fn try_from(raw: RawAnalysisResult) -> Result<Self, Self::Error> {
        if raw.score > MAX_SCORE {
            return Err(format!(
                "score {} is outside 0..={MAX_SCORE}",
                raw.score
            ));
        }
        Ok(Self {
            score: raw.score,
            suggestions: raw.suggestions,
        })
    }
}

impl AnalysisResult {
    pub fn new(score: u32, suggestions: Vec<String>) -> Self {
        Self {
            score: score.min(MAX_SCORE),
            suggestions,
        }
    }
}
