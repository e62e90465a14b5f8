use serde::{Deserialize, Serialize};

/// Lighthouse performance bands, using the same cut-offs as the PageSpeed UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreCategory {
    Good,
    NeedsImprovement,
    Poor,
}

impl ScoreCategory {
    /// Classify a 0-100 performance score.
    pub fn classify(score: f64) -> Self {
        if score >= 90.0 {
            ScoreCategory::Good
        } else if score >= 50.0 {
            ScoreCategory::NeedsImprovement
        } else {
            ScoreCategory::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCategory::Good => "Good",
            ScoreCategory::NeedsImprovement => "Needs Improvement",
            ScoreCategory::Poor => "Poor",
        }
    }

    /// Sentence written to the "Score Explanation" report column
    pub fn explanation(&self) -> &'static str {
        match self {
            ScoreCategory::Good => {
                "Good: The page performs well and meets most performance best practices."
            }
            ScoreCategory::NeedsImprovement => {
                "Needs Improvement: The page's performance could be improved by optimizing certain aspects."
            }
            ScoreCategory::Poor => {
                "Poor: The page performs poorly and requires significant optimization to improve performance."
            }
        }
    }
}
