use serde::{Deserialize, Serialize};

/// Confidence strictly above this value is reported as a likely match.
pub const HIGH_SIMILARITY_THRESHOLD: f64 = 80.0;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ComparedFace {
    pub number: usize,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ComparisonRecord {
    pub face1: ComparedFace,
    pub face2: ComparedFace,
    pub confidence: f64,
}

impl ComparisonRecord {
    pub fn involves(&self, number: usize) -> bool {
        self.face1.number == number || self.face2.number == number
    }

    /// The face on the other side of the pair, if `number` is part of it.
    pub fn other(&self, number: usize) -> Option<&ComparedFace> {
        if self.face1.number == number {
            Some(&self.face2)
        } else if self.face2.number == number {
            Some(&self.face1)
        } else {
            None
        }
    }

    pub fn is_high_similarity(&self) -> bool {
        self.confidence > HIGH_SIMILARITY_THRESHOLD
    }
}

/// Content of `face_comparison_results.json`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ComparisonResultSet {
    #[serde(default)]
    pub timestamp: String,
    pub comparisons: Vec<ComparisonRecord>,
}

impl ComparisonResultSet {
    pub fn new(timestamp: String) -> Self {
        Self { timestamp, comparisons: vec![] }
    }
}
