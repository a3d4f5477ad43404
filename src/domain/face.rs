use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct FaceRectangle {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceRectangle {
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// One face as returned by the detection service. Fields this crate does not
/// use are kept in `extra` so the artifact is written back verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DetectedFace {
    pub face_token: String,
    pub face_rectangle: FaceRectangle,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Content of `face_tokens.json`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DetectionArtifact {
    pub faces: Vec<DetectedFace>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DetectionArtifact {
    pub fn descriptors(&self) -> Vec<FaceDescriptor> {
        self.faces.iter().enumerate().map(|(i, face)| FaceDescriptor {
            index: i + 1,
            token: face.face_token.clone(),
            rectangle: face.face_rectangle,
        }).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceDescriptor {
    /// 1-based position in detection order.
    pub index: usize,
    pub token: String,
    pub rectangle: FaceRectangle,
}

/// First face, in detection order, whose rectangle contains the point.
pub fn face_at(faces: &[FaceDescriptor], x: i32, y: i32) -> Option<usize> {
    faces.iter().find(|f| f.rectangle.contains(x, y)).map(|f| f.index)
}
