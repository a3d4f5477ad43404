pub mod face;
pub mod comparison;

pub use face::{face_at, DetectedFace, DetectionArtifact, FaceDescriptor, FaceRectangle};
pub use comparison::{ComparedFace, ComparisonRecord, ComparisonResultSet, HIGH_SIMILARITY_THRESHOLD};
