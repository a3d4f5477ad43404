//! Click-driven face comparison overlay.
//!
//! [`Annotator`] owns the original pixels and a snapshot of the faces and
//! comparisons. Each pointer press inside a face produces a freshly rendered
//! [`Frame`]; the windowing layer only has to show it.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::{
    config::{get_artifact_path, COMPARISON_FILE, DETECTION_FILE},
    detector::load_detection,
    domain::{face_at, ComparisonRecord, ComparisonResultSet, FaceDescriptor},
    tools::{file_tools::read_json_artifact, image_tools::{draw_face_box, draw_text}, log::{log_info, log_warn, LogServiceType}},
    Error, Result,
};

pub mod palette;

const LABEL_OFFSET: i32 = 10;
const READOUT_X: i32 = 10;
const READOUT_FIRST_BASELINE: i32 = 30;
const READOUT_LINE_HEIGHT: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Overview,
    Selected(usize),
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceHighlight {
    pub number: usize,
    pub color: Rgb<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub number: usize,
    pub confidence: f64,
    pub color: Rgb<u8>,
    pub baseline: i32,
}

impl Readout {
    pub fn text(&self) -> String {
        format!("Face {}: {:.1}%", self.number, self.confidence)
    }
}

/// A rendered view plus what was drawn on top of the base image.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbImage,
    pub highlights: Vec<FaceHighlight>,
    pub readouts: Vec<Readout>,
}

#[derive(Debug, Clone)]
pub enum RenderCommand {
    Redraw(Frame),
    Unchanged,
    Close,
}

pub struct Annotator {
    base: RgbImage,
    faces: Vec<FaceDescriptor>,
    comparisons: Vec<ComparisonRecord>,
    state: ViewState,
}

impl Annotator {
    pub fn new(base: RgbImage, faces: Vec<FaceDescriptor>, comparisons: Vec<ComparisonRecord>) -> Self {
        Self { base, faces, comparisons, state: ViewState::Overview }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn faces(&self) -> &[FaceDescriptor] {
        &self.faces
    }

    pub fn overview(&self) -> Frame {
        render_overview(&self.base, &self.faces)
    }

    /// Primary pointer press at image coordinates `(x, y)`.
    pub fn handle_pointer_event(&mut self, x: i32, y: i32) -> RenderCommand {
        if self.state == ViewState::Closed {
            return RenderCommand::Unchanged;
        }
        match face_at(&self.faces, x, y) {
            Some(number) => {
                self.state = ViewState::Selected(number);
                RenderCommand::Redraw(render_selection(&self.base, &self.faces, &self.comparisons, number))
            }
            None => RenderCommand::Unchanged,
        }
    }

    pub fn handle_cancel(&mut self) -> RenderCommand {
        if self.state == ViewState::Closed {
            return RenderCommand::Unchanged;
        }
        self.state = ViewState::Closed;
        RenderCommand::Close
    }
}

pub fn render_overview(base: &RgbImage, faces: &[FaceDescriptor]) -> Frame {
    let mut image = base.clone();
    for face in faces {
        draw_face_box(&mut image, &face.rectangle, palette::OVERVIEW);
        draw_label(&mut image, face);
    }
    Frame {
        image,
        highlights: faces.iter().map(|f| FaceHighlight { number: f.index, color: palette::OVERVIEW }).collect(),
        readouts: vec![],
    }
}

pub fn render_selection(base: &RgbImage, faces: &[FaceDescriptor], comparisons: &[ComparisonRecord], selected: usize) -> Frame {
    let mut image = base.clone();
    let (highlights, readouts) = draw_selection(&mut image, faces, comparisons, selected);
    Frame { image, highlights, readouts }
}

/// Draws the selection of face `selected` onto `frame`. Comparisons whose other face is
/// not in `faces` are skipped.
pub fn draw_selection(frame: &mut RgbImage, faces: &[FaceDescriptor], comparisons: &[ComparisonRecord], selected: usize) -> (Vec<FaceHighlight>, Vec<Readout>) {
    for face in faces {
        draw_face_box(frame, &face.rectangle, palette::NEUTRAL);
        draw_label(frame, face);
    }

    let mut highlights = vec![];
    if let Ok(face) = resolve(faces, selected) {
        draw_face_box(frame, &face.rectangle, palette::SELECTED);
        highlights.push(FaceHighlight { number: selected, color: palette::SELECTED });
    }

    let mut readouts = vec![];
    for comparison in comparisons {
        let Some(other) = comparison.other(selected) else { continue };
        let Ok(other_face) = resolve(faces, other.number) else { continue };

        let color = palette::confidence_color(comparison.confidence);
        draw_face_box(frame, &other_face.rectangle, color);
        highlights.push(FaceHighlight { number: other.number, color });

        let readout = Readout {
            number: other.number,
            confidence: comparison.confidence,
            color,
            baseline: READOUT_FIRST_BASELINE + readouts.len() as i32 * READOUT_LINE_HEIGHT,
        };
        draw_text(frame, READOUT_X, readout.baseline, &readout.text(), color);
        readouts.push(readout);
    }
    (highlights, readouts)
}

fn resolve(faces: &[FaceDescriptor], number: usize) -> Result<&FaceDescriptor> {
    number.checked_sub(1)
        .and_then(|i| faces.get(i))
        .ok_or(Error::StaleReference { number, faces: faces.len() })
}

fn draw_label(image: &mut RgbImage, face: &FaceDescriptor) {
    draw_text(image, face.rectangle.left, face.rectangle.top - LABEL_OFFSET, &format!("Face {}", face.index), palette::LABEL);
}

/// Loads the faces and comparisons the viewer works on. A missing comparison
/// artifact only means nothing was compared yet.
pub async fn load_view_inputs(dir: &Path) -> Result<(Vec<FaceDescriptor>, Vec<ComparisonRecord>)> {
    let detection = load_detection(&get_artifact_path(dir, DETECTION_FILE)).await?;
    let comparison_path = get_artifact_path(dir, COMPARISON_FILE);
    let comparisons = match read_json_artifact::<ComparisonResultSet>(&comparison_path).await? {
        Some(results) => results.comparisons,
        None => {
            log_warn(LogServiceType::Viewer, format!("No comparison results at {:?}", comparison_path));
            vec![]
        }
    };
    let faces = detection.descriptors();
    log_info(LogServiceType::Viewer, format!("Loaded {} faces and {} comparisons", faces.len(), comparisons.len()));
    Ok((faces, comparisons))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ComparedFace, FaceRectangle};

    fn face(index: usize, left: i32, top: i32) -> FaceDescriptor {
        FaceDescriptor { index, token: format!("t{index}"), rectangle: FaceRectangle { left, top, width: 40, height: 40 } }
    }

    fn record(a: usize, b: usize, confidence: f64) -> ComparisonRecord {
        ComparisonRecord {
            face1: ComparedFace { number: a, token: format!("t{a}") },
            face2: ComparedFace { number: b, token: format!("t{b}") },
            confidence,
        }
    }

    fn three_faces() -> Annotator {
        let base = RgbImage::new(400, 200);
        let faces = vec![face(1, 20, 60), face(2, 120, 60), face(3, 220, 60)];
        let comparisons = vec![record(1, 2, 95.0), record(1, 3, 40.0), record(2, 3, 10.0)];
        Annotator::new(base, faces, comparisons)
    }

    #[test]
    fn overview_draws_every_face_in_highlight_color() {
        let annotator = three_faces();
        let frame = annotator.overview();
        assert_eq!(annotator.state(), ViewState::Overview);
        assert_eq!(frame.highlights.len(), 3);
        assert_eq!(*frame.image.get_pixel(20, 60), palette::OVERVIEW);
        assert_eq!(*frame.image.get_pixel(260, 100), palette::OVERVIEW);
        assert!(frame.readouts.is_empty());
    }

    #[test]
    fn clicking_face_one_shows_its_two_comparisons() {
        let mut annotator = three_faces();
        let RenderCommand::Redraw(frame) = annotator.handle_pointer_event(25, 65) else { panic!("expected a redraw") };
        assert_eq!(annotator.state(), ViewState::Selected(1));

        let shown: Vec<(usize, String)> = frame.readouts.iter().map(|r| (r.number, r.text())).collect();
        assert_eq!(shown, vec![(2, "Face 2: 95.0%".to_string()), (3, "Face 3: 40.0%".to_string())]);
        assert_eq!(frame.readouts[0].baseline, 30);
        assert_eq!(frame.readouts[1].baseline, 50);

        assert_eq!(*frame.image.get_pixel(20, 60), palette::SELECTED);
        assert_eq!(*frame.image.get_pixel(120, 60), palette::ALERT);
        assert_eq!(*frame.image.get_pixel(220, 60), palette::confidence_color(40.0));
        assert_ne!(palette::confidence_color(40.0), palette::ALERT);
        assert_eq!(frame.readouts[1].color, Rgb([102, 153, 0]));
    }

    #[test]
    fn selecting_second_face_resolves_both_sides() {
        let mut annotator = three_faces();
        let RenderCommand::Redraw(frame) = annotator.handle_pointer_event(160, 100) else { panic!("expected a redraw") };
        let others: Vec<usize> = frame.readouts.iter().map(|r| r.number).collect();
        assert_eq!(others, vec![1, 3]);
        assert_eq!(*frame.image.get_pixel(20, 60), palette::ALERT);
    }

    #[test]
    fn click_outside_every_face_changes_nothing() {
        let mut annotator = three_faces();
        assert!(matches!(annotator.handle_pointer_event(25, 65), RenderCommand::Redraw(_)));
        assert!(matches!(annotator.handle_pointer_event(19, 65), RenderCommand::Unchanged));
        assert!(matches!(annotator.handle_pointer_event(390, 190), RenderCommand::Unchanged));
        assert_eq!(annotator.state(), ViewState::Selected(1));
    }

    #[test]
    fn each_click_starts_from_the_original_pixels() {
        let mut annotator = three_faces();
        annotator.handle_pointer_event(25, 65);
        let RenderCommand::Redraw(frame) = annotator.handle_pointer_event(225, 65) else { panic!("expected a redraw") };
        // face 1 is now a plain neutral box, not the previous blue selection
        assert_eq!(*frame.image.get_pixel(20, 60), palette::confidence_color(40.0));
        assert_eq!(*frame.image.get_pixel(21, 61), palette::confidence_color(40.0));
        assert_eq!(*frame.image.get_pixel(120, 60), palette::confidence_color(10.0));
        assert_eq!(frame.readouts.len(), 2);
    }

    #[test]
    fn stale_references_are_skipped() {
        let base = RgbImage::new(300, 120);
        let faces = vec![face(1, 10, 40), face(2, 110, 40), face(3, 210, 40)];
        let comparisons = vec![record(1, 5, 99.0), record(0, 1, 50.0), record(1, 2, 60.0)];
        let mut annotator = Annotator::new(base, faces, comparisons);

        let RenderCommand::Redraw(frame) = annotator.handle_pointer_event(10, 40) else { panic!("expected a redraw") };
        assert_eq!(frame.readouts.len(), 1);
        assert_eq!(frame.readouts[0].number, 2);
        assert_eq!(frame.readouts[0].baseline, 30);
    }

    #[test]
    fn cancel_is_terminal() {
        let mut annotator = three_faces();
        assert!(matches!(annotator.handle_cancel(), RenderCommand::Close));
        assert_eq!(annotator.state(), ViewState::Closed);
        assert!(matches!(annotator.handle_pointer_event(25, 65), RenderCommand::Unchanged));
        assert!(matches!(annotator.handle_cancel(), RenderCommand::Unchanged));
    }

    #[test]
    fn readouts_follow_stored_order() {
        let base = RgbImage::new(300, 120);
        let faces = vec![face(1, 10, 40), face(2, 110, 40), face(3, 210, 40)];
        let comparisons = vec![record(1, 3, 12.0), record(1, 2, 88.0)];
        let frame = render_selection(&base, &faces, &comparisons, 1);
        let order: Vec<usize> = frame.readouts.iter().map(|r| r.number).collect();
        assert_eq!(order, vec![3, 2]);
    }

    #[tokio::test]
    async fn view_inputs_tolerate_missing_comparisons() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(DETECTION_FILE), r#"{"faces": [
            {"face_token": "a", "face_rectangle": {"left": 1, "top": 2, "width": 3, "height": 4}}
        ]}"#).await.unwrap();
        let (faces, comparisons) = load_view_inputs(dir.path()).await.unwrap();
        assert_eq!(faces.len(), 1);
        assert!(comparisons.is_empty());
    }

    #[tokio::test]
    async fn view_inputs_require_detection() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_view_inputs(dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::ArtifactNotFound(_)));
    }
}
