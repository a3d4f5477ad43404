use std::process::ExitCode;

use clap::Parser;
use eframe::egui;
use image::RgbImage;

use face_compare::{
    annotator::{load_view_inputs, Annotator, Frame, RenderCommand},
    config::{get_artifact_dir, ViewerArgs},
    tools::{image_tools::open_rgb_image, log::{init_logging, log_error, log_info, LogServiceType}},
    Error, Result,
};

const WINDOW_TITLE: &str = "Labeled Faces";

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(LogServiceType::Viewer, format!("Error: {}", e));
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<()> {
    let args = ViewerArgs::parse();
    let dir = get_artifact_dir(args.dir);
    let base = open_rgb_image(&args.image)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let (faces, comparisons) = runtime.block_on(load_view_inputs(&dir))?;
    drop(runtime);

    let size = [base.width() as f32, base.height() as f32];
    let annotator = Annotator::new(base, faces, comparisons);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_title(WINDOW_TITLE).with_inner_size(size),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(FaceViewerApp::new(annotator)))),
    ).map_err(|e| Error::Viewer(e.to_string()))
}

struct FaceViewerApp {
    annotator: Annotator,
    frame: Frame,
    texture: Option<egui::TextureHandle>,
    status: String,
}

impl FaceViewerApp {
    fn new(annotator: Annotator) -> Self {
        let frame = annotator.overview();
        let status = format!("{} faces - click a face to compare, Esc to quit", annotator.faces().len());
        Self { annotator, frame, texture: None, status }
    }

    fn apply(&mut self, ctx: &egui::Context, command: RenderCommand) {
        match command {
            RenderCommand::Redraw(frame) => {
                self.status = if frame.readouts.is_empty() {
                    "No comparison results for this face".to_string()
                } else {
                    frame.readouts.iter().map(|r| r.text()).collect::<Vec<_>>().join("   ")
                };
                self.frame = frame;
                self.texture = None;
                ctx.request_repaint();
            }
            RenderCommand::Close => {
                log_info(LogServiceType::Viewer, "Closing viewer".to_string());
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            RenderCommand::Unchanged => {}
        }
    }
}

fn frame_texture(ctx: &egui::Context, image: &RgbImage) -> egui::TextureHandle {
    let size = [image.width() as usize, image.height() as usize];
    let color_image = egui::ColorImage::from_rgb(size, image.as_raw());
    ctx.load_texture("frame", color_image, Default::default())
}

/// Maps a press to image pixels. Presses outside the visible part of the image are ignored.
fn press_to_pixel(pos: egui::Pos2, image_rect: egui::Rect, visible_rect: egui::Rect) -> Option<(i32, i32)> {
    if !visible_rect.contains(pos) {
        return None;
    }
    let local = pos - image_rect.min;
    Some((local.x.floor() as i32, local.y.floor() as i32))
}

impl eframe::App for FaceViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            let command = self.annotator.handle_cancel();
            self.apply(ctx, command);
            return;
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status);
        });

        let mut press = None;
        egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            if self.texture.is_none() {
                self.texture = Some(frame_texture(ctx, &self.frame.image));
            }
            let Some((texture_id, size)) = self.texture.as_ref().map(|t| (t.id(), t.size_vec2())) else { return };

            let response = egui::ScrollArea::both().show(ui, |ui| ui.image((texture_id, size))).inner;
            let pressed_at = ctx.input(|i| if i.pointer.primary_pressed() { i.pointer.interact_pos() } else { None });
            press = pressed_at.and_then(|pos| press_to_pixel(pos, response.rect, response.interact_rect));
        });

        if let Some((x, y)) = press {
            let command = self.annotator.handle_pointer_event(x, y);
            self.apply(ctx, command);
        }
    }
}
