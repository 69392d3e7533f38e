pub mod builtin;
pub mod font;
pub mod gauge;

use std::path::PathBuf;
use std::sync::Arc;

use png::{BitDepth, ColorType, Encoder};
use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};

use crate::error::RenderError;
use crate::quiz::ClassificationResult;

pub use font::GlyphFace;
pub use gauge::{build_gauge, GaugeBand, GaugeSpec};

pub const IMAGE_WIDTH: u32 = 800;
pub const IMAGE_HEIGHT: u32 = 400;
pub const BORDER_WIDTH: f32 = 5.0;

const HEADLINE_SIZE: f32 = 60.0;
const HEADLINE_Y: f32 = 100.0;
const SCORE_SIZE: f32 = 30.0;
const SCORE_Y: f32 = 200.0;

/// A PNG ready to be offered as a download.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RenderedImage {
    pub const FILE_NAME: &'static str = "personality_result.png";
    pub const MIME_TYPE: &'static str = "image/png";
}

/// Turns a classification into its shareable artifacts.
pub struct ResultRenderer {
    face: Arc<dyn GlyphFace>,
}

impl ResultRenderer {
    pub fn new(face: Arc<dyn GlyphFace>) -> Self {
        Self { face }
    }

    /// Uses the first loadable font among `font_paths`, or the built-in face.
    pub fn with_fonts(font_paths: &[PathBuf]) -> Self {
        Self::new(font::load_face(font_paths))
    }

    pub fn font_name(&self) -> &str {
        self.face.name()
    }

    pub fn build_gauge(&self, result: &ClassificationResult) -> GaugeSpec {
        gauge::build_gauge(result)
    }

    pub fn render_image(&self, result: &ClassificationResult) -> Result<RenderedImage, RenderError> {
        let mut pixmap = Pixmap::new(IMAGE_WIDTH, IMAGE_HEIGHT).ok_or(RenderError::Canvas {
            width: IMAGE_WIDTH,
            height: IMAGE_HEIGHT,
        })?;
        pixmap.fill(Color::WHITE);

        let mut ink = Paint::default();
        ink.set_color(Color::BLACK);

        draw_border(&mut pixmap, &ink);
        self.draw_centered(&mut pixmap, &result.headline(), HEADLINE_SIZE, HEADLINE_Y, &ink);
        self.draw_centered(&mut pixmap, &result.score_line(), SCORE_SIZE, SCORE_Y, &ink);

        let bytes = encode_png(&pixmap)?;
        log::debug!(
            "Rendered {} result image ({} bytes, font {})",
            result.category,
            bytes.len(),
            self.face.name()
        );
        Ok(RenderedImage {
            bytes,
            width: IMAGE_WIDTH,
            height: IMAGE_HEIGHT,
        })
    }

    fn draw_centered(&self, pixmap: &mut Pixmap, text: &str, size: f32, y: f32, paint: &Paint) {
        let width = self.face.text_width(text, size);
        let x = (IMAGE_WIDTH as f32 - width) / 2.0;
        self.face.draw(pixmap, text, size, x, y, paint);
    }
}

impl Default for ResultRenderer {
    fn default() -> Self {
        Self::with_fonts(&font::default_candidates())
    }
}

fn draw_border(pixmap: &mut Pixmap, paint: &Paint) {
    let (w, h) = (IMAGE_WIDTH as f32, IMAGE_HEIGHT as f32);
    let edges = [
        Rect::from_xywh(0.0, 0.0, w, BORDER_WIDTH),
        Rect::from_xywh(0.0, h - BORDER_WIDTH, w, BORDER_WIDTH),
        Rect::from_xywh(0.0, 0.0, BORDER_WIDTH, h),
        Rect::from_xywh(w - BORDER_WIDTH, 0.0, BORDER_WIDTH, h),
    ];
    for edge in edges.into_iter().flatten() {
        pixmap.fill_rect(edge, paint, Transform::identity(), None);
    }
}

fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, pixmap.width(), pixmap.height());
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        // every pixel is opaque, so premultiplied data is plain RGBA
        encoder.write_header()?.write_image_data(pixmap.data())?;
    }
    Ok(out)
}
