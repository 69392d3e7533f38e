use std::path::{Path, PathBuf};
use std::sync::Arc;

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use super::builtin::BuiltinFace;
use crate::error::FontError;

/// Something that can measure and draw a line of text at a given pixel size.
pub trait GlyphFace: Send + Sync {
    fn name(&self) -> &str;

    /// Advance width of `text` in pixels.
    fn text_width(&self, text: &str, size: f32) -> f32;

    /// Draws `text` with its top-left corner at `(x, y)`.
    fn draw(&self, pixmap: &mut Pixmap, text: &str, size: f32, x: f32, y: f32, paint: &Paint);
}

/// Font paths tried when nothing is configured explicitly.
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "arial.ttf",
    "Arial.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Loads the first usable TrueType face among `candidates`.
///
/// Never fails: if none of the files can be read and parsed, the built-in
/// bitmap face is returned.
pub fn load_face(candidates: &[PathBuf]) -> Arc<dyn GlyphFace> {
    for path in candidates {
        match OutlineFace::from_file(path) {
            Ok(face) => {
                log::info!("Using font {}", path.display());
                return Arc::new(face);
            }
            Err(e) => log::debug!("Skipping font {}: {}", path.display(), e),
        }
    }
    log::warn!("No TrueType font available, falling back to the built-in face");
    Arc::new(BuiltinFace)
}

pub fn default_candidates() -> Vec<PathBuf> {
    DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from).collect()
}

/// A TrueType/OpenType face rasterized through its glyph outlines.
pub struct OutlineFace {
    name: String,
    data: Vec<u8>,
}

impl OutlineFace {
    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_bytes(name, data)
    }

    pub fn from_bytes(name: String, data: Vec<u8>) -> Result<Self, FontError> {
        ttf_parser::Face::parse(&data, 0)?;
        Ok(Self { name, data })
    }

    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        // Parsed once already in from_bytes
        ttf_parser::Face::parse(&self.data, 0).ok()
    }
}

fn glyph_of(face: &ttf_parser::Face<'_>, c: char) -> ttf_parser::GlyphId {
    face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0))
}

impl GlyphFace for OutlineFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        let Some(face) = self.face() else {
            return 0.0;
        };
        let scale = size / f32::from(face.units_per_em());
        text.chars()
            .map(|c| f32::from(face.glyph_hor_advance(glyph_of(&face, c)).unwrap_or(0)))
            .sum::<f32>()
            * scale
    }

    fn draw(&self, pixmap: &mut Pixmap, text: &str, size: f32, x: f32, y: f32, paint: &Paint) {
        let Some(face) = self.face() else {
            return;
        };
        let scale = size / f32::from(face.units_per_em());
        let baseline = y + f32::from(face.ascender()) * scale;

        let mut pen_x = x;
        for c in text.chars() {
            let glyph = glyph_of(&face, c);
            let mut outline = OutlinePath(PathBuilder::new());
            if face.outline_glyph(glyph, &mut outline).is_some() {
                if let Some(path) = outline.0.finish() {
                    // font units are y-up
                    let transform = Transform::from_row(scale, 0.0, 0.0, -scale, pen_x, baseline);
                    pixmap.fill_path(&path, paint, FillRule::Winding, transform, None);
                }
            }
            pen_x += f32::from(face.glyph_hor_advance(glyph).unwrap_or(0)) * scale;
        }
    }
}

struct OutlinePath(PathBuilder);

impl ttf_parser::OutlineBuilder for OutlinePath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

#[cfg(test)]
pub(crate) fn fixture_font_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSansMono.ttf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fonts_fall_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arial.ttf");

        assert!(matches!(
            OutlineFace::from_file(&path),
            Err(FontError::Io { .. })
        ));
        let face = load_face(&[path]);
        assert_eq!(face.name(), BuiltinFace.name());
    }

    #[test]
    fn garbage_font_files_are_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();

        assert!(matches!(
            OutlineFace::from_file(file.path()),
            Err(FontError::Parse(_))
        ));
        let face = load_face(&[file.path().to_path_buf()]);
        assert_eq!(face.name(), BuiltinFace.name());
    }

    #[test]
    fn no_candidates_means_builtin() {
        assert_eq!(load_face(&[]).name(), BuiltinFace.name());
    }

    #[test]
    fn first_loadable_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let face = load_face(&[dir.path().join("arial.ttf"), fixture_font_path()]);
        assert_eq!(face.name(), "DejaVuSansMono.ttf");
    }

    #[test]
    fn truetype_width_scales_with_size() {
        let face = OutlineFace::from_file(&fixture_font_path()).unwrap();
        let text = "You are an Extrovert!";

        let small = face.text_width(text, 30.0);
        let large = face.text_width(text, 60.0);

        assert!(small > 0.0);
        assert!((large - 2.0 * small).abs() < 0.01, "{small} vs {large}");
        assert!(face.text_width("You are an", 60.0) < large);
        assert!(large < 790.0);
    }

    #[test]
    fn truetype_draw_inks_the_canvas() {
        let face = OutlineFace::from_file(&fixture_font_path()).unwrap();
        let mut paint = Paint::default();
        paint.set_color(tiny_skia::Color::BLACK);

        let mut pixmap = Pixmap::new(200, 80).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        face.draw(&mut pixmap, " ", 60.0, 10.0, 0.0, &paint);
        assert!(pixmap.pixels().iter().all(|p| p.red() == 255));

        face.draw(&mut pixmap, "Hi", 60.0, 10.0, 0.0, &paint);
        assert!(pixmap.pixels().iter().any(|p| p.red() == 0));
    }
}
