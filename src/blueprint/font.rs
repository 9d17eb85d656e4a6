//! Typefaces for blueprint labels.
//!
//! Loading never fails: every face falls back to the DejaVu Sans faces
//! bundled under `assets/fonts` when no configured or system font loads.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use tracing::{debug, info};

use crate::config::FontConfig;

pub const REGULAR_SIZE: f32 = 16.0;
pub const BOLD_SIZE: f32 = 18.0;
/// Extra pixels between lines of multi-line text.
pub const LINE_SPACING: i32 = 4;

const REGULAR_CANDIDATES: [&str; 4] = [
    "arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const BOLD_CANDIDATES: [&str; 4] = [
    "arialbd.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

static BUNDLED_REGULAR: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/DejaVuSans.ttf"));
static BUNDLED_BOLD: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/DejaVuSans-Bold.ttf"));

pub struct Face {
    font: FontArc,
    size: f32,
    bundled: bool,
}

impl Face {
    /// First readable TrueType font among `paths`, else the bundled face.
    pub fn load_first(paths: &[PathBuf], size: f32, bold: bool) -> Self {
        for path in paths {
            if let Some(font) = read_font(path) {
                info!("loaded font {} at {}px", path.display(), size);
                return Self {
                    font: FontArc::new(font),
                    size,
                    bundled: false,
                };
            }
        }
        debug!("no font file found, using bundled {}px face", size);
        Self::bundled(size, bold)
    }

    pub fn bundled(size: f32, bold: bool) -> Self {
        let data = if bold { BUNDLED_BOLD } else { BUNDLED_REGULAR };
        // the bytes are checked in at build time and covered by tests
        let font = FontArc::try_from_slice(data).expect("bundled DejaVu font is valid");
        Self {
            font,
            size,
            bundled: true,
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.bundled
    }

    pub fn line_height(&self) -> i32 {
        self.font.as_scaled(PxScale::from(self.size)).height().ceil() as i32
    }

    pub fn draw(&self, img: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        draw_text_mut(img, color, x, y, PxScale::from(self.size), &self.font, text)
    }

    pub fn draw_lines(&self, img: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, lines: &[&str]) {
        let step = self.line_height() + LINE_SPACING;
        for (i, line) in lines.iter().enumerate() {
            self.draw(img, color, x, y + step * i as i32, line);
        }
    }
}

fn read_font(path: &Path) -> Option<FontVec> {
    let data = std::fs::read(path).ok()?;
    match FontVec::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(_) => {
            debug!("ignoring unparsable font file {}", path.display());
            None
        }
    }
}

/// Label faces shared by every blueprint render.
pub struct Fonts {
    pub regular: Face,
    pub bold: Face,
}

impl Fonts {
    pub fn load(cfg: &FontConfig) -> Self {
        let regular_paths: Vec<PathBuf> = cfg
            .regular
            .iter()
            .cloned()
            .chain(REGULAR_CANDIDATES.iter().map(PathBuf::from))
            .collect();
        // Bold falls back to the regular faces before the bundled one.
        let bold_paths: Vec<PathBuf> = cfg
            .bold
            .iter()
            .cloned()
            .chain(BOLD_CANDIDATES.iter().map(PathBuf::from))
            .chain(regular_paths.iter().cloned())
            .collect();

        Self {
            regular: Face::load_first(&regular_paths, REGULAR_SIZE, false),
            bold: Face::load_first(&bold_paths, BOLD_SIZE, true),
        }
    }

    /// The bundled faces only, independent of what is installed.
    pub fn builtin() -> Self {
        Self {
            regular: Face::bundled(REGULAR_SIZE, false),
            bold: Face::bundled(BOLD_SIZE, true),
        }
    }
}
