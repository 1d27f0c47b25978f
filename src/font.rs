use crate::canvas::{blend_pixel, set_pixel};
use crate::models::Color;
use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::RgbImage;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Advance of the bitmap font: 5 pixels of glyph plus 1 of spacing.
const BITMAP_ADVANCE: i32 = 6;

/// Deep enough for layouts like `/usr/share/fonts/truetype/msttcorefonts/arial.ttf`.
const FONT_SEARCH_DEPTH: usize = 4;

/// Why the preferred font could not be used.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("font {0} not found")]
    NotFound(String),

    #[error("failed to read font {}: {1}", .0.display())]
    Unreadable(PathBuf, #[source] io::Error),

    #[error("{} is not a valid font", .0.display())]
    Invalid(PathBuf),
}

/// The font used for the label: a scalable TrueType face, or the built-in bitmap font.
pub enum LabelFont {
    TrueType { font: FontVec, scale: PxScale },
    Bitmap,
}

impl LabelFont {
    pub fn is_bitmap(&self) -> bool {
        matches!(self, LabelFont::Bitmap)
    }

    /// Draws `text` with its top-left corner at `(x, y)`. Pixels outside the canvas are dropped.
    pub fn draw_text(&self, canvas: &mut RgbImage, x: u32, y: u32, text: &str, color: Color) {
        match self {
            LabelFont::TrueType { font, scale } => {
                draw_truetype(canvas, font, *scale, x as f32, y as f32, text, color)
            }
            LabelFont::Bitmap => draw_bitmap(canvas, x as i32, y as i32, text, color),
        }
    }
}

/// Loads `name` at `size` pixels per em, or falls back to the bitmap font.
pub fn resolve_font(name: &str, size: f32, search_dirs: &[PathBuf]) -> LabelFont {
    match load_truetype(name, size, search_dirs) {
        Ok(font) => font,
        Err(err) => {
            log::debug!("Falling back to the built-in font: {}", err);
            LabelFont::Bitmap
        }
    }
}

pub fn load_truetype(name: &str, size: f32, search_dirs: &[PathBuf]) -> Result<LabelFont, FontError> {
    let path = find_font_file(name, search_dirs).ok_or_else(|| FontError::NotFound(name.to_string()))?;
    let data = fs::read(&path).map_err(|e| FontError::Unreadable(path.clone(), e))?;
    let font = FontVec::try_from_vec(data).map_err(|_| FontError::Invalid(path.clone()))?;

    // Size is given per em, like a point size; PxScale is measured over ascent..descent.
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    let scale = PxScale::from(size * font.height_unscaled() / units_per_em);
    log::debug!("Using font {} at {}px", path.display(), size);
    Ok(LabelFont::TrueType { font, scale })
}

/// Looks for a file called `name` (case-insensitive) under each directory in turn.
pub fn find_font_file(name: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    for dir in search_dirs {
        if !dir.is_dir() {
            continue;
        }
        let found = WalkDir::new(dir)
            .follow_links(true)
            .max_depth(FONT_SEARCH_DEPTH)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .find(|e| e.file_name().to_string_lossy().eq_ignore_ascii_case(name));
        if let Some(entry) = found {
            return Some(entry.into_path());
        }
    }
    None
}

/// Where fonts are looked up: the output directory first, then the usual system locations.
pub fn font_search_dirs(out_dir: &Path) -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    search_dirs_from(
        out_dir,
        std::env::var_os("WINDIR"),
        home,
        std::env::var_os("XDG_DATA_DIRS"),
    )
}

fn search_dirs_from(
    out_dir: &Path,
    windir: Option<OsString>,
    home: Option<OsString>,
    xdg_data_dirs: Option<OsString>,
) -> Vec<PathBuf> {
    let mut dirs = vec![out_dir.to_path_buf()];
    if let Some(windir) = windir {
        dirs.push(PathBuf::from(windir).join("Fonts"));
    }
    for dir in [
        "/Library/Fonts",
        "/System/Library/Fonts",
        "/System/Library/Fonts/Supplemental",
    ] {
        dirs.push(PathBuf::from(dir));
    }

    let data_dirs: Vec<PathBuf> = match xdg_data_dirs.filter(|v| !v.is_empty()) {
        Some(value) => std::env::split_paths(&value).collect(),
        // XDG default when unset or empty.
        None => vec![PathBuf::from("/usr/local/share"), PathBuf::from("/usr/share")],
    };
    for data_dir in data_dirs {
        let fonts = data_dir.join("fonts");
        if !dirs.contains(&fonts) {
            dirs.push(fonts);
        }
    }

    if let Some(home) = home {
        let home = PathBuf::from(home);
        dirs.push(home.join("Library/Fonts"));
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
    }
    dirs
}

fn draw_truetype(
    canvas: &mut RgbImage,
    font: &FontVec,
    scale: PxScale,
    x: f32,
    y: f32,
    text: &str,
    color: Color,
) {
    let scaled = font.as_scaled(scale);
    let mut caret = point(x, y + scaled.ascent());
    let mut previous: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = previous {
            caret.x += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, caret);
        caret.x += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|gx, gy, coverage| {
                blend_pixel(canvas, left + gx as i32, top + gy as i32, color, coverage);
            });
        }
    }
}

fn draw_bitmap(canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Color) {
    for (i, ch) in text.chars().enumerate() {
        let left = x + i as i32 * BITMAP_ADVANCE;
        let Some(rows) = bitmap_glyph(ch) else {
            continue;
        };
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..5 {
                if bits & (0x10 >> col) != 0 {
                    set_pixel(canvas, left + col, y + row as i32, color);
                }
            }
        }
    }
}

/// 5x7 glyphs, one byte per row, low five bits used with the MSB on the left.
/// Lowercase letters reuse the uppercase shapes.
#[rustfmt::skip]
fn bitmap_glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch.to_ascii_uppercase() {
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x1B, 0x11],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        _ => return None,
    };
    Some(rows)
}
