//! Draws the snake game icon and exports it as `game_icon.png` and `game_icon.ico`.

pub mod canvas;
pub mod font;
pub mod models;
pub mod render;
pub mod utils;

use crate::models::{ICON_SIZES, ICO_FILE_NAME, PNG_FILE_NAME, PREFERRED_FONT, PREFERRED_FONT_SIZE};
use std::io::Write;
use std::path::Path;

/// Renders the icon into `out_dir`, writing one confirmation line to `out` per file.
///
/// The preferred font is optional. Any other failure stops the run before the
/// next confirmation is printed.
pub fn run(out_dir: &Path, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let font = font::resolve_font(
        PREFERRED_FONT,
        PREFERRED_FONT_SIZE,
        &font::font_search_dirs(out_dir),
    );
    let canvas = render::render_icon(&font);

    utils::write_png(&canvas, &out_dir.join(PNG_FILE_NAME))?;
    writeln!(out, "✅ {} created successfully!", PNG_FILE_NAME)?;

    utils::write_ico(&canvas, &out_dir.join(ICO_FILE_NAME), &ICON_SIZES)?;
    writeln!(out, "✅ {} created successfully!", ICO_FILE_NAME)?;
    Ok(())
}
