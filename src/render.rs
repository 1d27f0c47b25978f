use crate::canvas::draw_rect;
use crate::font::LabelFont;
use crate::models::{
    Palette, Rect, CANVAS_SIZE, FOOD_POSITION, LABEL_POSITION, LABEL_TEXT, SNAKE_SEGMENTS,
};
use image::RgbImage;

pub fn new_canvas() -> RgbImage {
    RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Palette::BACKGROUND.to_rgb())
}

pub fn draw_snake(canvas: &mut RgbImage) {
    for &(x, y) in SNAKE_SEGMENTS.iter() {
        draw_rect(
            canvas,
            &Rect::cell(x, y, Palette::SNAKE_FILL, Palette::SNAKE_OUTLINE),
        );
    }
}

pub fn draw_food(canvas: &mut RgbImage) {
    let (x, y) = FOOD_POSITION;
    draw_rect(
        canvas,
        &Rect::cell(x, y, Palette::FOOD_FILL, Palette::FOOD_OUTLINE),
    );
}

/// Draws the whole icon: panel, snake, food, then the title in `font`.
pub fn render_icon(font: &LabelFont) -> RgbImage {
    let mut canvas = new_canvas();
    draw_rect(&mut canvas, &Rect::background_panel());
    draw_snake(&mut canvas);
    draw_food(&mut canvas);
    let (x, y) = LABEL_POSITION;
    font.draw_text(&mut canvas, x, y, LABEL_TEXT, Palette::LABEL);
    canvas
}
