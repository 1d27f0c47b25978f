use crate::models::{Color, Rect};
use image::{Rgb, RgbImage};

/// Fills `rect` on the canvas, outline band included.
pub fn draw_rect(canvas: &mut RgbImage, rect: &Rect) {
    let x_end = rect.x1.min(canvas.width().saturating_sub(1));
    let y_end = rect.y1.min(canvas.height().saturating_sub(1));
    for y in rect.y0..=y_end {
        for x in rect.x0..=x_end {
            let color = if rect.on_outline(x, y) {
                rect.outline
            } else {
                rect.fill
            };
            canvas.put_pixel(x, y, color.to_rgb());
        }
    }
}

/// Sets a pixel, ignoring coordinates outside the canvas.
pub fn set_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: Color) {
    blend_pixel(canvas, x, y, color, 1.0);
}

/// Blends `color` over the existing pixel with the given coverage in `0.0..=1.0`.
/// Out-of-bounds coordinates are clipped.
pub fn blend_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let Rgb(dst) = *canvas.get_pixel(x, y);
    let src = [color.0, color.1, color.2];
    let mut out = [0u8; 3];
    for i in 0..3 {
        let mixed = src[i] as f32 * alpha + dst[i] as f32 * (1.0 - alpha);
        out[i] = mixed.round() as u8;
    }
    canvas.put_pixel(x, y, Rgb(out));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Palette;

    #[test]
    fn rect_outline_and_fill() {
        let mut canvas = RgbImage::from_pixel(32, 32, Rgb([0, 0, 0]));
        let rect = Rect::cell(2, 2, Palette::SNAKE_FILL, Palette::SNAKE_OUTLINE);
        draw_rect(&mut canvas, &rect);
        assert_eq!(*canvas.get_pixel(2, 2), Palette::SNAKE_OUTLINE.to_rgb());
        assert_eq!(*canvas.get_pixel(22, 10), Palette::SNAKE_OUTLINE.to_rgb());
        assert_eq!(*canvas.get_pixel(3, 3), Palette::SNAKE_FILL.to_rgb());
        assert_eq!(*canvas.get_pixel(23, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn rect_is_clipped_to_canvas() {
        let mut canvas = RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]));
        let rect = Rect::cell(4, 4, Palette::FOOD_FILL, Palette::FOOD_OUTLINE);
        draw_rect(&mut canvas, &rect);
        assert_eq!(*canvas.get_pixel(7, 7), Palette::FOOD_FILL.to_rgb());
    }

    #[test]
    fn blending_mixes_and_clips() {
        let mut canvas = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        blend_pixel(&mut canvas, 1, 1, Color(200, 100, 0), 0.5);
        assert_eq!(*canvas.get_pixel(1, 1), Rgb([100, 50, 0]));
        set_pixel(&mut canvas, -1, 2, Color(255, 255, 255));
        set_pixel(&mut canvas, 4, 2, Color(255, 255, 255));
        assert!(canvas.pixels().all(|p| p[0] <= 100));
    }
}
