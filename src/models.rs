use image::Rgb;

/// Width and height of the square canvas, in pixels.
pub const CANVAS_SIZE: u32 = 256;

pub const PNG_FILE_NAME: &str = "game_icon.png";
pub const ICO_FILE_NAME: &str = "game_icon.ico";

/// Sizes embedded in the icon bundle. The writer orders entries smallest first.
pub const ICON_SIZES: [u32; 5] = [256, 128, 64, 32, 16];

/// Edge length of a snake segment or food square, measured corner to corner.
pub const CELL_SIZE: u32 = 20;

/// Snake body positions, tail first. Drawn in order.
pub const SNAKE_SEGMENTS: [(u32, u32); 4] = [(80, 100), (100, 100), (120, 100), (140, 100)];
pub const FOOD_POSITION: (u32, u32) = (160, 140);

pub const LABEL_TEXT: &str = "SNAKE";
pub const LABEL_POSITION: (u32, u32) = (40, 200);

pub const PREFERRED_FONT: &str = "arial.ttf";
pub const PREFERRED_FONT_SIZE: f32 = 48.0;

/// An sRGB color written as `#rrggbb` in the artwork.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const fn from_hex(hex: u32) -> Self {
        Color((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.0, self.1, self.2])
    }
}

/// Palette of the artwork.
pub struct Palette;

impl Palette {
    pub const BACKGROUND: Color = Color::from_hex(0x0a0e27);
    pub const PANEL_FILL: Color = Color::from_hex(0x1a1f3a);
    pub const PANEL_OUTLINE: Color = Color::from_hex(0x00ff00);
    pub const SNAKE_FILL: Color = Color::from_hex(0x00ff00);
    pub const SNAKE_OUTLINE: Color = Color::from_hex(0x00dd00);
    pub const FOOD_FILL: Color = Color::from_hex(0xff0000);
    pub const FOOD_OUTLINE: Color = Color::from_hex(0xdd0000);
    pub const LABEL: Color = Color::from_hex(0x00ff00);
}

/// A filled, outlined, axis-aligned rectangle.
///
/// Corners are inclusive: `(x0, y0)`-`(x1, y1)` covers `x1 - x0 + 1` columns.
/// The outline is drawn inward, `outline_width` pixels thick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
    pub fill: Color,
    pub outline: Color,
    pub outline_width: u32,
}

impl Rect {
    /// A `CELL_SIZE` square anchored at its top-left corner.
    pub fn cell(x: u32, y: u32, fill: Color, outline: Color) -> Self {
        Rect {
            x0: x,
            y0: y,
            x1: x + CELL_SIZE,
            y1: y + CELL_SIZE,
            fill,
            outline,
            outline_width: 1,
        }
    }

    pub fn background_panel() -> Self {
        Rect {
            x0: 10,
            y0: 10,
            x1: 246,
            y1: 246,
            fill: Palette::PANEL_FILL,
            outline: Palette::PANEL_OUTLINE,
            outline_width: 3,
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Whether `(x, y)` falls on the outline band. Assumes `contains(x, y)`.
    pub fn on_outline(&self, x: u32, y: u32) -> bool {
        let w = self.outline_width;
        x < self.x0 + w || x + w > self.x1 || y < self.y0 + w || y + w > self.y1
    }
}
