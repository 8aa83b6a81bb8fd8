//! Backend-independent draw list.
//!
//! Screens describe a frame as an ordered list of commands in logical pixels
//! (origin top-left, y down). Images and rectangles go through the sprite
//! pass in list order; text is painted on top by the UI pass.

/// Axis-aligned rectangle, `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: (f64, f64)) -> bool {
        let (px, py) = point;
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub fn to_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A loaded image, stretched to `dest`. `flip_x` mirrors it horizontally.
    Image {
        texture_key: String,
        dest: Rect,
        flip_x: bool,
    },
    FilledRect {
        rect: Rect,
        color: Color,
    },
    /// Text centered on `center`.
    Text {
        text: String,
        center: (f64, f64),
        size: f32,
        bold: bool,
        color: Color,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    /// Flat fill for the whole frame before any command is drawn.
    pub clear_color: Option<Color>,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(clear_color: Color) -> Self {
        Self {
            clear_color: Some(clear_color),
            commands: Vec::new(),
        }
    }

    pub fn image(&mut self, texture_key: &str, dest: Rect, flip_x: bool) {
        self.commands.push(DrawCommand::Image {
            texture_key: texture_key.to_string(),
            dest,
            flip_x,
        });
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FilledRect { rect, color });
    }

    pub fn text(&mut self, text: &str, center: (f64, f64), size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            size,
            bold: false,
            color,
        });
    }

    pub fn bold_text(&mut self, text: &str, center: (f64, f64), size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            size,
            bold: true,
            color,
        });
    }

    /// Text commands in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains((10.0, 20.0)));
        assert!(r.contains((109.9, 69.9)));
        assert!(!r.contains((110.0, 30.0)));
        assert!(!r.contains((50.0, 70.0)));
        assert!(!r.contains((9.9, 30.0)));
    }

    #[test]
    fn rect_center() {
        assert_eq!(Rect::new(0.0, 0.0, 220.0, 60.0).center(), (110.0, 30.0));
    }

    #[test]
    fn color_to_f32() {
        assert_eq!(Color::WHITE.to_f32(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Color::rgb(255, 0, 0).to_f32()[1], 0.0);
    }

    #[test]
    fn texts_filters_and_keeps_order() {
        let mut list = DrawList::new(Color::BLACK);
        list.text("a", (0.0, 0.0), 12.0, Color::WHITE);
        list.rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        list.bold_text("b", (0.0, 0.0), 12.0, Color::WHITE);
        let texts: Vec<&str> = list
            .texts()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }
}
