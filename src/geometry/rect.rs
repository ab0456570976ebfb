use egui::Pos2;

/// An integer rectangle in canvas pixels.
///
/// `min` is inclusive and `max` exclusive, so a rectangle spanned by two
/// identical points is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl PixelRect {
    pub fn from_min_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + width as i32,
            max_y: y + height as i32,
        }
    }

    /// Normalized box between a drag start and the current pointer.
    pub fn from_corners(a: Pos2, b: Pos2) -> Self {
        let (ax, ay) = (a.x.floor() as i32, a.y.floor() as i32);
        let (bx, by) = (b.x.floor() as i32, b.y.floor() as i32);
        Self {
            min_x: ax.min(bx),
            min_y: ay.min(by),
            max_x: ax.max(bx),
            max_y: ay.max(by),
        }
    }

    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn top_left(&self) -> Pos2 {
        Pos2::new(self.min_x as f32, self.min_y as f32)
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        let (x, y) = (pos.x.floor() as i32, pos.y.floor() as i32);
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Same size, new top-left corner.
    pub fn moved_to(&self, top_left: Pos2) -> Self {
        Self::from_min_size(
            top_left.x.floor() as i32,
            top_left.y.floor() as i32,
            self.width(),
            self.height(),
        )
    }

    /// Overlap with a `width`×`height` canvas anchored at the origin.
    pub fn clipped_to(&self, width: u32, height: u32) -> Self {
        Self {
            min_x: self.min_x.clamp(0, width as i32),
            min_y: self.min_y.clamp(0, height as i32),
            max_x: self.max_x.clamp(0, width as i32),
            max_y: self.max_y.clamp(0, height as i32),
        }
    }

    pub fn to_rect(&self) -> egui::Rect {
        egui::Rect::from_min_max(
            self.top_left(),
            Pos2::new(self.max_x as f32, self.max_y as f32),
        )
    }
}
