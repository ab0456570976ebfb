//! Pure geometry used by the canvas tools. No state lives here.

mod rect;
pub mod shapes;

pub use rect::PixelRect;
pub use shapes::{arrow_head, regular_polygon, star, triangle, Path, ShapeKind};

use egui::{Pos2, Rect};

/// Axis-aligned bounding box between two drag points, normalized so that
/// `min` is the top-left corner.
pub fn bounding_box(a: Pos2, b: Pos2) -> Rect {
    Rect::from_two_pos(a, b)
}
