use std::f32::consts::{FRAC_PI_2, PI, TAU};

use egui::{Pos2, Vec2, pos2, vec2};

/// Largest arrow head, in pixels.
pub const MAX_ARROW_HEAD: f32 = 30.0;

/// Inner star radius as a fraction of the outer one.
pub const STAR_INNER_RATIO: f32 = 0.4;

/// Shapes that are stamped from an anchor point to the current pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Rectangle,
    RoundedRectangle,
    Ellipse,
    Triangle,
    Pentagon,
    Hexagon,
    Star,
    Arrow,
}

/// A polyline to be stroked with the current pen.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub points: Vec<Pos2>,
    pub closed: bool,
}

impl Path {
    pub fn open(points: Vec<Pos2>) -> Self {
        Self { points, closed: false }
    }

    pub fn closed(points: Vec<Pos2>) -> Self {
        Self { points, closed: true }
    }
}

impl ShapeKind {
    /// Outline paths for the shape spanned by `anchor` → `current`.
    ///
    /// Shared by the live preview and the final stamp, so both draw the
    /// exact same pixels.
    pub fn outline(self, anchor: Pos2, current: Pos2, corner_radius: f32) -> Vec<Path> {
        match self {
            Self::Line => vec![Path::open(vec![anchor, current])],
            Self::Rectangle => {
                let rect = super::bounding_box(anchor, current);
                vec![Path::closed(vec![
                    rect.left_top(),
                    rect.right_top(),
                    rect.right_bottom(),
                    rect.left_bottom(),
                ])]
            }
            Self::RoundedRectangle => {
                vec![Path::closed(rounded_rectangle(anchor, current, corner_radius))]
            }
            Self::Ellipse => vec![Path::closed(ellipse(anchor, current))],
            Self::Triangle => vec![Path::closed(triangle(anchor, current).to_vec())],
            Self::Pentagon => vec![Path::closed(regular_polygon(anchor, current, 5))],
            Self::Hexagon => vec![Path::closed(regular_polygon(anchor, current, 6))],
            Self::Star => vec![Path::closed(star(anchor, current))],
            Self::Arrow => vec![
                Path::open(vec![anchor, current]),
                Path::closed(arrow_head(anchor, current).to_vec()),
            ],
        }
    }
}

fn center_and_radius(anchor: Pos2, current: Pos2) -> (Pos2, f32) {
    let delta = current - anchor;
    let radius = delta.x.abs().max(delta.y.abs()) / 2.0;
    (anchor.lerp(current, 0.5), radius)
}

/// Apex above the middle of the horizontal drag, base along the far edge.
pub fn triangle(anchor: Pos2, current: Pos2) -> [Pos2; 3] {
    let delta = current - anchor;
    [
        pos2(anchor.x + delta.x / 2.0, anchor.y),
        pos2(anchor.x, anchor.y + delta.y),
        pos2(anchor.x + delta.x, anchor.y + delta.y),
    ]
}

/// Regular `sides`-gon centered between the drag points.
///
/// Pentagons start pointing straight up; other polygons start on the
/// positive x axis.
pub fn regular_polygon(anchor: Pos2, current: Pos2, sides: usize) -> Vec<Pos2> {
    let (center, radius) = center_and_radius(anchor, current);
    let start = if sides == 5 { -FRAC_PI_2 } else { 0.0 };
    (0..sides)
        .map(|i| {
            let angle = i as f32 * TAU / sides as f32 + start;
            center + radius * Vec2::angled(angle)
        })
        .collect()
}

/// Five-pointed star: ten vertices alternating outer and inner radius.
pub fn star(anchor: Pos2, current: Pos2) -> Vec<Pos2> {
    let (center, outer) = center_and_radius(anchor, current);
    let inner = outer * STAR_INNER_RATIO;
    (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            center + radius * Vec2::angled(i as f32 * PI / 5.0)
        })
        .collect()
}

/// Triangular head for an arrow ending at `tip`: `[tip, base_left, base_right]`.
pub fn arrow_head(tail: Pos2, tip: Pos2) -> [Pos2; 3] {
    let delta = tip - tail;
    let length = delta.length().max(1.0);
    let dir = delta / length;
    let normal = vec2(-dir.y, dir.x);
    let size = MAX_ARROW_HEAD.min(length / 3.0);

    let back = tip - size * dir;
    [tip, back + 0.5 * size * normal, back - 0.5 * size * normal]
}

/// Ellipse inscribed in the drag box, approximated by a closed polygon.
pub fn ellipse(anchor: Pos2, current: Pos2) -> Vec<Pos2> {
    let rect = super::bounding_box(anchor, current);
    let radii = rect.size() / 2.0;
    let perimeter = TAU * ((radii.x * radii.x + radii.y * radii.y) / 2.0).sqrt();
    let segments = ((perimeter / 4.0).ceil() as usize).clamp(16, 360);
    (0..segments)
        .map(|i| {
            let dir = Vec2::angled(i as f32 * TAU / segments as f32);
            rect.center() + vec2(dir.x * radii.x, dir.y * radii.y)
        })
        .collect()
}

/// Rectangle with quarter-circle corners; the radius is clamped to half of
/// the shorter side.
pub fn rounded_rectangle(anchor: Pos2, current: Pos2, corner_radius: f32) -> Vec<Pos2> {
    const ARC_STEPS: usize = 8;

    let rect = super::bounding_box(anchor, current);
    let radius = corner_radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    let corners = [
        (pos2(rect.max.x - radius, rect.min.y + radius), -FRAC_PI_2),
        (pos2(rect.max.x - radius, rect.max.y - radius), 0.0),
        (pos2(rect.min.x + radius, rect.max.y - radius), FRAC_PI_2),
        (pos2(rect.min.x + radius, rect.min.y + radius), PI),
    ];

    let mut points = Vec::with_capacity(corners.len() * (ARC_STEPS + 1));
    for (center, start) in corners {
        for step in 0..=ARC_STEPS {
            let angle = start + FRAC_PI_2 * step as f32 / ARC_STEPS as f32;
            points.push(center + radius * Vec2::angled(angle));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: Pos2, b: Pos2) {
        assert!((a - b).length() < 1e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn triangle_apex_sits_on_the_anchor_row() {
        let [apex, left, right] = triangle(pos2(10.0, 10.0), pos2(50.0, 40.0));
        assert_near(apex, pos2(30.0, 10.0));
        assert_near(left, pos2(10.0, 40.0));
        assert_near(right, pos2(50.0, 40.0));
    }

    #[test]
    fn pentagon_points_up() {
        let vertices = regular_polygon(pos2(0.0, 0.0), pos2(100.0, 60.0), 5);
        assert_eq!(vertices.len(), 5);
        // radius is half the larger delta
        assert_near(vertices[0], pos2(50.0, -20.0));
    }

    #[test]
    fn hexagon_starts_on_the_x_axis() {
        let vertices = regular_polygon(pos2(0.0, 0.0), pos2(40.0, 40.0), 6);
        assert_eq!(vertices.len(), 6);
        assert_near(vertices[0], pos2(40.0, 20.0));
        assert_near(vertices[3], pos2(0.0, 20.0));
    }

    #[test]
    fn star_alternates_radii() {
        let center = pos2(50.0, 50.0);
        let vertices = star(pos2(0.0, 0.0), pos2(100.0, 100.0));
        assert_eq!(vertices.len(), 10);
        for (i, vertex) in vertices.iter().enumerate() {
            let expected = if i % 2 == 0 { 50.0 } else { 20.0 };
            assert!(((*vertex - center).length() - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn arrow_head_is_capped_at_thirty_pixels() {
        let [tip, left, right] = arrow_head(pos2(0.0, 0.0), pos2(300.0, 0.0));
        assert_near(tip, pos2(300.0, 0.0));
        assert_near(left, pos2(270.0, 15.0));
        assert_near(right, pos2(270.0, -15.0));
    }

    #[test]
    fn short_arrow_head_scales_with_length() {
        let [_, left, _] = arrow_head(pos2(0.0, 0.0), pos2(0.0, 30.0));
        // size = 10, direction down, normal points to -x
        assert_near(left, pos2(-5.0, 20.0));
    }

    #[test]
    fn degenerate_arrow_does_not_divide_by_zero() {
        let head = arrow_head(pos2(5.0, 5.0), pos2(5.0, 5.0));
        assert!(head.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn rounded_rectangle_radius_is_clamped() {
        let points = rounded_rectangle(pos2(0.0, 0.0), pos2(10.0, 100.0), 20.0);
        assert!(points.iter().all(|p| p.x >= -1e-3 && p.x <= 10.0 + 1e-3));
        assert!(points.iter().all(|p| p.y >= -1e-3 && p.y <= 100.0 + 1e-3));
    }

    #[test]
    fn rectangle_outline_is_normalized() {
        let paths = ShapeKind::Rectangle.outline(pos2(20.0, 20.0), pos2(5.0, 10.0), 0.0);
        assert_eq!(paths.len(), 1);
        assert!(paths[0].closed);
        assert_near(paths[0].points[0], pos2(5.0, 10.0));
        assert_near(paths[0].points[2], pos2(20.0, 20.0));
    }

    #[test]
    fn arrow_outline_has_shaft_and_head() {
        let paths = ShapeKind::Arrow.outline(pos2(0.0, 0.0), pos2(90.0, 0.0), 0.0);
        assert_eq!(paths.len(), 2);
        assert!(!paths[0].closed);
        assert_eq!(paths[1].points.len(), 3);
    }
}
