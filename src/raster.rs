//! Stroke rasterization into the canvas buffer.
//!
//! Every primitive first accumulates per-pixel coverage into a
//! [`CoverageMask`] (max, never summed, so overlapping segments of one
//! stroke do not darken their joints) and is then composited once.
//! Pixel `(x, y)` is sampled at the point `(x, y)`.

use egui::{Color32, Pos2, Vec2, pos2, vec2};
use image::{Rgba, RgbaImage};

use crate::geometry::Path;
use crate::stroke::{CapStyle, JoinStyle, PenStyle};

pub fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

pub fn to_color32(pixel: Rgba<u8>) -> Color32 {
    let [r, g, b, a] = pixel.0;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Single-channel coverage over a clipped region of the canvas.
pub struct CoverageMask {
    x0: i32,
    y0: i32,
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl CoverageMask {
    /// Mask covering `min..=max`, clipped to a `canvas_w`×`canvas_h` buffer.
    /// `None` when nothing of it lies on the canvas.
    pub fn new(min: Pos2, max: Pos2, canvas_w: u32, canvas_h: u32) -> Option<Self> {
        let x0 = (min.x.floor() as i32).max(0);
        let y0 = (min.y.floor() as i32).max(0);
        let x1 = (max.x.ceil() as i32 + 1).min(canvas_w as i32);
        let y1 = (max.y.ceil() as i32 + 1).min(canvas_h as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let (width, height) = ((x1 - x0) as u32, (y1 - y0) as u32);
        Some(Self {
            x0,
            y0,
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        })
    }

    /// Raise the coverage at canvas pixel `(x, y)`; ignores pixels outside the mask.
    pub fn add(&mut self, x: i32, y: i32, coverage: f32) {
        let (mx, my) = (x - self.x0, y - self.y0);
        if mx < 0 || my < 0 || mx >= self.width as i32 || my >= self.height as i32 {
            return;
        }
        let idx = my as usize * self.width as usize + mx as usize;
        self.data[idx] = self.data[idx].max(coverage.clamp(0.0, 1.0));
    }

    /// Visit every pixel of the mask that intersects `min..=max`.
    fn for_each_in(&mut self, min: Pos2, max: Pos2, mut coverage_at: impl FnMut(Pos2) -> f32) {
        let xs = (min.x.floor() as i32).max(self.x0)..=(max.x.ceil() as i32).min(self.x0 + self.width as i32 - 1);
        let ys = (min.y.floor() as i32).max(self.y0)..=(max.y.ceil() as i32).min(self.y0 + self.height as i32 - 1);
        for y in ys {
            for x in xs.clone() {
                let coverage = coverage_at(pos2(x as f32, y as f32));
                if coverage > 0.0 {
                    self.add(x, y, coverage);
                }
            }
        }
    }

    /// Paint `color` into `image` weighted by the accumulated coverage.
    ///
    /// Without antialiasing any covered pixel is replaced outright, so exact
    /// colors survive (the flood fill relies on exact matches).
    pub fn composite(&self, image: &mut RgbaImage, color: Color32, antialias: bool) {
        let src = color.to_srgba_unmultiplied();
        for my in 0..self.height {
            for mx in 0..self.width {
                let coverage = self.data[(my * self.width + mx) as usize];
                if coverage <= 0.0 {
                    continue;
                }
                let (x, y) = ((self.x0 + mx as i32) as u32, (self.y0 + my as i32) as u32);
                let pixel = image.get_pixel_mut(x, y);
                if !antialias || (coverage >= 1.0 && src[3] == 255) {
                    *pixel = Rgba(src);
                } else {
                    *pixel = blend_over(*pixel, src, coverage);
                }
            }
        }
    }
}

/// Source-over blend of `src` at `coverage` onto `dst` (unpremultiplied).
fn blend_over(dst: Rgba<u8>, src: [u8; 4], coverage: f32) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0 * coverage;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |s: u8, d: u8| {
        let value = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EndStyle {
    /// Interior end of a polyline; the join fills the gap
    Butt,
    Square,
    Round,
}

impl From<CapStyle> for EndStyle {
    fn from(cap: CapStyle) -> Self {
        match cap {
            CapStyle::Square => Self::Square,
            CapStyle::Round => Self::Round,
        }
    }
}

/// Signed distance from `p` to a thick segment (negative inside).
fn segment_sdf(p: Pos2, a: Pos2, b: Pos2, half: f32, start: EndStyle, end: EndStyle) -> f32 {
    let delta = b - a;
    let len = delta.length();
    let dir = if len > f32::EPSILON { delta / len } else { Vec2::X };
    let rel = p - a;
    let along = rel.dot(dir);
    let across = rel.dot(vec2(-dir.y, dir.x)).abs();

    let (over, style) = if along < 0.0 {
        (-along, start)
    } else if along > len {
        (along - len, end)
    } else {
        return across - half;
    };
    match style {
        EndStyle::Butt => over.max(across - half),
        EndStyle::Square => (over - half).max(across - half),
        EndStyle::Round => (over * over + across * across).sqrt() - half,
    }
}

fn coverage_from_sdf(sdf: f32, antialias: bool) -> f32 {
    if antialias {
        (0.5 - sdf).clamp(0.0, 1.0)
    } else if sdf <= 0.0 {
        1.0
    } else {
        0.0
    }
}

fn add_segment(mask: &mut CoverageMask, a: Pos2, b: Pos2, pen: &PenStyle, start: EndStyle, end: EndStyle) {
    let half = pen.half_width();
    let pad = half * std::f32::consts::SQRT_2 + 1.0;
    let min = pos2(a.x.min(b.x) - pad, a.y.min(b.y) - pad);
    let max = pos2(a.x.max(b.x) + pad, a.y.max(b.y) + pad);
    mask.for_each_in(min, max, |p| {
        coverage_from_sdf(segment_sdf(p, a, b, half, start, end), pen.antialias)
    });
}

fn add_join(mask: &mut CoverageMask, prev: Pos2, at: Pos2, next: Pos2, pen: &PenStyle) {
    let half = pen.half_width();
    let pad = half + 1.0;
    let (min, max) = (at - Vec2::splat(pad), at + Vec2::splat(pad));
    match pen.join {
        JoinStyle::Round => mask.for_each_in(min, max, |p| {
            coverage_from_sdf((p - at).length() - half, pen.antialias)
        }),
        JoinStyle::Bevel => {
            let normal = |from: Pos2, to: Pos2| {
                let d = (to - from).normalized();
                vec2(-d.y, d.x) * half
            };
            let (n1, n2) = (normal(prev, at), normal(at, next));
            let cross = n1.x * n2.y - n1.y * n2.x;
            if !cross.is_finite() || cross.abs() < 1e-3 {
                return;
            }
            // Only the outer triangle is ever outside the two segments.
            let triangles = [[at, at + n1, at + n2], [at, at - n1, at - n2]];
            mask.for_each_in(min, max, |p| {
                if triangles.iter().any(|t| in_triangle(p, t)) { 1.0 } else { 0.0 }
            });
        }
    }
}

fn in_triangle(p: Pos2, [a, b, c]: &[Pos2; 3]) -> bool {
    let cross = |o: Pos2, u: Pos2, v: Pos2| (u - o).x * (v - o).y - (u - o).y * (v - o).x;
    let (d1, d2, d3) = (cross(*a, *b, p), cross(*b, *c, p), cross(*c, *a, p));
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

fn add_path(mask: &mut CoverageMask, path: &Path, pen: &PenStyle) {
    let points = &path.points;
    let cap = EndStyle::from(pen.cap);
    match points.len() {
        0 => {}
        1 => add_segment(mask, points[0], points[0], pen, cap, cap),
        n if path.closed => {
            for i in 0..n {
                let (prev, at, next) = (points[(i + n - 1) % n], points[i], points[(i + 1) % n]);
                add_segment(mask, at, next, pen, EndStyle::Butt, EndStyle::Butt);
                add_join(mask, prev, at, next, pen);
            }
        }
        n => {
            for i in 0..n - 1 {
                let start = if i == 0 { cap } else { EndStyle::Butt };
                let end = if i == n - 2 { cap } else { EndStyle::Butt };
                add_segment(mask, points[i], points[i + 1], pen, start, end);
                if i > 0 {
                    add_join(mask, points[i - 1], points[i], points[i + 1], pen);
                }
            }
        }
    }
}

/// Stroke every path with `pen` as a single composite.
pub fn stroke_paths(image: &mut RgbaImage, paths: &[Path], pen: &PenStyle) {
    let mut points = paths.iter().flat_map(|path| path.points.iter().copied()).peekable();
    let Some(&first) = points.peek() else {
        return;
    };
    let (mut min, mut max) = (first, first);
    for p in points {
        min = min.min(p);
        max = max.max(p);
    }
    let pad = Vec2::splat(pen.half_width() * std::f32::consts::SQRT_2 + 1.0);
    let Some(mut mask) = CoverageMask::new(min - pad, max + pad, image.width(), image.height()) else {
        return;
    };
    for path in paths {
        add_path(&mut mask, path, pen);
    }
    mask.composite(image, pen.color, pen.antialias);
}

/// Straight segment from `from` to `to`, capped on both ends.
pub fn stroke_segment(image: &mut RgbaImage, from: Pos2, to: Pos2, pen: &PenStyle) {
    stroke_paths(image, &[Path::open(vec![from, to])], pen);
}

/// Copy `source` into `target` with its top-left at `(x, y)`, clipping
/// whatever falls outside `target`.
pub fn paste(target: &mut RgbaImage, source: &RgbaImage, x: i32, y: i32) {
    image::imageops::replace(target, source, x as i64, y as i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::resolve_pen;
    use crate::tools::Tool;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn blank(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, WHITE)
    }

    #[test]
    fn hard_segment_uses_the_exact_color() {
        let mut image = blank(20, 20);
        let pen = resolve_pen(Tool::Pencil, Color32::RED, 1, Color32::WHITE);
        stroke_segment(&mut image, pos2(2.0, 5.0), pos2(15.0, 5.0), &pen);
        for x in 2..=15 {
            assert_eq!(*image.get_pixel(x, 5), RED);
        }
        assert_eq!(*image.get_pixel(8, 7), WHITE);
    }

    #[test]
    fn thick_square_cap_extends_past_the_end() {
        let mut image = blank(30, 30);
        let pen = resolve_pen(Tool::Pencil, Color32::RED, 6, Color32::WHITE);
        stroke_segment(&mut image, pos2(10.0, 10.0), pos2(20.0, 10.0), &pen);
        assert_eq!(*image.get_pixel(22, 12), RED);
        assert_eq!(*image.get_pixel(8, 8), RED);
        assert_eq!(*image.get_pixel(25, 10), WHITE);
    }

    #[test]
    fn brush_edges_are_blended() {
        let mut image = blank(40, 40);
        let pen = resolve_pen(Tool::Brush, Color32::RED, 8, Color32::WHITE);
        stroke_segment(&mut image, pos2(5.0, 20.0), pos2(35.0, 20.0), &pen);
        assert_eq!(*image.get_pixel(20, 20), RED);
        let edge = image.get_pixel(20, 24);
        // y=24 sits exactly on the edge of a width-8 stroke
        assert!(edge[1] > 0 && edge[1] < 255, "{edge:?}");
    }

    #[test]
    fn rectangle_outline_leaves_the_inside_alone() {
        let mut image = blank(40, 40);
        let pen = resolve_pen(Tool::Rectangle, Color32::RED, 1, Color32::WHITE);
        let paths = crate::geometry::ShapeKind::Rectangle.outline(pos2(5.0, 5.0), pos2(30.0, 25.0), 0.0);
        stroke_paths(&mut image, &paths, &pen);
        assert_eq!(*image.get_pixel(5, 5), RED);
        assert_eq!(*image.get_pixel(30, 25), RED);
        assert_eq!(*image.get_pixel(17, 5), RED);
        assert_eq!(*image.get_pixel(30, 15), RED);
        assert_eq!(*image.get_pixel(17, 15), WHITE);
    }

    #[test]
    fn strokes_off_canvas_are_clipped() {
        let mut image = blank(10, 10);
        let pen = resolve_pen(Tool::Pencil, Color32::RED, 3, Color32::WHITE);
        stroke_segment(&mut image, pos2(-50.0, -50.0), pos2(-20.0, -20.0), &pen);
        assert!(image.pixels().all(|p| *p == WHITE));
        stroke_segment(&mut image, pos2(-5.0, 5.0), pos2(50.0, 5.0), &pen);
        assert_eq!(*image.get_pixel(0, 5), RED);
        assert_eq!(*image.get_pixel(9, 5), RED);
    }

    #[test]
    fn paste_clips_negative_offsets() {
        let mut target = blank(10, 10);
        let source = RgbaImage::from_pixel(4, 4, RED);
        paste(&mut target, &source, -2, 8);
        assert_eq!(*target.get_pixel(0, 8), RED);
        assert_eq!(*target.get_pixel(1, 9), RED);
        assert_eq!(*target.get_pixel(2, 8), WHITE);
    }

    #[test]
    fn color_conversions_round_trip_opaque_colors() {
        let color = Color32::from_rgb(12, 200, 99);
        assert_eq!(to_color32(to_rgba(color)), color);
    }
}
