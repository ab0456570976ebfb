use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::tools::Tool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapStyle {
    /// Segment ends extend by half the width, squared off
    Square,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinStyle {
    Bevel,
    Round,
}

/// How a stroke is laid down into the pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenStyle {
    pub color: Color32,
    pub width: u32,
    pub cap: CapStyle,
    pub join: JoinStyle,
    /// Blend edge pixels by coverage instead of hard thresholding
    pub antialias: bool,
}

impl PenStyle {
    pub fn half_width(&self) -> f32 {
        (self.width as f32 / 2.0).max(0.5)
    }
}

/// Resolve the pen for `tool` from the user's chosen color and width.
///
/// The eraser always paints `background`, whatever color is chosen. The
/// brush is the only smoothed tool.
pub fn resolve_pen(tool: Tool, color: Color32, width: u32, background: Color32) -> PenStyle {
    match tool {
        Tool::Brush => PenStyle {
            color,
            width,
            cap: CapStyle::Round,
            join: JoinStyle::Round,
            antialias: true,
        },
        Tool::Eraser => PenStyle {
            color: background,
            width,
            cap: CapStyle::Square,
            join: JoinStyle::Bevel,
            antialias: false,
        },
        _ => PenStyle {
            color,
            width,
            cap: CapStyle::Square,
            join: JoinStyle::Bevel,
            antialias: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eraser_ignores_the_chosen_color() {
        let pen = resolve_pen(Tool::Eraser, Color32::RED, 12, Color32::WHITE);
        assert_eq!(pen.color, Color32::WHITE);
        assert_eq!(pen.width, 12);
        assert!(!pen.antialias);
    }

    #[test]
    fn brush_is_round_and_smoothed() {
        let pen = resolve_pen(Tool::Brush, Color32::BLUE, 8, Color32::WHITE);
        assert_eq!(pen.color, Color32::BLUE);
        assert_eq!(pen.cap, CapStyle::Round);
        assert_eq!(pen.join, JoinStyle::Round);
        assert!(pen.antialias);
    }

    #[test]
    fn pencil_and_shapes_use_hard_square_pens() {
        for tool in [Tool::Pencil, Tool::Rectangle, Tool::Arrow] {
            let pen = resolve_pen(tool, Color32::GREEN, 3, Color32::WHITE);
            assert_eq!(pen.color, Color32::GREEN);
            assert_eq!(pen.cap, CapStyle::Square);
            assert!(!pen.antialias);
        }
    }

    #[test]
    fn thin_pens_still_cover_half_a_pixel() {
        let pen = resolve_pen(Tool::Pencil, Color32::BLACK, 1, Color32::WHITE);
        assert_eq!(pen.half_width(), 0.5);
    }
}
