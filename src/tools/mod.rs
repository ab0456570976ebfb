use serde::{Deserialize, Serialize};

use crate::geometry::ShapeKind;

/// Every tool the canvas understands. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Pencil,
    Brush,
    Eraser,
    Text,
    Line,
    Rectangle,
    RoundedRectangle,
    Ellipse,
    Triangle,
    Pentagon,
    Hexagon,
    Star,
    Arrow,
    Fill,
    Select,
}

/// Toolbar sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolGroup {
    Drawing,
    Shapes,
    Edit,
}

impl Tool {
    pub const ALL: [Tool; 15] = [
        Tool::Pencil,
        Tool::Brush,
        Tool::Eraser,
        Tool::Text,
        Tool::Line,
        Tool::Rectangle,
        Tool::RoundedRectangle,
        Tool::Ellipse,
        Tool::Triangle,
        Tool::Pentagon,
        Tool::Hexagon,
        Tool::Star,
        Tool::Arrow,
        Tool::Fill,
        Tool::Select,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pencil => "Pencil",
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
            Self::Text => "Text",
            Self::Line => "Line",
            Self::Rectangle => "Rectangle",
            Self::RoundedRectangle => "Rounded rectangle",
            Self::Ellipse => "Ellipse",
            Self::Triangle => "Triangle",
            Self::Pentagon => "Pentagon",
            Self::Hexagon => "Hexagon",
            Self::Star => "Star",
            Self::Arrow => "Arrow",
            Self::Fill => "Fill",
            Self::Select => "Select",
        }
    }

    /// Short glyph shown on toolbar buttons.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Pencil => "✏",
            Self::Brush => "🖌",
            Self::Eraser => "⌫",
            Self::Text => "A",
            Self::Line => "╱",
            Self::Rectangle => "▭",
            Self::RoundedRectangle => "▢",
            Self::Ellipse => "⬭",
            Self::Triangle => "△",
            Self::Pentagon => "⬠",
            Self::Hexagon => "⬡",
            Self::Star => "☆",
            Self::Arrow => "➔",
            Self::Fill => "🪣",
            Self::Select => "⬚",
        }
    }

    pub fn group(&self) -> ToolGroup {
        if self.is_freehand() || *self == Self::Text {
            ToolGroup::Drawing
        } else if self.shape().is_some() {
            ToolGroup::Shapes
        } else {
            ToolGroup::Edit
        }
    }

    /// Pencil, brush and eraser draw straight into the buffer as the pointer moves.
    pub fn is_freehand(&self) -> bool {
        matches!(self, Self::Pencil | Self::Brush | Self::Eraser)
    }

    /// The shape stamped by this tool, if it is a shape tool.
    pub fn shape(&self) -> Option<ShapeKind> {
        Some(match self {
            Self::Line => ShapeKind::Line,
            Self::Rectangle => ShapeKind::Rectangle,
            Self::RoundedRectangle => ShapeKind::RoundedRectangle,
            Self::Ellipse => ShapeKind::Ellipse,
            Self::Triangle => ShapeKind::Triangle,
            Self::Pentagon => ShapeKind::Pentagon,
            Self::Hexagon => ShapeKind::Hexagon,
            Self::Star => ShapeKind::Star,
            Self::Arrow => ShapeKind::Arrow,
            _ => return None,
        })
    }
}

/// The declarative toolbar: `(label, tool)` pairs in display order.
pub fn toolbar_entries() -> impl Iterator<Item = (&'static str, Tool)> {
    Tool::ALL.into_iter().map(|tool| (tool.name(), tool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_tool_is_listed_once() {
        let unique: HashSet<Tool> = Tool::ALL.into_iter().collect();
        assert_eq!(unique.len(), Tool::ALL.len());
    }

    #[test]
    fn categories_are_exclusive() {
        for tool in Tool::ALL {
            let freehand = tool.is_freehand();
            let shape = tool.shape().is_some();
            assert!(!(freehand && shape), "{tool:?}");
        }
        assert_eq!(Tool::ALL.iter().filter(|t| t.shape().is_some()).count(), 9);
        assert_eq!(Tool::ALL.iter().filter(|t| t.is_freehand()).count(), 3);
    }

    #[test]
    fn toolbar_groups() {
        assert_eq!(Tool::Text.group(), ToolGroup::Drawing);
        assert_eq!(Tool::Star.group(), ToolGroup::Shapes);
        assert_eq!(Tool::Fill.group(), ToolGroup::Edit);
        assert_eq!(Tool::Select.group(), ToolGroup::Edit);
    }
}
