use egui::{Pos2, Vec2};

use crate::geometry::ShapeKind;

/// What the pointer is currently doing on the canvas.
///
/// Only one interaction runs at a time; `Idle` between presses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Freehand tools: each move draws from `last` to the new point
    Stroking { last: Pos2 },
    /// Shape tools: preview from `anchor` until release
    Shaping { anchor: Pos2, shape: ShapeKind },
    /// Dragging out a new selection rectangle from `start`
    Selecting { start: Pos2 },
    /// Dragging the selection; `offset` is the grab point relative to its top-left
    MovingSelection { offset: Vec2 },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Stroking { .. } => "Stroking",
            Self::Shaping { .. } => "Shaping",
            Self::Selecting { .. } => "Selecting",
            Self::MovingSelection { .. } => "MovingSelection",
        }
    }
}
