use egui::Color32;
use serde::{Deserialize, Serialize};

/// Engine constants.
///
/// Nothing reads or writes this from disk; a host that wants to remember
/// its settings can embed it in its own state since it derives serde.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct CanvasConfig {
    pub default_width: u32,
    pub default_height: u32,
    /// Smallest width/height accepted by `resize_canvas`
    pub min_dimension: u32,
    /// Largest width/height accepted by `resize_canvas`
    pub max_dimension: u32,
    /// Maximum number of snapshots kept for undo/redo
    pub history_capacity: usize,
    /// Factor applied by one zoom step; always above 1
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Pending-entry bound for the flood fill stack
    pub fill_stack_limit: usize,
    pub corner_radius: f32,
    pub min_pen_width: u32,
    pub max_pen_width: u32,
    pub default_pen_width: u32,
    pub default_pen_color: Color32,
    pub background: Color32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            default_width: 1000,
            default_height: 800,
            min_dimension: 10,
            max_dimension: 3000,
            history_capacity: 20,
            zoom_step: 1.2,
            min_zoom: 0.1,
            max_zoom: 16.0,
            fill_stack_limit: 10_000,
            corner_radius: 20.0,
            min_pen_width: 1,
            max_pen_width: 50,
            default_pen_width: 3,
            default_pen_color: Color32::BLACK,
            background: Color32::WHITE,
        }
    }
}

impl CanvasConfig {
    /// Repair values that would break the engine's invariants: inverted
    /// bounds, non-growing zoom steps, non-positive zoom limits and an empty
    /// history. Each repair is logged.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.min_dimension == 0 {
            log::warn!("min_dimension 0 raised to 1");
            self.min_dimension = 1;
        }
        order_bounds("dimension", &mut self.min_dimension, &mut self.max_dimension);

        if self.min_pen_width == 0 {
            log::warn!("min_pen_width 0 raised to 1");
            self.min_pen_width = 1;
        }
        order_bounds("pen width", &mut self.min_pen_width, &mut self.max_pen_width);

        if !finite_above(self.zoom_step, 1.0) {
            log::warn!("zoom_step {} must be above 1, using {}", self.zoom_step, defaults.zoom_step);
            self.zoom_step = defaults.zoom_step;
        }
        if !finite_above(self.min_zoom, 0.0) {
            log::warn!("min_zoom {} must be positive, using {}", self.min_zoom, defaults.min_zoom);
            self.min_zoom = defaults.min_zoom;
        }
        if !self.max_zoom.is_finite() || self.max_zoom < self.min_zoom {
            let max_zoom = defaults.max_zoom.max(self.min_zoom);
            log::warn!("max_zoom {} below min_zoom {}, using {max_zoom}", self.max_zoom, self.min_zoom);
            self.max_zoom = max_zoom;
        }
        // Reset zoom must stay reachable.
        if self.min_zoom > 1.0 || self.max_zoom < 1.0 {
            log::warn!("zoom bounds {}..={} exclude 1, widening", self.min_zoom, self.max_zoom);
            self.min_zoom = self.min_zoom.min(1.0);
            self.max_zoom = self.max_zoom.max(1.0);
        }

        if self.history_capacity == 0 {
            log::warn!("history_capacity 0 raised to 1");
            self.history_capacity = 1;
        }
        if self.corner_radius.is_nan() || self.corner_radius < 0.0 {
            log::warn!("corner_radius {} replaced by 0", self.corner_radius);
            self.corner_radius = 0.0;
        }
        self
    }

    pub fn clamp_dimension(&self, value: u32) -> u32 {
        value.clamp(self.min_dimension, self.max_dimension)
    }

    pub fn clamp_pen_width(&self, width: u32) -> u32 {
        width.clamp(self.min_pen_width, self.max_pen_width)
    }

    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

fn finite_above(value: f32, floor: f32) -> bool {
    value.is_finite() && value > floor
}

fn order_bounds(name: &str, min: &mut u32, max: &mut u32) {
    if *min > *max {
        log::warn!("{name} bounds {min}..={max} are inverted, swapping");
        std::mem::swap(min, max);
    }
}
