use eframe::egui;

use crate::tools::Tool;

/// Square toolbar button showing a tool's icon, highlighted when active.
pub struct ToolButton {
    pub tool: Tool,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: Tool, selected: bool) -> Self {
        Self { tool, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(32.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let visuals = ui.style().interact_selectable(&response, self.selected);
            ui.painter().rect_filled(rect, 4.0, visuals.weak_bg_fill);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.tool.icon(),
                egui::FontId::proportional(20.0),
                visuals.text_color(),
            );

            if self.selected {
                ui.painter().rect_stroke(rect, 4.0, ui.visuals().selection.stroke);
            }
        }

        response.on_hover_text(self.tool.name())
    }
}
