use crate::PaintApp;
use crate::components::ToolButton;
use crate::tools::{ToolGroup, toolbar_entries};

const GROUPS: [(ToolGroup, &str); 3] = [
    (ToolGroup::Drawing, "Draw"),
    (ToolGroup::Shapes, "Shapes"),
    (ToolGroup::Edit, "Edit"),
];

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(120.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.canvas().tool();
            for (group, title) in GROUPS {
                ui.label(title);
                ui.horizontal_wrapped(|ui| {
                    for (label, tool) in toolbar_entries().filter(|(_, tool)| tool.group() == group) {
                        if ToolButton::new(tool, tool == active).show(ui).clicked() {
                            log::info!("Tool selected from UI: {label}");
                            app.canvas_mut().set_tool(tool);
                        }
                    }
                });
                ui.separator();
            }

            ui.horizontal(|ui| {
                let canvas = app.canvas_mut();
                if ui.add_enabled(canvas.can_undo(), egui::Button::new("Undo")).clicked() {
                    canvas.undo();
                }
                if ui.add_enabled(canvas.can_redo(), egui::Button::new("Redo")).clicked() {
                    canvas.redo();
                }
            });

            let history = app.canvas().history();
            ui.label(format!("History: {} / {}", history.cursor() + 1, history.len()));
        });
}
