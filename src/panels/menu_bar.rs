use crate::PaintApp;
use crate::app::Theme;

pub fn menu_bar(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    app.request_new();
                    ui.close_menu();
                }
                if ui.button("Open…").clicked() {
                    ui.close_menu();
                    app.open_file();
                }
                if ui.button("Save…").clicked() {
                    ui.close_menu();
                    app.save_file();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                let canvas = app.canvas_mut();
                if ui.add_enabled(canvas.can_undo(), egui::Button::new("Undo")).clicked() {
                    canvas.undo();
                    ui.close_menu();
                }
                if ui.add_enabled(canvas.can_redo(), egui::Button::new("Redo")).clicked() {
                    canvas.redo();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Clear").clicked() {
                    canvas.clear();
                    ui.close_menu();
                }
                if ui.button("Resize canvas…").clicked() {
                    app.open_resize_dialog();
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                let canvas = app.canvas_mut();
                if ui.button("Zoom in").clicked() {
                    canvas.zoom_in();
                }
                if ui.button("Zoom out").clicked() {
                    canvas.zoom_out();
                }
                if ui.button("Actual size").clicked() {
                    canvas.reset_zoom();
                    ui.close_menu();
                }
                ui.separator();
                let mut theme = app.theme();
                ui.radio_value(&mut theme, Theme::Light, "Light theme");
                ui.radio_value(&mut theme, Theme::Dark, "Dark theme");
                if theme != app.theme() {
                    app.set_theme(ctx, theme);
                    ui.close_menu();
                }
            });
        });
    });
}
