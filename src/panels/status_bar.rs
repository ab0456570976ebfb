use crate::PaintApp;

pub fn status_bar(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let canvas = app.canvas();
            match canvas.pointer_position() {
                Some(pos) => ui.label(format!("{}, {} px", pos.x, pos.y)),
                None => ui.label("Ready"),
            };
            ui.separator();
            ui.label(format!("{} × {}", canvas.width(), canvas.height()));
            ui.separator();
            ui.label(format!("{:.0}%", canvas.zoom() * 100.0));
            ui.separator();
            ui.label(canvas.tool().name());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(status) = app.status() {
                    ui.label(status);
                } else if let Some(path) = app.current_file() {
                    ui.label(path.display().to_string());
                }
            });
        });
    });
}
