use egui::{Color32, FontFamily, FontId, Key, Modifiers, Pos2, Rect, Stroke};

use crate::PaintApp;
use crate::canvas::Canvas;
use crate::input;
use crate::text::FontLibrary;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let backdrop = ctx.style().visuals.extreme_bg_color;
    egui::CentralPanel::default()
        .frame(egui::Frame::central_panel(&ctx.style()).fill(backdrop))
        .show(ctx, |ui| {
            egui::ScrollArea::both().drag_to_scroll(false).show(ui, |ui| {
                let size = app.canvas().display_size();
                let (canvas_rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
                let response = response.on_hover_cursor(egui::CursorIcon::Crosshair);

                // Handle input
                let (handler, canvas) = app.input_and_canvas();
                let events = handler.process_input(ctx, &response, canvas_rect, canvas);
                input::dispatch(canvas, &events);

                // Render the canvas
                let texture = app.sync_texture(ctx);
                let uv = Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0));
                ui.painter().image(texture, canvas_rect, uv, Color32::WHITE);
                draw_selection_outline(ui.painter(), app.canvas(), canvas_rect);

                text_editor(app.canvas_mut(), ctx, canvas_rect);
            });
        });
}

fn draw_selection_outline(painter: &egui::Painter, canvas: &Canvas, canvas_rect: Rect) {
    let Some(selection) = canvas.selection() else {
        return;
    };
    if selection.rect.is_empty() {
        return;
    }

    let rect = selection.rect.to_rect();
    let zoom = canvas.zoom();
    let to_screen = |p: Pos2| canvas_rect.min + p.to_vec2() * zoom;
    let corners = [
        to_screen(rect.left_top()),
        to_screen(rect.right_top()),
        to_screen(rect.right_bottom()),
        to_screen(rect.left_bottom()),
        to_screen(rect.left_top()),
    ];
    painter.extend(egui::Shape::dashed_line(&corners, Stroke::new(1.0, Color32::BLACK), 4.0, 4.0));
}

/// Floating editor for the open text session, placed at its anchor.
///
/// Ctrl+Enter places the text, Escape drops it. Clicking the canvas also
/// places it through the engine.
fn text_editor(canvas: &mut Canvas, ctx: &egui::Context, canvas_rect: Rect) {
    if canvas.text_session().is_none() {
        return;
    }

    let (commit, cancel) = ctx.input_mut(|i| {
        (
            i.consume_key(Modifiers::COMMAND, Key::Enter),
            i.consume_key(Modifiers::NONE, Key::Escape),
        )
    });
    if commit {
        canvas.commit_text();
        return;
    }
    if cancel {
        canvas.cancel_text();
        return;
    }

    let zoom = canvas.zoom();
    let color = canvas.pen_color();
    let Some(session) = canvas.text_session_mut() else {
        return;
    };

    let family = match session.style.family.as_str() {
        FontLibrary::MONOSPACE => FontFamily::Monospace,
        _ => FontFamily::Proportional,
    };
    let font = FontId::new(session.style.size * zoom, family);
    let pos = canvas_rect.min + session.anchor.to_vec2() * zoom;

    egui::Area::new(egui::Id::new("text_session"))
        .fixed_pos(pos)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let response = ui.add(
                egui::TextEdit::multiline(&mut session.text)
                    .font(font)
                    .text_color(color)
                    .desired_rows(1)
                    .desired_width(240.0)
                    .hint_text("Type text"),
            );
            if ctx.memory(|m| m.focused().is_none()) {
                response.request_focus();
            }
        });
}
