use egui::Color32;

use crate::PaintApp;
use crate::text::TextAlignment;

const PRESET_COLORS: [Color32; 8] = [
    Color32::BLACK,
    Color32::WHITE,
    Color32::RED,
    Color32::GREEN,
    Color32::BLUE,
    Color32::YELLOW,
    Color32::from_rgb(255, 0, 255),
    Color32::from_rgb(0, 255, 255),
];

pub fn style_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::right("style_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            let canvas = app.canvas_mut();

            ui.heading("Pen");
            let (min, max) = (canvas.config().min_pen_width, canvas.config().max_pen_width);
            let mut width = canvas.pen_width();
            if ui.add(egui::Slider::new(&mut width, min..=max).text("Width")).changed() {
                canvas.set_pen_width(width);
            }

            let mut color = canvas.pen_color();
            ui.horizontal(|ui| {
                ui.label("Color");
                ui.color_edit_button_srgba(&mut color);
            });
            ui.horizontal_wrapped(|ui| {
                for preset in PRESET_COLORS {
                    let (rect, response) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::click());
                    ui.painter().rect_filled(rect, 2.0, preset);
                    ui.painter().rect_stroke(rect, 2.0, ui.visuals().widgets.inactive.fg_stroke);
                    if response.clicked() {
                        color = preset;
                    }
                }
            });
            if color != canvas.pen_color() {
                canvas.set_pen_color(color);
            }

            ui.separator();
            ui.heading("Text");

            let mut style = canvas.text_style().clone();
            let families: Vec<String> = canvas.font_families().map(str::to_owned).collect();
            egui::ComboBox::from_label("Font")
                .selected_text(style.family.clone())
                .show_ui(ui, |ui| {
                    for family in &families {
                        ui.selectable_value(&mut style.family, family.clone(), family);
                    }
                });
            ui.add(egui::Slider::new(&mut style.size, 6.0..=144.0).text("Size"));
            ui.horizontal(|ui| {
                ui.toggle_value(&mut style.bold, egui::RichText::new("B").strong());
                ui.toggle_value(&mut style.italic, egui::RichText::new("I").italics());
                ui.toggle_value(&mut style.underline, egui::RichText::new("U").underline());
            });
            ui.horizontal(|ui| {
                ui.selectable_value(&mut style.alignment, TextAlignment::Left, "Left");
                ui.selectable_value(&mut style.alignment, TextAlignment::Center, "Center");
                ui.selectable_value(&mut style.alignment, TextAlignment::Right, "Right");
            });

            let current = canvas.text_style().clone();
            if style.family != current.family {
                canvas.set_font_family(&style.family);
            }
            if style.size != current.size {
                canvas.set_font_size(style.size);
            }
            if style.bold != current.bold {
                canvas.set_font_bold(style.bold);
            }
            if style.italic != current.italic {
                canvas.set_font_italic(style.italic);
            }
            if style.underline != current.underline {
                canvas.set_font_underline(style.underline);
            }
            if style.alignment != current.alignment {
                canvas.set_text_alignment(style.alignment);
            }
        });
}
