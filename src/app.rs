use std::path::PathBuf;

use egui::{Key, KeyboardShortcut, Modifiers};

use crate::canvas::Canvas;
use crate::input::InputHandler;
use crate::panels;
use crate::texture_manager::CanvasTexture;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

const NEW: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::N);
const OPEN: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
const SAVE: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
const QUIT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Q);
const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
const ZOOM_IN: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Plus);
const ZOOM_IN_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Equals);
const ZOOM_OUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Minus);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        }
    }
}

/// Width/height being edited in the resize prompt.
#[derive(Debug, Clone, Copy)]
pub struct ResizeDialog {
    pub width: u32,
    pub height: u32,
}

pub struct PaintApp {
    canvas: Canvas,
    input: InputHandler,
    texture: CanvasTexture,
    theme: Theme,
    status: Option<String>,
    current_file: Option<PathBuf>,
    resize_dialog: Option<ResizeDialog>,
    confirm_new: bool,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(),
            input: InputHandler::new(),
            texture: CanvasTexture::new(),
            theme: Theme::default(),
            status: None,
            current_file: None,
            resize_dialog: None,
            confirm_new: false,
        }
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let app = Self::default();
        cc.egui_ctx.set_visuals(app.theme.visuals());
        app
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Pointer translation state and the canvas it feeds, borrowed together.
    pub fn input_and_canvas(&mut self) -> (&mut InputHandler, &mut Canvas) {
        (&mut self.input, &mut self.canvas)
    }

    pub fn sync_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        self.texture.sync(ctx, &mut self.canvas)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, ctx: &egui::Context, theme: Theme) {
        self.theme = theme;
        ctx.set_visuals(theme.visuals());
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn current_file(&self) -> Option<&std::path::Path> {
        self.current_file.as_deref()
    }

    fn report(&mut self, message: String) {
        self.status = Some(message);
    }

    // ------------------------------------------------------------------
    // File actions

    pub fn request_new(&mut self) {
        self.confirm_new = true;
    }

    pub fn open_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        match self.canvas.load_image(&path) {
            Ok(()) => {
                self.report(format!("Opened {}", path.display()));
                self.current_file = Some(path);
            }
            Err(err) => {
                log::error!("{err}");
                self.report(format!("Could not open image: {err}"));
            }
        }
    }

    pub fn save_file(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("Bitmap", &["bmp"]);
        if let Some(name) = self.current_file.as_ref().and_then(|p| p.file_name()) {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        // Pending text and floating selections belong in the saved image.
        self.canvas.commit_text();
        self.canvas.commit_selection();
        match self.canvas.save_image(&path) {
            Ok(written) => {
                self.report(format!("Saved {}", written.display()));
                self.current_file = Some(written);
            }
            Err(err) => {
                log::error!("{err}");
                self.report(format!("Could not save image: {err}"));
            }
        }
    }

    pub fn open_resize_dialog(&mut self) {
        self.resize_dialog = Some(ResizeDialog {
            width: self.canvas.width(),
            height: self.canvas.height(),
        });
    }

    // ------------------------------------------------------------------

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // The text editor owns the keyboard while a session is open.
        if self.canvas.text_session().is_some() {
            return;
        }

        let pressed = |shortcut: &KeyboardShortcut| ctx.input_mut(|i| i.consume_shortcut(shortcut));

        if pressed(&NEW) {
            self.request_new();
        }
        if pressed(&OPEN) {
            self.open_file();
        }
        if pressed(&SAVE) {
            self.save_file();
        }
        if pressed(&QUIT) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        // Redo first: the plain undo shortcut also matches with shift held.
        if pressed(&REDO) || pressed(&REDO_ALT) {
            self.canvas.redo();
        } else if pressed(&UNDO) {
            self.canvas.undo();
        }
        if pressed(&ZOOM_IN) || pressed(&ZOOM_IN_ALT) {
            self.canvas.zoom_in();
        }
        if pressed(&ZOOM_OUT) {
            self.canvas.zoom_out();
        }
    }

    fn dialogs(&mut self, ctx: &egui::Context) {
        if self.confirm_new {
            egui::Window::new("New image")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label("Discard the current image and start a blank one?");
                    ui.horizontal(|ui| {
                        if ui.button("Discard").clicked() {
                            self.canvas.new_canvas();
                            self.current_file = None;
                            self.report("New image".to_owned());
                            self.confirm_new = false;
                        }
                        if ui.button("Cancel").clicked() {
                            self.confirm_new = false;
                        }
                    });
                });
        }

        let mut apply = None;
        let mut close = false;
        if let Some(dialog) = &mut self.resize_dialog {
            let config = self.canvas.config();
            let bounds = config.min_dimension..=config.max_dimension;
            egui::Window::new("Resize canvas")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    egui::Grid::new("resize_grid").num_columns(2).show(ui, |ui| {
                        ui.label("Width");
                        ui.add(egui::DragValue::new(&mut dialog.width).range(bounds.clone()).suffix(" px"));
                        ui.end_row();
                        ui.label("Height");
                        ui.add(egui::DragValue::new(&mut dialog.height).range(bounds.clone()).suffix(" px"));
                        ui.end_row();
                    });
                    ui.horizontal(|ui| {
                        if ui.button("Resize").clicked() {
                            apply = Some(*dialog);
                        }
                        if ui.button("Cancel").clicked() {
                            close = true;
                        }
                    });
                });
        }
        if let Some(ResizeDialog { width, height }) = apply {
            self.canvas.resize_canvas(width, height);
            self.report(format!("Resized to {}x{}", self.canvas.width(), self.canvas.height()));
            close = true;
        }
        if close {
            self.resize_dialog = None;
        }
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        panels::menu_bar(self, ctx);
        panels::status_bar(self, ctx);
        panels::tools_panel(self, ctx);
        panels::style_panel(self, ctx);
        panels::central_panel(self, ctx);

        self.dialogs(ctx);
    }
}
