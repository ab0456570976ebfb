//! The editing engine: pixel buffer, tool state machine, history and view.
//!
//! All positions handed to the pointer methods are in canvas pixels. The
//! host converts screen offsets with [`Canvas::screen_to_canvas`], which is
//! the only place the zoom factor is applied to input.

use std::path::{Path, PathBuf};

use egui::{Color32, Pos2, Vec2};
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::config::CanvasConfig;
use crate::error::{CanvasError, CanvasResult};
use crate::fill::{self, FillOutcome};
use crate::geometry::PixelRect;
use crate::history::SnapshotHistory;
use crate::raster;
use crate::selection::Selection;
use crate::state::Interaction;
use crate::stroke::{PenStyle, resolve_pen};
use crate::text::{self, FontLibrary, TextAlignment, TextSession, TextStyle};
use crate::tools::Tool;

pub struct Canvas {
    config: CanvasConfig,
    image: RgbaImage,
    /// Committed buffer plus the shape being dragged out
    overlay: Option<RgbaImage>,
    history: SnapshotHistory,

    tool: Tool,
    pen_color: Color32,
    pen_width: u32,
    text_style: TextStyle,
    text_session: Option<TextSession>,
    fonts: FontLibrary,

    selection: Option<Selection>,
    interaction: Interaction,

    zoom: f32,
    pointer: Option<Pos2>,
    needs_redraw: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("size", &self.image.dimensions())
            .field("tool", &self.tool)
            .field("interaction", &self.interaction)
            .field("history_cursor", &self.history.cursor())
            .field("zoom", &self.zoom)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    /// The config is sanitized first, so inverted bounds or a shrinking
    /// zoom step never reach the engine.
    pub fn with_config(config: CanvasConfig) -> Self {
        let config = config.sanitized();
        let image = blank_image(&config, config.default_width, config.default_height);
        let history = SnapshotHistory::new(image.clone(), config.history_capacity);
        Self {
            pen_color: config.default_pen_color,
            pen_width: config.clamp_pen_width(config.default_pen_width),
            image,
            overlay: None,
            history,
            tool: Tool::default(),
            text_style: TextStyle::default(),
            text_session: None,
            fonts: FontLibrary::load(),
            selection: None,
            interaction: Interaction::Idle,
            zoom: 1.0,
            pointer: None,
            needs_redraw: true,
            config,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Buffer access

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The committed buffer.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Shape preview, present only while a shape is being dragged.
    pub fn overlay(&self) -> Option<&RgbaImage> {
        self.overlay.as_ref()
    }

    /// Committed pixel at `(x, y)`, if on the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.image.get_pixel_checked(x, y).map(|p| raster::to_color32(*p))
    }

    /// What the user should see: preview (or committed buffer) with the
    /// floating selection drawn on top.
    pub fn composite(&self) -> RgbaImage {
        let mut frame = self.overlay.as_ref().unwrap_or(&self.image).clone();
        if let Some(selection) = &self.selection {
            selection.merge_into(&mut frame);
        }
        frame
    }

    // ------------------------------------------------------------------
    // Tool and style state

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools, committing a pending text session or selection that
    /// belongs to the tool being left.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.text_session.is_some() && tool != Tool::Text {
            self.commit_text();
        }
        if self.selection.is_some() && tool != Tool::Select {
            self.commit_selection();
        }
        self.cancel_interaction();
        if tool != self.tool {
            log::info!("tool changed: {} -> {}", self.tool.name(), tool.name());
        }
        self.tool = tool;
    }

    pub fn pen_color(&self) -> Color32 {
        self.pen_color
    }

    pub fn set_pen_color(&mut self, color: Color32) {
        self.pen_color = color;
    }

    pub fn pen_width(&self) -> u32 {
        self.pen_width
    }

    /// Out-of-range widths are clamped to the configured bounds.
    pub fn set_pen_width(&mut self, width: u32) {
        let clamped = self.config.clamp_pen_width(width);
        if clamped != width {
            log::warn!("pen width {width} clamped to {clamped}");
        }
        self.pen_width = clamped;
    }

    /// The pen the active tool draws with.
    pub fn pen(&self) -> PenStyle {
        resolve_pen(self.tool, self.pen_color, self.pen_width, self.config.background)
    }

    pub fn text_style(&self) -> &TextStyle {
        &self.text_style
    }

    pub fn font_families(&self) -> impl Iterator<Item = &str> {
        self.fonts.families()
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.update_text_style(|style| style.family = family.to_owned());
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.update_text_style(|style| style.size = size.max(1.0));
    }

    pub fn set_font_bold(&mut self, bold: bool) {
        self.update_text_style(|style| style.bold = bold);
    }

    pub fn set_font_italic(&mut self, italic: bool) {
        self.update_text_style(|style| style.italic = italic);
    }

    pub fn set_font_underline(&mut self, underline: bool) {
        self.update_text_style(|style| style.underline = underline);
    }

    pub fn set_text_alignment(&mut self, alignment: TextAlignment) {
        self.update_text_style(|style| style.alignment = alignment);
    }

    /// Style changes also restyle the text being edited.
    fn update_text_style(&mut self, apply: impl Fn(&mut TextStyle)) {
        apply(&mut self.text_style);
        if let Some(session) = &mut self.text_session {
            apply(&mut session.style);
        }
    }

    // ------------------------------------------------------------------
    // Pointer state machine

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn pointer_down(&mut self, pos: Pos2) {
        let pos = pos.floor();

        // A click anywhere while typing only finishes the text.
        if self.text_session.is_some() {
            self.commit_text();
            return;
        }

        match self.tool {
            Tool::Select => self.begin_select(pos),
            Tool::Text => self.start_text(pos),
            Tool::Fill => self.fill_at(pos),
            tool => {
                self.interaction = match tool.shape() {
                    Some(shape) => Interaction::Shaping { anchor: pos, shape },
                    None => Interaction::Stroking { last: pos },
                };
            }
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        let pos = pos.floor();
        self.pointer = Some(pos);

        match self.interaction {
            Interaction::Idle => {}
            Interaction::Stroking { last } => {
                let pen = self.pen();
                raster::stroke_segment(&mut self.image, last, pos, &pen);
                self.interaction = Interaction::Stroking { last: pos };
                self.needs_redraw = true;
            }
            Interaction::Shaping { anchor, shape } => {
                let pen = self.pen();
                let mut preview = self.image.clone();
                let outline = shape.outline(anchor, pos, self.config.corner_radius);
                raster::stroke_paths(&mut preview, &outline, &pen);
                self.overlay = Some(preview);
                self.needs_redraw = true;
            }
            Interaction::Selecting { start } => {
                self.selection = Some(Selection::pending(PixelRect::from_corners(start, pos)));
                self.needs_redraw = true;
            }
            Interaction::MovingSelection { offset } => {
                if let Some(selection) = &mut self.selection {
                    selection.rect = selection.rect.moved_to(pos - offset);
                    self.needs_redraw = true;
                }
            }
        }
    }

    pub fn pointer_up(&mut self, pos: Pos2) {
        let pos = pos.floor();

        match std::mem::take(&mut self.interaction) {
            Interaction::Idle | Interaction::MovingSelection { .. } => {}
            Interaction::Stroking { .. } => self.push_history(),
            Interaction::Shaping { anchor, shape } => {
                self.overlay = None;
                let pen = self.pen();
                let outline = shape.outline(anchor, pos, self.config.corner_radius);
                raster::stroke_paths(&mut self.image, &outline, &pen);
                self.push_history();
            }
            Interaction::Selecting { start } => {
                let rect = PixelRect::from_corners(start, pos);
                self.selection = Selection::capture(&self.image, rect);
                if let Some(selection) = &self.selection {
                    log::debug!("selected {}x{} at ({}, {})", selection.rect.width(), selection.rect.height(), selection.rect.min_x, selection.rect.min_y);
                }
            }
        }
        self.needs_redraw = true;
    }

    fn begin_select(&mut self, pos: Pos2) {
        if let Some(selection) = &self.selection {
            if selection.rect.contains(pos) {
                self.interaction = Interaction::MovingSelection {
                    offset: pos - selection.rect.top_left(),
                };
                return;
            }
        }
        self.commit_selection();
        self.interaction = Interaction::Selecting { start: pos };
        self.selection = Some(Selection::pending(PixelRect::from_corners(pos, pos)));
        self.needs_redraw = true;
    }

    fn fill_at(&mut self, pos: Pos2) {
        let seed = (pos.x as i32, pos.y as i32);
        let outcome = fill::flood_fill(
            &mut self.image,
            seed,
            raster::to_rgba(self.pen_color),
            self.config.fill_stack_limit,
        );
        if let FillOutcome::Filled { pixels, truncated } = outcome {
            log::debug!("filled {pixels} pixels from {seed:?} (truncated: {truncated})");
        }
        if outcome.changed() {
            self.push_history();
            self.needs_redraw = true;
        }
    }

    /// Abandon the current press. A freehand stroke already sits in the
    /// buffer, so it is recorded; a shape preview is dropped.
    fn cancel_interaction(&mut self) {
        if let Interaction::Stroking { .. } = self.interaction {
            self.push_history();
        }
        if !self.interaction.is_idle() || self.overlay.is_some() {
            self.interaction = Interaction::Idle;
            self.overlay = None;
            self.needs_redraw = true;
        }
    }

    // ------------------------------------------------------------------
    // Selection

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Merge the floating selection back into the buffer at its current
    /// position. One history entry if anything was pasted.
    pub fn commit_selection(&mut self) {
        if let Some(selection) = self.selection.take() {
            if selection.merge_into(&mut self.image) {
                self.push_history();
            }
            self.needs_redraw = true;
        }
    }

    // ------------------------------------------------------------------
    // Text

    pub fn text_session(&self) -> Option<&TextSession> {
        self.text_session.as_ref()
    }

    pub fn text_session_mut(&mut self) -> Option<&mut TextSession> {
        self.text_session.as_mut()
    }

    fn start_text(&mut self, pos: Pos2) {
        self.text_session = Some(TextSession::new(pos, self.text_style.clone()));
        self.needs_redraw = true;
    }

    /// Rasterize the session's text in the current pen color and close it.
    /// Blank text closes the session without touching buffer or history.
    pub fn commit_text(&mut self) {
        let Some(session) = self.text_session.take() else {
            return;
        };
        self.needs_redraw = true;
        if session.is_blank() {
            return;
        }
        match self.fonts.font(&session.style.family) {
            Some(font) => {
                text::draw_text(&mut self.image, font, &session.text, &session.style, session.anchor, self.pen_color);
                self.push_history();
            }
            None => log::error!("no font available to draw text"),
        }
    }

    pub fn cancel_text(&mut self) {
        if self.text_session.take().is_some() {
            self.needs_redraw = true;
        }
    }

    // ------------------------------------------------------------------
    // History

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.image = snapshot.clone();
            self.discard_transient();
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.image = snapshot.clone();
            self.discard_transient();
        }
    }

    fn push_history(&mut self) {
        self.history.snapshot(&self.image);
    }

    /// Drop state that refers to pixels which are no longer on screen.
    fn discard_transient(&mut self) {
        self.selection = None;
        self.overlay = None;
        self.interaction = Interaction::Idle;
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // Whole-canvas operations

    /// Fill with the background color and record it.
    pub fn clear(&mut self) {
        let background = raster::to_rgba(self.config.background);
        self.image.pixels_mut().for_each(|p| *p = background);
        self.discard_transient();
        self.push_history();
        log::info!("canvas cleared");
    }

    /// Fresh default-sized canvas with a single-entry history. Pen, tool and
    /// text style are kept.
    pub fn new_canvas(&mut self) {
        self.image = blank_image(&self.config, self.config.default_width, self.config.default_height);
        self.history.reset(self.image.clone());
        self.text_session = None;
        self.zoom = 1.0;
        self.discard_transient();
        log::info!("new {}x{} canvas", self.width(), self.height());
    }

    /// Replace the canvas with the decoded image at `path`.
    ///
    /// On error nothing changes: buffer, selection and history stay as they were.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> CanvasResult<()> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| CanvasError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        self.image = decoded.to_rgba8();
        self.history.reset(self.image.clone());
        self.text_session = None;
        self.discard_transient();
        log::info!("loaded {} ({}x{})", path.display(), self.width(), self.height());
        Ok(())
    }

    /// Encode the committed buffer, choosing the format from the extension.
    ///
    /// Paths without a png/jpg/jpeg/bmp extension get `.png` appended.
    /// Returns the path actually written.
    pub fn save_image(&self, path: impl AsRef<Path>) -> CanvasResult<PathBuf> {
        let (path, format) = output_target(path.as_ref());
        let result = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgba8(self.image.clone())
                .to_rgb8()
                .save_with_format(&path, format),
            _ => self.image.save_with_format(&path, format),
        };
        result.map_err(|source| CanvasError::Encode {
            path: path.clone(),
            source,
        })?;
        log::info!("saved {}", path.display());
        Ok(path)
    }

    /// Resize to `width`×`height` (clamped to the configured bounds),
    /// keeping existing content anchored at the top-left.
    pub fn resize_canvas(&mut self, width: u32, height: u32) {
        let (w, h) = (self.config.clamp_dimension(width), self.config.clamp_dimension(height));
        if (w, h) != (width, height) {
            log::warn!("resize {width}x{height} clamped to {w}x{h}");
        }
        let mut resized = blank_image(&self.config, w, h);
        raster::paste(&mut resized, &self.image, 0, 0);
        self.image = resized;
        self.discard_transient();
        self.push_history();
        log::info!("canvas resized to {w}x{h}");
    }

    // ------------------------------------------------------------------
    // View

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom = self.config.clamp_zoom(self.zoom * self.config.zoom_step);
        self.needs_redraw = true;
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.config.clamp_zoom(self.zoom / self.config.zoom_step);
        self.needs_redraw = true;
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
        self.needs_redraw = true;
    }

    /// Canvas position under a screen offset measured from the canvas origin.
    pub fn screen_to_canvas(&self, offset: Vec2) -> Pos2 {
        (offset / self.zoom).to_pos2()
    }

    /// Screen size of the canvas at the current zoom.
    pub fn display_size(&self) -> Vec2 {
        egui::vec2(self.width() as f32, self.height() as f32) * self.zoom
    }

    // ------------------------------------------------------------------
    // Notifications

    /// True once after any change that needs a repaint.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Last canvas position reported through `pointer_move`.
    pub fn pointer_position(&self) -> Option<Pos2> {
        self.pointer
    }

    pub fn clear_pointer_position(&mut self) {
        self.pointer = None;
    }
}

fn blank_image(config: &CanvasConfig, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width.max(1), height.max(1), raster::to_rgba(config.background))
}

fn output_target(path: &Path) -> (PathBuf, ImageFormat) {
    match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp)) => (path.to_path_buf(), format),
        _ => {
            let mut with_png = path.as_os_str().to_owned();
            with_png.push(".png");
            (PathBuf::from(with_png), ImageFormat::Png)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_keep_their_format() {
        assert_eq!(output_target(Path::new("a.png")).1, ImageFormat::Png);
        assert_eq!(output_target(Path::new("a.JPG")).1, ImageFormat::Jpeg);
        assert_eq!(output_target(Path::new("a.jpeg")).1, ImageFormat::Jpeg);
        assert_eq!(output_target(Path::new("a.bmp")).1, ImageFormat::Bmp);
    }

    #[test]
    fn unknown_extensions_fall_back_to_png() {
        assert_eq!(output_target(Path::new("drawing")), (PathBuf::from("drawing.png"), ImageFormat::Png));
        assert_eq!(output_target(Path::new("notes.txt")), (PathBuf::from("notes.txt.png"), ImageFormat::Png));
    }

    #[test]
    fn unsanitized_config_does_not_panic() {
        let config: CanvasConfig = serde_json::from_str(
            r#"{ "default_width": 20, "default_height": 20, "min_pen_width": 60, "zoom_step": 0.5 }"#,
        )
        .unwrap();
        let mut canvas = Canvas::with_config(config);
        assert_eq!(canvas.pen_width(), 50);
        canvas.set_pen_width(3);
        assert_eq!(canvas.pen_width(), 50);

        canvas.zoom_in();
        assert!(canvas.zoom() > 1.0);
    }

    #[test]
    fn zoom_in_stops_at_the_maximum() {
        let mut canvas = Canvas::with_config(CanvasConfig {
            default_width: 20,
            default_height: 20,
            ..CanvasConfig::default()
        });
        for _ in 0..100 {
            canvas.zoom_in();
        }
        assert_eq!(canvas.zoom(), canvas.config().max_zoom);
        assert_eq!(canvas.display_size(), egui::vec2(320.0, 320.0));
    }

    #[test]
    fn screen_offsets_are_divided_by_zoom() {
        let mut canvas = Canvas::new();
        canvas.zoom_in();
        let pos = canvas.screen_to_canvas(egui::vec2(120.0, 60.0));
        assert!((pos.x - 100.0).abs() < 1e-3);
        assert!((pos.y - 50.0).abs() < 1e-3);
    }
}
