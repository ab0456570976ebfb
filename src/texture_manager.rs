use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::canvas::Canvas;

/// GPU copy of the canvas, re-uploaded only when the engine asks for a redraw.
#[derive(Default)]
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
}

impl CanvasTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the composite frame if it changed since the last call.
    pub fn sync(&mut self, ctx: &Context, canvas: &mut Canvas) -> TextureId {
        let dirty = canvas.take_redraw_request();
        match &mut self.handle {
            Some(handle) if !dirty => handle.id(),
            Some(handle) => {
                handle.set(frame_image(canvas), TextureOptions::NEAREST);
                handle.id()
            }
            None => {
                let handle = ctx.load_texture("canvas", frame_image(canvas), TextureOptions::NEAREST);
                let id = handle.id();
                self.handle = Some(handle);
                id
            }
        }
    }
}

fn frame_image(canvas: &Canvas) -> ColorImage {
    let frame = canvas.composite();
    let size = [frame.width() as usize, frame.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, frame.as_raw())
}
