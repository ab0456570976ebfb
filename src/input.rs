use egui::{Context, Pos2, PointerButton, Rect, Response};

use crate::canvas::Canvas;

/// Pointer events in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp(Pos2),
    /// The pointer left the canvas; clears the status readout
    PointerLeave,
}

/// Primary-button pointer state sampled from egui for one frame, in
/// screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerFrame {
    pub hover: Option<Pos2>,
    pub over_canvas: bool,
    /// The button went down this frame
    pub pressed: bool,
    /// The button is held
    pub down: bool,
}

/// Turns raw egui pointer input over the canvas widget into [`InputEvent`]s.
///
/// Only the primary button draws. A press must start on the canvas, but once
/// it has, moves and the release are delivered wherever the pointer goes.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    pressed: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// `canvas_rect` is where the canvas image is drawn on screen and
    /// `response` the widget allocated for it.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        response: &Response,
        canvas_rect: Rect,
        canvas: &Canvas,
    ) -> Vec<InputEvent> {
        let frame = ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            PointerFrame {
                hover,
                over_canvas: response.hovered() && hover.is_some_and(|pos| canvas_rect.contains(pos)),
                pressed: input.pointer.button_pressed(PointerButton::Primary),
                down: input.pointer.button_down(PointerButton::Primary),
            }
        });
        self.process_frame(frame, canvas_rect, canvas)
    }

    /// Advance one frame of pointer state. Screen positions are converted
    /// to canvas pixels through `canvas`.
    pub fn process_frame(&mut self, frame: PointerFrame, canvas_rect: Rect, canvas: &Canvas) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let to_canvas = |pos: Pos2| canvas.screen_to_canvas(pos - canvas_rect.min);
        let PointerFrame { hover, over_canvas, .. } = frame;

        if frame.pressed && over_canvas {
            if let Some(pos) = hover {
                events.push(InputEvent::PointerDown(to_canvas(pos)));
                self.pressed = true;
            }
        }

        match hover {
            Some(pos) if Some(pos) != self.last_pointer_pos && (self.pressed || over_canvas) => {
                events.push(InputEvent::PointerMove(to_canvas(pos)));
            }
            _ if !over_canvas && !self.pressed && self.last_pointer_pos.is_some() => {
                events.push(InputEvent::PointerLeave);
            }
            _ => {}
        }

        // Off-window pointers have no hover position; a drag keeps its last one.
        let last = if self.pressed { hover.or(self.last_pointer_pos) } else { hover };

        if self.pressed && !frame.down {
            let pos = last.unwrap_or(canvas_rect.min);
            events.push(InputEvent::PointerUp(to_canvas(pos)));
            self.pressed = false;
        }

        self.last_pointer_pos = if over_canvas || self.pressed { last } else { None };
        events
    }
}

/// Feed events to the canvas in order.
pub fn dispatch(canvas: &mut Canvas, events: &[InputEvent]) {
    for event in events {
        match *event {
            InputEvent::PointerDown(pos) => canvas.pointer_down(pos),
            InputEvent::PointerMove(pos) => canvas.pointer_move(pos),
            InputEvent::PointerUp(pos) => canvas.pointer_up(pos),
            InputEvent::PointerLeave => canvas.clear_pointer_position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use egui::pos2;

    fn small_canvas() -> Canvas {
        Canvas::with_config(CanvasConfig {
            default_width: 40,
            default_height: 30,
            ..CanvasConfig::default()
        })
    }

    fn frame(hover: Option<Pos2>, over_canvas: bool, pressed: bool, down: bool) -> PointerFrame {
        PointerFrame { hover, over_canvas, pressed, down }
    }

    #[test]
    fn press_drag_release_inside_the_canvas() {
        let canvas = small_canvas();
        let rect = Rect::from_min_size(pos2(100.0, 50.0), egui::vec2(40.0, 30.0));
        let mut handler = InputHandler::new();

        let events = handler.process_frame(frame(Some(pos2(105.0, 55.0)), true, true, true), rect, &canvas);
        assert_eq!(events, vec![InputEvent::PointerDown(pos2(5.0, 5.0)), InputEvent::PointerMove(pos2(5.0, 5.0))]);
        assert!(handler.is_pressed());

        let events = handler.process_frame(frame(Some(pos2(120.0, 60.0)), true, false, true), rect, &canvas);
        assert_eq!(events, vec![InputEvent::PointerMove(pos2(20.0, 10.0))]);

        let events = handler.process_frame(frame(Some(pos2(120.0, 60.0)), true, false, false), rect, &canvas);
        assert_eq!(events, vec![InputEvent::PointerUp(pos2(20.0, 10.0))]);
        assert!(!handler.is_pressed());
    }

    #[test]
    fn release_outside_the_window_uses_the_last_position() {
        let canvas = small_canvas();
        let rect = Rect::from_min_size(pos2(100.0, 50.0), egui::vec2(40.0, 30.0));
        let mut handler = InputHandler::new();

        handler.process_frame(frame(Some(pos2(105.0, 55.0)), true, true, true), rect, &canvas);
        handler.process_frame(frame(Some(pos2(130.0, 70.0)), true, false, true), rect, &canvas);

        // Dragged off the window: no hover position while held, then released.
        let events = handler.process_frame(frame(None, false, false, true), rect, &canvas);
        assert!(events.is_empty());
        let events = handler.process_frame(frame(None, false, false, false), rect, &canvas);
        assert_eq!(events, vec![InputEvent::PointerUp(pos2(30.0, 20.0))]);
    }

    #[test]
    fn hover_without_press_reports_moves_and_leave() {
        let canvas = small_canvas();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(40.0, 30.0));
        let mut handler = InputHandler::new();

        let events = handler.process_frame(frame(Some(pos2(10.0, 10.0)), true, false, false), rect, &canvas);
        assert_eq!(events, vec![InputEvent::PointerMove(pos2(10.0, 10.0))]);

        let events = handler.process_frame(frame(Some(pos2(300.0, 10.0)), false, false, false), rect, &canvas);
        assert_eq!(events, vec![InputEvent::PointerLeave]);

        let events = handler.process_frame(frame(Some(pos2(310.0, 10.0)), false, false, false), rect, &canvas);
        assert!(events.is_empty());
    }
}
