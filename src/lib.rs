#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod components;
pub mod config;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod history;
pub mod input;
pub mod panels;
pub mod raster;
pub mod selection;
pub mod state;
pub mod stroke;
pub mod text;
pub mod texture_manager;
pub mod tools;

pub use app::PaintApp;
pub use canvas::Canvas;
pub use config::CanvasConfig;
pub use error::{CanvasError, CanvasResult};
pub use geometry::{PixelRect, ShapeKind};
pub use history::SnapshotHistory;
pub use input::{InputEvent, InputHandler, PointerFrame};
pub use selection::Selection;
pub use state::Interaction;
pub use stroke::PenStyle;
pub use text::{TextAlignment, TextSession, TextStyle};
pub use tools::Tool;
