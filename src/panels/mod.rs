mod central_panel;
mod menu_bar;
mod status_bar;
mod style_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use menu_bar::menu_bar;
pub use status_bar::status_bar;
pub use style_panel::style_panel;
pub use tools_panel::tools_panel;
