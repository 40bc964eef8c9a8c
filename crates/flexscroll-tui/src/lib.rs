pub mod app;
pub mod drag;
pub mod event;
pub mod input;
pub mod loader;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
