//! egui view layer.

pub mod app;
pub mod components;
pub mod theme;

pub use app::AuraApp;
pub use theme::Theme;
