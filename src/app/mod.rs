//! Top-level application controller.

pub mod controller;

pub use controller::ChatController;
