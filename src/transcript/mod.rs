//! Chat transcript: message records and the ordered store the UI renders.

pub mod store;
pub mod types;

pub use store::Transcript;
pub use types::{Message, Role};
