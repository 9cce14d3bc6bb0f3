//! Gemini model client: wire types, SSE decoding, the conversation
//! session, and the channel-based pipeline the UI talks to.

pub mod client;
pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod sse;
pub mod wire;

pub use client::GeminiClient;
pub use pipeline::{ChatCommand, ChatEvent, ChatPipeline};
pub use session::ChatSession;
pub use wire::ImagePayload;
