//! Chat pipeline: channel-based interface between the UI and the model
//! client, with a worker thread that owns the session and the runtime.

use super::client::GeminiClient;
use super::prompts::{IMAGE_ONLY_PROMPT, SYSTEM_PROMPT};
use super::session::ChatSession;
use super::wire::{ImagePayload, Part};
use crate::config::AppConfig;
use crate::Result;
use crossbeam_channel::{bounded, Receiver, Sender};
use tokio::runtime::Runtime;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Commands that can be sent to the chat pipeline
#[derive(Debug, Clone)]
pub enum ChatCommand {
    /// Request a streamed reply to one user message
    Send {
        /// The user's text (may be empty when an image is present)
        text: String,
        /// Optional inline image payload
        image: Option<ImagePayload>,
        /// Unique request ID for tracking
        request_id: Uuid,
    },

    /// Clear conversation history
    ClearHistory,

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the chat pipeline
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// One incremental piece of the reply, in arrival order
    Fragment { text: String, request_id: Uuid },

    /// The reply stream finished
    Complete { full_text: String, request_id: Uuid },

    /// The send or the stream failed; no more events follow for this id
    Failed { error: String, request_id: Uuid },

    /// Pipeline has shut down
    Shutdown,
}

/// Chat pipeline with channel-based communication
pub struct ChatPipeline {
    config: AppConfig,
    command_tx: Sender<ChatCommand>,
    command_rx: Receiver<ChatCommand>,
    event_tx: Sender<ChatEvent>,
    event_rx: Receiver<ChatEvent>,
}

impl ChatPipeline {
    pub fn new(config: AppConfig) -> Self {
        let (command_tx, command_rx) = bounded(config.channel_capacity);
        let (event_tx, event_rx) = bounded(config.channel_capacity);

        Self {
            config,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    pub fn command_sender(&self) -> Sender<ChatCommand> {
        self.command_tx.clone()
    }

    pub fn event_receiver(&self) -> Receiver<ChatEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread.
    ///
    /// Commands are processed strictly one at a time, so at most one
    /// reply stream is ever in flight.
    pub fn start_worker(self) -> Result<()> {
        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        std::thread::spawn(move || {
            info!("Chat pipeline worker starting");

            let runtime = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    let _ = event_tx.send(ChatEvent::Shutdown);
                    return;
                }
            };

            let client = GeminiClient::new(&config.api_key, &config.model);

            // Created lazily on first send, recreated if absent
            let mut session: Option<ChatSession> = None;

            info!("Chat pipeline worker ready");

            loop {
                match command_rx.recv() {
                    Ok(ChatCommand::Send {
                        text,
                        image,
                        request_id,
                    }) => {
                        debug!("Processing send request: {}", request_id);

                        let session =
                            session.get_or_insert_with(|| ChatSession::new(SYSTEM_PROMPT));
                        let user_parts = build_user_parts(&text, image);

                        let event_tx_clone = event_tx.clone();
                        let result = runtime.block_on(client.stream_reply(
                            session,
                            user_parts.clone(),
                            move |fragment| {
                                let _ = event_tx_clone.send(ChatEvent::Fragment {
                                    text: fragment.to_string(),
                                    request_id,
                                });
                            },
                        ));

                        match result {
                            Ok(full_text) => {
                                session.record_turn(user_parts, &full_text);
                                let _ = event_tx.send(ChatEvent::Complete {
                                    full_text,
                                    request_id,
                                });
                            }
                            Err(e) => {
                                error!("Reply stream failed: {}", e);
                                let _ = event_tx.send(ChatEvent::Failed {
                                    error: e.to_string(),
                                    request_id,
                                });
                            }
                        }
                    }

                    Ok(ChatCommand::ClearHistory) => {
                        info!("Clearing conversation history");
                        if let Some(session) = session.as_mut() {
                            session.clear();
                        }
                    }

                    Ok(ChatCommand::Shutdown) => {
                        info!("Chat pipeline worker shutting down");
                        let _ = event_tx.send(ChatEvent::Shutdown);
                        break;
                    }

                    Err(e) => {
                        error!("Command channel error: {}", e);
                        break;
                    }
                }
            }

            info!("Chat pipeline worker stopped");
        });

        Ok(())
    }
}

/// Assemble the user turn: inline image first (when present), then text.
/// An image-only message gets a stand-in prompt so the turn is never empty.
fn build_user_parts(text: &str, image: Option<ImagePayload>) -> Vec<Part> {
    let mut parts = Vec::new();

    let has_image = image.is_some();
    if let Some(inline_data) = image {
        parts.push(Part::InlineData { inline_data });
    }

    let text = text.trim();
    if !text.is_empty() {
        parts.push(Part::Text {
            text: text.to_string(),
        });
    } else if has_image {
        parts.push(Part::Text {
            text: IMAGE_ONLY_PROMPT.to_string(),
        });
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImagePayload {
        ImagePayload {
            mime_type: "image/png".to_string(),
            data: "QUJD".to_string(),
        }
    }

    #[test]
    fn test_pipeline_creation() {
        let pipeline = ChatPipeline::new(AppConfig::for_tests());

        let _cmd_tx = pipeline.command_sender();
        let _event_rx = pipeline.event_receiver();
    }

    #[test]
    fn test_text_only_parts() {
        let parts = build_user_parts("hello", None);
        assert_eq!(parts.len(), 1);
        match &parts[0] {
            Part::Text { text } => assert_eq!(text, "hello"),
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_image_with_text_keeps_image_first() {
        let parts = build_user_parts("what is this?", Some(image()));
        assert_eq!(parts.len(), 2);
        assert!(matches!(parts[0], Part::InlineData { .. }));
        match &parts[1] {
            Part::Text { text } => assert_eq!(text, "what is this?"),
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_image_only_gets_stand_in_prompt() {
        let parts = build_user_parts("   ", Some(image()));
        assert_eq!(parts.len(), 2);
        match &parts[1] {
            Part::Text { text } => assert_eq!(text, IMAGE_ONLY_PROMPT),
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_command_variants() {
        let cmd1 = ChatCommand::Send {
            text: "Hello".to_string(),
            image: None,
            request_id: Uuid::new_v4(),
        };
        let cmd2 = ChatCommand::ClearHistory;
        let cmd3 = ChatCommand::Shutdown;

        match cmd1 {
            ChatCommand::Send { .. } => {}
            _ => panic!("Wrong variant"),
        }
        match cmd2 {
            ChatCommand::ClearHistory => {}
            _ => panic!("Wrong variant"),
        }
        match cmd3 {
            ChatCommand::Shutdown => {}
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_event_variants() {
        let request_id = Uuid::new_v4();

        let _fragment = ChatEvent::Fragment {
            text: "Hi".to_string(),
            request_id,
        };
        let _complete = ChatEvent::Complete {
            full_text: "Hi there".to_string(),
            request_id,
        };
        let _failed = ChatEvent::Failed {
            error: "boom".to_string(),
            request_id,
        };
        let _shutdown = ChatEvent::Shutdown;
    }
}
