//! The streaming response handler: owns the transcript, the loading
//! flag, and the speech output, and applies chat events in arrival order.

use crate::chat::prompts::{APOLOGY, SPOKEN_GREETING, WELCOME_MESSAGE};
use crate::chat::{ChatCommand, ChatEvent, ChatPipeline};
use crate::composer::ImageAttachment;
use crate::speech::SpeechOutput;
use crate::transcript::{Message, Transcript};
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};
use uuid::Uuid;

/// The reply currently streaming into the transcript.
struct PendingReply {
    request_id: Uuid,
    message_id: Uuid,
    accumulator: String,
}

/// Coordinates one exchange at a time: user message in, placeholder out,
/// fragments merged in order, final text spoken.
pub struct ChatController {
    transcript: Transcript,
    speech: SpeechOutput,
    command_tx: Sender<ChatCommand>,
    event_rx: Receiver<ChatEvent>,
    is_loading: bool,
    pending: Option<PendingReply>,
    last_error: Option<String>,
}

impl ChatController {
    pub fn new(
        speech: SpeechOutput,
        command_tx: Sender<ChatCommand>,
        event_rx: Receiver<ChatEvent>,
    ) -> Self {
        let transcript = Transcript::new();
        transcript.push(Message::model(WELCOME_MESSAGE));

        Self {
            transcript,
            speech,
            command_tx,
            event_rx,
            is_loading: false,
            pending: None,
            last_error: None,
        }
    }

    pub fn from_pipeline(speech: SpeechOutput, pipeline: &ChatPipeline) -> Self {
        Self::new(speech, pipeline.command_sender(), pipeline.event_receiver())
    }

    /// Speak the startup greeting (deferred until voices are available).
    pub fn startup(&mut self) {
        self.speech.greet(SPOKEN_GREETING);
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn speech(&self) -> &SpeechOutput {
        &self.speech
    }

    pub fn speech_mut(&mut self) -> &mut SpeechOutput {
        &mut self.speech
    }

    /// Start a new exchange. A no-op while a request is in flight (the
    /// send affordance is disabled, this is the backstop) or when the
    /// message is empty. Starting a send interrupts any ongoing speech.
    pub fn send_message(&mut self, text: String, image: Option<ImageAttachment>) {
        if self.is_loading {
            debug!("send ignored: request already in flight");
            return;
        }
        if text.trim().is_empty() && image.is_none() {
            return;
        }

        self.speech.cancel();
        self.last_error = None;

        let display_image = image.as_ref().map(|a| a.data_uri().to_string());
        self.transcript.push(Message::user(text.clone(), display_image));

        let message_id = self.transcript.push(Message::model_placeholder());
        let request_id = Uuid::new_v4();

        let command = ChatCommand::Send {
            text,
            image: image.map(|a| a.payload()),
            request_id,
        };

        if let Err(e) = self.command_tx.send(command) {
            warn!("chat pipeline unavailable: {}", e);
            self.transcript.finalize(message_id);
            self.fail_exchange(e.to_string());
            return;
        }

        self.pending = Some(PendingReply {
            request_id,
            message_id,
            accumulator: String::new(),
        });
        self.is_loading = true;
    }

    /// Drain pipeline events, applying each fragment before the next is
    /// read so the transcript always shows the received prefix.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                ChatEvent::Fragment { text, request_id } => {
                    if let Some(pending) = self.pending.as_mut() {
                        if pending.request_id != request_id {
                            continue;
                        }
                        pending.accumulator.push_str(&text);
                        self.transcript
                            .apply_fragment(pending.message_id, &pending.accumulator);
                    }
                }

                ChatEvent::Complete {
                    full_text,
                    request_id,
                } => {
                    // Take only on an id match; a stale event must not
                    // disturb the active exchange
                    let Some(pending) =
                        self.pending.take_if(|p| p.request_id == request_id)
                    else {
                        continue;
                    };

                    self.transcript.finalize(pending.message_id);
                    if !full_text.is_empty() {
                        self.speech.speak(&full_text);
                    }
                    self.is_loading = false;
                }

                ChatEvent::Failed { error, request_id } => {
                    let Some(pending) =
                        self.pending.take_if(|p| p.request_id == request_id)
                    else {
                        continue;
                    };

                    self.transcript.finalize(pending.message_id);
                    self.fail_exchange(error);
                }

                ChatEvent::Shutdown => {
                    debug!("chat pipeline shut down");
                }
            }
        }
    }

    /// Reset the transcript to the welcome message and drop the model's
    /// conversation history. An in-flight exchange is abandoned: its
    /// messages are gone, so its events are dropped as stale and its
    /// reply is never spoken.
    pub fn clear_chat(&mut self) {
        self.speech.cancel();
        self.pending = None;
        self.is_loading = false;
        self.transcript.clear();
        self.transcript.push(Message::model(WELCOME_MESSAGE));
        let _ = self.command_tx.send(ChatCommand::ClearHistory);
    }

    /// Teardown: stop speaking and ask the worker to exit.
    pub fn shutdown(&mut self) {
        self.speech.shutdown();
        let _ = self.command_tx.send(ChatCommand::Shutdown);
    }

    /// The failure path of an exchange: one terminal apology message,
    /// spoken, with the loading state cleared unconditionally.
    fn fail_exchange(&mut self, error: String) {
        warn!("exchange failed: {}", error);
        self.transcript.push(Message::model(APOLOGY));
        self.speech.speak(APOLOGY);
        self.last_error = Some(error);
        self.is_loading = false;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::output::NullSynthesizer;
    use crate::transcript::Role;
    use crossbeam_channel::bounded;

    fn controller() -> (ChatController, Receiver<ChatCommand>, Sender<ChatEvent>) {
        let (command_tx, command_rx) = bounded(16);
        let (event_tx, event_rx) = bounded(16);
        let speech = SpeechOutput::new(Box::new(NullSynthesizer), "Google US English");
        (
            ChatController::new(speech, command_tx, event_rx),
            command_rx,
            event_tx,
        )
    }

    fn request_id_of(command_rx: &Receiver<ChatCommand>) -> Uuid {
        match command_rx.try_recv().unwrap() {
            ChatCommand::Send { request_id, .. } => request_id,
            other => panic!("expected send command, got {other:?}"),
        }
    }

    #[test]
    fn test_starts_with_welcome_message() {
        let (controller, _rx, _tx) = controller();
        let all = controller.transcript().get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].role, Role::Model);
        assert_eq!(all[0].text, WELCOME_MESSAGE);
    }

    #[test]
    fn test_send_appends_user_then_placeholder() {
        let (mut controller, command_rx, _tx) = controller();
        controller.send_message("Hello".to_string(), None);

        let all = controller.transcript().get_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].role, Role::User);
        assert_eq!(all[1].text, "Hello");
        assert_eq!(all[2].role, Role::Model);
        assert!(all[2].is_thinking);
        assert!(controller.is_loading());

        assert!(matches!(
            command_rx.try_recv().unwrap(),
            ChatCommand::Send { .. }
        ));
    }

    #[test]
    fn test_fragments_build_prefixes_in_order() {
        let (mut controller, command_rx, event_tx) = controller();
        controller.send_message("Hello".to_string(), None);
        let request_id = request_id_of(&command_rx);

        event_tx
            .send(ChatEvent::Fragment {
                text: "Hi".to_string(),
                request_id,
            })
            .unwrap();
        controller.poll_events();

        let reply = controller.transcript().last().unwrap();
        assert_eq!(reply.text, "Hi");
        assert!(!reply.is_thinking);

        event_tx
            .send(ChatEvent::Fragment {
                text: " there".to_string(),
                request_id,
            })
            .unwrap();
        event_tx
            .send(ChatEvent::Complete {
                full_text: "Hi there".to_string(),
                request_id,
            })
            .unwrap();
        controller.poll_events();

        let reply = controller.transcript().last().unwrap();
        assert_eq!(reply.text, "Hi there");
        assert!(!reply.is_thinking);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_send_while_loading_is_noop() {
        let (mut controller, _command_rx, _event_tx) = controller();
        controller.send_message("first".to_string(), None);
        let len = controller.transcript().len();

        controller.send_message("second".to_string(), None);
        assert_eq!(controller.transcript().len(), len);
    }

    #[test]
    fn test_empty_send_is_noop() {
        let (mut controller, _command_rx, _event_tx) = controller();
        controller.send_message("   ".to_string(), None);
        assert_eq!(controller.transcript().len(), 1);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_failure_appends_one_apology_and_clears_loading() {
        let (mut controller, command_rx, event_tx) = controller();
        controller.send_message("Hello".to_string(), None);
        let request_id = request_id_of(&command_rx);
        let len_before = controller.transcript().len();

        event_tx
            .send(ChatEvent::Failed {
                error: "connection reset".to_string(),
                request_id,
            })
            .unwrap();
        controller.poll_events();

        let all = controller.transcript().get_all();
        assert_eq!(all.len(), len_before + 1);
        assert_eq!(all.last().unwrap().text, APOLOGY);
        assert!(!all.last().unwrap().is_thinking);
        assert!(!controller.is_loading());
        assert_eq!(controller.last_error(), Some("connection reset"));
    }

    #[test]
    fn test_stale_events_ignored() {
        let (mut controller, command_rx, event_tx) = controller();
        controller.send_message("Hello".to_string(), None);
        let _request_id = request_id_of(&command_rx);

        event_tx
            .send(ChatEvent::Fragment {
                text: "stale".to_string(),
                request_id: Uuid::new_v4(),
            })
            .unwrap();
        controller.poll_events();

        let reply = controller.transcript().last().unwrap();
        assert!(reply.text.is_empty());
        assert!(reply.is_thinking);
    }

    #[test]
    fn test_stale_complete_does_not_drop_active_exchange() {
        let (mut controller, command_rx, event_tx) = controller();
        controller.send_message("Hello".to_string(), None);
        let request_id = request_id_of(&command_rx);

        event_tx
            .send(ChatEvent::Complete {
                full_text: "stale".to_string(),
                request_id: Uuid::new_v4(),
            })
            .unwrap();
        event_tx
            .send(ChatEvent::Complete {
                full_text: "Hi there".to_string(),
                request_id,
            })
            .unwrap();
        controller.poll_events();

        let reply = controller.transcript().last().unwrap();
        assert_eq!(reply.text, "Hi there");
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_stale_failure_does_not_drop_active_exchange() {
        let (mut controller, command_rx, event_tx) = controller();
        controller.send_message("Hello".to_string(), None);
        let request_id = request_id_of(&command_rx);
        let len_before = controller.transcript().len();

        event_tx
            .send(ChatEvent::Failed {
                error: "stale".to_string(),
                request_id: Uuid::new_v4(),
            })
            .unwrap();
        controller.poll_events();

        // No apology, still loading
        assert_eq!(controller.transcript().len(), len_before);
        assert!(controller.is_loading());
        assert!(controller.last_error().is_none());

        event_tx
            .send(ChatEvent::Complete {
                full_text: "Hi".to_string(),
                request_id,
            })
            .unwrap();
        controller.poll_events();
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_clear_chat_abandons_in_flight_exchange() {
        let (mut controller, command_rx, event_tx) = controller();
        controller.send_message("Hello".to_string(), None);
        let request_id = request_id_of(&command_rx);

        controller.clear_chat();
        assert!(!controller.is_loading());

        event_tx
            .send(ChatEvent::Complete {
                full_text: "orphaned".to_string(),
                request_id,
            })
            .unwrap();
        controller.poll_events();

        let all = controller.transcript().get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, WELCOME_MESSAGE);
    }

    #[test]
    fn test_clear_chat_resets_to_welcome() {
        let (mut controller, command_rx, event_tx) = controller();
        controller.send_message("Hello".to_string(), None);
        let request_id = request_id_of(&command_rx);
        event_tx
            .send(ChatEvent::Complete {
                full_text: "Hi".to_string(),
                request_id,
            })
            .unwrap();
        controller.poll_events();

        controller.clear_chat();
        let all = controller.transcript().get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, WELCOME_MESSAGE);
        assert!(matches!(
            command_rx.try_recv().unwrap(),
            ChatCommand::ClearHistory
        ));
    }
}
