//! Composer bar: attach, type or dictate, send.

use crate::composer::{Composer, ImageAttachment};
use crate::speech::{InputNotice, SpeechInput};
use crate::ui::theme::Theme;
use egui::{Button, Key, RichText, TextEdit, Ui};
use tracing::warn;

/// What the bar asked the application to do this frame.
#[derive(Debug)]
pub enum InputBarEvent {
    /// The user submitted the composer contents
    Send,
    /// Dictation raised a blocking notice
    Notice(InputNotice),
}

pub struct InputBar<'a> {
    composer: &'a mut Composer,
    dictation: &'a mut SpeechInput,
    theme: &'a Theme,
    busy: bool,
}

impl<'a> InputBar<'a> {
    pub fn new(
        composer: &'a mut Composer,
        dictation: &'a mut SpeechInput,
        theme: &'a Theme,
        busy: bool,
    ) -> Self {
        Self {
            composer,
            dictation,
            theme,
            busy,
        }
    }

    pub fn show(self, ui: &mut Ui) -> Option<InputBarEvent> {
        let mut event = None;

        if self.composer.attachment().is_some() {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("\u{1F5BC} Image attached")
                        .small()
                        .color(self.theme.text_secondary),
                );
                if ui.small_button("\u{2715}").clicked() {
                    self.composer.clear_attachment();
                }
            });
        }

        ui.horizontal(|ui| {
            if ui
                .add(Button::new("\u{1F4CE}").rounding(self.theme.button_rounding))
                .on_hover_text("Attach an image")
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
                    .pick_file()
                {
                    match ImageAttachment::from_path(&path) {
                        Ok(attachment) => self.composer.attach(attachment),
                        Err(e) => warn!("could not attach image: {}", e),
                    }
                }
            }

            let mic_label = if self.dictation.is_listening() {
                RichText::new("\u{1F399}").color(self.theme.listening)
            } else {
                RichText::new("\u{1F399}")
            };
            if ui
                .add(Button::new(mic_label).rounding(self.theme.button_rounding))
                .on_hover_text("Toggle voice input")
                .clicked()
            {
                if let Some(notice) = self.dictation.toggle() {
                    event = Some(InputBarEvent::Notice(notice));
                }
            }

            let send_size = 64.0;
            let text_width = ui.available_width() - send_size - ui.spacing().item_spacing.x;
            let hint = if self.dictation.is_listening() {
                "Listening..."
            } else {
                "Type your message"
            };
            let response = ui.add_sized(
                [text_width, 28.0],
                TextEdit::singleline(&mut self.composer.draft).hint_text(hint),
            );

            let can_send = self.composer.can_send() && !self.busy;
            let submitted = response.lost_focus()
                && ui.input(|i| i.key_pressed(Key::Enter));

            let send_clicked = ui
                .add_enabled(
                    can_send,
                    Button::new("Send").rounding(self.theme.button_rounding),
                )
                .clicked();

            if can_send && (submitted || send_clicked) {
                event = Some(InputBarEvent::Send);
                response.request_focus();
            }
        });

        event
    }
}
