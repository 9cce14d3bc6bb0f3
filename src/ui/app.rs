//! The eframe application shell.

use crate::app::ChatController;
use crate::composer::Composer;
use crate::speech::{DictationOutcome, InputNotice, RecognitionEvent, SpeechInput};
use crate::ui::components::{InputBar, InputBarEvent, MessageList};
use crate::ui::theme::Theme;
use crossbeam_channel::Receiver;
use egui::{CentralPanel, RichText, TopBottomPanel};

/// Aura: a voice-enabled chat window over the streaming pipeline.
pub struct AuraApp {
    controller: ChatController,
    composer: Composer,
    dictation: SpeechInput,
    /// Terminal signals from the platform recognition engine, if one exists.
    recognition_rx: Option<Receiver<RecognitionEvent>>,
    theme: Theme,
    notice: Option<InputNotice>,
    started: bool,
}

impl AuraApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        controller: ChatController,
        dictation: SpeechInput,
        recognition_rx: Option<Receiver<RecognitionEvent>>,
    ) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self {
            controller,
            composer: Composer::new(),
            dictation,
            recognition_rx,
            theme,
            notice: None,
            started: false,
        }
    }

    fn poll_recognition(&mut self) {
        let Some(rx) = &self.recognition_rx else {
            return;
        };
        let events: Vec<RecognitionEvent> = rx.try_iter().collect();
        for event in events {
            match self.dictation.on_event(event) {
                Some(DictationOutcome::Transcript(text)) => {
                    self.composer.push_transcript(&text);
                }
                Some(DictationOutcome::Notice(notice)) => {
                    self.notice = Some(notice);
                }
                None => {}
            }
        }
    }

    fn header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(RichText::new("Aura").color(self.theme.primary));
            ui.label(
                RichText::new("AI Assistant")
                    .small()
                    .color(self.theme.text_muted),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mute_icon = if self.controller.speech().is_muted() {
                    "\u{1F507}"
                } else {
                    "\u{1F50A}"
                };
                if ui
                    .button(mute_icon)
                    .on_hover_text("Toggle speech output")
                    .clicked()
                {
                    self.controller.speech_mut().toggle_mute();
                }

                if ui
                    .button("\u{1F5D1}")
                    .on_hover_text("Clear conversation")
                    .clicked()
                {
                    self.controller.clear_chat();
                }
            });
        });
    }

    fn notice_modal(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notice else {
            return;
        };

        egui::Window::new("Voice input")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice.message());
                ui.add_space(self.theme.spacing_sm);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        self.notice = None;
                    }
                });
            });
    }
}

impl eframe::App for AuraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.started {
            self.started = true;
            self.controller.startup();
        }

        self.controller.poll_events();
        self.controller.speech_mut().poll();
        self.poll_recognition();

        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(self.theme.spacing_sm);
            self.header(ui);
            ui.add_space(self.theme.spacing_sm);
        });

        TopBottomPanel::bottom("input_bar").show(ctx, |ui| {
            ui.add_space(self.theme.spacing_sm);
            let bar = InputBar::new(
                &mut self.composer,
                &mut self.dictation,
                &self.theme,
                self.controller.is_loading(),
            );
            match bar.show(ui) {
                Some(InputBarEvent::Send) => {
                    let (text, attachment) = self.composer.take();
                    self.controller.send_message(text, attachment);
                }
                Some(InputBarEvent::Notice(notice)) => {
                    self.notice = Some(notice);
                }
                None => {}
            }
            ui.add_space(self.theme.spacing_sm);
        });

        CentralPanel::default().show(ctx, |ui| {
            let messages = self.controller.transcript().get_all();
            MessageList::new(&messages, &self.theme).show(ui);
        });

        self.notice_modal(ctx);

        if self.controller.is_loading() || self.dictation.is_listening() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.shutdown();
    }
}
