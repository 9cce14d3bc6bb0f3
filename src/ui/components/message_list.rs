//! Scrollable chat transcript.

use crate::transcript::{Message, Role};
use crate::ui::theme::Theme;
use chrono::Local;
use egui::{Align, Frame, Layout, Margin, RichText, ScrollArea, Ui};

/// Renders the transcript as role-aligned bubbles, newest at the bottom.
pub struct MessageList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self { messages, theme }
    }

    pub fn show(self, ui: &mut Ui) {
        ScrollArea::vertical()
            .id_salt("message_list")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(self.theme.spacing_sm);
                for message in self.messages {
                    self.message_bubble(ui, message);
                    ui.add_space(self.theme.spacing_sm);
                }
            });
    }

    fn message_bubble(&self, ui: &mut Ui, message: &Message) {
        let is_user = message.role == Role::User;
        let (fill, align) = if is_user {
            (self.theme.user_bubble, Align::Max)
        } else {
            (self.theme.assistant_bubble, Align::Min)
        };
        let max_width = ui.available_width() * 0.8;

        ui.with_layout(Layout::top_down(align), |ui| {
            Frame::none()
                .fill(fill)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);

                    ui.horizontal(|ui| {
                        let sender = if is_user { "You" } else { "Aura" };
                        ui.label(
                            RichText::new(sender)
                                .small()
                                .strong()
                                .color(self.theme.text_secondary),
                        );
                        let local = message.timestamp.with_timezone(&Local);
                        ui.label(
                            RichText::new(local.format("%H:%M").to_string())
                                .small()
                                .color(self.theme.text_muted),
                        );
                    });

                    if message.image.is_some() {
                        ui.label(
                            RichText::new("\u{1F5BC} Image attached")
                                .small()
                                .color(self.theme.text_muted),
                        );
                    }

                    if message.is_thinking && message.text.is_empty() {
                        self.typing_indicator(ui);
                    } else {
                        ui.label(
                            RichText::new(&message.text).color(self.theme.text_primary),
                        );
                    }
                });
        });
    }

    /// Pulsing dots while the placeholder has no text yet.
    fn typing_indicator(&self, ui: &mut Ui) {
        let t = ui.ctx().input(|i| i.time);
        let dots = ((t * 2.5) as usize % 3) + 1;
        ui.label(
            RichText::new(".".repeat(dots))
                .strong()
                .color(self.theme.text_muted),
        );
        ui.ctx().request_repaint();
    }
}
