//! Aura: a voice-enabled AI chat assistant.

use anyhow::Result;
use aura::app::ChatController;
use aura::chat::ChatPipeline;
use aura::config::AppConfig;
use aura::speech::{NullSynthesizer, SpeechInput, SpeechOutput, UnsupportedRecognizer};
use aura::ui::AuraApp;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("aura=debug,info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Aura");

    let config = AppConfig::from_env()?;
    info!("Using model {}", config.model);

    let pipeline = ChatPipeline::new(config.clone());
    let command_tx = pipeline.command_sender();
    let event_rx = pipeline.event_receiver();
    pipeline.start_worker()?;

    let speech = SpeechOutput::new(Box::new(NullSynthesizer), &config.preferred_voice);
    let controller = ChatController::new(speech, command_tx, event_rx);
    let dictation = SpeechInput::new(Box::new(UnsupportedRecognizer));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Aura")
            .with_inner_size([480.0, 760.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Aura",
        options,
        Box::new(|cc| Ok(Box::new(AuraApp::new(cc, controller, dictation, None)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start UI: {e}"))?;

    Ok(())
}
