use anyhow::Result;

#[cfg(feature = "audio-io")]
fn main() -> Result<()> {
    use egui::ViewportBuilder;
    use soundbite::audio::SystemAudioDevice;
    use soundbite::sharing::SystemShare;
    use soundbite::ui::SoundbiteApp;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soundbite=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Soundbite");

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([420.0, 640.0])
            .with_min_inner_size([320.0, 480.0])
            .with_title("Soundbite"),
        ..Default::default()
    };

    eframe::run_native(
        "Soundbite",
        options,
        Box::new(|cc| {
            Ok(Box::new(SoundbiteApp::new(
                cc,
                SystemAudioDevice::new(),
                SystemShare,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI loop failed: {}", e))
}

#[cfg(not(feature = "audio-io"))]
fn main() -> Result<()> {
    anyhow::bail!("soundbite was built without the audio-io feature; nothing to run");
}
