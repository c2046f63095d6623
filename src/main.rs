mod app;
mod config;
mod generator;
mod layout;
mod models;
mod placeholder;
mod ui;

use app::GalleryApp;
use config::GalleryConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("masonry_gallery=info".parse().unwrap()),
        )
        .init();

    let config = match GalleryConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "Invalid configuration, using defaults");
            GalleryConfig::default()
        }
    };
    tracing::info!(
        batch_size = config.batch_size,
        max_images = config.max_images,
        cap_policy = ?config.cap_policy,
        "Starting gallery"
    );

    let app = GalleryApp::new(config);
    std::process::exit(app.run());
}
