use anyhow::Context;
use gallery_app::{logging, App};
use gallery_core::GalleryConfig;

/// `gallery [config.toml]`
fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => GalleryConfig::load(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => GalleryConfig::default(),
    };
    logging::init(&config.log_level)?;
    log::info!(
        "starting gallery: {}x{}, look height {}, speed {}",
        config.window.width,
        config.window.height,
        config.controller.look_height,
        config.controller.move_speed
    );
    App::new(config).run()
}
