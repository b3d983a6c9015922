use gallery_core::GalleryConfig;

/// Entry point of the host.  Builder over a [`GalleryConfig`].
pub struct App {
    config: GalleryConfig,
}

impl App {
    pub fn new(config: GalleryConfig) -> Self {
        Self { config }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.window.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.window.width = width;
        self.config.window.height = height;
        self
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Runs the event loop until the window is closed.
    pub fn run(self) -> anyhow::Result<()> {
        crate::runner::run_internal(self.config)
    }
}
