use std::time::{Duration, Instant};

use anyhow::Context;
use gallery_core::GalleryConfig;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::session::GallerySession;
use crate::translate::PointerTracker;

/// Target spacing between two frames.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

struct Runner {
    config: GalleryConfig,
    window: Option<Window>,
    session: Option<GallerySession>,
    pointer: PointerTracker,
    next_frame: Instant,
    shown_title: Option<String>,
}

impl Runner {
    fn new(config: GalleryConfig) -> Self {
        Self {
            config,
            window: None,
            session: None,
            pointer: PointerTracker::new(),
            next_frame: Instant::now(),
            shown_title: None,
        }
    }

    /// The window title doubles as the tooltip surface.
    fn sync_title(&mut self) {
        let (Some(window), Some(session)) = (&self.window, &self.session) else {
            return;
        };
        let title = match session.tooltip_text() {
            Some(text) => format!("{} | {}", self.config.window.title, text),
            None => self.config.window.title.clone(),
        };
        if self.shown_title.as_deref() != Some(title.as_str()) {
            window.set_title(&title);
            self.shown_title = Some(title);
        }
    }
}

impl ApplicationHandler for Runner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(&self.config.window.title)
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                error!("could not create window: {err}");
                event_loop.exit();
                return;
            }
        };
        let size = window.inner_size();
        self.session = Some(GallerySession::new(&self.config, (size.width, size.height)));
        self.window = Some(window);
        self.next_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                session.shutdown();
                info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => session.resize(size.width, size.height),
            other => {
                if let Some(input) = self.pointer.translate(&other) {
                    session.handle_input(input);
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(session) = self.session.as_mut() {
                session.frame();
            }
            self.sync_title();
            self.next_frame = now + FRAME_INTERVAL;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

pub(crate) fn run_internal(config: GalleryConfig) -> anyhow::Result<()> {
    let mut runner = Runner::new(config);
    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + FRAME_INTERVAL));
    event_loop.run_app(&mut runner).context("event loop failed")?;
    Ok(())
}
