//! Desktop host for the gallery walk-through.
//!
//! Opens a window, turns its events into [`InputEvent`]s and drives a
//! [`GallerySession`] once per frame.
//!
//! ```rust,ignore
//! use gallery_app::App;
//! use gallery_core::GalleryConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     App::new(GalleryConfig::default())
//!         .with_title("Gallery")
//!         .run()
//! }
//! ```

pub mod builder;
pub mod logging;
mod runner;
pub mod session;
pub mod translate;

pub use builder::App;
pub use session::GallerySession;
pub use translate::PointerTracker;

pub use gallery_core::{GalleryConfig, InputEvent};
