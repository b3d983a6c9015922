//! gallery_core: camera, first-person controller and gallery scene data.
//!
//! Nothing here opens a window or touches the GPU.  The host feeds
//! [`InputEvent`]s into an [`EventDispatcher`], ticks a [`TimeClock`] and
//! calls [`FirstPersonController::update`] once per frame.

pub mod color;
pub mod config;
pub mod events;
pub mod input;
pub mod scene;
pub mod time;
pub mod transform;

pub use color::Color;
pub use config::{ConfigError, GalleryConfig};
pub use events::{EventDispatcher, EventSource, InputListener, ListenerId};
pub use input::{EventKind, InputEvent, KeyCode, MouseButton};
pub use scene::{Camera, CameraHandle, FirstPersonController, World};
pub use time::{Time, TimeClock};
pub use transform::Transform;

// re-export glam so downstream crates use the same version
pub use glam;
