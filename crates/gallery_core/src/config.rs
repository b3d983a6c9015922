//! TOML configuration for the gallery.
//!
//! Every section is optional; missing fields fall back to the values the
//! gallery scene was designed around (camera at the south entrance, eye
//! height 8, walking speed 15).
//!
//! ```toml
//! log_level = "debug"
//!
//! [window]
//! title = "Gallery"
//! width = 1600
//! height = 900
//!
//! [camera]
//! position = [-80.0, 10.0, 0.0]
//!
//! [controller]
//! look_height = 8.0
//! move_speed = 15.0
//!
//! [[paintings]]
//! name = "Un monde imaginaire"
//! width = 1600
//! height = 1000
//! ```

use std::path::Path;

use glam::Vec3;
use serde::Deserialize;
use thiserror::Error;

use crate::scene::camera::Camera;
use crate::time::TimeClock;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Window parameters for the host application.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Gallery".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Starting pose and projection of the camera.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Initial look-at point, applied once before the controller takes over.
    pub look_at: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [-80.0, 10.0, 0.0],
            look_at: [0.0, 0.0, 0.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

impl CameraConfig {
    /// Builds the camera described by this section.
    pub fn build(&self, aspect: f32) -> Camera {
        let mut camera = Camera::new(Vec3::from_array(self.position));
        camera.fovy = self.fov_degrees.to_radians();
        camera.aspect = aspect;
        camera.znear = self.near;
        camera.zfar = self.far;
        camera.look_at(Vec3::from_array(self.look_at));
        camera
    }
}

/// Parameters of the first-person controller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub look_height: f32,
    pub move_speed: f32,
    pub enabled: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            look_height: 8.0,
            move_speed: 15.0,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Optional upper bound for a frame delta in seconds.  Unset, a slow
    /// frame moves the camera by the full elapsed time.
    pub max_delta: Option<f32>,
}

impl ClockConfig {
    pub fn build(&self) -> TimeClock {
        match self.max_delta {
            Some(max) => TimeClock::with_max_delta(max),
            None => TimeClock::new(),
        }
    }
}

/// Pixel size of the image hung on a painting, looked up by the painting's
/// name.  The painting's width is scaled to the image's aspect ratio.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaintingConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// Root of the configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controller: ControllerConfig,
    pub clock: ClockConfig,
    pub paintings: Vec<PaintingConfig>,
    /// Seconds between two camera-pose log lines; 0 disables them.
    pub pose_log_interval: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            controller: ControllerConfig::default(),
            clock: ClockConfig::default(),
            paintings: Vec::new(),
            pose_log_interval: 1.0,
        }
    }
}

impl GalleryConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
