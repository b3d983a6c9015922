//! First-person camera controller.
//!
//! The controller turns pointer drags into a spherical look direction
//! (`lat`/`lon` in degrees) and held movement keys into camera-local
//! translation.  It never owns the camera: it keeps a weak reference to the
//! host's [`CameraHandle`] and writes position and orientation in
//! [`FirstPersonController::update`], once per frame.
//!
//! Input arrives through an [`EventSource`].  Construction subscribes one
//! listener per [`EventKind`]; [`FirstPersonController::dispose`] removes
//! exactly those subscriptions again.
//!
//! ```rust,ignore
//! let camera = Camera::new(Vec3::new(-80.0, 10.0, 0.0)).into_handle();
//! let mut events = EventDispatcher::new();
//! let mut controller = FirstPersonController::new(&camera, &mut events);
//! controller.set_look_height(8.0);
//! controller.set_move_speed(15.0);
//!
//! // every frame, after the host has dispatched its queued input:
//! controller.update(clock.tick().delta);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::{Vec2, Vec3};
use log::{debug, warn};

use crate::config::ControllerConfig;
use crate::events::{EventSource, InputListener, ListenerId, ListenerRef};
use crate::input::{EventKind, KeyCode, MouseButton};
use crate::scene::camera::{Camera, CameraHandle};
use crate::scene::controller::{KeyBindings, MoveDirection, MovementFlags};

/// Degrees of longitude per pixel of horizontal drag.
pub const LON_PER_PIXEL: f32 = 0.2;
/// Degrees of latitude per pixel of vertical drag.
pub const LAT_PER_PIXEL: f32 = 0.1;
/// Latitude is clamped to `[-MAX_LATITUDE, MAX_LATITUDE]` degrees.
pub const MAX_LATITUDE: f32 = 85.0;
/// Distance from the eye to the synthetic look target.
pub const TARGET_DISTANCE: f32 = 10.0;

pub const DEFAULT_LOOK_HEIGHT: f32 = 1.5;
pub const DEFAULT_MOVE_SPEED: f32 = 2.0;

/// Initial longitude, in degrees, for a camera standing at `position`.
///
/// The camera starts facing the scene origin.  Only X/Z matter: the view
/// direction is `-(x, z)` normalised, and its angle to the reference
/// direction `(0, -1)` comes from `acos` of their dot product.  `acos` cannot
/// tell left from right, so the angle is negated when `x > 0`.  A camera
/// standing on the vertical axis gets a zero direction, hence a dot of 0 and
/// a longitude of 90°.
pub fn initial_longitude(position: Vec3) -> f32 {
    let view_dir = (-Vec2::new(position.x, position.z)).normalize_or_zero();
    let cos = view_dir.dot(Vec2::new(0.0, -1.0)).clamp(-1.0, 1.0);
    let mut theta = cos.acos();
    if position.x > 0.0 {
        theta = -theta;
    }
    theta.to_degrees()
}

/// Offset from the eye to the look target for the given spherical angles
/// (radians).
pub fn look_offset(phi: f32, theta: f32) -> Vec3 {
    TARGET_DISTANCE
        * Vec3::new(
            phi.sin() * theta.sin(),
            phi.cos(),
            -phi.sin() * theta.cos(),
        )
}

// ─── Event-driven state ────────────────────────────────────────────────────

/// Everything the input callbacks mutate.  Shared between the controller and
/// its subscriptions.
#[derive(Debug, Clone)]
struct LookState {
    keys: KeyBindings,
    movement: MovementFlags,
    mouse_down: bool,
    mouse: (f64, f64),
    prev_mouse: (f64, f64),
    lat: f32,
    lon: f32,
    phi: f32,
    theta: f32,
}

impl LookState {
    fn new(keys: KeyBindings, lon: f32) -> Self {
        let lat = 0.0;
        Self {
            keys,
            movement: MovementFlags::default(),
            mouse_down: false,
            mouse: (0.0, 0.0),
            prev_mouse: (0.0, 0.0),
            lat,
            lon,
            phi: (90.0 - lat).to_radians(),
            theta: lon.to_radians(),
        }
    }

    fn set_key(&mut self, code: KeyCode, pressed: bool) {
        if let Some(direction) = self.keys.direction(code) {
            self.movement.set(direction, pressed);
        }
    }
}

impl InputListener for LookState {
    fn on_pointer_down(&mut self, button: MouseButton, x: f64, y: f64) {
        if button == MouseButton::Left {
            self.mouse_down = true;
            self.mouse = (x, y);
        }
    }

    fn on_pointer_up(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.mouse_down = false;
        }
    }

    fn on_pointer_move(&mut self, x: f64, y: f64) {
        if !self.mouse_down {
            return;
        }
        self.prev_mouse = self.mouse;
        self.mouse = (x, y);

        let dx = (self.mouse.0 - self.prev_mouse.0) as f32;
        let dy = (self.mouse.1 - self.prev_mouse.1) as f32;
        self.lon += dx * LON_PER_PIXEL;
        // screen Y grows downwards: dragging up looks up
        self.lat -= dy * LAT_PER_PIXEL;
        self.lat = self.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        self.phi = (90.0 - self.lat).to_radians();
        self.theta = self.lon.to_radians();
    }

    fn on_key_down(&mut self, code: KeyCode) {
        self.set_key(code, true);
    }

    fn on_key_up(&mut self, code: KeyCode) {
        self.set_key(code, false);
    }
}

// ─── Controller ────────────────────────────────────────────────────────────

/// First-person walk controller.  See the module docs for the lifecycle.
pub struct FirstPersonController {
    camera: Weak<RefCell<Camera>>,
    state: Rc<RefCell<LookState>>,
    subscriptions: Vec<ListenerId>,
    target: Vec3,
    look_height: f32,
    move_speed: f32,
    enabled: bool,
    camera_lost: bool,
}

impl FirstPersonController {
    /// Creates a controller for `camera` with the WASD + arrows layout and
    /// subscribes it to `events`.
    pub fn new<S: EventSource + ?Sized>(camera: &CameraHandle, events: &mut S) -> Self {
        Self::with_bindings(camera, events, KeyBindings::with_default_layout())
    }

    /// Same as [`new`](Self::new) with a custom key table.
    pub fn with_bindings<S: EventSource + ?Sized>(
        camera: &CameraHandle,
        events: &mut S,
        keys: KeyBindings,
    ) -> Self {
        let position = camera.borrow().position();
        let lon = initial_longitude(position);
        let state = Rc::new(RefCell::new(LookState::new(keys, lon)));

        let listener: ListenerRef = state.clone();
        let subscriptions: Vec<ListenerId> = EventKind::ALL
            .iter()
            .map(|&kind| events.add_listener(kind, listener.clone()))
            .collect();
        debug!(
            "first-person controller subscribed {} listeners, start lon {:.2}°",
            subscriptions.len(),
            lon
        );

        Self {
            camera: Rc::downgrade(camera),
            state,
            subscriptions,
            target: Vec3::ZERO,
            look_height: DEFAULT_LOOK_HEIGHT,
            move_speed: DEFAULT_MOVE_SPEED,
            enabled: true,
            camera_lost: false,
        }
    }

    // ── Configuration ──────────────────────────────────────────────────────

    /// Eye height enforced at the end of every enabled `update`.
    pub fn set_look_height(&mut self, look_height: f32) {
        self.look_height = look_height;
    }

    /// Translation rate in world units per second.  Not validated.
    pub fn set_move_speed(&mut self, move_speed: f32) {
        self.move_speed = move_speed;
    }

    /// A disabled controller still tracks input but `update` does nothing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Applies every field of `config`.
    pub fn apply_config(&mut self, config: &ControllerConfig) {
        self.set_look_height(config.look_height);
        self.set_move_speed(config.move_speed);
        self.set_enabled(config.enabled);
    }

    /// Binds an additional key to a movement direction.
    pub fn bind_key(&mut self, key: KeyCode, direction: MoveDirection) {
        self.state.borrow_mut().keys.bind(key, direction);
    }

    // ── Per-frame update ───────────────────────────────────────────────────

    /// Integrates one frame of `delta_seconds`.
    ///
    /// Each held direction moves the camera `move_speed * delta_seconds`
    /// along its local axis.  Directions are applied one after another and
    /// the sum is not normalised, so diagonal walking is faster.  The camera
    /// then looks at the target derived from the post-move position and its
    /// height is reset to the eye height.
    pub fn update(&mut self, delta_seconds: f32) {
        if !self.enabled {
            return;
        }
        let Some(camera) = self.camera.upgrade() else {
            if !self.camera_lost {
                warn!("first-person controller updated after its camera was dropped");
                self.camera_lost = true;
            }
            return;
        };
        let mut camera = camera.borrow_mut();
        let state = self.state.borrow();

        let step = self.move_speed * delta_seconds;
        if state.movement.forward {
            camera.translate_z(-step);
        }
        if state.movement.backward {
            camera.translate_z(step);
        }
        if state.movement.left {
            camera.translate_x(-step);
        }
        if state.movement.right {
            camera.translate_x(step);
        }

        let target = camera.position() + look_offset(state.phi, state.theta);
        camera.look_at(target);
        camera.transform.position.y = self.look_height;
        self.target = target;
    }

    // ── Teardown ───────────────────────────────────────────────────────────

    /// Removes every subscription made at construction time.  Calling it a
    /// second time only logs a warning.
    pub fn dispose<S: EventSource + ?Sized>(&mut self, events: &mut S) {
        if self.subscriptions.is_empty() {
            warn!("first-person controller disposed twice");
            return;
        }
        let count = self.subscriptions.len();
        for id in self.subscriptions.drain(..) {
            if !events.remove_listener(id) {
                warn!("listener {:?} was not registered with this event source", id);
            }
        }
        debug!("first-person controller removed {} listeners", count);
    }

    pub fn is_disposed(&self) -> bool {
        self.subscriptions.is_empty()
    }

    // ── Read access ────────────────────────────────────────────────────────

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn look_height(&self) -> f32 {
        self.look_height
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Latitude in degrees, within `[-85, 85]`.
    pub fn lat(&self) -> f32 {
        self.state.borrow().lat
    }

    /// Longitude in degrees, unbounded.
    pub fn lon(&self) -> f32 {
        self.state.borrow().lon
    }

    /// Polar angle in radians, `(90 - lat)` converted.
    pub fn phi(&self) -> f32 {
        self.state.borrow().phi
    }

    /// Azimuth in radians, `lon` converted.
    pub fn theta(&self) -> f32 {
        self.state.borrow().theta
    }

    pub fn movement(&self) -> MovementFlags {
        self.state.borrow().movement
    }

    pub fn is_mouse_down(&self) -> bool {
        self.state.borrow().mouse_down
    }

    pub fn mouse_position(&self) -> (f64, f64) {
        self.state.borrow().mouse
    }

    pub fn previous_mouse_position(&self) -> (f64, f64) {
        self.state.borrow().prev_mouse
    }

    /// Look target computed by the last enabled `update`.
    pub fn target(&self) -> Vec3 {
        self.target
    }
}
