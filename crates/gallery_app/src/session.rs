//! Everything the host owns besides the window itself.
//!
//! The session queues input as it arrives and replays it at the start of the
//! next frame, so listeners only ever observe events between two updates.

use gallery_core::glam::Vec3;
use gallery_core::config::PaintingConfig;
use gallery_core::scene::{
    build_gallery, clamp_to_gallery, gallery::set_painting_aspect, pick_named,
    picking::pixel_to_ndc, GalleryHandles, TooltipQueue,
};
use gallery_core::{
    CameraHandle, EventDispatcher, FirstPersonController, GalleryConfig, InputEvent, MouseButton,
    Time, TimeClock, World,
};
use log::{debug, info, warn};

pub struct GallerySession {
    camera: CameraHandle,
    events: EventDispatcher,
    controller: FirstPersonController,
    world: World,
    gallery: GalleryHandles,
    clock: TimeClock,
    tooltips: TooltipQueue,
    pending: Vec<InputEvent>,
    window_size: (u32, u32),
    pose_log_interval: f64,
    last_pose_log: f64,
}

impl GallerySession {
    /// Builds the gallery, places the camera and attaches the controller.
    pub fn new(config: &GalleryConfig, window_size: (u32, u32)) -> Self {
        let mut camera = config.camera.build(1.0);
        camera.set_aspect_from_size(window_size.0, window_size.1);
        let camera = camera.into_handle();

        let mut events = EventDispatcher::new();
        let mut controller = FirstPersonController::new(&camera, &mut events);
        controller.apply_config(&config.controller);

        let mut world = World::new();
        let gallery = build_gallery(&mut world);
        hang_paintings(&mut world, &gallery, &config.paintings);
        info!("gallery built with {} elements", world.len());

        Self {
            camera,
            events,
            controller,
            world,
            gallery,
            clock: config.clock.build(),
            tooltips: TooltipQueue::new(),
            pending: Vec::new(),
            window_size,
            pose_log_interval: config.pose_log_interval,
            last_pose_log: 0.0,
        }
    }

    /// Queues `event` for the next frame.  A right button press also picks
    /// whatever named element lies under the cursor.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let InputEvent::PointerDown { button: MouseButton::Right, x, y } = event {
            let now = self.clock.peek().elapsed;
            self.pick_at((x, y), now);
        }
        self.pending.push(event);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
        self.camera.borrow_mut().set_aspect_from_size(width, height);
        debug!("viewport resized to {}x{}", width, height);
    }

    /// Ticks the clock and runs one frame.
    pub fn frame(&mut self) -> Time {
        let time = self.clock.tick();
        self.step(time);
        time
    }

    /// Runs one frame with an explicit time snapshot.
    pub fn step(&mut self, time: Time) {
        let pending = std::mem::take(&mut self.pending);
        self.events.dispatch_all(&pending);

        self.controller.update(time.delta);
        {
            let mut camera = self.camera.borrow_mut();
            let mut position = camera.position();
            clamp_to_gallery(&mut position);
            camera.set_position(position);
        }

        let expired = self.tooltips.expire(time.elapsed);
        if expired > 0 {
            debug!("{} tooltip(s) expired", expired);
        }

        if self.pose_log_interval > 0.0 && time.elapsed - self.last_pose_log >= self.pose_log_interval {
            self.last_pose_log = time.elapsed;
            let p = self.camera_position();
            info!(
                "camera at ({:.1}, {:.1}, {:.1}), lat {:.1}, lon {:.1}, {:.0} fps",
                p.x,
                p.y,
                p.z,
                self.controller.lat(),
                self.controller.lon(),
                time.fps
            );
        }
    }

    /// Casts a ray through the pixel `cursor` and shows the name of the
    /// nearest named element it crosses.
    pub fn pick_at(&mut self, cursor: (f64, f64), now: f64) -> Option<String> {
        let ndc = pixel_to_ndc(cursor, self.window_size)?;
        let ray = self.camera.borrow().ray_from_ndc(ndc);
        let hit = pick_named(&self.world, &ray)?;
        let name = hit.name?;
        info!("picked \"{}\" at distance {:.1}", name, hit.distance);
        self.tooltips.show(name.clone(), cursor, now);
        Some(name)
    }

    /// Detaches the controller from the event source.
    pub fn shutdown(&mut self) {
        if !self.controller.is_disposed() {
            self.controller.dispose(&mut self.events);
        }
        self.pending.clear();
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera.borrow().position()
    }

    pub fn camera(&self) -> &CameraHandle {
        &self.camera
    }

    pub fn controller(&self) -> &FirstPersonController {
        &self.controller
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn gallery(&self) -> &GalleryHandles {
        &self.gallery
    }

    pub fn tooltips(&self) -> &TooltipQueue {
        &self.tooltips
    }

    /// Text of the most recent tooltip still on screen.
    pub fn tooltip_text(&self) -> Option<&str> {
        self.tooltips.active().last().map(|t| t.text.as_str())
    }

    pub fn listener_count(&self) -> usize {
        self.events.len()
    }
}

/// Scales each configured painting to its image's aspect ratio.
fn hang_paintings(world: &mut World, gallery: &GalleryHandles, sizes: &[PaintingConfig]) {
    for size in sizes {
        let handle = world
            .find_by_name(&size.name)
            .filter(|h| gallery.paintings.contains(h));
        match handle {
            Some(handle) => {
                set_painting_aspect(world, handle, size.width, size.height);
                debug!("painting \"{}\" sized {}x{}", size.name, size.width, size.height);
            }
            None => warn!("no painting named \"{}\" in the gallery", size.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::scene::gallery::STATUE_NAME;
    use gallery_core::KeyCode;

    const EPS: f32 = 1e-4;

    fn at(elapsed: f64, delta: f32) -> Time {
        Time {
            delta,
            elapsed,
            frame_count: 0,
            fps: 0.0,
        }
    }

    fn session() -> GallerySession {
        GallerySession::new(&GalleryConfig::default(), (1280, 720))
    }

    #[test]
    fn first_frame_levels_camera_at_eye_height() {
        let mut s = session();
        s.step(at(0.0, 0.016));
        let p = s.camera_position();
        assert!((p - Vec3::new(-80.0, 8.0, 0.0)).length() < EPS);
        let f = s.camera().borrow().forward();
        assert!((f - Vec3::X).length() < 1e-3);
    }

    #[test]
    fn queued_keys_apply_on_next_frame() {
        let mut s = session();
        s.step(at(0.0, 0.0));
        s.handle_input(InputEvent::KeyDown { code: KeyCode::KeyW });
        assert!(!s.controller().movement().forward);

        s.step(at(1.0, 1.0));
        assert!(s.controller().movement().forward);
        let p = s.camera_position();
        assert!((p.x - (-65.0)).abs() < 1e-3);
        assert_eq!(p.y, 8.0);
    }

    #[test]
    fn walking_stops_at_the_far_wall() {
        let mut s = session();
        s.handle_input(InputEvent::KeyDown { code: KeyCode::ArrowUp });
        for i in 0..30 {
            s.step(at(i as f64, 1.0));
        }
        let p = s.camera_position();
        assert!((p.x - 98.0).abs() < EPS);
        assert!(p.z.abs() < EPS);
    }

    #[test]
    fn right_click_shows_statue_tooltip() {
        let mut s = session();
        s.step(at(0.0, 0.0));
        assert_eq!(s.pick_at((640.0, 360.0), 2.0).as_deref(), Some(STATUE_NAME));
        assert_eq!(s.tooltip_text(), Some(STATUE_NAME));
        assert_eq!(s.tooltips().active()[0].position, (640.0, 360.0));

        s.step(at(2.5, 0.0));
        assert_eq!(s.tooltip_text(), Some(STATUE_NAME));
        s.step(at(3.0, 0.0));
        assert_eq!(s.tooltip_text(), None);
    }

    #[test]
    fn looking_at_the_ceiling_picks_nothing() {
        let mut s = session();
        s.step(at(0.0, 0.0));
        assert_eq!(s.pick_at((640.0, 0.0), 0.0), None);
        assert_eq!(s.pick_at((640.0, 360.0), 0.0).as_deref(), Some(STATUE_NAME));
        assert_eq!(s.pick_at((1.0, 1.0), 0.0), None);
        let mut empty = GallerySession::new(&GalleryConfig::default(), (0, 0));
        assert_eq!(empty.pick_at((0.0, 0.0), 0.0), None);
    }

    #[test]
    fn shutdown_detaches_controller() {
        let mut s = session();
        assert_eq!(s.listener_count(), 5);
        s.handle_input(InputEvent::KeyDown { code: KeyCode::KeyD });
        s.shutdown();
        assert_eq!(s.listener_count(), 0);
        assert!(s.controller().is_disposed());
        s.step(at(1.0, 1.0));
        assert!(!s.controller().movement().right);
        s.shutdown();
    }

    #[test]
    fn slow_frames_walk_the_full_distance() {
        let mut s = session();
        s.handle_input(InputEvent::KeyDown { code: KeyCode::KeyW });
        s.frame();
        let before = s.camera_position().x;

        std::thread::sleep(std::time::Duration::from_millis(250));
        let time = s.frame();
        let moved = s.camera_position().x - before;
        assert!(time.delta >= 0.25, "delta {}", time.delta);
        assert!((moved - 15.0 * time.delta).abs() < 1e-3, "moved {moved}");
    }

    #[test]
    fn configured_paintings_take_image_aspect() {
        let mut config = GalleryConfig::default();
        config.paintings = vec![
            PaintingConfig {
                name: "Un monde imaginaire".to_string(),
                width: 1600,
                height: 1000,
            },
            PaintingConfig {
                name: STATUE_NAME.to_string(),
                width: 10,
                height: 1,
            },
        ];
        let s = GallerySession::new(&config, (1280, 720));
        let world = s.world();
        let scales: Vec<Vec3> = s
            .gallery()
            .paintings
            .iter()
            .map(|&h| world.get(h).unwrap().transform.scale)
            .collect();
        assert!(scales.contains(&Vec3::new(1.6, 1.0, 1.0)));
        assert!(scales.contains(&Vec3::ONE));
        let statue = world.get(s.gallery().statue).unwrap();
        assert_eq!(statue.transform.scale, Vec3::splat(0.8));
    }

    #[test]
    fn resize_updates_aspect() {
        let mut s = session();
        s.resize(1000, 500);
        assert!((s.camera().borrow().aspect - 2.0).abs() < EPS);
    }
}
