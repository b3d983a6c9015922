use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3};

use crate::scene::picking::Ray;
use crate::transform::Transform;

/// Shared camera handle.  The host owns it; controllers keep a weak
/// reference and only ever touch position and orientation.
pub type CameraHandle = Rc<RefCell<Camera>>;

/// Perspective camera used by the controller, the picker and (eventually) a
/// renderer.  Orientation lives in the transform's quaternion; `up` is the
/// world-up hint used by [`Camera::look_at`].
#[derive(Debug, Clone)]
pub struct Camera {
    // --- view parameters --------------------------------------------------
    pub transform: Transform,
    pub up: Vec3,
    // --- projection parameters --------------------------------------------
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            up: Vec3::Y,
            fovy: 45.0f32.to_radians(),
            aspect: 1.0,
            znear: 0.1,
            zfar: 500.0,
        }
    }
}

impl Camera {
    /// Camera at `position` with the default projection, looking down `−Z`.
    pub fn new(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            ..Default::default()
        }
    }

    /// Wrap into a shared handle.
    pub fn into_handle(self) -> CameraHandle {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Turn the camera so it faces `target`.
    pub fn look_at(&mut self, target: Vec3) {
        self.transform.look_at(target, self.up);
    }

    /// Move along the camera's local X axis (positive = right).
    pub fn translate_x(&mut self, distance: f32) {
        self.transform.translate_local(Vec3::X, distance);
    }

    /// Move along the camera's local Z axis (positive = backwards).
    pub fn translate_z(&mut self, distance: f32) {
        self.transform.translate_local(Vec3::Z, distance);
    }

    /// World-space view direction.
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.transform.position, self.forward(), self.transform.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// Build the combined view-projection matrix from the current parameters.
    pub fn build_view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio when viewport dimensions change.  A zero height
    /// leaves the aspect untouched.
    pub fn set_aspect_from_size(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Ray from the eye through a point given in normalised device
    /// coordinates (`x` right, `y` up, both in `[-1, 1]`).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let origin = self.transform.position;
        let inv = self.build_view_projection_matrix().inverse();
        let through = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(origin, through - origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_at_origin() -> Camera {
        let mut cam = Camera::new(Vec3::new(-80.0, 10.0, 0.0));
        cam.look_at(Vec3::new(0.0, 10.0, 0.0));
        cam
    }

    #[test]
    fn local_translation() {
        let mut cam = looking_at_origin();
        cam.translate_z(-5.0);
        assert!((cam.position() - Vec3::new(-75.0, 10.0, 0.0)).length() < 1e-4);
        cam.translate_x(2.0);
        assert!((cam.position() - Vec3::new(-75.0, 10.0, 2.0)).length() < 1e-4);
    }

    #[test]
    fn centre_ray_matches_forward() {
        let cam = looking_at_origin();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert!((ray.origin - cam.position()).length() < 1e-5);
        assert!((ray.direction - cam.forward()).length() < 1e-3);
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let cam = looking_at_origin();
        let p = cam
            .build_view_projection_matrix()
            .project_point3(Vec3::new(0.0, 10.0, 0.0));
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4);
    }

    #[test]
    fn aspect_ignores_zero_height() {
        let mut cam = Camera::default();
        cam.set_aspect_from_size(1280, 720);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        cam.set_aspect_from_size(800, 0);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
    }
}
