//! World-space transform: position, rotation (quaternion), scale.
//!
//! `Transform` is `Copy` and `Default`, making it easy to embed in any
//! struct.  Besides the model matrix it provides the two operations a
//! first-person camera needs: translation along a local axis and a
//! right-handed look-at.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Position, orientation and scale of a camera or scene element.
///
/// # Example
/// ```rust,ignore
/// use gallery_core::Transform;
/// use glam::Vec3;
///
/// let mut t = Transform::from_position(Vec3::new(-80.0, 10.0, 0.0));
/// t.look_at(Vec3::ZERO, Vec3::Y);
/// t.translate_local(Vec3::NEG_Z, 1.0); // one unit towards the origin
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Unit quaternion.
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Translated identity.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Model matrix, `T * R * S`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Move `distance` units along `axis` expressed in local space.
    pub fn translate_local(&mut self, axis: Vec3, distance: f32) {
        self.position += (self.rotation * axis) * distance;
    }

    /// Orient so that local `−Z` points at `target` with local `+Y` as close
    /// to `up` as possible.
    ///
    /// If `target` coincides with the position or the view direction is
    /// parallel to `up`, the rotation is left unchanged.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        let right = forward.cross(up).normalize_or_zero();
        if forward == Vec3::ZERO || right == Vec3::ZERO {
            return;
        }
        let true_up = right.cross(forward);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward)).normalize();
    }

    /// Local `-Z` in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn model_matrix_places_corners() {
        let t = Transform {
            position: Vec3::new(50.0, 0.5, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(0.8),
        };
        let p = t.matrix().transform_point3(Vec3::new(1.0, 10.0, 0.0));
        assert!(close(p, Vec3::new(50.8, 8.5, 0.0)));
        assert!(close(Transform::default().matrix().transform_point3(Vec3::ONE), Vec3::ONE));
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut t = Transform::from_position(Vec3::new(-80.0, 10.0, 0.0));
        t.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        assert!(close(t.forward(), Vec3::X));
        assert!(close(t.up(), Vec3::Y));
        assert!(close(t.right(), Vec3::Z));
    }

    #[test]
    fn degenerate_look_at_keeps_rotation() {
        let mut t = Transform::from_position(Vec3::ZERO);
        t.rotation = Quat::from_rotation_y(0.5);
        let before = t.rotation;
        t.look_at(Vec3::ZERO, Vec3::Y);
        assert_eq!(t.rotation, before);
        t.look_at(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert_eq!(t.rotation, before);
    }

    #[test]
    fn local_translation_follows_rotation() {
        let mut t = Transform {
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..Transform::IDENTITY
        };
        // after a +90° yaw, local -Z faces world -X
        t.translate_local(Vec3::NEG_Z, 2.0);
        assert!(close(t.position, Vec3::new(-2.0, 0.0, 0.0)));
    }
}
