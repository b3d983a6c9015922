//! Scene world: the container for everything the gallery shows.
//!
//! `World` uses a `HashMap` keyed by a monotonically-increasing `u64` ID so
//! that handles remain stable across insertions and removals.  Elements are
//! plain data (kind, transform, colour, shadow flags); a renderer reads them,
//! the picker intersects their bounds.
//!
//! # Quick start
//! ```rust,ignore
//! use gallery_core::scene::{World, ElementKind};
//! use glam::Vec3;
//!
//! let mut world = World::new();
//! let bench = world.spawn("Bench")
//!     .with_kind(ElementKind::Box { size: Vec3::new(20.0, 3.0, 5.0) })
//!     .with_position(Vec3::new(-50.0, 0.0, 0.0))
//!     .casts_shadow()
//!     .build();
//! world.despawn(bench);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Quat, Vec3};

use crate::color::Color;
use crate::scene::picking::Aabb;
use crate::transform::Transform;

// ─── ID generation ─────────────────────────────────────────────────────────

static ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

// ─── Handle ────────────────────────────────────────────────────────────────

/// Opaque handle referencing an element inside a [`World`].
///
/// Removing other elements does not invalidate a handle; it only becomes
/// invalid once its own element is despawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub u64);

// ─── Element kinds ─────────────────────────────────────────────────────────

/// Orthographic shadow camera of a directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    /// Shadow-map resolution in texels (square).
    pub map_size: u32,
    /// Half-extent of the orthographic projection (left/right/top/bottom).
    pub half_extent: f32,
    pub near: f32,
    pub far: f32,
    pub bias: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            map_size: 512,
            half_extent: 5.0,
            near: 0.5,
            far: 500.0,
            bias: 0.0,
        }
    }
}

/// The geometric or logical kind of an element.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ElementKind {
    /// A solid box centred on the element's position.
    Box { size: Vec3 },
    /// A horizontal plane (in XZ) centred on the element's position.
    Plane { width: f32, depth: f32 },
    /// Wireframe upper hemisphere, scaled per axis after construction.
    Dome {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        scale: Vec3,
    },
    /// An externally loaded model.  `bounds` is a local-space proxy used
    /// for picking until real geometry is available.
    Model { asset_key: String, bounds: Aabb },
    AmbientLight { intensity: f32 },
    DirectionalLight {
        intensity: f32,
        shadow: Option<ShadowSettings>,
    },
    PointLight { intensity: f32, range: f32 },
    /// An empty element used as a logical group or marker.
    #[default]
    Empty,
}

impl ElementKind {
    /// Local-space bounds, `None` for kinds without extent.
    pub fn local_bounds(&self) -> Option<Aabb> {
        match self {
            ElementKind::Box { size } => Some(Aabb::from_center_size(Vec3::ZERO, *size)),
            ElementKind::Plane { width, depth } => {
                Some(Aabb::from_center_size(Vec3::ZERO, Vec3::new(*width, 0.0, *depth)))
            }
            ElementKind::Dome { radius, scale, .. } => {
                let r = *radius * scale.abs();
                Some(Aabb::new(Vec3::new(-r.x, 0.0, -r.z), Vec3::new(r.x, r.y, r.z)))
            }
            ElementKind::Model { bounds, .. } => Some(*bounds),
            ElementKind::AmbientLight { .. }
            | ElementKind::DirectionalLight { .. }
            | ElementKind::PointLight { .. }
            | ElementKind::Empty => None,
        }
    }

    pub fn is_light(&self) -> bool {
        matches!(
            self,
            ElementKind::AmbientLight { .. }
                | ElementKind::DirectionalLight { .. }
                | ElementKind::PointLight { .. }
        )
    }
}

/// An image mapped onto an element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRef {
    pub path: String,
    /// Repeat count along U and V.
    pub repeat: (f32, f32),
}

// ─── Element ───────────────────────────────────────────────────────────────

/// Complete data for one scene element.
#[derive(Debug, Clone)]
pub struct Element {
    /// Unique, stable identifier (mirrors the HashMap key).
    pub id: u64,
    /// Display name shown by the tooltip.  Unnamed elements never answer a
    /// pick.
    pub name: Option<String>,
    pub transform: Transform,
    pub color: Color,
    pub texture: Option<TextureRef>,
    pub kind: ElementKind,
    pub visible: bool,
    pub pickable: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// Free-form tags ("wall", "painting", ...).
    pub tags: Vec<String>,
}

impl Element {
    fn new(id: u64, name: Option<String>) -> Self {
        Self {
            id,
            name,
            transform: Transform::default(),
            color: Color::WHITE,
            texture: None,
            kind: ElementKind::default(),
            visible: true,
            pickable: true,
            cast_shadow: false,
            receive_shadow: false,
            tags: Vec::new(),
        }
    }

    /// World-space bounds: the local bounds' corners pushed through the
    /// transform and re-boxed.
    pub fn world_bounds(&self) -> Option<Aabb> {
        let local = self.kind.local_bounds()?;
        let m = self.transform.matrix();
        Aabb::from_points(local.corners().iter().map(|&c| m.transform_point3(c)))
    }
}

// ─── Builder ───────────────────────────────────────────────────────────────

/// Fluent builder returned by [`World::spawn`].
pub struct ElementBuilder<'a> {
    world: &'a mut World,
    element: Element,
}

impl<'a> ElementBuilder<'a> {
    pub fn with_position(mut self, pos: Vec3) -> Self {
        self.element.transform.position = pos;
        self
    }

    pub fn with_rotation(mut self, rot: Quat) -> Self {
        self.element.transform.rotation = rot;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.element.transform.scale = scale;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.element.color = color;
        self
    }

    pub fn with_texture(mut self, path: impl Into<String>, repeat: (f32, f32)) -> Self {
        self.element.texture = Some(TextureRef {
            path: path.into(),
            repeat,
        });
        self
    }

    pub fn with_kind(mut self, kind: ElementKind) -> Self {
        self.element.kind = kind;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.element.tags.push(tag.into());
        self
    }

    pub fn casts_shadow(mut self) -> Self {
        self.element.cast_shadow = true;
        self
    }

    pub fn receives_shadow(mut self) -> Self {
        self.element.receive_shadow = true;
        self
    }

    /// Both cast and receive shadows.
    pub fn shadowed(self) -> Self {
        self.casts_shadow().receives_shadow()
    }

    pub fn not_pickable(mut self) -> Self {
        self.element.pickable = false;
        self
    }

    /// Insert the element and return its handle.
    pub fn build(self) -> Handle {
        let id = self.element.id;
        self.world.elements.insert(id, self.element);
        Handle(id)
    }
}

// ─── World ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct World {
    elements: HashMap<u64, Element>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin building a named element.
    pub fn spawn(&mut self, name: impl Into<String>) -> ElementBuilder<'_> {
        self.spawn_element(Some(name.into()))
    }

    /// Begin building an element without a name.
    pub fn spawn_unnamed(&mut self) -> ElementBuilder<'_> {
        self.spawn_element(None)
    }

    fn spawn_element(&mut self, name: Option<String>) -> ElementBuilder<'_> {
        let id = next_id();
        ElementBuilder {
            world: self,
            element: Element::new(id, name),
        }
    }

    /// Convenience: a box of `size` centred at `center`.
    pub fn spawn_box(&mut self, name: Option<&str>, center: Vec3, size: Vec3) -> Handle {
        self.spawn_element(name.map(str::to_string))
            .with_kind(ElementKind::Box { size })
            .with_position(center)
            .build()
    }

    /// Remove the element.  Returns `true` if it existed.
    pub fn despawn(&mut self, handle: Handle) -> bool {
        self.elements.remove(&handle.0).is_some()
    }

    pub fn set_position(&mut self, handle: Handle, pos: Vec3) {
        if let Some(e) = self.elements.get_mut(&handle.0) {
            e.transform.position = pos;
        }
    }

    pub fn position(&self, handle: Handle) -> Option<Vec3> {
        self.elements.get(&handle.0).map(|e| e.transform.position)
    }

    pub fn set_scale(&mut self, handle: Handle, scale: Vec3) {
        if let Some(e) = self.elements.get_mut(&handle.0) {
            e.transform.scale = scale;
        }
    }

    pub fn set_visible(&mut self, handle: Handle, visible: bool) {
        if let Some(e) = self.elements.get_mut(&handle.0) {
            e.visible = visible;
        }
    }

    pub fn has_tag(&self, handle: Handle, tag: &str) -> bool {
        self.elements
            .get(&handle.0)
            .map(|e| e.tags.iter().any(|t| t == tag))
            .unwrap_or(false)
    }

    pub fn get(&self, handle: Handle) -> Option<&Element> {
        self.elements.get(&handle.0)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Element> {
        self.elements.get_mut(&handle.0)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.elements.contains_key(&handle.0)
    }

    /// First element carrying exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<Handle> {
        self.elements
            .iter()
            .find(|(_, e)| e.name.as_deref() == Some(name))
            .map(|(&id, _)| Handle(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn iter_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements
            .values()
            .filter(move |e| e.tags.iter().any(|t| t == tag))
    }

    pub fn iter_with_handles(&self) -> impl Iterator<Item = (Handle, &Element)> {
        self.elements.iter().map(|(&id, e)| (Handle(id), e))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_despawn() {
        let mut w = World::new();
        let h = w.spawn_box(Some("A"), Vec3::ZERO, Vec3::ONE);
        assert!(w.contains(h));
        assert_eq!(w.len(), 1);
        assert!(w.despawn(h));
        assert!(!w.contains(h));
        assert!(w.is_empty());
    }

    #[test]
    fn handles_are_stable_after_other_despawn() {
        let mut w = World::new();
        let h1 = w.spawn_box(None, Vec3::ZERO, Vec3::ONE);
        let h2 = w.spawn_box(None, Vec3::ONE, Vec3::ONE);
        w.despawn(h1);
        assert!(w.contains(h2));
        assert_eq!(w.position(h2), Some(Vec3::ONE));
    }

    #[test]
    fn names_and_tags() {
        let mut w = World::new();
        let h = w.spawn("Painting").with_tag("painting").build();
        let anon = w.spawn_unnamed().build();
        assert_eq!(w.find_by_name("Painting"), Some(h));
        assert_eq!(w.find_by_name("Nope"), None);
        assert!(w.get(anon).unwrap().name.is_none());
        assert!(w.has_tag(h, "painting"));
        assert_eq!(w.iter_tagged("painting").count(), 1);
    }

    #[test]
    fn world_bounds_follow_transform() {
        let mut w = World::new();
        let h = w
            .spawn("Painting")
            .with_kind(ElementKind::Box { size: Vec3::new(10.0, 10.0, 0.5) })
            .with_position(Vec3::new(-50.0, 10.0, -49.0))
            .with_rotation(Quat::from_rotation_y(std::f32::consts::PI))
            .with_scale(Vec3::new(1.5, 1.0, 1.0))
            .build();
        let b = w.get(h).unwrap().world_bounds().unwrap();
        assert!((b.size() - Vec3::new(15.0, 10.0, 0.5)).length() < 1e-4);
        assert!((b.center() - Vec3::new(-50.0, 10.0, -49.0)).length() < 1e-4);
    }

    #[test]
    fn lights_have_no_bounds() {
        let kind = ElementKind::PointLight { intensity: 0.5, range: 50.0 };
        assert!(kind.is_light());
        assert_eq!(kind.local_bounds(), None);
        assert_eq!(ElementKind::Empty.local_bounds(), None);
    }

    #[test]
    fn dome_bounds_cover_scaled_hemisphere() {
        let dome = ElementKind::Dome {
            radius: 80.0,
            width_segments: 20,
            height_segments: 10,
            scale: Vec3::new(1.8, 0.5, 1.0),
        };
        let b = dome.local_bounds().unwrap();
        assert!((b.min - Vec3::new(-144.0, 0.0, -80.0)).length() < 1e-3);
        assert!((b.max - Vec3::new(144.0, 40.0, 80.0)).length() < 1e-3);
    }
}
