//! Ray picking and the name tooltip.
//!
//! The picker casts a ray through the cursor, intersects it with the
//! world-space bounds of every pickable element and reports the nearest one
//! that carries a name.  Unnamed geometry (walls, floor) does not block the
//! pick, so a painting behind a wall still answers.

use glam::{Vec2, Vec3};

use crate::scene::world::{Handle, World};

/// How long a tooltip stays on screen, in seconds.
pub const TOOLTIP_LIFETIME: f64 = 0.8;

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// `direction` is normalised; a zero direction stays zero and never hits.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }

    /// Smallest box containing every point of `points`.  `None` if empty.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The eight corners.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Distance along `ray` to the first intersection (slab method).
    /// A ray starting inside the box hits at `0`.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        if ray.direction == Vec3::ZERO {
            return None;
        }
        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

/// Convert a cursor position in pixels to normalised device coordinates
/// (`x` right, `y` up).  Returns `None` for an empty window.
pub fn pixel_to_ndc(cursor: (f64, f64), window_size: (u32, u32)) -> Option<Vec2> {
    let (w, h) = window_size;
    if w == 0 || h == 0 {
        return None;
    }
    let x = (cursor.0 / w as f64) * 2.0 - 1.0;
    let y = -(cursor.1 / h as f64) * 2.0 + 1.0;
    Some(Vec2::new(x as f32, y as f32))
}

/// One ray hit.
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub handle: Handle,
    pub name: Option<String>,
    pub distance: f32,
    pub point: Vec3,
}

/// Every pickable element the ray crosses, nearest first.
pub fn pick_all(world: &World, ray: &Ray) -> Vec<PickHit> {
    let mut hits: Vec<PickHit> = world
        .iter_with_handles()
        .filter(|(_, e)| e.visible && e.pickable)
        .filter_map(|(handle, e)| {
            let bounds = e.world_bounds()?;
            let distance = bounds.intersect(ray)?;
            Some(PickHit {
                handle,
                name: e.name.clone(),
                distance,
                point: ray.at(distance),
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Nearest hit that has a name.
pub fn pick_named(world: &World, ray: &Ray) -> Option<PickHit> {
    pick_all(world, ray).into_iter().find(|h| h.name.is_some())
}

// ─── Tooltip ───────────────────────────────────────────────────────────────

/// A short-lived name label anchored at a screen position.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    /// Pixel position of the cursor that triggered the pick.
    pub position: (f64, f64),
    /// Clock time (seconds) the tooltip appeared.
    pub shown_at: f64,
}

impl Tooltip {
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.shown_at >= TOOLTIP_LIFETIME
    }
}

/// Tooltips currently on screen.  Several may overlap, each with its own
/// timer.
#[derive(Debug, Default)]
pub struct TooltipQueue {
    active: Vec<Tooltip>,
}

impl TooltipQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, text: impl Into<String>, position: (f64, f64), now: f64) {
        self.active.push(Tooltip {
            text: text.into(),
            position,
            shown_at: now,
        });
    }

    /// Drops expired tooltips and returns how many were removed.
    pub fn expire(&mut self, now: f64) -> usize {
        let before = self.active.len();
        self.active.retain(|t| !t.is_expired(now));
        before - self.active.len()
    }

    pub fn active(&self) -> &[Tooltip] {
        &self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::world::ElementKind;

    #[test]
    fn slab_hits_and_misses() {
        let b = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let hit = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert!((b.intersect(&hit).unwrap() - 4.0).abs() < 1e-5);

        let miss = Ray::new(Vec3::new(-5.0, 3.0, 0.0), Vec3::X);
        assert_eq!(b.intersect(&miss), None);

        let away = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::NEG_X);
        assert_eq!(b.intersect(&away), None);

        let inside = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(b.intersect(&inside), Some(0.0));
    }

    #[test]
    fn ndc_conversion() {
        assert_eq!(pixel_to_ndc((640.0, 360.0), (1280, 720)), Some(Vec2::ZERO));
        assert_eq!(pixel_to_ndc((0.0, 0.0), (1280, 720)), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pixel_to_ndc((1280.0, 720.0), (1280, 720)), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pixel_to_ndc((1.0, 1.0), (0, 720)), None);
    }

    #[test]
    fn unnamed_geometry_does_not_occlude() {
        let mut w = World::new();
        w.spawn_box(None, Vec3::new(5.0, 0.0, 0.0), Vec3::new(1.0, 10.0, 10.0));
        let far = w.spawn_box(Some("Painting"), Vec3::new(10.0, 0.0, 0.0), Vec3::splat(2.0));
        let near = w.spawn_box(Some("Statue"), Vec3::new(20.0, 0.0, 0.0), Vec3::splat(2.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let all = pick_all(&w, &ray);
        assert_eq!(all.len(), 3);
        assert!(all[0].name.is_none());

        let hit = pick_named(&w, &ray).unwrap();
        assert_eq!(hit.handle, far);
        assert_eq!(hit.name.as_deref(), Some("Painting"));
        assert!((hit.distance - 9.0).abs() < 1e-5);
        assert_ne!(hit.handle, near);
    }

    #[test]
    fn invisible_and_non_pickable_are_skipped() {
        let mut w = World::new();
        let h = w.spawn_box(Some("Hidden"), Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
        w.set_visible(h, false);
        w.spawn("Light")
            .with_kind(ElementKind::PointLight { intensity: 1.0, range: 10.0 })
            .with_position(Vec3::new(8.0, 0.0, 0.0))
            .build();
        assert!(pick_named(&w, &Ray::new(Vec3::ZERO, Vec3::X)).is_none());
    }

    #[test]
    fn tooltips_expire_after_lifetime() {
        let mut q = TooltipQueue::new();
        q.show("Un monde imaginaire", (10.0, 20.0), 1.0);
        q.show("Statue de la Victoire", (30.0, 40.0), 1.5);
        assert_eq!(q.expire(1.7), 0);
        assert_eq!(q.expire(1.8), 1);
        assert_eq!(q.active().len(), 1);
        assert_eq!(q.active()[0].text, "Statue de la Victoire");
        assert_eq!(q.expire(2.4), 1);
        assert!(q.active().is_empty());
    }
}
