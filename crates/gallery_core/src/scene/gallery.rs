//! The gallery layout and its collision clamp.
//!
//! Two rooms, 200 × 100 units, split along `x = 0` by a partition with a
//! 20-unit doorway in the middle.  A bench stands in the south room, the
//! statue on its pedestal in the north room, one painting on each long wall
//! of the south room.

use std::f32::consts::PI;

use glam::{Quat, Vec3};

use crate::color::Color;
use crate::scene::picking::Aabb;
use crate::scene::world::{ElementKind, Handle, ShadowSettings, World};

pub const STATUE_NAME: &str = "Statue de la Victoire";
pub const STATUE_MODEL: &str = "assets/models/victoire.dae";
pub const FLOOR_TEXTURE: &str = "assets/textures/floor.png";

/// Paintings as `(name, image, position, faces_north_wall)`.
const PAINTINGS: [(&str, &str, Vec3, bool); 2] = [
    (
        "Représentation du Monde",
        "assets/textures/paintings/steve-johnson-758735-unsplash.jpg",
        Vec3::new(-50.0, 10.0, 49.0),
        false,
    ),
    (
        "Un monde imaginaire",
        "assets/textures/paintings/steve-johnson-1150048-unsplash.jpg",
        Vec3::new(-50.0, 10.0, -49.0),
        true,
    ),
];

const WALL_HEIGHT: f32 = 20.0;

// Camera limits: outer walls minus a 2-unit margin.
const LIMIT_X: f32 = 98.0;
const LIMIT_Z: f32 = 48.0;
/// Half-width of the doorway through the partition.
const DOORWAY_HALF_WIDTH: f32 = 10.0;
/// Distance kept from the partition plane.
const PARTITION_MARGIN: f32 = 1.0;

/// Handles of the elements the host may want to touch after construction.
#[derive(Debug, Clone)]
pub struct GalleryHandles {
    pub floor: Handle,
    pub walls: Vec<Handle>,
    pub roof: Handle,
    pub bench: Handle,
    pub pedestal: Handle,
    pub statue: Handle,
    pub paintings: Vec<Handle>,
    pub lights: Vec<Handle>,
}

/// Populate `world` with the gallery.
pub fn build_gallery(world: &mut World) -> GalleryHandles {
    let lights = spawn_lights(world);

    let floor = world
        .spawn_unnamed()
        .with_kind(ElementKind::Plane { width: 200.0, depth: 100.0 })
        .with_color(Color::from_rgb_hex(0xaaaaaa))
        .with_texture(FLOOR_TEXTURE, (10.0, 5.0))
        .receives_shadow()
        .with_tag("floor")
        .build();

    let mut walls = Vec::with_capacity(6);
    // east / west walls run along X
    for z in [50.0, -50.0] {
        walls.push(spawn_wall(world, Vec3::new(0.0, 10.0, z), Vec3::new(200.0, WALL_HEIGHT, 1.0)));
    }
    // north / south walls run along Z
    for x in [100.0, -100.0] {
        walls.push(spawn_wall(world, Vec3::new(x, 10.0, 0.0), Vec3::new(1.0, WALL_HEIGHT, 100.0)));
    }
    // partition, leaving the doorway open
    for z in [30.0, -30.0] {
        walls.push(spawn_wall(world, Vec3::new(0.0, 10.0, z), Vec3::new(1.0, WALL_HEIGHT, 40.0)));
    }

    let roof = world
        .spawn_unnamed()
        .with_kind(ElementKind::Dome {
            radius: 80.0,
            width_segments: 20,
            height_segments: 10,
            scale: Vec3::new(1.8, 0.5, 1.0),
        })
        .with_position(Vec3::new(0.0, 8.0, 0.0))
        .with_color(Color::WHITE)
        .with_tag("roof")
        .not_pickable()
        .build();

    let bench = world
        .spawn_unnamed()
        .with_kind(ElementKind::Box { size: Vec3::new(20.0, 3.0, 5.0) })
        .with_position(Vec3::new(-50.0, 0.0, 0.0))
        .shadowed()
        .build();

    let pedestal = world
        .spawn_unnamed()
        .with_kind(ElementKind::Box { size: Vec3::new(8.0, 2.0, 8.0) })
        .with_position(Vec3::new(50.0, 0.0, 0.0))
        .shadowed()
        .build();

    // The model is lying along Z in its file; it is stood up and flipped.
    // Its picking proxy is an upright 4 × 12 × 4 box resting on its origin.
    let statue_rotation = Quat::from_rotation_z(PI / 2.0) * Quat::from_rotation_x(PI);
    let proxy = Aabb::new(Vec3::new(-2.0, 0.0, -2.0), Vec3::new(2.0, 12.0, 2.0));
    let statue = world
        .spawn(STATUE_NAME)
        .with_kind(ElementKind::Model {
            asset_key: STATUE_MODEL.to_string(),
            bounds: unrotated(proxy, statue_rotation),
        })
        .with_position(Vec3::new(50.0, 0.5, 0.0))
        .with_rotation(statue_rotation)
        .with_scale(Vec3::splat(0.8))
        .with_color(Color::from_rgb_hex(0xdddddd))
        .with_tag("statue")
        .shadowed()
        .build();

    let paintings = PAINTINGS
        .iter()
        .map(|&(name, image, position, flipped)| {
            let rotation = if flipped {
                Quat::from_rotation_y(PI)
            } else {
                Quat::IDENTITY
            };
            world
                .spawn(name)
                .with_kind(ElementKind::Box { size: Vec3::new(10.0, 10.0, 0.5) })
                .with_position(position)
                .with_rotation(rotation)
                .with_color(Color::from_rgb_hex(0xaaaaaa))
                .with_texture(image, (1.0, 1.0))
                .with_tag("painting")
                .shadowed()
                .build()
        })
        .collect();

    GalleryHandles {
        floor,
        walls,
        roof,
        bench,
        pedestal,
        statue,
        paintings,
        lights,
    }
}

fn spawn_lights(world: &mut World) -> Vec<Handle> {
    let ambient = world
        .spawn_unnamed()
        .with_kind(ElementKind::AmbientLight { intensity: 1.0 })
        .with_color(Color::from_rgb_hex(0x555555))
        .with_tag("light")
        .build();

    let sun = world
        .spawn_unnamed()
        .with_kind(ElementKind::DirectionalLight {
            intensity: 1.5 * PI,
            shadow: Some(ShadowSettings {
                map_size: 2048,
                half_extent: 200.0,
                near: 0.5,
                far: 500.0,
                bias: 0.0005,
            }),
        })
        .with_position(Vec3::new(-100.0, 100.0, -100.0))
        .with_tag("light")
        .build();

    // softens the partition's shadow in the south room
    let fill = world
        .spawn_unnamed()
        .with_kind(ElementKind::PointLight { intensity: 0.5, range: 50.0 })
        .with_position(Vec3::new(-50.0, 20.0, -25.0))
        .with_tag("light")
        .build();

    vec![ambient, sun, fill]
}

fn spawn_wall(world: &mut World, center: Vec3, size: Vec3) -> Handle {
    world
        .spawn_unnamed()
        .with_kind(ElementKind::Box { size })
        .with_position(center)
        .with_color(Color::WHITE)
        .with_tag("wall")
        .shadowed()
        .build()
}

/// Express world-aligned bounds in the frame of an element rotated by
/// `rotation`.  Exact for quarter-turn rotations.
fn unrotated(bounds: Aabb, rotation: Quat) -> Aabb {
    let inv = rotation.inverse();
    Aabb::from_points(bounds.corners().iter().map(|&c| inv * c)).unwrap_or(bounds)
}

/// Scale a painting's width to its image's aspect ratio.  Zero-sized images
/// are ignored.
pub fn set_painting_aspect(world: &mut World, painting: Handle, width: u32, height: u32) {
    if width == 0 || height == 0 {
        return;
    }
    let aspect = width as f32 / height as f32;
    world.set_scale(painting, Vec3::new(aspect, 1.0, 1.0));
}

/// Keep `position` inside the gallery and out of the partition.
///
/// The outer walls clamp X to `[-98, 98]` and Z to `[-48, 48]`.  Inside the
/// partition band (`-1 < x < 1`) and outside the doorway (`|z| > 10`) the
/// camera is pushed back to the side it is on.  `x == 0` exactly is left
/// alone.
pub fn clamp_to_gallery(position: &mut Vec3) {
    position.x = position.x.clamp(-LIMIT_X, LIMIT_X);
    position.z = position.z.clamp(-LIMIT_Z, LIMIT_Z);

    let in_doorway = position.z.abs() <= DOORWAY_HALF_WIDTH;
    let clear_of_partition = position.x <= -PARTITION_MARGIN || position.x >= PARTITION_MARGIN;
    if in_doorway || clear_of_partition {
        return;
    }

    if position.x < 0.0 {
        position.x = -PARTITION_MARGIN;
    } else if position.x > 0.0 {
        position.x = PARTITION_MARGIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::picking::{pick_named, Ray};

    #[test]
    fn layout_counts() {
        let mut w = World::new();
        let g = build_gallery(&mut w);
        assert_eq!(g.walls.len(), 6);
        assert_eq!(g.lights.len(), 3);
        assert_eq!(g.paintings.len(), 2);
        // floor, 6 walls, roof, bench, pedestal, statue, 2 paintings, 3 lights
        assert_eq!(w.len(), 16);
        assert_eq!(w.iter_tagged("wall").count(), 6);
        assert!(w.iter_tagged("light").all(|e| e.kind.is_light()));
    }

    #[test]
    fn named_elements() {
        let mut w = World::new();
        let g = build_gallery(&mut w);
        assert_eq!(w.find_by_name(STATUE_NAME), Some(g.statue));
        assert_eq!(w.find_by_name("Un monde imaginaire"), Some(g.paintings[1]));
        assert_eq!(w.iter().filter(|e| e.name.is_some()).count(), 3);
    }

    #[test]
    fn sun_casts_large_shadow_map() {
        let mut w = World::new();
        let g = build_gallery(&mut w);
        let sun = w.get(g.lights[1]).unwrap();
        match &sun.kind {
            ElementKind::DirectionalLight { shadow: Some(s), .. } => {
                assert_eq!(s.map_size, 2048);
                assert_eq!(s.half_extent, 200.0);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn statue_proxy_stands_on_pedestal() {
        let mut w = World::new();
        let g = build_gallery(&mut w);
        let b = w.get(g.statue).unwrap().world_bounds().unwrap();
        assert!((b.min.y - 0.5).abs() < 1e-3);
        assert!((b.max.y - (0.5 + 12.0 * 0.8)).abs() < 1e-3);
        assert!((b.center().x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn pick_statue_from_entrance() {
        let mut w = World::new();
        build_gallery(&mut w);
        let eye = Vec3::new(-80.0, 8.0, 0.0);
        let hit = pick_named(&w, &Ray::new(eye, Vec3::new(50.0, 4.0, 0.0) - eye)).unwrap();
        assert_eq!(hit.name.as_deref(), Some(STATUE_NAME));
    }

    #[test]
    fn painting_aspect() {
        let mut w = World::new();
        let g = build_gallery(&mut w);
        set_painting_aspect(&mut w, g.paintings[0], 1600, 1000);
        assert_eq!(w.get(g.paintings[0]).unwrap().transform.scale, Vec3::new(1.6, 1.0, 1.0));
        set_painting_aspect(&mut w, g.paintings[0], 0, 1000);
        assert_eq!(w.get(g.paintings[0]).unwrap().transform.scale.x, 1.6);
    }

    #[test]
    fn outer_walls_clamp() {
        let mut p = Vec3::new(-150.0, 8.0, 75.0);
        clamp_to_gallery(&mut p);
        assert_eq!(p, Vec3::new(-98.0, 8.0, 48.0));

        let mut p = Vec3::new(120.0, 8.0, -60.0);
        clamp_to_gallery(&mut p);
        assert_eq!(p, Vec3::new(98.0, 8.0, -48.0));
    }

    #[test]
    fn partition_pushes_back() {
        let mut west = Vec3::new(-0.4, 8.0, 30.0);
        clamp_to_gallery(&mut west);
        assert_eq!(west.x, -1.0);

        let mut east = Vec3::new(0.7, 8.0, -25.0);
        clamp_to_gallery(&mut east);
        assert_eq!(east.x, 1.0);

        let mut on_plane = Vec3::new(0.0, 8.0, 30.0);
        clamp_to_gallery(&mut on_plane);
        assert_eq!(on_plane.x, 0.0);
    }

    #[test]
    fn doorway_is_open() {
        for z in [-10.0, -3.0, 0.0, 9.5, 10.0] {
            let mut p = Vec3::new(0.3, 8.0, z);
            clamp_to_gallery(&mut p);
            assert_eq!(p.x, 0.3, "z = {z}");
        }
        let mut p = Vec3::new(5.0, 8.0, 40.0);
        clamp_to_gallery(&mut p);
        assert_eq!(p, Vec3::new(5.0, 8.0, 40.0));
    }
}
