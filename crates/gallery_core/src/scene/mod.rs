//! Camera, first-person controller and the gallery scene description.

pub mod camera;
pub mod controller;
pub mod first_person;
pub mod gallery;
pub mod picking;
pub mod world;

pub use camera::{Camera, CameraHandle};
pub use controller::{KeyBindings, MoveDirection, MovementFlags};
pub use first_person::FirstPersonController;
pub use gallery::{build_gallery, clamp_to_gallery, GalleryHandles};
pub use picking::{pick_named, Aabb, PickHit, Ray, Tooltip, TooltipQueue};
pub use world::{Element, ElementKind, Handle, World};
