//! Fixed-point grid raycaster.
//!
//! The crate renders a first-person view of a tile map into a 320×240
//! `0xAARRGGBB` frame-buffer: textured walls, a scrolling sky, a textured
//! floor and depth-sorted billboard sprites.  Everything on the per-frame
//! path is integer arithmetic on [`Fixed`] values and [`Angle`] steps.
//!
//! * [`world`]    – map, camera, level and texture storage (read-only while
//!   a frame is drawn).
//! * [`renderer`] – the [`Renderer`] trait and the column-based
//!   [`Software`] backend.
//! * [`assets`]   – TGA decoding and builtin procedural textures.

pub mod assets;
pub mod fixed;
pub mod renderer;
pub mod trig;
pub mod world;

pub use fixed::Fixed;
pub use renderer::{Renderer, RendererExt, Rgba, Software};
pub use trig::Angle;
