//! ---------------------------------------------------------------------------
//! Fixed-point software raycaster
//!
//! * Fills a `SCREEN_W × SCREEN_H` frame-buffer in **0xAARRGGBB** format.
//! * One DDA ray per column paints sky, wall and floor and records the
//!   corrected wall depth; sprites are then drawn far to near, tested
//!   per column against that depth buffer.
//! * All per-frame arithmetic is 16.16 [`Fixed`](crate::fixed::Fixed);
//!   floating point only appears while building tables.
//! ---------------------------------------------------------------------------

mod columns;
pub mod projection;
pub mod raycast;
mod renderer;
pub mod sprites;

pub use columns::{MIN_WALL_DEPTH, SHADE_MASK};
pub use projection::{FovColumn, FovTable};
pub use raycast::{Face, Quadrant, RayHit, cast_ray};
pub use renderer::{Software, Surfaces};
pub use sprites::{DisplayList, DisplaySprite};
