//! Rendering abstraction layer.
//!
//! *The rest of the program never touches a pixel buffer directly.*
//! It hands a [`Level`], a [`Camera`] and a [`TextureBank`] to a type that
//! implements [`Renderer`], then loans the finished frame to whoever
//! presents it.
//!
//! * The frame is a fixed [`SCREEN_W`] × [`SCREEN_H`] raster; every pixel
//!   is rewritten each frame.
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

use crate::world::{Camera, Level, TextureBank};

/// Pixel format of the software frame-buffer (0xAARRGGBB).
///
/// In memory on a little-endian target that is `B, G, R, A` per pixel.
pub type Rgba = u32;

pub const SCREEN_W: usize = 320;
pub const SCREEN_H: usize = 240;
pub const HALF_W: i32 = (SCREEN_W / 2) as i32;
pub const HALF_H: i32 = (SCREEN_H / 2) as i32;

/// Distance from the eye to the projection plane, in pixels.
/// `HALF_W / tan(30°)` for the 60° horizontal field of view.
pub const PROJ_DIST: i32 = 277;

/// Alpha bits OR-ed into every written pixel.
pub const OPAQUE: Rgba = 0xFF_000000;

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
/// Software callers typically forward it to their window-manager.
pub trait Renderer {
    /// Reset per-frame state (display list).  The pixel buffer itself is
    /// fully overwritten by `draw_scene`, so it is not cleared.
    fn begin_frame(&mut self);

    /// Rasterise walls, sky, floor and sprites as seen from `camera`.
    fn draw_scene(&mut self, level: &Level, camera: &Camera, bank: &TextureBank);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F, T>(&mut self, submit: F) -> T
    where
        F: FnOnce(&[Rgba], usize, usize) -> T;
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F, T>(
        &mut self,
        level: &Level,
        camera: &Camera,
        bank: &TextureBank,
        submit: F,
    ) -> T
    where
        F: FnOnce(&[Rgba], usize, usize) -> T,
    {
        self.begin_frame();
        self.draw_scene(level, camera, bank);
        self.end_frame(submit)
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::Software;
