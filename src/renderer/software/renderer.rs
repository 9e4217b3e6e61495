use crate::{
    assets::TextureSet,
    fixed::Fixed,
    renderer::{
        Renderer, Rgba, SCREEN_H, SCREEN_W,
        software::{projection::FovTable, sprites::DisplayList},
    },
    world::{Camera, Level, NO_TEXTURE, TextureBank, TextureId},
};

/// Which bank entries the column pass paints with.  Sprites carry their
/// own texture id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Surfaces {
    pub floor: TextureId,
    pub sky: TextureId,
    pub wall: TextureId,
}

impl Default for Surfaces {
    /// Everything falls back to the checkerboard.
    fn default() -> Self {
        Self {
            floor: NO_TEXTURE,
            sky: NO_TEXTURE,
            wall: NO_TEXTURE,
        }
    }
}

impl From<TextureSet> for Surfaces {
    fn from(set: TextureSet) -> Self {
        Self {
            floor: set.floor,
            sky: set.sky,
            wall: set.wall,
        }
    }
}

/// Fixed-resolution raycasting backend.
pub struct Software {
    pub(super) scratch: Vec<Rgba>,
    /// Corrected wall distance per column, written by the column pass.
    pub(super) depth: [Fixed; SCREEN_W],
    pub(super) fov: FovTable,
    pub(super) display: DisplayList,
    pub(super) surfaces: Surfaces,
}

impl Software {
    pub fn new(surfaces: Surfaces) -> Self {
        Self {
            scratch: vec![0; SCREEN_W * SCREEN_H],
            depth: [Fixed::ZERO; SCREEN_W],
            fov: FovTable::new(),
            display: DisplayList::new(),
            surfaces,
        }
    }

    pub fn depth_buffer(&self) -> &[Fixed] {
        &self.depth
    }

    /// Sprites that survived culling last frame, farthest first.
    pub fn display_list(&self) -> &[super::DisplaySprite] {
        &self.display
    }

    /// Frame as bytes in memory order (`B, G, R, A` per pixel).
    pub fn to_bgra_bytes(&self) -> Vec<u8> {
        self.scratch.iter().flat_map(|p| p.to_le_bytes()).collect()
    }
}

impl Default for Software {
    fn default() -> Self {
        Self::new(Surfaces::default())
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self) {
        self.display.clear();
    }

    fn draw_scene(&mut self, level: &Level, camera: &Camera, bank: &TextureBank) {
        self.draw_columns(level, camera, bank);
        self.collect_sprites(level, camera, bank);
        tracing::trace!(
            visible = self.display.len(),
            total = level.sprites().len(),
            "sprites"
        );
        self.draw_sprites(bank);
    }

    fn end_frame<F, T>(&mut self, submit: F) -> T
    where
        F: FnOnce(&[Rgba], usize, usize) -> T,
    {
        submit(&self.scratch, SCREEN_W, SCREEN_H)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
