use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    fixed::Fixed,
    world::{
        map::{Map, MapError},
        texture::TextureId,
    },
};

/// Upper bound on world sprites (and therefore on display sprites).
pub const MAX_SPRITES: usize = 32;

/// Fixed-capacity sprite storage; never grows past [`MAX_SPRITES`].
pub type SpriteList = SmallVec<[Sprite; MAX_SPRITES]>;

/// Billboard object placed in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub x: Fixed,
    pub y: Fixed,
    /// Height of the sprite centre below eye level, in cells.
    pub z: Fixed,
    pub tex: TextureId,
}

impl Sprite {
    /// Centre sits a quarter cell below the eye, so a half-cell sprite
    /// stands on the floor.
    pub const FLOOR_Z: Fixed = Fixed::from_raw(0x4000);

    pub fn on_floor(x: Fixed, y: Fixed, tex: TextureId) -> Self {
        Self {
            x,
            y,
            z: Self::FLOOR_Z,
            tex,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level already holds {MAX_SPRITES} sprites")]
    TooManySprites,

    #[error(transparent)]
    Map(#[from] MapError),
}

/// Runtime snapshot of one map (immutable while a frame is drawn).
#[derive(Debug)]
pub struct Level {
    pub name: String,
    pub map: Map,
    sprites: SpriteList,
}

impl Level {
    pub fn new<S: Into<String>>(name: S, map: Map) -> Self {
        Self {
            name: name.into(),
            map,
            sprites: SpriteList::new(),
        }
    }

    /// Parse an ASCII map (see [`Map::parse`]) into an empty level.
    pub fn from_ascii<S: Into<String>>(name: S, src: &str) -> Result<Self, LevelError> {
        Ok(Self::new(name, Map::parse(src)?))
    }

    /// The sample room with its three sprites, all using `sprite_tex`.
    pub fn sample(sprite_tex: TextureId) -> Self {
        let mut level = Self::new("sample", Map::sample());
        for (x, y) in [(4.0, 3.5), (4.5, 4.5), (4.0, 5.0)] {
            level.sprites.push(Sprite::on_floor(
                Fixed::from_f64(x),
                Fixed::from_f64(y),
                sprite_tex,
            ));
        }
        level
    }

    /// Place a sprite; fails once [`MAX_SPRITES`] are present.
    pub fn add_sprite(&mut self, sprite: Sprite) -> Result<(), LevelError> {
        if self.sprites.len() >= MAX_SPRITES {
            return Err(LevelError::TooManySprites);
        }
        self.sprites.push(sprite);
        Ok(())
    }

    #[inline]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn clear_sprites(&mut self) {
        self.sprites.clear();
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
