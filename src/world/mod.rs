mod camera;
mod level;
mod map;
mod texture;

pub use camera::{Camera, MOVE_STEP, TURN_STEP};

pub use level::{Level, LevelError, MAX_SPRITES, Sprite, SpriteList};

pub use map::{Cell, EMPTY, Map, MapError};

pub use texture::{COLOR_KEY, NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
