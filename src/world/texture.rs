// Format-agnostic repository of textures decoded by the asset loader.
// The renderer and world logic interact through `TextureId` only.

use std::collections::HashMap;

/// Runtime handle for a texture in this bank.
///
/// Stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// [`TextureBank::new`] stores the fallback in this slot.
pub const NO_TEXTURE: TextureId = 0;

/// Texel value treated as transparent by the sprite pass (pure green).
pub const COLOR_KEY: u32 = 0x00_00FF00;

/// CPU-side storage: 24-bit colour in `0x00RRGGBB`, row-major, row 0 at the
/// top.  Both sides are powers of two so samplers can wrap with a mask.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u32>,
}

/// Convenience checkerboard 8×8 (magenta/black).
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: u32 = 0x00_FF00FF;
        const DARK: u32 = 0x00_000000;
        let mut pix = vec![0u32; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pix[y * 8 + x] = if (x ^ y) & 1 == 0 { LIGHT } else { DARK };
            }
        }
        Texture {
            name: "CHECKER".to_string(),
            w: 8,
            h: 8,
            pixels: pix,
        }
    }
}

impl Texture {
    /// Validate dimensions and wrap `pixels`.
    pub fn new<S: Into<String>>(
        name: S,
        w: usize,
        h: usize,
        pixels: Vec<u32>,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        if !w.is_power_of_two() || !h.is_power_of_two() {
            return Err(TextureError::NotPowerOfTwo { name, w, h });
        }
        if pixels.len() != w * h {
            return Err(TextureError::SizeMismatch {
                name,
                expected: w * h,
                got: pixels.len(),
            });
        }
        Ok(Self { name, w, h, pixels })
    }

    /// log2 of the width.
    #[inline(always)]
    pub fn w_shift(&self) -> u32 {
        self.w.trailing_zeros()
    }

    /// log2 of the height.
    #[inline(always)]
    pub fn h_shift(&self) -> u32 {
        self.h.trailing_zeros()
    }

    /// Texel at `(u, v)`; both coordinates wrap.
    #[inline(always)]
    pub fn texel(&self, u: i32, v: i32) -> u32 {
        let u = (u as usize) & (self.w - 1);
        let v = (v as usize) & (self.h - 1);
        self.pixels[v * self.w + u]
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Id past the last stored texture.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    #[error("texture `{name}` is {w}x{h}; both sides must be powers of two")]
    NotPowerOfTwo { name: String, w: usize, h: usize },

    #[error("texture `{name}` has {got} pixels, expected {expected}")]
    SizeMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// Textures by name, addressed by [`TextureId`] once inserted.
///
/// Slot [`NO_TEXTURE`] always holds the fallback, so any id can be drawn
/// with [`texture_or_missing`](Self::texture_or_missing).
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    textures: Vec<Texture>,
}

impl TextureBank {
    /// A bank holding only `fallback`, registered as `"MISSING"`.
    pub fn new(fallback: Texture) -> Self {
        Self {
            by_name: HashMap::from([("MISSING".to_string(), NO_TEXTURE)]),
            textures: vec![fallback],
        }
    }

    /// Stored textures, the fallback included.
    pub fn count(&self) -> usize {
        self.textures.len()
    }

    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.textures.get(id as usize).ok_or(TextureError::BadId(id))
    }

    #[inline]
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.texture(id)
            .unwrap_or(&self.textures[NO_TEXTURE as usize])
    }

    /// Add `tex` under a new `name` and return its id.
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = TextureId::try_from(self.textures.len())
            .map_err(|_| TextureError::BadId(TextureId::MAX))?;
        self.textures.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

impl Default for TextureBank {
    /// Checkerboard fallback.
    fn default() -> Self {
        Self::new(Texture::default())
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
