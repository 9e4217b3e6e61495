//! Asset loading: fills a [`TextureBank`] with the four textures the
//! renderer needs, either from TGA files or from the builtin generators.

pub mod builtin;
pub mod tga;

use std::path::Path;

use thiserror::Error;

use crate::world::{Texture, TextureBank, TextureError, TextureId};

pub use tga::TgaError;

/// File names looked up inside the asset directory.
pub const FLOOR_FILE: &str = "floor.tga";
pub const SKY_FILE: &str = "sky.tga";
pub const SPRITE_FILE: &str = "mu.tga";
pub const WALL_FILE: &str = "books.tga";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("{file}: {source}")]
    Tga {
        file: String,
        #[source]
        source: TgaError,
    },

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Ids of the textures painted by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureSet {
    pub floor: TextureId,
    pub sky: TextureId,
    pub wall: TextureId,
    pub sprite: TextureId,
}

/// Decode the four TGA files in `dir` into `bank`.
pub fn load_dir<P: AsRef<Path>>(dir: P, bank: &mut TextureBank) -> Result<TextureSet, AssetError> {
    let dir = dir.as_ref();
    let mut load = |name: &str, file: &str| -> Result<TextureId, AssetError> {
        let path = dir.join(file);
        let tex = tga::load(&path).map_err(|source| AssetError::Tga {
            file: path.display().to_string(),
            source,
        })?;
        tracing::info!(file = %path.display(), w = tex.w, h = tex.h, "loaded texture");
        Ok(bank.insert(name, tex)?)
    };

    Ok(TextureSet {
        floor: load("FLOOR", FLOOR_FILE)?,
        sky: load("SKY", SKY_FILE)?,
        sprite: load("SPRITE", SPRITE_FILE)?,
        wall: load("WALL", WALL_FILE)?,
    })
}

/// Insert the procedural textures into `bank`.
pub fn load_builtin(bank: &mut TextureBank) -> Result<TextureSet, AssetError> {
    let mut insert = |tex: Texture| -> Result<TextureId, AssetError> {
        Ok(bank.insert(tex.name.clone(), tex)?)
    };
    Ok(TextureSet {
        floor: insert(builtin::floor())?,
        sky: insert(builtin::sky())?,
        sprite: insert(builtin::sprite())?,
        wall: insert(builtin::wall())?,
    })
}

/// `load_dir` when a directory is given, builtin textures otherwise.
pub fn load_or_builtin(
    dir: Option<&Path>,
    bank: &mut TextureBank,
) -> Result<TextureSet, AssetError> {
    match dir {
        Some(dir) => load_dir(dir, bank),
        None => {
            tracing::warn!("no asset directory given, using builtin textures");
            load_builtin(bank)
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tiny_tga(bgr: [u8; 3]) -> Vec<u8> {
        let mut v = vec![0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 24, 0x20];
        v.extend_from_slice(&bgr);
        v
    }

    #[test]
    fn load_dir_reads_all_four_files() {
        let dir = tempfile::tempdir().unwrap();
        for (i, file) in [FLOOR_FILE, SKY_FILE, SPRITE_FILE, WALL_FILE].iter().enumerate() {
            fs::write(dir.path().join(file), tiny_tga([i as u8, 0, 0])).unwrap();
        }
        let mut bank = TextureBank::default();
        let set = load_dir(dir.path(), &mut bank).unwrap();

        assert_eq!(bank.count(), 5);
        assert_eq!(bank.texture(set.floor).unwrap().pixels, vec![0]);
        assert_eq!(bank.texture(set.wall).unwrap().pixels, vec![3]);
        assert_eq!(bank.id("SPRITE"), Some(set.sprite));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut bank = TextureBank::default();
        let err = load_dir(dir.path(), &mut bank).unwrap_err();
        match err {
            AssetError::Tga { file, source } => {
                assert!(file.ends_with(FLOOR_FILE));
                assert!(matches!(source, TgaError::Io(_)));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn builtin_set_is_distinct() {
        let mut bank = TextureBank::default();
        let set = load_or_builtin(None, &mut bank).unwrap();
        let ids = [set.floor, set.sky, set.wall, set.sprite];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(bank.texture(set.sky).unwrap().w, builtin::SKY_W);
    }
}
