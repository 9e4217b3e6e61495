//! Procedural stand-ins for the four texture files, so the viewers run
//! without any assets on disk.  Generated once at start-up.

use crate::world::{COLOR_KEY, Texture};

pub const FLOOR_SIZE: usize = 128;
pub const WALL_SIZE: usize = 128;
pub const SPRITE_SIZE: usize = 64;
pub const SKY_W: usize = 1024;
pub const SKY_H: usize = 128;

#[inline]
fn rgb(r: u32, g: u32, b: u32) -> u32 {
    (r.min(255) << 16) | (g.min(255) << 8) | b.min(255)
}

/// Stone tiles with dark grout, four tiles per cell.
pub fn floor() -> Texture {
    let n = FLOOR_SIZE;
    let mut pixels = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let grout = x % 32 == 0 || y % 32 == 0;
            let tile = ((x / 32) + (y / 32)) % 2;
            let speck = ((x * 7 + y * 13) % 11) as u32;
            pixels.push(if grout {
                rgb(40, 36, 32)
            } else if tile == 0 {
                rgb(110 + speck, 100 + speck, 90)
            } else {
                rgb(90 + speck, 84 + speck, 78)
            });
        }
    }
    Texture {
        name: "FLOOR".into(),
        w: n,
        h: n,
        pixels,
    }
}

/// Vertical blue gradient with a band of soft cloud stripes.
pub fn sky() -> Texture {
    let mut pixels = Vec::with_capacity(SKY_W * SKY_H);
    for y in 0..SKY_H {
        for x in 0..SKY_W {
            let t = (y * 255 / SKY_H) as u32;
            let phase = (x as f64 / SKY_W as f64) * std::f64::consts::TAU * 6.0;
            let cloud = ((phase.sin() * 0.5 + 0.5) * 60.0) as u32;
            let band = if (40..80).contains(&y) { cloud } else { 0 };
            pixels.push(rgb(40 + t / 3 + band, 80 + t / 2 + band, 200 + band));
        }
    }
    Texture {
        name: "SKY".into(),
        w: SKY_W,
        h: SKY_H,
        pixels,
    }
}

/// Running-bond brick.
pub fn wall() -> Texture {
    let n = WALL_SIZE;
    let mut pixels = Vec::with_capacity(n * n);
    for y in 0..n {
        let row = y / 16;
        let shift = if row % 2 == 0 { 0 } else { 16 };
        for x in 0..n {
            let mortar = y % 16 == 0 || (x + shift) % 32 == 0;
            let shade = (((x + shift) / 32 + row) % 3) as u32 * 12;
            pixels.push(if mortar {
                rgb(150, 150, 140)
            } else {
                rgb(150 + shade, 60 + shade / 2, 40)
            });
        }
    }
    Texture {
        name: "WALL".into(),
        w: n,
        h: n,
        pixels,
    }
}

/// A round pillar on a colour-keyed background.
pub fn sprite() -> Texture {
    let n = SPRITE_SIZE as i32;
    let mut pixels = Vec::with_capacity(SPRITE_SIZE * SPRITE_SIZE);
    for y in 0..n {
        for x in 0..n {
            let dx = x - n / 2;
            let inside = if y < n / 4 {
                // round cap
                let dy = y - n / 4;
                dx * dx + dy * dy < (n / 4) * (n / 4)
            } else {
                dx.abs() < n / 5 || (y > n - 8 && dx.abs() < n / 3)
            };
            pixels.push(if inside {
                let lit = (n / 2 - dx.abs()) as u32 * 4;
                rgb(120 + lit, 110 + lit, 60 + lit / 2)
            } else {
                COLOR_KEY
            });
        }
    }
    Texture {
        name: "SPRITE".into(),
        w: SPRITE_SIZE,
        h: SPRITE_SIZE,
        pixels,
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_valid_textures() {
        for tex in [floor(), sky(), wall(), sprite()] {
            let checked = Texture::new(tex.name.clone(), tex.w, tex.h, tex.pixels.clone());
            assert!(checked.is_ok(), "{} rejected", tex.name);
        }
    }

    #[test]
    fn sprite_has_key_and_opaque_texels() {
        let s = sprite();
        assert_eq!(s.texel(0, 0), COLOR_KEY);
        assert_ne!(s.texel(32, 40), COLOR_KEY);
    }
}
