//! Billboard sprites: project into camera space, cull, sort far to near and
//! rasterise with a per-column depth test against the wall pass.

use smallvec::SmallVec;

use crate::{
    fixed::{FIXED_SHIFT, Fixed},
    renderer::{
        HALF_H, HALF_W, OPAQUE, PROJ_DIST, Rgba, SCREEN_H, SCREEN_W, software::Software,
    },
    world::{COLOR_KEY, Camera, Level, MAX_SPRITES, Sprite, Texture, TextureBank, TextureId},
};

/// Sprites closer than this along the view axis are dropped.
pub const NEAR_CLIP: Fixed = Fixed::from_raw(0x2000);

/// Sprites with `|right| > FRUSTUM_SLOPE · forward` are outside the view.
pub const FRUSTUM_SLOPE: i64 = 4;

/// Half the world width of a sprite (a quarter cell).
pub const SPRITE_HALF_W: Fixed = Fixed::from_raw(0x4000);

pub type DisplayList = SmallVec<[DisplaySprite; MAX_SPRITES]>;

/// A sprite after projection: everything the rasteriser needs, in screen
/// space.  `x1..x2` and `y1..y2` are already clipped to the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplaySprite {
    /// Forward distance; compared against the wall depth buffer.
    pub depth: Fixed,
    /// On-screen height in pixels.
    pub size: i32,
    /// Texture columns advanced per screen column.
    pub u_step: Fixed,
    /// Texture column at `x1` (non-zero when the left edge is clipped).
    pub u_start: Fixed,
    pub x1: i32, // inclusive
    pub x2: i32, // exclusive
    pub y1: i32, // inclusive
    pub y2: i32, // exclusive
    /// Screen row of the sprite centre.
    pub anchor: i32,
    pub tex: TextureId,
}

/// Transform `sprite` into screen space, or `None` if no part of it can be
/// visible.  `tex_w` is the width of the sprite's texture.
pub fn project_sprite(camera: &Camera, sprite: &Sprite, tex_w: usize) -> Option<DisplaySprite> {
    let (c, s) = (camera.heading.cos(), camera.heading.sin());
    let dx = sprite.x - camera.x;
    let dy = sprite.y - camera.y;

    let forward = dx * c - dy * s;
    if forward < NEAR_CLIP {
        return None;
    }
    let right = dx * s + dy * c;
    if right.abs().raw() as i64 > FRUSTUM_SLOPE * forward.raw() as i64 {
        return None;
    }

    let full = (PROJ_DIST << FIXED_SHIFT) / forward.raw();
    let scale = Fixed::from_int(full);
    let left = HALF_W + ((right - SPRITE_HALF_W) * scale).floor();
    if left >= SCREEN_W as i32 {
        return None;
    }
    let right_edge = HALF_W + ((right + SPRITE_HALF_W) * scale).floor();
    if right_edge <= 0 {
        return None;
    }

    let size = full >> 1;
    if size == 0 {
        return None;
    }
    let anchor = HALF_H + (sprite.z * scale).floor();
    let top = anchor - size / 2;
    let bottom = top + size;

    let x1 = left.max(0);
    let u_step = Fixed::from_int(tex_w as i32) / Fixed::from_int(size);
    Some(DisplaySprite {
        depth: forward,
        size,
        u_step,
        u_start: Fixed::from_raw(u_step.raw() * (x1 - left)),
        x1,
        x2: right_edge.min(SCREEN_W as i32),
        y1: top.max(0),
        y2: bottom.min(SCREEN_H as i32),
        anchor,
        tex: sprite.tex,
    })
}

/// Painter's order: farthest first.
pub fn sort_far_to_near(list: &mut [DisplaySprite]) {
    list.sort_unstable_by(|a, b| b.depth.cmp(&a.depth));
}

/// Rasterise one projected sprite into `scratch`.
///
/// A column is skipped when the wall in front of it is nearer than the
/// sprite; texels equal to [`COLOR_KEY`] are skipped.  The depth buffer is
/// read, never written.
pub fn draw_sprite(scratch: &mut [Rgba], depth: &[Fixed], ds: &DisplaySprite, tex: &Texture) {
    let mut acc = ds.u_start;
    for x in ds.x1..ds.x2 {
        let u = acc.floor();
        acc += ds.u_step;
        if depth[x as usize] < ds.depth {
            continue;
        }
        for y in ds.y1..ds.y2 {
            let t = (((y - ds.anchor) as i64) << 8) + ((ds.size as i64) << 7);
            let v = (((t << tex.h_shift()) / ds.size as i64) >> 8) as i32;
            let texel = tex.texel(u, v);
            if texel == COLOR_KEY {
                continue;
            }
            scratch[y as usize * SCREEN_W + x as usize] = OPAQUE | texel;
        }
    }
}

impl Software {
    /// Project every sprite of `level` into the display list and sort it.
    pub(super) fn collect_sprites(&mut self, level: &Level, camera: &Camera, bank: &TextureBank) {
        self.display.clear();
        for sprite in level.sprites() {
            let tex_w = bank.texture_or_missing(sprite.tex).w;
            if let Some(ds) = project_sprite(camera, sprite, tex_w) {
                debug_assert!(self.display.len() < MAX_SPRITES);
                self.display.push(ds);
            }
        }
        sort_far_to_near(&mut self.display);
    }

    pub(super) fn draw_sprites(&mut self, bank: &TextureBank) {
        for ds in &self.display {
            let tex = bank.texture_or_missing(ds.tex);
            draw_sprite(&mut self.scratch, &self.depth, ds, tex);
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::trig::{Angle, HALF_TURN, QUARTER_TURN};

    fn cam() -> Camera {
        Camera::new(Fixed::from_f64(3.5), Fixed::from_f64(3.5), Angle::ZERO)
    }

    fn sprite_at(x: f64, y: f64) -> Sprite {
        Sprite::on_floor(Fixed::from_f64(x), Fixed::from_f64(y), 1)
    }

    fn display(depth: i32) -> DisplaySprite {
        DisplaySprite {
            depth: Fixed::from_raw(depth),
            size: 4,
            u_step: Fixed::ONE,
            u_start: Fixed::ZERO,
            x1: 0,
            x2: 4,
            y1: 0,
            y2: 4,
            anchor: 2,
            tex: 1,
        }
    }

    #[test]
    fn straight_ahead_projects_centred() {
        let ds = project_sprite(&cam(), &sprite_at(5.5, 3.5), 64).unwrap();
        assert_eq!(ds.depth, Fixed::from_int(2));
        let full = PROJ_DIST / 2;
        assert_eq!(ds.size, full / 2);
        assert_eq!(ds.x1, HALF_W - full / 4 - 1);
        assert_eq!(ds.x2, HALF_W + full / 4);
        // on the floor: bottom edge sits below the horizon
        assert!(ds.anchor > HALF_H);
        assert_eq!(ds.u_start, Fixed::ZERO);
    }

    #[test]
    fn behind_or_too_close_is_culled() {
        assert!(project_sprite(&cam(), &sprite_at(2.5, 3.5), 64).is_none());
        assert!(project_sprite(&cam(), &sprite_at(3.55, 3.5), 64).is_none());
        let back = Camera::new(cam().x, cam().y, Angle::new(HALF_TURN));
        assert!(project_sprite(&back, &sprite_at(5.5, 3.5), 64).is_none());
    }

    #[test]
    fn far_to_the_side_is_culled() {
        // forward 0.5, right 3.0: outside the frustum slope
        assert!(project_sprite(&cam(), &sprite_at(4.0, 6.5), 64).is_none());
        // facing the sprite brings it back
        let south = Camera::new(cam().x, cam().y, Angle::new(-QUARTER_TURN));
        assert!(project_sprite(&south, &sprite_at(4.0, 6.5), 64).is_some());
    }

    #[test]
    fn right_of_heading_lands_right_of_centre() {
        let ds = project_sprite(&cam(), &sprite_at(5.5, 4.0), 64).unwrap();
        assert!(ds.x1 > HALF_W - 40);
        assert!((ds.x1 + ds.x2) / 2 > HALF_W);
    }

    #[test]
    fn clipped_left_edge_offsets_texture_start() {
        // Partly off the left side of the screen.
        let ds = project_sprite(&cam(), &sprite_at(4.5, 2.95), 64).unwrap();
        assert_eq!(ds.x1, 0);
        assert!(ds.u_start > Fixed::ZERO);
    }

    #[test]
    fn sorts_descending_depth() {
        let mut list = [display(10), display(5), display(20)];
        sort_far_to_near(&mut list);
        let order: Vec<i32> = list.iter().map(|d| d.depth.raw()).collect();
        assert_eq!(order, vec![20, 10, 5]);
    }

    fn solid_tex(texel: u32) -> Texture {
        Texture::new("S", 4, 4, vec![texel; 16]).unwrap()
    }

    #[test]
    fn nearer_wall_hides_sprite_column() {
        let ds = display(0x2_0000);
        let mut scratch = vec![0; SCREEN_W * SCREEN_H];
        let mut depth = vec![Fixed::from_int(4); SCREEN_W];
        depth[1] = Fixed::ONE;
        draw_sprite(&mut scratch, &depth, &ds, &solid_tex(0x123456));

        assert_eq!(scratch[0], OPAQUE | 0x123456);
        assert_eq!(scratch[1], 0, "column behind the wall stays untouched");
        assert_eq!(scratch[2], OPAQUE | 0x123456);
        assert_eq!(scratch[3 * SCREEN_W + 3], OPAQUE | 0x123456);
        assert_eq!(scratch[4 * SCREEN_W], 0, "y2 is exclusive");
        assert_eq!(scratch[4], 0, "x2 is exclusive");
    }

    #[test]
    fn equal_depth_still_draws() {
        let ds = display(0x2_0000);
        let mut scratch = vec![0; SCREEN_W * SCREEN_H];
        let depth = vec![Fixed::from_raw(0x2_0000); SCREEN_W];
        draw_sprite(&mut scratch, &depth, &ds, &solid_tex(0x0000FF));
        assert_eq!(scratch[0], OPAQUE | 0x0000FF);
    }

    #[test]
    fn color_key_is_transparent() {
        let ds = display(0x1_0000);
        let mut scratch = vec![7; SCREEN_W * SCREEN_H];
        let depth = vec![Fixed::from_int(8); SCREEN_W];
        draw_sprite(&mut scratch, &depth, &ds, &solid_tex(COLOR_KEY));
        assert!(scratch.iter().all(|&p| p == 7));
    }
}
