//! Column pass: one ray per screen column, then sky above the wall slice,
//! the textured slice itself and the floor below it.
//!
//! Every pixel of the frame is written here, so the sprite pass that
//! follows only ever overdraws.

use crate::{
    fixed::{FIXED_ONE, FIXED_SHIFT, Fixed},
    renderer::{
        HALF_H, OPAQUE, PROJ_DIST, Rgba, SCREEN_H, SCREEN_W,
        software::{
            Software,
            raycast::{Face, cast_ray},
        },
    },
    world::{Camera, Level, Texture, TextureBank},
};

/// Smallest corrected wall depth; keeps the projected height finite when
/// the eye is pressed against a wall.
pub const MIN_WALL_DEPTH: Fixed = Fixed::from_raw(FIXED_ONE / 64);

/// Darkens horizontal faces so the two wall orientations read apart.
pub const SHADE_MASK: Rgba = 0x00_C0C0C0;

/// Sky texels scroll half a texel per heading step; 1024 columns span a
/// full turn.
const SKY_SPAN_MASK: i32 = 1023;

/// Projected wall height in pixels for a corrected depth.
#[inline]
pub fn wall_height(depth: Fixed) -> i32 {
    (PROJ_DIST << FIXED_SHIFT) / depth.raw()
}

/// Unclipped `[start, end)` rows of a wall slice of height `h`.
#[inline]
pub fn wall_span(h: i32) -> (i32, i32) {
    let start = HALF_H - (h >> 1);
    (start, start + h)
}

impl Software {
    pub(super) fn draw_columns(&mut self, level: &Level, camera: &Camera, bank: &TextureBank) {
        let sky = bank.texture_or_missing(self.surfaces.sky);
        let wall = bank.texture_or_missing(self.surfaces.wall);
        let floor = bank.texture_or_missing(self.surfaces.floor);
        let sky_scroll = camera.heading.index() as i32 >> 1;

        for i in 0..SCREEN_W {
            let col = self.fov.column(i);
            let angle = (camera.heading + col.offset).normalized();
            let hit = cast_ray(&level.map, camera.x, camera.y, angle);

            let z = (hit.distance * col.correction).max(MIN_WALL_DEPTH);
            self.depth[i] = z;

            let h = wall_height(z);
            let (ws, we) = wall_span(h);
            let ws = ws.clamp(0, SCREEN_H as i32) as usize;
            let we = we.clamp(0, SCREEN_H as i32) as usize;

            /* sky */
            let sky_u = (i as i32 - sky_scroll) & SKY_SPAN_MASK;
            for j in 0..ws {
                self.scratch[j * SCREEN_W + i] = OPAQUE | sky.texel(sky_u, j as i32);
            }

            /* wall */
            let (coord, mask) = match hit.face {
                Face::Horizontal => (hit.x, SHADE_MASK),
                Face::Vertical => (hit.y, 0x00_FFFFFF),
            };
            let u = coord.raw() >> (FIXED_SHIFT - wall.w_shift());
            for j in ws..we {
                let v = wall_row(j as i32, h, wall);
                self.scratch[j * SCREEN_W + i] = OPAQUE | (wall.texel(u, v) & mask);
            }

            /* floor */
            let (cos, sin) = (angle.cos(), angle.sin());
            for j in we..SCREEN_H {
                let t = floor_distance(j as i32) / col.correction;
                let fx = camera.x + t * cos;
                let fy = camera.y - t * sin;
                let texel = floor.texel(
                    fx.raw() >> (FIXED_SHIFT - floor.w_shift()),
                    fy.raw() >> (FIXED_SHIFT - floor.h_shift()),
                );
                self.scratch[j * SCREEN_W + i] = OPAQUE | texel;
            }
        }
    }
}

/// Texture row for screen row `j` of a wall slice `h` pixels tall,
/// centred on the horizon.
#[inline]
fn wall_row(j: i32, h: i32, tex: &Texture) -> i32 {
    let t = (((j - HALF_H) as i64) << 8) + ((h as i64) << 7);
    (((t << tex.h_shift()) / h as i64) >> 8) as i32
}

/// Along-view distance to the floor seen on screen row `j` (below the
/// horizon), for an eye half a cell above the floor.
#[inline]
fn floor_distance(j: i32) -> Fixed {
    Fixed::from_raw((PROJ_DIST << (FIXED_SHIFT - 1)) / (j - HALF_H).max(1))
}

/*──────────────────────────────── Tests ───────────────────────────────*/
