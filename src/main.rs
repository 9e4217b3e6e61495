//! Top-down grid viewer: solid cells, sprites, the camera and the ray each
//! screen column would cast.
//!
//! ```bash
//! cargo run --release --bin map_view -- [--map FILE] [--x 3.5 --y 3.5]
//! ```
//!
//! Same movement keys as `view_sw`; Esc quits.

use anyhow::{Context, bail};
use clap::Parser;
use glam::Vec2;
use minifb::{Key, Window, WindowOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fixray::{
    Angle, Fixed,
    renderer::software::{Face, FovTable, cast_ray},
    world::{Camera, Level, MOVE_STEP, NO_TEXTURE, TURN_STEP},
};

const WIDTH: usize = 640;
const HEIGHT: usize = 640;

const SOLID: u32 = 0x00_5A5A6E;
const GRID: u32 = 0x00_2A2A2A;
const RAY_H: u32 = 0x00_C0C040;
const RAY_V: u32 = 0x00_40C0C0;
const PLAYER: u32 = 0x00_FF4040;
const SPRITE: u32 = 0x00_40FF40;

/// Draw every Nth column's ray.
const RAY_STRIDE: usize = 8;

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// ASCII map (`#` wall, `.` floor); the sample room when absent
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    #[arg(long, default_value_t = 3.5)]
    x: f64,
    #[arg(long, default_value_t = 3.5)]
    y: f64,

    /// Start heading, in angle steps (2048 per turn)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    heading: i32,
}

/// Map-space → screen-space transform, keeping cells square.
struct View {
    scale: f32,
    offset: Vec2,
}

impl View {
    fn fit(cols: usize, rows: usize) -> Self {
        let map = Vec2::new(cols as f32, rows as f32);
        let screen = Vec2::new(WIDTH as f32, HEIGHT as f32);
        let scale = (screen / map).min_element() * 0.9; // 10 % margin
        Self {
            scale,
            offset: (screen - map * scale) * 0.5,
        }
    }

    fn to_screen(&self, x: Fixed, y: Fixed) -> (i32, i32) {
        let p = Vec2::new(x.to_f64() as f32, y.to_f64() as f32) * self.scale + self.offset;
        (p.x as i32, p.y as i32)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let opts = Opts::parse();

    let level = match &opts.map {
        Some(path) => {
            let src = std::fs::read_to_string(path)
                .with_context(|| format!("reading map {}", path.display()))?;
            Level::from_ascii("map", &src)
                .with_context(|| format!("parsing map {}", path.display()))?
        }
        None => Level::sample(NO_TEXTURE),
    };
    let mut camera = Camera::new(
        Fixed::from_f64(opts.x),
        Fixed::from_f64(opts.y),
        Angle::new(opts.heading).normalized(),
    );
    if level.map.is_solid_at(camera.x, camera.y) {
        bail!("start position ({}, {}) is inside a wall", opts.x, opts.y);
    }

    let view = View::fit(level.map.width(), level.map.height());
    let fov = FovTable::new();
    let mut buffer = vec![0u32; WIDTH * HEIGHT];

    let mut window = Window::new("fixray map", WIDTH, HEIGHT, WindowOptions::default())?;
    window.set_target_fps(30);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let down = |keys: &[Key]| keys.iter().any(|&k| window.is_key_down(k));
        let mut forward = Fixed::ZERO;
        let mut side = Fixed::ZERO;
        if down(&[Key::W, Key::Up]) {
            forward += MOVE_STEP;
        }
        if down(&[Key::S, Key::Down]) {
            forward -= MOVE_STEP;
        }
        if down(&[Key::D]) {
            side += MOVE_STEP;
        }
        if down(&[Key::A]) {
            side -= MOVE_STEP;
        }
        if down(&[Key::Q, Key::Left]) {
            camera.turn(TURN_STEP);
        }
        if down(&[Key::E, Key::Right]) {
            camera.turn(-TURN_STEP);
        }
        camera.step(&level.map, forward, side);

        draw_map(&mut buffer, &view, &level, &camera, &fov);
        window.update_with_buffer(&buffer, WIDTH, HEIGHT)?;
    }
    Ok(())
}

fn draw_map(buf: &mut [u32], view: &View, level: &Level, camera: &Camera, fov: &FovTable) {
    buf.fill(0);
    let map = &level.map;

    // ─────────── cells ────────────
    for cy in 0..map.height() as i32 {
        for cx in 0..map.width() as i32 {
            let (x0, y0) = view.to_screen(Fixed::from_int(cx), Fixed::from_int(cy));
            let (x1, y1) = view.to_screen(Fixed::from_int(cx + 1), Fixed::from_int(cy + 1));
            let colour = if map.is_solid(glam::IVec2::new(cx, cy)) {
                SOLID
            } else {
                GRID
            };
            fill_rect(buf, x0, y0, x1, y1, colour);
        }
    }

    // ─────────── rays ────────────
    let (ox, oy) = view.to_screen(camera.x, camera.y);
    for col in fov.iter().step_by(RAY_STRIDE) {
        let hit = cast_ray(map, camera.x, camera.y, camera.heading + col.offset);
        let (hx, hy) = view.to_screen(hit.x, hit.y);
        let colour = match hit.face {
            Face::Horizontal => RAY_H,
            Face::Vertical => RAY_V,
        };
        draw_line(buf, WIDTH, HEIGHT, ox, oy, hx, hy, colour);
    }

    // ─────────── things ────────────
    for s in level.sprites() {
        let (sx, sy) = view.to_screen(s.x, s.y);
        fill_rect(buf, sx - 2, sy - 2, sx + 3, sy + 3, SPRITE);
    }
    let (fx, fy) = camera.forward(Fixed::HALF);
    let (tx, ty) = view.to_screen(camera.x + fx, camera.y + fy);
    draw_line(buf, WIDTH, HEIGHT, ox, oy, tx, ty, PLAYER);
    fill_rect(buf, ox - 3, oy - 3, ox + 4, oy + 4, PLAYER);
}

/// Fill `[x0, x1) × [y0, y1)` leaving a one-pixel gap on the far edges.
fn fill_rect(buf: &mut [u32], x0: i32, y0: i32, x1: i32, y1: i32, colour: u32) {
    let xs = x0.max(0)..(x1 - 1).min(WIDTH as i32);
    for y in y0.max(0)..(y1 - 1).min(HEIGHT as i32) {
        for x in xs.clone() {
            buf[y as usize * WIDTH + x as usize] = colour;
        }
    }
}

/// Integer Bresenham line-drawing algorithm.
fn draw_line(
    buf: &mut [u32],
    w: usize,
    h: usize,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    colour: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w as i32).contains(&x0) && (0..h as i32).contains(&y0) {
            buf[y0 as usize * w + x0 as usize] = colour;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
