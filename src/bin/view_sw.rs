//! First-person software view of a grid level.
//!
//! ```bash
//! cargo run --release -- [--assets DIR] [--map FILE] [--scale 2]
//! ```
//!
//! W/S or ↑/↓ walk, A/D strafe, Q/E or ←/→ turn, Esc quits.

use anyhow::{Context, bail};
use clap::Parser;
use minifb::{Key, Scale, ScaleMode, Window, WindowOptions};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

use fixray::{
    Angle, Fixed,
    assets,
    renderer::{RendererExt, SCREEN_H, SCREEN_W, Software},
    world::{Camera, Level, MOVE_STEP, TURN_STEP, TextureBank},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Directory holding floor.tga, sky.tga, mu.tga and books.tga
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// ASCII map (`#` wall, `.` floor); the sample room when absent
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Start position, in cells
    #[arg(long, default_value_t = 3.5)]
    x: f64,
    #[arg(long, default_value_t = 3.5)]
    y: f64,

    /// Start heading, in angle steps (2048 per turn)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    heading: i32,

    /// Delay between frames
    #[arg(long, value_name = "MS", default_value_t = 50)]
    frame_delay_ms: u64,

    /// Initial window scale: 1, 2, 4 or 8
    #[arg(long, default_value_t = 2)]
    scale: u8,
}

fn window_scale(n: u8) -> anyhow::Result<Scale> {
    Ok(match n {
        1 => Scale::X1,
        2 => Scale::X2,
        4 => Scale::X4,
        8 => Scale::X8,
        _ => bail!("unsupported window scale {n} (use 1, 2, 4 or 8)"),
    })
}

fn load_level(opts: &Opts, sprite_tex: u16) -> anyhow::Result<Level> {
    let Some(path) = &opts.map else {
        return Ok(Level::sample(sprite_tex));
    };
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("reading map {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map".into());
    Level::from_ascii(name, &src).with_context(|| format!("parsing map {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let opts = Opts::parse();

    let mut bank = TextureBank::default();
    let set = assets::load_or_builtin(opts.assets.as_deref(), &mut bank)?;
    let level = load_level(&opts, set.sprite)?;

    let mut camera = Camera::new(
        Fixed::from_f64(opts.x),
        Fixed::from_f64(opts.y),
        Angle::new(opts.heading).normalized(),
    );
    if level.map.is_solid_at(camera.x, camera.y) {
        bail!("start position ({}, {}) is inside a wall", opts.x, opts.y);
    }
    tracing::info!(
        level = %level.name,
        w = level.map.width(),
        h = level.map.height(),
        sprites = level.sprites().len(),
        "level ready"
    );

    let mut renderer = Software::new(set.into());

    let mut win = Window::new(
        "fixray",
        SCREEN_W,
        SCREEN_H,
        WindowOptions {
            resize: true,
            scale: window_scale(opts.scale)?,
            scale_mode: ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps((1000 / opts.frame_delay_ms.max(1)) as usize);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        /* input */
        let down = |keys: &[Key]| keys.iter().any(|&k| win.is_key_down(k));
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

        /* draw */
        let t0 = Instant::now();
        renderer.draw_frame(&level, &camera, &bank, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            win.update_with_buffer(fb, w, h)
        })?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            tracing::info!(
                avg_ms = format_args!("{avg_ms:.2}"),
                fps = format_args!("{:.1}", 1000.0 / avg_ms),
                x = camera.x.to_f64(),
                y = camera.y.to_f64(),
                heading = format_args!("{:.1}°", camera.heading.to_degrees()),
                "avg render"
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
