//! Load textures from disk, render frames of the sample room and inspect
//! individual pixels.

use std::{fs, path::Path};

use fixray::{
    Fixed, RendererExt, Rgba,
    assets::{self, FLOOR_FILE, SKY_FILE, SPRITE_FILE, WALL_FILE},
    renderer::{HALF_W, OPAQUE, SCREEN_H, SCREEN_W, Software, software::SHADE_MASK},
    trig::{Angle, THREE_QUARTER_TURN},
    world::{Camera, Level, Sprite, TextureBank},
};

const SKY: u32 = 0x00_800000;
const WALL: u32 = 0x00_FFFFFF;
const FLOOR: u32 = 0x00_008000;
const THING: u32 = 0x00_0000FF;

/// 8×8 single-colour, uncompressed, top-left origin TGA.
fn write_tga(path: &Path, rgb: u32) {
    let mut v = vec![0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8, 0, 8, 0, 24, 0x20];
    for _ in 0..64 {
        v.extend_from_slice(&[rgb as u8, (rgb >> 8) as u8, (rgb >> 16) as u8]);
    }
    fs::write(path, v).unwrap();
}

fn setup() -> (TextureBank, Level, Software) {
    let dir = tempfile::tempdir().unwrap();
    write_tga(&dir.path().join(FLOOR_FILE), FLOOR);
    write_tga(&dir.path().join(SKY_FILE), SKY);
    write_tga(&dir.path().join(WALL_FILE), WALL);
    write_tga(&dir.path().join(SPRITE_FILE), THING);

    let mut bank = TextureBank::default();
    let set = assets::load_dir(dir.path(), &mut bank).unwrap();
    let mut level = Level::sample(set.sprite);
    level.clear_sprites();
    (bank, level, Software::new(set.into()))
}

fn render(sw: &mut Software, level: &Level, bank: &TextureBank, camera: &Camera) -> Vec<Rgba> {
    sw.draw_frame(level, camera, bank, |fb, w, h| {
        assert_eq!((w, h), (SCREEN_W, SCREEN_H));
        fb.to_vec()
    })
}

fn px(frame: &[Rgba], x: i32, y: usize) -> Rgba {
    frame[y * SCREEN_W + x as usize]
}

#[test]
fn centre_column_is_sky_wall_floor() {
    let (bank, level, mut sw) = setup();
    let frame = render(&mut sw, &level, &bank, &Camera::default());

    assert_eq!(px(&frame, HALF_W, 0), OPAQUE | SKY);
    assert_eq!(px(&frame, HALF_W, SCREEN_H / 2), OPAQUE | WALL);
    assert_eq!(px(&frame, HALF_W, SCREEN_H - 1), OPAQUE | FLOOR);
}

#[test]
fn horizontal_faces_are_shaded() {
    let (bank, level, mut sw) = setup();
    let south = Camera::new(
        Fixed::from_f64(3.5),
        Fixed::from_f64(3.5),
        Angle::new(THREE_QUARTER_TURN),
    );
    let frame = render(&mut sw, &level, &bank, &south);
    assert_eq!(px(&frame, HALF_W, SCREEN_H / 2), OPAQUE | (WALL & SHADE_MASK));
}

#[test]
fn sprite_in_front_of_wall_is_drawn() {
    let (bank, mut level, mut sw) = setup();
    let tex = bank.id("SPRITE").unwrap();
    level
        .add_sprite(Sprite::on_floor(Fixed::from_f64(5.5), Fixed::from_f64(3.5), tex))
        .unwrap();

    let frame = render(&mut sw, &level, &bank, &Camera::default());
    assert_eq!(sw.display_list().len(), 1);
    assert_eq!(px(&frame, HALF_W, 150), OPAQUE | THING);
    // above the sprite the wall is still visible
    assert_eq!(px(&frame, HALF_W, 100), OPAQUE | WALL);
}

#[test]
fn walking_into_a_wall_stops_at_the_cell_edge() {
    let (_, level, _) = setup();
    let mut cam = Camera::default();
    for _ in 0..200 {
        cam.step(&level.map, fixray::world::MOVE_STEP, Fixed::ZERO);
    }
    assert!(cam.x < Fixed::from_int(7));
    assert!(cam.x > Fixed::from_f64(6.9));
    assert!(!level.map.is_solid_at(cam.x, cam.y));
}
