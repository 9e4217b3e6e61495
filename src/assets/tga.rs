//! Truevision TGA decoder.
//!
//! ### Supported files
//! * image type **2** (uncompressed true-colour) and **10** (RLE
//!   true-colour)
//! * 24 bpp (BGR) and 32 bpp (BGRA, alpha dropped)
//! * both bottom-left and top-left origins; output rows are top-down

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use byteorder::{LittleEndian as LE, ReadBytesExt};
use thiserror::Error;

use crate::world::{Texture, TextureError};

/// Size (in bytes) of the fixed header.
const HEADER_SIZE: usize = 18;

const TYPE_TRUECOLOR: u8 = 2;
const TYPE_TRUECOLOR_RLE: u8 = 10;

/// Image descriptor bit: rows are stored top-down.
const ORIGIN_TOP: u8 = 0x20;

/// Largest accepted width or height.
pub const MAX_SIDE: usize = 4096;

/// Fixed 18-byte file header.
#[derive(Clone, Copy, Debug)]
struct Header {
    id_length: u8,
    cmap_type: u8,
    image_type: u8,
    cmap_length: u16,
    cmap_entry_bits: u8,
    width: u16,
    height: u16,
    pixel_depth: u8,
    descriptor: u8,
}

impl Header {
    fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let id_length = r.read_u8()?;
        let cmap_type = r.read_u8()?;
        let image_type = r.read_u8()?;
        let _cmap_first = r.read_u16::<LE>()?;
        let cmap_length = r.read_u16::<LE>()?;
        let cmap_entry_bits = r.read_u8()?;
        let _x_origin = r.read_u16::<LE>()?;
        let _y_origin = r.read_u16::<LE>()?;
        let width = r.read_u16::<LE>()?;
        let height = r.read_u16::<LE>()?;
        let pixel_depth = r.read_u8()?;
        let descriptor = r.read_u8()?;
        Ok(Self {
            id_length,
            cmap_type,
            image_type,
            cmap_length,
            cmap_entry_bits,
            width,
            height,
            pixel_depth,
            descriptor,
        })
    }

    /// Bytes between the header and the pixel data.
    fn skip_len(&self) -> usize {
        let cmap = if self.cmap_type != 0 {
            self.cmap_length as usize * (self.cmap_entry_bits as usize).div_ceil(8)
        } else {
            0
        };
        self.id_length as usize + cmap
    }
}

/// Errors that can be encountered while decoding a TGA.
#[derive(Debug, Error)]
pub enum TgaError {
    /// Underlying I/O failure – propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unsupported TGA image type {0} (only 2 and 10)")]
    UnsupportedType(u8),

    #[error("unsupported TGA pixel depth {0} (only 24 and 32)")]
    UnsupportedDepth(u8),

    /// File ends before all pixels were read.
    #[error("TGA pixel data is truncated")]
    Truncated,

    #[error("TGA is {w}x{h}; sides are limited to {}", MAX_SIDE)]
    TooLarge { w: usize, h: usize },

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Open and decode `path`; the texture is named after the file stem.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Texture, TgaError> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_ascii_uppercase())
        .unwrap_or_default();
    let file = File::open(path)?;
    decode(name, BufReader::new(file))
}

/// Decode a TGA stream into a top-down `0x00RRGGBB` texture.
pub fn decode<S: Into<String>, R: Read>(name: S, mut r: R) -> Result<Texture, TgaError> {
    /*----------- 1. header --------------------------------------------*/
    let hdr = Header::read(&mut r).map_err(eof_to_truncated)?;
    if hdr.image_type != TYPE_TRUECOLOR && hdr.image_type != TYPE_TRUECOLOR_RLE {
        return Err(TgaError::UnsupportedType(hdr.image_type));
    }
    let bpp = match hdr.pixel_depth {
        24 => 3,
        32 => 4,
        d => return Err(TgaError::UnsupportedDepth(d)),
    };

    /*----------- 2. skip id + colour map ------------------------------*/
    let skip = hdr.skip_len() as u64;
    let skipped = io::copy(&mut (&mut r).take(skip), &mut io::sink())?;
    if skipped != skip {
        return Err(TgaError::Truncated);
    }

    /*----------- 3. pixel data ----------------------------------------*/
    let (w, h) = (hdr.width as usize, hdr.height as usize);
    if w > MAX_SIDE || h > MAX_SIDE {
        return Err(TgaError::TooLarge { w, h });
    }
    if !w.is_power_of_two() || !h.is_power_of_two() {
        let name = name.into();
        return Err(TextureError::NotPowerOfTwo { name, w, h }.into());
    }
    let mut pixels = vec![0u32; w * h];
    if hdr.image_type == TYPE_TRUECOLOR {
        let mut px = [0u8; 4];
        for out in pixels.iter_mut() {
            read_px(&mut r, &mut px[..bpp])?;
            *out = bgr(&px);
        }
    } else {
        decode_rle(&mut r, bpp, &mut pixels)?;
    }

    /*----------- 4. normalise to top-down rows ------------------------*/
    if hdr.descriptor & ORIGIN_TOP == 0 && w > 0 {
        let (mut top, mut bottom) = (0, h.saturating_sub(1));
        while top < bottom {
            let (head, tail) = pixels.split_at_mut(bottom * w);
            head[top * w..(top + 1) * w].swap_with_slice(&mut tail[..w]);
            top += 1;
            bottom -= 1;
        }
    }

    let tex = Texture::new(name, w, h, pixels)?;
    tracing::debug!(name = %tex.name, w, h, "decoded TGA");
    Ok(tex)
}

fn decode_rle<R: Read>(r: &mut R, bpp: usize, pixels: &mut [u32]) -> Result<(), TgaError> {
    let mut px = [0u8; 4];
    let mut i = 0;
    while i < pixels.len() {
        let packet = r.read_u8().map_err(eof_to_truncated)?;
        let count = (packet & 0x7F) as usize + 1;
        if i + count > pixels.len() {
            return Err(TgaError::Truncated);
        }
        if packet & 0x80 != 0 {
            read_px(r, &mut px[..bpp])?;
            pixels[i..i + count].fill(bgr(&px));
        } else {
            for out in &mut pixels[i..i + count] {
                read_px(r, &mut px[..bpp])?;
                *out = bgr(&px);
            }
        }
        i += count;
    }
    Ok(())
}

#[inline]
fn bgr(px: &[u8; 4]) -> u32 {
    (px[2] as u32) << 16 | (px[1] as u32) << 8 | px[0] as u32
}

fn read_px<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<(), TgaError> {
    r.read_exact(buf).map_err(eof_to_truncated)
}

fn eof_to_truncated(e: io::Error) -> TgaError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        TgaError::Truncated
    } else {
        TgaError::Io(e)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    /// Build a minimal TGA header.
    fn header(image_type: u8, w: u16, h: u16, depth: u8, descriptor: u8, id_len: u8) -> Vec<u8> {
        let mut v = vec![id_len, 0, image_type, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        v.extend_from_slice(&w.to_le_bytes());
        v.extend_from_slice(&h.to_le_bytes());
        v.push(depth);
        v.push(descriptor);
        assert_eq!(v.len(), HEADER_SIZE);
        v
    }

    #[test]
    fn bottom_up_24bpp_is_flipped() {
        let mut data = header(2, 2, 2, 24, 0, 3);
        data.extend_from_slice(b"abc"); // image id, skipped
        // bottom row: blue, green   top row: red, white   (BGR order)
        data.extend_from_slice(&[255, 0, 0, 0, 255, 0]);
        data.extend_from_slice(&[0, 0, 255, 255, 255, 255]);

        let tex = decode("T", Cursor::new(data)).unwrap();
        assert_eq!(tex.pixels, vec![0xFF0000, 0xFFFFFF, 0x0000FF, 0x00FF00]);
    }

    #[test]
    fn top_down_32bpp_keeps_order_and_drops_alpha() {
        let mut data = header(2, 2, 1, 32, ORIGIN_TOP, 0);
        data.extend_from_slice(&[1, 2, 3, 99, 4, 5, 6, 99]);
        let tex = decode("T", Cursor::new(data)).unwrap();
        assert_eq!(tex.pixels, vec![0x030201, 0x060504]);
    }

    #[test]
    fn rle_packets_expand() {
        let mut data = header(10, 4, 1, 24, ORIGIN_TOP, 0);
        data.extend_from_slice(&[0x82, 0, 255, 0]); // run of 3 green
        data.extend_from_slice(&[0x00, 0, 0, 255]); // 1 raw red
        let tex = decode("T", Cursor::new(data)).unwrap();
        assert_eq!(tex.pixels, vec![0x00FF00, 0x00FF00, 0x00FF00, 0xFF0000]);
    }

    #[test]
    fn truncated_and_unsupported_inputs() {
        let mut data = header(2, 2, 2, 24, 0, 0);
        data.extend_from_slice(&[0; 5]);
        assert!(matches!(decode("T", Cursor::new(data)), Err(TgaError::Truncated)));

        let data = header(1, 2, 2, 8, 0, 0);
        assert!(matches!(
            decode("T", Cursor::new(data)),
            Err(TgaError::UnsupportedType(1))
        ));

        let data = header(2, 2, 2, 16, 0, 0);
        assert!(matches!(
            decode("T", Cursor::new(data)),
            Err(TgaError::UnsupportedDepth(16))
        ));

        let mut data = header(2, 3, 1, 24, 0, 0);
        data.extend_from_slice(&[0; 9]);
        assert!(matches!(
            decode("T", Cursor::new(data)),
            Err(TgaError::Texture(TextureError::NotPowerOfTwo { .. }))
        ));
    }

    #[test]
    fn oversized_header_is_rejected_before_reading_pixels() {
        let data = header(2, 65535, 65535, 24, ORIGIN_TOP, 0);
        assert!(matches!(
            decode("T", Cursor::new(data)),
            Err(TgaError::TooLarge { w: 65535, h: 65535 })
        ));

        // power of two, but still beyond the limit
        let data = header(10, 32768, 32768, 32, ORIGIN_TOP, 0);
        assert!(matches!(
            decode("T", Cursor::new(data)),
            Err(TgaError::TooLarge { .. })
        ));

        // within the limit but not a power of two: no pixel data needed
        let data = header(2, 4095, 2, 24, ORIGIN_TOP, 0);
        assert!(matches!(
            decode("T", Cursor::new(data)),
            Err(TgaError::Texture(TextureError::NotPowerOfTwo { w: 4095, h: 2, .. }))
        ));
    }

    #[test]
    fn load_names_texture_after_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.tga");
        let mut f = File::create(&path).unwrap();
        f.write_all(&header(2, 1, 1, 24, 0, 0)).unwrap();
        f.write_all(&[10, 20, 30]).unwrap();
        drop(f);

        let tex = load(&path).unwrap();
        assert_eq!(tex.name, "BOOKS");
        assert_eq!(tex.pixels, vec![0x1E140A]);
    }
}
