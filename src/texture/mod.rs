//! Shared pixel buffers and the UV views painted onto element faces.
//!
//! A [`Texture`] never owns its pixels: every view created through
//! [`Texture::uv`] points at the same [`PixelBuffer`] and only carries its
//! own sub-rectangle, quarter-turn rotation and transparency flag.
//!
//! # Texture space
//!
//! Sub-rectangles are expressed in buffer pixels with the origin at the
//! top-left corner. Sampling coordinates `(u, v)` are normalized with `v`
//! pointing up, so `(0, 0)` lands on the bottom-left of the region.

mod palette;

use std::path::Path;
use std::sync::Arc;

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::colors::{self, TRANSPARENT};
use crate::error::{Error, Result};

pub use palette::PlaceholderPalette;

/// Regions larger than this are probed at random instead of scanned fully.
const MAX_SCAN: usize = 2000;
const SCAN_SEED: u64 = 12345;

/// Decoded ARGB samples, row-major, top row first.
#[derive(Debug, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    has_alpha: bool,
}

impl PixelBuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Whether the source carried an alpha channel at all.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    #[inline]
    fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Returns true if any pixel of the region satisfies `hit`.
    ///
    /// The region is floored/ceiled to whole pixels and clipped to the
    /// buffer. Up to [`MAX_SCAN`] pixels are checked exhaustively; larger
    /// regions are probed at [`MAX_SCAN`] positions drawn from a fixed seed,
    /// so the answer is deterministic but may miss isolated pixels.
    fn scan(&self, region: Region, hit: impl Fn(u32) -> bool) -> bool {
        let x0 = (region.x.floor() as i64).clamp(0, self.width as i64);
        let y0 = (region.y.floor() as i64).clamp(0, self.height as i64);
        let x1 = ((region.x.floor() + region.w.ceil()) as i64).clamp(x0, self.width as i64);
        let y1 = ((region.y.floor() + region.h.ceil()) as i64).clamp(y0, self.height as i64);
        let (x0, y0, x1, y1) = (x0 as u32, y0 as u32, x1 as u32, y1 as u32);
        let (w, h) = (x1 - x0, y1 - y0);
        if w == 0 || h == 0 {
            return false;
        }

        if (w as usize) * (h as usize) <= MAX_SCAN {
            (y0..y1).any(|y| (x0..x1).any(|x| hit(self.get(x, y))))
        } else {
            let mut rng = StdRng::seed_from_u64(SCAN_SEED);
            (0..MAX_SCAN).any(|_| {
                let x = x0 + rng.random_range(0..w);
                let y = y0 + rng.random_range(0..h);
                hit(self.get(x, y))
            })
        }
    }
}

/// A sub-rectangle of a pixel buffer, in buffer pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Region {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl Region {
    /// Flips negative extents so the region grows right and down.
    fn normalized(x: f32, y: f32, w: f32, h: f32) -> Self {
        let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
        Region { x, y, w, h }
    }

    fn is_zero_area(&self) -> bool {
        self.w == 0.0 || self.h == 0.0
    }
}

/// An image, or a rotated portion of one, painted over a face.
///
/// Cloning is cheap: the pixel buffer is shared.
#[derive(Clone, Debug)]
pub struct Texture {
    buffer: Arc<PixelBuffer>,
    region: Region,
    rotation: u8,
    transparent: bool,
    name: Option<Arc<str>>,
}

impl Texture {
    /// Decodes an encoded image (PNG, JPEG, ...) into a full-size texture.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_image(image, None))
    }

    /// Loads a texture from disk, named after the file.
    ///
    /// Animated strips, recognized by a sibling `<file>.mcmeta`, are cropped
    /// to their first square frame.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut image = image::open(path)?;

        let mut meta = path.as_os_str().to_owned();
        meta.push(".mcmeta");
        if Path::new(&meta).exists() {
            let side = image.width().min(image.height());
            trace!("{}: animated, keeping first {side}x{side} frame", path.display());
            image = image.crop_imm(0, 0, image.width(), side);
        }

        let name = path
            .file_name()
            .map(|n| Arc::from(n.to_string_lossy().as_ref()));
        Ok(Self::from_image(image, name))
    }

    /// Wraps already decoded ARGB samples.
    ///
    /// Without an alpha channel every sample is forced opaque.
    pub fn from_argb(
        width: u32,
        height: u32,
        mut pixels: Vec<u32>,
        has_alpha: bool,
    ) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        if !has_alpha {
            for p in pixels.iter_mut() {
                *p |= 0xFF00_0000;
            }
        }
        Ok(Self::from_buffer(
            PixelBuffer {
                width,
                height,
                pixels,
                has_alpha,
            },
            None,
        ))
    }

    fn from_image(image: image::DynamicImage, name: Option<Arc<str>>) -> Self {
        let has_alpha = image.color().has_alpha();
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                colors::pack_argb(a, r, g, b)
            })
            .collect();
        Self::from_buffer(
            PixelBuffer {
                width,
                height,
                pixels,
                has_alpha,
            },
            name,
        )
    }

    pub(crate) fn from_buffer(buffer: PixelBuffer, name: Option<Arc<str>>) -> Self {
        let region = Region {
            x: 0.0,
            y: 0.0,
            w: buffer.width as f32,
            h: buffer.height as f32,
        };
        let transparent = buffer.has_alpha && buffer.scan(region, |p| colors::alpha(p) < u8::MAX);
        Texture {
            buffer: Arc::new(buffer),
            region,
            rotation: 0,
            transparent,
            name,
        }
    }

    /// Replaces the debug name.
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Creates a view of the same buffer with a new sub-rectangle and
    /// rotation (quarter turns, taken modulo 4).
    ///
    /// Coordinates are buffer pixels. A negative width or height flips the
    /// region so it extends left or up from `(x, y)`. Returns `None` when
    /// no pixel of the region is visible; a zero-area region is kept.
    pub fn uv(&self, x: f32, y: f32, w: f32, h: f32, rotation: u8) -> Option<Texture> {
        let region = Region::normalized(x, y, w, h);
        if !region.is_zero_area() && !self.buffer.scan(region, |p| colors::alpha(p) > 0) {
            trace!(
                "{}: uv region {:?} has no visible pixel",
                self.name().unwrap_or("<unnamed>"),
                region
            );
            return None;
        }

        let transparent =
            self.transparent && self.buffer.scan(region, |p| colors::alpha(p) < u8::MAX);
        Some(Texture {
            buffer: Arc::clone(&self.buffer),
            region,
            rotation: rotation % 4,
            transparent,
            name: self.name.clone(),
        })
    }

    /// Same as [`Texture::uv`] with coordinates in model units, where
    /// `units` spans the whole buffer on each axis (16 for block models).
    pub fn uv_units(
        &self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        rotation: u8,
        units: f32,
    ) -> Option<Texture> {
        let sx = self.buffer.width as f32 / units;
        let sy = self.buffer.height as f32 / units;
        self.uv(x * sx, y * sy, w * sx, h * sy, rotation)
    }

    /// Returns the raw ARGB sample at normalized `(u, v)`.
    ///
    /// Coordinates are clamped to `[0, 1]`, rotated by the view's quarter
    /// turns, mapped into the sub-rectangle with nearest-neighbor flooring
    /// and finally clamped to the buffer.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let buffer = &self.buffer;
        if buffer.pixels.is_empty() {
            return TRANSPARENT;
        }

        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let (s, t) = match self.rotation {
            0 => (u, 1.0 - v),
            1 => (1.0 - v, 1.0 - u),
            2 => (1.0 - u, v),
            _ => (v, u),
        };

        let r = &self.region;
        let px = ((r.x + s * r.w).floor() as i64).clamp(0, buffer.width as i64 - 1);
        let py = ((r.y + t * r.h).floor() as i64).clamp(0, buffer.height as i64 - 1);
        buffer.get(px as u32, py as u32)
    }

    /// Whether the region holds pixels with partial alpha. Computed once.
    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// The sub-rectangle as `(x, y, width, height)` in buffer pixels.
    pub fn region(&self) -> (f32, f32, f32, f32) {
        (self.region.x, self.region.y, self.region.w, self.region.h)
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// True when both textures read from the same pixel buffer.
    pub fn shares_buffer(&self, other: &Texture) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const A: u32 = 0xFFAA_0000;
    const B: u32 = 0xFF00_BB00;
    const C: u32 = 0xFF00_00CC;
    const D: u32 = 0xFFDD_DDDD;

    fn quad() -> Texture {
        Texture::from_argb(2, 2, vec![A, B, C, D], true).unwrap()
    }

    fn png_bytes(image: image::DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn from_argb_rejects_wrong_length() {
        let err = Texture::from_argb(4, 4, vec![0; 15], true).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSize {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn alpha_less_source_is_never_transparent() {
        let tex = Texture::from_argb(2, 1, vec![0x0012_3456, 0x7F00_0000], false).unwrap();
        assert!(!tex.is_transparent());
        assert_eq!(tex.sample(0.0, 1.0), 0xFF12_3456);
    }

    #[test]
    fn one_translucent_pixel_marks_small_region_transparent() {
        let mut pixels = vec![0xFF00_0000; 40 * 40];
        pixels[40 * 39 + 39] = 0xFE00_0000;
        let tex = Texture::from_argb(40, 40, pixels, true).unwrap();
        assert!(tex.is_transparent());

        let opaque_part = tex.uv(0.0, 0.0, 20.0, 20.0, 0).unwrap();
        assert!(!opaque_part.is_transparent());
        assert!(tex.uv(30.0, 30.0, 10.0, 10.0, 0).unwrap().is_transparent());
    }

    #[test]
    fn large_regions_are_probed() {
        let glass = Texture::from_argb(100, 100, vec![0x8000_FF00; 10_000], true).unwrap();
        assert!(glass.is_transparent());
        let solid = Texture::from_argb(100, 100, vec![0xFF00_FF00; 10_000], true).unwrap();
        assert!(!solid.is_transparent());
    }

    #[test]
    fn uv_over_invisible_pixels_is_absent() {
        let tex = Texture::from_argb(4, 1, vec![0, 0, A, 0], true).unwrap();
        assert!(tex.uv(0.0, 0.0, 2.0, 1.0, 0).is_none());
        assert!(tex.uv(2.0, 0.0, 1.0, 1.0, 0).is_some());
        assert!(tex.uv(1.0, 0.0, 0.0, 1.0, 0).is_some());
    }

    #[test]
    fn uv_negative_extent_flips_origin() {
        let tex = quad();
        let flipped = tex.uv(2.0, 2.0, -1.0, -2.0, 0).unwrap();
        assert_eq!(flipped.region(), (1.0, 0.0, 1.0, 2.0));
        assert!(flipped.shares_buffer(&tex));
    }

    #[test]
    fn uv_views_share_pixels() {
        let tex = quad().with_name("quad");
        let view = tex.uv(1.0, 0.0, 1.0, 1.0, 5).unwrap();
        assert!(view.shares_buffer(&tex));
        assert_eq!(view.rotation(), 1);
        assert_eq!(view.name(), Some("quad"));
        assert_eq!(view.sample(0.5, 0.5), B);
    }

    #[test]
    fn uv_units_rescale_to_buffer() {
        let tex = Texture::from_argb(32, 32, vec![A; 32 * 32], true).unwrap();
        let view = tex.uv_units(8.0, 4.0, 8.0, -4.0, 0, 16.0).unwrap();
        assert_eq!(view.region(), (16.0, 0.0, 16.0, 8.0));
    }

    #[test]
    fn sample_applies_quarter_turns() {
        let tex = quad();
        let at = |r: u8| tex.uv(0.0, 0.0, 2.0, 2.0, r).unwrap().sample(0.25, 0.75);
        assert_eq!(at(0), A);
        assert_eq!(at(1), C);
        assert_eq!(at(2), D);
        assert_eq!(at(3), B);
    }

    #[test]
    fn sample_clamps_coordinates() {
        let tex = quad();
        assert_eq!(tex.sample(-5.0, 7.0), A);
        assert_eq!(tex.sample(3.0, -1.0), D);
        assert_eq!(tex.sample(0.0, 0.0), C);
    }

    #[test]
    fn decode_flags_alpha_from_color_type() {
        let rgba = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 128]));
        let tex = Texture::decode(&png_bytes(rgba.into())).unwrap();
        assert!(tex.buffer().has_alpha());
        assert!(tex.is_transparent());
        assert_eq!(tex.sample(0.5, 0.5), 0x800A_141E);

        let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        let tex = Texture::decode(&png_bytes(rgb.into())).unwrap();
        assert!(!tex.buffer().has_alpha());
        assert!(!tex.is_transparent());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            Texture::decode(b"not an image"),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn open_crops_animated_strip() {
        let dir = std::env::temp_dir().join(format!("cubist-texture-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("water.png");
        let strip = image::RgbaImage::from_pixel(4, 12, image::Rgba([0, 0, 255, 255]));
        std::fs::write(&path, png_bytes(strip.into())).unwrap();
        std::fs::write(dir.join("water.png.mcmeta"), "{}").unwrap();

        let tex = Texture::open(&path).unwrap();
        assert_eq!((tex.buffer().width(), tex.buffer().height()), (4, 4));
        assert_eq!(tex.name(), Some("water.png"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
