//! Generated stand-in textures for faces whose texture could not be found.

use std::path::Path;
use std::sync::Arc;

use log::warn;

use super::{PixelBuffer, Texture};

const SIZE: u32 = 16;

/// Light, base, checker and dark shades of each placeholder.
const COLOR_SETS: [(&str, [u32; 4]); 5] = [
    ("green", [0x62cc82, 0x5abb78, 0x58b675, 0x50a66a]),
    ("pink", [0xcc84aa, 0xbb799c, 0xb67698, 0xa66c8b]),
    ("red", [0xcc7c79, 0xbb726f, 0xb66f6c, 0xa66562]),
    ("blue", [0x81bccc, 0x77acbb, 0x74a8b6, 0x6a99a6]),
    ("gold", [0xccc67a, 0xbbb670, 0xb6b16d, 0xa6a264]),
];

/// Top/left edges and the three bars of the icon.
const LIGHT_RECTS: [(u32, u32, u32, u32); 5] =
    [(0, 0, 1, 15), (0, 0, 15, 1), (4, 8, 2, 5), (7, 10, 2, 3), (10, 3, 2, 10)];

/// Hands out opaque 16x16 placeholder textures, cycling through five color
/// sets in a fixed order: green, pink, red, blue, gold.
///
/// The cycle position is plain state owned by the caller, so two palettes
/// never influence each other.
#[derive(Clone, Debug, Default)]
pub struct PlaceholderPalette {
    next: usize,
}

impl PlaceholderPalette {
    /// Number of distinct placeholders before the cycle repeats.
    pub const COUNT: usize = COLOR_SETS.len();

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next placeholder and advances the cycle.
    pub fn next_texture(&mut self) -> Texture {
        let texture = Self::texture(self.next);
        self.next = (self.next + 1) % Self::COUNT;
        texture
    }

    /// Opens a texture file, falling back to the next placeholder when it
    /// cannot be read or decoded.
    pub fn open_or_next<P: AsRef<Path>>(&mut self, path: P) -> Texture {
        let path = path.as_ref();
        match Texture::open(path) {
            Ok(texture) => texture,
            Err(err) => {
                warn!("{}: {err}, using a placeholder", path.display());
                self.next_texture()
            }
        }
    }

    /// Restarts the cycle at the first color set.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Draws the placeholder of the given color set (modulo the set count).
    pub fn texture(index: usize) -> Texture {
        let (name, [light, base, checker, dark]) = COLOR_SETS[index % COLOR_SETS.len()];
        let mut canvas = Canvas::filled(base);

        for i in (0..15 * 15).step_by(2) {
            canvas.fill_rect(i % 15 + 1, i / 15 + 1, 1, 1, checker);
        }

        for (x, y, w, h) in LIGHT_RECTS {
            canvas.fill_rect(x, y, w, h, light);
        }

        canvas.fill_rect(15, 1, 1, 15, dark);
        canvas.fill_rect(1, 15, 15, 1, dark);

        let buffer = PixelBuffer {
            width: SIZE,
            height: SIZE,
            pixels: canvas.pixels,
            has_alpha: false,
        };
        Texture::from_buffer(buffer, Some(Arc::from(format!("placeholder#{name}"))))
    }
}

struct Canvas {
    pixels: Vec<u32>,
}

impl Canvas {
    fn filled(rgb: u32) -> Self {
        Canvas {
            pixels: vec![0xFF00_0000 | rgb; (SIZE * SIZE) as usize],
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, rgb: u32) {
        for row in y..(y + h).min(SIZE) {
            for col in x..(x + w).min(SIZE) {
                self.pixels[(row * SIZE + col) as usize] = 0xFF00_0000 | rgb;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixels(texture: &Texture) -> Vec<u32> {
        texture.buffer().pixels().to_vec()
    }

    #[test]
    fn placeholders_are_opaque_squares() {
        let mut palette = PlaceholderPalette::new();
        for _ in 0..PlaceholderPalette::COUNT {
            let tex = palette.next_texture();
            assert_eq!((tex.buffer().width(), tex.buffer().height()), (16, 16));
            assert!(!tex.is_transparent());
            assert!(tex.buffer().pixels().iter().all(|p| p >> 24 == 0xFF));
        }
    }

    #[test]
    fn palette_cycles_through_five_sets() {
        let mut palette = PlaceholderPalette::new();
        let first: Vec<_> = (0..5).map(|_| palette.next_texture()).collect();
        assert_eq!(first[0].name(), Some("placeholder#green"));
        assert_eq!(first[4].name(), Some("placeholder#gold"));
        assert_ne!(pixels(&first[0]), pixels(&first[1]));

        let sixth = palette.next_texture();
        assert_eq!(pixels(&sixth), pixels(&first[0]));
    }

    #[test_log::test]
    fn unreadable_file_falls_back_to_placeholder() {
        let mut palette = PlaceholderPalette::new();
        palette.next_texture();
        let tex = palette.open_or_next("/no/such/texture.png");
        assert_eq!(tex.name(), Some("placeholder#pink"));
    }

    #[test]
    fn reset_restarts_cycle() {
        let mut palette = PlaceholderPalette::new();
        palette.next_texture();
        palette.next_texture();
        palette.reset();
        assert_eq!(palette.next_texture().name(), Some("placeholder#green"));
    }

    #[test]
    fn pattern_matches_layout() {
        let tex = PlaceholderPalette::texture(0);
        let px = tex.buffer().pixels();
        let at = |x: usize, y: usize| px[y * 16 + x] & 0x00FF_FFFF;
        assert_eq!(at(0, 0), 0x62cc82);
        assert_eq!(at(15, 15), 0x50a66a);
        assert_eq!(at(1, 1), 0x58b675);
        assert_eq!(at(2, 1), 0x5abb78);
        assert_eq!(at(10, 5), 0x62cc82);
    }
}
