//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a view into color and depth buffers with bounds-checked access.
//! The depth buffer enables hidden surface removal via the z-buffer
//! algorithm.

use crate::colors;

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass buffers + dimensions together.
///
/// # Depth Buffer
///
/// The depth buffer stores `-view.z` for each pixel. Larger values are
/// closer to the viewer; `f32::NEG_INFINITY` means nothing was drawn.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            (width * height) as usize,
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            (width * height) as usize,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Whether `depth` is strictly closer than what is stored at (x, y).
    /// Out-of-bounds coordinates never pass.
    #[inline]
    pub fn passes_depth(&self, x: i32, y: i32, depth: f32) -> bool {
        self.index(x, y)
            .is_some_and(|idx| depth > self.depth_buffer[idx])
    }

    /// Composites a lit texel at (x, y) with depth testing.
    ///
    /// Fully transparent texels are dropped. Otherwise the texel is blended
    /// over the stored color and the depth is updated. Silently ignores
    /// out-of-bounds coordinates.
    #[inline]
    pub fn blend_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: u32) {
        if colors::alpha(color) == 0 {
            return;
        }
        if let Some(idx) = self.index(x, y) {
            if depth > self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = colors::blend(color, self.color_buffer[idx]);
            }
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }
}
