//! Edge function-based triangle rasterization.
//!
//! # Algorithm Overview
//!
//! 1. Compute the triangle's bounding box and clip it to the frame
//! 2. For each pixel center in the box, evaluate three edge functions
//! 3. A pixel is inside when all three agree in sign with the total area
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! Dividing each value by the total signed area gives the barycentric
//! weights, which are all non-negative inside the triangle whatever its
//! winding. They interpolate depth and texture coordinates.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use log::trace;

use super::shader::{PixelShader, TextureShader};
use super::{TriVertex, Triangle};
use crate::render::framebuffer::FrameBuffer;

/// Triangle rasterizer using the edge function algorithm.
///
/// Iterates over all pixels in the triangle's bounding box, keeps those whose
/// center lies inside, depth-tests them and composites the shaded texel.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    pub fn new() -> Self {
        EdgeFunctionRasterizer
    }

    /// Computes the edge function value for point P relative to edge (A -> B).
    ///
    /// - Positive: P is to the left of edge AB
    /// - Negative: P is to the right of edge AB
    /// - Zero: P lies exactly on the edge AB
    #[inline]
    fn edge_function(a: &TriVertex, b: &TriVertex, px: f32, py: f32) -> f32 {
        (px - a.x) * (b.y - a.y) - (py - a.y) * (b.x - a.x)
    }

    /// Fills a textured triangle into the frame buffer.
    pub fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer) {
        let shader = TextureShader::new(triangle);
        Self::rasterize_with_shader(&triangle.vertices, buffer, &shader);
    }

    /// Rasterize a triangle using the provided pixel shader.
    ///
    /// The shader runs only for covered pixels that pass the depth test.
    fn rasterize_with_shader<S: PixelShader>(
        vertices: &[TriVertex; 3],
        buffer: &mut FrameBuffer,
        shader: &S,
    ) {
        let [v0, v1, v2] = vertices;

        let area = Self::edge_function(v0, v1, v2.x, v2.y);
        if area.is_nan() || area.abs() < f32::EPSILON {
            trace!("skipping degenerate triangle {vertices:?}");
            return;
        }
        let inv_area = 1.0 / area;

        // ─────────────────────────────────────────────────────────────────────
        // Bounding box, skipped when fully off-frame, clipped otherwise
        // ─────────────────────────────────────────────────────────────────────
        let min_x = v0.x.min(v1.x).min(v2.x).floor();
        let max_x = v0.x.max(v1.x).max(v2.x).ceil();
        let min_y = v0.y.min(v1.y).min(v2.y).floor();
        let max_y = v0.y.max(v1.y).max(v2.y).ceil();

        let width = buffer.width() as f32;
        let height = buffer.height() as f32;
        if max_x < 0.0 || max_y < 0.0 || min_x >= width || min_y >= height {
            return;
        }

        let min_x = min_x.max(0.0) as i32;
        let max_x = max_x.min(width - 1.0) as i32;
        let min_y = min_y.max(0.0) as i32;
        let max_y = max_y.min(height - 1.0) as i32;

        for y in min_y..=max_y {
            let py = y as f32 + 0.5;
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;

                let l0 = Self::edge_function(v1, v2, px, py) * inv_area;
                if l0 < 0.0 {
                    continue;
                }
                let l1 = Self::edge_function(v2, v0, px, py) * inv_area;
                if l1 < 0.0 {
                    continue;
                }
                let l2 = Self::edge_function(v0, v1, px, py) * inv_area;
                if l2 < 0.0 {
                    continue;
                }

                let depth = l0 * v0.depth + l1 * v1.depth + l2 * v2.depth;
                if !buffer.passes_depth(x, y, depth) {
                    continue;
                }

                let color = shader.shade([l0, l1, l2]);
                buffer.blend_pixel_with_depth(x, y, depth, color);
            }
        }
    }
}
