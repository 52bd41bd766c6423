//! Triangle rasterization.
//!
//! Screen-space triangles are filled with the edge function algorithm
//! ([`EdgeFunctionRasterizer`]); per-pixel colors come from a
//! [`PixelShader`].

mod edgefunction;
mod shader;

pub use edgefunction::EdgeFunctionRasterizer;
pub use shader::{PixelShader, TextureShader};

use crate::texture::Texture;

/// A projected triangle corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriVertex {
    /// Screen position in pixels.
    pub x: f32,
    pub y: f32,
    /// `-view.z`; larger is nearer.
    pub depth: f32,
    /// Normalized texture coordinates over the face.
    pub u: f32,
    pub v: f32,
}

/// A textured triangle ready for rasterization in screen space.
#[derive(Clone, Debug)]
pub struct Triangle {
    pub vertices: [TriVertex; 3],
    pub texture: Texture,
    /// Flat light intensity in `[0, 1]`.
    pub intensity: f32,
    /// Opaque triangles are drawn first, in any order.
    pub opaque: bool,
    /// Largest corner depth, the sort key of transparent triangles.
    pub max_depth: f32,
}

impl Triangle {
    pub fn new(vertices: [TriVertex; 3], texture: Texture, intensity: f32) -> Self {
        let max_depth = vertices
            .iter()
            .map(|v| v.depth)
            .fold(f32::NEG_INFINITY, f32::max);
        Self {
            vertices,
            opaque: !texture.is_transparent(),
            texture,
            intensity,
            max_depth,
        }
    }
}
