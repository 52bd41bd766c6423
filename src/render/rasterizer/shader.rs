//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer handles coverage, barycentric weights and depth; the
//! shader turns the weights into a color.

use crate::colors::modulate;
use crate::texture::Texture;

use super::Triangle;

/// Trait for per-pixel shading computations.
///
/// The rasterizer calls `shade()` for each covered pixel that passed the
/// depth test, providing the barycentric coordinates `[λ₀, λ₁, λ₂]` (summing
/// to 1) for attribute interpolation.
pub trait PixelShader {
    fn shade(&self, lambda: [f32; 3]) -> u32;
}

/// Samples the face texture at the interpolated UV and applies the flat
/// light intensity. Alpha is left untouched for compositing.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    uvs: [(f32, f32); 3],
    intensity: f32,
}

impl<'a> TextureShader<'a> {
    pub fn new(triangle: &'a Triangle) -> Self {
        Self {
            texture: &triangle.texture,
            uvs: triangle.vertices.map(|v| (v.u, v.v)),
            intensity: triangle.intensity,
        }
    }

    #[inline]
    fn interpolate_uv(&self, lambda: [f32; 3]) -> (f32, f32) {
        let [a, b, c] = self.uvs;
        (
            lambda[0] * a.0 + lambda[1] * b.0 + lambda[2] * c.0,
            lambda[0] * a.1 + lambda[1] * b.1 + lambda[2] * c.1,
        )
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        let (u, v) = self.interpolate_uv(lambda);
        modulate(self.texture.sample(u, v), self.intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::rasterizer::TriVertex;

    #[test]
    fn shades_interpolated_texel() {
        // Left column dark, right column bright.
        let texture = Texture::from_argb(2, 1, vec![0xFF10_1010, 0xFF80_8080], true).unwrap();
        let corner = |u: f32| TriVertex {
            x: 0.0,
            y: 0.0,
            depth: 0.0,
            u,
            v: 0.0,
        };
        let triangle = Triangle::new([corner(0.0), corner(1.0), corner(1.0)], texture, 0.5);
        let shader = TextureShader::new(&triangle);
        assert_eq!(shader.shade([1.0, 0.0, 0.0]), 0xFF08_0808);
        assert_eq!(shader.shade([0.0, 0.5, 0.5]), 0xFF40_4040);
    }
}
