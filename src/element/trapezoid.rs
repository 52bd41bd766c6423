use super::{Face, Shape};
use crate::math::{Vec2, Vec3};
use crate::texture::Texture;

/// A box whose south (+Z) face is widened or narrowed, used for bent limb
/// segments.
///
/// The south face's bottom vertices move down by `taper.y` and its top
/// vertices up by `taper.y`; its left vertices move by `-taper.x` and its
/// right ones by `+taper.x`. Negative tapers narrow the face.
#[derive(Clone, Debug)]
pub struct Trapezoid {
    size: Vec3,
    position: Vec3,
    rotation: Vec3,
    pivot: Vec3,
    taper: Vec2,
    textures: [Option<Texture>; 6],
}

impl Trapezoid {
    pub fn new(position: Vec3, size: Vec3, taper: Vec2) -> Self {
        Trapezoid {
            size,
            position,
            rotation: Vec3::ZERO,
            pivot: Vec3::ZERO,
            taper,
            textures: Default::default(),
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_pivot(mut self, pivot: Vec3) -> Self {
        self.pivot = pivot;
        self
    }

    /// Paints every face with the same texture.
    pub fn with_texture(mut self, texture: &Texture) -> Self {
        self.textures = std::array::from_fn(|_| Some(texture.clone()));
        self
    }

    pub fn with_face_texture(mut self, face: Face, texture: Option<Texture>) -> Self {
        self.textures[face.index()] = texture;
        self
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn taper(&self) -> Vec2 {
        self.taper
    }
}

impl Shape for Trapezoid {
    fn local_vertices(&self) -> [Vec3; 8] {
        let Vec3 { x, y, z } = self.size;
        let t = self.taper;
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-t.x, -t.y, z),
            Vec3::new(0.0, y, 0.0),
            Vec3::new(-t.x, y + t.y, z),
            Vec3::new(x, 0.0, 0.0),
            Vec3::new(x + t.x, -t.y, z),
            Vec3::new(x, y, 0.0),
            Vec3::new(x + t.x, y + t.y, z),
        ]
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Vec3 {
        self.rotation
    }

    fn pivot(&self) -> Vec3 {
        self.pivot
    }

    fn texture(&self, face: Face) -> Option<&Texture> {
        self.textures[face.index()].as_ref()
    }

    fn translated(&self, offset: Vec3) -> Self {
        Trapezoid {
            position: self.position + offset,
            pivot: self.pivot + offset,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Cube, FACE_VERTICES};

    #[test]
    fn zero_taper_matches_cube() {
        let size = Vec3::new(2.0, 3.0, 4.0);
        let trapezoid = Trapezoid::new(Vec3::ZERO, size, Vec2::ZERO);
        let cube = Cube::new(Vec3::ZERO, size);
        assert_eq!(trapezoid.local_vertices(), cube.local_vertices());
    }

    #[test]
    fn taper_only_moves_south_face() {
        let size = Vec3::new(2.0, 3.0, 4.0);
        let taper = Vec2::new(0.5, 1.0);
        let plain = Cube::new(Vec3::ZERO, size).local_vertices();
        let tapered = Trapezoid::new(Vec3::ZERO, size, taper).local_vertices();

        let south = FACE_VERTICES[Face::South.index()];
        for i in 0..8 {
            if south.contains(&i) {
                assert_ne!(plain[i], tapered[i]);
                assert_eq!(plain[i].z, tapered[i].z);
            } else {
                assert_eq!(plain[i], tapered[i]);
            }
        }
        // Bottom-left and top-right corners of the south face.
        assert_eq!(tapered[1], Vec3::new(-0.5, -1.0, 4.0));
        assert_eq!(tapered[7], Vec3::new(2.5, 4.0, 4.0));
    }

    #[test]
    fn translated_keeps_taper() {
        let trapezoid = Trapezoid::new(Vec3::ZERO, Vec3::ONE, Vec2::new(0.1, 0.2))
            .with_pivot(Vec3::ONE)
            .translated(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(trapezoid.position(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(trapezoid.pivot(), Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(trapezoid.taper(), Vec2::new(0.1, 0.2));
    }
}
