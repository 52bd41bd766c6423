use super::{Axis, Face, Shape};
use crate::math::Vec3;
use crate::texture::Texture;

/// An axis-aligned box given by its minimum corner and per-axis size,
/// optionally rotated about an absolute pivot.
#[derive(Clone, Debug)]
pub struct Cube {
    size: Vec3,
    position: Vec3,
    rotation: Vec3,
    pivot: Vec3,
    textures: [Option<Texture>; 6],
}

impl Cube {
    /// An untextured, unrotated box. The pivot starts at the world origin.
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Cube {
            size,
            position,
            rotation: Vec3::ZERO,
            pivot: Vec3::ZERO,
            textures: Default::default(),
        }
    }

    /// Starts a box spanning the corners `from` and `to`.
    pub fn builder(from: Vec3, to: Vec3) -> CubeBuilder {
        CubeBuilder::from(from, to)
    }

    pub(crate) fn with_transform(
        &self,
        position: Vec3,
        size: Vec3,
        rotation: Vec3,
        pivot: Vec3,
    ) -> Self {
        Cube {
            size,
            position,
            rotation,
            pivot,
            textures: self.textures.clone(),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn set_face_texture(&mut self, face: Face, texture: Option<Texture>) {
        self.textures[face.index()] = texture;
    }
}

impl Shape for Cube {
    fn local_vertices(&self) -> [Vec3; 8] {
        let Vec3 { x, y, z } = self.size;
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, z),
            Vec3::new(0.0, y, 0.0),
            Vec3::new(0.0, y, z),
            Vec3::new(x, 0.0, 0.0),
            Vec3::new(x, 0.0, z),
            Vec3::new(x, y, 0.0),
            Vec3::new(x, y, z),
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
        self.with_transform(
            self.position + offset,
            self.size,
            self.rotation,
            self.pivot + offset,
        )
    }
}

/// Incremental construction of a [`Cube`].
#[derive(Clone, Debug)]
pub struct CubeBuilder {
    cube: Cube,
}

impl CubeBuilder {
    pub fn new(position: Vec3, size: Vec3) -> Self {
        CubeBuilder {
            cube: Cube::new(position, size),
        }
    }

    /// A box with its minimum corner at `from` and its maximum at `to`.
    pub fn from(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to - from)
    }

    /// Euler angles in degrees.
    pub fn rotation(mut self, rotation: Vec3) -> Self {
        self.cube.rotation = rotation;
        self
    }

    /// Rotation about a single axis, replacing any previous rotation.
    pub fn rotation_axis(self, degrees: f32, axis: Axis) -> Self {
        self.rotation(axis.rotation(degrees))
    }

    pub fn pivot(mut self, pivot: Vec3) -> Self {
        self.cube.pivot = pivot;
        self
    }

    /// Paints every face with the same texture.
    pub fn texture(mut self, texture: &Texture) -> Self {
        self.cube.textures = std::array::from_fn(|_| Some(texture.clone()));
        self
    }

    pub fn face_texture(mut self, face: Face, texture: Option<Texture>) -> Self {
        self.cube.set_face_texture(face, texture);
        self
    }

    /// Paints one face with the region `(x1, y1)..(x2, y2)` of `texture`.
    ///
    /// The face is left bare when the region holds no visible pixel.
    #[allow(clippy::too_many_arguments)]
    pub fn face_uv(
        self,
        face: Face,
        texture: &Texture,
        rotation: u8,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    ) -> Self {
        let view = texture.uv(x1, y1, x2 - x1, y2 - y1, rotation);
        self.face_texture(face, view)
    }

    pub fn build(self) -> Cube {
        self.cube
    }
}
