//! Box-like scene primitives.
//!
//! Every renderable primitive exposes exactly eight local-space vertices,
//! addressed by one face table shared by all variants. Vertex `i` sits at
//! the corner whose bits are `x = i >> 2`, `y = (i >> 1) & 1`, `z = i & 1`.

mod cube;
mod group;
mod trapezoid;

pub use cube::{Cube, CubeBuilder};
pub use group::Group;
pub use trapezoid::Trapezoid;

use crate::math::{Mat3, Vec3};
use crate::texture::Texture;

/// The six sides of a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    /// +Y
    Up,
    /// -Y
    Down,
    /// -Z
    North,
    /// +Z
    South,
    /// +X
    East,
    /// -X
    West,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::North,
        Face::South,
        Face::East,
        Face::West,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The four vertex indices of this face, see [`FACE_VERTICES`].
    #[inline]
    pub fn vertices(self) -> [usize; 4] {
        FACE_VERTICES[self.index()]
    }
}

/// Vertex indices of each face, ordered bottom-left, bottom-right,
/// top-right, top-left as seen from outside the box. The order is
/// counter-clockwise, so `(b - a) x (c - a)` points outward.
pub const FACE_VERTICES: [[usize; 4]; 6] = [
    [3, 7, 6, 2], // up
    [0, 4, 5, 1], // down
    [4, 0, 2, 6], // north
    [1, 5, 7, 3], // south
    [5, 4, 6, 7], // east
    [0, 1, 3, 2], // west
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Euler angles rotating `degrees` about this axis only.
    pub fn rotation(self, degrees: f32) -> Vec3 {
        match self {
            Axis::X => Vec3::new(degrees, 0.0, 0.0),
            Axis::Y => Vec3::new(0.0, degrees, 0.0),
            Axis::Z => Vec3::new(0.0, 0.0, degrees),
        }
    }
}

/// A renderable box-like primitive.
pub trait Shape {
    /// The eight corners in model space, see [`FACE_VERTICES`].
    fn local_vertices(&self) -> [Vec3; 8];

    fn position(&self) -> Vec3;

    /// Euler angles in degrees, applied as described by [`Vec3::rotate`].
    fn rotation(&self) -> Vec3;

    /// Absolute rotation origin.
    fn pivot(&self) -> Vec3;

    fn texture(&self, face: Face) -> Option<&Texture>;

    /// Returns a copy moved by `offset`; position and pivot move together.
    fn translated(&self, offset: Vec3) -> Self
    where
        Self: Sized;

    fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_euler_degrees(self.rotation())
    }

    fn world_vertices(&self) -> [Vec3; 8] {
        self.local_vertices().map(model_to_world(self))
    }
}

/// Returns the model-to-world mapping of a shape.
///
/// A local vertex is placed at the shape's position, then rotated about its
/// pivot: `R * (local + position - pivot) + pivot`.
pub fn model_to_world<S: Shape + ?Sized>(shape: &S) -> impl Fn(Vec3) -> Vec3 {
    placement(shape.rotation(), shape.position(), shape.pivot())
}

pub(crate) fn placement(rotation: Vec3, position: Vec3, pivot: Vec3) -> impl Fn(Vec3) -> Vec3 {
    let matrix = Mat3::from_euler_degrees(rotation);
    let offset = position - pivot;
    move |local| matrix * (local + offset) + pivot
}

/// Anything that can be added to a scene.
///
/// Forwards the [`Shape`] accessors. A group has no vertices of its own;
/// its cubes are reached through [`Element::for_each_shape`].
#[derive(Clone, Debug)]
pub enum Element {
    Cube(Cube),
    Trapezoid(Trapezoid),
    Group(Group),
}

impl Element {
    pub fn position(&self) -> Vec3 {
        match self {
            Element::Cube(cube) => cube.position(),
            Element::Trapezoid(trapezoid) => trapezoid.position(),
            Element::Group(group) => group.position(),
        }
    }

    pub fn rotation(&self) -> Vec3 {
        match self {
            Element::Cube(cube) => cube.rotation(),
            Element::Trapezoid(trapezoid) => trapezoid.rotation(),
            Element::Group(group) => group.rotation(),
        }
    }

    pub fn pivot(&self) -> Vec3 {
        match self {
            Element::Cube(cube) => cube.pivot(),
            Element::Trapezoid(trapezoid) => trapezoid.pivot(),
            Element::Group(group) => group.pivot(),
        }
    }

    /// Local vertices of a cube or trapezoid; `None` for a group.
    pub fn local_vertices(&self) -> Option<[Vec3; 8]> {
        match self {
            Element::Cube(cube) => Some(cube.local_vertices()),
            Element::Trapezoid(trapezoid) => Some(trapezoid.local_vertices()),
            Element::Group(_) => None,
        }
    }

    /// Texture of a face; groups have none of their own.
    pub fn texture(&self, face: Face) -> Option<&Texture> {
        match self {
            Element::Cube(cube) => cube.texture(face),
            Element::Trapezoid(trapezoid) => trapezoid.texture(face),
            Element::Group(_) => None,
        }
    }

    pub fn translated(&self, offset: Vec3) -> Element {
        match self {
            Element::Cube(cube) => Element::Cube(cube.translated(offset)),
            Element::Trapezoid(trapezoid) => Element::Trapezoid(trapezoid.translated(offset)),
            Element::Group(group) => Element::Group(group.translated(offset)),
        }
    }

    /// Calls `f` with every renderable shape, flattening groups.
    pub fn for_each_shape(&self, f: &mut dyn FnMut(&dyn Shape)) {
        match self {
            Element::Cube(cube) => f(cube),
            Element::Trapezoid(trapezoid) => f(trapezoid),
            Element::Group(group) => {
                for cube in group.flatten() {
                    f(&cube);
                }
            }
        }
    }
}

impl From<Cube> for Element {
    fn from(cube: Cube) -> Self {
        Element::Cube(cube)
    }
}

impl From<CubeBuilder> for Element {
    fn from(builder: CubeBuilder) -> Self {
        Element::Cube(builder.build())
    }
}

impl From<Trapezoid> for Element {
    fn from(trapezoid: Trapezoid) -> Self {
        Element::Trapezoid(trapezoid)
    }
}

impl From<Group> for Element {
    fn from(group: Group) -> Self {
        Element::Group(group)
    }
}
