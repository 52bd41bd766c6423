use super::{model_to_world, placement, Cube, Shape};
use crate::math::{Mat3, Vec3};

/// Cubes sharing one extra transform.
///
/// The group transform works like a shape's: children are scaled, placed at
/// the group position and rotated about the group pivot. Groups are never
/// rendered directly; [`Group::flatten`] bakes the transform into plain
/// cubes.
#[derive(Clone, Debug)]
pub struct Group {
    children: Vec<Cube>,
    scale: Vec3,
    rotation: Vec3,
    pivot: Vec3,
    position: Vec3,
}

impl Default for Group {
    fn default() -> Self {
        Group {
            children: Vec::new(),
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            pivot: Vec3::ZERO,
            position: Vec3::ZERO,
        }
    }
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, cube: Cube) -> Self {
        self.children.push(cube);
        self
    }

    pub fn push(&mut self, cube: Cube) {
        self.children.push(cube);
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_pivot(mut self, pivot: Vec3) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn children(&self) -> &[Cube] {
        &self.children
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn translated(&self, offset: Vec3) -> Group {
        Group {
            position: self.position + offset,
            pivot: self.pivot + offset,
            ..self.clone()
        }
    }

    /// Bakes the group transform into each child.
    ///
    /// Every rotated child is first re-pivoted onto its own origin corner,
    /// which keeps its geometry. The corner is then scaled and mapped through
    /// the group transform, the size is scaled, and the rotation becomes the
    /// product of the group and child matrices. With a unit scale the
    /// resulting cubes cover exactly the transformed children.
    pub fn flatten(&self) -> Vec<Cube> {
        let to_world = placement(self.rotation, self.position, self.pivot);
        let group_matrix = Mat3::from_euler_degrees(self.rotation);

        self.children
            .iter()
            .map(|child| {
                let child = pivot_on_origin(child);
                let position = to_world(child.position().mul_elements(self.scale));
                let rotation = (group_matrix * child.rotation_matrix()).to_euler_degrees();
                child.with_transform(
                    position,
                    child.size().mul_elements(self.scale),
                    rotation,
                    position,
                )
            })
            .collect()
    }
}

/// Moves a rotated cube's position and pivot onto its world-space origin
/// corner without changing its geometry.
fn pivot_on_origin(cube: &Cube) -> Cube {
    if cube.rotation() == Vec3::ZERO || cube.pivot() == cube.position() {
        return cube.clone();
    }
    let corner = model_to_world(cube)(Vec3::ZERO);
    cube.with_transform(corner, cube.size(), cube.rotation(), corner)
}
