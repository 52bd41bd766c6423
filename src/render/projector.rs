//! World-to-screen projection, back-face culling and flat lighting.
//!
//! Both the engine and the auto-framer go through [`Projector`], so the
//! bounding box of a scene always matches what gets rasterized.

use crate::camera::Camera;
use crate::element::{model_to_world, Face, Shape};
use crate::math::{Mat3, Vec2, Vec3};

use super::rasterizer::{TriVertex, Triangle};

/// Corner indices of the two triangles covering a face quad.
pub const TRIANGLES: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

/// Texture coordinates of the quad corners: bottom-left, bottom-right,
/// top-right, top-left.
const QUAD_UVS: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Camera state resolved for one image size.
#[derive(Debug, Clone)]
pub struct Projector {
    rotation: Mat3,
    translation: Vec3,
    center: Vec2,
    scale: f32,
    camera: Camera,
}

impl Projector {
    pub fn new(camera: &Camera, width: u32, height: u32) -> Self {
        Self {
            rotation: Mat3::from_euler_degrees(camera.view_rotation()),
            translation: camera.view_translation(),
            center: Vec2::new((width / 2) as f32, (height / 2) as f32),
            scale: camera.projection_scale(width, height),
            camera: camera.clone(),
        }
    }

    /// Pixels per view-space unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn to_view(&self, world: Vec3) -> Vec3 {
        self.rotation * world - self.translation
    }

    /// Screen position and depth (`-view.z`, larger is nearer) of a world
    /// point.
    #[inline]
    pub fn project(&self, world: Vec3) -> (Vec2, f32) {
        let view = self.to_view(world);
        let screen = Vec2::new(
            self.center.x - view.x * self.scale,
            self.center.y - view.y * self.scale,
        );
        (screen, -view.z)
    }

    /// Emits the visible, lit triangles of every textured face of a shape.
    ///
    /// A triangle is culled when its view-space normal does not point toward
    /// the viewer (`normal.z >= 0`), which also drops zero-area faces.
    pub fn shape_triangles(&self, shape: &dyn Shape, emit: &mut dyn FnMut(Triangle)) {
        let local = shape.local_vertices();
        let to_world = model_to_world(shape);

        for face in Face::ALL {
            let Some(texture) = shape.texture(face) else {
                continue;
            };
            let world = face.vertices().map(|i| to_world(local[i]));

            let mut corners = [TriVertex {
                x: 0.0,
                y: 0.0,
                depth: 0.0,
                u: 0.0,
                v: 0.0,
            }; 4];
            for ((corner, &point), &(u, v)) in corners.iter_mut().zip(&world).zip(&QUAD_UVS) {
                let (screen, depth) = self.project(point);
                *corner = TriVertex {
                    x: screen.x,
                    y: screen.y,
                    depth,
                    u,
                    v,
                };
            }

            for [a, b, c] in TRIANGLES {
                let normal = (world[b] - world[a]).cross(world[c] - world[a]).normalize();
                let normal = self.rotation * normal;
                if normal.z.is_nan() || normal.z >= 0.0 {
                    continue;
                }
                emit(Triangle::new(
                    [corners[a], corners[b], corners[c]],
                    texture.clone(),
                    self.camera.intensity(normal),
                ));
            }
        }
    }
}
