//! A headless, CPU-only orthographic rasterizer for textured cuboid models.
//!
//! Scenes are made of [`Cube`]s, tapered [`Trapezoid`]s and [`Group`]s of
//! cubes, each face painted with its own [`Texture`] region. An [`Engine`]
//! projects them orthographically, culls back faces, lights every face
//! flat and composites opaque then transparent triangles into one ARGB
//! image. [`AutoFramer`] picks the zoom and pan that make a scene fill the
//! image.
//!
//! # Quick Start
//!
//! ```no_run
//! use cubist::prelude::*;
//!
//! # fn main() -> cubist::Result<()> {
//! let texture = Texture::open("stone.png")?;
//! let mut engine = Engine::new(512, 512);
//! engine.camera_mut().set_rotation(30, 45, 0);
//! engine.add_element(Cube::builder(Vec3::ZERO, Vec3::ONE).texture(&texture));
//! AutoFramer::new().render(&mut engine).save("stone_cube.png")?;
//! # Ok(())
//! # }
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod framer;
pub mod math;
pub mod texture;

pub(crate) mod render;

pub use camera::Camera;
pub use config::RenderConfig;
pub use element::{Axis, Cube, CubeBuilder, Element, Face, Group, Shape, Trapezoid};
pub use engine::{Engine, RenderedImage};
pub use error::{Error, Result};
pub use framer::{AutoFramer, BoundingBox, Framing};
pub use texture::{PlaceholderPalette, Texture};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use cubist::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::config::RenderConfig;
    pub use crate::element::{Axis, Cube, CubeBuilder, Element, Face, Group, Shape, Trapezoid};
    pub use crate::engine::{Engine, RenderedImage};
    pub use crate::framer::AutoFramer;
    pub use crate::math::{Mat3, Vec2, Vec3};
    pub use crate::texture::{PlaceholderPalette, Texture};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{EdgeFunctionRasterizer, FrameBuffer, Projector, TriVertex, Triangle};
}
