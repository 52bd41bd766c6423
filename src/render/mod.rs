//! Rendering pipeline building blocks.
//!
//! - [`projector`]: world to screen, culling and lighting
//! - [`rasterizer`]: triangle filling and shading
//! - [`framebuffer`]: depth-tested pixel storage

pub mod framebuffer;
pub mod projector;
pub mod rasterizer;

pub use framebuffer::FrameBuffer;
pub use projector::Projector;
pub use rasterizer::{EdgeFunctionRasterizer, TriVertex, Triangle};
