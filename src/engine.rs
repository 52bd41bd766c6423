//! Core rendering engine.
//!
//! The [`Engine`] owns a scene of [`Element`]s, a [`Camera`] and the depth
//! buffer. Each [`Engine::render`] call runs the whole pipeline:
//!
//! 1. Reset the depth buffer to "nothing drawn"
//! 2. Project every textured face and cull the ones turned away
//! 3. Fill opaque triangles in any order
//! 4. Fill transparent triangles back to front
//!
//! Transparency is approximate: triangles are sorted by their nearest
//! corner, not per pixel.

use std::path::Path;

use log::debug;

use crate::camera::Camera;
use crate::colors::{self, TRANSPARENT};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::render::{EdgeFunctionRasterizer, FrameBuffer, Projector, Triangle};

/// Renders cuboid scenes into ARGB images of a fixed size.
pub struct Engine {
    width: u32,
    height: u32,
    camera: Camera,
    elements: Vec<Element>,
    depth_buffer: Vec<f32>,
    rasterizer: EdgeFunctionRasterizer,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            camera: Camera::default(),
            elements: Vec::new(),
            depth_buffer: vec![f32::NEG_INFINITY; (width as usize) * (height as usize)],
            rasterizer: EdgeFunctionRasterizer::new(),
        }
    }

    /// Image size as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) -> &mut Self {
        self.camera = camera;
        self
    }

    pub fn add_element(&mut self, element: impl Into<Element>) -> &mut Self {
        self.elements.push(element.into());
        self
    }

    pub fn add_elements<I>(&mut self, elements: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        self.elements.extend(elements.into_iter().map(Into::into));
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.elements.clear();
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Projects the scene with the current camera and hands every visible
    /// triangle to `emit`.
    pub(crate) fn visit_triangles(&self, projector: &Projector, emit: &mut dyn FnMut(Triangle)) {
        for element in &self.elements {
            element.for_each_shape(&mut |shape| projector.shape_triangles(shape, emit));
        }
    }

    /// Renders the scene with the current camera.
    pub fn render(&mut self) -> RenderedImage {
        self.depth_buffer.fill(f32::NEG_INFINITY);
        let mut pixels = vec![TRANSPARENT; self.depth_buffer.len()];

        let projector = Projector::new(&self.camera, self.width, self.height);
        let mut opaque = Vec::new();
        let mut transparent = Vec::new();
        self.visit_triangles(&projector, &mut |triangle| {
            if triangle.opaque {
                opaque.push(triangle);
            } else {
                transparent.push(triangle);
            }
        });
        debug!(
            "rendering {}x{}: {} opaque, {} transparent triangles",
            self.width,
            self.height,
            opaque.len(),
            transparent.len()
        );

        // Back to front; the sort is stable so ties keep scene order.
        transparent.sort_by(|a, b| a.max_depth.total_cmp(&b.max_depth));

        let mut buffer = FrameBuffer::new(
            &mut pixels,
            &mut self.depth_buffer,
            self.width,
            self.height,
        );
        for triangle in opaque.iter().chain(&transparent) {
            self.rasterizer.fill_triangle(triangle, &mut buffer);
        }

        RenderedImage {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// A finished render: row-major `0xAARRGGBB` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl RenderedImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The pixel at (x, y), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[(y * self.width + x) as usize])
    }

    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let (a, r, g, b) = colors::unpack_argb(self.pixels[(y * self.width + x) as usize]);
            image::Rgba([r, g, b, a])
        })
    }

    /// Encodes the image, the format being picked from the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_rgba_image().save(path).map_err(Error::Encode)
    }
}
