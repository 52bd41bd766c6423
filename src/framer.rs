//! Automatic zoom and pan so a scene fills the image.
//!
//! The scene is projected once with the pan cleared and a unit zoom, through
//! the same path the rasterizer uses. The zoom is then chosen so the
//! bounding box fills the image minus a margin, and the pan moves the box
//! center onto the image center.

use log::debug;

use crate::camera::{Camera, PAN_SCALE};
use crate::engine::{Engine, RenderedImage};
use crate::math::Vec2;
use crate::render::Projector;

/// Screen-space bounds of a projected scene, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) as f32 / 2.0,
            (self.min_y + self.max_y) as f32 / 2.0,
        )
    }

    fn around(x: f32, y: f32) -> Self {
        BoundingBox {
            min_x: x.floor() as i32,
            min_y: y.floor() as i32,
            max_x: x.ceil() as i32,
            max_y: y.ceil() as i32,
        }
    }

    fn include(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x.floor() as i32);
        self.min_y = self.min_y.min(y.floor() as i32);
        self.max_x = self.max_x.max(x.ceil() as i32);
        self.max_y = self.max_y.max(y.ceil() as i32);
    }
}

/// Camera values that frame a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub zoom: f32,
    pub pan: Vec2,
}

/// Renders a scene with the zoom and pan that make it fill the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoFramer {
    margin: f32,
}

impl Default for AutoFramer {
    fn default() -> Self {
        Self { margin: 0.1 }
    }
}

impl AutoFramer {
    /// A framer keeping 10% of the image free.
    pub fn new() -> Self {
        Self::default()
    }

    /// `margin` is the fraction of each image side left empty, split
    /// between both edges.
    pub fn with_margin(margin: f32) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// The scene bounds under the engine's rotation, with the pan cleared
    /// and a unit zoom. `None` when nothing is visible.
    pub fn bounding_box(&self, engine: &Engine) -> Option<BoundingBox> {
        let (width, height) = engine.size();
        let projector = Projector::new(&Self::neutral(engine.camera()), width, height);

        let mut bounds: Option<BoundingBox> = None;
        engine.visit_triangles(&projector, &mut |triangle| {
            for v in &triangle.vertices {
                bounds
                    .get_or_insert_with(|| BoundingBox::around(v.x, v.y))
                    .include(v.x, v.y);
            }
        });
        bounds
    }

    /// Computes the zoom and pan framing the scene. `None` when nothing is
    /// visible.
    pub fn framing(&self, engine: &Engine) -> Option<Framing> {
        let bounds = self.bounding_box(engine)?;
        let (width, height) = engine.size();
        let (w, h) = (width as f32, height as f32);

        let fit = |available: f32, extent: i32| {
            if extent > 0 {
                (available - available * self.margin) / extent as f32
            } else {
                f32::INFINITY
            }
        };
        let zoom = fit(w, bounds.width()).min(fit(h, bounds.height()));
        let zoom = if zoom.is_finite() { zoom } else { 1.0 };

        let projector = Projector::new(&Self::neutral(engine.camera()), width, height);
        let center = projector.center();
        let unit = PAN_SCALE * projector.scale();
        let target = bounds.center();
        let pan = Vec2::new((target.x - center.x) / unit, (target.y - center.y) / unit);

        debug!("auto-frame: bounds {bounds:?}, zoom {zoom}, pan {pan:?}");
        Some(Framing { zoom, pan })
    }

    /// Renders the engine framed, then restores its camera exactly.
    ///
    /// An empty scene renders with the camera untouched.
    pub fn render(&self, engine: &mut Engine) -> RenderedImage {
        let Some(framing) = self.framing(engine) else {
            debug!("auto-frame: nothing visible, rendering as is");
            return engine.render();
        };

        let saved = engine.camera().clone();
        engine
            .camera_mut()
            .set_zoom(framing.zoom)
            .set_translation(framing.pan.x, framing.pan.y);
        let image = engine.render();
        engine.set_camera(saved);
        image
    }

    fn neutral(camera: &Camera) -> Camera {
        let mut camera = camera.clone();
        camera.set_translation(0.0, 0.0).set_zoom(1.0);
        camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::TRANSPARENT;
    use crate::element::{Cube, Group};
    use crate::math::Vec3;
    use crate::texture::PlaceholderPalette;
    use test_log::test;

    fn scene(width: u32, height: u32) -> Engine {
        let mut palette = PlaceholderPalette::new();
        let mut engine = Engine::new(width, height);
        engine.camera_mut().set_rotation(25, 35, 0).set_zoom(0.3);
        engine
            .add_element(
                Cube::builder(Vec3::ZERO, Vec3::new(4.0, 6.0, 2.0)).texture(&palette.next_texture()),
            )
            .add_element(
                Group::new()
                    .add(
                        Cube::builder(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0))
                            .texture(&palette.next_texture())
                            .build(),
                    )
                    .with_rotation(Vec3::new(0.0, 45.0, 0.0))
                    .with_position(Vec3::new(5.0, 0.0, 0.0)),
            );
        engine
    }

    /// Bounds of the drawn pixels.
    fn drawn_bounds(image: &RenderedImage) -> Option<BoundingBox> {
        let mut bounds: Option<BoundingBox> = None;
        for y in 0..image.height() {
            for x in 0..image.width() {
                if image.pixel(x, y) == Some(TRANSPARENT) {
                    continue;
                }
                let (x, y) = (x as i32, y as i32);
                let b = bounds.get_or_insert(BoundingBox {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                });
                b.min_x = b.min_x.min(x);
                b.min_y = b.min_y.min(y);
                b.max_x = b.max_x.max(x);
                b.max_y = b.max_y.max(y);
            }
        }
        bounds
    }

    #[test]
    fn framing_is_idempotent_and_restores_camera() {
        let mut engine = scene(160, 120);
        let before = engine.camera().clone();
        let framer = AutoFramer::new();

        let first = framer.render(&mut engine);
        assert_eq!(engine.camera(), &before);
        let second = framer.render(&mut engine);
        assert_eq!(engine.camera(), &before);
        assert_eq!(first, second);
    }

    #[test]
    fn framed_scene_fills_image_within_margin() {
        let mut engine = scene(300, 200);
        let image = AutoFramer::new().render(&mut engine);
        let drawn = drawn_bounds(&image).unwrap();

        assert!(drawn.min_x >= 5 && drawn.min_y >= 5, "{drawn:?}");
        assert!(drawn.max_x <= 294 && drawn.max_y <= 194, "{drawn:?}");
        assert!(drawn.width() >= 240 || drawn.height() >= 160, "{drawn:?}");

        // Centered within a few pixels.
        let left = drawn.min_x;
        let right = 299 - drawn.max_x;
        let top = drawn.min_y;
        let bottom = 199 - drawn.max_y;
        assert!((left - right).abs() <= 6, "{drawn:?}");
        assert!((top - bottom).abs() <= 6, "{drawn:?}");
    }

    #[test]
    fn framing_ignores_current_pan_and_zoom() {
        let mut engine = scene(160, 120);
        let framer = AutoFramer::new();
        let reference = framer.framing(&engine).unwrap();
        engine.camera_mut().set_translation(3.0, -2.0).set_zoom(4.0);
        assert_eq!(framer.framing(&engine), Some(reference));
    }

    #[test]
    fn empty_scene_renders_unchanged() {
        let mut engine = Engine::new(64, 64);
        engine.camera_mut().set_zoom(2.0);
        let framer = AutoFramer::with_margin(0.2);
        assert_eq!(framer.bounding_box(&engine), None);

        let image = framer.render(&mut engine);
        assert!(image.pixels().iter().all(|&p| p == TRANSPARENT));
        assert_eq!(engine.camera().zoom(), 2.0);
    }

    #[test]
    fn bounding_box_uses_whole_pixels() {
        let mut engine = Engine::new(200, 200);
        engine.add_element(
            Cube::builder(Vec3::ZERO, Vec3::ONE).texture(&PlaceholderPalette::texture(0)),
        );
        // 80.5 * 200 / 1287 = 12.51 px per unit from the center (100, 100).
        let bounds = AutoFramer::new().bounding_box(&engine).unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                min_x: 100,
                min_y: 87,
                max_x: 113,
                max_y: 100,
            }
        );
    }
}
