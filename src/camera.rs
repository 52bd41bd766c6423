//! Orthographic camera and scene lighting.
//!
//! # Coordinate System
//!
//! World space is right-handed:
//! - X: positive east (right on screen with the default camera)
//! - Y: positive up
//! - Z: positive south (toward the default viewer)
//!
//! # Orientation
//!
//! The user-facing rotation is stored as integer pitch/yaw/roll degrees and
//! turned into view angles on demand. The default camera looks at the south
//! face of the scene; the view flips the scene half a turn around Y so that
//! world +X maps to screen right.
//!
//! # Lighting
//!
//! Faces are lit flat: an ambient term plus a diffuse term driven by a
//! single direction expressed in view space.

use serde::{Deserialize, Deserializer, Serialize};

use crate::math::{Vec2, Vec3};

/// Internal zoom units per user zoom step.
pub const ZOOM_SCALE: f32 = 80.5;
/// World units per user pan step.
pub const PAN_SCALE: f32 = 5.25;
/// Image side, in pixels, at which one internal zoom unit spans one pixel.
pub const REFERENCE_RESOLUTION: f32 = 1287.0;

/// Zoom, rotation, pan and light settings of a render.
///
/// Setters take user-facing values and return `&mut Self` for chaining;
/// the matching getters return exactly what was set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    rotation: [i32; 3],
    translation: Vec2,
    zoom: f32,
    ambient_light: f32,
    diffuse_light: f32,
    #[serde(deserialize_with = "normalized")]
    light_direction: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            rotation: [0, 0, 0],
            translation: Vec2::ZERO,
            zoom: 1.0,
            ambient_light: 0.5,
            diffuse_light: 2.0,
            light_direction: Vec3::new(0.0, 1.0, 0.6).normalize(),
        }
    }
}

/// Normalizes a deserialized direction, leaving unit vectors bit-exact.
fn normalized<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
    let v = Vec3::deserialize(deserializer)?;
    if (v.length() - 1.0).abs() < 1e-6 {
        Ok(v)
    } else {
        Ok(v.normalize())
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets pitch (x), yaw (y) and roll (z) in degrees.
    pub fn set_rotation(&mut self, x: i32, y: i32, z: i32) -> &mut Self {
        self.rotation = [x, y, z];
        self
    }

    /// Pans the view; one unit moves the scene by [`PAN_SCALE`] world units.
    pub fn set_translation(&mut self, x: f32, y: f32) -> &mut Self {
        self.translation = Vec2::new(x, y);
        self
    }

    pub fn set_zoom(&mut self, zoom: f32) -> &mut Self {
        self.zoom = zoom;
        self
    }

    pub fn set_ambient_light(&mut self, intensity: f32) -> &mut Self {
        self.ambient_light = intensity;
        self
    }

    pub fn set_diffuse_light(&mut self, intensity: f32) -> &mut Self {
        self.diffuse_light = intensity;
        self
    }

    /// Sets the view-space light direction; it is normalized on assignment.
    pub fn set_light_direction(&mut self, direction: Vec3) -> &mut Self {
        self.light_direction = direction.normalize();
        self
    }

    pub fn rotation(&self) -> [i32; 3] {
        self.rotation
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn ambient_light(&self) -> f32 {
        self.ambient_light
    }

    pub fn diffuse_light(&self) -> f32 {
        self.diffuse_light
    }

    pub fn light_direction(&self) -> Vec3 {
        self.light_direction
    }

    /// Euler angles applied to world points to reach view space.
    pub fn view_rotation(&self) -> Vec3 {
        let [x, y, z] = self.rotation;
        Vec3::new(-x as f32, 180.0 - y as f32, -z as f32)
    }

    /// Offset subtracted from rotated points to reach view space.
    pub fn view_translation(&self) -> Vec3 {
        Vec3::new(
            -self.translation.x * PAN_SCALE,
            -self.translation.y * PAN_SCALE,
            0.0,
        )
    }

    /// Zoom in internal units.
    pub fn internal_zoom(&self) -> f32 {
        self.zoom * ZOOM_SCALE
    }

    /// Pixels per view-space unit for an image of the given size.
    pub fn projection_scale(&self, width: u32, height: u32) -> f32 {
        self.internal_zoom() * width.min(height) as f32 / REFERENCE_RESOLUTION
    }

    /// Flat light intensity of a face with the given view-space normal.
    ///
    /// `ambient + diffuse * max(0, n . light)`, divided by `1 - n.y` for
    /// faces turned downward, clamped to `[0, 1]`.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        let diffuse = normal.dot(self.light_direction).max(0.0);
        let mut intensity = self.ambient_light + self.diffuse_light * diffuse;
        if normal.y < 0.0 {
            intensity /= 1.0 - normal.y;
        }
        intensity.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn getters_return_user_values() {
        let mut camera = Camera::new();
        camera
            .set_rotation(30, 45, -10)
            .set_translation(1.5, -2.0)
            .set_zoom(0.75)
            .set_ambient_light(0.3)
            .set_diffuse_light(1.0);
        assert_eq!(camera.rotation(), [30, 45, -10]);
        assert_eq!(camera.translation(), Vec2::new(1.5, -2.0));
        assert_eq!(camera.zoom(), 0.75);
        assert_eq!(camera.ambient_light(), 0.3);
        assert_eq!(camera.diffuse_light(), 1.0);
    }

    #[test]
    fn view_values_are_derived() {
        let mut camera = Camera::new();
        camera.set_rotation(30, 45, -10).set_translation(2.0, -1.0).set_zoom(2.0);
        assert_eq!(camera.view_rotation(), Vec3::new(-30.0, 135.0, 10.0));
        assert_eq!(camera.view_translation(), Vec3::new(-10.5, 5.25, 0.0));
        assert_eq!(camera.internal_zoom(), 161.0);
        assert_abs_diff_eq!(camera.projection_scale(1287, 2000), 161.0, epsilon = 1e-4);
    }

    #[test]
    fn default_view_faces_south() {
        let camera = Camera::new();
        let view = Vec3::new(1.0, 2.0, 3.0).rotate(camera.view_rotation());
        assert_abs_diff_eq!(view, Vec3::new(-1.0, 2.0, -3.0), epsilon = 1e-6);
    }

    #[test]
    fn light_direction_is_normalized() {
        let mut camera = Camera::new();
        camera.set_light_direction(Vec3::new(0.0, 3.0, 4.0));
        assert_abs_diff_eq!(camera.light_direction(), Vec3::new(0.0, 0.6, 0.8), epsilon = 1e-6);
        assert_abs_diff_eq!(Camera::new().light_direction().length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn intensity_follows_light_model() {
        let camera = Camera::new();
        // Facing the viewer, away from the light: ambient only.
        assert_abs_diff_eq!(camera.intensity(Vec3::new(0.0, 0.0, -1.0)), 0.5);
        // Facing up: saturated.
        assert_eq!(camera.intensity(Vec3::UP), 1.0);
        // Facing down: ambient halved.
        assert_abs_diff_eq!(camera.intensity(Vec3::new(0.0, -1.0, 0.0)), 0.25);
    }

    #[test]
    fn negative_light_clamps_to_black() {
        let mut camera = Camera::new();
        camera.set_ambient_light(-0.5).set_diffuse_light(-1.0);
        assert_eq!(camera.intensity(Vec3::UP), 0.0);
        assert_eq!(camera.intensity(Vec3::new(0.0, 0.0, -1.0)), 0.0);
    }

    #[test]
    fn serde_round_trips_and_normalizes() {
        let json = r#"{"rotation":[10,20,30],"zoom":2.0,"light_direction":{"x":0.0,"y":0.0,"z":5.0}}"#;
        let camera: Camera = serde_json::from_str(json).unwrap();
        assert_eq!(camera.rotation(), [10, 20, 30]);
        assert_eq!(camera.zoom(), 2.0);
        assert_eq!(camera.ambient_light(), 0.5);
        assert_eq!(camera.light_direction(), Vec3::FORWARD);

        let back: Camera = serde_json::from_str(&serde_json::to_string(&camera).unwrap()).unwrap();
        assert_eq!(back, camera);
    }
}
