//! Render settings loadable from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "width": 512, "height": 512, "camera": { "rotation": [30, 45, 0] } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::Result;

/// Output size, camera and framing of one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    pub camera: Camera,
    /// Fit the scene to the image instead of using the camera's zoom and pan.
    pub auto_frame: bool,
    /// Fraction of the image kept free when auto-framing.
    pub margin: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            camera: Camera::default(),
            auto_frame: true,
            margin: 0.1,
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
