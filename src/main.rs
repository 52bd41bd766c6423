//! Renders a small demo figure to a PNG.
//!
//! ```text
//! cubist [config.json] [out.png] [texture.png]
//! ```
//!
//! Without a config the defaults of [`RenderConfig`] apply. Faces use the
//! given texture, or generated placeholders when none is given or it cannot
//! be read.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use cubist::prelude::*;

/// A blocky figure: torso, head, a rotated arm group and a tapered leg.
fn demo_scene(engine: &mut Engine, body: Texture, palette: &mut PlaceholderPalette) {
    let torso = Cube::builder(Vec3::new(-4.0, 12.0, -2.0), Vec3::new(4.0, 24.0, 2.0))
        .texture(&body)
        .build();
    let head = Cube::builder(Vec3::new(-4.0, 24.0, -4.0), Vec3::new(4.0, 32.0, 4.0))
        .texture(&palette.next_texture())
        .rotation_axis(-10.0, Axis::Y)
        .pivot(Vec3::new(0.0, 24.0, 0.0));

    let arm_texture = palette.next_texture();
    let arm = Group::new()
        .add(
            Cube::builder(Vec3::new(0.0, -10.0, -2.0), Vec3::new(4.0, 2.0, 2.0))
                .texture(&arm_texture)
                .build(),
        )
        .add(
            Cube::builder(Vec3::new(0.5, -12.0, -1.5), Vec3::new(3.5, -10.0, 1.5))
                .texture(&arm_texture)
                .build(),
        )
        .with_position(Vec3::new(4.0, 22.0, 0.0))
        .with_pivot(Vec3::new(4.0, 22.0, 0.0))
        .with_rotation(Vec3::new(-30.0, 0.0, 10.0));

    let leg = Trapezoid::new(
        Vec3::new(-4.0, 0.0, -2.0),
        Vec3::new(4.0, 12.0, 4.0),
        Vec2::new(0.0, 0.5),
    )
    .with_texture(&palette.next_texture());
    let other_leg = leg.translated(Vec3::new(4.0, 0.0, 0.0));

    engine
        .add_element(torso)
        .add_element(head)
        .add_element(arm)
        .add_elements([leg, other_leg]);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => RenderConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => RenderConfig::default(),
    };
    let output = PathBuf::from(args.next().unwrap_or_else(|| "cubist.png".to_owned()));

    let mut palette = PlaceholderPalette::new();
    let body = match args.next() {
        Some(path) => palette.open_or_next(path),
        None => palette.next_texture(),
    };

    let mut engine = Engine::new(config.width, config.height);
    engine.set_camera(config.camera.clone());
    demo_scene(&mut engine, body, &mut palette);

    let image = if config.auto_frame {
        AutoFramer::with_margin(config.margin).render(&mut engine)
    } else {
        engine.render()
    };
    image
        .save(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("wrote {}x{} image to {}", image.width(), image.height(), output.display());
    Ok(())
}
