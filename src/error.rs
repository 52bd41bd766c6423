//! Errors raised while building assets.
//!
//! Rendering itself never fails; only asset construction and configuration
//! loading return these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pixel buffer holds {actual} samples, expected {expected} for {width}x{height}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("invalid render configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
