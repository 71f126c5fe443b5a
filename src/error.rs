use thiserror::Error;

use crate::landmark::Anchor;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid hair color {0:?}: expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("Landmark index {index} for {anchor} is out of range for a set of {len} points")]
    LandmarkOutOfRange {
        anchor: Anchor,
        index: usize,
        len: usize,
    },

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("SVG parse error: {0}")]
    Svg(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Profile JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot allocate a {width}x{height} drawing surface")]
    SurfaceAllocation { width: u32, height: u32 },

    #[error("Asset loader thread exited before delivering a result")]
    LoaderDisconnected,
}

pub type Result<T> = std::result::Result<T, Error>;
