//! Error types for scene construction and rendering.

use lumen_math::MathError;
use thiserror::Error;

/// Invalid input detected while building geometry or a camera.
///
/// These are structural errors; nothing in the renderer retries them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error("camera 'to' and 'up' vectors must be orthogonal (dot product {0})")]
    NonOrthogonalAxes(f64),

    #[error("invalid polygon: {0}")]
    InvalidPolygon(&'static str),

    #[error("radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("height must be positive, got {0}")]
    InvalidHeight(f64),
}

pub type ConstructionResult<T> = Result<T, ConstructionError>;

/// Errors raised when a render is invoked or while it runs.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("renderer resource not set: {0}")]
    MissingResource(&'static str),

    #[error("invalid render configuration: {0}")]
    InvalidConfiguration(&'static str),

    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("render worker panicked: {0}")]
    WorkerPanicked(String),

    #[error("failed to render pixel ({x}, {y}): {source}")]
    Pixel {
        x: u32,
        y: u32,
        #[source]
        source: Box<RenderError>,
    },

    #[error(transparent)]
    Math(#[from] MathError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
