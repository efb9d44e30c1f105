//! Lumen math - primitive algebra for the ray tracer.
//!
//! Points, non-zero vectors, colors, three-channel factors and rays, all in
//! double precision on top of `glam::DVec3`.

// Re-export glam for convenience
pub use glam;
pub use glam::DVec3;

mod color;
mod point;
mod ray;
mod util;
mod vector;

pub use color::{Color, Factor};
pub use point::Point;
pub use ray::Ray;
pub use util::{align_zero, is_zero, EPSILON};
pub use vector::Vector;

use thiserror::Error;

/// Errors raised by the primitive types.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("zero vector is not allowed")]
    DegenerateVector,
}

pub type MathResult<T> = Result<T, MathError>;
