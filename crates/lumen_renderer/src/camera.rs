//! Pinhole camera and primary ray generation.

use std::sync::Arc;

use lumen_math::{is_zero, Color, MathResult, Point, Ray, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    error::{ConstructionError, ConstructionResult, RenderResult},
    PixelWriter, RayTracer,
};

/// Camera with an orthonormal frame and a view plane in front of it.
///
/// View plane size, distance, anti-aliasing, threads and the ray tracer are
/// set through consuming builders and validated when rendering starts.
#[derive(Clone)]
pub struct Camera {
    location: Point,
    to: Vector,
    up: Vector,
    right: Vector,

    // View plane
    width: f64,
    height: f64,
    distance: f64,

    // Anti-aliasing
    anti_aliasing: bool,
    samples: u32,
    seed: u64,

    pub(crate) threads: usize,
    pub(crate) ray_tracer: Option<Arc<dyn RayTracer>>,
}

impl Camera {
    /// Default number of samples along each pixel axis when anti-aliasing.
    pub const DEFAULT_SAMPLES: u32 = 10;

    /// Create a camera at `location` looking along `to` with `up` overhead.
    ///
    /// Fails if `to` and `up` are not orthogonal.
    pub fn new(location: Point, to: Vector, up: Vector) -> ConstructionResult<Self> {
        let dot = to.normalize().dot(up.normalize());
        if !is_zero(dot) {
            return Err(ConstructionError::NonOrthogonalAxes(dot));
        }
        let to = to.normalize();
        let up = up.normalize();
        let right = to.cross(up)?.normalize();

        Ok(Self {
            location,
            to,
            up,
            right,
            width: 0.0,
            height: 0.0,
            distance: 0.0,
            anti_aliasing: false,
            samples: Self::DEFAULT_SAMPLES,
            seed: 0,
            threads: 1,
            ray_tracer: None,
        })
    }

    /// Set the view plane size.
    pub fn with_view_plane_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the distance from the camera to the view plane.
    pub fn with_view_plane_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Enable or disable supersampling with `samples x samples` rays per pixel.
    pub fn with_anti_aliasing(mut self, enabled: bool, samples: u32) -> Self {
        self.anti_aliasing = enabled;
        self.samples = samples.max(1);
        self
    }

    /// Set the worker thread count: 1 renders on the calling thread, 0 lets
    /// the pool pick.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_ray_tracer(mut self, ray_tracer: Arc<dyn RayTracer>) -> Self {
        self.ray_tracer = Some(ray_tracer);
        self
    }

    /// Seed for the anti-aliasing jitter.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn to(&self) -> Vector {
        self.to
    }

    pub fn up(&self) -> Vector {
        self.up
    }

    pub fn right(&self) -> Vector {
        self.right
    }

    /// True if the view plane has a usable size and distance.
    pub(crate) fn view_plane_size_set(&self) -> bool {
        !is_zero(self.width) && !is_zero(self.height)
    }

    pub(crate) fn view_plane_distance_set(&self) -> bool {
        !is_zero(self.distance)
    }

    /// True if width, height and distance are all positive and finite.
    pub(crate) fn view_plane_valid(&self) -> bool {
        [self.width, self.height, self.distance]
            .iter()
            .all(|x| x.is_finite() && *x > 0.0)
    }

    /// Center of pixel `(j, i)` on an `nx x ny` grid over the view plane.
    fn pixel_center(&self, nx: u32, ny: u32, j: u32, i: u32) -> Point {
        let center = self.location.as_dvec3() + self.to.as_dvec3() * self.distance;
        let x = (j as f64 - (nx as f64 - 1.0) / 2.0) * (self.width / nx as f64);
        let y = -(i as f64 - (ny as f64 - 1.0) / 2.0) * (self.height / ny as f64);
        Point::from_dvec3(center + self.right.as_dvec3() * x + self.up.as_dvec3() * y)
    }

    /// Ray from the camera through the center of pixel `(j, i)`.
    pub fn construct_ray(&self, nx: u32, ny: u32, j: u32, i: u32) -> MathResult<Ray> {
        let target = self.pixel_center(nx, ny, j, i);
        Ok(Ray::new(self.location, target.subtract(self.location)?))
    }

    /// Rays sampling pixel `(j, i)`.
    ///
    /// Without anti-aliasing this is the single center ray. With it, the pixel
    /// is split into `samples x samples` sub-pixels and one ray is aimed at a
    /// random point inside each. The jitter is seeded per pixel, so the result
    /// does not depend on which thread renders the pixel.
    pub fn construct_rays(&self, nx: u32, ny: u32, j: u32, i: u32) -> MathResult<Vec<Ray>> {
        if !self.anti_aliasing {
            return Ok(vec![self.construct_ray(nx, ny, j, i)?]);
        }

        let s = self.samples;
        let sub_width = self.width / (nx * s) as f64;
        let sub_height = self.height / (ny * s) as f64;
        let mut rng = self.pixel_rng(nx, j, i);

        let mut rays = Vec::with_capacity((s * s) as usize);
        for k in 0..s {
            for l in 0..s {
                let center = self.pixel_center(nx * s, ny * s, s * j + k, s * i + l);
                let target = match self.jitter(&mut rng, sub_width / 2.0, sub_height / 2.0) {
                    Some(jitter) => center + jitter,
                    None => center,
                };
                rays.push(Ray::new(self.location, target.subtract(self.location)?));
            }
        }
        Ok(rays)
    }

    /// Random offset within `[-dx, dx] x [-dy, dy]` on the view plane.
    ///
    /// Redrawn while it would be the zero vector; `None` for an empty range.
    fn jitter(&self, rng: &mut StdRng, dx: f64, dy: f64) -> Option<Vector> {
        let (dx, dy) = (dx.abs(), dy.abs());
        if !dx.is_finite() || !dy.is_finite() || (is_zero(dx) && is_zero(dy)) {
            return None;
        }
        loop {
            let offset = self.right.as_dvec3() * rng.gen_range(-dx..=dx)
                + self.up.as_dvec3() * rng.gen_range(-dy..=dy);
            if let Ok(v) = Vector::from_dvec3(offset) {
                return Some(v);
            }
        }
    }

    fn pixel_rng(&self, nx: u32, j: u32, i: u32) -> StdRng {
        let index = i as u64 * nx as u64 + j as u64;
        StdRng::seed_from_u64(self.seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Average color over the sample rays of pixel `(j, i)`.
    pub(crate) fn pixel_color(
        &self,
        ray_tracer: &dyn RayTracer,
        nx: u32,
        ny: u32,
        j: u32,
        i: u32,
    ) -> RenderResult<Color> {
        let rays = self.construct_rays(nx, ny, j, i)?;
        let sum = rays
            .iter()
            .fold(Color::BLACK, |acc, ray| acc + ray_tracer.trace_ray(ray));
        Ok(sum.reduce(rays.len() as f64))
    }

    /// Paint grid lines every `interval` pixels in `color`.
    pub fn print_grid(&self, writer: &mut impl PixelWriter, interval: u32, color: Color) {
        if interval == 0 {
            return;
        }
        let (nx, ny) = writer.resolution();
        for i in 0..ny {
            for j in 0..nx {
                if i % interval == 0 || j % interval == 0 {
                    writer.write_pixel(j, i, color);
                }
            }
        }
    }
}
