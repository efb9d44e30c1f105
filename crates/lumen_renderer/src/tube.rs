//! Infinite tube primitive.

use lumen_math::{is_zero, Color, MathResult, Point, Ray, Vector};

use crate::{
    error::{ConstructionError, ConstructionResult},
    intersectable::{geo_points, within, GeoPoint, Geometry, Intersectable, Surface},
    Material,
};

/// An infinite cylinder around an axis ray.
#[derive(Debug, Clone)]
pub struct Tube {
    axis: Ray,
    radius: f64,
    surface: Surface,
}

impl Tube {
    /// Create a new tube. The radius must be positive.
    pub fn new(axis: Ray, radius: f64) -> ConstructionResult<Self> {
        if radius <= 0.0 || is_zero(radius) {
            return Err(ConstructionError::InvalidRadius(radius));
        }
        Ok(Self {
            axis,
            radius,
            surface: Surface::default(),
        })
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.surface.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.surface.material = material;
        self
    }

    pub fn axis(&self) -> Ray {
        self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Distances along `ray` where it crosses the side wall of the infinite tube.
///
/// Solves the sphere-like quadratic in the plane perpendicular to the axis.
/// Rays parallel to the axis and tangent rays have no intersection.
pub(crate) fn side_distances(axis: &Ray, radius: f64, ray: &Ray, max_distance: f64) -> Vec<f64> {
    let va = axis.direction().as_dvec3();
    let dir = ray.direction().as_dvec3();
    let delta = ray.head().as_dvec3() - axis.head().as_dvec3();

    let dir_perp = dir - va * dir.dot(va);
    let delta_perp = delta - va * delta.dot(va);

    let a = dir_perp.length_squared();
    if is_zero(a) {
        return Vec::new();
    }
    let b = 2.0 * dir_perp.dot(delta_perp);
    let c = delta_perp.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant <= 0.0 || is_zero(discriminant) {
        return Vec::new();
    }

    let sqrtd = discriminant.sqrt();
    [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)]
        .into_iter()
        .filter(|&t| within(t, max_distance))
        .collect()
}

/// Outward normal of the side wall at `point`.
pub(crate) fn side_normal(axis: &Ray, point: Point) -> MathResult<Vector> {
    let t = axis.direction().dot(point.subtract(axis.head())?);
    Ok(point.subtract(axis.point_at(t))?.normalize())
}

impl Intersectable for Tube {
    fn find_geo_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        geo_points(self, ray, side_distances(&self.axis, self.radius, ray, max_distance))
    }
}

impl Geometry for Tube {
    fn normal_at(&self, point: Point) -> MathResult<Vector> {
        side_normal(&self.axis, point)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
