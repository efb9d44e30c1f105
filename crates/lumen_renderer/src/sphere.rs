//! Sphere primitive for ray tracing.

use lumen_math::{is_zero, Color, MathResult, Point, Ray, Vector};

use crate::{
    error::{ConstructionError, ConstructionResult},
    intersectable::{geo_points, within, GeoPoint, Geometry, Intersectable, Surface},
    Material,
};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point,
    radius: f64,
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point, radius: f64) -> ConstructionResult<Self> {
        if radius <= 0.0 || is_zero(radius) {
            return Err(ConstructionError::InvalidRadius(radius));
        }
        Ok(Self {
            center,
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

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Parametric distances of the ray/sphere intersections in `(0, max_distance]`.
    fn hit_distances(&self, ray: &Ray, max_distance: f64) -> Vec<f64> {
        // Ray starting at the center leaves through exactly one point
        let Ok(to_center) = self.center.subtract(ray.head()) else {
            return if within(self.radius, max_distance) {
                vec![self.radius]
            } else {
                Vec::new()
            };
        };

        let tm = ray.direction().dot(to_center);
        let d_squared = to_center.length_squared() - tm * tm;
        let th_squared = self.radius * self.radius - d_squared;
        // Tangent rays and misses
        if th_squared <= 0.0 || is_zero(th_squared) {
            return Vec::new();
        }

        let th = th_squared.sqrt();
        [tm - th, tm + th]
            .into_iter()
            .filter(|&t| within(t, max_distance))
            .collect()
    }
}

impl Intersectable for Sphere {
    fn find_geo_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        geo_points(self, ray, self.hit_distances(ray, max_distance))
    }
}

impl Geometry for Sphere {
    fn normal_at(&self, point: Point) -> MathResult<Vector> {
        Ok(point.subtract(self.center)?.normalize())
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
