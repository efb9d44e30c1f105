//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use lumen_math::{align_zero, is_zero, Color, MathResult, Point, Ray, Vector};

use crate::{
    error::ConstructionResult,
    intersectable::{geo_points, within, GeoPoint, Geometry, Intersectable, Surface},
    Material,
};

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Point,
    v1: Point,
    v2: Point,
    /// Pre-computed face normal (unit length)
    normal: Vector,
    surface: Surface,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// Fails when two vertices coincide or all three are collinear.
    pub fn new(v0: Point, v1: Point, v2: Point) -> ConstructionResult<Self> {
        let edge1 = v1.subtract(v0)?;
        let edge2 = v2.subtract(v0)?;
        let normal = edge1.cross(edge2)?.normalize();

        Ok(Self {
            v0,
            v1,
            v2,
            normal,
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

    pub fn vertices(&self) -> [Point; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Möller-Trumbore with a strict interior: hits on edges or vertices are
    /// rejected.
    fn hit_distance(&self, ray: &Ray, max_distance: f64) -> Option<f64> {
        let dir = ray.direction().as_dvec3();
        let edge1 = self.v1.as_dvec3() - self.v0.as_dvec3();
        let edge2 = self.v2.as_dvec3() - self.v0.as_dvec3();

        let h = dir.cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if is_zero(a) {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.head().as_dvec3() - self.v0.as_dvec3();
        let u = align_zero(f * s.dot(h));
        if u <= 0.0 || u >= 1.0 {
            return None;
        }

        let q = s.cross(edge1);
        let v = align_zero(f * dir.dot(q));
        if v <= 0.0 || align_zero(u + v - 1.0) >= 0.0 {
            return None;
        }

        let t = align_zero(f * edge2.dot(q));
        within(t, max_distance).then_some(t)
    }
}

impl Intersectable for Triangle {
    fn find_geo_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        geo_points(self, ray, self.hit_distance(ray, max_distance))
    }
}

impl Geometry for Triangle {
    fn normal_at(&self, _point: Point) -> MathResult<Vector> {
        Ok(self.normal)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
