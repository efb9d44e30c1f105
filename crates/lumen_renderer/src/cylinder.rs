//! Finite, capped cylinder primitive.
//!
//! The side wall is the tube around the axis ray clipped to `0 < s < height`
//! along the axis; the two ends are closed by cap disks.

use lumen_math::{align_zero, is_zero, Color, MathResult, Point, Ray, Vector};

use crate::{
    error::{ConstructionError, ConstructionResult},
    intersectable::{geo_points, GeoPoint, Geometry, Intersectable, Surface},
    tube, Material, Plane,
};

/// A cylinder of finite height with closed ends.
#[derive(Debug, Clone)]
pub struct Cylinder {
    axis: Ray,
    radius: f64,
    height: f64,
    surface: Surface,
}

impl Cylinder {
    /// Create a new cylinder whose base disk is centered at the axis head.
    pub fn new(axis: Ray, radius: f64, height: f64) -> ConstructionResult<Self> {
        if radius <= 0.0 || is_zero(radius) {
            return Err(ConstructionError::InvalidRadius(radius));
        }
        if height <= 0.0 || is_zero(height) {
            return Err(ConstructionError::InvalidHeight(height));
        }
        Ok(Self {
            axis,
            radius,
            height,
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

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Position of `point` along the axis, measured from the base.
    fn axial(&self, point: Point) -> f64 {
        align_zero(point.as_dvec3().dot(self.axis.direction().as_dvec3())
            - self.axis.head().as_dvec3().dot(self.axis.direction().as_dvec3()))
    }

    fn cap_distance(&self, center: Point, ray: &Ray, max_distance: f64) -> Option<f64> {
        let cap = Plane::new(center, self.axis.direction());
        let t = cap.hit_distance(ray, max_distance)?;
        let r2 = ray.point_at(t).distance_squared(center);
        (align_zero(r2 - self.radius * self.radius) < 0.0).then_some(t)
    }

    fn hit_distances(&self, ray: &Ray, max_distance: f64) -> Vec<f64> {
        let mut distances: Vec<f64> =
            tube::side_distances(&self.axis, self.radius, ray, max_distance)
                .into_iter()
                .filter(|&t| {
                    let s = self.axial(ray.point_at(t));
                    s > 0.0 && align_zero(s - self.height) < 0.0
                })
                .collect();

        let base = self.axis.head();
        let top = self.axis.point_at(self.height);
        distances.extend(self.cap_distance(base, ray, max_distance));
        distances.extend(self.cap_distance(top, ray, max_distance));
        distances
    }
}

impl Intersectable for Cylinder {
    fn find_geo_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        geo_points(self, ray, self.hit_distances(ray, max_distance))
    }
}

impl Geometry for Cylinder {
    fn normal_at(&self, point: Point) -> MathResult<Vector> {
        let dir = self.axis.direction();
        let s = self.axial(point);
        if s == 0.0 {
            return Ok(-dir);
        }
        if is_zero(self.height - s) {
            return Ok(dir);
        }
        tube::side_normal(&self.axis, point)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z).unwrap()
    }

    fn p(x: f64, y: f64, z: f64) -> Point {
        Point::new(x, y, z)
    }

    fn cylinder() -> Cylinder {
        Cylinder::new(Ray::new(Point::ZERO, v(0.0, 0.0, 1.0)), 1.0, 2.0).unwrap()
    }

    #[test]
    fn test_cylinder_normals() {
        let cyl = cylinder();
        // Side wall
        assert!(cyl.normal_at(p(1.0, 0.0, 1.0)).unwrap().abs_diff_eq(v(1.0, 0.0, 0.0), 1e-12));
        // Base cap, including the axis head itself
        assert!(cyl.normal_at(p(0.5, 0.0, 0.0)).unwrap().abs_diff_eq(v(0.0, 0.0, -1.0), 1e-12));
        assert!(cyl.normal_at(Point::ZERO).unwrap().abs_diff_eq(v(0.0, 0.0, -1.0), 1e-12));
        // Top cap
        assert!(cyl.normal_at(p(0.0, 0.5, 2.0)).unwrap().abs_diff_eq(v(0.0, 0.0, 1.0), 1e-12));
        assert!(cyl.normal_at(p(0.0, 0.0, 2.0)).unwrap().abs_diff_eq(v(0.0, 0.0, 1.0), 1e-12));
    }

    #[test]
    fn test_side_hits_are_clipped_by_height() {
        let cyl = cylinder();

        let through = Ray::new(p(-2.0, 0.0, 1.0), v(1.0, 0.0, 0.0));
        assert_eq!(cyl.find_intersections(&through).len(), 2);

        let above = Ray::new(p(-2.0, 0.0, 3.0), v(1.0, 0.0, 0.0));
        assert!(cyl.find_intersections(&above).is_empty());

        let below = Ray::new(p(-2.0, 0.0, -1.0), v(1.0, 0.0, 0.0));
        assert!(cyl.find_intersections(&below).is_empty());
    }

    #[test]
    fn test_ray_along_axis_hits_both_caps() {
        let ray = Ray::new(p(0.2, 0.0, -1.0), v(0.0, 0.0, 1.0));
        let mut points = cylinder().find_intersections(&ray);
        points.sort_by(|a, b| a.z().total_cmp(&b.z()));

        assert_eq!(points.len(), 2);
        assert!(points[0].abs_diff_eq(p(0.2, 0.0, 0.0), 1e-12));
        assert!(points[1].abs_diff_eq(p(0.2, 0.0, 2.0), 1e-12));
    }

    #[test]
    fn test_ray_through_cap_and_side() {
        let ray = Ray::new(p(0.0, 0.0, 3.0), v(0.5, 0.0, -1.0));
        let mut points = cylinder().find_intersections(&ray);
        points.sort_by(|a, b| b.z().total_cmp(&a.z()));

        assert_eq!(points.len(), 2);
        assert!(points[0].abs_diff_eq(p(0.5, 0.0, 2.0), 1e-9));
        assert!(points[1].abs_diff_eq(p(1.0, 0.0, 1.0), 1e-9));
    }

    #[test]
    fn test_ray_grazing_the_rim_misses() {
        let ray = Ray::new(p(0.0, 0.0, 3.0), v(1.0, 0.0, -1.0));
        assert!(cylinder().find_intersections(&ray).is_empty());
    }

    #[test]
    fn test_invalid_dimensions() {
        let axis = Ray::new(Point::ZERO, v(0.0, 0.0, 1.0));
        assert_eq!(
            Cylinder::new(axis, 1.0, 0.0).unwrap_err(),
            ConstructionError::InvalidHeight(0.0)
        );
        assert_eq!(
            Cylinder::new(axis, -1.0, 1.0).unwrap_err(),
            ConstructionError::InvalidRadius(-1.0)
        );
    }
}
