//! Intersectable trait, GeoPoint and the Geometries composite.

use std::fmt;
use std::sync::Arc;

use lumen_math::{align_zero, Color, MathResult, Point, Ray, Vector};

use crate::Material;

/// An intersection point paired with the geometry it lies on.
///
/// Produced transiently by intersection queries. Equality compares the
/// point only.
#[derive(Clone, Copy)]
pub struct GeoPoint<'a> {
    pub geometry: &'a dyn Geometry,
    pub point: Point,
}

impl<'a> GeoPoint<'a> {
    pub fn new(geometry: &'a dyn Geometry, point: Point) -> Self {
        Self { geometry, point }
    }
}

impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl fmt::Debug for GeoPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoPoint").field("point", &self.point).finish()
    }
}

/// Anything a ray can be intersected with.
pub trait Intersectable: Send + Sync {
    /// All intersections at parametric distance `t` in `(0, max_distance]`.
    ///
    /// No ordering is guaranteed.
    fn find_geo_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>>;

    /// Intersection points along the whole ray.
    fn find_intersections(&self, ray: &Ray) -> Vec<Point> {
        self.find_geo_intersections(ray, f64::INFINITY)
            .into_iter()
            .map(|gp| gp.point)
            .collect()
    }

    /// The intersection closest to the ray head, if any.
    fn find_closest_intersection(&self, ray: &Ray, max_distance: f64) -> Option<GeoPoint<'_>> {
        let head = ray.head();
        self.find_geo_intersections(ray, max_distance)
            .into_iter()
            .min_by(|a, b| {
                head.distance_squared(a.point)
                    .total_cmp(&head.distance_squared(b.point))
            })
    }
}

/// Emission and material shared by every geometry variant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Surface {
    pub emission: Color,
    pub material: Material,
}

/// A shaded primitive: intersectable, with a surface normal and a surface.
pub trait Geometry: Intersectable {
    /// Outward unit normal at a point on the surface.
    fn normal_at(&self, point: Point) -> MathResult<Vector>;

    fn surface(&self) -> &Surface;

    fn emission(&self) -> Color {
        self.surface().emission
    }

    fn material(&self) -> &Material {
        &self.surface().material
    }
}

/// Returns true if `t` lies in `(0, max_distance]` up to tolerance.
#[inline]
pub(crate) fn within(t: f64, max_distance: f64) -> bool {
    align_zero(t) > 0.0 && align_zero(t - max_distance) <= 0.0
}

/// Map hit distances along `ray` to geo points on `geometry`.
pub(crate) fn geo_points<'a>(
    geometry: &'a dyn Geometry,
    ray: &Ray,
    distances: impl IntoIterator<Item = f64>,
) -> Vec<GeoPoint<'a>> {
    distances
        .into_iter()
        .map(|t| GeoPoint::new(geometry, ray.point_at(t)))
        .collect()
}

/// A composite of intersectables.
///
/// Children are shared, so the same geometry may appear in several
/// composites. Insertion order does not affect results.
#[derive(Clone, Default)]
pub struct Geometries {
    items: Vec<Arc<dyn Intersectable>>,
}

impl Geometries {
    /// Create a new empty composite.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an intersectable to the composite.
    pub fn add(&mut self, item: impl Intersectable + 'static) {
        self.items.push(Arc::new(item));
    }

    /// Add an intersectable that is shared with other owners.
    pub fn add_shared(&mut self, item: Arc<dyn Intersectable>) {
        self.items.push(item);
    }

    /// Builder-style [`Geometries::add`].
    pub fn with(mut self, item: impl Intersectable + 'static) -> Self {
        self.add(item);
        self
    }

    /// Get the number of children.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the composite is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Intersectable for Geometries {
    fn find_geo_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        self.items
            .iter()
            .flat_map(|item| item.find_geo_intersections(ray, max_distance))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Plane, Polygon, Sphere, Triangle};

    fn v(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z).unwrap()
    }

    fn p(x: f64, y: f64, z: f64) -> Point {
        Point::new(x, y, z)
    }

    fn sample() -> Geometries {
        Geometries::new()
            .with(Sphere::new(p(0.0, 0.0, 1.0), 1.0).unwrap())
            .with(Triangle::new(p(-4.0, -4.0, 0.0), p(4.0, -4.0, 0.0), p(0.0, 4.0, 0.0)).unwrap())
            .with(Plane::new(p(0.0, 0.0, 5.0), v(0.0, 0.0, 1.0)))
    }

    #[test]
    fn test_empty_collection() {
        let geometries = Geometries::new();
        let ray = Ray::new(p(0.0, 0.0, -1.0), v(0.0, 0.0, 1.0));

        assert!(geometries.is_empty());
        assert!(geometries.find_geo_intersections(&ray, f64::INFINITY).is_empty());
        assert!(geometries.find_closest_intersection(&ray, f64::INFINITY).is_none());
    }

    #[test]
    fn test_no_shape_hit() {
        let ray = Ray::new(p(0.0, 0.0, -1.0), v(0.0, 0.0, -1.0));
        assert!(sample().find_intersections(&ray).is_empty());
    }

    #[test]
    fn test_some_shapes_hit() {
        // Misses the sphere, crosses the triangle plane outside it, hits the plane
        let ray = Ray::new(p(10.0, 10.0, -1.0), v(0.0, 0.0, 1.0));
        assert_eq!(sample().find_intersections(&ray).len(), 1);
    }

    #[test]
    fn test_all_shapes_hit() {
        let geometries = sample();
        let ray = Ray::new(p(0.0, 0.0, -1.0), v(0.0, 0.0, 1.0));

        // Triangle, two sphere points and the plane
        assert_eq!(geometries.find_intersections(&ray).len(), 4);

        let closest = geometries
            .find_closest_intersection(&ray, f64::INFINITY)
            .unwrap();
        assert!(closest.point.abs_diff_eq(p(0.0, 0.0, 0.0), 1e-9));
    }

    #[test]
    fn test_max_distance_limits_results() {
        let geometries = sample();
        let ray = Ray::new(p(0.0, 0.0, -1.0), v(0.0, 0.0, 1.0));

        // Triangle at t=1, sphere at t=1 and t=3, plane at t=6
        assert_eq!(geometries.find_geo_intersections(&ray, 2.5).len(), 2);
        assert_eq!(geometries.find_geo_intersections(&ray, 3.0).len(), 3);
        assert!(geometries.find_geo_intersections(&ray, 0.5).is_empty());
    }

    #[test]
    fn test_nested_composites() {
        let inner = Geometries::new().with(Sphere::new(p(0.0, 0.0, 10.0), 1.0).unwrap());
        let outer = Geometries::new()
            .with(inner)
            .with(Polygon::new(&[p(-1.0, -1.0, 2.0), p(1.0, -1.0, 2.0), p(1.0, 1.0, 2.0), p(-1.0, 1.0, 2.0)]).unwrap());
        let ray = Ray::new(Point::ZERO, v(0.0, 0.0, 1.0));

        assert_eq!(outer.find_intersections(&ray).len(), 3);
        let closest = outer.find_closest_intersection(&ray, f64::INFINITY).unwrap();
        assert!(closest.point.abs_diff_eq(p(0.0, 0.0, 2.0), 1e-9));
    }

    #[test]
    fn test_closest_is_minimum_for_any_count() {
        let ray = Ray::new(Point::ZERO, v(1.0, 0.0, 0.0));
        let mut geometries = Geometries::new();
        for (i, x) in [9.0, 3.0, 7.0, 5.0].into_iter().enumerate() {
            geometries.add(Sphere::new(p(x, 0.0, 0.0), 0.5).unwrap());
            let closest = geometries.find_closest_intersection(&ray, f64::INFINITY).unwrap();
            let expected = [9.0, 3.0, 3.0, 3.0][i] - 0.5;
            assert!(closest.point.abs_diff_eq(p(expected, 0.0, 0.0), 1e-9));
        }
    }

    #[test]
    fn test_geo_point_equality_by_point() {
        let a = Sphere::new(Point::ZERO, 1.0).unwrap();
        let b = Plane::new(Point::ZERO, v(0.0, 0.0, 1.0));
        let pt = p(0.0, 0.0, 1.0);
        assert_eq!(GeoPoint::new(&a, pt), GeoPoint::new(&b, pt));
        assert_ne!(GeoPoint::new(&a, pt), GeoPoint::new(&a, Point::ZERO));
    }
}
