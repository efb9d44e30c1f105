//! Convex planar polygon primitive.

use lumen_math::{align_zero, is_zero, Color, MathResult, Point, Ray, Vector};

use crate::{
    error::{ConstructionError, ConstructionResult},
    intersectable::{geo_points, GeoPoint, Geometry, Intersectable, Surface},
    Material, Plane,
};

/// A convex polygon with at least three coplanar vertices.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point>,
    plane: Plane,
    surface: Surface,
}

impl Polygon {
    /// Create a polygon from vertices ordered along its edge path.
    ///
    /// Fails when there are fewer than three vertices, consecutive vertices
    /// coincide, three consecutive vertices are collinear, the vertices are
    /// not coplanar, or the polygon is not convex.
    pub fn new(vertices: &[Point]) -> ConstructionResult<Self> {
        let size = vertices.len();
        if size < 3 {
            return Err(ConstructionError::InvalidPolygon(
                "a polygon can't have less than 3 vertices",
            ));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        let polygon = Self {
            vertices: vertices.to_vec(),
            plane,
            surface: Surface::default(),
        };
        if size == 3 {
            return Ok(polygon);
        }

        let n = polygon.plane.normal();
        // Orientation of the corner between the last and the first edge; every
        // other corner of a convex polygon turns the same way.
        let mut edge1 = vertices[size - 1].subtract(vertices[size - 2])?;
        let mut edge2 = vertices[0].subtract(vertices[size - 1])?;
        let positive = edge1.cross(edge2)?.dot(n) > 0.0;

        for i in 1..size {
            // Distance off the plane, relative to the vertex spread
            let offset = vertices[i].as_dvec3() - vertices[0].as_dvec3();
            if !is_zero(offset.dot(n.as_dvec3()) / offset.length().max(1.0)) {
                return Err(ConstructionError::InvalidPolygon(
                    "all vertices of a polygon must lay in the same plane",
                ));
            }
            edge1 = edge2;
            edge2 = vertices[i].subtract(vertices[i - 1])?;
            if positive != (edge1.cross(edge2)?.dot(n) > 0.0) {
                return Err(ConstructionError::InvalidPolygon(
                    "all vertices must be ordered and the polygon must be convex",
                ));
            }
        }

        Ok(polygon)
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.surface.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.surface.material = material;
        self
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    fn hit_distance(&self, ray: &Ray, max_distance: f64) -> Option<f64> {
        let t = self.plane.hit_distance(ray, max_distance)?;

        let head = ray.head().as_dvec3();
        let dir = ray.direction().as_dvec3();
        let count = self.vertices.len();

        // The hit is inside when the ray passes on the same side of every edge
        let mut sign = 0.0;
        for i in 0..count {
            let vi = self.vertices[i].as_dvec3() - head;
            let vj = self.vertices[(i + 1) % count].as_dvec3() - head;
            let side = align_zero(dir.dot(vi.cross(vj)));
            if side == 0.0 {
                return None;
            }
            if sign == 0.0 {
                sign = side.signum();
            } else if sign != side.signum() {
                return None;
            }
        }

        Some(t)
    }
}

impl Intersectable for Polygon {
    fn find_geo_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        geo_points(self, ray, self.hit_distance(ray, max_distance))
    }
}

impl Geometry for Polygon {
    fn normal_at(&self, _point: Point) -> MathResult<Vector> {
        Ok(self.plane.normal())
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

    fn square() -> Polygon {
        Polygon::new(&[p(0.0, 0.0, 1.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(-1.0, 1.0, 1.0)]).unwrap()
    }

    #[test]
    fn test_valid_quadrangle() {
        let polygon = square();
        assert_eq!(polygon.vertices().len(), 4);

        let s = (1.0f64 / 3.0).sqrt();
        let n = polygon.normal_at(p(0.0, 0.0, 1.0)).unwrap();
        assert!(n.abs_diff_eq(v(s, s, s), 1e-12) || n.abs_diff_eq(v(-s, -s, -s), 1e-12));
    }

    #[test]
    fn test_wrong_vertex_order() {
        let result = Polygon::new(&[p(0.0, 0.0, 1.0), p(0.0, 1.0, 0.0), p(1.0, 0.0, 0.0), p(-1.0, 1.0, 1.0)]);
        assert!(matches!(result, Err(ConstructionError::InvalidPolygon(_))));
    }

    #[test]
    fn test_vertex_not_in_plane() {
        let result = Polygon::new(&[p(0.0, 0.0, 1.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 2.0, 2.0)]);
        assert!(matches!(result, Err(ConstructionError::InvalidPolygon(_))));
    }

    #[test]
    fn test_large_polygon_is_coplanar() {
        let vertices = [
            p(444444.2, 271604.9, -493827.0),
            p(49382.6, -518518.3, 493827.0),
            p(-444444.2, -271604.9, 493827.0),
            p(-49382.6, 518518.3, -493827.0),
        ];
        assert!(Polygon::new(&vertices).is_ok());

        let mut lifted = vertices;
        lifted[3] = p(-49382.6, 518518.3, -493826.0);
        assert!(matches!(Polygon::new(&lifted), Err(ConstructionError::InvalidPolygon(_))));
    }

    #[test]
    fn test_concave_quadrangle() {
        let result = Polygon::new(&[p(0.0, 0.0, 1.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.5, 0.25, 0.5)]);
        assert!(matches!(result, Err(ConstructionError::InvalidPolygon(_))));
    }

    #[test]
    fn test_degenerate_vertices() {
        // Too few vertices
        assert!(matches!(
            Polygon::new(&[p(0.0, 0.0, 1.0), p(1.0, 0.0, 0.0)]),
            Err(ConstructionError::InvalidPolygon(_))
        ));
        // Vertex on a side
        assert!(Polygon::new(&[p(0.0, 0.0, 1.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.5, 0.5)]).is_err());
        // Repeated vertex
        assert!(Polygon::new(&[p(0.0, 0.0, 1.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 1.0, 0.0)]).is_err());
    }

    #[test]
    fn test_ray_inside_polygon() {
        let ray = Ray::new(p(0.25, 0.25, 2.0), v(0.0, 0.0, -1.0));
        let points = square().find_intersections(&ray);
        assert_eq!(points.len(), 1);
        assert!(points[0].abs_diff_eq(p(0.25, 0.25, 0.5), 1e-12));
    }

    #[test]
    fn test_ray_outside_polygon() {
        // Against a side
        let ray = Ray::new(p(2.0, 2.0, 2.0), v(0.0, 0.0, -1.0));
        assert!(square().find_intersections(&ray).is_empty());
        // Against a vertex's continuation
        let ray = Ray::new(p(3.0, -1.0, 2.0), v(0.0, 0.0, -1.0));
        assert!(square().find_intersections(&ray).is_empty());
    }

    #[test]
    fn test_ray_on_edge_or_vertex() {
        let polygon = square();
        // On the edge between (1,0,0) and (0,1,0)
        let ray = Ray::new(p(0.5, 0.5, 2.0), v(0.0, 0.0, -1.0));
        assert!(polygon.find_intersections(&ray).is_empty());
        // On a vertex
        let ray = Ray::new(p(1.0, 0.0, 2.0), v(0.0, 0.0, -1.0));
        assert!(polygon.find_intersections(&ray).is_empty());
    }
}
