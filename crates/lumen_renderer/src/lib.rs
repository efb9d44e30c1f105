//! Lumen renderer - offline CPU ray tracing.
//!
//! A Whitted-style ray tracer with Phong local shading, attenuated shadows,
//! recursive reflection and refraction, supersampled anti-aliasing and a
//! multi-threaded pixel scheduler.
//!
//! ```no_run
//! use std::sync::Arc;
//! use lumen_math::{Color, Point, Vector};
//! use lumen_renderer::{BasicRayTracer, Camera, ImageWriter, Material, PointLight, Scene, Sphere};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scene = Scene::new("sphere")
//!     .with_geometry(
//!         Sphere::new(Point::new(0.0, 0.0, -50.0), 20.0)?
//!             .with_emission(Color::new(0.0, 0.0, 100.0))
//!             .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(100)),
//!     )
//!     .with_light(PointLight::new(Color::new(500.0, 300.0, 0.0), Point::new(-50.0, -50.0, 25.0)));
//!
//! let camera = Camera::new(Point::ZERO, Vector::new(0.0, 0.0, -1.0)?, Vector::new(0.0, 1.0, 0.0)?)?
//!     .with_view_plane_size(150.0, 150.0)
//!     .with_view_plane_distance(100.0)
//!     .with_threads(0)
//!     .with_ray_tracer(Arc::new(BasicRayTracer::new(Arc::new(scene))));
//!
//! let mut image = ImageWriter::new("sphere", 500, 500);
//! camera.render_image(&mut image)?;
//! image.write_to_file("images")?;
//! # Ok(())
//! # }
//! ```

mod camera;
mod cylinder;
mod error;
mod image_writer;
mod intersectable;
mod light;
mod material;
mod plane;
mod polygon;
mod ray_tracer;
mod render;
mod scene;
mod sphere;
mod triangle;
mod tube;

pub use camera::Camera;
pub use cylinder::Cylinder;
pub use error::{ConstructionError, ConstructionResult, RenderError, RenderResult};
pub use image_writer::{ImageWriter, PixelWriter};
pub use intersectable::{GeoPoint, Geometries, Geometry, Intersectable, Surface};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::Material;
pub use plane::Plane;
pub use polygon::Polygon;
pub use ray_tracer::{BasicRayTracer, RayTracer};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use tube::Tube;

/// Re-export the primitive algebra from lumen_math
pub use lumen_math::{Color, Factor, MathError, Point, Ray, Vector};
