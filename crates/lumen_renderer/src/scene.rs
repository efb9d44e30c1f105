//! Scene container.

use lumen_math::Color;

use crate::{AmbientLight, Geometries, Intersectable, LightSource};

/// Everything a ray tracer needs to shade a ray.
///
/// Assembled once before rendering and only read while workers are active.
#[derive(Default)]
pub struct Scene {
    pub name: String,
    pub background: Color,
    pub ambient_light: AmbientLight,
    pub geometries: Geometries,
    pub lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Create an empty scene: black background, no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    /// Add a single geometry to the scene's composite.
    pub fn with_geometry(mut self, geometry: impl Intersectable + 'static) -> Self {
        self.geometries.add(geometry);
        self
    }

    pub fn with_light(mut self, light: impl LightSource + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }
}
