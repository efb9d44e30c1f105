//! JSON scene descriptions.
//!
//! A scene file names the image, its resolution, the camera, and the
//! background, ambient light, lights and geometries of the scene. Colors are
//! `[r, g, b]` in 0-255 units; material coefficients are either a single
//! number or an `[r, g, b]` triple.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lumen_math::{Color, Factor, Point, Ray, Vector};
use lumen_renderer::{
    AmbientLight, Camera, Cylinder, DirectionalLight, Geometries, Material, Plane, PointLight, Polygon, Scene,
    Sphere, SpotLight, Triangle, Tube,
};
use serde::Deserialize;

type Triple = [f64; 3];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    pub name: String,
    #[serde(default = "default_resolution")]
    pub resolution: [u32; 2],
    #[serde(default)]
    pub background: Triple,
    #[serde(default)]
    pub ambient_light: Option<AmbientDesc>,
    pub camera: CameraDesc,
    #[serde(default)]
    pub geometries: Vec<GeometryDesc>,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
}

fn default_resolution() -> [u32; 2] {
    [500, 500]
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmbientDesc {
    pub color: Triple,
    #[serde(default = "one")]
    pub ka: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDesc {
    pub location: Triple,
    pub to: Triple,
    pub up: Triple,
    pub view_plane_size: [f64; 2],
    pub view_plane_distance: f64,
    /// Samples per pixel axis; anti-aliasing is off when absent
    #[serde(default)]
    pub anti_aliasing: Option<u32>,
    #[serde(default)]
    pub seed: u64,
}

/// A material coefficient: one value for all channels, or one per channel.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum FactorDesc {
    Scalar(f64),
    Rgb(Triple),
}

impl Default for FactorDesc {
    fn default() -> Self {
        FactorDesc::Scalar(0.0)
    }
}

impl From<FactorDesc> for Factor {
    fn from(desc: FactorDesc) -> Self {
        match desc {
            FactorDesc::Scalar(k) => Factor::splat(k),
            FactorDesc::Rgb([r, g, b]) => Factor::new(r, g, b),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaterialDesc {
    pub kd: FactorDesc,
    pub ks: FactorDesc,
    pub kr: FactorDesc,
    pub kt: FactorDesc,
    pub shininess: i32,
    pub refractive_index: f64,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            kd: FactorDesc::default(),
            ks: FactorDesc::default(),
            kr: FactorDesc::default(),
            kt: FactorDesc::default(),
            shininess: 1,
            refractive_index: 1.0,
        }
    }
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        Material::new()
            .with_kd(desc.kd)
            .with_ks(desc.ks)
            .with_kr(desc.kr)
            .with_kt(desc.kt)
            .with_shininess(desc.shininess)
            .with_refractive_index(desc.refractive_index)
    }
}

#[derive(Debug, Deserialize)]
pub struct AxisDesc {
    pub head: Triple,
    pub direction: Triple,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDesc {
    Sphere { center: Triple, radius: f64 },
    Plane { point: Triple, normal: Triple },
    Triangle { vertices: [Triple; 3] },
    Polygon { vertices: Vec<Triple> },
    Tube { axis: AxisDesc, radius: f64 },
    Cylinder { axis: AxisDesc, radius: f64, height: f64 },
}

#[derive(Debug, Deserialize)]
pub struct GeometryDesc {
    #[serde(flatten)]
    pub shape: ShapeDesc,
    #[serde(default)]
    pub emission: Triple,
    #[serde(default)]
    pub material: MaterialDesc,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum LightDesc {
    Directional {
        intensity: Triple,
        direction: Triple,
    },
    Point {
        intensity: Triple,
        position: Triple,
        #[serde(default = "one")]
        kc: f64,
        #[serde(default)]
        kl: f64,
        #[serde(default)]
        kq: f64,
    },
    Spot {
        intensity: Triple,
        position: Triple,
        direction: Triple,
        #[serde(default = "one")]
        kc: f64,
        #[serde(default)]
        kl: f64,
        #[serde(default)]
        kq: f64,
        #[serde(default = "one")]
        narrow_beam: f64,
    },
}

fn point([x, y, z]: Triple) -> Point {
    Point::new(x, y, z)
}

fn color([r, g, b]: Triple) -> Color {
    Color::new(r, g, b)
}

fn vector([x, y, z]: Triple, what: &str) -> Result<Vector> {
    Vector::new(x, y, z).with_context(|| format!("{what} must not be the zero vector"))
}

impl AxisDesc {
    fn ray(&self) -> Result<Ray> {
        Ok(Ray::new(point(self.head), vector(self.direction, "axis direction")?))
    }
}

impl SceneFile {
    /// Parse a scene description from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid scene description")
    }

    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("failed to load {}", path.display()))
    }

    pub fn build_scene(&self) -> Result<Scene> {
        let mut scene = Scene::new(&self.name).with_background(color(self.background));
        if let Some(ambient) = &self.ambient_light {
            scene = scene.with_ambient_light(AmbientLight::new(color(ambient.color), ambient.ka));
        }

        let mut geometries = Geometries::new();
        for (index, desc) in self.geometries.iter().enumerate() {
            add_geometry(&mut geometries, desc).with_context(|| format!("invalid geometry #{index}"))?;
        }
        scene = scene.with_geometries(geometries);

        for (index, desc) in self.lights.iter().enumerate() {
            scene = add_light(scene, desc).with_context(|| format!("invalid light #{index}"))?;
        }
        Ok(scene)
    }

    /// Camera frame, view plane and anti-aliasing; the ray tracer and thread
    /// count are left to the caller.
    pub fn build_camera(&self) -> Result<Camera> {
        let desc = &self.camera;
        let [width, height] = desc.view_plane_size;
        let camera = Camera::new(
            point(desc.location),
            vector(desc.to, "camera 'to'")?,
            vector(desc.up, "camera 'up'")?,
        )
        .context("invalid camera")?
        .with_view_plane_size(width, height)
        .with_view_plane_distance(desc.view_plane_distance)
        .with_seed(desc.seed);

        Ok(match desc.anti_aliasing {
            Some(samples) => camera.with_anti_aliasing(true, samples),
            None => camera,
        })
    }
}

fn add_geometry(geometries: &mut Geometries, desc: &GeometryDesc) -> Result<()> {
    let emission = color(desc.emission);
    let material = Material::from(&desc.material);

    match &desc.shape {
        ShapeDesc::Sphere { center, radius } => geometries.add(
            Sphere::new(point(*center), *radius)?
                .with_emission(emission)
                .with_material(material),
        ),
        ShapeDesc::Plane { point: q0, normal } => geometries.add(
            Plane::new(point(*q0), vector(*normal, "plane normal")?)
                .with_emission(emission)
                .with_material(material),
        ),
        ShapeDesc::Triangle { vertices: [a, b, c] } => geometries.add(
            Triangle::new(point(*a), point(*b), point(*c))?
                .with_emission(emission)
                .with_material(material),
        ),
        ShapeDesc::Polygon { vertices } => {
            let vertices: Vec<Point> = vertices.iter().copied().map(point).collect();
            geometries.add(
                Polygon::new(&vertices)?
                    .with_emission(emission)
                    .with_material(material),
            )
        }
        ShapeDesc::Tube { axis, radius } => geometries.add(
            Tube::new(axis.ray()?, *radius)?
                .with_emission(emission)
                .with_material(material),
        ),
        ShapeDesc::Cylinder { axis, radius, height } => geometries.add(
            Cylinder::new(axis.ray()?, *radius, *height)?
                .with_emission(emission)
                .with_material(material),
        ),
    }
    Ok(())
}

fn add_light(scene: Scene, desc: &LightDesc) -> Result<Scene> {
    Ok(match desc {
        LightDesc::Directional { intensity, direction } => scene.with_light(DirectionalLight::new(
            color(*intensity),
            vector(*direction, "light direction")?,
        )),
        LightDesc::Point {
            intensity,
            position,
            kc,
            kl,
            kq,
        } => scene.with_light(
            PointLight::new(color(*intensity), point(*position))
                .with_kc(*kc)
                .with_kl(*kl)
                .with_kq(*kq),
        ),
        LightDesc::Spot {
            intensity,
            position,
            direction,
            kc,
            kl,
            kq,
            narrow_beam,
        } => scene.with_light(
            SpotLight::new(
                color(*intensity),
                point(*position),
                vector(*direction, "spot direction")?,
            )
            .with_kc(*kc)
            .with_kl(*kl)
            .with_kq(*kq)
            .with_narrow_beam(*narrow_beam),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = include_str!("../../../scenes/mirrors.json");
    const GLASS: &str = include_str!("../../../scenes/glass.json");

    fn minimal(extra: &str) -> String {
        format!(
            r#"{{
                "name": "test",
                "camera": {{
                    "location": [0, 0, 10],
                    "to": [0, 0, -1],
                    "up": [0, 1, 0],
                    "view_plane_size": [4, 4],
                    "view_plane_distance": 5
                }}
                {extra}
            }}"#
        )
    }

    #[test]
    fn test_demo_scene_builds() {
        let desc = SceneFile::from_json(DEMO).unwrap();
        let scene = desc.build_scene().unwrap();
        assert_eq!(scene.geometries.len(), 4);
        assert_eq!(scene.lights.len(), 1);
        assert!(desc.build_camera().is_ok());

        let desc = SceneFile::from_json(GLASS).unwrap();
        assert_eq!(desc.camera.anti_aliasing, Some(3));
        assert_eq!(desc.build_scene().unwrap().geometries.len(), 4);
        assert!(desc.build_camera().is_ok());
    }

    #[test]
    fn test_defaults() {
        let desc = SceneFile::from_json(&minimal("")).unwrap();
        assert_eq!(desc.resolution, [500, 500]);

        let scene = desc.build_scene().unwrap();
        assert_eq!(scene.name, "test");
        assert_eq!(scene.background, Color::BLACK);
        assert_eq!(scene.ambient_light, AmbientLight::NONE);
        assert!(scene.geometries.is_empty());
    }

    #[test]
    fn test_material_factors() {
        let json = minimal(
            r#", "geometries": [{
                "type": "sphere", "center": [0, 0, 0], "radius": 1,
                "emission": [10, 20, 30],
                "material": {"kd": 0.5, "kt": [0.1, 0.2, 0.3], "shininess": 40}
            }]"#,
        );
        let desc = SceneFile::from_json(&json).unwrap();
        let material = Material::from(&desc.geometries[0].material);

        assert_eq!(material.kd, Factor::splat(0.5));
        assert_eq!(material.kt, Factor::new(0.1, 0.2, 0.3));
        assert_eq!(material.ks, Factor::ZERO);
        assert_eq!(material.shininess, 40);
        assert_eq!(material.refractive_index, 1.0);
        assert_eq!(desc.geometries[0].emission, [10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_every_shape_and_light() {
        let json = minimal(
            r#", "geometries": [
                {"type": "sphere", "center": [0, 0, 0], "radius": 1},
                {"type": "plane", "point": [0, -1, 0], "normal": [0, 1, 0]},
                {"type": "triangle", "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]]},
                {"type": "polygon", "vertices": [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]]},
                {"type": "tube", "axis": {"head": [0, 0, 0], "direction": [0, 1, 0]}, "radius": 0.5},
                {"type": "cylinder", "axis": {"head": [0, 0, 0], "direction": [0, 1, 0]}, "radius": 0.5, "height": 2}
            ],
            "lights": [
                {"type": "directional", "intensity": [100, 100, 100], "direction": [0, -1, 0]},
                {"type": "point", "intensity": [100, 100, 100], "position": [0, 5, 0], "kl": 0.1},
                {"type": "spot", "intensity": [100, 100, 100], "position": [0, 5, 0], "direction": [0, -1, 0], "narrow_beam": 4}
            ]"#,
        );
        let scene = SceneFile::from_json(&json).unwrap().build_scene().unwrap();
        assert_eq!(scene.geometries.len(), 6);
        assert_eq!(scene.lights.len(), 3);
    }

    #[test]
    fn test_invalid_geometry_is_reported() {
        let json = minimal(
            r#", "geometries": [
                {"type": "sphere", "center": [0, 0, 0], "radius": 1},
                {"type": "polygon", "vertices": [[0, 0, 0], [1, 0, 0]]}
            ]"#,
        );
        let err = SceneFile::from_json(&json).unwrap().build_scene().err().unwrap();
        assert!(format!("{err:#}").contains("invalid geometry #1"));
    }

    #[test]
    fn test_invalid_camera_is_reported() {
        let json = r#"{
            "name": "bad camera",
            "camera": {
                "location": [0, 0, 0], "to": [0, 0, -1], "up": [0, 1, 1],
                "view_plane_size": [1, 1], "view_plane_distance": 1
            }
        }"#;
        let err = SceneFile::from_json(json).unwrap().build_camera().err().unwrap();
        assert!(format!("{err:#}").contains("orthogonal"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(SceneFile::from_json(&minimal(r#", "colour": [1, 2, 3]"#)).is_err());
        assert!(SceneFile::from_json(&minimal(r#", "geometries": [{"type": "torus"}]"#)).is_err());
    }
}
