//! Recursive Phong ray tracer.
//!
//! Shading is split into local effects (emission, diffuse and specular light
//! from every light source, attenuated by transparent occluders) and global
//! effects (reflected and refracted rays traced recursively). Recursion stops
//! at a fixed depth or once the accumulated attenuation becomes negligible.

use std::sync::Arc;

use log::warn;
use lumen_math::{align_zero, is_zero, Color, DVec3, Factor, Point, Ray, Vector};

use crate::{GeoPoint, Intersectable, LightSource, Material, Scene};

/// Maps a ray to the color it sees.
pub trait RayTracer: Send + Sync {
    fn trace_ray(&self, ray: &Ray) -> Color;
}

/// Whitted-style tracer over a shared [`Scene`].
pub struct BasicRayTracer {
    scene: Arc<Scene>,
    max_level: u32,
    min_k: f64,
}

impl BasicRayTracer {
    /// Default recursion depth.
    pub const MAX_CALC_COLOR_LEVEL: u32 = 10;
    /// Default attenuation below which recursion is pruned.
    pub const MIN_CALC_COLOR_K: f64 = 0.001;

    pub fn new(scene: Arc<Scene>) -> Self {
        Self {
            scene,
            max_level: Self::MAX_CALC_COLOR_LEVEL,
            min_k: Self::MIN_CALC_COLOR_K,
        }
    }

    /// Set the maximum recursion depth (at least 1).
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level.max(1);
        self
    }

    /// Set the attenuation threshold for pruning recursion and shadows.
    pub fn with_min_k(mut self, min_k: f64) -> Self {
        self.min_k = min_k;
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn closest_hit(&self, ray: &Ray) -> Option<GeoPoint<'_>> {
        self.scene
            .geometries
            .find_closest_intersection(ray, f64::INFINITY)
    }

    fn calc_color(&self, gp: GeoPoint<'_>, ray: &Ray, level: u32, k: Factor) -> Color {
        let emission = gp.geometry.emission();
        // A point without a usable normal only shows its own emission
        let Ok(n) = gp.geometry.normal_at(gp.point) else {
            return emission;
        };
        let v = ray.direction();

        let color = emission + self.calc_local_effects(gp, v, n);
        if level <= 1 {
            return color;
        }
        color + self.calc_global_effects(gp, v, n, level, k)
    }

    fn calc_local_effects(&self, gp: GeoPoint<'_>, v: Vector, n: Vector) -> Color {
        let nv = align_zero(n.dot(v));
        if nv == 0.0 {
            return Color::BLACK;
        }

        let material = gp.geometry.material();
        let mut color = Color::BLACK;
        for light in &self.scene.lights {
            let Some(l) = light.incidence(gp.point) else {
                warn!("light source coincides with shaded point {}, skipping it", gp.point);
                continue;
            };
            let nl = align_zero(n.dot(l));
            // Light and viewer must be on the same side of the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(gp.point, light.as_ref(), l, n);
            if ktr.lower_than(self.min_k) {
                continue;
            }
            let intensity = light.intensity_at(gp.point) * ktr;
            color += intensity * (diffuse(material, nl) + specular(material, n, l, nl, v));
        }
        color
    }

    /// Fraction of a light's intensity that reaches `point` through the
    /// geometry between them.
    fn transparency(&self, point: Point, light: &dyn LightSource, l: Vector, n: Vector) -> Factor {
        let shadow_ray = Ray::with_offset(point, -l, n);
        let head = shadow_ray.head();
        let mut occluders = self
            .scene
            .geometries
            .find_geo_intersections(&shadow_ray, light.distance(point));
        occluders.sort_by(|a, b| {
            head.distance_squared(a.point)
                .total_cmp(&head.distance_squared(b.point))
        });

        let mut ktr = Factor::ONE;
        for occluder in occluders {
            ktr = ktr * occluder.geometry.material().kt;
            if ktr.lower_than(self.min_k) {
                return Factor::ZERO;
            }
        }
        ktr
    }

    fn calc_global_effects(&self, gp: GeoPoint<'_>, v: Vector, n: Vector, level: u32, k: Factor) -> Color {
        let material = gp.geometry.material();
        let mut color = Color::BLACK;
        if let Some(reflected) = reflected_ray(gp.point, v, n) {
            color += self.calc_global_effect(&reflected, level, k, material.kr);
        }
        if let Some(refracted) = refracted_ray(gp.point, v, n, material) {
            color += self.calc_global_effect(&refracted, level, k, material.kt);
        }
        color
    }

    fn calc_global_effect(&self, ray: &Ray, level: u32, k: Factor, kx: Factor) -> Color {
        let kkx = k * kx;
        if kkx.lower_than(self.min_k) {
            return Color::BLACK;
        }
        let Some(gp) = self.closest_hit(ray) else {
            return self.scene.background * kx;
        };
        match gp.geometry.normal_at(gp.point) {
            Ok(n) if !is_zero(n.dot(ray.direction())) => {
                self.calc_color(gp, ray, level - 1, kkx) * kx
            }
            // Grazing hit
            _ => Color::BLACK,
        }
    }
}

impl RayTracer for BasicRayTracer {
    fn trace_ray(&self, ray: &Ray) -> Color {
        match self.closest_hit(ray) {
            Some(gp) => {
                self.calc_color(gp, ray, self.max_level, Factor::ONE)
                    + self.scene.ambient_light.intensity()
            }
            None => self.scene.background,
        }
    }
}

fn diffuse(material: &Material, nl: f64) -> Factor {
    material.kd.scale(nl.abs())
}

fn specular(material: &Material, n: Vector, l: Vector, nl: f64, v: Vector) -> Factor {
    let r = l.as_dvec3() - n.as_dvec3() * (2.0 * nl);
    let vr = align_zero(v.as_dvec3().dot(r));
    if vr >= 0.0 {
        return Factor::ZERO;
    }
    material.ks.scale((-vr).powi(material.shininess))
}

/// Mirror of `v` about `n`, starting just off the surface.
fn reflected_ray(point: Point, v: Vector, n: Vector) -> Option<Ray> {
    let r = v.as_dvec3() - n.as_dvec3() * (2.0 * v.dot(n));
    let r = Vector::from_dvec3(r).ok()?;
    Some(Ray::with_offset(point, r, n))
}

/// Snell refraction of `v` through a surface of `material`.
///
/// A ray heading against the normal enters the material from vacuum, one
/// heading along it leaves into vacuum. Total internal reflection yields the
/// reflected ray.
fn refracted_ray(point: Point, v: Vector, n: Vector, material: &Material) -> Option<Ray> {
    let index = material.refractive_index;
    if is_zero(index - 1.0) {
        return Some(Ray::with_offset(point, v, n));
    }

    let vn = v.dot(n);
    let (facing, eta) = if vn < 0.0 {
        (n.as_dvec3(), 1.0 / index)
    } else {
        (-n.as_dvec3(), index)
    };

    let cos1 = -v.as_dvec3().dot(facing);
    let sin2_sq = eta * eta * (1.0 - cos1 * cos1);
    if sin2_sq > 1.0 || is_zero(sin2_sq - 1.0) {
        return reflected_ray(point, v, n);
    }

    let cos2 = (1.0 - sin2_sq).sqrt();
    let t: DVec3 = v.as_dvec3() * eta + facing * (eta * cos1 - cos2);
    let t = Vector::from_dvec3(t).ok()?;
    Some(Ray::with_offset(point, t, n))
}
