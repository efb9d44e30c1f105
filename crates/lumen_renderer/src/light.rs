//! Light sources.
//!
//! Ambient light is a flat term added once per primary ray. Every other light
//! implements [`LightSource`] and is sampled per shading point.

use lumen_math::{Color, Point, Vector};

/// Uniform, direction-independent light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient contribution.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::BLACK,
    };

    /// Ambient light of `color` scaled by the attenuation coefficient `ka`.
    pub fn new(color: Color, ka: f64) -> Self {
        Self {
            intensity: color * ka,
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// A light that illuminates points from a direction.
pub trait LightSource: Send + Sync {
    /// Intensity reaching `point`, including attenuation.
    fn intensity_at(&self, point: Point) -> Color;

    /// Unit direction from the light toward `point`.
    ///
    /// `None` when the direction is undefined (a positional light sitting on
    /// the point).
    fn incidence(&self, point: Point) -> Option<Vector>;

    /// Distance from `point` to the light, `f64::INFINITY` for lights at
    /// infinity.
    fn distance(&self, point: Point) -> f64;
}

/// A light at infinite distance shining along a fixed direction.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: Point) -> Color {
        self.intensity
    }

    fn incidence(&self, _point: Point) -> Option<Vector> {
        Some(self.direction)
    }

    fn distance(&self, _point: Point) -> f64 {
        f64::INFINITY
    }
}

/// An omnidirectional light at a position, attenuated by
/// `kc + kl * d + kq * d^2`.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    intensity: Color,
    position: Point,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Create an unattenuated point light (`kc = 1`, `kl = kq = 0`).
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    fn attenuated(&self, point: Point) -> Color {
        let d2 = self.position.distance_squared(point);
        let d = d2.sqrt();
        self.intensity / (self.kc + self.kl * d + self.kq * d2)
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: Point) -> Color {
        self.attenuated(point)
    }

    fn incidence(&self, point: Point) -> Option<Vector> {
        point.subtract(self.position).ok().map(|v| v.normalize())
    }

    fn distance(&self, point: Point) -> f64 {
        self.position.distance(point)
    }
}

/// A point light whose intensity falls off away from its main direction.
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    light: PointLight,
    direction: Vector,
    narrow_beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, direction: Vector) -> Self {
        Self {
            light: PointLight::new(intensity, position),
            direction: direction.normalize(),
            narrow_beam: 1.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.light = self.light.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.light = self.light.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.light = self.light.with_kq(kq);
        self
    }

    /// Sharpen the beam: the cosine falloff is raised to this exponent.
    pub fn with_narrow_beam(mut self, exponent: f64) -> Self {
        self.narrow_beam = exponent;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: Point) -> Color {
        let Some(l) = self.light.incidence(point) else {
            return Color::BLACK;
        };
        let cos = self.direction.dot(l);
        if cos <= 0.0 {
            return Color::BLACK;
        }
        self.light.attenuated(point) * cos.powf(self.narrow_beam)
    }

    fn incidence(&self, point: Point) -> Option<Vector> {
        self.light.incidence(point)
    }

    fn distance(&self, point: Point) -> f64 {
        self.light.distance(point)
    }
}
