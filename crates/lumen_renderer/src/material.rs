//! Surface material coefficients for the Phong shading model.

use lumen_math::Factor;

/// Reflectance properties of a surface.
///
/// The default material is opaque, non-reflective and matte black: every
/// coefficient is zero, shininess is 1 and the refractive index is 1 (no
/// bending).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse coefficient
    pub kd: Factor,
    /// Specular coefficient
    pub ks: Factor,
    /// Reflection coefficient
    pub kr: Factor,
    /// Transparency (transmission) coefficient
    pub kt: Factor,
    /// Phong shininess exponent
    pub shininess: i32,
    /// Refractive index, only meaningful when `kt` is non-zero
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: Factor::ZERO,
            ks: Factor::ZERO,
            kr: Factor::ZERO,
            kt: Factor::ZERO,
            shininess: 1,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kd(mut self, kd: impl Into<Factor>) -> Self {
        self.kd = kd.into();
        self
    }

    pub fn with_ks(mut self, ks: impl Into<Factor>) -> Self {
        self.ks = ks.into();
        self
    }

    pub fn with_kr(mut self, kr: impl Into<Factor>) -> Self {
        self.kr = kr.into();
        self
    }

    pub fn with_kt(mut self, kt: impl Into<Factor>) -> Self {
        self.kt = kt.into();
        self
    }

    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_refractive_index(mut self, index: f64) -> Self {
        self.refractive_index = index;
        self
    }
}
