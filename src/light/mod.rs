//! Light types
//!
//! Directional, point and spot lights, the effective range of attenuated
//! lights, and the uniform layouts a renderer uploads for them.

mod color;
mod range;

pub use color::Color;
pub use range::compute_range;

use glam::Vec3;

/// Default cached range of a point light. Matches the computed range of a
/// full-intensity white light with the default attenuation.
pub const DEFAULT_POINT_RANGE: f32 = 16.0;

/// Default spot light cone angle (radians).
pub const DEFAULT_CONE_ANGLE: f32 = 0.35;

/// Errors from the light range computation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LightError {
    /// The quadratic attenuation term is zero, negative or NaN.
    #[error("quadratic attenuation must be positive to bound the light (got {quadratic})")]
    NoQuadraticFalloff { quadratic: f32 },
    /// The light never reaches the attenuation curve.
    #[error("light range is undefined: negative discriminant {discriminant}")]
    NegativeDiscriminant { discriminant: f32 },
}

/// Light type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightType {
    Directional,
    Point,
    Spot,
}

/// Attenuation factors for point and spot lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    /// Constant attenuation factor (default: 1.0).
    pub constant: f32,
    /// Linear attenuation factor (default: 0.0).
    pub linear: f32,
    /// Quadratic attenuation factor (default: 1.0).
    pub quadratic: f32,
}

impl Attenuation {
    /// Create a new attenuation.
    pub const fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    /// Pure inverse-square falloff.
    pub const fn inverse_square() -> Self {
        Self::new(1.0, 0.0, 1.0)
    }

    /// Tuned for a ~20 unit range on a unit-scale color.
    pub const fn range_20() -> Self {
        Self::new(1.0, 0.22, 0.20)
    }

    /// Tuned for a ~50 unit range on a unit-scale color.
    pub const fn range_50() -> Self {
        Self::new(1.0, 0.09, 0.032)
    }

    /// Tuned for a ~100 unit range on a unit-scale color.
    pub const fn range_100() -> Self {
        Self::new(1.0, 0.045, 0.0075)
    }

    /// No attenuation (constant intensity). Has no finite range.
    pub const fn none() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Convert to array.
    pub fn to_array(&self) -> [f32; 3] {
        [self.constant, self.linear, self.quadratic]
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::inverse_square()
    }
}

/// Appearance shared by every light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseLight {
    pub color: Color,
    /// Expected to be non-negative; not enforced.
    pub intensity: f32,
}

impl BaseLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// `intensity * max(r, g, b)` on the 0-255 scale.
    pub fn peak(&self) -> f32 {
        self.intensity * self.color.max_channel() as f32
    }

    fn color_intensity(&self) -> [f32; 4] {
        let [r, g, b] = self.color.to_rgb_f32();
        [r, g, b, self.intensity]
    }
}

impl Default for BaseLight {
    fn default() -> Self {
        Self::new(Color::WHITE, 1.0)
    }
}

/// Light uniform data for GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniforms {
    /// Light direction or position (w = 0 for directional, 1 for point).
    pub direction_or_position: [f32; 4],
    /// Light color and intensity (rgb = color, a = intensity).
    pub color_intensity: [f32; 4],
    /// Constant, linear, quadratic, cached range.
    pub attenuation: [f32; 4],
}

/// Extended spot light uniform data for GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotLightUniform {
    pub position: [f32; 4],
    /// xyz = direction, w = cos(cone angle).
    pub direction_cone: [f32; 4],
    pub color_intensity: [f32; 4],
    /// Constant, linear, quadratic, cached range.
    pub attenuation: [f32; 4],
}

/// Directional light that illuminates from a direction (sun-like).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub base: BaseLight,
    /// Light direction. Callers keep it normalized.
    pub direction: Vec3,
}

impl DirectionalLight {
    /// Create a new directional light. The direction is normalized.
    pub fn new(base: BaseLight, direction: Vec3) -> Self {
        Self {
            base,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Create a white directional light.
    pub fn white(intensity: f32, direction: Vec3) -> Self {
        Self::new(BaseLight::new(Color::WHITE, intensity), direction)
    }

    pub fn uniforms(&self) -> LightUniforms {
        let d = self.direction;
        LightUniforms {
            direction_or_position: [d.x, d.y, d.z, 0.0],
            color_intensity: self.base.color_intensity(),
            attenuation: [0.0; 4],
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::white(1.0, Vec3::new(-0.3, -1.0, -0.5))
    }
}

/// Point light that illuminates from a position with attenuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub base: BaseLight,
    pub position: Vec3,
    pub attenuation: Attenuation,
    /// Cached effective range. Only refreshed by [`PointLight::update_range`]
    /// or by the caller; stale after any change to color, intensity or
    /// attenuation.
    pub range: f32,
}

impl PointLight {
    /// Create a new point light with its range computed.
    ///
    /// Falls back to [`DEFAULT_POINT_RANGE`] when the attenuation does not
    /// bound the light.
    pub fn new(base: BaseLight, position: Vec3, attenuation: Attenuation) -> Self {
        let mut light = Self {
            base,
            position,
            attenuation,
            range: DEFAULT_POINT_RANGE,
        };
        if let Err(e) = light.update_range() {
            tracing::debug!(range = light.range, "keeping default point light range: {e}");
        }
        light
    }

    /// Create a white point light with inverse-square falloff.
    pub fn white(intensity: f32, position: Vec3) -> Self {
        Self::new(
            BaseLight::new(Color::WHITE, intensity),
            position,
            Attenuation::default(),
        )
    }

    /// Compute the effective range from the current fields.
    pub fn compute_range(&self) -> Result<f32, LightError> {
        compute_range(&self.attenuation, self.base.peak())
    }

    /// Recompute and store the range. On error the cached value is kept.
    pub fn update_range(&mut self) -> Result<f32, LightError> {
        let range = self.compute_range()?;
        self.range = range;
        Ok(range)
    }

    fn attenuation_uniform(&self) -> [f32; 4] {
        let [c, l, q] = self.attenuation.to_array();
        [c, l, q, self.range]
    }

    pub fn uniforms(&self) -> LightUniforms {
        let p = self.position;
        LightUniforms {
            direction_or_position: [p.x, p.y, p.z, 1.0],
            color_intensity: self.base.color_intensity(),
            attenuation: self.attenuation_uniform(),
        }
    }
}

impl Default for PointLight {
    /// White, unit intensity, at the origin, with the range left at
    /// [`DEFAULT_POINT_RANGE`].
    fn default() -> Self {
        Self {
            base: BaseLight::default(),
            position: Vec3::ZERO,
            attenuation: Attenuation::default(),
            range: DEFAULT_POINT_RANGE,
        }
    }
}

/// Point light restricted to a cone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub point: PointLight,
    /// Cone angle (radians), expected in (0, PI).
    pub cone_angle: f32,
    /// Light direction. Callers keep it normalized.
    pub direction: Vec3,
}

impl SpotLight {
    /// Create a new spot light. The direction is normalized.
    pub fn new(point: PointLight, direction: Vec3, cone_angle: f32) -> Self {
        Self {
            point,
            cone_angle,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Create a white spot light with the default cone.
    pub fn white(intensity: f32, position: Vec3, direction: Vec3) -> Self {
        Self::new(
            PointLight::white(intensity, position),
            direction,
            DEFAULT_CONE_ANGLE,
        )
    }

    /// Set the cone angle in degrees.
    pub fn with_cone_degrees(mut self, degrees: f32) -> Self {
        self.cone_angle = degrees.to_radians();
        self
    }

    pub fn cone_cos(&self) -> f32 {
        self.cone_angle.cos()
    }

    pub fn compute_range(&self) -> Result<f32, LightError> {
        self.point.compute_range()
    }

    pub fn update_range(&mut self) -> Result<f32, LightError> {
        self.point.update_range()
    }

    pub fn uniforms(&self) -> LightUniforms {
        self.point.uniforms()
    }

    /// Get extended uniforms for GPU (includes direction and cone data).
    pub fn extended_uniforms(&self) -> SpotLightUniform {
        let p = self.point.position;
        let d = self.direction;
        SpotLightUniform {
            position: [p.x, p.y, p.z, 1.0],
            direction_cone: [d.x, d.y, d.z, self.cone_cos()],
            color_intensity: self.point.base.color_intensity(),
            attenuation: self.point.attenuation_uniform(),
        }
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            point: PointLight::default(),
            cone_angle: DEFAULT_CONE_ANGLE,
            direction: Vec3::NEG_Z,
        }
    }
}

/// Any light, for heterogeneous storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl Light {
    pub fn light_type(&self) -> LightType {
        match self {
            Light::Directional(_) => LightType::Directional,
            Light::Point(_) => LightType::Point,
            Light::Spot(_) => LightType::Spot,
        }
    }

    pub fn base(&self) -> &BaseLight {
        match self {
            Light::Directional(l) => &l.base,
            Light::Point(l) => &l.base,
            Light::Spot(l) => &l.point.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseLight {
        match self {
            Light::Directional(l) => &mut l.base,
            Light::Point(l) => &mut l.base,
            Light::Spot(l) => &mut l.point.base,
        }
    }

    /// Cached range. `None` for directional lights.
    pub fn range(&self) -> Option<f32> {
        match self {
            Light::Directional(_) => None,
            Light::Point(l) => Some(l.range),
            Light::Spot(l) => Some(l.point.range),
        }
    }

    /// Refresh the cached range. Directional lights are unbounded and
    /// return `Ok(None)`.
    pub fn update_range(&mut self) -> Result<Option<f32>, LightError> {
        match self {
            Light::Directional(_) => Ok(None),
            Light::Point(l) => l.update_range().map(Some),
            Light::Spot(l) => l.update_range().map(Some),
        }
    }

    /// Get the light uniforms for GPU.
    ///
    /// Spot lights use the point light layout here, without direction or
    /// cone. See [`Light::spot_uniforms`].
    pub fn uniforms(&self) -> LightUniforms {
        match self {
            Light::Directional(l) => l.uniforms(),
            Light::Point(l) => l.uniforms(),
            Light::Spot(l) => l.uniforms(),
        }
    }

    /// Extended uniforms with direction and cone, for spot lights only.
    pub fn spot_uniforms(&self) -> Option<SpotLightUniform> {
        match self {
            Light::Spot(l) => Some(l.extended_uniforms()),
            _ => None,
        }
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<SpotLight> for Light {
    fn from(light: SpotLight) -> Self {
        Light::Spot(light)
    }
}
