// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::UnpolarizedSpectrum;

/// Closest surface hit along a ray. The media code only reads `t`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceIntersection {
    p: Vector3f,
    geo_normal: Vector3f,
    t: Float,
}

impl SurfaceIntersection {
    pub fn new(new_p: Vector3f,
               new_geo_normal: Vector3f,
               new_t: Float) -> Self {
        Self { p: new_p, geo_normal: new_geo_normal, t: new_t }
    }

    /// A hit at distance `t` with no meaningful geometry attached.
    pub fn at_distance(t: Float) -> Self {
        Self::new(Vector3f::zeros(), Vector3f::zeros(), t)
    }

    /// The ray left the scene without hitting anything.
    pub fn miss() -> Self {
        Self::at_distance(Float::INFINITY)
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    pub fn is_valid(&self) -> bool {
        self.t.is_finite()
    }
}

/// Candidate collision produced by free-flight sampling.
///
/// `t` is `+inf` when the ray never touched the medium support. When the ray
/// crossed the support without a collision, `t` holds the exit distance of the
/// clipped segment and `active` is false. Coefficients are only filled in for
/// active interactions and satisfy `sigma_t = sigma_s + sigma_n`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MediumInteraction<const N: usize> {
    t: Float,
    p: Vector3f,
    wi: Vector3f,
    mint: Float,
    sigma_s: UnpolarizedSpectrum<N>,
    sigma_n: UnpolarizedSpectrum<N>,
    sigma_t: UnpolarizedSpectrum<N>,
    combined_extinction: UnpolarizedSpectrum<N>,
    albedo: UnpolarizedSpectrum<N>,
    active: bool,
}

impl<const N: usize> Default for MediumInteraction<N> {
    fn default() -> Self {
        Self::invalid()
    }
}

impl<const N: usize> MediumInteraction<N> {
    pub fn invalid() -> Self {
        Self {
            t: Float::INFINITY,
            p: Vector3f::zeros(),
            wi: Vector3f::zeros(),
            mint: 0.0,
            sigma_s: UnpolarizedSpectrum::zero(),
            sigma_n: UnpolarizedSpectrum::zero(),
            sigma_t: UnpolarizedSpectrum::zero(),
            combined_extinction: UnpolarizedSpectrum::zero(),
            albedo: UnpolarizedSpectrum::zero(),
            active: false,
        }
    }

    /// A candidate point at `t` on a segment starting at `mint`. Coefficients
    /// are attached afterwards with `with_coefficients`.
    pub fn new(t: Float, p: Vector3f, wi: Vector3f, mint: Float, active: bool) -> Self {
        Self { t, p, wi, mint, active, ..Self::invalid() }
    }

    pub fn with_coefficients(mut self,
                             sigma_s: UnpolarizedSpectrum<N>,
                             sigma_n: UnpolarizedSpectrum<N>,
                             sigma_t: UnpolarizedSpectrum<N>) -> Self {
        self.sigma_s = sigma_s;
        self.sigma_n = sigma_n;
        self.sigma_t = sigma_t;
        self
    }

    pub fn with_combined_extinction(mut self, combined_extinction: UnpolarizedSpectrum<N>) -> Self {
        self.combined_extinction = combined_extinction;
        self
    }

    pub fn with_albedo(mut self, albedo: UnpolarizedSpectrum<N>) -> Self {
        self.albedo = albedo;
        self
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn wi(&self) -> Vector3f {
        self.wi
    }

    pub fn mint(&self) -> Float {
        self.mint
    }

    pub fn sigma_s(&self) -> UnpolarizedSpectrum<N> {
        self.sigma_s
    }

    pub fn sigma_n(&self) -> UnpolarizedSpectrum<N> {
        self.sigma_n
    }

    pub fn sigma_t(&self) -> UnpolarizedSpectrum<N> {
        self.sigma_t
    }

    /// Majorant the free-flight distance was drawn with.
    pub fn combined_extinction(&self) -> UnpolarizedSpectrum<N> {
        self.combined_extinction
    }

    /// Scattering fraction of a real collision. The remainder is absorbed.
    pub fn albedo(&self) -> UnpolarizedSpectrum<N> {
        self.albedo
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Whether the ray touched the medium support at all.
    pub fn is_valid(&self) -> bool {
        self.t.is_finite()
    }
}
