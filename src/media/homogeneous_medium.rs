// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::interaction::MediumInteraction;
use crate::core::medium::{BoundaryIntersector, CoefficientEvaluator, MajorantProvider, Medium, MediumBase};
use crate::core::volume::Volume;
use crate::math::aabb::AABB;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::UnpolarizedSpectrum;
use std::sync::Arc;

/// Constant extinction everywhere inside an optional bounding box. Without a
/// box the medium fills all of space.
pub struct HomogeneousMedium<const N: usize> {
    base: MediumBase<N>,
    sigma_t: UnpolarizedSpectrum<N>,
    albedo: UnpolarizedSpectrum<N>,
    albedo_volume: Option<Arc<dyn Volume>>,
    scale: Float,
    bbox: Option<AABB>,
}

impl<const N: usize> HomogeneousMedium<N> {
    pub fn new(sigma_t: UnpolarizedSpectrum<N>, albedo: UnpolarizedSpectrum<N>) -> Self {
        let base = MediumBase::new(None, "HomogeneousMedium")
            .with_homogeneous(true)
            .with_spectral_extinction(sigma_t.is_spectrally_varying());
        log::debug!("homogeneous medium: sigma_t in [{}, {}]", sigma_t.min_component(), sigma_t.max_component());
        Self {
            base,
            sigma_t: sigma_t.maximum_scalar(0.0),
            albedo,
            albedo_volume: None,
            scale: 1.0,
            bbox: None,
        }
    }

    pub fn with_base(mut self, base: MediumBase<N>) -> Self {
        self.base = base
            .with_homogeneous(true);
        self
    }

    pub fn with_albedo_volume(mut self, volume: Arc<dyn Volume>) -> Self {
        self.albedo_volume = Some(volume);
        self
    }

    pub fn with_scale(mut self, scale: Float) -> Self {
        self.scale = scale.max(0.0);
        self
    }

    pub fn with_bbox(mut self, bbox: Option<AABB>) -> Self {
        self.bbox = bbox;
        self
    }

    pub fn bbox(&self) -> Option<AABB> {
        self.bbox
    }

    fn extinction(&self) -> UnpolarizedSpectrum<N> {
        self.sigma_t * self.scale
    }

    fn albedo_at(&self, mi: &MediumInteraction<N>) -> UnpolarizedSpectrum<N> {
        let raw = match &self.albedo_volume {
            Some(volume) => UnpolarizedSpectrum::from_rgb(volume.eval(mi.p())),
            None => self.albedo,
        };
        raw.map(|v| v.clamp(0.0, 1.0))
    }
}

impl<const N: usize> ComputationNode for HomogeneousMedium<N> {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn to_string(&self) -> String {
        format!("HomogeneousMedium [sigma_t={:?}, scale={}, {}]",
                self.sigma_t.iter().collect::<Vec<_>>(), self.scale, self.base.describe())
    }
}

impl<const N: usize> BoundaryIntersector for HomogeneousMedium<N> {
    fn intersect_aabb(&self, ray: &Ray3f) -> (bool, Float, Float) {
        match &self.bbox {
            None => (true, 0.0, Float::INFINITY),
            Some(bbox) => match bbox.ray_slab_range(ray) {
                Some((t_near, t_far)) => (true, t_near, t_far),
                None => (false, 0.0, Float::INFINITY),
            },
        }
    }
}

impl<const N: usize> MajorantProvider<N> for HomogeneousMedium<N> {
    fn get_majorant(&self, _mi: &MediumInteraction<N>, _active: bool) -> UnpolarizedSpectrum<N> {
        self.extinction()
    }
}

impl<const N: usize> CoefficientEvaluator<N> for HomogeneousMedium<N> {
    /// The majorant is tight, so every collision is real.
    fn get_scattering_coefficients(&self, _mi: &MediumInteraction<N>, active: bool)
        -> (UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>) {
        if !active {
            let zero = UnpolarizedSpectrum::zero();
            return (zero, zero, zero);
        }
        let sigma_t = self.extinction();
        (sigma_t, UnpolarizedSpectrum::zero(), sigma_t)
    }

    fn get_albedo(&self, mi: &MediumInteraction<N>, active: bool) -> UnpolarizedSpectrum<N> {
        if !active {
            return UnpolarizedSpectrum::zero();
        }
        self.albedo_at(mi)
    }
}

impl<const N: usize> Medium<N> for HomogeneousMedium<N> {
    fn base(&self) -> &MediumBase<N> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MediumBase<N> {
        &mut self.base
    }
}
