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

/// Extinction given by a density volume. Delta tracking runs against a single
/// global majorant, `scale * max(density)`, and the gap to the local density
/// is filled with null collisions.
pub struct HeterogeneousMedium<const N: usize> {
    base: MediumBase<N>,
    sigma_t_volume: Arc<dyn Volume>,
    albedo_volume: Arc<dyn Volume>,
    scale: Float,
    max_density: Float,
    bbox: Option<AABB>,
}

impl<const N: usize> HeterogeneousMedium<N> {
    pub fn new(sigma_t_volume: Arc<dyn Volume>, albedo_volume: Arc<dyn Volume>) -> Self {
        let bbox = sigma_t_volume.bbox();
        let max_density = sigma_t_volume.max().max(0.0);
        let base = MediumBase::new(None, "HeterogeneousMedium")
            .with_homogeneous(false)
            .with_spectral_extinction(sigma_t_volume.channels() > 1);
        log::debug!("heterogeneous medium: max density {}, bounded = {}", max_density, bbox.is_some());
        Self {
            base,
            sigma_t_volume,
            albedo_volume,
            scale: 1.0,
            max_density,
            bbox,
        }
    }

    pub fn with_base(mut self, base: MediumBase<N>) -> Self {
        self.base = base.with_homogeneous(false);
        self
    }

    pub fn with_scale(mut self, scale: Float) -> Self {
        self.scale = scale.max(0.0);
        self
    }

    pub fn bbox(&self) -> Option<AABB> {
        self.bbox
    }

    fn majorant(&self) -> UnpolarizedSpectrum<N> {
        UnpolarizedSpectrum::splat(self.scale * self.max_density)
    }
}

impl<const N: usize> ComputationNode for HeterogeneousMedium<N> {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn to_string(&self) -> String {
        format!("HeterogeneousMedium [max_density={}, scale={}, {}]",
                self.max_density, self.scale, self.base.describe())
    }
}

impl<const N: usize> BoundaryIntersector for HeterogeneousMedium<N> {
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

impl<const N: usize> MajorantProvider<N> for HeterogeneousMedium<N> {
    fn get_majorant(&self, _mi: &MediumInteraction<N>, _active: bool) -> UnpolarizedSpectrum<N> {
        self.majorant()
    }
}

impl<const N: usize> CoefficientEvaluator<N> for HeterogeneousMedium<N> {
    fn get_scattering_coefficients(&self, mi: &MediumInteraction<N>, active: bool)
        -> (UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>) {
        if !active {
            let zero = UnpolarizedSpectrum::zero();
            return (zero, zero, zero);
        }

        let majorant = self.majorant();
        let density = UnpolarizedSpectrum::<N>::from_rgb(self.sigma_t_volume.eval(mi.p())) * self.scale;
        // Clamped so a volume that under-reports its maximum cannot push the
        // local extinction above the majorant.
        let sigma_s = density.zip_map(&majorant, |d, m| d.max(0.0).min(m));
        let sigma_n = (majorant - sigma_s).maximum_scalar(0.0);
        (sigma_s, sigma_n, sigma_s + sigma_n)
    }

    fn get_albedo(&self, mi: &MediumInteraction<N>, active: bool) -> UnpolarizedSpectrum<N> {
        if !active {
            return UnpolarizedSpectrum::zero();
        }
        UnpolarizedSpectrum::from_rgb(self.albedo_volume.eval(mi.p())).map(|v| v.clamp(0.0, 1.0))
    }
}

impl<const N: usize> Medium<N> for HeterogeneousMedium<N> {
    fn base(&self) -> &MediumBase<N> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MediumBase<N> {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interaction::SurfaceIntersection;
    use crate::core::medium::MediumEventSamplingMode;
    use crate::core::rng::LcgRng;
    use crate::math::constants::Vector3f;
    use crate::math::spectrum::{MonoSpectrum, RGBSpectrum};
    use crate::volumes::const_volume::ConstantVolume;
    use crate::volumes::grid_volume::GridVolume;

    /// 2x2x2 grid over the unit cube with densities between 0 and 4.
    fn ramp_volume() -> Arc<dyn Volume> {
        let data = vec![0.0, 1.0, 0.5, 2.0, 0.25, 4.0, 3.0, 1.5];
        let bbox = AABB::new(Vector3f::zeros(), Vector3f::new(1.0, 1.0, 1.0));
        Arc::new(GridVolume::from_data(data, (2, 2, 2), 1, bbox).expect("valid grid"))
    }

    fn ramp_medium() -> HeterogeneousMedium<3> {
        HeterogeneousMedium::new(ramp_volume(), Arc::new(ConstantVolume::new_scalar(0.8)))
            .with_scale(2.0)
    }

    #[test]
    fn test_majorant_is_scaled_max_density() {
        let medium = ramp_medium();
        let mi = MediumInteraction::invalid();
        assert_eq!(medium.get_majorant(&mi, true), RGBSpectrum::splat(8.0));
        assert!(!medium.is_homogeneous());
        assert!(!medium.has_spectral_extinction());
    }

    #[test]
    fn test_majorant_dominates_random_points() {
        let medium = ramp_medium();
        let mut rng = LcgRng::new(2024);
        for _ in 0..1000 {
            let p = Vector3f::new(rng.next_f32(), rng.next_f32(), rng.next_f32());
            let probe = MediumInteraction::new(0.0, p, Vector3f::zeros(), 0.0, true);
            let majorant = medium.get_majorant(&probe, true);
            let (sigma_s, sigma_n, sigma_t) = medium.get_scattering_coefficients(&probe, true);
            for c in 0..3 {
                assert!(sigma_t[c] <= majorant[c] + 1e-5);
                assert!(sigma_s[c] >= 0.0);
                assert!(sigma_n[c] >= 0.0);
                assert!((sigma_t[c] - (sigma_s[c] + sigma_n[c])).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_sampled_interactions_stay_inside_bounds() {
        let medium = ramp_medium();
        let mut rng = LcgRng::new(9);
        let ray = Ray3f::new(Vector3f::new(0.5, 0.5, -2.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
        for _ in 0..500 {
            let mi = medium.sample_interaction(&ray, rng.next_f32(), 0, true);
            assert!(mi.is_valid());
            assert!((mi.mint() - 2.0).abs() < 1e-5);
            if mi.active() {
                assert!(mi.t() >= 2.0 && mi.t() <= 3.0 + 1e-5);
                assert!((mi.sigma_t() - mi.sigma_s() - mi.sigma_n()).abs().max_component() < 1e-5);
                assert!((mi.albedo()[0] - 0.8).abs() < 1e-6);
            } else {
                assert!((mi.t() - 3.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_ratio_tracking_estimate_matches_transmittance() {
        // Constant density 1.5 inside the box, majorant 1.5 * max = 1.5.
        // Classifying collisions as real with probability sigma_s / sigma_t
        // must reproduce exp(-1.5) survival through the unit box.
        let volume = Arc::new(ConstantVolume::new_scalar(1.5)
            .with_bbox(Some(AABB::new(Vector3f::zeros(), Vector3f::new(1.0, 1.0, 1.0)))));
        let medium: HeterogeneousMedium<1> = HeterogeneousMedium::new(volume, Arc::new(ConstantVolume::new_scalar(1.0)));
        let mut rng = LcgRng::new(77);
        let n = 20000;
        let mut survived = 0;
        for _ in 0..n {
            let mut ray = Ray3f::new(Vector3f::new(0.5, 0.5, 0.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
            loop {
                let mi = medium.sample_interaction(&ray, rng.next_f32(), 0, true);
                if !mi.active() {
                    survived += 1;
                    break;
                }
                if rng.next_f32() < mi.sigma_s()[0] / mi.sigma_t()[0] {
                    break;
                }
                ray.advance_to(mi.t());
            }
        }
        let estimate = survived as Float / n as Float;
        assert!((estimate - (-1.5 as Float).exp()).abs() < 0.015, "estimate = {}", estimate);
    }

    #[test]
    fn test_null_collisions_preserve_transmittance() {
        // Half-density field under a majorant of 2: the null-collision estimator
        // still converges to exp(-1).
        let data = vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0];
        let bbox = AABB::new(Vector3f::zeros(), Vector3f::new(1.0, 1.0, 1.0));
        let volume = Arc::new(GridVolume::from_data(data, (2, 2, 2), 1, bbox).expect("valid grid"));
        let medium: HeterogeneousMedium<1> = HeterogeneousMedium::new(volume, Arc::new(ConstantVolume::new_scalar(1.0)))
            .with_base(MediumBase::new(Some("half".to_string()), "HeterogeneousMedium")
                .with_sampling_mode(MediumEventSamplingMode::Analogue));
        assert_eq!(medium.id(), "half");

        let mut rng = LcgRng::new(4242);
        let n = 20000;
        let mut survived = 0;
        // The x = 0 face only touches density-1 voxels.
        for _ in 0..n {
            let mut ray = Ray3f::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
            loop {
                let mi = medium.sample_interaction(&ray, rng.next_f32(), 0, true);
                if !mi.active() {
                    survived += 1;
                    break;
                }
                assert!((mi.sigma_s()[0] - 1.0).abs() < 1e-5);
                assert!((mi.sigma_n()[0] - 1.0).abs() < 1e-5);
                if rng.next_f32() < mi.sigma_s()[0] / mi.sigma_t()[0] {
                    break;
                }
                ray.advance_to(mi.t());
            }
        }
        let estimate = survived as Float / n as Float;
        assert!((estimate - (-1.0 as Float).exp()).abs() < 0.015, "estimate = {}", estimate);

        let mi = medium.sample_interaction(&Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None), 0.999, 0, true);
        let (tr, pdf) = medium.transmittance_eval_pdf(&mi, &SurfaceIntersection::at_distance(0.5), true);
        assert!((tr[0] - (-1.0 as Float).exp()).abs() < 1e-5);
        assert!((pdf[0] - tr[0]).abs() < 1e-6);
    }

    #[test]
    fn test_event_probabilities_reproduce_transmittance_in_every_mode() {
        // Same half-density field as above, but the real/null choice is drawn
        // from get_interaction_probabilities with no emission.
        let data = vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0];
        let bbox = AABB::new(Vector3f::zeros(), Vector3f::new(1.0, 1.0, 1.0));
        let volume: Arc<dyn Volume> = Arc::new(GridVolume::from_data(data, (2, 2, 2), 1, bbox).expect("valid grid"));
        let radiance = RGBSpectrum::zero();
        let throughput = RGBSpectrum::one();

        for (seed, mode) in [MediumEventSamplingMode::Analogue,
                             MediumEventSamplingMode::Maximum,
                             MediumEventSamplingMode::Mean].into_iter().enumerate() {
            let medium: HeterogeneousMedium<3> = HeterogeneousMedium::new(volume.clone(), Arc::new(ConstantVolume::new_scalar(1.0)))
                .with_base(MediumBase::new(None, "HeterogeneousMedium").with_sampling_mode(mode));
            let mut rng = LcgRng::new(31 + seed as u64);
            let n = 20000;
            let mut survived = 0;
            for _ in 0..n {
                let mut ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
                loop {
                    let mi = medium.sample_interaction(&ray, rng.next_f32(), 0, true);
                    if !mi.active() {
                        survived += 1;
                        break;
                    }
                    let (_, (prob_s, prob_n)) = medium.get_interaction_probabilities(&radiance, &mi, &throughput);
                    assert!((prob_s[0] + prob_n[0] - 2.0).abs() < 1e-5);
                    if rng.next_f32() < prob_s[0] / (prob_s[0] + prob_n[0]) {
                        break;
                    }
                    ray.advance_to(mi.t());
                }
            }
            let estimate = survived as Float / n as Float;
            assert!((estimate - (-1.0 as Float).exp()).abs() < 0.015, "{}: estimate = {}", mode, estimate);
        }
    }

    #[test]
    fn test_empty_space_has_no_real_event_probability() {
        let medium = ramp_medium();
        // The grid corner at the origin has zero density.
        let mi = MediumInteraction::new(0.0, Vector3f::zeros(), Vector3f::zeros(), 0.0, true);
        let (sigma_s, sigma_n, sigma_t) = medium.get_scattering_coefficients(&mi, true);
        let mi = mi.with_coefficients(sigma_s, sigma_n, sigma_t);
        let ((weight_s, _), (prob_s, prob_n)) =
            medium.get_interaction_probabilities(&RGBSpectrum::zero(), &mi, &RGBSpectrum::one());
        assert!(prob_s.is_black());
        assert!((prob_n[0] - 8.0).abs() < 1e-5);
        assert!(weight_s.is_black());
    }

    #[test]
    fn test_mono_spectrum_from_rgb_density() {
        let volume = Arc::new(ConstantVolume::new_rgb(Vector3f::new(1.0, 2.0, 3.0)));
        let medium: HeterogeneousMedium<1> = HeterogeneousMedium::new(volume, Arc::new(ConstantVolume::new_scalar(1.0)));
        let probe = MediumInteraction::new(0.0, Vector3f::zeros(), Vector3f::zeros(), 0.0, true);
        let (sigma_s, sigma_n, sigma_t) = medium.get_scattering_coefficients(&probe, true);
        assert!((sigma_s[0] - 2.0).abs() < 1e-5);
        assert!((sigma_n[0] - 1.0).abs() < 1e-5);
        assert_eq!(sigma_t, MonoSpectrum::splat(3.0));
    }
}
