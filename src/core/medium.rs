// Copyright @yucwang 2026

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::computation_node::{ComputationNode, generate_node_id};
use crate::core::emitter::MediumEmitter;
use crate::core::interaction::{MediumInteraction, SurfaceIntersection};
use crate::core::medium_loader::MediumLoadError;
use crate::core::phase::PhaseFunction;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::UnpolarizedSpectrum;
use crate::phase::isotropic::IsotropicPhaseFunction;

/// Heuristic used to split a candidate collision into real and null events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediumEventSamplingMode {
    /// Per-channel probabilities, no reduction.
    #[default]
    Analogue,
    /// Channels reduced with `max`, so all of them branch together.
    Maximum,
    /// Channels reduced with the arithmetic mean.
    Mean,
}

impl FromStr for MediumEventSamplingMode {
    type Err = MediumLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analogue" | "analog" => Ok(MediumEventSamplingMode::Analogue),
            "maximum" | "max" => Ok(MediumEventSamplingMode::Maximum),
            "mean" => Ok(MediumEventSamplingMode::Mean),
            other => Err(MediumLoadError::Parse(format!("unknown medium sampling mode: {}", other))),
        }
    }
}

impl fmt::Display for MediumEventSamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediumEventSamplingMode::Analogue => "analogue",
            MediumEventSamplingMode::Maximum => "maximum",
            MediumEventSamplingMode::Mean => "mean",
        };
        write!(f, "{}", name)
    }
}

/// Clips a ray against the spatial support of a medium.
pub trait BoundaryIntersector {
    /// Returns `(hit, t_near, t_far)`. The distances are those of the infinite
    /// line and may lie outside the ray's `[min_t, max_t]`.
    fn intersect_aabb(&self, ray: &Ray3f) -> (bool, Float, Float);
}

/// Upper bound on extinction, required for delta tracking to stay unbiased.
pub trait MajorantProvider<const N: usize> {
    fn get_majorant(&self, mi: &MediumInteraction<N>, active: bool) -> UnpolarizedSpectrum<N>;
}

/// Local coefficients at an interaction point.
pub trait CoefficientEvaluator<const N: usize> {
    /// Returns `(sigma_s, sigma_n, sigma_t)` with `sigma_t = sigma_s + sigma_n`.
    fn get_scattering_coefficients(&self,
                                   mi: &MediumInteraction<N>,
                                   active: bool) -> (UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>);

    fn get_albedo(&self, _mi: &MediumInteraction<N>, _active: bool) -> UnpolarizedSpectrum<N> {
        UnpolarizedSpectrum::one()
    }
}

/// Construction-time state shared by every medium.
pub struct MediumBase<const N: usize> {
    id: String,
    phase_function: Arc<dyn PhaseFunction>,
    emitter: Option<Arc<dyn MediumEmitter<N>>>,
    sample_emitters: bool,
    is_homogeneous: bool,
    has_spectral_extinction: bool,
    sampling_mode: MediumEventSamplingMode,
}

impl<const N: usize> MediumBase<N> {
    pub fn new(id: Option<String>, type_name: &str) -> Self {
        Self {
            id: id.unwrap_or_else(|| generate_node_id(type_name)),
            phase_function: Arc::new(IsotropicPhaseFunction::new(None)),
            emitter: None,
            sample_emitters: true,
            is_homogeneous: false,
            has_spectral_extinction: true,
            sampling_mode: MediumEventSamplingMode::default(),
        }
    }

    pub fn with_phase_function(mut self, phase_function: Arc<dyn PhaseFunction>) -> Self {
        self.phase_function = phase_function;
        self
    }

    pub fn with_emitter(mut self, emitter: Option<Arc<dyn MediumEmitter<N>>>) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn with_sample_emitters(mut self, sample_emitters: bool) -> Self {
        self.sample_emitters = sample_emitters;
        self
    }

    pub fn with_homogeneous(mut self, is_homogeneous: bool) -> Self {
        self.is_homogeneous = is_homogeneous;
        self
    }

    pub fn with_spectral_extinction(mut self, has_spectral_extinction: bool) -> Self {
        self.has_spectral_extinction = has_spectral_extinction;
        self
    }

    pub fn with_sampling_mode(mut self, sampling_mode: MediumEventSamplingMode) -> Self {
        self.sampling_mode = sampling_mode;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: String) {
        self.id = id;
    }

    pub fn phase_function(&self) -> &dyn PhaseFunction {
        self.phase_function.as_ref()
    }

    pub fn emitter(&self) -> Option<&dyn MediumEmitter<N>> {
        self.emitter.as_deref()
    }

    pub fn set_emitter(&mut self, emitter: Option<Arc<dyn MediumEmitter<N>>>) {
        self.emitter = emitter;
    }

    pub fn sample_emitters(&self) -> bool {
        self.sample_emitters
    }

    pub fn is_homogeneous(&self) -> bool {
        self.is_homogeneous
    }

    pub fn has_spectral_extinction(&self) -> bool {
        self.has_spectral_extinction
    }

    pub fn sampling_mode(&self) -> MediumEventSamplingMode {
        self.sampling_mode
    }

    pub fn describe(&self) -> String {
        format!("id={}, phase={}, emitter={}, sample_emitters={}, sampling_mode={}",
                self.id,
                self.phase_function.id(),
                self.emitter.as_ref().map(|e| e.id()).unwrap_or("none"),
                self.sample_emitters,
                self.sampling_mode)
    }
}

/// A participating medium. Implementors supply the support test, the
/// majorant and the local coefficients; free-flight sampling, transmittance
/// evaluation, collision classification and emission come from the provided
/// methods.
pub trait Medium<const N: usize>:
    BoundaryIntersector + MajorantProvider<N> + CoefficientEvaluator<N> + ComputationNode + Send + Sync
{
    fn base(&self) -> &MediumBase<N>;
    fn base_mut(&mut self) -> &mut MediumBase<N>;

    /// Samples a tentative free-flight distance with delta tracking.
    ///
    /// `sample` is uniform in `[0, 1)`. `channel` selects which majorant
    /// component drives the exponential step when `N > 1`. The returned
    /// interaction is inactive if the ray misses the support (`t = inf`) or
    /// leaves it before colliding (`t` = exit distance).
    fn sample_interaction(&self,
                          ray: &Ray3f,
                          sample: Float,
                          channel: u32,
                          active: bool) -> MediumInteraction<N> {
        if !active {
            return MediumInteraction::invalid();
        }

        let (hit, t_near, t_far) = self.intersect_aabb(ray);
        if !hit || !(t_near.is_finite() || t_far.is_finite()) {
            return MediumInteraction::invalid();
        }

        let mint = t_near.max(ray.min_t).max(0.0);
        let maxt = t_far.min(ray.max_t);
        if !(maxt >= mint) {
            return MediumInteraction::invalid();
        }

        let wi = -ray.dir();
        let entry = MediumInteraction::new(mint, ray.at(mint), wi, mint, false);
        let combined_extinction = self.get_majorant(&entry, true);
        let m = combined_extinction[(channel as usize).min(N - 1)];

        // An unbounded segment has no exit point; keep the entry point there.
        let exit = if maxt.is_finite() { ray.at(maxt) } else { entry.p() };
        let escaped = MediumInteraction::new(maxt, exit, wi, mint, false)
            .with_combined_extinction(combined_extinction);
        if !(m > 0.0) {
            return escaped;
        }

        let sampled_t = mint - (1.0 - sample).ln() / m;
        if !(sampled_t.is_finite() && sampled_t <= maxt) {
            return escaped;
        }

        let mi = MediumInteraction::new(sampled_t, ray.at(sampled_t), wi, mint, true)
            .with_combined_extinction(combined_extinction);
        let (sigma_s, sigma_n, sigma_t) = self.get_scattering_coefficients(&mi, true);
        let albedo = self.get_albedo(&mi, true);
        mi.with_coefficients(sigma_s, sigma_n, sigma_t).with_albedo(albedo)
    }

    /// Transmittance between the segment start and `min(mi.t, si.t)`, and the
    /// density of the sampled outcome: a collision at `mi.t` if it happened
    /// before the surface, survival up to the surface otherwise.
    fn transmittance_eval_pdf(&self,
                              mi: &MediumInteraction<N>,
                              si: &SurfaceIntersection,
                              active: bool) -> (UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>) {
        if !active {
            return (UnpolarizedSpectrum::one(), UnpolarizedSpectrum::one());
        }

        let t = (mi.t().min(si.t()) - mi.mint()).max(0.0);
        let tr = mi.combined_extinction().map(|m| if m > 0.0 { (-m * t).exp() } else { 1.0 });
        let pdf = if mi.active() && mi.t() <= si.t() {
            tr * mi.sigma_t()
        } else {
            tr
        };

        (tr, pdf)
    }

    /// Returns `((weight_s, weight_n), (prob_s, prob_n))`.
    ///
    /// The probabilities are unnormalized; the caller picks the real event with
    /// probability `prob_s / (prob_s + prob_n)`. Each weight is the reciprocal
    /// of that normalized probability, or zero when the event cannot be picked.
    fn get_interaction_probabilities(&self,
                                     radiance: &UnpolarizedSpectrum<N>,
                                     mi: &MediumInteraction<N>,
                                     throughput: &UnpolarizedSpectrum<N>)
        -> ((UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>), (UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>)) {
        let (prob_s, prob_n) = match self.base().sampling_mode() {
            MediumEventSamplingMode::Analogue => medium_probabilities_analog(radiance, mi),
            MediumEventSamplingMode::Maximum => medium_probabilities_max(radiance, mi, throughput),
            MediumEventSamplingMode::Mean => medium_probabilities_mean(radiance, mi, throughput),
        };

        let total = prob_s + prob_n;
        let weight_s = total.zip_map(&prob_s, |c, p| if p > 0.0 { c / p } else { 0.0 });
        let weight_n = total.zip_map(&prob_n, |c, p| if p > 0.0 { c / p } else { 0.0 });

        ((weight_s, weight_n), (prob_s, prob_n))
    }

    /// Emitted radiance at an active interaction, zero otherwise.
    fn get_radiance(&self, mi: &MediumInteraction<N>, active: bool) -> UnpolarizedSpectrum<N> {
        if !active || !mi.active() {
            return UnpolarizedSpectrum::zero();
        }
        match self.emitter() {
            Some(emitter) => emitter.eval(mi, true),
            None => UnpolarizedSpectrum::zero(),
        }
    }

    fn phase_function(&self) -> &dyn PhaseFunction {
        self.base().phase_function()
    }

    fn emitter(&self) -> Option<&dyn MediumEmitter<N>> {
        self.base().emitter()
    }

    /// Must not be called while sampling calls are in flight.
    fn set_emitter(&mut self, emitter: Option<Arc<dyn MediumEmitter<N>>>) {
        self.base_mut().set_emitter(emitter);
    }

    fn use_emitter_sampling(&self) -> bool {
        self.base().sample_emitters()
    }

    fn is_homogeneous(&self) -> bool {
        self.base().is_homogeneous()
    }

    fn is_emitter(&self) -> bool {
        self.base().emitter().is_some()
    }

    fn has_spectral_extinction(&self) -> bool {
        self.base().has_spectral_extinction()
    }

    fn sampling_mode(&self) -> MediumEventSamplingMode {
        self.base().sampling_mode()
    }
}

// The real-event term is the real-collision rate `sigma_s`, so that with no
// radiance `prob_s + prob_n` equals the total rate and the analogue choice is
// plain delta tracking.
pub fn medium_probabilities_analog<const N: usize>(radiance: &UnpolarizedSpectrum<N>,
                                                   mi: &MediumInteraction<N>)
    -> (UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>) {
    let prob_s = mi.sigma_s();
    let prob_n = mi.sigma_n() + radiance.maximum(&UnpolarizedSpectrum::splat(radiance.abs().mean()));
    (prob_s, prob_n)
}

pub fn medium_probabilities_max<const N: usize>(radiance: &UnpolarizedSpectrum<N>,
                                                mi: &MediumInteraction<N>,
                                                throughput: &UnpolarizedSpectrum<N>)
    -> (UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>) {
    let prob_s = (mi.sigma_s() * *throughput).abs().max_component();
    let prob_n = (mi.sigma_n() * *throughput).abs().max_component()
        + (*radiance * throughput.maximum_scalar(1.0)).abs().max_component();
    (UnpolarizedSpectrum::splat(prob_s), UnpolarizedSpectrum::splat(prob_n))
}

pub fn medium_probabilities_mean<const N: usize>(radiance: &UnpolarizedSpectrum<N>,
                                                 mi: &MediumInteraction<N>,
                                                 throughput: &UnpolarizedSpectrum<N>)
    -> (UnpolarizedSpectrum<N>, UnpolarizedSpectrum<N>) {
    let prob_s = (mi.sigma_s() * *throughput).abs().mean();
    let prob_n = (mi.sigma_n() * *throughput).abs().mean()
        + (*radiance * (*throughput * 0.5 + 0.5)).abs().mean();
    (UnpolarizedSpectrum::splat(prob_s), UnpolarizedSpectrum::splat(prob_n))
}
