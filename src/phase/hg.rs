// Copyright @yucwang 2026

use crate::core::computation_node::{ComputationNode, generate_node_id};
use crate::core::phase::{PhaseFunction, PhaseFunctionSample};
use crate::math::constants::{Float, Vector2f, Vector3f, INV_FOUR_PI, PI};
use crate::math::frame::Frame;

/// Henyey-Greenstein lobe. `g > 0` favours forward scattering, that is
/// `wo` close to `-wi`.
pub struct HGPhaseFunction {
    id: String,
    g: Float,
}

impl HGPhaseFunction {
    pub fn new(g: Float, id: Option<String>) -> Self {
        let clamped = g.clamp(-0.999, 0.999);
        if clamped != g {
            log::warn!("HG asymmetry {} clamped to {}", g, clamped);
        }
        Self { id: id.unwrap_or_else(|| generate_node_id("HGPhaseFunction")), g: clamped }
    }

    pub fn g(&self) -> Float {
        self.g
    }
}

/// `cos_theta` is measured between `wi` and `wo`, both pointing away from the
/// scattering point.
fn phase_hg(cos_theta: Float, g: Float) -> Float {
    let denom = 1.0 + g * g + 2.0 * g * cos_theta;
    INV_FOUR_PI * (1.0 - g * g) / (denom * denom.sqrt())
}

impl ComputationNode for HGPhaseFunction {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_string(&self) -> String {
        format!("HGPhaseFunction [g={}]", self.g)
    }
}

impl PhaseFunction for HGPhaseFunction {
    fn eval(&self, wi: &Vector3f, wo: &Vector3f) -> Float {
        phase_hg(wi.dot(wo), self.g)
    }

    fn sample(&self, wi: &Vector3f, u: &Vector2f) -> PhaseFunctionSample {
        let g = self.g;
        let cos_theta = if g.abs() < 1e-3 {
            1.0 - 2.0 * u.x
        } else {
            let sqr_term = (1.0 - g * g) / (1.0 + g - 2.0 * g * u.x);
            -(1.0 + g * g - sqr_term * sqr_term) / (2.0 * g)
        };
        let cos_theta = cos_theta.clamp(-1.0, 1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let (sin_phi, cos_phi) = (2.0 * PI * u.y).sin_cos();

        let local = Vector3f::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta);
        let wo = Frame::from_z(*wi).from_local(local);
        PhaseFunctionSample { wo, pdf: phase_hg(cos_theta, g) }
    }
}
