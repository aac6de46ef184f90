// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::math::constants::{Float, Vector2f, Vector3f};

pub struct PhaseFunctionSample {
    pub wo: Vector3f,
    pub pdf: Float,
}

/// Angular scattering distribution used after a real collision. Directions
/// follow the convention `wi = -ray.dir()`, so forward scattering means
/// `wo = -wi`.
pub trait PhaseFunction: ComputationNode + Send + Sync {
    fn eval(&self, wi: &Vector3f, wo: &Vector3f) -> Float;
    fn sample(&self, wi: &Vector3f, u: &Vector2f) -> PhaseFunctionSample;

    /// Every phase function here is importance-sampled exactly.
    fn pdf(&self, wi: &Vector3f, wo: &Vector3f) -> Float {
        self.eval(wi, wo)
    }
}
