// Copyright @yucwang 2026

use crate::core::computation_node::{ComputationNode, generate_node_id};
use crate::core::phase::{PhaseFunction, PhaseFunctionSample};
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::warp::{sample_uniform_sphere, sample_uniform_sphere_pdf};

pub struct IsotropicPhaseFunction {
    id: String,
}

impl IsotropicPhaseFunction {
    pub fn new(id: Option<String>) -> Self {
        Self { id: id.unwrap_or_else(|| generate_node_id("IsotropicPhaseFunction")) }
    }
}

impl ComputationNode for IsotropicPhaseFunction {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_string(&self) -> String {
        String::from("IsotropicPhaseFunction")
    }
}

impl PhaseFunction for IsotropicPhaseFunction {
    fn eval(&self, _wi: &Vector3f, _wo: &Vector3f) -> Float {
        sample_uniform_sphere_pdf()
    }

    fn sample(&self, _wi: &Vector3f, u: &Vector2f) -> PhaseFunctionSample {
        PhaseFunctionSample { wo: sample_uniform_sphere(u), pdf: sample_uniform_sphere_pdf() }
    }
}
