// Copyright @yucwang 2026

use crate::core::computation_node::{ComputationNode, generate_node_id};
use crate::core::emitter::MediumEmitter;
use crate::core::interaction::MediumInteraction;
use crate::core::volume::Volume;
use crate::math::constants::Float;
use crate::math::spectrum::UnpolarizedSpectrum;
use std::sync::Arc;

/// Emission that fills a medium, read from a volume and scaled.
pub struct VolumeLight<const N: usize> {
    id: String,
    radiance: Arc<dyn Volume>,
    scale: Float,
}

impl<const N: usize> VolumeLight<N> {
    pub fn new(radiance: Arc<dyn Volume>, scale: Float, id: Option<String>) -> Self {
        Self { id: id.unwrap_or_else(|| generate_node_id("VolumeLight")), radiance, scale }
    }
}

impl<const N: usize> ComputationNode for VolumeLight<N> {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_string(&self) -> String {
        format!("VolumeLight [scale={}]", self.scale)
    }
}

impl<const N: usize> MediumEmitter<N> for VolumeLight<N> {
    fn eval(&self, mi: &MediumInteraction<N>, active: bool) -> UnpolarizedSpectrum<N> {
        if !active {
            return UnpolarizedSpectrum::zero();
        }
        UnpolarizedSpectrum::from_rgb(self.radiance.eval(mi.p())) * self.scale
    }
}
