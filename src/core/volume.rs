// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

/// Spatially varying field sampled by heterogeneous media and volume lights.
/// Single-channel volumes replicate their value into all three components.
pub trait Volume: Send + Sync {
    fn bbox(&self) -> Option<AABB> {
        None
    }
    fn channels(&self) -> usize;
    fn eval(&self, p_world: Vector3f) -> Vector3f;
    /// Largest component value anywhere in the volume. Heterogeneous media use
    /// it as their majorant, so it must bound `eval` from above.
    fn max(&self) -> Float;
}
