// Copyright @yucwang 2026

use crate::core::volume::Volume;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

/// The same value at every point, optionally restricted to a bounding box
/// that heterogeneous media use as their support.
pub struct ConstantVolume {
    value: Vector3f,
    channels: usize,
    bbox: Option<AABB>,
}

impl ConstantVolume {
    pub fn new_scalar(value: Float) -> Self {
        Self::from_parts(Vector3f::new(value, value, value), 1)
    }

    pub fn new_rgb(value: Vector3f) -> Self {
        Self::from_parts(value, 3)
    }

    /// Single channel when all components agree, RGB otherwise.
    pub fn from_value(value: Vector3f) -> Self {
        if value.x == value.y && value.y == value.z {
            Self::new_scalar(value.x)
        } else {
            Self::new_rgb(value)
        }
    }

    fn from_parts(value: Vector3f, channels: usize) -> Self {
        Self { value, channels, bbox: None }
    }

    pub fn with_bbox(mut self, bbox: Option<AABB>) -> Self {
        self.bbox = bbox;
        self
    }
}

impl Volume for ConstantVolume {
    fn bbox(&self) -> Option<AABB> {
        self.bbox
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn eval(&self, _p_world: Vector3f) -> Vector3f {
        self.value
    }

    fn max(&self) -> Float {
        self.value.max()
    }
}
