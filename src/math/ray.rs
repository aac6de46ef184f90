// Copyright @yucwang 2026

use super::constants::{Float, Vector3f};

/// Ray with a valid parametric segment `[min_t, max_t]`. Delta tracking walks
/// along one ray by moving `min_t` past each null collision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(std::f32::MAX)}
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    /// Restarts the segment at `t`. Returns false, leaving the ray untouched,
    /// when `t` lies outside the current segment.
    pub fn advance_to(&mut self, t: Float) -> bool {
        if t < self.min_t || t > self.max_t {
            false
        } else {
            self.min_t = t;
            true
        }
    }

    pub fn segment_length(&self) -> Float {
        (self.max_t - self.min_t).max(0.0)
    }
}
