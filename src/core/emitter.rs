// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::interaction::MediumInteraction;
use crate::math::spectrum::UnpolarizedSpectrum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitterFlag(u8);

impl EmitterFlag {
    pub const NONE: Self = Self(0);
    pub const DIRECTION: Self = Self(1 << 0);
    pub const SURFACE: Self = Self(1 << 1);
    pub const DELTA: Self = Self(1 << 2);
    pub const MEDIUM: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for EmitterFlag {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EmitterFlag {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Light source attached to an emissive medium.
pub trait MediumEmitter<const N: usize>: ComputationNode + Send + Sync {
    fn get_flag(&self) -> EmitterFlag {
        EmitterFlag::MEDIUM
    }

    /// Emitted radiance at the interaction point.
    fn eval(&self, mi: &MediumInteraction<N>, active: bool) -> UnpolarizedSpectrum<N>;
}
