// Copyright @yucwang 2026

use super::constants::{Float, Vector3f};

use nalgebra::SVector;
use std::ops;

/// A fixed-size spectral sample. One channel in monochrome mode, three in RGB
/// mode, `N` sampled wavelengths in spectral mode. All arithmetic is
/// componentwise.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spectrum<const N: usize> {
    values: SVector<Float, N>
}

pub type MonoSpectrum = Spectrum<1>;
pub type RGBSpectrum = Spectrum<3>;
pub type SampledSpectrum = Spectrum<4>;

/// Media never carry polarization state.
pub type UnpolarizedSpectrum<const N: usize> = Spectrum<N>;

impl<const N: usize> Default for Spectrum<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Spectrum<N> {
    pub fn new(values: [Float; N]) -> Self {
        Self { values: SVector::from(values) }
    }

    pub fn zero() -> Self {
        Self::splat(0.0)
    }

    pub fn one() -> Self {
        Self::splat(1.0)
    }

    pub fn splat(value: Float) -> Self {
        Self { values: SVector::from_element(value) }
    }

    /// Converts an RGB triple coming out of a `Volume`. Non-RGB layouts get
    /// the channel average on every component.
    pub fn from_rgb(rgb: Vector3f) -> Self {
        if N == 3 {
            let mut out = Self::zero();
            for idx in 0..3 {
                out.values[idx] = rgb[idx];
            }
            out
        } else {
            Self::splat((rgb.x + rgb.y + rgb.z) / 3.0)
        }
    }

    pub fn channels(&self) -> usize {
        N
    }

    pub fn map<F: FnMut(Float) -> Float>(&self, f: F) -> Self {
        Self { values: self.values.map(f) }
    }

    pub fn zip_map<F: FnMut(Float, Float) -> Float>(&self, other: &Self, f: F) -> Self {
        Self { values: self.values.zip_map(&other.values, f) }
    }

    pub fn abs(&self) -> Self {
        self.map(|v| v.abs())
    }

    pub fn exp(&self) -> Self {
        self.map(|v| v.exp())
    }

    /// Componentwise maximum against another spectrum.
    pub fn maximum(&self, other: &Self) -> Self {
        self.zip_map(other, |a, b| a.max(b))
    }

    pub fn maximum_scalar(&self, value: Float) -> Self {
        self.map(|v| v.max(value))
    }

    /// Horizontal maximum over all channels.
    pub fn max_component(&self) -> Float {
        self.values.iter().fold(Float::NEG_INFINITY, |acc, &v| acc.max(v))
    }

    pub fn min_component(&self) -> Float {
        self.values.iter().fold(Float::INFINITY, |acc, &v| acc.min(v))
    }

    /// Horizontal arithmetic mean over all channels.
    pub fn mean(&self) -> Float {
        self.values.sum() / (N as Float)
    }

    pub fn is_black(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    pub fn has_nan(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    pub fn is_non_negative(&self) -> bool {
        self.values.iter().all(|&v| v >= 0.0)
    }

    /// True when the channels do not all hold the same value.
    pub fn is_spectrally_varying(&self) -> bool {
        self.max_component() != self.min_component()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Float> {
        self.values.iter()
    }
}

impl<const N: usize> ops::Index<usize> for Spectrum<N> {
    type Output = Float;

    fn index(&self, index: usize) -> &Float {
        &self.values[index]
    }
}

impl<const N: usize> ops::IndexMut<usize> for Spectrum<N> {
    fn index_mut(&mut self, index: usize) -> &mut Float {
        &mut self.values[index]
    }
}

impl<const N: usize> ops::Add for Spectrum<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { values: self.values + rhs.values }
    }
}

impl<const N: usize> ops::AddAssign for Spectrum<N> {
    fn add_assign(&mut self, rhs: Self) {
        self.values += rhs.values;
    }
}

impl<const N: usize> ops::Sub for Spectrum<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { values: self.values - rhs.values }
    }
}

impl<const N: usize> ops::Neg for Spectrum<N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self { values: -self.values }
    }
}

impl<const N: usize> ops::Mul for Spectrum<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self { values: self.values.component_mul(&rhs.values) }
    }
}

impl<const N: usize> ops::Mul<Float> for Spectrum<N> {
    type Output = Self;

    fn mul(self, rhs: Float) -> Self {
        Self { values: self.values * rhs }
    }
}

impl<const N: usize> ops::Mul<Spectrum<N>> for Float {
    type Output = Spectrum<N>;

    fn mul(self, rhs: Spectrum<N>) -> Spectrum<N> {
        rhs * self
    }
}

impl<const N: usize> ops::MulAssign<Float> for Spectrum<N> {
    fn mul_assign(&mut self, rhs: Float) {
        self.values *= rhs;
    }
}

impl<const N: usize> ops::Add<Float> for Spectrum<N> {
    type Output = Self;

    fn add(self, rhs: Float) -> Self {
        self.map(|v| v + rhs)
    }
}

impl<const N: usize> ops::Div<Float> for Spectrum<N> {
    type Output = Self;

    fn div(self, rhs: Float) -> Self {
        Self { values: self.values / rhs }
    }
}
