// Copyright @yucwang 2026

pub mod const_volume;
pub mod grid_volume;

use crate::math::constants::{Float, Vector3f};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeFilterMode {
    Nearest,
    Trilinear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeWrapMode {
    Repeat,
    Mirror,
    Clamp,
}

fn wrap_coord(value: Float, mode: VolumeWrapMode) -> Float {
    match mode {
        VolumeWrapMode::Clamp => value.clamp(0.0, 1.0),
        VolumeWrapMode::Repeat => {
            let mut v = value - value.floor();
            if v < 0.0 {
                v += 1.0;
            }
            v
        }
        VolumeWrapMode::Mirror => {
            let mut v = value % 2.0;
            if v < 0.0 {
                v += 2.0;
            }
            if v > 1.0 {
                2.0 - v
            } else {
                v
            }
        }
    }
}

fn wrap_index(idx: isize, size: usize, mode: VolumeWrapMode) -> usize {
    let size_i = size as isize;
    match mode {
        VolumeWrapMode::Clamp => idx.clamp(0, size_i - 1) as usize,
        VolumeWrapMode::Repeat => {
            let mut v = idx % size_i;
            if v < 0 {
                v += size_i;
            }
            v as usize
        }
        VolumeWrapMode::Mirror => {
            let mut v = idx % (2 * size_i);
            if v < 0 {
                v += 2 * size_i;
            }
            if v >= size_i {
                (2 * size_i - v - 1) as usize
            } else {
                v as usize
            }
        }
    }
}

/// Maps normalized grid coordinates back into `[0, 1]`.
pub(crate) fn wrap_coord3(value: Vector3f, mode: VolumeWrapMode) -> Vector3f {
    Vector3f::new(
        wrap_coord(value.x, mode),
        wrap_coord(value.y, mode),
        wrap_coord(value.z, mode),
    )
}

pub(crate) fn wrap_index3(idx: (isize, isize, isize), size: (usize, usize, usize), mode: VolumeWrapMode) -> (usize, usize, usize) {
    (
        wrap_index(idx.0, size.0, mode),
        wrap_index(idx.1, size.1, mode),
        wrap_index(idx.2, size.2, mode),
    )
}

impl std::str::FromStr for VolumeFilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(VolumeFilterMode::Nearest),
            "trilinear" => Ok(VolumeFilterMode::Trilinear),
            other => Err(format!("unknown filter mode: {}", other)),
        }
    }
}

impl std::str::FromStr for VolumeWrapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "repeat" => Ok(VolumeWrapMode::Repeat),
            "mirror" => Ok(VolumeWrapMode::Mirror),
            "clamp" => Ok(VolumeWrapMode::Clamp),
            other => Err(format!("unknown wrap mode: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_index_modes() {
        assert_eq!(wrap_index(-1, 4, VolumeWrapMode::Clamp), 0);
        assert_eq!(wrap_index(9, 4, VolumeWrapMode::Clamp), 3);
        assert_eq!(wrap_index(-1, 4, VolumeWrapMode::Repeat), 3);
        assert_eq!(wrap_index(5, 4, VolumeWrapMode::Repeat), 1);
        assert_eq!(wrap_index(4, 4, VolumeWrapMode::Mirror), 3);
        assert_eq!(wrap_index(-1, 4, VolumeWrapMode::Mirror), 0);
        assert_eq!(wrap_index3((-1, 2, 7), (4, 4, 4), VolumeWrapMode::Clamp), (0, 2, 3));
    }

    #[test]
    fn test_wrap_coord_modes() {
        let v = wrap_coord3(Vector3f::new(-0.25, 1.25, 0.5), VolumeWrapMode::Repeat);
        assert!((v - Vector3f::new(0.75, 0.25, 0.5)).norm() < 1e-6);
        let v = wrap_coord3(Vector3f::new(-0.25, 1.25, 0.5), VolumeWrapMode::Mirror);
        assert!((v - Vector3f::new(0.25, 0.75, 0.5)).norm() < 1e-6);
        let v = wrap_coord3(Vector3f::new(-0.25, 1.25, 0.5), VolumeWrapMode::Clamp);
        assert!((v - Vector3f::new(0.0, 1.0, 0.5)).norm() < 1e-6);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("Nearest".parse::<VolumeFilterMode>(), Ok(VolumeFilterMode::Nearest));
        assert_eq!("mirror".parse::<VolumeWrapMode>(), Ok(VolumeWrapMode::Mirror));
        assert!("cubic".parse::<VolumeFilterMode>().is_err());
    }
}
