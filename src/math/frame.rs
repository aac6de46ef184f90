// Copyright @yucwang 2026

use crate::math::constants::{ Vector3f };

/// Orthonormal basis used to express phase function samples around a
/// propagation direction.
pub struct Frame {
    x: Vector3f,
    y: Vector3f,
    z: Vector3f
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            x: Vector3f::new(1.0, 0.0, 0.0),
            y: Vector3f::new(0.0, 1.0, 0.0),
            z: Vector3f::new(0.0, 0.0, 1.0)
        }
    }
}

impl Frame {
    // Duff et al. 2017, branchless orthonormal basis.
    pub fn from_z(n: Vector3f) -> Frame {
        let sign = 1.0f32.copysign(n.z);
        let a = -1.0 / (sign + n.z);
        let b = n.x * n.y * a;
        Frame {
            x: Vector3f::new(1.0 + sign * n.x * n.x * a, sign * b, -sign * n.x),
            y: Vector3f::new(b, sign + n.y * n.y * a, -n.y),
            z: n
        }
    }

    pub fn to_local(&self, v: Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.x), v.dot(&self.y), v.dot(&self.z))
    }

    pub fn from_local(&self, v: Vector3f) -> Vector3f {
        v.x * self.x + v.y * self.y + v.z * self.z
    }
}
