// Copyright @yucwang 2026

use super::constants::{ Vector3f, Matrix4f };

use nalgebra::Vector4;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4f,
    inv_matrix: Matrix4f
}

impl Default for Transform {
    fn default() -> Self {
        Self { matrix: Matrix4f::identity(),
               inv_matrix: Matrix4f::identity() }
    }
}

impl Transform {
    pub fn new(matrix: Matrix4f) -> Self {
        Self { matrix: matrix,
               inv_matrix: matrix.try_inverse().unwrap_or(Matrix4f::identity())}
    }

    /// Scale about the origin, then translate.
    pub fn from_scale_translate(scale: &Vector3f, translate: &Vector3f) -> Self {
        let matrix = Matrix4f::new_translation(translate) * Matrix4f::new_nonuniform_scaling(scale);
        Self::new(matrix)
    }

    pub fn apply_point(&self, p: Vector3f) -> Vector3f {
        Self::project(&self.matrix, p)
    }

    pub fn apply_vector(&self, v: Vector3f) -> Vector3f {
        self.matrix.fixed_slice::<3, 3>(0, 0) * v
    }

    pub fn inv_apply_point(&self, p: Vector3f) -> Vector3f {
        Self::project(&self.inv_matrix, p)
    }

    fn project(matrix: &Matrix4f, p: Vector3f) -> Vector3f {
        let h = matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Vector3f::new(h.x / h.w, h.y / h.w, h.z / h.w)
    }
}
