//! Matrix helpers shared by the transform, camera and picking systems.
//!
//! All matrices are `glam::Mat4` (column-major in memory). The rendering
//! side expects row-major arrays, see [`to_row_major`].

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Tolerance used when comparing matrices that went through an inversion.
pub const MATRIX_EPSILON: f32 = 1e-4;

/// Flatten `m` into 16 numbers, row by row.
pub fn to_row_major(m: &Mat4) -> [f32; 16] {
    m.transpose().to_cols_array()
}

/// Scale the x and y axes by `factor`, leaving z and w alone.
pub fn planar_scale(factor: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(factor, factor, 1.0))
}

/// `T(location) * R(rotation) * S(scale)` for a point in the xy plane.
pub fn affine_2d(location: Vec2, rotation: f32, scale: Vec2) -> Mat4 {
    Mat4::from_translation(location.extend(0.0))
        * Mat4::from_rotation_z(rotation)
        * Mat4::from_scale(scale.extend(1.0))
}

/// Transform a direction (w = 0) so translations do not apply.
pub fn transform_vector_2d(m: &Mat4, v: Vec2) -> Vec2 {
    let out = *m * Vec4::new(v.x, v.y, 0.0, 0.0);
    Vec2::new(out.x, out.y)
}

/// True when `m` cannot be inverted into finite values.
pub fn is_singular(m: &Mat4) -> bool {
    let det = m.determinant();
    det == 0.0 || !det.is_finite()
}

/// Component-wise comparison within `epsilon`.
pub fn mat4_approx_eq(a: &Mat4, b: &Mat4, epsilon: f32) -> bool {
    a.abs_diff_eq(*b, epsilon)
}
