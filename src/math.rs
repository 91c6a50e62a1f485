// src/math.rs
// Guarded vector helpers shared by every tangent component
// Exists to keep degenerate-input handling in one place
// RELEVANT FILES:src/tangent/per_face.rs,src/tangent/direct.rs,src/quat.rs

use glam::Vec3;

/// Length below which a vector is treated as degenerate.
pub const LENGTH_EPS: f32 = 1e-20;

/// UV determinant magnitude below which a face is treated as degenerate.
pub const UV_DET_EPS: f32 = 1e-12;

/// Normalize `v`, substituting `fallback` for zero-length or non-finite
/// input. Callers must pick a fallback that keeps their basis consistent.
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq > LENGTH_EPS && len_sq.is_finite() {
        v / len_sq.sqrt()
    } else {
        fallback
    }
}

/// A stable unit vector orthogonal to `n`, chosen by crossing against the
/// axis `n` leans on least. Returns +X when `n` itself is degenerate.
pub fn orthonormal_to(n: Vec3) -> Vec3 {
    let axis = if n.y.abs() > 0.9 { Vec3::X } else { Vec3::Y };
    normalize_or(axis.cross(n), Vec3::X)
}

/// Project `t` onto the plane orthogonal to unit `n`. Not normalized; the
/// result may be near-zero when `t` is parallel to `n`.
pub fn gram_schmidt(t: Vec3, n: Vec3) -> Vec3 {
    t - n * t.dot(n)
}
