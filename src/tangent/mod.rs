// src/tangent/mod.rs
// Tangent-generation module hub: mode selection and the shared bitangent pass
// RELEVANT FILES:src/tangent/direct.rs,src/tangent/per_face.rs,src/pipeline.rs

mod direct;
mod per_face;

pub use direct::generate_direct_tangents;
pub use per_face::{generate_tangent_space, TangentSpaceGeometry};

use glam::Vec3;

use crate::mesh::MeshBuffers;

/// Which algorithm derives the tangent vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TangentAlgorithm {
    /// Use the tangent data already in the buffer, handedness fixed at +1.
    #[default]
    Direct,
    /// Expand to the per-face-vertex layout and run the full per-face solve.
    PerFace,
}

/// Cross-product order used when bitangents are recomputed. The two orders
/// differ by a global sign; `TangentCrossNormal` keeps
/// `dot(cross(t, n), b)` equal in sign to the stored handedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitangentConvention {
    #[default]
    TangentCrossNormal,
    NormalCrossTangent,
}

/// Configuration for one generation pass.
#[derive(Debug, Clone, Copy)]
pub struct TangentOptions {
    pub algorithm: TangentAlgorithm,
    /// Direct mode: recompute the bitangent instead of passing the
    /// imported one through. Per-face mode always recomputes.
    pub recompute_bitangent: bool,
    /// Cross-product order for the per-face bitangent pass.
    pub bitangent_convention: BitangentConvention,
    /// Also pack each tangent frame into a quaternion.
    pub emit_quaternion: bool,
    /// Fixed-point width the quaternion bias is derived from.
    pub storage_bits: u32,
    /// RGBA multiplier applied to vertex colors.
    pub color_tint: [f32; 4],
}

impl Default for TangentOptions {
    fn default() -> Self {
        Self {
            algorithm: TangentAlgorithm::Direct,
            recompute_bitangent: true,
            bitangent_convention: BitangentConvention::TangentCrossNormal,
            emit_quaternion: false,
            storage_bits: 16,
            color_tint: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Rebuild the bitangent array from finished tangents. Tangent values are
/// not reliable until the tangent pass has completed, so this always runs
/// after it. The stored handedness sign participates so that
/// `dot(cross(t, n), b) = sign * |cross(t, n)|^2` holds per entry.
pub fn recompute_bitangents(mesh: &mut MeshBuffers, convention: BitangentConvention) {
    let vertex_count = mesh.vertex_count();
    debug_assert_eq!(mesh.tangents.len(), vertex_count);
    debug_assert_eq!(mesh.normals.len(), vertex_count);

    mesh.bitangents.clear();
    mesh.bitangents.reserve(vertex_count);
    for i in 0..vertex_count {
        let [tx, ty, tz, sign] = mesh.tangents[i];
        let t = Vec3::new(tx, ty, tz);
        let n = Vec3::from(mesh.normals[i]);
        let b = match convention {
            BitangentConvention::TangentCrossNormal => t.cross(n) * sign,
            BitangentConvention::NormalCrossTangent => n.cross(t) * sign,
        };
        mesh.bitangents.push(b.to_array());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitangent_sign_matches_stored_handedness() {
        let mut mesh = MeshBuffers {
            positions: vec![[0.0; 3]; 2],
            normals: vec![[0.0, 0.0, 1.0]; 2],
            tangents: vec![[1.0, 0.0, 0.0, 1.0], [1.0, 0.0, 0.0, -1.0]],
            ..Default::default()
        };
        recompute_bitangents(&mut mesh, BitangentConvention::TangentCrossNormal);

        for i in 0..2 {
            let t = Vec3::from([mesh.tangents[i][0], mesh.tangents[i][1], mesh.tangents[i][2]]);
            let n = Vec3::from(mesh.normals[i]);
            let b = Vec3::from(mesh.bitangents[i]);
            let d = t.cross(n).dot(b);
            assert!(d * mesh.tangents[i][3] > 0.0, "entry {i}: {d}");
        }
    }

    #[test]
    fn conventions_differ_by_global_sign() {
        let mesh = MeshBuffers {
            positions: vec![[0.0; 3]],
            normals: vec![[0.0, 0.0, 1.0]],
            tangents: vec![[1.0, 0.0, 0.0, 1.0]],
            ..Default::default()
        };
        let mut a = mesh.clone();
        let mut b = mesh;
        recompute_bitangents(&mut a, BitangentConvention::TangentCrossNormal);
        recompute_bitangents(&mut b, BitangentConvention::NormalCrossTangent);
        for k in 0..3 {
            assert!((a.bitangents[0][k] + b.bitangents[0][k]).abs() < 1e-6);
        }
    }
}
