// src/pipeline.rs
// One-shot generation pass: validate, generate tangents, recompute
// bitangents, pack quaternions, tint colors
// RELEVANT FILES:src/tangent/mod.rs,src/quat.rs,src/validate.rs,src/mesh.rs

use glam::Vec3;

use crate::error::TbnResult;
use crate::math::{gram_schmidt, normalize_or, orthonormal_to, LENGTH_EPS};
use crate::mesh::MeshBuffers;
use crate::quat::{pack_tbn_quat, validate_storage_bits, IDENTITY_QUAT};
use crate::tangent::{
    generate_direct_tangents, generate_tangent_space, recompute_bitangents, TangentAlgorithm,
    TangentOptions,
};
use crate::validate::{validate_attributes, validate_per_face_inputs};

/// Run one full generation pass over `source` and return a freshly owned
/// result buffer. The engine keeps no state across calls; two concurrent
/// passes over different buffers never interfere.
///
/// Direct mode works in the vertex-indexed layout and reuses the source
/// index list. Per-face mode expands to the per-face-vertex layout first,
/// so the output has `3 * face_count` vertices and sequential index
/// triples. A zero-face mesh returns empty buffers, not an error.
pub fn generate_tangent_frames(
    source: &MeshBuffers,
    options: &TangentOptions,
) -> TbnResult<MeshBuffers> {
    validate_attributes(source)?;
    validate_storage_bits(options.storage_bits)?;

    if source.is_empty() {
        log::debug!("zero-face mesh, returning empty buffers");
        return Ok(MeshBuffers::new());
    }

    let mut mesh = match options.algorithm {
        TangentAlgorithm::Direct => {
            let mut mesh = source.clone();
            mesh.tbn_quats.clear();
            generate_direct_tangents(&mut mesh, options.recompute_bitangent);
            mesh
        }
        TangentAlgorithm::PerFace => {
            validate_per_face_inputs(source)?;
            let mut mesh = source.expand_to_corners();
            generate_tangent_space(&mut mesh);
            // imported bitangents do not survive re-expansion; always rebuild
            recompute_bitangents(&mut mesh, options.bitangent_convention);
            mesh
        }
    };

    if options.emit_quaternion {
        pack_frame_quaternions(&mut mesh, options.storage_bits);
    }

    mesh.apply_color_tint(options.color_tint);

    log::debug!(
        "generated tangent frames: {:?}, {} vertices, {} faces, quats: {}",
        options.algorithm,
        mesh.vertex_count(),
        mesh.face_count(),
        options.emit_quaternion
    );
    Ok(mesh)
}

/// Pack every finished tangent frame into `tbn_quats`.
///
/// The packer is handed the orthonormalized right-handed companion frame
/// `(t_hat, sign, n_hat x t_hat, n_hat)`; mirroring enters only through
/// the stored handedness sign, so the matrix stays a proper rotation and
/// the result stays unit length for mirrored charts too. Frames with a
/// near-zero normal or tangent pack as identity.
fn pack_frame_quaternions(mesh: &mut MeshBuffers, storage_bits: u32) {
    let vertex_count = mesh.vertex_count();
    let mut quats = Vec::with_capacity(vertex_count);
    let mut degenerate = 0usize;

    for i in 0..vertex_count {
        let [tx, ty, tz, sign] = mesh.tangents[i];
        let t = Vec3::new(tx, ty, tz);
        let n = Vec3::from(mesh.normals[i]);
        let n_len_sq = n.length_squared();
        let t_len_sq = t.length_squared();
        if !(n_len_sq > LENGTH_EPS && n_len_sq.is_finite())
            || !(t_len_sq > LENGTH_EPS && t_len_sq.is_finite())
        {
            degenerate += 1;
            quats.push(IDENTITY_QUAT);
            continue;
        }
        let n_hat = n / n_len_sq.sqrt();
        let t_hat = normalize_or(gram_schmidt(t, n_hat), orthonormal_to(n_hat));
        let b_hat = n_hat.cross(t_hat);
        quats.push(pack_tbn_quat(
            t_hat.to_array(),
            sign,
            b_hat.to_array(),
            n_hat.to_array(),
            storage_bits,
        ));
    }

    if degenerate > 0 {
        log::warn!("{degenerate} of {vertex_count} frames are degenerate; packed as identity");
    }
    mesh.tbn_quats = quats;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TbnError;
    use crate::tangent::BitangentConvention;

    fn quad() -> MeshBuffers {
        MeshBuffers {
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            normals: vec![[0.0, 0.0, 1.0]; 4],
            uvs: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            tangents: vec![[1.0, 0.0, 0.0, 1.0]; 4],
            indices: vec![0, 1, 2, 2, 3, 0],
            ..Default::default()
        }
    }

    #[test]
    fn direct_mode_reuses_the_index_list() {
        let source = quad();
        let out = generate_tangent_frames(&source, &TangentOptions::default())
            .expect("direct pass");
        assert_eq!(out.indices, source.indices);
        assert_eq!(out.vertex_count(), 4);
    }

    #[test]
    fn per_face_mode_expands_the_layout() {
        let options = TangentOptions {
            algorithm: TangentAlgorithm::PerFace,
            ..Default::default()
        };
        let out = generate_tangent_frames(&quad(), &options).expect("per-face pass");
        assert_eq!(out.vertex_count(), 6);
        assert_eq!(out.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(out.tangents.len(), 6);
        assert_eq!(out.bitangents.len(), 6);
    }

    #[test]
    fn per_face_mode_rejects_missing_uvs() {
        let mut mesh = quad();
        mesh.uvs.clear();
        let options = TangentOptions {
            algorithm: TangentAlgorithm::PerFace,
            ..Default::default()
        };
        assert!(matches!(
            generate_tangent_frames(&mesh, &options),
            Err(TbnError::AttributeMismatch(_))
        ));
    }

    #[test]
    fn invalid_storage_bits_fail_up_front() {
        let options = TangentOptions {
            storage_bits: 64,
            ..Default::default()
        };
        assert!(matches!(
            generate_tangent_frames(&quad(), &options),
            Err(TbnError::InvalidStorageBits(64))
        ));
    }

    #[test]
    fn degenerate_frames_pack_as_identity() {
        let mut mesh = quad();
        mesh.tangents = vec![[0.0; 4]; 4];
        let options = TangentOptions {
            emit_quaternion: true,
            recompute_bitangent: true,
            ..Default::default()
        };
        let out = generate_tangent_frames(&mesh, &options).expect("direct pass");
        assert_eq!(out.tbn_quats, vec![IDENTITY_QUAT; 4]);
    }

    #[test]
    fn convention_flips_per_face_bitangents_globally() {
        let base = TangentOptions {
            algorithm: TangentAlgorithm::PerFace,
            ..Default::default()
        };
        let flipped = TangentOptions {
            bitangent_convention: BitangentConvention::NormalCrossTangent,
            ..base
        };
        let a = generate_tangent_frames(&quad(), &base).expect("pass");
        let b = generate_tangent_frames(&quad(), &flipped).expect("pass");
        for (ba, bb) in a.bitangents.iter().zip(&b.bitangents) {
            for k in 0..3 {
                assert!((ba[k] + bb[k]).abs() < 1e-6);
            }
        }
    }
}
