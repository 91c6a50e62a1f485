// src/tangent/direct.rs
// Direct tangent mode: trust imported tangent data, handedness fixed at +1
// RELEVANT FILES:src/tangent/mod.rs,src/mesh.rs,src/pipeline.rs

use glam::Vec3;

use crate::mesh::MeshBuffers;

/// Take tangents straight from imported data, forcing the handedness sign
/// to +1 (the upstream coordinate convention supplies no sign of its own).
/// With `recompute_bitangent` the bitangent becomes `cross(normal,
/// tangent)`; otherwise the imported bitangent passes through unchanged,
/// zero-filled where absent. Zero source vectors propagate as zeros; this
/// mode does not correct bad input.
pub fn generate_direct_tangents(mesh: &mut MeshBuffers, recompute_bitangent: bool) {
    let vertex_count = mesh.vertex_count();
    let has_tangents = mesh.tangents.len() == vertex_count;
    let has_bitangents = mesh.bitangents.len() == vertex_count;
    let has_normals = mesh.normals.len() == vertex_count;

    let mut tangents = Vec::with_capacity(vertex_count);
    let mut bitangents = Vec::with_capacity(vertex_count);

    for i in 0..vertex_count {
        let t = if has_tangents {
            let [x, y, z, _] = mesh.tangents[i];
            Vec3::new(x, y, z)
        } else {
            Vec3::ZERO
        };
        tangents.push([t.x, t.y, t.z, 1.0]);

        let b = if recompute_bitangent {
            let n = if has_normals {
                Vec3::from(mesh.normals[i])
            } else {
                Vec3::ZERO
            };
            n.cross(t)
        } else if has_bitangents {
            Vec3::from(mesh.bitangents[i])
        } else {
            Vec3::ZERO
        };
        bitangents.push(b.to_array());
    }

    mesh.tangents = tangents;
    mesh.bitangents = bitangents;
}
