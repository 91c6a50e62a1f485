// src/vertex.rs
// Interleaved plain-old-data vertex layouts for the mesh sink
// RELEVANT FILES:src/mesh.rs,src/pipeline.rs

use bytemuck::{Pod, Zeroable};

use crate::mesh::MeshBuffers;

/// Full tangent-frame vertex for sinks that want explicit bitangents.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct TbnVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
    /// Tangent xyz plus handedness sign in w.
    pub tangent: [f32; 4],
    pub bitangent: [f32; 3],
}

/// Compact vertex carrying the whole frame as a packed quaternion.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct QuatVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
    pub tbn_quat: [f32; 4],
}

/// Interleave the generated buffers into [`TbnVertex`] records. Call after
/// a generation pass; attribute arrays must all have vertex coverage.
pub fn interleave_tbn(mesh: &MeshBuffers) -> Vec<TbnVertex> {
    let count = mesh.vertex_count();
    debug_assert_eq!(mesh.tangents.len(), count);
    debug_assert_eq!(mesh.bitangents.len(), count);

    (0..count)
        .map(|i| TbnVertex {
            position: mesh.positions[i],
            uv: mesh.uvs.get(i).copied().unwrap_or([0.0; 2]),
            normal: mesh.normals.get(i).copied().unwrap_or([0.0; 3]),
            tangent: mesh.tangents[i],
            bitangent: mesh.bitangents[i],
        })
        .collect()
}

/// Interleave the generated buffers into [`QuatVertex`] records. Requires
/// a pass run with quaternion output enabled.
pub fn interleave_quat(mesh: &MeshBuffers) -> Vec<QuatVertex> {
    let count = mesh.vertex_count();
    debug_assert_eq!(mesh.tbn_quats.len(), count);

    (0..count)
        .map(|i| QuatVertex {
            position: mesh.positions[i],
            uv: mesh.uvs.get(i).copied().unwrap_or([0.0; 2]),
            normal: mesh.normals.get(i).copied().unwrap_or([0.0; 3]),
            tbn_quat: mesh.tbn_quats[i],
        })
        .collect()
}
