// src/mesh.rs
// Structure-of-arrays mesh container for one tangent-generation pass
// Exists to own every attribute buffer between mesh source and mesh sink
// RELEVANT FILES:src/pipeline.rs,src/tangent/per_face.rs,src/validate.rs

/// Vertices per face after triangulation. The whole engine assumes the
/// mesh source has already reduced faces to triangles.
pub const VERTS_PER_FACE: usize = 3;

/// Shared mesh container used by both tangent-generation modes.
///
/// Attribute arrays are indexed per vertex; in the per-face-vertex layout
/// produced by [`MeshBuffers::expand_to_corners`] every triangle owns three
/// consecutive entries and `indices` holds fresh sequential triples.
/// Optional arrays (`normals`, `uvs`, `colors`, ...) are either empty or
/// exactly `vertex_count` entries long; `validate::validate_attributes`
/// checks this before a pass starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 4]>,
    /// xyz tangent plus handedness sign in w.
    pub tangents: Vec<[f32; 4]>,
    pub bitangents: Vec<[f32; 3]>,
    /// Packed tangent-frame quaternions, filled when requested.
    pub tbn_quats: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_capacity),
            normals: Vec::with_capacity(vertex_capacity),
            uvs: Vec::with_capacity(vertex_capacity),
            colors: Vec::with_capacity(vertex_capacity),
            tangents: Vec::with_capacity(vertex_capacity),
            bitangents: Vec::with_capacity(vertex_capacity),
            tbn_quats: Vec::new(),
            indices: Vec::with_capacity(index_capacity),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / VERTS_PER_FACE
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    /// Flat offset of a face corner in the per-face-vertex layout.
    /// No bounds check beyond slice indexing; this mirrors the accessor
    /// contract between the tangent driver and the buffer.
    pub fn corner_index(&self, face: usize, vert: usize) -> usize {
        face * VERTS_PER_FACE + vert
    }

    /// Drop generated output arrays so the buffer can host a fresh pass.
    pub fn clear_generated(&mut self) {
        self.tangents.clear();
        self.bitangents.clear();
        self.tbn_quats.clear();
    }

    /// Re-expand a vertex-indexed mesh into the per-face-vertex layout:
    /// three entries per triangle, shared vertices duplicated, and a fresh
    /// index list of sequential triples. Only source attributes with full
    /// per-vertex coverage are carried; generated arrays are not.
    pub fn expand_to_corners(&self) -> MeshBuffers {
        let vertex_count = self.vertex_count();
        let corner_count = self.face_count() * VERTS_PER_FACE;
        let has_normals = self.normals.len() == vertex_count;
        let has_uvs = self.uvs.len() == vertex_count;
        let has_colors = self.colors.len() == vertex_count;

        let mut out = MeshBuffers::with_capacity(corner_count, corner_count);
        for tri in self.indices.chunks_exact(VERTS_PER_FACE) {
            for &idx in tri {
                let i = idx as usize;
                out.positions.push(self.positions[i]);
                if has_normals {
                    out.normals.push(self.normals[i]);
                }
                if has_uvs {
                    out.uvs.push(self.uvs[i]);
                }
                if has_colors {
                    out.colors.push(self.colors[i]);
                }
            }
            let base = out.positions.len() as u32 - VERTS_PER_FACE as u32;
            out.indices.extend_from_slice(&[base, base + 1, base + 2]);
        }
        out
    }

    /// Multiply vertex colors by an RGBA tint. Meshes imported without
    /// colors get the tint itself as a constant color.
    pub fn apply_color_tint(&mut self, tint: [f32; 4]) {
        if self.colors.len() == self.vertex_count() && !self.colors.is_empty() {
            for color in &mut self.colors {
                for (c, t) in color.iter_mut().zip(tint.iter()) {
                    *c *= t;
                }
            }
        } else {
            self.colors = vec![tint; self.vertex_count()];
        }
    }
}
