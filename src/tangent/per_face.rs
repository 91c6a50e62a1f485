// src/tangent/per_face.rs
// Per-face tangent generation over an accessor-callback surface
// Exists so the solver never touches a concrete buffer layout directly
// RELEVANT FILES:src/tangent/mod.rs,src/mesh.rs,src/math.rs

use std::collections::HashMap;

use glam::{Vec2, Vec3};

use crate::math::{gram_schmidt, normalize_or, orthonormal_to, UV_DET_EPS};
use crate::mesh::{MeshBuffers, VERTS_PER_FACE};

/// Accessor surface the per-face driver works through. Implementations
/// must guarantee `face` and `vert` stay in range; the driver performs no
/// bounds checking of its own. Faces are triangles
/// (`num_vertices_of_face` is always 3 here).
pub trait TangentSpaceGeometry {
    fn num_faces(&self) -> usize;
    fn num_vertices_of_face(&self, face: usize) -> usize;
    fn position(&self, face: usize, vert: usize) -> [f32; 3];
    fn normal(&self, face: usize, vert: usize) -> [f32; 3];
    fn tex_coord(&self, face: usize, vert: usize) -> [f32; 2];
    /// Receive the computed tangent and handedness sign for one corner.
    fn set_tangent(&mut self, face: usize, vert: usize, tangent: [f32; 3], sign: f32);
}

// Corner-sharing tolerances, matching the attribute scales they quantize.
const POS_EPS: f32 = 1e-5;
const NORMAL_EPS: f32 = 1e-3;
const UV_EPS: f32 = 1e-4;

type CornerKey = [i64; 8];

fn quantize_scalar(value: f32, eps: f32) -> i64 {
    (value / eps).round() as i64
}

fn corner_key(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> CornerKey {
    [
        quantize_scalar(position[0], POS_EPS),
        quantize_scalar(position[1], POS_EPS),
        quantize_scalar(position[2], POS_EPS),
        quantize_scalar(normal[0], NORMAL_EPS),
        quantize_scalar(normal[1], NORMAL_EPS),
        quantize_scalar(normal[2], NORMAL_EPS),
        quantize_scalar(uv[0], UV_EPS),
        quantize_scalar(uv[1], UV_EPS),
    ]
}

/// Generate a smoothed tangent and handedness sign for every face corner.
///
/// Each triangle contributes an area-weighted UV-gradient tangent and
/// bitangent to every corner that shares its (position, normal, uv)
/// attributes; the accumulated tangent is then Gram-Schmidt
/// orthogonalized against the corner normal and written back through
/// [`TangentSpaceGeometry::set_tangent`]. Faces with a near-zero UV
/// determinant contribute a stable tangent orthogonal to the face normal
/// instead of infinities. A zero-face mesh produces no callbacks.
pub fn generate_tangent_space<G: TangentSpaceGeometry>(geometry: &mut G) {
    let num_faces = geometry.num_faces();
    if num_faces == 0 {
        return;
    }

    let corner_count = num_faces * VERTS_PER_FACE;
    let mut slots: HashMap<CornerKey, usize> = HashMap::with_capacity(corner_count);
    let mut corner_slot = Vec::with_capacity(corner_count);
    let mut accum_tangent: Vec<Vec3> = Vec::new();
    let mut accum_bitangent: Vec<Vec3> = Vec::new();
    let mut degenerate_uv_faces = 0usize;

    for face in 0..num_faces {
        debug_assert_eq!(geometry.num_vertices_of_face(face), VERTS_PER_FACE);

        let p0 = Vec3::from(geometry.position(face, 0));
        let p1 = Vec3::from(geometry.position(face, 1));
        let p2 = Vec3::from(geometry.position(face, 2));
        let uv0 = Vec2::from(geometry.tex_coord(face, 0));
        let uv1 = Vec2::from(geometry.tex_coord(face, 1));
        let uv2 = Vec2::from(geometry.tex_coord(face, 2));

        let edge1 = p1 - p0;
        let edge2 = p2 - p0;
        let duv1 = uv1 - uv0;
        let duv2 = uv2 - uv0;
        let det = duv1.x * duv2.y - duv1.y * duv2.x;

        let (face_tangent, face_bitangent) = if det.abs() < UV_DET_EPS {
            degenerate_uv_faces += 1;
            let face_normal = normalize_or(edge1.cross(edge2), Vec3::Z);
            let t = orthonormal_to(face_normal);
            (t, face_normal.cross(t))
        } else {
            let f = 1.0 / det;
            (
                (edge1 * duv2.y - edge2 * duv1.y) * f,
                (edge2 * duv1.x - edge1 * duv2.x) * f,
            )
        };

        let area = 0.5 * edge1.cross(edge2).length();

        for vert in 0..VERTS_PER_FACE {
            let key = corner_key(
                geometry.position(face, vert),
                geometry.normal(face, vert),
                geometry.tex_coord(face, vert),
            );
            let slot = *slots.entry(key).or_insert_with(|| {
                accum_tangent.push(Vec3::ZERO);
                accum_bitangent.push(Vec3::ZERO);
                accum_tangent.len() - 1
            });
            accum_tangent[slot] += face_tangent * area;
            accum_bitangent[slot] += face_bitangent * area;
            corner_slot.push(slot);
        }
    }

    if degenerate_uv_faces > 0 {
        log::warn!(
            "{degenerate_uv_faces} of {num_faces} faces have degenerate UVs; \
             substituted fallback tangents"
        );
    }

    for face in 0..num_faces {
        for vert in 0..VERTS_PER_FACE {
            let slot = corner_slot[face * VERTS_PER_FACE + vert];
            let n = normalize_or(Vec3::from(geometry.normal(face, vert)), Vec3::Z);
            let projected = gram_schmidt(accum_tangent[slot], n);
            let t = normalize_or(projected, orthonormal_to(n));
            // Mirrored UV charts flip the solved bitangent against
            // cross(n, t); that dot sign is the handedness.
            let sign = if n.cross(t).dot(accum_bitangent[slot]) < 0.0 {
                -1.0
            } else {
                1.0
            };
            geometry.set_tangent(face, vert, t.to_array(), sign);
        }
    }
}

impl TangentSpaceGeometry for MeshBuffers {
    fn num_faces(&self) -> usize {
        self.face_count()
    }

    fn num_vertices_of_face(&self, _face: usize) -> usize {
        VERTS_PER_FACE
    }

    fn position(&self, face: usize, vert: usize) -> [f32; 3] {
        self.positions[self.corner_index(face, vert)]
    }

    fn normal(&self, face: usize, vert: usize) -> [f32; 3] {
        self.normals[self.corner_index(face, vert)]
    }

    fn tex_coord(&self, face: usize, vert: usize) -> [f32; 2] {
        self.uvs[self.corner_index(face, vert)]
    }

    fn set_tangent(&mut self, face: usize, vert: usize, tangent: [f32; 3], sign: f32) {
        let idx = self.corner_index(face, vert);
        if self.tangents.len() != self.vertex_count() {
            self.tangents = vec![[1.0, 0.0, 0.0, 1.0]; self.vertex_count()];
        }
        // The sign is stored negated: the downstream quaternion packing
        // convention reads the flipped value. Consumers targeting another
        // renderer can implement the trait without this flip.
        self.tangents[idx] = [tangent[0], tangent[1], tangent[2], -sign];
    }
}
