// src/validate.rs
// Attribute-consistency checks run before a generation pass
// Exists to turn accessor-contract violations into errors instead of panics
// RELEVANT FILES:src/mesh.rs,src/error.rs,src/pipeline.rs

use crate::error::{TbnError, TbnResult};
use crate::mesh::{MeshBuffers, VERTS_PER_FACE};

/// Check that the index list and per-vertex attribute arrays are mutually
/// consistent. A zero-face mesh is valid and produces empty output later.
pub fn validate_attributes(mesh: &MeshBuffers) -> TbnResult<()> {
    if mesh.indices.len() % VERTS_PER_FACE != 0 {
        return Err(TbnError::AttributeMismatch(format!(
            "index count {} is not a multiple of {}",
            mesh.indices.len(),
            VERTS_PER_FACE
        )));
    }

    let vertex_count = mesh.vertex_count();
    for &idx in &mesh.indices {
        if idx as usize >= vertex_count {
            return Err(TbnError::IndexOutOfBounds {
                index: idx,
                vertex_count,
            });
        }
    }

    check_optional("normals", mesh.normals.len(), vertex_count)?;
    check_optional("uvs", mesh.uvs.len(), vertex_count)?;
    check_optional("colors", mesh.colors.len(), vertex_count)?;
    check_optional("tangents", mesh.tangents.len(), vertex_count)?;
    check_optional("bitangents", mesh.bitangents.len(), vertex_count)?;
    Ok(())
}

/// Per-face generation also needs full normal and UV coverage; positions
/// alone cannot anchor a tangent frame.
pub fn validate_per_face_inputs(mesh: &MeshBuffers) -> TbnResult<()> {
    if mesh.is_empty() {
        return Ok(());
    }
    let vertex_count = mesh.vertex_count();
    if mesh.normals.len() != vertex_count {
        return Err(TbnError::AttributeMismatch(
            "per-face tangent generation requires per-vertex normals".into(),
        ));
    }
    if mesh.uvs.len() != vertex_count {
        return Err(TbnError::AttributeMismatch(
            "per-face tangent generation requires per-vertex uvs".into(),
        ));
    }
    Ok(())
}

fn check_optional(name: &str, len: usize, vertex_count: usize) -> TbnResult<()> {
    if len != 0 && len != vertex_count {
        return Err(TbnError::AttributeMismatch(format!(
            "{name} array holds {len} entries for {vertex_count} vertices"
        )));
    }
    Ok(())
}
