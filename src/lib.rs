//! Tangent-space generation engine: builds per-vertex TBN frames for
//! triangle meshes and optionally packs each frame into a biased unit
//! quaternion for compact fixed-point storage.
//!
//! The mesh source fills a [`MeshBuffers`]; [`generate_tangent_frames`]
//! runs one stateless pass (direct or per-face mode) and hands freshly
//! owned buffers back to the mesh sink.

pub mod error;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod quat;
pub mod tangent;
pub mod validate;
pub mod vertex;

pub use error::{TbnError, TbnResult};
pub use mesh::{MeshBuffers, VERTS_PER_FACE};
pub use pipeline::generate_tangent_frames;
pub use quat::{pack_tbn_quat, w_bias, DEFAULT_STORAGE_BITS, IDENTITY_QUAT};
pub use tangent::{
    generate_direct_tangents, generate_tangent_space, recompute_bitangents,
    BitangentConvention, TangentAlgorithm, TangentOptions, TangentSpaceGeometry,
};
pub use vertex::{interleave_quat, interleave_tbn, QuatVertex, TbnVertex};
