// src/quat.rs
// Packs a tangent/bitangent/normal frame into a biased unit quaternion
// Exists so a full TBN basis travels to the GPU as four floats
// RELEVANT FILES:src/pipeline.rs,src/math.rs,src/mesh.rs

use glam::Vec3;

use crate::error::{TbnError, TbnResult};

/// Fixed-point width the w bias defaults to (SNORM16 storage).
pub const DEFAULT_STORAGE_BITS: u32 = 16;

/// Identity frame; also the recovery value for degenerate input frames.
pub const IDENTITY_QUAT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Smallest |w| representable in `storage_bits`-wide signed fixed point.
pub fn w_bias(storage_bits: u32) -> f32 {
    1.0 / ((1u64 << (storage_bits - 1)) - 1) as f32
}

/// Reject widths the bias formula cannot express.
pub fn validate_storage_bits(storage_bits: u32) -> TbnResult<()> {
    if !(2..=32).contains(&storage_bits) {
        return Err(TbnError::InvalidStorageBits(storage_bits));
    }
    Ok(())
}

/// Pack the rotation formed by rows [tangent; bitangent; normal] into a
/// quaternion whose w is biased away from zero so quantized storage never
/// collapses it, and whose xyz sign encodes a mirrored frame.
///
/// Pure function: identical input always yields bit-identical output.
/// The trace branch produces a unit quaternion by construction; the
/// largest-diagonal branch normalizes explicitly. Sign canonicalization
/// (step with `w < 0`) runs before the reflection encoding, so w keeps
/// its canonical positive sign and only xyz flip for mirrored frames.
pub fn pack_tbn_quat(
    tangent: [f32; 3],
    handedness: f32,
    bitangent: [f32; 3],
    normal: [f32; 3],
    storage_bits: u32,
) -> [f32; 4] {
    let m = [
        tangent[0], tangent[1], tangent[2],
        bitangent[0], bitangent[1], bitangent[2],
        normal[0], normal[1], normal[2],
    ];

    let mut out = [0.0f32; 4];
    let trace = m[0] + m[4] + m[8];

    if trace > 0.0 {
        // |w| > 1/2, so w anchors the solve
        let root = (trace + 1.0).sqrt();
        out[3] = 0.5 * root;
        let s = 0.5 / root;
        out[0] = (m[5] - m[7]) * s;
        out[1] = (m[6] - m[2]) * s;
        out[2] = (m[1] - m[3]) * s;
    } else {
        // |w| <= 1/2; anchor on the largest diagonal element instead
        let mut i = 0;
        if m[4] > m[0] {
            i = 1;
        }
        if m[8] > m[i * 3 + i] {
            i = 2;
        }
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;

        let root = (m[i * 3 + i] - m[j * 3 + j] - m[k * 3 + k] + 1.0).sqrt();
        out[i] = 0.5 * root;
        let s = 0.5 / root;
        out[3] = (m[j * 3 + k] - m[k * 3 + j]) * s;
        out[j] = (m[j * 3 + i] + m[i * 3 + j]) * s;
        out[k] = (m[k * 3 + i] + m[i * 3 + k]) * s;

        // this derivation does not guarantee unit length
        let mag = (out[0] * out[0] + out[1] * out[1] + out[2] * out[2] + out[3] * out[3]).sqrt();
        for c in &mut out {
            *c /= mag;
        }
    }

    // canonicalize onto the w >= 0 hemisphere
    if out[3] < 0.0 {
        for c in &mut out {
            *c = -*c;
        }
    }

    // bias w so quantized storage never rounds it to exactly zero
    let bias = w_bias(storage_bits);
    if out[3] < bias {
        out[3] = bias;
        let factor = (1.0 - bias * bias).sqrt();
        out[0] *= factor;
        out[1] *= factor;
        out[2] *= factor;
    }

    // mirrored frames flip xyz, never w
    let t = Vec3::from(tangent);
    let n = Vec3::from(normal);
    let b = if handedness > 0.0 { t.cross(n) } else { n.cross(t) };
    let cc = t.cross(n);
    if cc.dot(b) < 0.0 {
        out[0] = -out[0];
        out[1] = -out[1];
        out[2] = -out[2];
    }

    out
}
