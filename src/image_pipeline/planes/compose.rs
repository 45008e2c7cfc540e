use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Builds a YUV420 semi-planar buffer from three tightly packed planes.
///
/// Luma is copied as-is, then U and V are interleaved U first (NV12 order).
/// Camera HALs regularly hand over chroma planes one byte short, so missing
/// trailing chroma samples are filled with zero. A short luma plane is an error.
pub fn compose_semi_planar(y: &[u8], u: &[u8], v: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    let y_size = width * height;
    let uv_size = y_size / 4;

    let luma = y.get(..y_size).ok_or(PipelineError::OutOfBounds {
        plane: 0,
        position: 0,
        requested: y_size,
        available: y.len(),
    })?;

    if u.len() < uv_size || v.len() < uv_size {
        debug!(
            expected = uv_size,
            u_len = u.len(),
            v_len = v.len(),
            "Padding short chroma planes"
        );
    }

    let mut yuv420sp = vec![0u8; y_size * 3 / 2];
    yuv420sp[..y_size].copy_from_slice(luma);

    for (i, pair) in yuv420sp[y_size..].chunks_exact_mut(2).take(uv_size).enumerate() {
        pair[0] = u.get(i).copied().unwrap_or(0);
        pair[1] = v.get(i).copied().unwrap_or(0);
    }

    Ok(yuv420sp)
}
