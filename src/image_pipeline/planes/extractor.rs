use tracing::trace;

use crate::image_pipeline::common::config::CropRect;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::planes::types::{ImagePlane, PixelBuffer};

/// Luma plus two chroma planes.
const PLANE_COUNT: usize = 3;

/// How rows of a plane are copied into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RowCopy {
    /// Straight slice copy when source and destination are both packed
    PreferPacked,
    /// Always gather sample by sample
    AlwaysStrided,
}

/// Extracts a cropped 4:2:0 image into one semi-planar (NV21 order) buffer.
///
/// `planes` must be ordered luma, U, V. The output is
/// `crop.width * crop.height * bits_per_pixel / 8` bytes long and its layout
/// never depends on the source row or pixel strides: luma is packed at the
/// start, V samples land on even offsets of the chroma region and U samples on
/// odd ones.
///
/// # Errors
///
/// * `InvalidArgument` - not exactly three planes, a zero stride, or a
///   `bits_per_pixel` too small to hold the luma and chroma regions
/// * `InvalidDimensions` - the crop is too large to address
/// * `OutOfBounds` - the crop reaches past the bytes a plane actually holds;
///   this is detected before any output is allocated
///
/// # Examples
///
/// ```
/// use chroma_preview_rs::image_pipeline::{extract, CropRect, ImagePlane};
///
/// let y = [10u8, 11, 12, 13];
/// let u = [20u8];
/// let v = [30u8];
/// let planes = [
///     ImagePlane::packed(&y, 2),
///     ImagePlane::packed(&u, 1),
///     ImagePlane::packed(&v, 1),
/// ];
/// let frame = extract(&planes, CropRect::full(2, 2), 12).unwrap();
/// assert_eq!(frame.data, vec![10, 11, 12, 13, 30, 20]);
/// ```
pub fn extract(planes: &[ImagePlane<'_>], crop: CropRect, bits_per_pixel: u32) -> Result<PixelBuffer> {
    extract_planes(planes, crop, bits_per_pixel, RowCopy::PreferPacked)
}

pub(super) fn extract_planes(
    planes: &[ImagePlane<'_>],
    crop: CropRect,
    bits_per_pixel: u32,
    row_copy: RowCopy,
) -> Result<PixelBuffer> {
    if planes.len() != PLANE_COUNT {
        return Err(PipelineError::InvalidArgument(format!(
            "expected {} planes, got {}",
            PLANE_COUNT,
            planes.len()
        )));
    }

    let width = crop.width;
    let height = crop.height;
    let (total_len, luma_len) = output_len(width, height, bits_per_pixel)?;

    // Every read is bounds checked before the output is allocated.
    let mut spans = Vec::with_capacity(PLANE_COUNT);
    for (index, plane) in planes.iter().enumerate() {
        if let Some(span) = PlaneSpan::locate(index, plane, crop)? {
            spans.push(span);
        }
    }

    let mut data = vec![0u8; total_len];

    for span in &spans {
        let plane = &planes[span.index];
        let (mut channel_offset, output_stride) = match span.index {
            0 => (0, 1),
            1 => (luma_len + 1, 2),
            _ => (luma_len, 2),
        };
        let packed = row_copy == RowCopy::PreferPacked && plane.pixel_stride == 1 && output_stride == 1;

        trace!(
            plane = span.index,
            width = span.width,
            height = span.height,
            row_stride = plane.row_stride,
            pixel_stride = plane.pixel_stride,
            packed,
            "Extracting plane"
        );

        let mut position = span.origin;
        for row in 0..span.height {
            let row_bytes = plane
                .buffer
                .get(position..position + span.row_len)
                .ok_or_else(|| out_of_bounds(span.index, position, span.row_len, plane.buffer.len()))?;

            if packed {
                data[channel_offset..channel_offset + span.width].copy_from_slice(row_bytes);
                channel_offset += span.width;
            } else {
                for &sample in row_bytes.iter().step_by(plane.pixel_stride) {
                    data[channel_offset] = sample;
                    channel_offset += output_stride;
                }
            }
            position += span.row_len;

            // Skip row padding, but never past the final row.
            if row < span.height - 1 {
                position = position - span.row_len + plane.row_stride;
            }
        }
    }

    Ok(PixelBuffer { width, height, data })
}

/// Where a plane's crop starts and how much of each row is read.
#[derive(Debug)]
struct PlaneSpan {
    index: usize,
    origin: usize,
    width: usize,
    height: usize,
    /// Bytes spanned by one row of samples, first to last inclusive
    row_len: usize,
}

impl PlaneSpan {
    /// `None` for a plane the crop subsamples away entirely.
    fn locate(index: usize, plane: &ImagePlane<'_>, crop: CropRect) -> Result<Option<Self>> {
        if plane.row_stride == 0 || plane.pixel_stride == 0 {
            return Err(PipelineError::InvalidArgument(format!(
                "plane {} has zero stride (row_stride={}, pixel_stride={})",
                index, plane.row_stride, plane.pixel_stride
            )));
        }

        let shift = if index == 0 { 0 } else { 1 };
        let width = crop.width >> shift;
        let height = crop.height >> shift;
        if width == 0 || height == 0 {
            return Ok(None);
        }

        let overflow = || PipelineError::InvalidArgument(format!("plane {} crop offset overflows", index));
        let available = plane.buffer.len();

        let origin = plane
            .row_stride
            .checked_mul(crop.top >> shift)
            .zip(plane.pixel_stride.checked_mul(crop.left >> shift))
            .and_then(|(rows, cols)| rows.checked_add(cols))
            .ok_or_else(overflow)?;
        if origin > available {
            return Err(out_of_bounds(index, origin, 0, available));
        }

        let row_len = (width - 1)
            .checked_mul(plane.pixel_stride)
            .and_then(|len| len.checked_add(1))
            .ok_or_else(overflow)?;
        let last_row = plane
            .row_stride
            .checked_mul(height - 1)
            .and_then(|offset| offset.checked_add(origin))
            .ok_or_else(overflow)?;
        if last_row.checked_add(row_len).is_none_or(|end| end > available) {
            return Err(out_of_bounds(index, last_row, row_len, available));
        }

        Ok(Some(Self {
            index,
            origin,
            width,
            height,
            row_len,
        }))
    }
}

/// Output size for the crop, checked against what the three planes will
/// write. Returns the total length and the luma length.
fn output_len(width: usize, height: usize, bits_per_pixel: u32) -> Result<(usize, usize)> {
    let too_large = || PipelineError::InvalidDimensions(width, height);

    let luma_len = width.checked_mul(height).ok_or_else(too_large)?;
    let total_len = luma_len
        .checked_mul(bits_per_pixel as usize)
        .map(|bits| bits / 8)
        .ok_or_else(too_large)?;
    let required = (width >> 1)
        .checked_mul(height >> 1)
        .and_then(|chroma| chroma.checked_mul(2))
        .and_then(|chroma| chroma.checked_add(luma_len))
        .ok_or_else(too_large)?;

    if bits_per_pixel == 0 || total_len < required {
        return Err(PipelineError::InvalidArgument(format!(
            "{} bits per pixel cannot hold a {}x{} three-plane 4:2:0 image",
            bits_per_pixel, width, height
        )));
    }

    Ok((total_len, luma_len))
}

fn out_of_bounds(plane: usize, position: usize, requested: usize, available: usize) -> PipelineError {
    PipelineError::OutOfBounds {
        plane,
        position,
        requested,
        available,
    }
}
