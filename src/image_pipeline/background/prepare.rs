use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Shown in place of a background that cannot be decoded.
pub const FALLBACK_COLOUR: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// Orientation of the device the preview is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Loads the image at `path` and prepares it with [`prepare_background`].
///
/// A file that is missing or cannot be decoded is logged and replaced by a
/// solid [`FALLBACK_COLOUR`] image of the target size, so a bad background
/// never stops the preview.
///
/// # Errors
///
/// `InvalidDimensions` when the target size is zero in either direction.
pub fn load_background(
    path: impl AsRef<Path>,
    target_width: u32,
    target_height: u32,
    orientation: Orientation,
) -> Result<RgbaImage> {
    check_target(target_width, target_height)?;
    let path = path.as_ref();

    match image::open(path) {
        Ok(source) => {
            debug!(path = %path.display(), width = source.width(), height = source.height(), "Loaded background");
            prepare_background(&source.to_rgba8(), target_width, target_height, orientation)
        }
        Err(e) => {
            warn!(path = %path.display(), "Background unreadable, using fallback: {}", e);
            Ok(solid_image(target_width, target_height, FALLBACK_COLOUR))
        }
    }
}

/// Scales `source` to cover the target, center-crops it, and in portrait
/// rotates it a quarter turn counter-clockwise.
///
/// In portrait the crop is taken with the target's width and height swapped,
/// so the result is always `target_width` x `target_height`. Scaling follows
/// the target height; a source too narrow to fill the width at that scale is
/// scaled up to the width instead and cropped vertically.
///
/// # Errors
///
/// `InvalidDimensions` when the target size is zero in either direction.
pub fn prepare_background(
    source: &RgbaImage,
    target_width: u32,
    target_height: u32,
    orientation: Orientation,
) -> Result<RgbaImage> {
    check_target(target_width, target_height)?;

    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        warn!("Background has no pixels, using fallback");
        return Ok(solid_image(target_width, target_height, FALLBACK_COLOUR));
    }

    let (crop_width, crop_height) = match orientation {
        Orientation::Landscape => (target_width, target_height),
        Orientation::Portrait => (target_height, target_width),
    };

    let scale = (crop_height as f64 / height as f64).max(crop_width as f64 / width as f64);
    let scaled_width = ((width as f64 * scale).round() as u32).max(crop_width);
    let scaled_height = ((height as f64 * scale).round() as u32).max(crop_height);

    let scaled = if (scaled_width, scaled_height) == (width, height) {
        source.clone()
    } else {
        imageops::resize(source, scaled_width, scaled_height, FilterType::Triangle)
    };

    let x = (scaled_width - crop_width) / 2;
    let y = (scaled_height - crop_height) / 2;
    let cropped = imageops::crop_imm(&scaled, x, y, crop_width, crop_height).to_image();

    debug!(
        scaled_width,
        scaled_height,
        x,
        y,
        ?orientation,
        "Prepared background"
    );

    Ok(match orientation {
        Orientation::Landscape => cropped,
        Orientation::Portrait => imageops::rotate270(&cropped),
    })
}

/// A `width` x `height` image filled with `colour`.
pub fn solid_image(width: u32, height: u32, colour: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, colour)
}

fn check_target(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions(width as usize, height as usize));
    }
    Ok(())
}
