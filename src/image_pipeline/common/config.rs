//! Frame extraction configuration types

/// Crop rectangle in full-resolution pixel coordinates.
///
/// Even `top`/`left` keep the chroma planes aligned with luma; odd values are
/// accepted and simply rounded down on the subsampled planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropRect {
    pub top: usize,
    pub left: usize,
    pub width: usize,
    pub height: usize,
}

impl CropRect {
    pub fn new(top: usize, left: usize, width: usize, height: usize) -> Self {
        Self { top, left, width, height }
    }

    /// Crop covering a whole `width` x `height` image.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// One past the last column, `None` on overflow.
    pub fn right(&self) -> Option<usize> {
        self.left.checked_add(self.width)
    }

    /// One past the last row, `None` on overflow.
    pub fn bottom(&self) -> Option<usize> {
        self.top.checked_add(self.height)
    }

    /// Whether the rectangle lies inside a `width` x `height` image.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        matches!((self.right(), self.bottom()), (Some(r), Some(b)) if r <= width && b <= height)
    }
}

/// Byte layout of a tightly packed source frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLayout {
    /// Y plane, then full U plane, then full V plane
    I420,
    /// Y plane, then interleaved V/U samples
    Nv21,
}

/// Bits per pixel of a 4:2:0 three-plane format.
pub const YUV420_BITS_PER_PIXEL: u32 = 12;

/// Configuration for YUV to semi-planar conversion
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Width of the source frame in pixels
    pub source_width: usize,
    /// Height of the source frame in pixels
    pub source_height: usize,
    /// How the packed source bytes are arranged
    pub source_layout: SourceLayout,
    /// Region to extract, `None` for the whole frame
    pub crop: Option<CropRect>,
    /// Bits per pixel of the output format, sizes the output buffer
    pub bits_per_pixel: u32,
    /// Whether to validate crop dimensions before extraction
    pub validate_dimensions: bool,
    /// Largest accepted crop width or height
    pub max_dimension: Option<usize>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            source_width: 640,
            source_height: 480,
            source_layout: SourceLayout::I420,
            crop: None,
            bits_per_pixel: YUV420_BITS_PER_PIXEL,
            validate_dimensions: true,
            max_dimension: Some(8192),
        }
    }
}

impl ExtractionConfig {
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }
}

/// Builder for ExtractionConfig
#[derive(Default)]
pub struct ExtractionConfigBuilder {
    source_width: Option<usize>,
    source_height: Option<usize>,
    source_layout: Option<SourceLayout>,
    crop: Option<Option<CropRect>>,
    bits_per_pixel: Option<u32>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl ExtractionConfigBuilder {
    pub fn source_size(mut self, width: usize, height: usize) -> Self {
        self.source_width = Some(width);
        self.source_height = Some(height);
        self
    }

    pub fn source_layout(mut self, layout: SourceLayout) -> Self {
        self.source_layout = Some(layout);
        self
    }

    pub fn crop(mut self, crop: Option<CropRect>) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn bits_per_pixel(mut self, bits: u32) -> Self {
        self.bits_per_pixel = Some(bits);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> ExtractionConfig {
        let default = ExtractionConfig::default();
        ExtractionConfig {
            source_width: self.source_width.unwrap_or(default.source_width),
            source_height: self.source_height.unwrap_or(default.source_height),
            source_layout: self.source_layout.unwrap_or(default.source_layout),
            crop: self.crop.unwrap_or(default.crop),
            bits_per_pixel: self.bits_per_pixel.unwrap_or(default.bits_per_pixel),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
