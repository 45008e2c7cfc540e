//! Background image preparation
//!
//! Turns the image file named by the filter's background path into pixels
//! sized for the preview texture the chroma key composites over.

mod prepare;


pub use prepare::{
    FALLBACK_COLOUR,
    Orientation,
    load_background,
    prepare_background,
    solid_image,
};
