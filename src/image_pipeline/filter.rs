//! Chroma-key filter parameters
//!
//! Settings arrive as loosely typed JSON maps from the UI layer. They are
//! parsed once into [`FilterSettings`], normalized into [`FilterParameters`],
//! and overlaid onto the long-lived [`SharedFilterParameters`] the renderer
//! reads from.

mod parameters;
mod settings;
mod shared;


pub use parameters::{
    ChromaKeyUniforms,
    FilterParameters,
    DEFAULT_REPLACEMENT_COLOUR,
    DEFAULT_SENSITIVITY,
    DEFAULT_SMOOTHING,
};
pub use settings::FilterSettings;
pub use shared::SharedFilterParameters;
