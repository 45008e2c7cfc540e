//! Frame source module
//!
//! This module turns raw frame bytes into the three-plane descriptors the
//! extractor consumes.

mod reader;
mod packed_reader;
pub mod types;


pub use reader::FrameReader;
pub use packed_reader::PackedYuvReader;
pub use types::{PlaneLayout, PlanarFrame};
