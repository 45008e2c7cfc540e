//! Frame output module
//!
//! Writers for extracted frames, starting with the raw semi-planar bytes
//! handed to the texture loader.

mod writer;
mod raw_writer;


pub use writer::FrameWriter;
pub use raw_writer::RawNv21Writer;
