//! Rendering of simulation state into RGBA pixel buffers.
//!
//! Every buffer matches its input grid's dimensions exactly. Renderers run
//! their per-pixel mapping in parallel with rayon and never mutate inputs.

mod buffer;
mod layers;
pub mod palette;

pub use buffer::PixelBuffer;
pub use layers::{
    CapitalMarker, DistanceScale, overlay_capitals, render_distance, render_ownership,
    render_resources, render_terrain,
};
