//! The wave simulation: a bounded oscillator scaled by how far the surface is pulled, sampled into
//! two filled sinusoidal outlines every frame.

mod outline;
mod params;
mod state;

pub use outline::{OverlayFrame, Outline, Point, Surface, WaveShape};
pub use params::WaveParams;
pub use state::{Advance, WaveState};
