//! A wave-shaped pull-to-refresh control, independent of any UI toolkit.
//!
//! The host attaches a [`RefreshController`] to a scroll surface, feeds it scroll samples and polls
//! it at its frame rate. Every modified frame exposes an overlay frame and two filled outlines the
//! host paints with the configured [`WaveTheme`].

pub mod canvas;
pub mod config;
pub mod refresh;
pub mod theme;
pub mod wave;

pub use config::{ConfigError, RefreshConfig};
pub use refresh::{PollableState, RefreshController, RefreshState, SampleInbox, ScrollSample};
pub use theme::{Color, WaveTheme};
