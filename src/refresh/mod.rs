//! The pull-to-refresh state machine and the frame clock it drives.

mod controller;
mod inbox;
mod ticker;

pub use controller::{RefreshController, RefreshState};
pub use inbox::{SampleInbox, ScrollSample};
pub use ticker::{FrameTicker, PollableState};
