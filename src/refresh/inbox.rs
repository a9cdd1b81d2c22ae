use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// A single observation of the scroll surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollSample {
    /// How far the surface is dragged past its resting position. Negative when scrolled into the
    /// content.
    pub pull_distance: f64,
    /// Whether the surface is coasting after the finger lifted.
    pub is_decelerating: bool,
    /// Whether a finger is on the surface.
    pub is_tracking: bool,
}

impl ScrollSample {
    pub fn new(pull_distance: f64, is_decelerating: bool, is_tracking: bool) -> Self {
        Self { pull_distance, is_decelerating, is_tracking }
    }
}

/// A queue of scroll samples shared between the host's event source and the controller.
///
/// Hosts may push from any thread; the controller drains the whole queue between frames so a frame
/// never sees half of a sample.
#[derive(Debug, Clone, Default)]
pub struct SampleInbox {
    queue: Arc<Mutex<VecDeque<ScrollSample>>>,
}

impl SampleInbox {
    pub fn push(&self, sample: ScrollSample) {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn drain(&self) -> Vec<ScrollSample> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }
}
