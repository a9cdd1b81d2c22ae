use std::time::{Duration, Instant};

/// The outcome of polling an animation for a new frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollableState {
    /// A new frame was produced and should be rendered.
    Modified,
    /// Nothing changed since the last poll.
    Unmodified,
    /// The animation just finished; the overlay should be removed.
    Done,
}

/// A frame-rate locked clock that can be paused.
///
/// The ticker doesn't own a thread or a timer: the host polls it and it answers whether a frame is
/// due. A paused ticker never reports a frame as due, so an idle control costs nothing beyond the
/// poll itself.
#[derive(Debug, Clone)]
pub struct FrameTicker {
    interval: Duration,
    running: bool,
    last_tick: Option<Instant>,
}

impl FrameTicker {
    pub fn new(frames_per_second: u32) -> Self {
        let interval = Duration::from_secs(1) / frames_per_second.max(1);
        Self { interval, running: false, last_tick: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_paused(&self) -> bool {
        !self.running
    }

    /// Resumes ticking. The first frame is due right away. Resuming a running ticker is a no-op.
    pub fn resume(&mut self) {
        if !self.running {
            self.running = true;
            self.last_tick = None;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
        self.last_tick = None;
    }

    /// Returns whether a frame is due at `now`, and if so marks it as consumed.
    ///
    /// Frames stay on the schedule set by the first one, so late polls don't slow the frame rate.
    /// After a stall longer than a whole interval the schedule restarts at `now` instead of
    /// replaying the missed frames.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        let scheduled = match self.last_tick {
            None => now,
            Some(last) => {
                let next = last + self.interval;
                if now < next {
                    return false;
                }
                if now.saturating_duration_since(next) >= self.interval { now } else { next }
            }
        };
        self.last_tick = Some(scheduled);
        true
    }
}
