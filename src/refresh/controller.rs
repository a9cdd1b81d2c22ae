use super::inbox::{SampleInbox, ScrollSample};
use super::ticker::{FrameTicker, PollableState};
use crate::config::RefreshConfig;
use crate::theme::WaveTheme;
use crate::wave::{Advance, Outline, OverlayFrame, Surface, WaveParams, WaveState};
use std::fmt;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// The lifecycle of a single pull-to-refresh gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RefreshState {
    /// Nothing is drawn and no frames are produced.
    Idle,
    /// The user is pulling, the wave follows the pull.
    Animating,
    /// The refresh fired; the wave decays to nothing.
    AnimatingToStop,
}

/// The wave state that only exists while attached to a surface.
#[derive(Debug)]
struct Attachment {
    surface: Surface,
    wave: WaveState,
}

type RefreshAction = Box<dyn FnMut()>;

/// Drives the wave for a single scroll surface.
///
/// The host feeds scroll samples in, either directly through [`RefreshController::on_scroll_sample`]
/// or through the [`SampleInbox`], and polls for frames. After every modified frame the overlay
/// frame and both outlines are up to date.
pub struct RefreshController {
    params: WaveParams,
    theme: WaveTheme,
    attachment: Option<Attachment>,
    state: RefreshState,
    ticker: FrameTicker,
    inbox: SampleInbox,
    action: Option<RefreshAction>,
    overlay: Option<OverlayFrame>,
    top: Outline,
    bottom: Outline,
}

impl RefreshController {
    pub fn new(config: &RefreshConfig) -> Self {
        Self {
            params: config.wave.clone(),
            theme: config.theme.clone(),
            attachment: None,
            state: RefreshState::Idle,
            ticker: FrameTicker::new(config.frames_per_second),
            inbox: SampleInbox::default(),
            action: None,
            overlay: None,
            top: Outline::default(),
            bottom: Outline::default(),
        }
    }

    /// Sets the action run when the user releases the pull.
    pub fn on_refresh<F>(&mut self, action: F)
    where
        F: FnMut() + 'static,
    {
        self.action = Some(Box::new(action));
    }

    /// Attaches to a surface of the given width.
    ///
    /// Attaching again with the same width changes nothing; with a different width it behaves like
    /// [`RefreshController::set_surface_width`]. An unusable width leaves the controller detached.
    /// Returns whether the controller is attached afterwards.
    pub fn attach(&mut self, surface_width: f64) -> bool {
        let Some(surface) = Surface::new(surface_width) else {
            warn!(surface_width, "ignoring surface with unusable width");
            self.detach();
            return false;
        };
        match &mut self.attachment {
            Some(attachment) if attachment.surface == surface => (),
            Some(attachment) => {
                debug!(surface_width, "surface resized");
                attachment.surface = surface;
            }
            None => {
                debug!(surface_width, "attached to surface");
                self.attachment = Some(Attachment { surface, wave: WaveState::new(&self.params) });
            }
        }
        true
    }

    /// Updates the width of the attached surface. Does nothing while detached.
    pub fn set_surface_width(&mut self, surface_width: f64) -> bool {
        if self.attachment.is_none() {
            return false;
        }
        self.attach(surface_width)
    }

    /// Stops any animation and drops the wave state.
    pub fn detach(&mut self) {
        if self.attachment.is_none() {
            return;
        }
        self.stop();
        self.attachment = None;
        debug!("detached from surface");
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn theme(&self) -> &WaveTheme {
        &self.theme
    }

    /// The wave state, if attached.
    pub fn wave(&self) -> Option<&WaveState> {
        self.attachment.as_ref().map(|a| &a.wave)
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.attachment.as_ref().map(|a| &a.surface)
    }

    /// A handle to push scroll samples through, usable from any thread.
    pub fn inbox(&self) -> SampleInbox {
        self.inbox.clone()
    }

    pub fn ticker(&self) -> &FrameTicker {
        &self.ticker
    }

    /// The overlay's bounding frame, absent while idle.
    pub fn overlay_frame(&self) -> Option<OverlayFrame> {
        self.overlay
    }

    /// The leading wave's filled outline, empty while idle.
    pub fn top_outline(&self) -> &Outline {
        &self.top
    }

    /// The trailing wave's filled outline, empty while idle.
    pub fn bottom_outline(&self) -> &Outline {
        &self.bottom
    }

    /// Applies a single scroll observation.
    pub fn on_scroll_sample(&mut self, sample: ScrollSample) {
        let pull_ratio = self.params.pull_ratio(sample.pull_distance);
        let Some(attachment) = &mut self.attachment else {
            trace!(?sample, "ignoring sample while detached");
            return;
        };
        attachment.wave.set_pull_ratio(pull_ratio);

        if sample.pull_distance == 0.0 && sample.is_decelerating && self.state == RefreshState::Animating {
            self.release();
        }
        if sample.pull_distance >= 0.0
            && !sample.is_decelerating
            && sample.is_tracking
            && self.state != RefreshState::Animating
        {
            self.start(pull_ratio);
        }
    }

    /// Applies pending inbox samples and produces a frame if one is due.
    pub fn poll(&mut self, now: Instant) -> PollableState {
        for sample in self.inbox.drain() {
            self.on_scroll_sample(sample);
        }
        if self.ticker.poll(now) { self.tick() } else { PollableState::Unmodified }
    }

    /// Advances the wave by a single frame, regardless of the ticker.
    pub fn tick(&mut self) -> PollableState {
        if self.state == RefreshState::Idle {
            return PollableState::Unmodified;
        }
        let Some(attachment) = &mut self.attachment else {
            return PollableState::Unmodified;
        };
        let decaying = self.state == RefreshState::AnimatingToStop;
        match attachment.wave.advance(&self.params, decaying) {
            Advance::Exhausted => {
                self.stop();
                PollableState::Done
            }
            Advance::Running => {
                let width = attachment.surface.width();
                let shape = attachment.wave.shape(&attachment.surface);
                trace!(amplitude = shape.amplitude, phase = shape.phase, state = %self.state, "wave tick");
                self.overlay = Some(shape.overlay_frame(width));
                self.top = shape.top_outline(width);
                self.bottom = shape.bottom_outline(width);
                PollableState::Modified
            }
        }
    }

    fn start(&mut self, pull_ratio: u32) {
        if let Some(attachment) = &mut self.attachment {
            attachment.wave.reset(&self.params);
            attachment.wave.set_pull_ratio(pull_ratio);
        }
        self.clear_outlines();
        self.transition(RefreshState::Animating);
        self.ticker.resume();
    }

    fn release(&mut self) {
        if let Some(attachment) = &mut self.attachment {
            attachment.wave.begin_decay();
        }
        // The transition is committed before the action runs so a misbehaving action can't leave
        // the state machine halfway through.
        self.transition(RefreshState::AnimatingToStop);
        if let Some(action) = self.action.as_mut() {
            action();
        }
    }

    fn stop(&mut self) {
        self.transition(RefreshState::Idle);
        self.ticker.pause();
        self.clear_outlines();
    }

    fn clear_outlines(&mut self) {
        self.overlay = None;
        self.top.clear();
        self.bottom.clear();
    }

    fn transition(&mut self, next: RefreshState) {
        if self.state != next {
            debug!(from = %self.state, to = %next, "refresh state changed");
            self.state = next;
        }
    }
}

impl Default for RefreshController {
    fn default() -> Self {
        Self::new(&RefreshConfig::default())
    }
}

impl fmt::Debug for RefreshController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshController")
            .field("state", &self.state)
            .field("attachment", &self.attachment)
            .field("ticker", &self.ticker)
            .field("has_action", &self.action.is_some())
            .finish_non_exhaustive()
    }
}
