use super::outline::{Surface, WaveShape};
use super::params::WaveParams;

/// What happened to the wave after advancing it one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The wave is still visible.
    Running,
    /// The shaping ratio hit zero: nothing left to draw.
    Exhausted,
}

/// The physical state of the wave.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveState {
    /// Current peak height, `variable * pull_ratio`.
    amplitude: f64,
    /// Bounded oscillator shaping the amplitude.
    variable: f64,
    /// Whether `variable` is currently growing.
    increasing: bool,
    /// Cumulative horizontal shift, in radians.
    phase: f64,
    /// Vertical offset of the wave's center line.
    baseline: f64,
    /// Pull distance step, uncapped until the next frame.
    pull_ratio: u32,
    /// Half the overlay height.
    height: f64,
}

impl WaveState {
    pub fn new(params: &WaveParams) -> Self {
        Self {
            amplitude: params.max_variable,
            variable: params.max_variable,
            increasing: false,
            phase: 0.0,
            baseline: 0.0,
            pull_ratio: 1,
            height: 0.0,
        }
    }

    pub fn reset(&mut self, params: &WaveParams) {
        *self = Self::new(params);
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn variable(&self) -> f64 {
        self.variable
    }

    pub fn increasing(&self) -> bool {
        self.increasing
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn pull_ratio(&self) -> u32 {
        self.pull_ratio
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_pull_ratio(&mut self, pull_ratio: u32) {
        self.pull_ratio = pull_ratio;
    }

    /// Starts the irreversible decay towards zero.
    pub fn begin_decay(&mut self) {
        self.increasing = false;
    }

    /// Advances the wave by one frame.
    ///
    /// While `decaying` the ratio shrinks by `max_step` each frame and never turns around; otherwise
    /// it bounces between `min_variable` and `max_variable` at `min_step` per frame.
    pub fn advance(&mut self, params: &WaveParams, decaying: bool) -> Advance {
        if self.increasing {
            self.variable += params.min_step;
        } else {
            let step = if decaying { params.max_step } else { params.min_step };
            self.variable -= step;
            if self.variable <= 0.0 {
                self.variable = 0.0;
                self.amplitude = 0.0;
                return Advance::Exhausted;
            }
        }
        if self.variable <= params.min_variable {
            self.increasing = !decaying;
        }
        if self.variable >= params.max_variable {
            self.variable = params.max_variable;
            self.increasing = false;
        }

        self.pull_ratio = self.pull_ratio.min(params.max_pull_ratio);
        let pull_ratio = f64::from(self.pull_ratio);
        self.amplitude = self.variable * pull_ratio;
        self.height = params.max_variable * pull_ratio;

        self.phase += params.speed;
        self.baseline = 2.0 * self.height - self.amplitude;
        Advance::Running
    }

    pub fn shape(&self, surface: &Surface) -> WaveShape {
        WaveShape {
            amplitude: self.amplitude,
            cycle: surface.cycle(),
            phase: self.phase,
            baseline: self.baseline,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn params() -> WaveParams {
        WaveParams::default()
    }

    #[test]
    fn defaults() {
        let state = WaveState::new(&params());
        assert_eq!(state.variable(), 1.6);
        assert_eq!(state.amplitude(), 1.6);
        assert!(!state.increasing());
        assert_eq!(state.pull_ratio(), 1);
    }

    #[test]
    fn oscillates_between_bounds() {
        let params = params();
        let mut state = WaveState::new(&params);
        let mut ticks = 0;
        while !state.increasing() {
            let before = state.variable();
            assert_eq!(state.advance(&params, false), Advance::Running);
            assert!((before - state.variable() - 0.01).abs() < EPSILON);
            ticks += 1;
        }
        assert_eq!(ticks, 60);
        assert!(state.variable() <= 1.0);

        let mut ticks = 0;
        while state.increasing() {
            let before = state.variable();
            state.advance(&params, false);
            let after = state.variable();
            assert!(after > before);
            ticks += 1;
            assert!(ticks < 100, "never flipped back");
        }
        assert!(state.variable() >= 1.6 - EPSILON);
        assert!(state.variable() <= 1.6);
    }

    #[test]
    fn increases_by_min_step() {
        let params = params();
        let mut state = WaveState::new(&params);
        state.variable = 1.2;
        state.increasing = true;
        state.advance(&params, false);
        assert!((state.variable() - 1.21).abs() < EPSILON);
        assert!(state.increasing());
    }

    #[test]
    fn decay_is_monotonic() {
        let params = params();
        let mut state = WaveState::new(&params);
        state.begin_decay();
        let mut previous = state.variable();
        let mut ticks = 0;
        loop {
            ticks += 1;
            match state.advance(&params, true) {
                Advance::Running => {
                    assert!((previous - state.variable() - 0.05).abs() < EPSILON);
                    assert!(!state.increasing());
                    previous = state.variable();
                }
                Advance::Exhausted => break,
            }
        }
        assert_eq!(ticks, 32);
        assert_eq!(state.amplitude(), 0.0);
    }

    #[test]
    fn amplitude_and_height() {
        let params = params();
        let mut state = WaveState::new(&params);
        state.set_pull_ratio(12);
        state.variable = 1.59;
        state.increasing = true;
        state.advance(&params, false);

        assert_eq!(state.pull_ratio(), 7);
        assert!((state.amplitude() - 11.2).abs() < EPSILON);
        assert!((state.height() - 11.2).abs() < EPSILON);
        assert!((2.0 * state.height() - 22.4).abs() < EPSILON);
        assert!((state.baseline() - 11.2).abs() < EPSILON);
    }

    #[test]
    fn phase_accumulates() {
        let params = params();
        let mut state = WaveState::new(&params);
        for _ in 0..10 {
            state.advance(&params, false);
        }
        assert!((state.phase() - 10.0 * params.speed).abs() < EPSILON);
    }

    #[test]
    fn zero_pull_ratio_flattens_wave() {
        let params = params();
        let mut state = WaveState::new(&params);
        state.set_pull_ratio(0);
        state.advance(&params, false);
        assert_eq!(state.amplitude(), 0.0);
        assert_eq!(state.height(), 0.0);
    }
}
