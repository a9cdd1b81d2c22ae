use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Tuning knobs for the wave simulation.
///
/// The defaults reproduce the classic "breathing" wave: the shaping ratio oscillates between
/// `min_variable` and `max_variable` while the user holds the pull, and decays to zero at
/// `max_step` per frame once the refresh is triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveParams {
    /// Upper bound of the shaping ratio. Also used for the overlay height.
    pub max_variable: f64,

    /// Below this the ratio starts growing again, unless the wave is stopping.
    pub min_variable: f64,

    /// Ratio change per frame while oscillating.
    pub min_step: f64,

    /// Ratio change per frame while decaying towards idle.
    pub max_step: f64,

    /// Phase increment per frame, in radians.
    pub speed: f64,

    /// Points of pull distance per pull ratio step.
    pub pull_step: f64,

    /// Cap applied to the pull ratio before computing the amplitude.
    pub max_pull_ratio: u32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            max_variable: 1.6,
            min_variable: 1.0,
            min_step: 0.01,
            max_step: 0.05,
            speed: 0.5 / PI,
            pull_step: 10.0,
            max_pull_ratio: 7,
        }
    }
}

impl WaveParams {
    /// Maps a pull distance into a pull ratio step.
    ///
    /// Negative distances (the list is scrolled into its content) always map to 0. The result is
    /// not capped; the cap is applied when the amplitude is computed.
    pub fn pull_ratio(&self, pull_distance: f64) -> u32 {
        if pull_distance < 0.0 || !pull_distance.is_finite() {
            return 0;
        }
        let steps = (pull_distance / self.pull_step).floor();
        // Saturating float to int cast keeps absurd distances at u32::MAX.
        (steps as u32).saturating_add(1)
    }

    /// The maximum number of ticks a decay starting at `variable` can take.
    pub fn decay_ticks(&self, variable: f64) -> u32 {
        (variable / self.max_step).ceil().max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1)]
    #[case(9.99, 1)]
    #[case(10.0, 2)]
    #[case(35.0, 4)]
    #[case(60.0, 7)]
    #[case(250.0, 26)]
    #[case(-0.5, 0)]
    #[case(-5.0, 0)]
    #[case(f64::NAN, 0)]
    fn pull_ratio(#[case] distance: f64, #[case] expected: u32) {
        assert_eq!(WaveParams::default().pull_ratio(distance), expected);
    }

    #[test]
    fn full_decay_bound() {
        assert_eq!(WaveParams::default().decay_ticks(1.6), 32);
    }

    #[test]
    fn speed() {
        let params = WaveParams::default();
        assert!((params.speed - 0.159_154_943).abs() < 1e-9);
    }
}
