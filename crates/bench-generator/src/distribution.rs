//! Value distributions driving simulated metrics.
//!
//! Every metric field owns one [`Distribution`]. On each simulated tick the
//! distribution is advanced once with the simulator's seeded RNG and its
//! current state becomes the field value.

use rand::Rng;
use rand_distr::{Distribution as RandDistribution, StandardNormal};

/// Step size drawn on every advance of a random walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Gaussian step with the given mean and standard deviation.
    Normal { mean: f64, std_dev: f64 },

    /// Uniform step in `[low, high)`.
    Uniform { low: f64, high: f64 },
}

impl Step {
    pub fn normal(mean: f64, std_dev: f64) -> Self {
        Self::Normal { mean, std_dev }
    }

    pub fn uniform(low: f64, high: f64) -> Self {
        Self::Uniform { low, high }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Step::Normal { mean, std_dev } => {
                let z: f64 = StandardNormal.sample(rng);
                mean + std_dev * z
            }
            Step::Uniform { low, high } => {
                if high > low {
                    rng.gen_range(low..high)
                } else {
                    low
                }
            }
        }
    }
}

/// Stateful value generator for one metric field.
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    /// Never changes.
    Constant(f64),

    /// Random walk whose state is clamped to `[min, max]` after every step.
    ClampedRandomWalk {
        step: Step,
        min: f64,
        max: f64,
        state: f64,
    },

    /// Random walk that only moves upwards (absolute value of each step).
    MonotonicRandomWalk { step: Step, state: f64 },
}

impl Distribution {
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    pub fn clamped(step: Step, min: f64, max: f64, initial: f64) -> Self {
        Self::ClampedRandomWalk {
            step,
            min,
            max,
            state: initial.clamp(min, max),
        }
    }

    pub fn monotonic(step: Step, initial: f64) -> Self {
        Self::MonotonicRandomWalk {
            step,
            state: initial,
        }
    }

    /// Move the distribution one step forward.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            Distribution::Constant(_) => {}
            Distribution::ClampedRandomWalk {
                step,
                min,
                max,
                state,
            } => {
                *state = (*state + step.sample(rng)).clamp(*min, *max);
            }
            Distribution::MonotonicRandomWalk { step, state } => {
                *state += step.sample(rng).abs();
            }
        }
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        match *self {
            Distribution::Constant(v) => v,
            Distribution::ClampedRandomWalk { state, .. } => state,
            Distribution::MonotonicRandomWalk { state, .. } => state,
        }
    }
}
