//! Clamped piecewise-linear interpolation

use thiserror::Error;

/// Invalid animation setup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    #[error("Input range has {input} points but output range has {output}")]
    RangeLengthMismatch { input: usize, output: usize },

    #[error("Interpolation needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("Input range must be strictly increasing")]
    NotIncreasing,

    #[error("Range contains a non-finite value")]
    NonFinite,

    #[error("Invalid nav bar config: {0}")]
    InvalidConfig(String),
}

/// Maps an input range onto an output range, clamping at both ends
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    input: Vec<f32>,
    output: Vec<f32>,
}

impl Interpolation {
    pub fn new(input: &[f32], output: &[f32]) -> Result<Self, MotionError> {
        if input.len() != output.len() {
            return Err(MotionError::RangeLengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }
        if input.len() < 2 {
            return Err(MotionError::TooFewPoints(input.len()));
        }
        if input.iter().chain(output).any(|v| !v.is_finite()) {
            return Err(MotionError::NonFinite);
        }
        if input.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MotionError::NotIncreasing);
        }

        Ok(Self {
            input: input.to_vec(),
            output: output.to_vec(),
        })
    }

    pub fn map(&self, x: f32) -> f32 {
        let last = self.input.len() - 1;
        if x.is_nan() || x <= self.input[0] {
            return self.output[0];
        }
        if x >= self.input[last] {
            return self.output[last];
        }

        // First segment whose upper bound reaches x
        let i = self
            .input
            .windows(2)
            .position(|w| x <= w[1])
            .unwrap_or(last - 1);

        let (x0, x1) = (self.input[i], self.input[i + 1]);
        let (y0, y1) = (self.output[i], self.output[i + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}
