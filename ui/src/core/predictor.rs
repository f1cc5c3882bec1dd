//! What-if grade predictor driven by the four feature sliders.
//!
//! Slider values are standardized feature scores. The model is a fixed linear
//! combination; nothing is trained or persisted here.

use serde::Serialize;

/// Number of slider-driven features.
pub const FEATURE_COUNT: usize = 4;

/// Weights for the slider features, in dimension order.
pub const COEFFICIENTS: [f64; FEATURE_COUNT] = [2.9036, -2.5664, 8.7647, 7.1487];

pub const INTERCEPT: f64 = 0.0;

/// The standardized score is clamped to this band before display.
pub const SCORE_MIN: f64 = -3.0;
pub const SCORE_MAX: f64 = 3.0;

/// Slider widget bounds (standardized units).
pub const SLIDER_MIN: f64 = -3.0;
pub const SLIDER_MAX: f64 = 3.0;
pub const SLIDER_STEP: f64 = 0.01;

/// Dimension name of the predicted score column.
pub const PREDICTED_GRADE: &str = "Predicted Grade(%)";

/// Dimensions the sliders drive, in coefficient order.
pub const SLIDER_DIMENSIONS: [&str; FEATURE_COUNT] = ["ACC(g)", "EDA(μS)", "HR(bpm)", "TEMP(°C)"];

/// Affine transform from standardized units back to display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rescale {
    pub scale: f64,
    pub offset: f64,
}

impl Rescale {
    pub const IDENTITY: Rescale = Rescale {
        scale: 1.0,
        offset: 0.0,
    };

    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }
}

const RESCALES: [(&str, Rescale); 5] = [
    (
        "ACC(g)",
        Rescale {
            scale: 0.14270464592483886,
            offset: 9.891585443886743,
        },
    ),
    (
        "EDA(μS)",
        Rescale {
            scale: 0.2103479494358205,
            offset: 0.3780802288827161,
        },
    ),
    (
        "HR(bpm)",
        Rescale {
            scale: 14.972807995059702,
            offset: 97.57604506172838,
        },
    ),
    (
        "TEMP(°C)",
        Rescale {
            scale: 3.577973304894227,
            offset: 29.48904200617284,
        },
    ),
    (
        PREDICTED_GRADE,
        Rescale {
            scale: 7.04112564211788,
            offset: 75.25000000000001,
        },
    ),
];

/// Display transform for a dimension; unknown dimensions are left untouched.
pub fn rescale_for(dimension: &str) -> Rescale {
    RESCALES
        .iter()
        .find(|(name, _)| *name == dimension)
        .map(|(_, rescale)| *rescale)
        .unwrap_or(Rescale::IDENTITY)
}

/// Current slider positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PredictionInput {
    pub values: [f64; FEATURE_COUNT],
}

impl PredictionInput {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Raw slider text; anything unparsable counts as zero.
    pub fn from_slider_text<S: AsRef<str>>(raw: &[S; FEATURE_COUNT]) -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, text) in values.iter_mut().zip(raw.iter()) {
            *slot = parse_slider(text.as_ref());
        }
        Self { values }
    }

    /// Replace one slider value, keeping the rest.
    pub fn with_value(mut self, index: usize, raw: &str) -> Self {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = parse_slider(raw);
        }
        self
    }
}

fn parse_slider(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionOutput {
    /// Linear combination before clamping.
    pub raw_score: f64,
    /// Score clamped to `[SCORE_MIN, SCORE_MAX]`.
    pub score: f64,
    /// `score` in display units (percent).
    pub grade_percent: f64,
}

pub fn predict(input: &PredictionInput) -> PredictionOutput {
    let raw_score = input
        .values
        .iter()
        .zip(COEFFICIENTS.iter())
        .fold(INTERCEPT, |acc, (value, weight)| acc + value * weight);
    let score = raw_score.clamp(SCORE_MIN, SCORE_MAX);
    let grade_percent = rescale_for(PREDICTED_GRADE).apply(score);

    PredictionOutput {
        raw_score,
        score,
        grade_percent,
    }
}

/// Overlay line values: sliders on the first dimensions, the clamped score on
/// every dimension after them.
pub fn overlay_values(
    dimension_count: usize,
    input: &PredictionInput,
    output: &PredictionOutput,
) -> Vec<f64> {
    (0..dimension_count)
        .map(|index| input.values.get(index).copied().unwrap_or(output.score))
        .collect()
}
