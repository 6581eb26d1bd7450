pub mod asymmetry;
pub mod contours;
pub mod edges;
pub mod texture;

use crate::error::{AnalysisError, Result};

pub(crate) fn ensure_finite(name: &str, score: f64) -> Result<f64> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(AnalysisError::MeasurementFailure(format!(
            "{name} produced a non-finite score ({score})"
        )))
    }
}
