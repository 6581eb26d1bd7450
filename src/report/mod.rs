use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{HeuristicAnalysis, detection::yes_no, error::AnalysisError};

pub const TEXTURE_LABEL: &str = "Hyperrealistic/Synthetic Aesthetics";
pub const EDGE_LABEL: &str = "Overly Consistent Details";
pub const ASYMMETRY_LABEL: &str = "Asymmetric/Distorted Features";
pub const CONTOUR_LABEL: &str = "Unnatural Features/Artifacts";
pub const VERDICT_LABEL: &str = "AI Generated?";
pub const ERROR_LABEL: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    entries: Vec<(String, String)>,
}

impl Report {
    pub fn from_error(error: &AnalysisError) -> Self {
        Self {
            entries: vec![(
                ERROR_LABEL.to_string(),
                format!("Failed to analyze image: {error}"),
            )],
        }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_error(&self) -> bool {
        self.get(ERROR_LABEL).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&HeuristicAnalysis> for Report {
    fn from(analysis: &HeuristicAnalysis) -> Self {
        let entries = vec![
            (
                TEXTURE_LABEL.to_string(),
                format!(
                    "{} (Laplacian Variance: {:.2})",
                    yes_no(analysis.texture.smooth),
                    analysis.texture.variance
                ),
            ),
            (
                EDGE_LABEL.to_string(),
                format!(
                    "{} (Edge Density: {:.4})",
                    yes_no(analysis.edges.consistent),
                    analysis.edges.density
                ),
            ),
            (
                ASYMMETRY_LABEL.to_string(),
                format!(
                    "{} (Asymmetry Score: {:.2})",
                    yes_no(analysis.asymmetry.asymmetric),
                    analysis.asymmetry.score
                ),
            ),
            (
                CONTOUR_LABEL.to_string(),
                format!(
                    "{} (Contour Area Ratio: {:.4})",
                    yes_no(analysis.contours.unnatural),
                    analysis.contours.area_ratio
                ),
            ),
            (
                VERDICT_LABEL.to_string(),
                analysis.verdict.as_yes_no().to_string(),
            ),
        ];

        Self { entries }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.entries {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
pub struct JsonReport {
    pub width: u32,
    pub height: u32,
    pub ai_generated: bool,
    pub texture: TextureReportSection,
    pub asymmetry: AsymmetryReportSection,
    pub edges: EdgeReportSection,
    pub contours: ContourReportSection,
}

#[derive(Serialize)]
pub struct TextureReportSection {
    pub laplacian_variance: f64,
    pub smooth: bool,
}

#[derive(Serialize)]
pub struct AsymmetryReportSection {
    pub score: f64,
    pub asymmetric: bool,
    pub counts_toward_verdict: bool,
}

#[derive(Serialize)]
pub struct EdgeReportSection {
    pub density: f64,
    pub consistent: bool,
}

#[derive(Serialize)]
pub struct ContourReportSection {
    pub external_contours: usize,
    pub area_ratio: f64,
    pub unnatural: bool,
}

impl From<&HeuristicAnalysis> for JsonReport {
    fn from(analysis: &HeuristicAnalysis) -> Self {
        Self {
            width: analysis.width,
            height: analysis.height,
            ai_generated: analysis.verdict.is_ai_generated(),
            texture: TextureReportSection {
                laplacian_variance: analysis.texture.variance,
                smooth: analysis.texture.smooth,
            },
            asymmetry: AsymmetryReportSection {
                score: analysis.asymmetry.score,
                asymmetric: analysis.asymmetry.asymmetric,
                counts_toward_verdict: false,
            },
            edges: EdgeReportSection {
                density: analysis.edges.density,
                consistent: analysis.edges.consistent,
            },
            contours: ContourReportSection {
                external_contours: analysis.contours.contour_count,
                area_ratio: analysis.contours.area_ratio,
                unnatural: analysis.contours.unnatural,
            },
        }
    }
}

impl JsonReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AsymmetryResult, ContourResult, EdgeResult, TextureResult, detection::Verdict,
    };
    use image::GrayImage;

    fn sample() -> HeuristicAnalysis {
        HeuristicAnalysis {
            width: 640,
            height: 480,
            texture: TextureResult {
                variance: 123.456,
                smooth: false,
            },
            asymmetry: AsymmetryResult {
                score: 1500.0,
                asymmetric: true,
            },
            edges: EdgeResult {
                mask: GrayImage::new(1, 1),
                density: 0.04567,
                consistent: true,
            },
            contours: ContourResult {
                contour_count: 3,
                area_ratio: 0.00123,
                unnatural: false,
            },
            verdict: Verdict::NotAiGenerated,
        }
    }

    #[test]
    fn test_entries_in_order() {
        let report = Report::from(&sample());
        let labels = report.entries().iter().map(|(l, _)| l.as_str()).collect::<Vec<_>>();

        assert_eq!(
            labels,
            [TEXTURE_LABEL, EDGE_LABEL, ASYMMETRY_LABEL, CONTOUR_LABEL, VERDICT_LABEL]
        );
        assert!(!report.is_error());
    }

    #[test]
    fn test_entry_formatting() {
        let report = Report::from(&sample());

        assert_eq!(report.get(TEXTURE_LABEL), Some("No (Laplacian Variance: 123.46)"));
        assert_eq!(report.get(EDGE_LABEL), Some("Yes (Edge Density: 0.0457)"));
        assert_eq!(report.get(ASYMMETRY_LABEL), Some("Yes (Asymmetry Score: 1500.00)"));
        assert_eq!(report.get(CONTOUR_LABEL), Some("No (Contour Area Ratio: 0.0012)"));
        assert_eq!(report.get(VERDICT_LABEL), Some("No"));
    }

    #[test]
    fn test_display_one_line_per_entry() {
        let text = Report::from(&sample()).to_string();
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[4], "AI Generated?: No");
    }

    #[test]
    fn test_error_report() {
        let error = AnalysisError::InvalidDimensions { width: 0, height: 3 };
        let report = Report::from_error(&error);

        assert_eq!(report.len(), 1);
        assert!(report.is_error());
        assert_eq!(
            report.get(ERROR_LABEL),
            Some("Failed to analyze image: Invalid image dimensions: 0x3")
        );
    }

    #[test]
    fn test_json_keeps_entry_order() {
        let json = Report::from(&sample()).to_json().unwrap();

        let texture = json.find(TEXTURE_LABEL).unwrap();
        let edges = json.find(EDGE_LABEL).unwrap();
        let verdict = json.find(VERDICT_LABEL).unwrap();
        assert!(texture < edges && edges < verdict);
    }

    #[test]
    fn test_json_report_sections() {
        let json = JsonReport::from(&sample()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["ai_generated"], false);
        assert_eq!(value["asymmetry"]["asymmetric"], true);
        assert_eq!(value["asymmetry"]["counts_toward_verdict"], false);
        assert_eq!(value["contours"]["external_contours"], 3);
        assert_eq!(value["width"], 640);
    }
}
