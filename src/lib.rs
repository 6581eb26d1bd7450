use std::path::Path;

use image::{DynamicImage, GrayImage};

use crate::{
    analysis::{
        asymmetry::AsymmetryAnalyzer, contours::ContourAnalyzer, edges::EdgeDensityAnalyzer,
        texture::TextureAnalyzer,
    },
    detection::{MeasurementFlags, Verdict, decide},
    error::Result,
    image_utils::{to_gray, validate_dimensions},
    report::Report,
    thresholds::Thresholds,
};

pub mod analysis;
pub mod detection;
pub mod error;
pub mod image_utils;
pub mod report;
pub mod thresholds;

pub struct HeuristicAnalyzer {
    original: DynamicImage,
    thresholds: Thresholds,
}

impl HeuristicAnalyzer {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let original = image::open(&path)?;

        log::debug!(
            "Decoded {} ({}x{})",
            path.as_ref().display(),
            original.width(),
            original.height()
        );

        Ok(Self::from_image(original))
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            original: image,
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn analyze(&self) -> Result<HeuristicAnalysis> {
        let gray = to_gray(&self.original);
        analyze_gray(&gray, &self.thresholds)
    }

    pub fn report(&self) -> Result<Report> {
        self.analyze().map(|analysis| Report::from(&analysis))
    }
}

pub fn analyze_gray(gray: &GrayImage, thresholds: &Thresholds) -> Result<HeuristicAnalysis> {
    let (width, height) = gray.dimensions();
    validate_dimensions(width, height)?;

    let texture = TextureAnalyzer::new().with_thresholds(*thresholds).analyze(gray)?;
    let asymmetry = AsymmetryAnalyzer::new().with_thresholds(*thresholds).analyze(gray)?;
    let edges = EdgeDensityAnalyzer::new().with_thresholds(*thresholds).analyze(gray)?;
    let contours = ContourAnalyzer::new().with_thresholds(*thresholds).analyze(&edges.mask)?;

    let flags = MeasurementFlags {
        smooth: texture.smooth,
        asymmetric: asymmetry.asymmetric,
        consistent_edges: edges.consistent,
        unnatural: contours.unnatural,
    };
    let verdict = decide(&flags);

    log::info!(
        "Verdict for {width}x{height} image: {:?} (smooth={}, consistent_edges={}, unnatural={}, asymmetric={})",
        verdict,
        flags.smooth,
        flags.consistent_edges,
        flags.unnatural,
        flags.asymmetric
    );

    Ok(HeuristicAnalysis {
        width,
        height,
        texture,
        asymmetry,
        edges,
        contours,
        verdict,
    })
}

pub fn analyze_image<P: AsRef<Path>>(path: P) -> Result<Report> {
    HeuristicAnalyzer::new(path)?.report()
}

pub fn analyze_image_report<P: AsRef<Path>>(path: P) -> Report {
    analyze_image(&path).unwrap_or_else(|err| {
        log::warn!("Analysis of {} failed: {err}", path.as_ref().display());
        Report::from_error(&err)
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureResult {
    pub variance: f64,
    pub smooth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsymmetryResult {
    pub score: f64,
    pub asymmetric: bool,
}

#[derive(Debug, Clone)]
pub struct EdgeResult {
    pub mask: GrayImage,
    pub density: f64,
    pub consistent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourResult {
    pub contour_count: usize,
    pub area_ratio: f64,
    pub unnatural: bool,
}

#[derive(Debug, Clone)]
pub struct HeuristicAnalysis {
    pub width: u32,
    pub height: u32,
    pub texture: TextureResult,
    pub asymmetry: AsymmetryResult,
    pub edges: EdgeResult,
    pub contours: ContourResult,
    pub verdict: Verdict,
}

impl HeuristicAnalysis {
    pub fn flags(&self) -> MeasurementFlags {
        MeasurementFlags {
            smooth: self.texture.smooth,
            asymmetric: self.asymmetry.asymmetric,
            consistent_edges: self.edges.consistent,
            unnatural: self.contours.unnatural,
        }
    }
}
