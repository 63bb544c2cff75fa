use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::processing::FilterKind;
use crate::scan::ExtensionCase;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Window size for the default box blur.
    pub blur_kernel: u32,
    /// Passes for the default erode/dilate.
    pub morphology_iterations: u32,
    /// Factor applied by zoom-in; zoom-out uses the reciprocal.
    pub zoom_step: f64,
    /// Extension matching for navigation and save validation.
    pub extension_case: ExtensionCase,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate invariants that serde defaults cannot express.
    pub fn validated(self) -> Result<Self> {
        ensure!(self.blur_kernel > 0, "blur-kernel must be greater than zero");
        ensure!(
            self.morphology_iterations > 0,
            "morphology-iterations must be greater than zero"
        );
        ensure!(
            self.zoom_step.is_finite() && self.zoom_step > 0.0,
            "zoom-step must be a positive number"
        );
        ensure!(
            (self.zoom_step - 1.0).abs() > f64::EPSILON,
            "zoom-step must not be 1.0"
        );
        Ok(self)
    }

    pub fn box_blur(&self) -> FilterKind {
        FilterKind::BoxBlur {
            kernel: self.blur_kernel,
        }
    }

    pub fn erode(&self) -> FilterKind {
        FilterKind::Erode {
            iterations: self.morphology_iterations,
        }
    }

    pub fn dilate(&self) -> FilterKind {
        FilterKind::Dilate {
            iterations: self.morphology_iterations,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            blur_kernel: FilterKind::DEFAULT_BLUR_KERNEL,
            morphology_iterations: FilterKind::DEFAULT_ITERATIONS,
            zoom_step: 1.2,
            extension_case: ExtensionCase::default(),
        }
    }
}
