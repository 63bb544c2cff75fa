use std::fmt;
use std::time::Instant;

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::Error;

use super::{blur, morphology};

/// A filter and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Mean over a `kernel x kernel` window.
    BoxBlur { kernel: u32 },
    /// 3x3 minimum, repeated.
    Erode { iterations: u32 },
    /// 3x3 maximum, repeated.
    Dilate { iterations: u32 },
}

impl FilterKind {
    pub const DEFAULT_BLUR_KERNEL: u32 = 8;
    pub const DEFAULT_ITERATIONS: u32 = 1;

    fn as_str(&self) -> &'static str {
        match self {
            Self::BoxBlur { .. } => "blur",
            Self::Erode { .. } => "erode",
            Self::Dilate { .. } => "dilate",
        }
    }
}

impl Default for FilterKind {
    fn default() -> Self {
        Self::BoxBlur {
            kernel: Self::DEFAULT_BLUR_KERNEL,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoxBlur { kernel } => write!(f, "{}={kernel}", self.as_str()),
            Self::Erode { iterations } | Self::Dilate { iterations } => {
                write!(f, "{}={iterations}", self.as_str())
            }
        }
    }
}

/// Run `kind` over `src` and return the filtered copy.
///
/// # Errors
/// Returns [`Error::Filter`] for an empty buffer or non-positive parameters.
pub fn apply_filter(src: &PixelBuffer, kind: FilterKind) -> Result<PixelBuffer, Error> {
    let started = Instant::now();
    let out = match kind {
        FilterKind::BoxBlur { kernel } => blur::box_blur(src, kernel)?,
        FilterKind::Erode { iterations } => morphology::erode(src, iterations)?,
        FilterKind::Dilate { iterations } => morphology::dilate(src, iterations)?,
    };
    debug!(
        filter = %kind,
        width = out.width(),
        height = out.height(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "filter applied"
    );
    Ok(out)
}
