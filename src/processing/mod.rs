//! Pixel filters. Every filter reads a borrowed buffer and returns a fresh
//! one of the same dimensions; inputs are never modified.

pub mod blur;
pub mod filters;
pub mod morphology;

pub use filters::{FilterKind, apply_filter};

use crate::buffer::PixelBuffer;
use crate::error::Error;

fn ensure_filterable(buf: &PixelBuffer) -> Result<(), Error> {
    if buf.is_empty() {
        return Err(Error::Filter(format!(
            "cannot filter an empty {}x{} buffer",
            buf.width(),
            buf.height()
        )));
    }
    Ok(())
}

#[inline(always)]
fn clamp_index(value: i64, len: usize) -> usize {
    value.clamp(0, len as i64 - 1) as usize
}
