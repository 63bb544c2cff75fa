use crate::buffer::{CHANNELS, PixelBuffer};
use crate::error::Error;

use super::{clamp_index, ensure_filterable};

/// Largest kernel whose row sums still fit a `u32` per channel.
pub const MAX_BLUR_KERNEL: u32 = u32::MAX / u8::MAX as u32;

/// Box blur with a `kernel x kernel` window and replicated edges.
///
/// Each output channel is the truncated integer mean of the window. For an
/// even kernel the window spans `kernel / 2` pixels before the centre and
/// `kernel / 2 - 1` after it.
///
/// # Errors
/// Returns [`Error::Filter`] for an empty buffer, a zero kernel, or a kernel
/// above [`MAX_BLUR_KERNEL`].
pub fn box_blur(src: &PixelBuffer, kernel: u32) -> Result<PixelBuffer, Error> {
    ensure_filterable(src)?;
    if kernel == 0 {
        return Err(Error::Filter("box blur kernel must be positive".into()));
    }
    if kernel > MAX_BLUR_KERNEL {
        return Err(Error::Filter(format!(
            "box blur kernel {kernel} exceeds {MAX_BLUR_KERNEL}"
        )));
    }

    let width = src.width() as usize;
    let height = src.height() as usize;
    let before = i64::from(kernel / 2);
    let after = i64::from(kernel - 1) - before;

    // Horizontal window sums, one u32 per channel.
    let mut sums = vec![0u32; width * height * CHANNELS];
    for y in 0..height {
        let row = src.row(y as u32);
        let out = &mut sums[y * width * CHANNELS..(y + 1) * width * CHANNELS];
        for x in 0..width {
            let mut acc = [0u32; CHANNELS];
            for dx in -before..=after {
                let sx = clamp_index(x as i64 + dx, width) * CHANNELS;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u32::from(row[sx + c]);
                }
            }
            out[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&acc);
        }
    }

    let area = u64::from(kernel) * u64::from(kernel);
    let mut dst = PixelBuffer::new(src.width(), src.height());
    for y in 0..height {
        let out = dst.row_mut(y as u32);
        for x in 0..width {
            let mut acc = [0u64; CHANNELS];
            for dy in -before..=after {
                let base = (clamp_index(y as i64 + dy, height) * width + x) * CHANNELS;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(sums[base + c]);
                }
            }
            for (c, a) in acc.iter().enumerate() {
                out[x * CHANNELS + c] = (a / area) as u8;
            }
        }
    }
    Ok(dst)
}
