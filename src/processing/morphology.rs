//! Grayscale morphology with a 3x3 square structuring element anchored at
//! its centre. The footprint is truncated at the image border, so edge
//! pixels only combine values that exist.

use crate::buffer::{CHANNELS, PixelBuffer};
use crate::error::Error;

use super::ensure_filterable;

/// Per-channel minimum over the 3x3 footprint, applied `iterations` times.
///
/// # Errors
/// Returns [`Error::Filter`] for an empty buffer or zero iterations.
pub fn erode(src: &PixelBuffer, iterations: u32) -> Result<PixelBuffer, Error> {
    morph(src, iterations, u8::min)
}

/// Per-channel maximum over the 3x3 footprint, applied `iterations` times.
///
/// # Errors
/// Returns [`Error::Filter`] for an empty buffer or zero iterations.
pub fn dilate(src: &PixelBuffer, iterations: u32) -> Result<PixelBuffer, Error> {
    morph(src, iterations, u8::max)
}

fn morph(src: &PixelBuffer, iterations: u32, pick: fn(u8, u8) -> u8) -> Result<PixelBuffer, Error> {
    ensure_filterable(src)?;
    if iterations == 0 {
        return Err(Error::Filter("morphology iterations must be positive".into()));
    }
    let mut out = pass(src, pick);
    for _ in 1..iterations {
        out = pass(&out, pick);
    }
    Ok(out)
}

// The truncated square footprint is separable: a row pass followed by a
// column pass gives the same result as the full 3x3 reduction.
fn pass(src: &PixelBuffer, pick: fn(u8, u8) -> u8) -> PixelBuffer {
    let width = src.width() as usize;
    let height = src.height() as usize;
    let row_len = width * CHANNELS;

    let mut rows = vec![0u8; row_len * height];
    for y in 0..height {
        let row = src.row(y as u32);
        let out = &mut rows[y * row_len..(y + 1) * row_len];
        for x in 0..width {
            let lo = x.saturating_sub(1);
            let hi = (x + 1).min(width - 1);
            for c in 0..CHANNELS {
                let mut v = row[lo * CHANNELS + c];
                for sx in lo + 1..=hi {
                    v = pick(v, row[sx * CHANNELS + c]);
                }
                out[x * CHANNELS + c] = v;
            }
        }
    }

    let mut dst = PixelBuffer::new(src.width(), src.height());
    for y in 0..height {
        let lo = y.saturating_sub(1);
        let hi = (y + 1).min(height - 1);
        let out = dst.row_mut(y as u32);
        out.copy_from_slice(&rows[lo * row_len..(lo + 1) * row_len]);
        for sy in lo + 1..=hi {
            let other = &rows[sy * row_len..(sy + 1) * row_len];
            for (o, &v) in out.iter_mut().zip(other) {
                *o = pick(*o, v);
            }
        }
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 3] = [255, 255, 255];
    const BLACK: [u8; 3] = [0, 0, 0];

    fn black_pixels(buf: &PixelBuffer) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                if buf.pixel(x, y) == BLACK {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn erode_grows_single_black_pixel_to_square() {
        let mut src = PixelBuffer::filled(7, 7, WHITE);
        src.set_pixel(3, 3, BLACK);
        let out = erode(&src, 1).unwrap();
        let expected: Vec<(u32, u32)> = (2..=4)
            .flat_map(|y| (2..=4).map(move |x| (x, y)))
            .collect();
        assert_eq!(black_pixels(&out), expected);
        assert_eq!(out.pixel(0, 0), WHITE);
        assert_eq!(out.pixel(6, 6), WHITE);
    }

    #[test]
    fn iterations_compose_sequentially() {
        let mut src = PixelBuffer::filled(9, 9, WHITE);
        src.set_pixel(4, 4, BLACK);
        let twice = erode(&src, 2).unwrap();
        let chained = erode(&erode(&src, 1).unwrap(), 1).unwrap();
        assert_eq!(twice, chained);
        assert_eq!(black_pixels(&twice).len(), 25);
    }

    #[test]
    fn footprint_is_truncated_at_corner() {
        let mut src = PixelBuffer::filled(4, 4, BLACK);
        src.set_pixel(0, 0, [200, 10, 30]);
        let out = dilate(&src, 1).unwrap();
        assert_eq!(out.pixel(0, 0), [200, 10, 30]);
        assert_eq!(out.pixel(1, 1), [200, 10, 30]);
        assert_eq!(out.pixel(2, 2), BLACK);
    }

    #[test]
    fn opening_and_closing_bound_the_input() {
        // Black 3x3 block plus an isolated black speck.
        let mut src = PixelBuffer::filled(10, 10, WHITE);
        for y in 2..5 {
            for x in 2..5 {
                src.set_pixel(x, y, BLACK);
            }
        }
        src.set_pixel(8, 8, BLACK);
        let before = black_pixels(&src);

        // Opening of the white set: white shrinks, so black only grows.
        let opened = dilate(&erode(&src, 1).unwrap(), 1).unwrap();
        let opened_black = black_pixels(&opened);
        for p in &before {
            assert!(opened_black.contains(p), "{p:?} lost");
        }

        // Closing of the white set: black only shrinks, specks vanish.
        let closed = erode(&dilate(&src, 1).unwrap(), 1).unwrap();
        let closed_black = black_pixels(&closed);
        for p in &closed_black {
            assert!(before.contains(p), "{p:?} became black");
        }
        assert!(!closed_black.contains(&(8, 8)));
        assert!(closed_black.contains(&(3, 3)));
    }

    #[test]
    fn zero_iterations_rejected() {
        let src = PixelBuffer::filled(2, 2, WHITE);
        assert!(matches!(erode(&src, 0), Err(Error::Filter(_))));
        assert!(matches!(dilate(&PixelBuffer::new(3, 0), 1), Err(Error::Filter(_))));
    }
}
