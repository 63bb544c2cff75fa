//! Owned RGB8 pixel storage with an explicit row stride.

use image::RgbImage;

use crate::error::Error;

/// Bytes per pixel; channel layout is fixed to R, G, B.
pub const CHANNELS: usize = 3;

/// An owned, mutable grid of 3-channel 8-bit pixels.
///
/// `stride` is the byte distance between the starts of consecutive rows and
/// is always at least `width * 3`. Padding bytes at the end of a row are
/// carried along but never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a tightly packed buffer filled with black.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let stride = width * CHANNELS as u32;
        Self {
            width,
            height,
            stride,
            data: vec![0; stride as usize * height as usize],
        }
    }

    /// Allocate a tightly packed buffer where every pixel is `rgb`.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut buf = Self::new(width, height);
        for px in buf.data.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&rgb);
        }
        buf
    }

    /// Wrap existing bytes laid out with the given row stride.
    ///
    /// # Errors
    /// Returns [`Error::Layout`] if `stride < width * 3` or `data` is not
    /// exactly `stride * height` bytes long.
    pub fn from_raw(width: u32, height: u32, stride: u32, data: Vec<u8>) -> Result<Self, Error> {
        let min_stride = u64::from(width) * CHANNELS as u64;
        if u64::from(stride) < min_stride {
            return Err(Error::Layout(format!(
                "stride {stride} is smaller than width {width} x {CHANNELS}"
            )));
        }
        let expected = u64::from(stride) * u64::from(height);
        if data.len() as u64 != expected {
            return Err(Error::Layout(format!(
                "buffer holds {} bytes, expected {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Take ownership of a decoded `image` buffer.
    #[must_use]
    pub fn from_rgb_image(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            stride: width * CHANNELS as u32,
            data: image.into_raw(),
        }
    }

    /// Copy the visible pixels into a packed `image` buffer for encoding.
    #[must_use]
    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        let packed = if self.is_packed() {
            self.data.clone()
        } else {
            self.rows().flatten().copied().collect()
        };
        RgbImage::from_raw(self.width, self.height, packed)
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn stride(&self) -> u32 {
        self.stride
    }

    /// Whether either dimension is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether rows carry no padding.
    #[must_use]
    pub const fn is_packed(&self) -> bool {
        self.stride == self.width * CHANNELS as u32
    }

    /// Size of the owned storage in bytes, padding included.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Raw storage including row padding.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Visible bytes of row `y` (padding excluded).
    #[inline]
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride as usize;
        &self.data[start..start + self.width as usize * CHANNELS]
    }

    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride as usize;
        let len = self.width as usize * CHANNELS;
        &mut self.data[start..start + len]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.height).map(move |y| self.row(y))
    }

    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = x as usize * CHANNELS;
        let row = self.row(y);
        [row[i], row[i + 1], row[i + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = x as usize * CHANNELS;
        self.row_mut(y)[i..i + CHANNELS].copy_from_slice(&rgb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_short_stride() {
        let err = PixelBuffer::from_raw(4, 2, 11, vec![0; 22]).unwrap_err();
        assert!(matches!(err, Error::Layout(_)));
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        let err = PixelBuffer::from_raw(2, 2, 8, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::Layout(_)));
    }

    #[test]
    fn padded_rows_skip_padding() {
        // 2x2 image with 2 padding bytes per row.
        let data = vec![
            1, 2, 3, 4, 5, 6, 99, 99, //
            7, 8, 9, 10, 11, 12, 99, 99,
        ];
        let buf = PixelBuffer::from_raw(2, 2, 8, data).unwrap();
        assert!(!buf.is_packed());
        assert_eq!(buf.row(1), &[7, 8, 9, 10, 11, 12]);
        assert_eq!(buf.pixel(1, 0), [4, 5, 6]);

        let img = buf.to_rgb_image().unwrap();
        assert_eq!(img.into_raw(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn set_pixel_writes_only_target() {
        let mut buf = PixelBuffer::filled(3, 3, [255, 255, 255]);
        buf.set_pixel(1, 1, [0, 0, 0]);
        assert_eq!(buf.pixel(1, 1), [0, 0, 0]);
        assert_eq!(buf.pixel(0, 1), [255, 255, 255]);
        assert_eq!(buf.byte_len(), 27);
    }
}
