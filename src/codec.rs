//! Decode/encode boundary between the session and image files on disk.

use std::path::Path;

use image::error::{DecodingError, ImageFormatHint, ParameterError, ParameterErrorKind};
use image::{ImageError, ImageFormat, RgbImage};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::Error;
use crate::scan::ExtensionCase;

/// External codec collaborator. The session never touches image files
/// except through this trait.
pub trait Codec {
    /// Read and decode `path` into an RGB8 buffer.
    ///
    /// # Errors
    /// [`Error::Decode`] for unreadable, corrupt or unsupported files.
    fn decode(&self, path: &Path) -> Result<PixelBuffer, Error>;

    /// Encode `buffer` and write it to `path`.
    ///
    /// # Errors
    /// [`Error::Encode`] if the format is unsupported or the write fails.
    fn encode(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), Error>;
}

/// [`Codec`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl Codec for ImageCodec {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, Error> {
        let img = image::open(path).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        into_buffer(path, img.into_rgb8())
    }

    fn encode(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), Error> {
        let encode_err = |source| Error::Encode {
            path: path.to_path_buf(),
            source,
        };
        let format = ImageFormat::from_path(path).map_err(encode_err)?;
        let rgb = buffer.to_rgb_image().ok_or_else(|| {
            encode_err(ImageError::Parameter(
                ParameterError::from_kind(ParameterErrorKind::DimensionMismatch),
            ))
        })?;
        rgb.save_with_format(path, format).map_err(encode_err)?;
        debug!(path = %path.display(), ?format, "encoded");
        Ok(())
    }
}

/// A successfully loaded image always has both dimensions positive.
fn into_buffer(path: &Path, rgb: RgbImage) -> Result<PixelBuffer, Error> {
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::Decode {
            path: path.to_path_buf(),
            source: ImageError::Decoding(DecodingError::new(
                ImageFormatHint::Unknown,
                format!("image has zero extent ({width}x{height})"),
            )),
        });
    }
    debug!(path = %path.display(), width, height, "decoded");
    Ok(PixelBuffer::from_rgb_image(rgb))
}

/// Check that `path` as a whole string matches `.+\.(png|bmp|jpg)`.
///
/// # Errors
/// Returns [`Error::SaveFormat`] otherwise. Nothing is written.
pub fn validate_save_target(path: &Path, case: ExtensionCase) -> Result<(), Error> {
    let bad = || Error::SaveFormat(path.to_path_buf());
    let full = path.to_str().ok_or_else(bad)?;
    let (stem, ext) = full.rsplit_once('.').ok_or_else(bad)?;
    if stem.is_empty() || !case.matches(ext) {
        return Err(bad());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_targets() {
        let ok = |p: &str| validate_save_target(Path::new(p), ExtensionCase::Sensitive).is_ok();
        assert!(ok("out.png"));
        assert!(ok("/tmp/dir/out.bmp"));
        assert!(ok("x.jpg"));
        // Anything before the dot counts, even a directory prefix.
        assert!(ok("dir/.png"));
        assert!(!ok(".png"));
        assert!(!ok("out.gif"));
        assert!(!ok("out.jpeg"));
        assert!(!ok("out.PNG"));
        assert!(!ok("out"));
        assert!(!ok("out.png.txt"));
    }

    #[test]
    fn zero_extent_decode_is_rejected() {
        let path = Path::new("empty.png");
        for (w, h) in [(0, 5), (5, 0), (0, 0)] {
            let err = into_buffer(path, RgbImage::new(w, h)).unwrap_err();
            assert!(matches!(err, Error::Decode { .. }), "{w}x{h}");
        }
        let buf = into_buffer(path, RgbImage::new(2, 1)).unwrap();
        assert_eq!((buf.width(), buf.height()), (2, 1));
    }

    #[test]
    fn insensitive_save_targets() {
        assert!(validate_save_target(Path::new("OUT.JPG"), ExtensionCase::Insensitive).is_ok());
    }
}
