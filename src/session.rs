//! The image session: current file, its pixels, and the zoom factor.
//!
//! All operations are synchronous and leave the session untouched when they
//! fail. A successful `open` or `navigate` replaces path and buffer together
//! and resets zoom; `apply_filter` swaps in a new buffer only.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::codec::{Codec, ImageCodec, validate_save_target};
use crate::config::Configuration;
use crate::error::Error;
use crate::events::{Command, Outcome};
use crate::processing::{FilterKind, apply_filter};
use crate::scan::{Direction, Navigator, Step};

/// Observable lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing loaded yet.
    Empty,
    /// Buffer is exactly what was decoded from the current path.
    Loaded,
    /// At least one filter has replaced the buffer since loading.
    Modified,
}

/// Result of a navigation request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The neighbor at this path is now the current image.
    Moved(PathBuf),
    /// No file exists in that direction; nothing changed.
    AtBoundary(Direction),
}

/// Data the UI needs for a status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Size of the file on disk, if it could be read.
    pub file_bytes: Option<u64>,
}

impl fmt::Display for ImageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}x{}", self.path.display(), self.width, self.height)?;
        if let Some(bytes) = self.file_bytes {
            write!(f, ", {bytes} Bytes")?;
        }
        Ok(())
    }
}

// Path and buffer live together so one cannot exist without the other.
#[derive(Debug)]
struct Current {
    path: PathBuf,
    buffer: PixelBuffer,
    modified: bool,
}

#[derive(Debug)]
pub struct ImageSession<C = ImageCodec> {
    codec: C,
    navigator: Navigator,
    zoom_step: f64,
    current: Option<Current>,
    zoom: f64,
}

impl ImageSession<ImageCodec> {
    /// Session using the `image`-crate codec.
    #[must_use]
    pub fn new(cfg: &Configuration) -> Self {
        Self::with_codec(ImageCodec, cfg)
    }
}

impl<C: Codec> ImageSession<C> {
    #[must_use]
    pub fn with_codec(codec: C, cfg: &Configuration) -> Self {
        Self {
            codec,
            navigator: Navigator::new(cfg.extension_case),
            zoom_step: cfg.zoom_step,
            current: None,
            zoom: 1.0,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.current {
            None => SessionState::Empty,
            Some(c) if c.modified => SessionState::Modified,
            Some(_) => SessionState::Loaded,
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.current.as_ref().map(|c| c.path.as_path())
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.current.as_ref().map(|c| &c.buffer)
    }

    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub const fn codec(&self) -> &C {
        &self.codec
    }

    #[must_use]
    pub fn summary(&self) -> Option<ImageSummary> {
        self.current.as_ref().map(|c| ImageSummary {
            path: c.path.clone(),
            width: c.buffer.width(),
            height: c.buffer.height(),
            file_bytes: std::fs::metadata(&c.path).ok().map(|m| m.len()),
        })
    }

    /// Decode `path` and make it the current image.
    ///
    /// # Errors
    /// Propagates the codec's [`Error::Decode`]; the session is unchanged.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let buffer = self.codec.decode(path)?;
        self.current = Some(Current {
            path: path.to_path_buf(),
            buffer,
            modified: false,
        });
        self.zoom = 1.0;
        debug!(path = %path.display(), "opened");
        Ok(())
    }

    /// Move to the previous or next image in the current directory.
    ///
    /// # Errors
    /// [`Error::NoImageLoaded`] on an empty session, listing errors from the
    /// navigator, or the decode error of the neighbor.
    pub fn navigate(&mut self, direction: Direction) -> Result<Navigation, Error> {
        let current = self.path().ok_or(Error::NoImageLoaded)?;
        let listing = self.navigator.list(current)?;
        let index = listing.locate(current)?;
        let target = match listing.step(index, direction) {
            Step::Neighbor(name) => listing.path_of(name),
            Step::AtBoundary => {
                debug!(?direction, index, "navigation at boundary");
                return Ok(Navigation::AtBoundary(direction));
            }
        };
        self.open(&target)?;
        Ok(Navigation::Moved(target))
    }

    /// Replace the current buffer with its filtered copy.
    ///
    /// # Errors
    /// [`Error::NoImageLoaded`] before any filtering work on an empty
    /// session; [`Error::Filter`] keeps the previous buffer.
    pub fn apply_filter(&mut self, kind: FilterKind) -> Result<(), Error> {
        let current = self.current.as_mut().ok_or(Error::NoImageLoaded)?;
        current.buffer = apply_filter(&current.buffer, kind)?;
        current.modified = true;
        Ok(())
    }

    /// Encode the current buffer to `target`.
    ///
    /// # Errors
    /// [`Error::NoImageLoaded`], then [`Error::SaveFormat`] for a bad target
    /// name before anything is written, then the codec's encode error.
    pub fn save(&self, target: impl AsRef<Path>) -> Result<(), Error> {
        let target = target.as_ref();
        let current = self.current.as_ref().ok_or(Error::NoImageLoaded)?;
        validate_save_target(target, self.navigator.extension_case())?;
        self.codec.encode(&current.buffer, target)?;
        debug!(path = %target.display(), "saved");
        Ok(())
    }

    /// Multiply the zoom factor by `factor` and return the new value.
    ///
    /// # Errors
    /// [`Error::NoImageLoaded`] on an empty session, [`Error::InvalidZoom`]
    /// for a factor that is not finite and positive.
    pub fn zoom_by(&mut self, factor: f64) -> Result<f64, Error> {
        if self.current.is_none() {
            return Err(Error::NoImageLoaded);
        }
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Error::InvalidZoom(factor));
        }
        self.zoom *= factor;
        Ok(self.zoom)
    }

    pub fn zoom_in(&mut self) -> Result<f64, Error> {
        self.zoom_by(self.zoom_step)
    }

    pub fn zoom_out(&mut self) -> Result<f64, Error> {
        self.zoom_by(1.0 / self.zoom_step)
    }

    /// Run one UI request.
    ///
    /// # Errors
    /// Whatever the underlying operation returns.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, Error> {
        Ok(match command {
            Command::Open(path) => {
                self.open(&path)?;
                Outcome::Opened(path)
            }
            Command::Navigate(direction) => Outcome::Navigated(self.navigate(direction)?),
            Command::ApplyFilter(kind) => {
                self.apply_filter(kind)?;
                Outcome::Filtered(kind)
            }
            Command::Save(path) => {
                self.save(&path)?;
                Outcome::Saved(path)
            }
            Command::ZoomIn => Outcome::Zoomed(self.zoom_in()?),
            Command::ZoomOut => Outcome::Zoomed(self.zoom_out()?),
            Command::ZoomBy(factor) => Outcome::Zoomed(self.zoom_by(factor)?),
        })
    }
}
