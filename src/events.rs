use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::config::Configuration;
use crate::processing::FilterKind;
use crate::scan::Direction;
use crate::session::Navigation;

/// A request from the UI layer to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(PathBuf),
    Navigate(Direction),
    ApplyFilter(FilterKind),
    Save(PathBuf),
    ZoomIn,
    ZoomOut,
    ZoomBy(f64),
}

/// What a successful [`Command`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Opened(PathBuf),
    Navigated(Navigation),
    Filtered(FilterKind),
    Saved(PathBuf),
    Zoomed(f64),
}

impl Command {
    /// Parse `name` or `name=value`, filling omitted filter parameters from
    /// `cfg`.
    ///
    /// Accepted: `open=PATH`, `next`, `prev`, `blur[=K]`, `erode[=N]`,
    /// `dilate[=N]`, `zoom-in`, `zoom-out`, `zoom=F`, `save=PATH`.
    pub fn parse(s: &str, cfg: &Configuration) -> Result<Self> {
        let (name, value) = match s.split_once('=') {
            Some((n, v)) => (n.trim(), Some(v.trim())),
            None => (s.trim(), None),
        };
        let number = |default: u32| -> Result<u32> {
            value.map_or(Ok(default), |v| {
                v.parse::<u32>()
                    .with_context(|| format!("invalid parameter {v:?} for {name}"))
            })
        };
        let path = || -> Result<PathBuf> {
            match value {
                Some(v) if !v.is_empty() => Ok(PathBuf::from(v)),
                _ => bail!("{name} needs a path, e.g. {name}=out.png"),
            }
        };

        Ok(match name {
            "open" => Self::Open(path()?),
            "save" => Self::Save(path()?),
            "next" => Self::Navigate(Direction::Next),
            "prev" | "previous" => Self::Navigate(Direction::Previous),
            "blur" => Self::ApplyFilter(FilterKind::BoxBlur {
                kernel: number(cfg.blur_kernel)?,
            }),
            "erode" => Self::ApplyFilter(FilterKind::Erode {
                iterations: number(cfg.morphology_iterations)?,
            }),
            "dilate" => Self::ApplyFilter(FilterKind::Dilate {
                iterations: number(cfg.morphology_iterations)?,
            }),
            "zoom-in" => Self::ZoomIn,
            "zoom-out" => Self::ZoomOut,
            "zoom" => {
                let v = value.context("zoom needs a factor, e.g. zoom=1.5")?;
                Self::ZoomBy(
                    v.parse::<f64>()
                        .with_context(|| format!("invalid zoom factor {v:?}"))?,
                )
            }
            other => bail!("unknown command {other:?}"),
        })
    }
}
