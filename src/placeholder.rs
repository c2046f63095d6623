//! Placeholder images addressed by `/placeholder.svg?width=W&height=H`.
//!
//! Nothing is fetched: the URL only carries the size, and the pixels are
//! synthesised locally.

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use thiserror::Error;

const PLACEHOLDER_PATH: &str = "/placeholder.svg";

/// Largest side we are willing to synthesise.
const MAX_PLACEHOLDER_SIDE: u32 = 4096;

const FILL: Rgba<u8> = Rgba([0xe5, 0xe7, 0xeb, 0xff]);
const STROKE: Rgba<u8> = Rgba([0xc4, 0xc8, 0xcf, 0xff]);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaceholderError {
    #[error("not a placeholder url: {0}")]
    NotPlaceholder(String),
    #[error("placeholder url is missing `{0}`")]
    MissingParam(&'static str),
    #[error("invalid `{param}` value {value:?}")]
    InvalidParam { param: &'static str, value: String },
    #[error("placeholder {width}x{height} exceeds the maximum size")]
    TooLarge { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceholderSpec {
    pub width: u32,
    pub height: u32,
}

impl PlaceholderSpec {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn url(&self) -> String {
        format!(
            "{}?width={}&height={}",
            PLACEHOLDER_PATH, self.width, self.height
        )
    }

    /// Parse a placeholder url. Query parameters may come in any order.
    pub fn parse(url: &str) -> Result<Self, PlaceholderError> {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        if path != PLACEHOLDER_PATH {
            return Err(PlaceholderError::NotPlaceholder(url.to_string()));
        }

        let mut width = None;
        let mut height = None;
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "width" => width = Some(parse_side("width", value)?),
                "height" => height = Some(parse_side("height", value)?),
                _ => {}
            }
        }

        let width = width.ok_or(PlaceholderError::MissingParam("width"))?;
        let height = height.ok_or(PlaceholderError::MissingParam("height"))?;
        if width > MAX_PLACEHOLDER_SIDE || height > MAX_PLACEHOLDER_SIDE {
            return Err(PlaceholderError::TooLarge { width, height });
        }
        Ok(Self { width, height })
    }
}

fn parse_side(param: &'static str, value: &str) -> Result<u32, PlaceholderError> {
    match value.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(PlaceholderError::InvalidParam {
            param,
            value: value.to_string(),
        }),
    }
}

/// Draw the placeholder: flat fill, a one pixel frame and both diagonals.
pub fn render_placeholder(spec: PlaceholderSpec) -> RgbaImage {
    let (w, h) = (spec.width.max(1), spec.height.max(1));
    let mut img = RgbaImage::from_pixel(w, h, FILL);

    for x in 0..w {
        img.put_pixel(x, 0, STROKE);
        img.put_pixel(x, h - 1, STROKE);
    }
    for y in 0..h {
        img.put_pixel(0, y, STROKE);
        img.put_pixel(w - 1, y, STROKE);
    }

    // Step along the longer side so the diagonals have no gaps.
    let steps = w.max(h);
    for i in 0..steps {
        let x = (i as u64 * (w - 1) as u64 / (steps - 1).max(1) as u64) as u32;
        let y = (i as u64 * (h - 1) as u64 / (steps - 1).max(1) as u64) as u32;
        img.put_pixel(x, y, STROKE);
        img.put_pixel(w - 1 - x, y, STROKE);
    }

    img
}

/// Parse and render in one go, for the texture workers.
pub fn render_url(url: &str) -> Result<RgbaImage> {
    let spec =
        PlaceholderSpec::parse(url).with_context(|| format!("Failed to resolve image: {}", url))?;
    Ok(render_placeholder(spec))
}
