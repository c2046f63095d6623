use std::str::FromStr;

use thiserror::Error;

use crate::layout::Breakpoints;

pub const DEFAULT_BATCH_SIZE: usize = 21;
pub const DEFAULT_MAX_IMAGES: usize = 100;
const DEFAULT_GAP_PX: i32 = 8;
const DEFAULT_SCROLL_THRESHOLD: f64 = 0.8;
const DEFAULT_WINDOW_WIDTH: i32 = 1200;
const DEFAULT_WINDOW_HEIGHT: i32 = 800;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}: cannot parse {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("{key}: {value} is out of range ({expected})")]
    OutOfRange {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// How the loader behaves when a batch crosses `max_images`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapPolicy {
    /// Append the whole batch, then stop (21, 42, 63, 84, 105).
    #[default]
    Overshoot,
    /// Truncate the final batch so the gallery ends at exactly `max_images`.
    Exact,
}

#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub batch_size: usize,
    pub max_images: usize,
    pub cap_policy: CapPolicy,
    pub breakpoints: Breakpoints,
    /// Gap between columns and between tiles in a column
    pub gap_px: i32,
    /// Fraction of the scrollable height that must be reached to load more
    pub scroll_threshold: f64,
    pub seed: Option<u64>,
    pub window_width: i32,
    pub window_height: i32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_images: DEFAULT_MAX_IMAGES,
            cap_policy: CapPolicy::default(),
            breakpoints: Breakpoints::default(),
            gap_px: DEFAULT_GAP_PX,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            seed: None,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

impl GalleryConfig {
    /// Defaults overridden by `MASONRY_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("MASONRY_BATCH_SIZE") {
            config.batch_size = parse_var("MASONRY_BATCH_SIZE", &v)?;
        }
        if let Some(v) = lookup("MASONRY_MAX_IMAGES") {
            config.max_images = parse_var("MASONRY_MAX_IMAGES", &v)?;
        }
        if let Some(v) = lookup("MASONRY_EXACT_CAP") {
            if parse_flag("MASONRY_EXACT_CAP", &v)? {
                config.cap_policy = CapPolicy::Exact;
            }
        }
        if let Some(v) = lookup("MASONRY_GAP_PX") {
            config.gap_px = parse_var("MASONRY_GAP_PX", &v)?;
        }
        if let Some(v) = lookup("MASONRY_SCROLL_THRESHOLD") {
            config.scroll_threshold = parse_var("MASONRY_SCROLL_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("MASONRY_SEED") {
            config.seed = Some(parse_var("MASONRY_SEED", &v)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::OutOfRange {
                key: "MASONRY_BATCH_SIZE",
                value: self.batch_size.to_string(),
                expected: "at least 1",
            });
        }
        if self.max_images == 0 {
            return Err(ConfigError::OutOfRange {
                key: "MASONRY_MAX_IMAGES",
                value: self.max_images.to_string(),
                expected: "at least 1",
            });
        }
        if self.gap_px < 0 {
            return Err(ConfigError::OutOfRange {
                key: "MASONRY_GAP_PX",
                value: self.gap_px.to_string(),
                expected: "zero or more",
            });
        }
        if !(self.scroll_threshold > 0.0 && self.scroll_threshold <= 1.0) {
            return Err(ConfigError::OutOfRange {
                key: "MASONRY_SCROLL_THRESHOLD",
                value: self.scroll_threshold.to_string(),
                expected: "greater than 0 and at most 1",
            });
        }
        Ok(())
    }
}
