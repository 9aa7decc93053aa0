//! Thumbnail display preferences

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_THUMBNAIL_SIZE: u32 = 100;
pub const MAX_THUMBNAIL_SIZE: u32 = 500;
pub const THUMBNAIL_SIZE_STEP: u32 = 10;
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 150;

/// Vertical anchor of the thumbnail crop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    Top,
    #[default]
    Center,
    Bottom,
}

impl ImagePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePosition::Top => "top",
            ImagePosition::Center => "center",
            ImagePosition::Bottom => "bottom",
        }
    }

    /// CSS-style `object-position` value for renderers
    pub fn object_position(&self) -> &'static str {
        match self {
            ImagePosition::Top => "center top",
            ImagePosition::Center => "center center",
            ImagePosition::Bottom => "center bottom",
        }
    }
}

impl fmt::Display for ImagePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImagePosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "top" => Ok(ImagePosition::Top),
            "center" => Ok(ImagePosition::Center),
            "bottom" => Ok(ImagePosition::Bottom),
            other => Err(format!("Unknown image position: {}", other)),
        }
    }
}

/// Grid display preferences, persisted across restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewPrefs {
    pub thumbnail_size: u32,
    pub image_position: ImagePosition,
}

impl Default for ViewPrefs {
    fn default() -> Self {
        Self {
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            image_position: ImagePosition::Center,
        }
    }
}

/// Clamp to the slider range and snap to its step
pub fn clamp_thumbnail_size(size: u32) -> u32 {
    let clamped = size.clamp(MIN_THUMBNAIL_SIZE, MAX_THUMBNAIL_SIZE);
    let steps = (clamped - MIN_THUMBNAIL_SIZE + THUMBNAIL_SIZE_STEP / 2) / THUMBNAIL_SIZE_STEP;
    MIN_THUMBNAIL_SIZE + steps * THUMBNAIL_SIZE_STEP
}

/// Parse a stored size, accepting a leading integer like `parseInt` does ("180px" -> 180)
pub fn parse_thumbnail_size(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok().map(clamp_thumbnail_size)
}
