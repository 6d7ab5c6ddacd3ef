//! Showcase configuration
//!
//! Loaded from `kinetic.toml`. Every section is optional:
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 800
//!
//! [layout]
//! heading_height = 48
//! paragraph_height = 128
//!
//! [reveal]
//! once = true
//! amount = "some"
//!
//! [drag]
//! elastic = 0.0
//! ```

use std::fs;
use std::path::Path;

use kinetic_core::Size;
use kinetic_layout::{Amount, InViewOptions, LayoutConfig};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShowcaseError};

/// Default config file name
pub const CONFIG_FILE: &str = "kinetic.toml";

/// Complete showcase configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub viewport: ViewportConfig,
    pub layout: LayoutConfig,
    pub reveal: RevealConfig,
    pub drag: DragSettings,
}

/// Visible window size in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// When the scroll-section heading is revealed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Reveal once and never hide again
    pub once: bool,
    pub amount: Amount,
    /// Grows the viewport used for the check
    pub margin: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            once: true,
            amount: Amount::Some,
            margin: 0.0,
        }
    }
}

impl From<RevealConfig> for InViewOptions {
    fn from(reveal: RevealConfig) -> Self {
        InViewOptions {
            once: reveal.once,
            amount: reveal.amount,
            margin: reveal.margin,
        }
    }
}

/// Drag cell tuning
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// How far past its constraints the handle follows the pointer (0..1)
    pub elastic: f32,
}

impl ShowcaseConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ShowcaseError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ShowcaseConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn viewport_size(&self) -> Size {
        Size::new(self.viewport.width, self.viewport.height)
    }

    /// Reject values the page cannot be laid out with
    pub fn validate(&self) -> Result<()> {
        let Size { width, height } = self.viewport_size();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ShowcaseError::InvalidViewport { width, height });
        }
        if !(0.0..=1.0).contains(&self.drag.elastic) {
            return Err(ShowcaseError::InvalidConfig(format!(
                "drag.elastic must be within 0..1, got {}",
                self.drag.elastic
            )));
        }
        if let Amount::Fraction(f) = self.reveal.amount {
            if !(0.0..=1.0).contains(&f) {
                return Err(ShowcaseError::InvalidConfig(format!(
                    "reveal.amount fraction must be within 0..1, got {f}"
                )));
            }
        }
        Ok(())
    }
}
