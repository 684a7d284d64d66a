//! Configuration for the placement engine
//!
//! Default footprints per object kind, the minimum object size, the floor
//! retention policy and viewport limits are product decisions, so they live
//! here rather than in the engine. A config can be loaded from TOML; any key
//! left out keeps its default.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::ObjectKind;

/// Errors that can occur when loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Width and height in percent of the plan
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Limits and step sizes for pan/zoom
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale multiplier per wheel notch
    pub wheel_zoom_factor: f64,
    /// Scale multiplier for the zoom-in/zoom-out controls
    pub button_zoom_factor: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
            wheel_zoom_factor: 1.1,
            button_zoom_factor: 1.2,
        }
    }
}

/// Configuration options for placement
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    /// Default footprint per kind tag
    pub dimensions: HashMap<String, Dimensions>,

    /// Footprint for kinds missing from `dimensions`
    pub fallback_dimensions: Dimensions,

    /// Smallest width/height an object can be resized to
    pub min_dimension: f64,

    /// A location may not drop below this many floors
    pub min_floors: usize,

    /// Price for objects dropped from the palette
    pub default_price: f64,

    /// Price for objects created from AI suggestions
    pub suggestion_price: f64,

    /// Kind used when an AI suggestion is accepted
    pub suggestion_kind: ObjectKind,

    pub viewport: ViewportConfig,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        let dimensions = [
            (ObjectKind::Table, Dimensions::new(5.0, 5.0)),
            (ObjectKind::Sunbed, Dimensions::new(8.0, 4.0)),
            (ObjectKind::Workspace, Dimensions::new(4.0, 4.0)),
            (ObjectKind::Boat, Dimensions::new(10.0, 5.0)),
            (ObjectKind::Room, Dimensions::new(10.0, 10.0)),
        ]
        .into_iter()
        .map(|(kind, dims)| (kind.tag().to_string(), dims))
        .collect();

        Self {
            dimensions,
            fallback_dimensions: Dimensions::new(5.0, 5.0),
            min_dimension: 1.0,
            min_floors: 1,
            default_price: 25.0,
            suggestion_price: 20.0,
            suggestion_kind: ObjectKind::Table,
            viewport: ViewportConfig::default(),
        }
    }
}

/// TOML structure for deserializing configs
#[derive(Deserialize)]
struct TomlConfig {
    #[serde(default)]
    dimensions: HashMap<String, Dimensions>,
    fallback: Option<Dimensions>,
    limits: Option<TomlLimits>,
    pricing: Option<TomlPricing>,
    suggestions: Option<TomlSuggestions>,
    viewport: Option<ViewportConfig>,
}

#[derive(Deserialize)]
struct TomlLimits {
    min_dimension: Option<f64>,
    min_floors: Option<usize>,
}

#[derive(Deserialize)]
struct TomlPricing {
    default_price: Option<f64>,
    suggestion_price: Option<f64>,
}

#[derive(Deserialize)]
struct TomlSuggestions {
    kind: Option<ObjectKind>,
}

impl PlacementConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a configuration from a TOML string, layered over the defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        config.dimensions.extend(parsed.dimensions);
        if let Some(fallback) = parsed.fallback {
            config.fallback_dimensions = fallback;
        }
        if let Some(limits) = parsed.limits {
            if let Some(min) = limits.min_dimension {
                config.min_dimension = min;
            }
            if let Some(min) = limits.min_floors {
                config.min_floors = min;
            }
        }
        if let Some(pricing) = parsed.pricing {
            if let Some(price) = pricing.default_price {
                config.default_price = price;
            }
            if let Some(price) = pricing.suggestion_price {
                config.suggestion_price = price;
            }
        }
        if let Some(kind) = parsed.suggestions.and_then(|s| s.kind) {
            config.suggestion_kind = kind;
        }
        if let Some(viewport) = parsed.viewport {
            config.viewport = viewport;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the values can drive the engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_dimension.is_finite() && self.min_dimension > 0.0) {
            return Err(ConfigError::invalid("min_dimension", "must be positive"));
        }
        for (tag, dims) in self
            .dimensions
            .iter()
            .map(|(tag, dims)| (tag.as_str(), dims))
            .chain(std::iter::once(("fallback", &self.fallback_dimensions)))
        {
            if !(dims.width >= self.min_dimension && dims.height >= self.min_dimension) {
                return Err(ConfigError::invalid(
                    format!("dimensions.{}", tag),
                    format!("width and height must be at least {}", self.min_dimension),
                ));
            }
        }
        for (field, price) in [
            ("default_price", self.default_price),
            ("suggestion_price", self.suggestion_price),
        ] {
            if !(price.is_finite() && price >= 0.0) {
                return Err(ConfigError::invalid(field, "must be a non-negative number"));
            }
        }
        let vp = &self.viewport;
        if !(vp.min_scale > 0.0 && vp.min_scale <= vp.max_scale && vp.max_scale.is_finite()) {
            return Err(ConfigError::invalid(
                "viewport",
                "scale bounds must satisfy 0 < min_scale <= max_scale",
            ));
        }
        if !(vp.wheel_zoom_factor > 1.0 && vp.button_zoom_factor > 1.0) {
            return Err(ConfigError::invalid("viewport", "zoom factors must exceed 1"));
        }
        Ok(())
    }

    /// Default footprint for a kind
    pub fn dimensions_for(&self, kind: &ObjectKind) -> Dimensions {
        self.dimensions
            .get(kind.tag())
            .copied()
            .unwrap_or(self.fallback_dimensions)
    }

    /// Set the default footprint for a kind
    pub fn with_dimensions(mut self, kind: &ObjectKind, width: f64, height: f64) -> Self {
        self.dimensions
            .insert(kind.tag().to_string(), Dimensions::new(width, height));
        self
    }

    /// Set the minimum object dimension
    pub fn with_min_dimension(mut self, min: f64) -> Self {
        self.min_dimension = min;
        self
    }

    /// Set how many floors a location must keep
    pub fn with_min_floors(mut self, min: usize) -> Self {
        self.min_floors = min;
        self
    }

    /// Set the palette drop price
    pub fn with_default_price(mut self, price: f64) -> Self {
        self.default_price = price;
        self
    }

    /// Set the viewport scale bounds, in either order
    pub fn with_scale_bounds(mut self, min: f64, max: f64) -> Self {
        self.viewport.min_scale = min.min(max);
        self.viewport.max_scale = max.max(min);
        self
    }
}
