//! Rendering configuration for the grid engine.
//!
//! Every field has a serde default, so a partial JSON or TOML document only
//! needs to name the values it overrides.
use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};

/// How a degree of longitude is scaled on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LongitudeMode {
    /// One pixels-per-degree factor for both axes. The visible region gets a
    /// flat `lng_buffer` multiplier on longitude.
    #[default]
    Uniform,
    /// Longitude pixels are scaled by `cos(latitude)` so cells keep their
    /// ground proportions. The longitude buffer then equals the latitude one.
    CosLatitude,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// On-screen height of one cell, in pixels
    #[serde(default = "RenderConfig::default_cell_pixel_size")]
    pub cell_pixel_size: f64,

    /// Multiplier applied to the visible latitude half-span
    #[serde(default = "RenderConfig::default_lat_buffer")]
    pub lat_buffer: f64,

    /// Multiplier applied to the visible longitude half-span in uniform mode
    #[serde(default = "RenderConfig::default_lng_buffer")]
    pub lng_buffer: f64,

    #[serde(default)]
    pub longitude_mode: LongitudeMode,

    /// Upper bound on cells returned by one enumeration
    #[serde(default = "RenderConfig::default_max_visible_cells")]
    pub max_visible_cells: usize,

    /// Meters per degree of latitude used when no cell is available
    #[serde(default = "RenderConfig::default_fallback_meters_per_degree")]
    pub fallback_meters_per_degree: f64,

    #[serde(default = "RenderConfig::default_show_labels")]
    pub show_labels: bool,
}

impl RenderConfig {
    const fn default_cell_pixel_size() -> f64 {
        240.0
    }

    const fn default_lat_buffer() -> f64 {
        1.1
    }

    const fn default_lng_buffer() -> f64 {
        1.2
    }

    const fn default_max_visible_cells() -> usize {
        4096
    }

    const fn default_fallback_meters_per_degree() -> f64 {
        111_000.0
    }

    const fn default_show_labels() -> bool {
        true
    }

    pub fn with_cell_pixel_size(mut self, size: f64) -> Self {
        assert!(
            size.is_finite() && size > 0.0,
            "Cell pixel size must be positive"
        );
        self.cell_pixel_size = size;
        self
    }

    pub fn with_buffers(mut self, lat_buffer: f64, lng_buffer: f64) -> Self {
        self.lat_buffer = lat_buffer;
        self.lng_buffer = lng_buffer;
        self
    }

    pub fn with_longitude_mode(mut self, mode: LongitudeMode) -> Self {
        self.longitude_mode = mode;
        self
    }

    pub fn with_max_visible_cells(mut self, max: usize) -> Self {
        assert!(max > 0, "Visible cell cap must be greater than zero");

        if max > 100_000 {
            log::warn!(
                "Visible cell cap of {} is very large; a misbehaving cell graph \
                can make each frame enumerate that many cells.",
                max
            );
        }

        self.max_visible_cells = max;
        self
    }

    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.cell_pixel_size.is_finite() && self.cell_pixel_size > 0.0) {
            return Err(format!(
                "cell_pixel_size must be positive and finite, got {}",
                self.cell_pixel_size
            ));
        }

        if !(self.lat_buffer.is_finite() && self.lat_buffer >= 1.0) {
            return Err(format!("lat_buffer must be >= 1.0, got {}", self.lat_buffer));
        }

        if !(self.lng_buffer.is_finite() && self.lng_buffer >= 1.0) {
            return Err(format!("lng_buffer must be >= 1.0, got {}", self.lng_buffer));
        }

        if self.max_visible_cells == 0 {
            return Err("max_visible_cells must be greater than zero".to_string());
        }

        if !(self.fallback_meters_per_degree.is_finite() && self.fallback_meters_per_degree > 0.0)
        {
            return Err("fallback_meters_per_degree must be positive".to_string());
        }

        Ok(())
    }

    /// Parse and validate a JSON document. Syntax errors surface as
    /// [`GridError::Json`], rejected values as [`GridError::Config`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate().map_err(GridError::Config)?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: RenderConfig = toml::from_str(toml_str)?;
        config.validate().map_err(GridError::Config)?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_pixel_size: Self::default_cell_pixel_size(),
            lat_buffer: Self::default_lat_buffer(),
            lng_buffer: Self::default_lng_buffer(),
            longitude_mode: LongitudeMode::default(),
            max_visible_cells: Self::default_max_visible_cells(),
            fallback_meters_per_degree: Self::default_fallback_meters_per_degree(),
            show_labels: Self::default_show_labels(),
        }
    }
}
