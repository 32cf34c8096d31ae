//! Configuration types for pedigree diagrams.
//!
//! All types implement [`serde::Deserialize`] and fall back to defaults for
//! every missing field, so a configuration file only needs to name what it
//! changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`InteractionConfig`] - Grid snapping, zoom and pan behavior.
//! - [`RoutingConfig`] - Constants used by connection routing.
//! - [`StyleConfig`] - Line and glyph styling for drawn output.
//!
//! # Example
//!
//! ```
//! # use pedigree::config::AppConfig;
//! let config = AppConfig::from_toml_str(
//!     r#"
//!     [interaction]
//!     grid_unit = 10.0
//!
//!     [routing]
//!     twin_stem = "legacy-bitwise"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.interaction().grid_unit(), 10.0);
//! assert_eq!(config.routing().twin_rise(), 100.0);
//! ```

use std::{fs, path::Path};

use log::{debug, info};
use serde::Deserialize;

use pedigree_core::color::Color;

use crate::error::PedigreeError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    interaction: InteractionConfig,
    routing: RoutingConfig,
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(interaction: InteractionConfig, routing: RoutingConfig, style: StyleConfig) -> Self {
        Self {
            interaction,
            routing,
            style,
        }
    }

    /// Parses and validates a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::Config`] if the document is not valid TOML, has
    /// fields of the wrong type, or holds values outside their valid range.
    pub fn from_toml_str(source: &str) -> Result<Self, PedigreeError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        debug!(config:?; "Configuration parsed");
        Ok(config)
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`AppConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PedigreeError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration");
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn interaction(&self) -> &InteractionConfig {
        &self.interaction
    }

    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    fn validate(&self) -> Result<(), PedigreeError> {
        let interaction = &self.interaction;
        if !(interaction.grid_unit.is_finite() && interaction.grid_unit > 0.0) {
            return Err(PedigreeError::Config(format!(
                "grid_unit must be a positive number, got {}",
                interaction.grid_unit
            )));
        }
        if !interaction.zoom_sensitivity.is_finite() {
            return Err(PedigreeError::Config(
                "zoom_sensitivity must be finite".to_string(),
            ));
        }
        if !(interaction.min_scale > 0.0 && interaction.min_scale <= interaction.max_scale) {
            return Err(PedigreeError::Config(format!(
                "scale limits must satisfy 0 < min_scale <= max_scale, got {}..{}",
                interaction.min_scale, interaction.max_scale
            )));
        }
        if !(self.style.line_width.is_finite() && self.style.line_width >= 0.0) {
            return Err(PedigreeError::Config(format!(
                "line_width must be a non-negative number, got {}",
                self.style.line_width
            )));
        }
        Ok(())
    }
}

/// Pointer interaction settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Dragged nodes snap to multiples of this many diagram units.
    grid_unit: f32,

    /// Scale change per unit of wheel delta.
    zoom_sensitivity: f32,

    /// Lower zoom limit.
    min_scale: f32,

    /// Upper zoom limit.
    max_scale: f32,

    /// Whether dragging empty space pans the diagram.
    pan_enabled: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            grid_unit: 15.0,
            zoom_sensitivity: 0.001,
            min_scale: 0.1,
            max_scale: 10.0,
            pan_enabled: true,
        }
    }
}

impl InteractionConfig {
    pub fn grid_unit(&self) -> f32 {
        self.grid_unit
    }

    pub fn zoom_sensitivity(&self) -> f32 {
        self.zoom_sensitivity
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    pub fn pan_enabled(&self) -> bool {
        self.pan_enabled
    }

    /// Returns a copy with panning switched on or off.
    pub fn with_pan_enabled(mut self, pan_enabled: bool) -> Self {
        self.pan_enabled = pan_enabled;
        self
    }
}

/// How the height of the stem joining two twins is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TwinStem {
    /// Rise from the smaller of the two twin center heights, which is the
    /// twin drawn higher on screen.
    #[default]
    Min,
    /// Combine both candidates with a 32-bit integer OR, matching diagrams
    /// produced by earlier releases.
    LegacyBitwise,
}

/// Constants used by connection routing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Vertical distance between the twins' centers and their convergence point.
    twin_rise: f32,

    twin_stem: TwinStem,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            twin_rise: 100.0,
            twin_stem: TwinStem::default(),
        }
    }
}

impl RoutingConfig {
    pub fn twin_rise(&self) -> f32 {
        self.twin_rise
    }

    pub fn twin_stem(&self) -> TwinStem {
        self.twin_stem
    }

    /// Returns a copy using the given twin stem policy.
    pub fn with_twin_stem(mut self, twin_stem: TwinStem) -> Self {
        self.twin_stem = twin_stem;
        self
    }
}

/// Visual styling of drawn output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Stroke width of connection lines.
    line_width: f32,

    /// Connection line color as a CSS color string.
    line_color: Option<String>,

    /// Node glyph outline color as a CSS color string.
    node_stroke_color: Option<String>,

    /// Canvas background color as a CSS color string.
    background_color: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            line_color: None,
            node_stroke_color: None,
            background_color: None,
        }
    }
}

impl StyleConfig {
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Returns the connection line color, black if unset.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::InvalidColor`] if the configured string is not a CSS color.
    pub fn line_color(&self) -> Result<Color, PedigreeError> {
        Color::parse_or_black(self.line_color.as_deref())
            .map_err(PedigreeError::InvalidColor)
    }

    /// Returns the glyph outline color, black if unset.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::InvalidColor`] if the configured string is not a CSS color.
    pub fn node_stroke_color(&self) -> Result<Color, PedigreeError> {
        Color::parse_or_black(self.node_stroke_color.as_deref())
            .map_err(PedigreeError::InvalidColor)
    }

    /// Returns the parsed background color, or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::InvalidColor`] if the configured string is not a CSS color.
    pub fn background_color(&self) -> Result<Option<Color>, PedigreeError> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(PedigreeError::InvalidColor)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_approx_eq!(f32, config.interaction().grid_unit(), 15.0);
        assert_approx_eq!(f32, config.interaction().zoom_sensitivity(), 0.001);
        assert!(config.interaction().pan_enabled());
        assert_approx_eq!(f32, config.routing().twin_rise(), 100.0);
        assert_eq!(config.routing().twin_stem(), TwinStem::Min);
        assert_approx_eq!(f32, config.style().line_width(), 2.0);
        assert_eq!(config.style().line_color().unwrap().to_string(), "black");
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_approx_eq!(f32, config.interaction().max_scale(), 10.0);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [interaction]
            pan_enabled = false

            [style]
            line_color = "navy"
            background_color = "white"
            "#,
        )
        .unwrap();

        assert!(!config.interaction().pan_enabled());
        assert_approx_eq!(f32, config.interaction().grid_unit(), 15.0);
        assert!(config.style().background_color().unwrap().is_some());
    }

    #[test]
    fn test_twin_stem_names() {
        let config = AppConfig::from_toml_str("[routing]\ntwin_stem = \"legacy-bitwise\"").unwrap();
        assert_eq!(config.routing().twin_stem(), TwinStem::LegacyBitwise);

        let result = AppConfig::from_toml_str("[routing]\ntwin_stem = \"highest\"");
        assert!(matches!(result, Err(PedigreeError::Config(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for source in [
            "[interaction]\ngrid_unit = 0.0",
            "[interaction]\ngrid_unit = -15.0",
            "[interaction]\nmin_scale = 0.0",
            "[interaction]\nmin_scale = 5.0\nmax_scale = 1.0",
            "[style]\nline_width = -1.0",
            "[interaction]\ngrid_unit = \"fifteen\"",
        ] {
            let result = AppConfig::from_toml_str(source);
            assert!(
                matches!(result, Err(PedigreeError::Config(_))),
                "expected config error for {source:?}"
            );
        }
    }

    #[test]
    fn test_invalid_color_reported_on_use() {
        let config = AppConfig::from_toml_str("[style]\nline_color = \"blurple\"").unwrap();
        assert!(matches!(
            config.style().line_color(),
            Err(PedigreeError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[routing]\ntwin_rise = 80.0").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_approx_eq!(f32, config.routing().twin_rise(), 80.0);
    }

    #[test]
    fn test_load_missing_file() {
        let result = AppConfig::load("/definitely/not/here/pedigree.toml");
        assert!(matches!(result, Err(PedigreeError::Io(_))));
    }
}
