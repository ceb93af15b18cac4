//! # Editor Configuration
//!
//! Configuration for the editor session and its orientation gizmo. Values
//! start from sensible defaults and can be overridden through environment
//! variables (see [`EditorConfig::from_env`]).

use std::{f32::consts::PI, fmt, str::FromStr};

use cgmath::Vector3;

use crate::error::{ConfigError, GizmoError};

/// Default side length of the gizmo overlay in pixels
pub const DEFAULT_OVERLAY_EXTENT: u32 = 128;

/// Default gizmo turn rate in radians per second
pub const DEFAULT_TURN_RATE: f32 = 2.0 * PI;

/// Visual style of the gizmo axis indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorStyleKind {
    /// Axis bars with a labelled sprite on each end
    #[default]
    Arrows,
    /// Double-ended disks, no axis bars
    Circles,
}

impl IndicatorStyleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorStyleKind::Arrows => "arrows",
            IndicatorStyleKind::Circles => "circles",
        }
    }
}

impl FromStr for IndicatorStyleKind {
    type Err = GizmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "arrows" => Ok(IndicatorStyleKind::Arrows),
            "circles" => Ok(IndicatorStyleKind::Circles),
            other => Err(GizmoError::InvalidStyle(other.to_string())),
        }
    }
}

impl fmt::Display for IndicatorStyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Corner of the host viewport the overlay is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl FromStr for OverlayCorner {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "top-left" => Ok(OverlayCorner::TopLeft),
            "top-right" => Ok(OverlayCorner::TopRight),
            "bottom-left" => Ok(OverlayCorner::BottomLeft),
            "bottom-right" => Ok(OverlayCorner::BottomRight),
            other => Err(ConfigError::invalid("overlay corner", other)),
        }
    }
}

/// Which letters the indicators carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelScheme {
    /// `X`, `Y`, `Z` on the positive ends
    #[default]
    Axis,
    /// Field directions: x is north, z is east, y is up
    Compass,
}

impl FromStr for LabelScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "axis" => Ok(LabelScheme::Axis),
            "compass" => Ok(LabelScheme::Compass),
            other => Err(ConfigError::invalid("label scheme", other)),
        }
    }
}

/// Colour theme of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    /// Follow the window system preference
    #[default]
    Auto,
}

impl Theme {
    /// Resolves `Auto` against the platform preference.
    pub fn resolve(self, prefers_dark: bool) -> Theme {
        match self {
            Theme::Auto if prefers_dark => Theme::Dark,
            Theme::Auto => Theme::Light,
            other => other,
        }
    }

    /// Background colour used to clear the main viewport
    pub fn clear_color(self) -> [f64; 4] {
        match self {
            Theme::Light => [0.86, 0.89, 0.93, 1.0],
            Theme::Dark | Theme::Auto => [0.08, 0.09, 0.11, 1.0],
        }
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "auto" => Ok(Theme::Auto),
            other => Err(ConfigError::invalid("theme", other)),
        }
    }
}

/// Orientation gizmo settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoConfig {
    /// Side of the square overlay in pixels
    pub overlay_extent_px: u32,
    pub corner: OverlayCorner,
    pub style: IndicatorStyleKind,
    pub labels: LabelScheme,
    /// Radians per second
    pub turn_rate: f32,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            overlay_extent_px: DEFAULT_OVERLAY_EXTENT,
            corner: OverlayCorner::default(),
            style: IndicatorStyleKind::default(),
            labels: LabelScheme::default(),
            turn_rate: DEFAULT_TURN_RATE,
        }
    }
}

impl GizmoConfig {
    /// Sets the indicator style from its configuration tag.
    ///
    /// Unknown tags are rejected so that a gizmo is never built with a
    /// style nobody asked for.
    pub fn with_style_str(mut self, style: &str) -> Result<Self, GizmoError> {
        self.style = style.parse()?;
        Ok(self)
    }

    pub fn with_style(mut self, style: IndicatorStyleKind) -> Self {
        self.style = style;
        self
    }

    pub fn with_overlay_extent(mut self, extent_px: u32) -> Self {
        self.overlay_extent_px = extent_px;
        self
    }

    pub fn with_corner(mut self, corner: OverlayCorner) -> Self {
        self.corner = corner;
        self
    }

    pub fn with_labels(mut self, labels: LabelScheme) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_turn_rate(mut self, turn_rate: f32) -> Self {
        self.turn_rate = turn_rate;
        self
    }

    /// Checks values the gizmo cannot work with.
    pub fn validate(&self) -> Result<(), GizmoError> {
        if self.overlay_extent_px == 0 {
            return Err(GizmoError::InvalidOverlaySize(self.overlay_extent_px));
        }
        if !self.turn_rate.is_finite() || self.turn_rate <= 0.0 {
            return Err(GizmoError::InvalidTurnRate(self.turn_rate));
        }
        Ok(())
    }
}

/// Initial camera placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    /// Vertical field of view in radians
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vector3::new(3.0, -2.0, 10.0),
            target: Vector3::new(0.0, 0.0, 0.0),
            fovy: 75f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
            min_distance: 1.1,
            max_distance: 400.0,
        }
    }
}

/// Settings for one editor session
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub window_title: String,
    pub window_size: (u32, u32),
    pub theme: Theme,
    pub camera: CameraConfig,
    pub gizmo: GizmoConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_title: "Heliostat Field Editor".to_string(),
            window_size: (1280, 800),
            theme: Theme::default(),
            camera: CameraConfig::default(),
            gizmo: GizmoConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Builds a configuration from defaults plus `HELIOFIELD_*` environment
    /// overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from defaults plus overrides returned by
    /// `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(style) = lookup("HELIOFIELD_GIZMO_STYLE") {
            config.gizmo = config.gizmo.with_style_str(&style)?;
        }
        if let Some(size) = lookup("HELIOFIELD_GIZMO_SIZE") {
            let extent = size
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::invalid("HELIOFIELD_GIZMO_SIZE", &size))?;
            config.gizmo.overlay_extent_px = extent;
        }
        if let Some(corner) = lookup("HELIOFIELD_GIZMO_CORNER") {
            config.gizmo.corner = corner.parse()?;
        }
        if let Some(labels) = lookup("HELIOFIELD_LABELS") {
            config.gizmo.labels = labels.parse()?;
        }
        if let Some(theme) = lookup("HELIOFIELD_THEME") {
            config.theme = theme.parse()?;
        }

        config.gizmo.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_style_tags() {
        assert_eq!("arrows".parse::<IndicatorStyleKind>(), Ok(IndicatorStyleKind::Arrows));
        assert_eq!("circles".parse::<IndicatorStyleKind>(), Ok(IndicatorStyleKind::Circles));
        assert_eq!(
            "cubes".parse::<IndicatorStyleKind>(),
            Err(GizmoError::InvalidStyle("cubes".to_string()))
        );
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = EditorConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.gizmo.overlay_extent_px, 128);
        assert_eq!(config.gizmo.corner, OverlayCorner::BottomRight);
    }

    #[test]
    fn test_env_overrides() {
        let config = EditorConfig::from_lookup(lookup_from(&[
            ("HELIOFIELD_GIZMO_STYLE", "circles"),
            ("HELIOFIELD_GIZMO_SIZE", "96"),
            ("HELIOFIELD_GIZMO_CORNER", "top-left"),
            ("HELIOFIELD_LABELS", "compass"),
            ("HELIOFIELD_THEME", "dark"),
        ]))
        .unwrap();

        assert_eq!(config.gizmo.style, IndicatorStyleKind::Circles);
        assert_eq!(config.gizmo.overlay_extent_px, 96);
        assert_eq!(config.gizmo.corner, OverlayCorner::TopLeft);
        assert_eq!(config.gizmo.labels, LabelScheme::Compass);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn test_invalid_style_is_fatal() {
        let err = EditorConfig::from_lookup(lookup_from(&[("HELIOFIELD_GIZMO_STYLE", "boxes")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Gizmo(GizmoError::InvalidStyle(_))));
    }

    #[test]
    fn test_zero_overlay_rejected() {
        let err = EditorConfig::from_lookup(lookup_from(&[("HELIOFIELD_GIZMO_SIZE", "0")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Gizmo(GizmoError::InvalidOverlaySize(0))
        ));

        let err = EditorConfig::from_lookup(lookup_from(&[("HELIOFIELD_GIZMO_SIZE", "big")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_turn_rate_must_be_positive() {
        for rate in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = GizmoConfig::default().with_turn_rate(rate);
            assert!(
                matches!(config.validate(), Err(GizmoError::InvalidTurnRate(_))),
                "rate {} accepted",
                rate
            );
        }
        assert!(GizmoConfig::default().with_turn_rate(0.5).validate().is_ok());
    }

    #[test]
    fn test_theme_resolution() {
        assert_eq!(Theme::Auto.resolve(true), Theme::Dark);
        assert_eq!(Theme::Auto.resolve(false), Theme::Light);
        assert_eq!(Theme::Light.resolve(true), Theme::Light);
    }
}
