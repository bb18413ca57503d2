//! Carousel configuration and presets.

use serde::{Deserialize, Serialize};

use crate::{CarouselError, CarouselResult};

/// Which screen axis each ellipse radius maps to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// `radius_x` spans the horizontal axis.
    #[default]
    Horizontal,
    /// Axes swapped: the ring is stood on its side.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(CarouselError::InvalidConfiguration(format!(
                "unknown orientation '{other}'"
            ))),
        }
    }
}

/// Named motion styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Plain exponential easing, no overshoot.
    Linear,
    /// Spring with moderate overshoot.
    Elastic,
    /// Loose spring that rings for a while before settling.
    Bouncy,
}

impl std::str::FromStr for Preset {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "elastic" => Ok(Self::Elastic),
            "bouncy" => Ok(Self::Bouncy),
            other => Err(CarouselError::InvalidConfiguration(format!(
                "unknown preset '{other}'"
            ))),
        }
    }
}

/// Tunable parameters of a carousel.
///
/// A radius of zero means "derive from the container": half the container
/// width for `radius_x`, half the height for `radius_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Horizontal ellipse radius in pixels (0 = auto).
    pub radius_x: f64,
    /// Vertical ellipse radius in pixels (0 = auto).
    pub radius_y: f64,
    /// Axis mapping of the ellipse.
    pub orientation: Orientation,
    /// Easing divisor; larger is slower. `<= 0` snaps to targets.
    pub transition_delay: f64,
    /// Spring pull toward the selection target.
    pub decelleration: f64,
    /// Fraction of the previous spring velocity kept each tick.
    pub elasticity: f64,
    /// Opacity bias added to every item.
    pub min_opacity: f64,
    /// Scale of items at the side of the ring.
    pub min_scale: f64,
    /// Auto-rotation speed in slots per tick. Must be non-zero to rotate.
    pub rotation_speed: f64,
    /// Clamp computed opacity into `[0, 1]`.
    pub clamp_opacity: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            radius_x: 0.0,
            radius_y: 0.0,
            orientation: Orientation::Horizontal,
            transition_delay: 0.0,
            decelleration: 0.0,
            elasticity: 0.0,
            min_opacity: 0.0,
            min_scale: 0.0,
            rotation_speed: 0.0,
            clamp_opacity: false,
        }
    }
}

impl CarouselConfig {
    /// Create a configuration with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the configuration for a preset on top of the defaults.
    #[must_use]
    pub fn preset(preset: Preset) -> Self {
        Self::default().with_preset(preset)
    }

    /// Apply a preset, keeping rotation speed, orientation and clamping.
    #[must_use]
    pub fn with_preset(self, preset: Preset) -> Self {
        match preset {
            Preset::Linear => Self {
                radius_x: 200.0,
                radius_y: 50.0,
                min_opacity: 0.10,
                min_scale: 0.80,
                transition_delay: 20.0,
                elasticity: 0.0,
                decelleration: 0.0,
                ..self
            },
            Preset::Elastic => Self {
                radius_x: 200.0,
                radius_y: 50.0,
                min_opacity: 0.10,
                min_scale: 0.80,
                transition_delay: 1.0,
                elasticity: 0.8,
                decelleration: 0.2,
                ..self
            },
            Preset::Bouncy => Self {
                radius_x: 180.0,
                radius_y: 0.0,
                min_opacity: 0.20,
                min_scale: 0.80,
                transition_delay: 1.0,
                elasticity: 0.95,
                decelleration: 0.05,
                ..self
            },
        }
    }

    /// Set the ellipse radii.
    #[must_use]
    pub fn with_radius(mut self, radius_x: f64, radius_y: f64) -> Self {
        self.radius_x = radius_x;
        self.radius_y = radius_y;
        self
    }

    /// Set the easing divisor.
    #[must_use]
    pub fn with_transition_delay(mut self, transition_delay: f64) -> Self {
        self.transition_delay = transition_delay;
        self
    }

    /// Set the auto-rotation speed.
    #[must_use]
    pub fn with_rotation_speed(mut self, rotation_speed: f64) -> Self {
        self.rotation_speed = rotation_speed;
        self
    }

    /// Set the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Whether the selection animation uses spring physics.
    #[must_use]
    pub fn uses_bounce(&self) -> bool {
        self.elasticity > 0.0 && self.decelleration > 0.0
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidConfiguration`] for non-finite values,
    /// negative radii, delay, elasticity or decelleration, and for easing or
    /// spring settings that would diverge instead of settling:
    ///
    /// - a `transition_delay` strictly between 0 and 1 (0 snaps),
    /// - an `elasticity` of 1 or more,
    /// - a `decelleration` of `2 * transition_delay * (1 + elasticity)` or
    ///   more while the spring is active.
    pub fn validate(&self) -> CarouselResult<()> {
        let fields = [
            ("radiusX", self.radius_x, false),
            ("radiusY", self.radius_y, false),
            ("transitionDelay", self.transition_delay, false),
            ("decelleration", self.decelleration, false),
            ("elasticity", self.elasticity, false),
            ("minOpacity", self.min_opacity, true),
            ("minScale", self.min_scale, true),
            ("rotationSpeed", self.rotation_speed, true),
        ];
        for (name, value, may_be_negative) in fields {
            if !value.is_finite() {
                return Err(CarouselError::InvalidConfiguration(format!(
                    "{name} must be finite, got {value}"
                )));
            }
            if !may_be_negative && value < 0.0 {
                return Err(CarouselError::InvalidConfiguration(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.transition_delay > 0.0 && self.transition_delay < 1.0 {
            return Err(CarouselError::InvalidConfiguration(format!(
                "transitionDelay must be 0 or at least 1, got {}",
                self.transition_delay
            )));
        }
        if self.elasticity >= 1.0 {
            return Err(CarouselError::InvalidConfiguration(format!(
                "elasticity must be below 1, got {}",
                self.elasticity
            )));
        }
        if self.uses_bounce() && self.transition_delay > 0.0 {
            let limit = 2.0 * self.transition_delay * (1.0 + self.elasticity);
            if self.decelleration >= limit {
                return Err(CarouselError::InvalidConfiguration(format!(
                    "decelleration must be below {limit} for this delay and elasticity, got {}",
                    self.decelleration
                )));
            }
        }
        Ok(())
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values fail
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> CarouselResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CarouselResult<String> {
        serde_json::to_string_pretty(self).map_err(CarouselError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_disabled() {
        let config = CarouselConfig::default();
        assert!(config.radius_x.abs() < f64::EPSILON);
        assert!(config.rotation_speed.abs() < f64::EPSILON);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert!(!config.uses_bounce());
        assert!(!config.clamp_opacity);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            CarouselConfig::from_json(r#"{"radiusX": 120, "orientation": "vertical"}"#)
                .expect("should parse");
        assert!((config.radius_x - 120.0).abs() < f64::EPSILON);
        assert!(config.radius_y.abs() < f64::EPSILON);
        assert_eq!(config.orientation, Orientation::Vertical);
    }

    #[test]
    fn test_json_round_trip_keeps_values() {
        let config = CarouselConfig::preset(Preset::Elastic).with_rotation_speed(0.01);
        let json = config.to_json().expect("should serialize");
        assert!(json.contains("transitionDelay"));
        assert_eq!(CarouselConfig::from_json(&json).expect("should parse"), config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative = CarouselConfig::default().with_transition_delay(-1.0);
        assert!(matches!(
            negative.validate(),
            Err(CarouselError::InvalidConfiguration(_))
        ));

        let nan = CarouselConfig::default().with_radius(f64::NAN, 10.0);
        assert!(nan.validate().is_err());

        // Negative rotation speed is just the other direction.
        assert!(CarouselConfig::default()
            .with_rotation_speed(-0.05)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_transition_delay_boundaries() {
        for delay in [0.0, 1.0, 20.0] {
            assert!(
                CarouselConfig::default()
                    .with_transition_delay(delay)
                    .validate()
                    .is_ok(),
                "delay {delay}"
            );
        }
        for delay in [0.25, 0.5, 0.999] {
            assert!(
                matches!(
                    CarouselConfig::default()
                        .with_transition_delay(delay)
                        .validate(),
                    Err(CarouselError::InvalidConfiguration(_))
                ),
                "delay {delay}"
            );
        }
    }

    #[test]
    fn test_validate_spring_boundaries() {
        let spring = |elasticity, decelleration| CarouselConfig {
            transition_delay: 1.0,
            elasticity,
            decelleration,
            ..CarouselConfig::default()
        };

        assert!(spring(0.95, 0.05).validate().is_ok());
        assert!(spring(0.999, 0.2).validate().is_ok());
        assert!(matches!(
            spring(1.0, 0.2).validate(),
            Err(CarouselError::InvalidConfiguration(_))
        ));
        assert!(spring(1.5, 0.2).validate().is_err());

        // Pull limit is 2 * delay * (1 + elasticity) = 3.0 here.
        assert!(spring(0.5, 2.9).validate().is_ok());
        assert!(spring(0.5, 3.0).validate().is_err());

        // With the spring snapping (delay 0) the pull limit does not apply.
        let snapping = CarouselConfig {
            transition_delay: 0.0,
            ..spring(0.5, 10.0)
        };
        assert!(snapping.validate().is_ok());
    }

    #[test]
    fn test_every_preset_validates() {
        for preset in [Preset::Linear, Preset::Elastic, Preset::Bouncy] {
            assert!(CarouselConfig::preset(preset).validate().is_ok());
        }
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        assert!(matches!(
            CarouselConfig::from_json("{not json"),
            Err(CarouselError::Serialization(_))
        ));
    }

    #[test]
    fn test_presets_keep_rotation_and_orientation() {
        let base = CarouselConfig::default()
            .with_rotation_speed(0.02)
            .with_orientation(Orientation::Vertical);
        let bouncy = base.with_preset(Preset::Bouncy);

        assert!((bouncy.rotation_speed - 0.02).abs() < f64::EPSILON);
        assert_eq!(bouncy.orientation, Orientation::Vertical);
        assert!((bouncy.radius_x - 180.0).abs() < f64::EPSILON);
        assert!(bouncy.uses_bounce());
        assert!(!CarouselConfig::preset(Preset::Linear).uses_bounce());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Elastic".parse::<Preset>().ok(), Some(Preset::Elastic));
        assert!("wobbly".parse::<Preset>().is_err());
        assert_eq!(
            "VERTICAL".parse::<Orientation>().ok(),
            Some(Orientation::Vertical)
        );
        assert_eq!(Orientation::Vertical.toggled(), Orientation::Horizontal);
    }
}
