use serde::{Deserialize, Serialize};

use crate::{Error, ProjectionConfig, ScoringConfig};

/// Build-time parameters of a routing graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Blend between plain distance (0) and safety-scored distance (1)
    pub alpha: f64,
    pub scoring: ScoringConfig,
    pub projection: ProjectionConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            scoring: ScoringConfig::default(),
            projection: ProjectionConfig::default(),
        }
    }
}

impl NetworkConfig {
    pub fn with_alpha(alpha: f64) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for alpha outside `[0, 1]`
    /// or scoring factors that could produce negative weights.
    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(Error::InvalidConfiguration(format!(
                "alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        self.projection.validate()?;
        self.scoring.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_outside_unit_interval_is_rejected() {
        assert!(NetworkConfig::with_alpha(0.0).validate().is_ok());
        assert!(NetworkConfig::with_alpha(1.0).validate().is_ok());
        for alpha in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                NetworkConfig::with_alpha(alpha).validate(),
                Err(Error::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: NetworkConfig = serde_json::from_str(
            r#"{ "alpha": 0.3, "projection": { "mode": "planar" },
                 "scoring": { "category_factors": { "shared_with_cars": 2.0 } } }"#,
        )
        .unwrap();
        assert_eq!(config.alpha, 0.3);
        assert_eq!(config.projection, ProjectionConfig::Planar);
        assert_eq!(config.scoring.category_factors.shared_with_cars, 2.0);
        assert_eq!(config.scoring.category_factors.designated_paths, 0.2);
        assert_eq!(config.scoring.surface_factors.unknown, 1.4);
        assert!(!config.scoring.surface_classes.is_empty());
    }
}
