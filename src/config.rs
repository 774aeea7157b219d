//! Settings file support
//!
//! ```toml
//! [network]
//! alpha = 0.7
//!
//! [network.projection]
//! mode = "utm"
//! zone = 32
//! north = true
//!
//! [network.scoring.category_factors]
//! shared_with_cars = 0.9
//!
//! [speeds]
//! bike_kmh = 18.0
//! ```
//!
//! Missing keys keep their defaults. A `surface_classes` table replaces the
//! built-in tag mapping as a whole.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use veloroute_core::prelude::*;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub network: NetworkConfig,
    pub speeds: TravelSpeeds,
}

impl Settings {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for malformed TOML or values
    /// that fail validation.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let settings: Settings =
            toml::from_str(text).map_err(|e| Error::InvalidConfiguration(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the file cannot be read or
    /// parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfiguration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an out-of-range alpha,
    /// factor or speed.
    pub fn validate(&self) -> Result<(), Error> {
        self.network.validate()?;
        self.speeds.validate()
    }
}
