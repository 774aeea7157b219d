//! Geographic to planar metric coordinates.
//!
//! Routing distances are Euclidean distances in a UTM zone on the WGS84
//! ellipsoid. A graph fixes one projector at build time so every node,
//! query point and parking point lands in the same zone.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::Error;

/// UTM scale factor on the central meridian
pub const UTM_K0: f64 = 0.9996;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_E2: f64 = 0.006_694_38;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// How input coordinates are turned into metric ones
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ProjectionConfig {
    /// UTM zone of the mean input coordinate
    #[default]
    Auto,
    /// Fixed UTM zone
    Utm { zone: u8, north: bool },
    /// Input is already metric
    Planar,
}

impl ProjectionConfig {
    /// Checks a fixed zone number; other modes are always valid.
    pub fn validate(&self) -> Result<(), Error> {
        if let ProjectionConfig::Utm { zone, north } = *self {
            UtmZone::new(zone, north)?;
        }
        Ok(())
    }

    /// Picks the projector for a set of geographic coordinates.
    pub fn resolve<'a, I>(&self, coords: I) -> Result<Projector, Error>
    where
        I: IntoIterator<Item = &'a Coord<f64>>,
    {
        match *self {
            ProjectionConfig::Planar => Ok(Projector::Planar),
            ProjectionConfig::Utm { zone, north } => Ok(Projector::Utm(UtmZone::new(zone, north)?)),
            ProjectionConfig::Auto => {
                let (mut sum_x, mut sum_y, mut count) = (0.0, 0.0, 0usize);
                for coord in coords {
                    sum_x += coord.x;
                    sum_y += coord.y;
                    count += 1;
                }
                if count == 0 {
                    return Err(Error::EmptyInput);
                }
                #[allow(clippy::cast_precision_loss)]
                let (lon, lat) = (sum_x / count as f64, sum_y / count as f64);
                Ok(Projector::Utm(UtmZone::containing(lon, lat)?))
            }
        }
    }
}

/// A UTM zone with its hemisphere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtmZone {
    number: u8,
    north: bool,
}

impl UtmZone {
    pub fn new(number: u8, north: bool) -> Result<Self, Error> {
        if !(1..=60).contains(&number) {
            return Err(Error::InvalidConfiguration(format!(
                "UTM zone {number} out of range (1-60)"
            )));
        }
        Ok(Self { number, north })
    }

    /// Zone containing a longitude/latitude, honouring the Norway and
    /// Svalbard exceptions.
    pub fn containing(lon: f64, lat: f64) -> Result<Self, Error> {
        check_latitude(lat)?;
        let number = if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
            32
        } else if (72.0..=84.0).contains(&lat) && lon >= 0.0 && lon < 42.0 {
            match lon {
                l if l < 9.0 => 31,
                l if l < 21.0 => 33,
                l if l < 33.0 => 35,
                _ => 37,
            }
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let zone = (((lon + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u8;
            zone
        };
        Ok(Self {
            number,
            north: lat >= 0.0,
        })
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn is_north(&self) -> bool {
        self.north
    }

    pub fn central_meridian(&self) -> f64 {
        f64::from(self.number) * 6.0 - 183.0
    }

    /// Forward projection to (easting, northing) in metres.
    pub fn forward(&self, lon: f64, lat: f64) -> Result<Coord<f64>, Error> {
        check_latitude(lat)?;

        let e = WGS84_E2;
        let e2 = e * e;
        let e3 = e2 * e;
        let e_p2 = e / (1.0 - e);

        let m1 = 1.0 - e / 4.0 - 3.0 * e2 / 64.0 - 5.0 * e3 / 256.0;
        let m2 = 3.0 * e / 8.0 + 3.0 * e2 / 32.0 + 45.0 * e3 / 1024.0;
        let m3 = 15.0 * e2 / 256.0 + 45.0 * e3 / 1024.0;
        let m4 = 35.0 * e3 / 3072.0;

        let lat_rad = lat.to_radians();
        let (lat_sin, lat_cos) = lat_rad.sin_cos();
        let lat_tan = lat_sin / lat_cos;
        let lat_tan2 = lat_tan * lat_tan;
        let lat_tan4 = lat_tan2 * lat_tan2;

        let n = WGS84_A / (1.0 - e * lat_sin * lat_sin).sqrt();
        let c = e_p2 * lat_cos * lat_cos;
        let a = lat_cos * normalize_radians((lon - self.central_meridian()).to_radians());
        let m = WGS84_A
            * (m1 * lat_rad - m2 * (2.0 * lat_rad).sin() + m3 * (4.0 * lat_rad).sin()
                - m4 * (6.0 * lat_rad).sin());

        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a3 * a;
        let a5 = a4 * a;
        let a6 = a5 * a;

        let easting = UTM_K0
            * n
            * (a + a3 / 6.0 * (1.0 - lat_tan2 + c)
                + a5 / 120.0 * (5.0 - 18.0 * lat_tan2 + lat_tan4 + 72.0 * c - 58.0 * e_p2))
            + FALSE_EASTING;

        let mut northing = UTM_K0
            * (m + n
                * lat_tan
                * (a2 / 2.0
                    + a4 / 24.0 * (5.0 - lat_tan2 + 9.0 * c + 4.0 * c * c)
                    + a6 / 720.0 * (61.0 - 58.0 * lat_tan2 + lat_tan4 + 600.0 * c - 330.0 * e_p2)));
        if !self.north {
            northing += FALSE_NORTHING_SOUTH;
        }

        Ok(Coord {
            x: easting,
            y: northing,
        })
    }
}

/// Projector fixed for the lifetime of one graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projector {
    Utm(UtmZone),
    Planar,
}

impl Projector {
    /// Projects a geographic (x = longitude, y = latitude) coordinate.
    pub fn project(&self, coord: Coord<f64>) -> Result<Coord<f64>, Error> {
        match self {
            Projector::Utm(zone) => zone.forward(coord.x, coord.y),
            Projector::Planar => Ok(coord),
        }
    }
}

fn check_latitude(lat: f64) -> Result<(), Error> {
    if (-80.0..=84.0).contains(&lat) {
        Ok(())
    } else {
        Err(Error::Projection(format!(
            "Latitude {lat} out of UTM range (-80, 84)"
        )))
    }
}

fn normalize_radians(value: f64) -> f64 {
    use std::f64::consts::PI;
    (value + PI).rem_euclid(2.0 * PI) - PI
}
