mod registry;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Linear units of a CRS's map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    /// Geographic longitude/latitude.
    Degrees,
    /// Projected, one map unit is one meter.
    Meters,
    /// Projected in some other linear unit (feet, kilometers, ...).
    Other { to_meter: f64 },
}

impl Units {
    /// True if map units are already meters, i.e. distances can be measured directly.
    #[inline] pub fn is_metric(&self) -> bool { matches!(self, Units::Meters) }

    /// True for geographic (angular) coordinates.
    #[inline] pub fn is_angular(&self) -> bool { matches!(self, Units::Degrees) }
}

/// A coordinate reference system: an optional authority code plus the
/// PROJ.4 definition used to drive the projection library.
///
/// `Crs` is a plain value. It (de)serializes as its descriptor string
/// (`"EPSG:4326"`, or the PROJ.4 definition when no authority is known).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Crs {
    authority: Option<String>,
    definition: String,
    units: Units,
}

impl Crs {
    /// WGS84 longitude/latitude (EPSG:4326), the geographic reference for zone selection.
    pub fn wgs84() -> Self {
        Self {
            authority: Some("EPSG:4326".to_string()),
            definition: registry::WGS84_GEOGRAPHIC.to_string(),
            units: Units::Degrees,
        }
    }

    /// WGS84 UTM zone `zone` (1..=60), northern or southern hemisphere.
    pub fn utm(zone: u8, north: bool) -> Result<Self, ProjectionError> {
        if !(1..=60).contains(&zone) {
            return Err(ProjectionError::unknown(format!("UTM zone {zone}")));
        }
        Self::from_epsg(if north { 32600 } else { 32700 } + u32::from(zone))
    }

    /// Resolve an EPSG code from the built-in registry.
    pub fn from_epsg(code: u32) -> Result<Self, ProjectionError> {
        let definition = registry::proj4_definition(code)
            .ok_or_else(|| ProjectionError::unknown(format!("EPSG:{code}")))?;
        let units = units_of(&definition)?;
        Ok(Self {
            authority: Some(format!("EPSG:{code}")),
            definition: definition.into_owned(),
            units,
        })
    }

    /// Build a CRS from a raw PROJ.4 definition (`+proj=...`).
    pub fn from_proj4(definition: &str) -> Result<Self, ProjectionError> {
        let definition = definition.trim();
        let units = units_of(definition)?;
        Ok(Self { authority: None, definition: definition.to_string(), units })
    }

    /// Authority code such as `"EPSG:4326"`, if known.
    #[inline] pub fn authority(&self) -> Option<&str> { self.authority.as_deref() }

    /// EPSG code, if the authority is EPSG.
    pub fn epsg(&self) -> Option<u32> {
        self.authority.as_deref()
            .and_then(|authority| authority.strip_prefix("EPSG:"))
            .and_then(|code| code.parse().ok())
    }

    /// PROJ.4 definition string.
    #[inline] pub fn definition(&self) -> &str { &self.definition }

    /// Map units of this CRS.
    #[inline] pub fn units(&self) -> Units { self.units }

    /// True if map units are meters.
    #[inline] pub fn is_metric(&self) -> bool { self.units.is_metric() }

    /// True if coordinates are geographic longitude/latitude in degrees.
    #[inline] pub fn is_geographic(&self) -> bool { self.units.is_angular() }

    /// Two CRS describe the same coordinate space (authority aliases included).
    #[inline]
    pub fn same_space(&self, other: &Crs) -> bool { self.definition == other.definition }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.authority {
            Some(authority) => f.write_str(authority),
            None => f.write_str(&self.definition),
        }
    }
}

impl FromStr for Crs {
    type Err = ProjectionError;

    /// Parse `EPSG:<code>`, OGC URNs (`urn:ogc:def:crs:EPSG::<code>`,
    /// `urn:ogc:def:crs:OGC:1.3:CRS84`) or a raw PROJ.4 string.
    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let trimmed = descriptor.trim();
        if trimmed.starts_with('+') {
            return Self::from_proj4(trimmed);
        }

        let upper = trimmed.to_ascii_uppercase();
        if upper == "CRS84" || upper == "OGC:CRS84" || upper.ends_with(":CRS84") {
            return Ok(Self::wgs84());
        }

        let code = if let Some(code) = upper.strip_prefix("EPSG:") {
            code
        } else if let Some(rest) = upper.strip_prefix("URN:OGC:DEF:CRS:EPSG:") {
            // Optional version between the colons: `EPSG::3857` or `EPSG:6.6:3857`.
            rest.rsplit(':').next().unwrap_or(rest)
        } else {
            return Err(ProjectionError::unknown(trimmed));
        };

        let code = code.parse::<u32>().map_err(|_| ProjectionError::unknown(trimmed))?;
        Self::from_epsg(code)
    }
}

impl TryFrom<String> for Crs {
    type Error = ProjectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<Crs> for String {
    fn from(crs: Crs) -> Self { crs.to_string() }
}

/// Meters per unit for PROJ.4 `+units=` names.
fn meters_per_unit(name: &str) -> Option<f64> {
    let factor = match name {
        "m" => 1.0,
        "km" => 1000.0,
        "dm" => 0.1,
        "cm" => 0.01,
        "mm" => 0.001,
        "kmi" => 1852.0,
        "ft" => 0.3048,
        "us-ft" => 1200.0 / 3937.0,
        "yd" => 0.9144,
        "us-yd" => 3600.0 / 3937.0,
        "mi" => 1609.344,
        "us-mi" => 6_336_000.0 / 3937.0,
        "ch" => 20.1168,
        "link" => 0.201168,
        _ => return None,
    };
    Some(factor)
}

/// Derive map units from a PROJ.4 definition.
/// A projected CRS without `+units`/`+to_meter` is in meters, as in PROJ.
fn units_of(definition: &str) -> Result<Units, ProjectionError> {
    let mut proj = None;
    let mut units = None;
    let mut to_meter = None;

    for token in definition.split_whitespace() {
        match token.trim_start_matches('+').split_once('=') {
            Some(("proj", value)) => proj = Some(value),
            Some(("units", value)) => units = Some(value),
            Some(("to_meter", value)) => to_meter = Some(value),
            _ => {}
        }
    }

    let proj = proj.ok_or_else(|| ProjectionError::unknown(definition))?;
    if matches!(proj, "longlat" | "latlong" | "lonlat" | "latlon") {
        return Ok(Units::Degrees);
    }

    let factor = match (to_meter, units) {
        (Some(value), _) => value.parse::<f64>().ok()
            .filter(|factor| factor.is_finite() && *factor > 0.0)
            .ok_or_else(|| ProjectionError::unknown(definition))?,
        (None, Some(name)) => meters_per_unit(name).ok_or_else(|| ProjectionError::unknown(definition))?,
        (None, None) => 1.0,
    };

    if factor == 1.0 { Ok(Units::Meters) } else { Ok(Units::Other { to_meter: factor }) }
}
