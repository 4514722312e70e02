// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Conversion of EXIF GPS tags (degrees, minutes & seconds with hemisphere
//! references) into signed decimal degrees.

use std::fmt::{self, Display, Formatter};

use super::{Rational, RawMetadata, TagValue};

/// Why a GPS block could not be turned into a coordinate.
#[derive(Debug, PartialEq)]
pub enum GpsError {
  /// DMS value did not have exactly three components.
  Arity(usize),
  /// Rational component with a zero denominator.
  ZeroDenominator,
  /// Real component, or the combined value, that is NaN or infinite.
  NonFinite,
  /// DMS value of a type that cannot hold numbers (e.g. text).
  WrongType,
}

impl Display for GpsError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      GpsError::Arity(n) => write!(f, "Expected 3 DMS components, found {n}"),
      GpsError::ZeroDenominator => write!(f, "Zero denominator in DMS component"),
      GpsError::NonFinite => write!(f, "Non-finite DMS value"),
      GpsError::WrongType => write!(f, "DMS value is not numeric"),
    }
  }
}

/// The four GPS tags needed for a position, still in their raw form.
///
/// Only constructed when all four are present.
#[derive(Clone, Debug, PartialEq)]
pub struct RawGpsBlock {
  pub latitude:      TagValue,
  pub latitude_ref:  TagValue,
  pub longitude:     TagValue,
  pub longitude_ref: TagValue,
}

impl RawGpsBlock {
  /// Pulls the GPS block out of `metadata`. Returns `None` if the nested GPS
  /// block or any of the four tags is missing.
  pub fn from_metadata(metadata: &RawMetadata) -> Option<Self> {
    let gps = metadata.gps_info()?;

    Some(Self {
      latitude:      gps.get("GPSLatitude")?.clone(),
      latitude_ref:  gps.get("GPSLatitudeRef")?.clone(),
      longitude:     gps.get("GPSLongitude")?.clone(),
      longitude_ref: gps.get("GPSLongitudeRef")?.clone(),
    })
  }

  /// Converts to signed decimal degrees. Either both axes convert or neither
  /// is returned.
  ///
  /// Latitude is negated unless its reference is exactly `N`, and longitude
  /// unless exactly `E`. Anything else (`n`, `X`, non-text) counts as the
  /// negative hemisphere.
  pub fn to_coordinate(&self) -> Result<DecimalCoordinate, GpsError> {
    let mut latitude = dms_value_to_degrees(&self.latitude)?;
    if !is_ref(&self.latitude_ref, "N") {
      latitude = -latitude;
    }

    let mut longitude = dms_value_to_degrees(&self.longitude)?;
    if !is_ref(&self.longitude_ref, "E") {
      longitude = -longitude;
    }

    Ok(DecimalCoordinate {
      latitude,
      longitude,
    })
  }
}

/// Signed decimal degrees. Not range-checked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecimalCoordinate {
  pub latitude:  f64,
  pub longitude: f64,
}

impl DecimalCoordinate {
  /// Whether this lies within [-90, 90] x [-180, 180]. Corrupt camera data can
  /// produce coordinates outside this.
  pub fn is_in_range(&self) -> bool {
    (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
  }

  /// Splits into unsigned DMS and hemisphere references, e.g. for display.
  pub fn to_dms(&self) -> ((Dms, char), (Dms, char)) {
    let lat_ref = if self.latitude < 0.0 { 'S' } else { 'N' };
    let lon_ref = if self.longitude < 0.0 { 'W' } else { 'E' };

    (
      (Dms::from_degrees(self.latitude.abs()), lat_ref),
      (Dms::from_degrees(self.longitude.abs()), lon_ref),
    )
  }
}

impl Display for DecimalCoordinate {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let ((lat, lat_ref), (lon, lon_ref)) = self.to_dms();
    write!(f, "{lat}{lat_ref}, {lon}{lon_ref}")
  }
}

/// Unsigned degrees, minutes & seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dms {
  pub degrees: f64,
  pub minutes: f64,
  pub seconds: f64,
}

impl Dms {
  pub fn from_degrees(value: f64) -> Self {
    let degrees = value.trunc();
    let minutes_full = (value - degrees) * 60.0;
    let minutes = minutes_full.trunc();
    let seconds = (minutes_full - minutes) * 60.0;

    Self {
      degrees,
      minutes,
      seconds,
    }
  }

  #[cfg(test)]
  pub fn to_degrees(&self) -> f64 {
    dms_to_lat_lon(self.degrees, self.minutes, self.seconds)
  }
}

impl Display for Dms {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}°{}'{:.2}\"",
      self.degrees, self.minutes, self.seconds
    )
  }
}

/// Converts degrees, minutes and seconds to latitude and longitude.
pub fn dms_to_lat_lon(deg: f64, min: f64, sec: f64) -> f64 {
  deg + (min / 60.0) + (sec / 3600.0)
}

/// Converts a rational to a float, refusing to divide by zero.
pub fn rational_to_f64(rational: Rational) -> Result<f64, GpsError> {
  if rational.denom == 0 {
    return Err(GpsError::ZeroDenominator);
  }

  #[allow(clippy::cast_precision_loss)]
  Ok(rational.num as f64 / rational.denom as f64)
}

/// Converts a raw DMS tag value (three rationals or three reals) into unsigned
/// decimal degrees.
fn dms_value_to_degrees(value: &TagValue) -> Result<f64, GpsError> {
  let components = match value {
    TagValue::Rationals(rationals) => rationals
      .iter()
      .map(|r| rational_to_f64(*r))
      .collect::<Result<Vec<_>, _>>()?,
    TagValue::Reals(reals) => {
      if reals.iter().any(|r| !r.is_finite()) {
        return Err(GpsError::NonFinite);
      }
      reals.clone()
    }
    #[allow(clippy::cast_precision_loss)]
    TagValue::Integers(integers) => integers.iter().map(|i| *i as f64).collect(),
    TagValue::Text(_) | TagValue::Bytes(_) | TagValue::Nested(_) => {
      return Err(GpsError::WrongType);
    }
  };

  let [deg, min, sec] = components[..] else {
    return Err(GpsError::Arity(components.len()));
  };

  // Finite parts can still overflow once combined.
  let degrees = dms_to_lat_lon(deg, min, sec);
  if !degrees.is_finite() {
    return Err(GpsError::NonFinite);
  }

  Ok(degrees)
}

/// Whether `value` is exactly the text `positive`.
fn is_ref(value: &TagValue, positive: &str) -> bool {
  value.as_text() == Some(positive)
}
