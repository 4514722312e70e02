// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Test-only utilities.

mod asserts;
mod jpeg;
mod test_dir;

use chrono::NaiveDateTime;
pub use dates::*;
pub use jpeg::*;
pub use test_dir::*;

pub use crate::{assert_err, gps_block, raw_metadata, test_dir, test_path};
use crate::{
  itinerary::Itinerary,
  prim::{DecimalCoordinate, MissingTimestamps, PhotoPoint, Rational, TagValue},
};

pub fn text(value: &str) -> TagValue {
  TagValue::Text(value.to_string())
}

pub fn rationals(parts: &[(i64, i64)]) -> TagValue {
  TagValue::Rationals(parts.iter().map(|(n, d)| Rational::new(*n, *d)).collect())
}

pub fn reals(values: &[f64]) -> TagValue {
  TagValue::Reals(values.to_vec())
}

/// A point at 0°, 0°.
pub fn point(filename: &str, timestamp: Option<NaiveDateTime>) -> PhotoPoint {
  point_at(filename, 0.0, 0.0, timestamp)
}

pub fn point_at(
  filename: &str,
  latitude: f64,
  longitude: f64,
  timestamp: Option<NaiveDateTime>,
) -> PhotoPoint {
  PhotoPoint::new(
    filename,
    DecimalCoordinate {
      latitude,
      longitude,
    },
    timestamp,
  )
}

/// An itinerary of `points`, in the given order (all untimed points stay put).
pub fn itinerary(points: &[PhotoPoint]) -> Itinerary {
  Itinerary::from_points(points.to_vec(), 2, MissingTimestamps::First).unwrap()
}

pub fn type_of<T>(_: T) -> &'static str {
  std::any::type_name::<T>()
}

/// Lets `raw_metadata!` and `gps_block!` take plain literals.
pub trait IntoTagValue {
  fn into_tag_value(self) -> TagValue;
}

impl IntoTagValue for &str {
  fn into_tag_value(self) -> TagValue {
    text(self)
  }
}

impl IntoTagValue for i32 {
  fn into_tag_value(self) -> TagValue {
    TagValue::Integers(vec![i64::from(self)])
  }
}

impl IntoTagValue for f64 {
  fn into_tag_value(self) -> TagValue {
    reals(&[self])
  }
}

impl IntoTagValue for TagValue {
  fn into_tag_value(self) -> TagValue {
    self
  }
}

/// Builds `RawMetadata`. Values are literals, `{ ... }` for a nested block, or
/// a parenthesized `TagValue` expression.
#[macro_export]
macro_rules! raw_metadata {
  (@value { $($key:literal: $value:tt),* $(,)? }) => {
    $crate::prim::TagValue::Nested($crate::raw_metadata!($($key: $value),*))
  };
  (@value ($value:expr)) => {
    $crate::testing::IntoTagValue::into_tag_value($value)
  };
  (@value $value:literal) => {
    $crate::testing::IntoTagValue::into_tag_value($value)
  };
  ($($key:literal: $value:tt),* $(,)?) => {{
    #[allow(unused_mut)]
    let mut metadata = $crate::prim::RawMetadata::default();
    $(
      metadata.insert($key, $crate::raw_metadata!(@value $value));
    )*
    metadata
  }};
}

/// Builds a `RawGpsBlock` from latitude, its reference, longitude and its
/// reference.
#[macro_export]
macro_rules! gps_block {
  ($lat:expr, $lat_ref:expr, $lon:expr, $lon_ref:expr $(,)?) => {
    $crate::prim::RawGpsBlock {
      latitude:      $crate::testing::IntoTagValue::into_tag_value($lat),
      latitude_ref:  $crate::testing::IntoTagValue::into_tag_value($lat_ref),
      longitude:     $crate::testing::IntoTagValue::into_tag_value($lon),
      longitude_ref: $crate::testing::IntoTagValue::into_tag_value($lon_ref),
    }
  };
}
