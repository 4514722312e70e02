// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! A geocoded photo, and how a set of them is put in route order.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

use super::DecimalCoordinate;

/// Date & time format used when handing timestamps to renderers.
pub const POINT_DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

/// One geocoded photo. Photos without a coordinate never become a point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PhotoPoint {
  pub filename:  String,
  pub latitude:  f64,
  pub longitude: f64,
  #[serde(serialize_with = "serialize_timestamp")]
  pub timestamp: Option<NaiveDateTime>,
}

impl PhotoPoint {
  pub fn new(
    filename: impl Into<String>,
    coordinate: DecimalCoordinate,
    timestamp: Option<NaiveDateTime>,
  ) -> Self {
    Self {
      filename: filename.into(),
      latitude: coordinate.latitude,
      longitude: coordinate.longitude,
      timestamp,
    }
  }

  pub fn coordinate(&self) -> DecimalCoordinate {
    DecimalCoordinate {
      latitude:  self.latitude,
      longitude: self.longitude,
    }
  }
}

/// Where points without a capture time go in the route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MissingTimestamps {
  /// Before every timestamped point.
  #[default]
  First,
  /// After every timestamped point.
  Last,
}

/// Sorts `points` by timestamp, ascending. Stable, so points with equal (or
/// equally missing) timestamps keep their relative order.
pub fn sort_points(points: &mut [PhotoPoint], missing: MissingTimestamps) {
  points.sort_by(|a, b| compare_timestamps(a.timestamp, b.timestamp, missing));
}

fn compare_timestamps(
  a: Option<NaiveDateTime>,
  b: Option<NaiveDateTime>,
  missing: MissingTimestamps,
) -> Ordering {
  match (a, b, missing) {
    (Some(a), Some(b), _) => a.cmp(&b),
    (None, None, _) => Ordering::Equal,
    (None, Some(_), MissingTimestamps::First) | (Some(_), None, MissingTimestamps::Last) => {
      Ordering::Less
    }
    (None, Some(_), MissingTimestamps::Last) | (Some(_), None, MissingTimestamps::First) => {
      Ordering::Greater
    }
  }
}

#[allow(clippy::ref_option)]
fn serialize_timestamp<S: Serializer>(
  timestamp: &Option<NaiveDateTime>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  match timestamp {
    Some(t) => serializer.serialize_some(&t.format(POINT_DATETIME_FMT).to_string()),
    None => serializer.serialize_none(),
  }
}
