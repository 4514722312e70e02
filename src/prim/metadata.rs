// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Raw, reader-agnostic metadata as read from an image file.

use std::collections::BTreeMap;

use serde::Serialize;

/// Name of the nested block holding GPS tags, matching the EXIF tag that points
/// at the GPS IFD.
pub const GPS_INFO: &str = "GPSInfo";

/// An unsigned or signed EXIF rational, kept as its raw parts so that the
/// division (and its failure modes) happen in one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rational {
  pub num:   i64,
  pub denom: i64,
}

impl Rational {
  pub fn new(num: i64, denom: i64) -> Self {
    Self { num, denom }
  }
}

/// A single tag's value. EXIF tags are arrays, so most variants hold a `Vec`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
  Text(String),
  Integers(Vec<i64>),
  Rationals(Vec<Rational>),
  Reals(Vec<f64>),
  Bytes(Vec<u8>),
  Nested(RawMetadata),
}

impl TagValue {
  /// The value as text, if it is text.
  pub fn as_text(&self) -> Option<&str> {
    match self {
      TagValue::Text(text) => Some(text),
      _ => None,
    }
  }
}

/// Mapping of human-readable tag names to raw values for one image.
///
/// GPS tags live under the nested [`GPS_INFO`] block; everything else is flat.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawMetadata {
  tags: BTreeMap<String, TagValue>,
}

impl RawMetadata {
  pub fn get(&self, tag: &str) -> Option<&TagValue> {
    self.tags.get(tag)
  }

  /// Gets the nested GPS block, if present and actually nested.
  pub fn gps_info(&self) -> Option<&RawMetadata> {
    match self.tags.get(GPS_INFO)? {
      TagValue::Nested(gps) => Some(gps),
      _ => None,
    }
  }

  /// Inserts a GPS tag, creating the nested block on first use.
  pub fn insert_gps(&mut self, tag: impl Into<String>, value: TagValue) {
    let entry = self
      .tags
      .entry(GPS_INFO.to_string())
      .or_insert_with(|| TagValue::Nested(RawMetadata::default()));

    if let TagValue::Nested(gps) = entry {
      gps.insert(tag, value);
    } else {
      log::debug!("{GPS_INFO} is not a nested block. Replacing.");
      let mut gps = RawMetadata::default();
      gps.insert(tag, value);
      *entry = TagValue::Nested(gps);
    }
  }

  pub fn insert(&mut self, tag: impl Into<String>, value: TagValue) {
    self.tags.insert(tag.into(), value);
  }

  pub fn is_empty(&self) -> bool {
    self.tags.is_empty()
  }

  pub fn len(&self) -> usize {
    self.tags.len()
  }
}
