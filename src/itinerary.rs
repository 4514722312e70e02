// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Turns a set of photos into a time-ordered route.

use std::{
  fmt::{self, Display, Formatter},
  path::{Path, PathBuf},
};

use crate::{
  config::Config,
  io::MetadataReader,
  prim::{self, MissingTimestamps, PhotoPoint, RawGpsBlock, RawMetadata},
};

/// Reasons a batch of photos cannot become a route.
#[derive(Debug, PartialEq, Eq)]
pub enum ItineraryError {
  /// Too few images were supplied to try.
  InsufficientImages { found: usize, required: usize },
  /// Too few images had a usable GPS position.
  InsufficientPoints { found: usize, required: usize },
}

impl Display for ItineraryError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      ItineraryError::InsufficientImages { found, required } => write!(
        f,
        "At least {required} images are needed, but only {found} were found."
      ),
      ItineraryError::InsufficientPoints { found, required } => write!(
        f,
        "At least {required} photos with GPS data are needed, but only {found} had any."
      ),
    }
  }
}

impl std::error::Error for ItineraryError {}

/// Geocoded photos, in route order.
#[derive(Debug)]
pub struct Itinerary {
  points: Vec<PhotoPoint>,
}

impl Itinerary {
  /// Reads each of `images`, keeps those with a GPS position, and orders them
  /// by capture time. A photo that can't be read or has no position is logged
  /// and left out; it never fails the batch.
  pub fn build(
    images: &[PathBuf],
    reader: &dyn MetadataReader,
    config: &Config,
  ) -> Result<Itinerary, ItineraryError> {
    log::info!("Extracting GPS data from {} images.", images.len());

    let points = images
      .iter()
      .filter_map(|path| locate_photo(path, reader, &config.timestamp_tags))
      .collect();

    Self::from_points(points, config.min_points, config.missing_timestamps)
  }

  /// Orders already-located points, requiring at least `min_points`.
  pub fn from_points(
    mut points: Vec<PhotoPoint>,
    min_points: usize,
    missing: MissingTimestamps,
  ) -> Result<Itinerary, ItineraryError> {
    if points.len() < min_points {
      return Err(ItineraryError::InsufficientPoints {
        found:    points.len(),
        required: min_points,
      });
    }

    prim::sort_points(&mut points, missing);

    Ok(Itinerary { points })
  }

  pub fn points(&self) -> &[PhotoPoint] {
    &self.points
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }
}

/// Fails if fewer than `required` images were found.
pub fn check_image_count(found: usize, required: usize) -> Result<(), ItineraryError> {
  if found < required {
    return Err(ItineraryError::InsufficientImages { found, required });
  }

  Ok(())
}

/// Reads one photo and builds its point. `None` if the photo can't be read or
/// has no usable GPS position.
pub fn locate_photo<S: AsRef<str>>(
  path: &Path,
  reader: &dyn MetadataReader,
  timestamp_tags: &[S],
) -> Option<PhotoPoint> {
  match reader.read(path) {
    Ok(metadata) => point_from_metadata(path, &metadata, timestamp_tags),
    Err(e) => {
      log::warn!("{e} Skipping.");
      None
    }
  }
}

/// Builds the point for the photo at `path` from its already-read metadata.
/// A missing capture time only leaves the timestamp empty.
pub fn point_from_metadata<S: AsRef<str>>(
  path: &Path,
  metadata: &RawMetadata,
  timestamp_tags: &[S],
) -> Option<PhotoPoint> {
  if metadata.is_empty() {
    log::warn!("{}: No metadata. Skipping.", path.display());
    return None;
  }

  let Some(block) = RawGpsBlock::from_metadata(metadata) else {
    log::warn!("{}: No GPS data. Skipping.", path.display());
    return None;
  };

  let coordinate = match block.to_coordinate() {
    Ok(coordinate) => coordinate,
    Err(e) => {
      log::warn!("{}: Unusable GPS data ({e}). Skipping.", path.display());
      return None;
    }
  };

  if !coordinate.is_in_range() {
    log::warn!(
      "{}: GPS position out of range ({}, {}).",
      path.display(),
      coordinate.latitude,
      coordinate.longitude
    );
  }

  let timestamp = prim::extract_timestamp(metadata, timestamp_tags);
  if timestamp.is_none() {
    log::debug!("{}: No capture time.", path.display());
  }

  let filename = path
    .file_name()
    .map_or_else(|| path.display().to_string(), |f| f.to_string_lossy().into_owned());

  log::debug!("{}: Located at {coordinate}.", path.display());

  Some(PhotoPoint::new(filename, coordinate, timestamp))
}
