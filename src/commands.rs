// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Program subcommands.

use std::path::{Path, PathBuf};

use crate::{
  config::Config,
  io::{self, ExifReader, ExifToolReader, MetadataReader, ReaderKind},
  itinerary::{self, Itinerary},
  render::{self, RenderFormat},
};

/// Finds the images under `inputs`, orders the geocoded ones by capture time
/// and writes them as a route to `output` (or the config's output directory).
pub fn route(
  config: &Config,
  inputs: &[PathBuf],
  output: Option<&Path>,
  format: RenderFormat,
) -> Result<(), String> {
  let images = io::collect_images(inputs, &config.extensions)?;
  log::info!("Found {} images.", images.len());

  itinerary::check_image_count(images.len(), config.min_images).map_err(|e| e.to_string())?;

  let reader = make_reader(config)?;
  let itinerary =
    Itinerary::build(&images, reader.as_ref(), config).map_err(|e| e.to_string())?;

  let renderer = format.renderer();
  let output = output.map_or_else(
    || config.output_dir.join(renderer.file_name()),
    Path::to_path_buf,
  );

  render::write_route(renderer.as_ref(), &itinerary, &output)
}

/// Prints the raw metadata of the photo at `path`, then the point it would
/// contribute to a route, if any.
pub fn inspect(config: &Config, path: &Path) -> Result<(), String> {
  let reader = make_reader(config)?;
  let metadata = reader.read(path)?;

  println!("{}", to_json(&metadata)?);

  match itinerary::point_from_metadata(path, &metadata, &config.timestamp_tags) {
    Some(point) => println!("{}", to_json(&point)?),
    None => log::info!("{}: Would not be part of a route.", path.display()),
  }

  Ok(())
}

fn make_reader(config: &Config) -> Result<Box<dyn MetadataReader>, String> {
  match config.reader {
    ReaderKind::Exif => Ok(Box::new(ExifReader)),
    ReaderKind::Exiftool => {
      io::exiftool_check(&config.exiftool)?;
      Ok(Box::new(ExifToolReader::new(config.exiftool.clone())))
    }
  }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
  serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize ({e})."))
}
