// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Program configuration, read from
//! `$XDG_CONFIG_HOME/photo_itinerary/config.json` if present.

use std::{
  fs,
  path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{io::ReaderKind, prim::{self, MissingTimestamps}};

const CONFIG_FILE: &str = "config.json";

/// All fields are optional in the file; missing ones take the defaults below.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Fewest images worth building a route from.
  pub min_images:         usize,
  /// Fewest geocoded photos needed to draw a route.
  pub min_points:         usize,
  /// Image file extensions, case-insensitive.
  pub extensions:         Vec<String>,
  /// Capture time tags, highest priority first.
  pub timestamp_tags:     Vec<String>,
  pub missing_timestamps: MissingTimestamps,
  pub reader:             ReaderKind,
  /// `ExifTool` program, for `ReaderKind::Exiftool`.
  pub exiftool:           PathBuf,
  /// Where rendered routes go when no output file is given.
  pub output_dir:         PathBuf,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      min_images:         3,
      min_points:         2,
      extensions:         Vec::from(["jpg".to_string(), "jpeg".to_string()]),
      timestamp_tags:     prim::TIMESTAMP_TAGS.map(str::to_string).to_vec(),
      missing_timestamps: MissingTimestamps::First,
      reader:             ReaderKind::Exif,
      exiftool:           PathBuf::from("exiftool"),
      output_dir:         PathBuf::from("data/output"),
    }
  }
}

impl Config {
  /// Loads from `path` if given, else from the XDG config directory. Falls
  /// back to defaults only if there is no XDG config file.
  pub fn load(path: Option<&Path>) -> Result<Config, String> {
    if let Some(path) = path {
      return Self::from_file(path);
    }

    let xdg_dirs = xdg::BaseDirectories::with_prefix(env!("CARGO_PKG_NAME"));
    match xdg_dirs.find_config_file(CONFIG_FILE) {
      Some(path) => Self::from_file(&path),
      None => {
        log::debug!("No config file found. Using defaults.");
        Ok(Config::default())
      }
    }
  }

  fn from_file(path: &Path) -> Result<Config, String> {
    log::debug!("Reading config from {}.", path.display());

    let contents = fs::read_to_string(path)
      .map_err(|e| format!("{}: Failed to read config ({e}).", path.display()))?;

    Self::from_json(&contents).map_err(|e| format!("{}: {e}", path.display()))
  }

  fn from_json(contents: &str) -> Result<Config, String> {
    let config: Config =
      serde_json::from_str(contents).map_err(|e| format!("Invalid config ({e})."))?;

    if config.min_points < 2 {
      return Err(format!(
        "Invalid config (min_points must be at least 2, got {}).",
        config.min_points
      ));
    }
    if config.extensions.is_empty() {
      return Err("Invalid config (no extensions).".to_string());
    }

    Ok(config)
  }
}
