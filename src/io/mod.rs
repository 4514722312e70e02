// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Reading metadata from image files, and finding those files.

mod exif;
mod exiftool;
mod files;

use std::path::Path;

use serde::Deserialize;

pub use self::exif::ExifReader;
pub use self::exiftool::{ExifToolReader, exiftool_check};
pub use self::files::*;
use crate::prim::RawMetadata;

/// Something that can turn an image file into its raw metadata.
///
/// Implementations return `Ok` with an empty mapping for a readable file that
/// simply has no metadata, and `Err` when the file cannot be read at all.
pub trait MetadataReader: Send + Sync {
  fn read(&self, path: &Path) -> Result<RawMetadata, String>;
}

/// Which `MetadataReader` to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReaderKind {
  /// Parse EXIF in-process.
  #[default]
  Exif,
  /// Run `ExifTool`.
  Exiftool,
}
