// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Metadata reading via `ExifTool`.

use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
  process::Command,
};

use serde_json::{Map, Value};

use super::MetadataReader;
use crate::prim::{RawMetadata, TagValue};

/// `-n` keeps values machine-readable (e.g. `N` rather than `North`, EXIF's
/// own date format), `-json` for parsing with `serde_json`.
const READ_ARGS: [&str; 3] = ["-n", "-json", "-EXIF:all"];

/// Minimum supported (tested) version of `ExifTool`.
const EXIFTOOL_MIN_VERSION: (u32, u32) = (12, 0);

/// Reads metadata by running `ExifTool` once per file.
pub struct ExifToolReader {
  program: PathBuf,
}

impl ExifToolReader {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
    }
  }
}

impl MetadataReader for ExifToolReader {
  fn read(&self, path: &Path) -> Result<RawMetadata, String> {
    let mut args = Vec::from(READ_ARGS.map(OsStr::new));
    args.push(path.as_os_str());

    let stdout = run_exiftool(&self.program, args)?;
    log::trace!("{}:\n{}", path.display(), String::from_utf8_lossy(&stdout));

    let mut files = parse_vec(&stdout)?;
    if files.is_empty() {
      return Ok(RawMetadata::default());
    }

    Ok(to_raw_metadata(files.swap_remove(0)))
  }
}

/// Check that `ExifTool` is present and new enough.
pub fn exiftool_check(program: &Path) -> Result<(), String> {
  version_check(
    &run_exiftool(program, ["-ver"])?,
    EXIFTOOL_MIN_VERSION,
  )
}

/// Runs `ExifTool` with `args`, returning stdout.
fn run_exiftool<I: IntoIterator<Item = S>, S: AsRef<OsStr>>(
  program: &Path,
  args: I,
) -> Result<Vec<u8>, String> {
  let mut cmd = Command::new(program);
  cmd.args(args);

  let output = cmd.output().map_err(|e| {
    format!(
      "ExifTool failed to run.\nArgs:\n{}\nError:\n{e}",
      cmd
        .get_args()
        .collect::<Vec<_>>()
        .join(OsStr::new(" "))
        .display(),
    )
  })?;

  if !output.status.success() {
    return Err(format!(
      "ExifTool did not run successfully.\nArgs:\n{}\nstderr:\n{}",
      cmd
        .get_args()
        .collect::<Vec<_>>()
        .join(OsStr::new(" "))
        .display(),
      String::from_utf8_lossy(&output.stderr)
    ));
  }

  Ok(output.stdout)
}

/// Parses `ExifTool`'s JSON-formatted output: one object per file.
fn parse_vec(metadata: &[u8]) -> Result<Vec<Map<String, Value>>, String> {
  // `serde_json` doesn't handle the empty case.
  if metadata.is_empty() {
    return Ok(Vec::new());
  }

  serde_json::from_slice(metadata).map_err(|e| {
    format!(
      "Failed to parse ExifTool output as metadata ({e}).\nstdout:\n{}",
      String::from_utf8_lossy(metadata)
    )
  })
}

/// Converts one file's JSON object into `RawMetadata`.
///
/// With `-n`, `ExifTool` has already combined `GPSLatitude` & `GPSLongitude`
/// into unsigned decimal degrees. These become `[degrees, 0, 0]` so they are
/// handled like any other DMS triple.
fn to_raw_metadata(tags: Map<String, Value>) -> RawMetadata {
  let mut metadata = RawMetadata::default();

  for (tag, value) in tags {
    if tag == "SourceFile" {
      continue;
    }

    let Some(value) = convert_value(value) else {
      log::trace!("Skipping {tag}.");
      continue;
    };

    if tag.starts_with("GPS") {
      let value = match (tag.as_str(), value) {
        ("GPSLatitude" | "GPSLongitude", TagValue::Reals(reals)) if reals.len() == 1 => {
          TagValue::Reals(vec![reals[0], 0.0, 0.0])
        }
        #[allow(clippy::cast_precision_loss)]
        ("GPSLatitude" | "GPSLongitude", TagValue::Integers(ints)) if ints.len() == 1 => {
          TagValue::Reals(vec![ints[0] as f64, 0.0, 0.0])
        }
        (_, value) => value,
      };
      metadata.insert_gps(tag, value);
    } else {
      metadata.insert(tag, value);
    }
  }

  metadata
}

fn convert_value(value: Value) -> Option<TagValue> {
  let converted = match value {
    Value::String(s) => TagValue::Text(s),
    Value::Bool(b) => TagValue::Text(b.to_string()),
    Value::Number(n) => {
      if let Some(i) = n.as_i64() {
        TagValue::Integers(vec![i])
      } else {
        TagValue::Reals(vec![n.as_f64()?])
      }
    }
    Value::Array(values) => {
      let reals = values.iter().map(Value::as_f64).collect::<Option<Vec<_>>>();
      match reals {
        Some(reals) => TagValue::Reals(reals),
        None => TagValue::Text(
          values
            .iter()
            .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
            .collect::<Vec<_>>()
            .join(" "),
        ),
      }
    }
    Value::Object(map) => TagValue::Nested(to_raw_metadata(map)),
    Value::Null => return None,
  };

  Some(converted)
}

/// Returns whether `version` is as new or newer than `version_required_min`,
/// where `version` is from `ExifTool`'s stdout.
fn version_check(version: &[u8], version_required_min: (u32, u32)) -> Result<(), String> {
  let version = String::from_utf8_lossy(version);
  let Some((major, minor)) = version.trim().split_once('.') else {
    return Err(format!("Unexpected ExifTool version string: \"{version}\""));
  };

  let major = major.parse::<u32>();
  let minor = minor.parse::<u32>();
  let (Ok(major), Ok(minor)) = (major, minor) else {
    return Err(format!("Unexpected ExifTool version: {version}"));
  };

  if major > version_required_min.0
    || (major == version_required_min.0 && minor >= version_required_min.1)
  {
    Ok(())
  } else {
    Err(format!(
      "ExifTool version {major}.{minor} is too old (needs {}.{} or newer).",
      version_required_min.0, version_required_min.1
    ))
  }
}
