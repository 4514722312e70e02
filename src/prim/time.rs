// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Capture time extraction.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::RawMetadata;

/// EXIF's date & time format, e.g. `2024:03:15 10:30:00`.
pub const EXIF_DATETIME_FMT: &str = "%Y:%m:%d %H:%M:%S";

/// Tags consulted for capture time, highest priority first. Covers both EXIF
/// names (`DateTimeDigitized`, `DateTime`) and `ExifTool`'s names for the same
/// tags (`CreateDate`, `ModifyDate`).
pub const TIMESTAMP_TAGS: [&str; 5] = [
  "DateTimeOriginal",  // Time of shutter actuation.
  "DateTimeDigitized", // Time of digitization.
  "CreateDate",
  "DateTime", // Time of last modification.
  "ModifyDate",
];

/// `chrono` accepts single-digit fields, EXIF does not.
static EXIF_DATETIME_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\d{4}:\d{2}:\d{2} \d{2}:\d{2}:\d{2}$").unwrap());

/// Parses an EXIF date & time string, exactly `YYYY:MM:DD HH:MM:SS`.
pub fn parse_exif_date_time(date_time: &str) -> Result<NaiveDateTime, String> {
  if !EXIF_DATETIME_RE.is_match(date_time) {
    return Err(format!(
      "Date Time string `{date_time}` did not match regex."
    ));
  }

  NaiveDateTime::parse_from_str(date_time, EXIF_DATETIME_FMT)
    .map_err(|e| format!("Unable to parse date & time `{date_time}` ({e})."))
}

/// Finds the capture time from the first tag in `tags` that is present and
/// parses. Tags that are present but malformed are skipped.
pub fn extract_timestamp<S: AsRef<str>>(metadata: &RawMetadata, tags: &[S]) -> Option<NaiveDateTime> {
  for tag in tags.iter().map(AsRef::as_ref) {
    let Some(value) = metadata.get(tag) else {
      continue;
    };

    let Some(text) = value.as_text() else {
      log::debug!("{tag} is not text. Skipping.");
      continue;
    };

    match parse_exif_date_time(text) {
      Ok(date_time) => return Some(date_time),
      Err(e) => log::debug!("{tag}: {e} Skipping."),
    }
  }

  None
}
