// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! In-process EXIF reading via `kamadak-exif`.

use std::{fs::File, io::BufReader, path::Path};

use exif::{Context, Field, In, Reader, Value};

use super::MetadataReader;
use crate::prim::{Rational, RawMetadata, TagValue};

/// Reads EXIF from JPEG, TIFF, HEIF, PNG & WebP containers.
#[derive(Default)]
pub struct ExifReader;

impl MetadataReader for ExifReader {
  fn read(&self, path: &Path) -> Result<RawMetadata, String> {
    let file = File::open(path).map_err(|e| format!("{}: Failed to open ({e}).", path.display()))?;

    let exif = match Reader::new().read_from_container(&mut BufReader::new(file)) {
      Ok(exif) => exif,
      Err(exif::Error::NotFound(_)) => {
        log::debug!("{}: No EXIF data.", path.display());
        return Ok(RawMetadata::default());
      }
      Err(e) => return Err(format!("{}: Failed to read EXIF ({e}).", path.display())),
    };

    let mut metadata = RawMetadata::default();

    // Thumbnail IFD repeats some tags; only the primary image counts.
    for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
      let Some(value) = convert_value(&field.value) else {
        log::trace!("{}: Skipping {}.", path.display(), field.tag);
        continue;
      };

      insert_field(&mut metadata, field, value);
    }

    log::trace!("{}: {} tags read.", path.display(), metadata.len());

    Ok(metadata)
  }
}

/// GPS IFD tags go into the nested GPS block, named through `kamadak-exif`'s
/// tag table (unknown tags come out as e.g. `Tag(Gps, 99)`).
fn insert_field(metadata: &mut RawMetadata, field: &Field, value: TagValue) {
  let name = field.tag.to_string();
  if field.tag.context() == Context::Gps {
    metadata.insert_gps(name, value);
  } else {
    metadata.insert(name, value);
  }
}

fn convert_value(value: &Value) -> Option<TagValue> {
  let converted = match value {
    Value::Ascii(strings) => TagValue::Text(
      strings
        .iter()
        .map(|s| String::from_utf8_lossy(s).trim_end_matches('\0').to_string())
        .collect::<Vec<_>>()
        .join(" "),
    ),
    Value::Byte(bytes) | Value::Undefined(bytes, _) => TagValue::Bytes(bytes.clone()),
    Value::Short(v) => TagValue::Integers(v.iter().map(|x| i64::from(*x)).collect()),
    Value::Long(v) => TagValue::Integers(v.iter().map(|x| i64::from(*x)).collect()),
    Value::SByte(v) => TagValue::Integers(v.iter().map(|x| i64::from(*x)).collect()),
    Value::SShort(v) => TagValue::Integers(v.iter().map(|x| i64::from(*x)).collect()),
    Value::SLong(v) => TagValue::Integers(v.iter().map(|x| i64::from(*x)).collect()),
    Value::Rational(v) => TagValue::Rationals(
      v.iter()
        .map(|r| Rational::new(i64::from(r.num), i64::from(r.denom)))
        .collect(),
    ),
    Value::SRational(v) => TagValue::Rationals(
      v.iter()
        .map(|r| Rational::new(i64::from(r.num), i64::from(r.denom)))
        .collect(),
    ),
    Value::Float(v) => TagValue::Reals(v.iter().map(|x| f64::from(*x)).collect()),
    Value::Double(v) => TagValue::Reals(v.clone()),
    _ => return None,
  };

  Some(converted)
}
