// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Finding images to process, and preparing output locations.

use std::{
  collections::HashSet,
  fs,
  path::{Path, PathBuf},
};

/// Collects image files from `inputs`. Directories are scanned (not
/// recursively) and files are taken as given; both are filtered to
/// `extensions`, case-insensitively. The same file named twice is only
/// returned once, in the position it was first seen.
pub fn collect_images<S: AsRef<str>>(
  inputs: &[PathBuf],
  extensions: &[S],
) -> Result<Vec<PathBuf>, String> {
  let mut images = Vec::new();
  let mut seen = HashSet::new();

  for input in inputs {
    let candidates = if input.is_dir() {
      list_dir(input)?
    } else if input.is_file() {
      Vec::from([input.clone()])
    } else {
      return Err(format!("{}: Path does not exist.", input.display()));
    };

    for path in candidates {
      if !has_extension(&path, extensions) {
        log::debug!("{}: Not an image. Ignoring.", path.display());
        continue;
      }

      let canonical = path
        .canonicalize()
        .map_err(|e| format!("{}: Path failed to canonicalize ({e}).", path.display()))?;

      if seen.insert(canonical) {
        images.push(path);
      } else {
        log::debug!("{}: Duplicate. Ignoring.", path.display());
      }
    }
  }

  Ok(images)
}

/// Creates `dir` and its parents if needed.
pub fn ensure_dir(dir: &Path) -> Result<(), String> {
  fs::create_dir_all(dir)
    .map_err(|e| format!("{}: Failed to create directory ({e}).", dir.display()))
}

/// Whether `path` has one of `extensions`, ignoring case.
pub fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
  let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
    return false;
  };

  extensions
    .iter()
    .any(|e| e.as_ref().eq_ignore_ascii_case(extension))
}

/// Files directly under `dir`, sorted by name.
fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, String> {
  let entries = fs::read_dir(dir)
    .map_err(|e| format!("{}: Failed to read directory ({e}).", dir.display()))?;

  let mut files = Vec::new();
  for entry in entries {
    let entry =
      entry.map_err(|e| format!("{}: Failed to read directory entry ({e}).", dir.display()))?;
    if entry.file_type().is_ok_and(|t| t.is_file()) {
      files.push(entry.path());
    }
  }

  files.sort();

  Ok(files)
}
