// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Helper for setting up test directories with photos and other files.

use std::{
  env, fs,
  path::{Path, PathBuf},
  sync::LazyLock,
};

use super::ExifJpeg;

static TEST_ROOT: LazyLock<PathBuf> =
  LazyLock::new(|| env::temp_dir().join(format!("{}_tests", env!("CARGO_PKG_NAME"))));

/// Scratch directory for tests needing actual files. Removed on drop.
pub struct TestDir {
  root: PathBuf,
}

impl TestDir {
  /// Creates an empty directory under `TEST_ROOT`. Note: Prefer using
  /// `test_dir!()` macro.
  pub fn new(test_path: PathBuf) -> Self {
    let root_rel = TEST_ROOT.join(test_path);
    if root_rel.exists() {
      fs::remove_dir_all(&root_rel).unwrap();
    }
    fs::create_dir_all(&root_rel).unwrap();

    let root = root_rel.canonicalize().unwrap();

    Self { root }
  }

  /// Writes `contents` to `file`, creating parent directories.
  pub fn add_file(&self, file: impl AsRef<Path>, contents: &[u8]) -> PathBuf {
    let full_path = self.get_path(file);

    assert!(!full_path.exists(), "File already exists: {full_path:?}");
    fs::create_dir_all(full_path.parent().unwrap()).unwrap();
    fs::write(&full_path, contents).unwrap();

    full_path
  }

  pub fn add_jpeg(&self, file: impl AsRef<Path>, jpeg: &ExifJpeg) -> PathBuf {
    self.add_file(file, &jpeg.to_bytes())
  }

  pub fn get_path(&self, file: impl AsRef<Path>) -> PathBuf {
    self.root.join(file)
  }

  pub fn root(&self) -> &Path {
    &self.root
  }
}

impl Drop for TestDir {
  fn drop(&mut self) {
    // Leftovers are cleared by the next run of the same test.
    let _ = fs::remove_dir_all(&self.root);
  }
}

#[macro_export]
macro_rules! test_path {
  () => {{
    // HACK: Get module hierarchy for caller.
    let mut function = $crate::testing::type_of(|| ()).rsplit("::");
    // 0th element is `{closure}`.
    let case = function.nth(1).unwrap();
    let suite = function.next().unwrap();
    let module = function.next().unwrap();

    std::path::PathBuf::from(format!("{module}/{suite}/{case}"))
  }};
}

#[macro_export]
macro_rules! test_dir {
  () => {
    $crate::testing::TestDir::new($crate::test_path!())
  };
}
