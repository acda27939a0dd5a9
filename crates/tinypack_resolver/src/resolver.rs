use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use sugar_path::SugarPath;
use tinypack_common::ModuleId;
use tinypack_fs::FileSystem;
use tinypack_utils::path_ext::PathExt;

/// The only suffix the resolver tries when a path doesn't exist as written.
pub const JS_EXTENSION: &str = ".js";

pub struct Resolver {
  cwd: PathBuf,
  fs: Arc<dyn FileSystem>,
}

impl Resolver {
  pub fn new(cwd: PathBuf, fs: Arc<dyn FileSystem>) -> Self {
    Self { cwd, fs }
  }

  /// Maps `path` to a module id:
  /// 1. `path` itself if it is a file,
  /// 2. else `path` + `.js` if that is a file,
  /// 3. else `path` unchanged.
  ///
  /// The third case never fails here. Reading the module later is what surfaces the error.
  pub fn resolve(&self, path: &Path) -> ModuleId {
    if self.fs.is_file(path) {
      return path.expect_to_str().into();
    }

    let mut with_extension = path.as_os_str().to_owned();
    with_extension.push(JS_EXTENSION);
    let with_extension = PathBuf::from(with_extension);
    if self.fs.is_file(&with_extension) {
      return with_extension.expect_to_str().into();
    }

    tracing::warn!(path = %path.display(), "Unresolved module, passing the path through as is");
    path.expect_to_str().into()
  }

  /// Resolves `specifier` against the directory of `importer`, or against `cwd` for the entry.
  pub fn resolve_id(&self, importer: Option<&ModuleId>, specifier: &str) -> ModuleId {
    let dir = importer.map_or(self.cwd.as_path(), ModuleId::dirname);
    self.resolve(&self.join(dir, specifier))
  }

  /// The normalized absolute path `specifier` points at, before any suffix is tried.
  pub fn join(&self, dir: &Path, specifier: &str) -> PathBuf {
    let joined = dir.join(specifier);
    if joined.is_absolute() { joined.normalize() } else { self.cwd.join(joined).normalize() }
  }
}
