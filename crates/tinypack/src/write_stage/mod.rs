use std::{
  io,
  path::{Component, Path, PathBuf},
};

use tinypack_common::OutputAsset;
use tinypack_error::{BuildErrorKind, BuildResult};
use tinypack_fs::FileSystem;

/// Creates every missing directory on the way to `dir`, outermost first.
pub fn ensure_dir(fs: &dyn FileSystem, dir: &Path) -> io::Result<()> {
  let mut current = PathBuf::new();
  for component in dir.components() {
    current.push(component);
    if matches!(component, Component::Prefix(_) | Component::RootDir) {
      continue;
    }
    if !fs.exists(&current) {
      fs.create_dir(&current)?;
    }
  }
  Ok(())
}

/// Writes `asset` into `dir` with a single write, replacing any previous file.
pub fn write_asset(fs: &dyn FileSystem, dir: &Path, asset: &OutputAsset) -> BuildResult<PathBuf> {
  ensure_dir(fs, dir)
    .map_err(|source| BuildErrorKind::Write { path: dir.to_path_buf(), source })?;

  let path = dir.join(asset.filename());
  fs.write(&path, asset.content_as_bytes())
    .map_err(|source| BuildErrorKind::Write { path: path.clone(), source })?;

  tracing::info!(path = %path.display(), size = asset.content.len(), "Wrote bundle");
  Ok(path)
}

#[cfg(test)]
mod tests {
  use tinypack_fs::OsFileSystem;

  use super::*;

  fn asset(content: &str) -> OutputAsset {
    OutputAsset { filename: "bundle.js".to_string(), content: content.to_string() }
  }

  #[test]
  fn missing_directories_are_created() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("dist/js/nested");

    let path = write_asset(&OsFileSystem, &dir, &asset("first")).unwrap();
    assert_eq!(path, dir.join("bundle.js"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");

    // The directories exist now; writing again replaces the file.
    write_asset(&OsFileSystem, &dir, &asset("second")).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
  }

  #[test]
  fn file_in_the_way_is_a_write_error() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("dist"), "not a directory").unwrap();

    let err = write_asset(&OsFileSystem, &temp.path().join("dist/js"), &asset("")).unwrap_err();
    assert!(matches!(err.kinds().next(), Some(BuildErrorKind::Write { .. })));
  }

  #[cfg(unix)]
  #[test]
  fn ensure_dir_on_memory_file_system() {
    let fs = tinypack_fs::MemoryFileSystem::default();
    ensure_dir(&fs, Path::new("/project/dist/js")).unwrap();
    assert!(fs.exists(Path::new("/project/dist")));
    assert!(fs.exists(Path::new("/project/dist/js")));
    assert!(!fs.is_file(Path::new("/project/dist/js")));
  }
}
