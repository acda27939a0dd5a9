use std::{io, path::Path};

/// The filesystem operations a build needs: reading module sources, probing candidate paths
/// and persisting the bundle.
pub trait FileSystem: Send + Sync {
  fn is_file(&self, path: &Path) -> bool;

  fn exists(&self, path: &Path) -> bool;

  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  /// Creates exactly one directory. The parent must already exist.
  fn create_dir(&self, path: &Path) -> io::Result<()>;

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;
}
