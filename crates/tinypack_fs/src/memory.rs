use std::{
  io::{self, Read, Write},
  path::Path,
};

use vfs::{FileSystem as _, MemoryFS, VfsFileType};

use crate::file_system::FileSystem;

/// An in-memory filesystem, mostly useful for tests.
///
/// Paths are expected to be absolute and `/`-separated, e.g. `/project/src/main.js`.
#[derive(Debug)]
pub struct MemoryFileSystem {
  fs: MemoryFS,
}

impl Default for MemoryFileSystem {
  fn default() -> Self {
    Self { fs: MemoryFS::new() }
  }
}

fn vfs_path(path: &Path) -> String {
  path.to_string_lossy().trim_end_matches('/').to_string()
}

fn into_io_error(err: vfs::VfsError) -> io::Error {
  io::Error::other(err.to_string())
}

impl MemoryFileSystem {
  pub fn new(files: &[(&str, &str)]) -> Self {
    let mut fs = Self::default();
    for (path, content) in files {
      fs.add_file(Path::new(path), content);
    }
    fs
  }

  pub fn add_file(&mut self, path: &Path, content: &str) {
    for ancestor in path.ancestors().skip(1).collect::<Vec<_>>().into_iter().rev() {
      let dir = vfs_path(ancestor);
      if !dir.is_empty() && !self.fs.exists(&dir).unwrap_or(false) {
        self.fs.create_dir(&dir).unwrap_or_else(|err| panic!("Failed to create {dir}: {err}"));
      }
    }
    self
      .write(path, content.as_bytes())
      .unwrap_or_else(|err| panic!("Failed to add {}: {err}", path.display()));
  }
}

impl FileSystem for MemoryFileSystem {
  fn is_file(&self, path: &Path) -> bool {
    self
      .fs
      .metadata(&vfs_path(path))
      .is_ok_and(|metadata| matches!(metadata.file_type, VfsFileType::File))
  }

  fn exists(&self, path: &Path) -> bool {
    let path = vfs_path(path);
    path.is_empty() || self.fs.exists(&path).unwrap_or(false)
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let path = vfs_path(path);
    if !self.fs.exists(&path).map_err(into_io_error)? {
      return Err(io::Error::new(io::ErrorKind::NotFound, format!("{path} does not exist")));
    }
    let mut content = String::new();
    self.fs.open_file(&path).map_err(into_io_error)?.read_to_string(&mut content)?;
    Ok(content)
  }

  fn create_dir(&self, path: &Path) -> io::Result<()> {
    self.fs.create_dir(&vfs_path(path)).map_err(into_io_error)
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = self.fs.create_file(&vfs_path(path)).map_err(into_io_error)?;
    file.write_all(content)?;
    file.flush()
  }
}
