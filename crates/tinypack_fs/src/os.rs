use std::{fs, io, path::Path};

use crate::file_system::FileSystem;

#[derive(Default, Debug, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn is_file(&self, path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|metadata| metadata.is_file())
  }

  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
  }

  fn create_dir(&self, path: &Path) -> io::Result<()> {
    fs::create_dir(path)
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    fs::write(path, content)
  }
}
