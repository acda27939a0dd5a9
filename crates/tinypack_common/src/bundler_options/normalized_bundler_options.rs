use std::path::PathBuf;

#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub entry: String,
  pub cwd: PathBuf,

  // --- Output
  pub dir: String,
  pub filename: String,
}

impl NormalizedBundlerOptions {
  pub fn output_dir(&self) -> PathBuf {
    self.cwd.join(&self.dir)
  }

  pub fn output_file(&self) -> PathBuf {
    self.output_dir().join(&self.filename)
  }
}
