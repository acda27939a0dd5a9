use std::path::PathBuf;

use anyhow::Context;
use sugar_path::SugarPath;
use tinypack_common::{BundlerOptions, NormalizedBundlerOptions, OutputOptions};
use tinypack_error::{BuildErrorKind, BuildResult};

pub const DEFAULT_DIR: &str = "dist";
pub const DEFAULT_FILENAME: &str = "bundle.js";

pub fn normalize_options(raw_options: BundlerOptions) -> BuildResult<NormalizedBundlerOptions> {
  let Some(entry) = raw_options.entry else {
    return Err(BuildErrorKind::MissingEntry.into());
  };

  let cwd = match raw_options.cwd {
    Some(cwd) if cwd.is_absolute() => cwd,
    Some(cwd) => current_dir()?.join(cwd),
    None => current_dir()?,
  };

  let OutputOptions { path, filename } = raw_options.output.unwrap_or_default();

  Ok(NormalizedBundlerOptions {
    entry,
    cwd: cwd.normalize(),
    dir: path.unwrap_or_else(|| DEFAULT_DIR.to_string()),
    filename: filename.unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
  })
}

fn current_dir() -> anyhow::Result<PathBuf> {
  std::env::current_dir().context("Failed to get current dir")
}
