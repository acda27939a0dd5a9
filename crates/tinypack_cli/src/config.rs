use std::path::Path;

use tinypack::{BundlerOptions, OutputOptions};
use tinypack_error::{BuildErrorKind, BuildResult};

use crate::args::{InputArgs, OutputArgs};

pub fn load_config(path: &Path) -> BuildResult<BundlerOptions> {
  let content = std::fs::read_to_string(path)
    .map_err(|err| BuildErrorKind::Config { path: path.to_path_buf(), message: err.to_string() })?;

  let options = serde_json::from_str(&content)
    .map_err(|err| BuildErrorKind::Config { path: path.to_path_buf(), message: err.to_string() })?;

  Ok(options)
}

/// Options given on the command line, layered over the config file if there is one.
pub fn resolve_options(input: InputArgs, output: OutputArgs) -> BuildResult<BundlerOptions> {
  let base = match &input.config {
    Some(path) => load_config(path)?,
    None => BundlerOptions::default(),
  };

  let output = (output.dir.is_some() || output.filename.is_some())
    .then_some(OutputOptions { path: output.dir, filename: output.filename });

  Ok(base.merge(BundlerOptions { entry: input.entry, cwd: input.cwd, output }))
}
