pub mod normalized_bundler_options;
pub mod output_options;

use std::path::PathBuf;

use serde::Deserialize;

use crate::OutputOptions;

/// Options as the user wrote them, either in a config file or through CLI flags.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BundlerOptions {
  // --- Input
  pub entry: Option<String>,
  pub cwd: Option<PathBuf>,

  // --- Output
  pub output: Option<OutputOptions>,
}

impl BundlerOptions {
  /// Fields set in `overrides` win over the ones in `self`.
  #[must_use]
  pub fn merge(self, overrides: BundlerOptions) -> Self {
    let output = match (self.output, overrides.output) {
      (Some(base), Some(overrides)) => Some(OutputOptions {
        path: overrides.path.or(base.path),
        filename: overrides.filename.or(base.filename),
      }),
      (base, overrides) => overrides.or(base),
    };
    Self { entry: overrides.entry.or(self.entry), cwd: overrides.cwd.or(self.cwd), output }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserialize_config_file() {
    let options: BundlerOptions = serde_json::from_str(
      r#"{ "entry": "./src/index.js", "output": { "path": "dist/js", "filename": "main.js" } }"#,
    )
    .unwrap();

    assert_eq!(options.entry.as_deref(), Some("./src/index.js"));
    let output = options.output.unwrap();
    assert_eq!(output.path.as_deref(), Some("dist/js"));
    assert_eq!(output.filename.as_deref(), Some("main.js"));
  }

  #[test]
  fn unknown_fields_are_rejected() {
    let result = serde_json::from_str::<BundlerOptions>(r#"{ "entries": ["./a.js"] }"#);
    assert!(result.is_err());
  }

  #[test]
  fn merge_prefers_overrides_per_field() {
    let base = BundlerOptions {
      entry: Some("./a.js".to_string()),
      cwd: None,
      output: Some(OutputOptions {
        path: Some("dist".to_string()),
        filename: Some("bundle.js".to_string()),
      }),
    };
    let overrides = BundlerOptions {
      entry: None,
      cwd: Some(PathBuf::from("/project")),
      output: Some(OutputOptions { path: None, filename: Some("out.js".to_string()) }),
    };

    let merged = base.merge(overrides);
    assert_eq!(merged.entry.as_deref(), Some("./a.js"));
    assert_eq!(merged.cwd, Some(PathBuf::from("/project")));
    let output = merged.output.unwrap();
    assert_eq!(output.path.as_deref(), Some("dist"));
    assert_eq!(output.filename.as_deref(), Some("out.js"));
  }
}
