use serde::Deserialize;

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputOptions {
  /// Directory the bundle is written to, relative to `cwd` unless absolute.
  pub path: Option<String>,
  pub filename: Option<String>,
}
