use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub struct InputArgs {
  /// JSON file providing `entry`, `cwd` and `output`; flags take precedence over it.
  #[clap(long, short = 'c')]
  pub config: Option<PathBuf>,

  #[clap(long, short = 'e')]
  pub entry: Option<String>,

  #[clap(long)]
  pub cwd: Option<PathBuf>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'd')]
  pub dir: Option<String>,

  #[clap(long, short = 'o')]
  pub filename: Option<String>,
}

#[derive(Args)]
pub struct LogArgs {
  /// Only report errors.
  #[clap(long, short = 's')]
  pub silent: bool,
}
