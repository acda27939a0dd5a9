use std::path::PathBuf;

use tinypack::{Bundler, BundlerOptions};

fn main() {
  let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/basic");

  let bundler = match Bundler::new(BundlerOptions {
    entry: Some("./entry.js".to_string()),
    cwd: Some(root),
    ..Default::default()
  }) {
    Ok(bundler) => bundler,
    Err(err) => {
      eprintln!("{err}");
      return;
    }
  };

  match bundler.write() {
    Ok(output) => {
      for asset in output.assets {
        println!("{} ({} bytes)", asset.filename, asset.content.len());
      }
    }
    Err(err) => eprintln!("{err}"),
  }
}
