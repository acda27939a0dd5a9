use std::{io, path::PathBuf};

/// Failures that abort a build. Every one of them is fatal to the current run.
#[derive(Debug, thiserror::Error)]
pub enum BuildErrorKind {
  #[error("Missing entry: you must supply `entry` either in the config file or with --entry")]
  MissingEntry,

  #[error("Failed to compile {id}: {message}")]
  Compile { id: String, message: String },

  /// The module could not be read. An import that the resolver could not map to a file ends
  /// up here, since unresolved specifiers are passed through unchanged.
  #[error("Could not load {id}{}", importer.as_ref().map(|importer| format!(" (imported by {importer})")).unwrap_or_default())]
  Load {
    id: String,
    importer: Option<String>,
    #[source]
    source: io::Error,
  },

  #[error("Failed to write {}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to read config {}: {message}", path.display())]
  Config { path: PathBuf, message: String },
}
