mod bundler;
mod generate_stage;
mod scan_stage;
mod types;
mod utils;
mod write_stage;

use std::sync::Arc;

pub use crate::{bundler::Bundler, types::bundle_output::BundleOutput};
pub use tinypack_common::*;

pub(crate) type SharedOptions = Arc<NormalizedBundlerOptions>;
pub(crate) type SharedResolver = Arc<tinypack_resolver::Resolver>;
pub(crate) type SharedFileSystem = Arc<dyn tinypack_fs::FileSystem>;
