use std::sync::Arc;

use tinypack_common::{BundlerOptions, ModuleCompiler, NormalizedBundlerOptions};
use tinypack_ecmascript::EcmaCompiler;
use tinypack_error::BuildResult;
use tinypack_fs::{FileSystem, OsFileSystem};
use tinypack_resolver::Resolver;

use crate::{
  generate_stage::GenerateStage,
  scan_stage::{ScanStage, ScanStageOutput},
  types::bundle_output::BundleOutput,
  utils::normalize_options::normalize_options,
  write_stage::write_asset,
  SharedFileSystem, SharedOptions, SharedResolver,
};

pub struct Bundler {
  pub(crate) fs: SharedFileSystem,
  pub(crate) options: SharedOptions,
  pub(crate) resolver: SharedResolver,
  pub(crate) compiler: Box<dyn ModuleCompiler>,
}

impl Bundler {
  pub fn new(options: BundlerOptions) -> BuildResult<Self> {
    Self::with_file_system(options, Arc::new(OsFileSystem))
  }

  pub fn with_file_system(
    options: BundlerOptions,
    fs: Arc<dyn FileSystem>,
  ) -> BuildResult<Self> {
    let options = normalize_options(options)?;
    let resolver: SharedResolver = Resolver::new(options.cwd.clone(), Arc::clone(&fs)).into();

    Ok(Bundler { fs, options: Arc::new(options), resolver, compiler: Box::new(EcmaCompiler) })
  }

  /// Replaces the default ES module compiler.
  #[must_use]
  pub fn with_compiler(mut self, compiler: impl ModuleCompiler + 'static) -> Self {
    self.compiler = Box::new(compiler);
    self
  }

  pub fn options(&self) -> &NormalizedBundlerOptions {
    &self.options
  }

  /// Builds the bundle in memory without touching the output directory.
  pub fn generate(&self) -> BuildResult<BundleOutput> {
    self.build(false)
  }

  /// Builds the bundle and writes it to `<cwd>/<output.path>/<output.filename>`.
  pub fn write(&self) -> BuildResult<BundleOutput> {
    self.build(true)
  }

  fn build(&self, is_write: bool) -> BuildResult<BundleOutput> {
    let ScanStageOutput { graph, warnings } =
      ScanStage::new(&self.options, self.fs.as_ref(), &self.resolver, self.compiler.as_ref())
        .scan()?;

    let asset = GenerateStage::new(&self.options).generate(&graph);

    if is_write {
      write_asset(self.fs.as_ref(), &self.options.output_dir(), &asset)?;
    }

    Ok(BundleOutput { assets: vec![asset], warnings })
  }
}
