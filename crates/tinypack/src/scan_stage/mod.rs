mod graph_builder;

use tinypack_common::{DependencyGraph, ModuleCompiler, NormalizedBundlerOptions};
use tinypack_error::BuildResult;
use tinypack_fs::FileSystem;
use tinypack_resolver::Resolver;

use self::graph_builder::{GraphBuilder, GraphBuilderOutput};

pub struct ScanStageOutput {
  pub graph: DependencyGraph,
  pub warnings: Vec<anyhow::Error>,
}

pub struct ScanStage<'a> {
  options: &'a NormalizedBundlerOptions,
  fs: &'a dyn FileSystem,
  resolver: &'a Resolver,
  compiler: &'a dyn ModuleCompiler,
}

impl<'a> ScanStage<'a> {
  pub fn new(
    options: &'a NormalizedBundlerOptions,
    fs: &'a dyn FileSystem,
    resolver: &'a Resolver,
    compiler: &'a dyn ModuleCompiler,
  ) -> Self {
    Self { options, fs, resolver, compiler }
  }

  pub fn scan(&self) -> BuildResult<ScanStageOutput> {
    let entry = self.resolver.resolve_id(None, &self.options.entry);
    tracing::debug!(entry = %entry, "Scanning modules");

    let GraphBuilderOutput { graph, cycles } =
      GraphBuilder::new(self.fs, self.resolver, self.compiler).build(entry)?;

    let warnings = cycles
      .iter()
      .map(|cycle| {
        let paths =
          cycle.iter().map(|id| id.stabilize(&self.options.cwd)).collect::<Vec<_>>();
        let warning = anyhow::anyhow!("Circular dependency: {}.", paths.join(" -> "));
        tracing::debug!("{warning}");
        warning
      })
      .collect();

    Ok(ScanStageOutput { graph, warnings })
  }
}
