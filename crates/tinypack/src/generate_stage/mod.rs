mod render_module;

use tinypack_common::{DependencyGraph, NormalizedBundlerOptions, OutputAsset, SourceJoiner};
use tinypack_utils::ecmascript::js_string_literal;

use self::render_module::render_module;

/// Runs the bundle table: loads the entry once, instantiating the rest on demand.
const LOADER: &str = include_str!("../runtime/loader.js");

pub struct GenerateStage<'a> {
  options: &'a NormalizedBundlerOptions,
}

impl<'a> GenerateStage<'a> {
  pub fn new(options: &'a NormalizedBundlerOptions) -> Self {
    Self { options }
  }

  /// Produces a single script: the loader invoked with a table holding every module of
  /// `graph` in discovery order, and the entry id.
  pub fn generate(&self, graph: &DependencyGraph) -> OutputAsset {
    let cwd = &self.options.cwd;
    let modules =
      graph.iter().map(|(id, module)| render_module(id, module, cwd)).collect::<Vec<_>>();

    let mut source_joiner = SourceJoiner::default();
    source_joiner.append_source(format!("{}({{", LOADER.trim_end()));
    source_joiner.append_source(modules.join(",\n"));
    let entry = js_string_literal(&graph.entry().stabilize(cwd));
    source_joiner.append_source(format!("}}, {entry});\n"));

    let content = source_joiner.join();
    tracing::debug!(modules = graph.len(), size = content.len(), "Generated bundle");
    OutputAsset { filename: self.options.filename.clone(), content }
  }
}
