mod bundler_options;
mod module_compiler;
mod types;

pub use crate::{
  bundler_options::{
    BundlerOptions, normalized_bundler_options::NormalizedBundlerOptions,
    output_options::OutputOptions,
  },
  module_compiler::ModuleCompiler,
  types::{
    compiled_module::CompiledModule,
    dependency_graph::DependencyGraph,
    module_id::ModuleId,
    module_record::{ImportMap, ModuleRecord},
    output_asset::OutputAsset,
    source::Source,
    source_joiner::SourceJoiner,
  },
};
