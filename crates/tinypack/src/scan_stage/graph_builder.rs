use std::iter;

use tinypack_common::{CompiledModule, DependencyGraph, ImportMap, ModuleCompiler, ModuleId};
use tinypack_error::BuildResult;
use tinypack_fs::FileSystem;
use tinypack_resolver::Resolver;
use tinypack_utils::indexmap::FxIndexSet;

use crate::utils::load_source::load_source;

enum Frame {
  Visit { id: ModuleId, importer: Option<ModuleId> },
  Finish { id: ModuleId, import_map: ImportMap },
}

#[derive(Debug)]
pub struct GraphBuilderOutput {
  pub graph: DependencyGraph,
  /// Each cycle starts and ends with the same module, e.g. `[a, b, a]`.
  pub cycles: Vec<Box<[ModuleId]>>,
}

/// Walks the import relation depth-first from the entry, compiling every module it reaches.
///
/// The walk keeps its own stack of frames instead of recursing, so a long import chain
/// doesn't grow the thread stack. A module is reserved in the graph as soon as it is
/// compiled and before any of its dependencies are visited; meeting an id that is already
/// in the graph ends that branch, which is how revisits and cycles terminate.
pub struct GraphBuilder<'a> {
  fs: &'a dyn FileSystem,
  resolver: &'a Resolver,
  compiler: &'a dyn ModuleCompiler,
}

impl<'a> GraphBuilder<'a> {
  pub fn new(
    fs: &'a dyn FileSystem,
    resolver: &'a Resolver,
    compiler: &'a dyn ModuleCompiler,
  ) -> Self {
    Self { fs, resolver, compiler }
  }

  pub fn build(&self, entry: ModuleId) -> BuildResult<GraphBuilderOutput> {
    let mut graph = DependencyGraph::new(entry.clone());
    let mut stack = vec![Frame::Visit { id: entry, importer: None }];

    // Modules whose dependencies are still being visited, outermost first.
    let mut visiting = FxIndexSet::default();
    let mut cycles = FxIndexSet::default();

    while let Some(frame) = stack.pop() {
      match frame {
        Frame::Visit { id, importer } => {
          if graph.contains(&id) {
            if let Some(index) = visiting.get_index_of(&id) {
              let cycle = visiting
                .iter()
                .skip(index)
                .cloned()
                .chain(iter::once(id))
                .collect::<Box<[ModuleId]>>();
              cycles.insert(cycle);
            }
            continue;
          }

          let source = load_source(self.fs, &id, importer.as_ref())?;
          let CompiledModule { code, imports } = self.compiler.compile(&id, &source)?;
          graph.reserve(id.clone(), code);

          let mut import_map = ImportMap::default();
          let mut dependencies = Vec::with_capacity(imports.len());
          for specifier in imports {
            if import_map.contains_key(&specifier) {
              continue;
            }
            let dependency = self.resolver.resolve_id(Some(&id), &specifier);
            import_map.insert(specifier, dependency.clone());
            dependencies.push(dependency);
          }

          visiting.insert(id.clone());
          stack.push(Frame::Finish { id: id.clone(), import_map });
          // Reversed so the first import is the next frame popped.
          stack.extend(
            dependencies
              .into_iter()
              .rev()
              .map(|dependency| Frame::Visit { id: dependency, importer: Some(id.clone()) }),
          );
        }
        Frame::Finish { id, import_map } => {
          visiting.pop();
          graph.finish(&id, import_map);
        }
      }
    }

    tracing::debug!(modules = graph.len(), cycles = cycles.len(), "Built module graph");
    Ok(GraphBuilderOutput { graph, cycles: cycles.into_iter().collect() })
  }
}
