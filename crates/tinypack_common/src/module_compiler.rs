use tinypack_error::BuildResult;

use crate::{CompiledModule, ModuleId};

/// Turns the source of one module into executable code plus the specifiers it imports.
///
/// Implementations must keep the imports in declaration order; the order flows into the
/// generated import maps.
pub trait ModuleCompiler {
  fn compile(&self, id: &ModuleId, source: &str) -> BuildResult<CompiledModule>;
}
