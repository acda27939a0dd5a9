use arcstr::ArcStr;
use tinypack_utils::indexmap::FxIndexMap;

use crate::ModuleId;

/// Maps each import specifier, as written in the source, to the module it resolved to.
/// Iteration follows declaration order.
pub type ImportMap = FxIndexMap<ArcStr, ModuleId>;

#[derive(Debug, Clone, Default)]
pub struct ModuleRecord {
  /// Compiled code of the module body.
  pub code: String,
  /// Empty while the module's dependencies are still being visited.
  pub import_map: ImportMap,
}
