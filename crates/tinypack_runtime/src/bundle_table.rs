use rustc_hash::FxHashMap;
use tinypack_utils::indexmap::FxIndexMap;

use crate::{Module, Require};

/// Executes one module body. Its dependencies are reached through `Require`, its public
/// value is whatever it leaves in `module.exports`.
pub type ModuleFactory = Box<dyn Fn(&mut Require<'_, '_>, &mut Module) -> anyhow::Result<()>>;

pub struct ModuleEntry {
  /// Specifier as written in the module → id of the module it resolved to.
  pub import_map: FxIndexMap<String, String>,
  pub factory: ModuleFactory,
}

/// The dispatch table of a bundle: one entry per module id, plus the id to start from.
pub struct BundleTable {
  entry: String,
  modules: FxHashMap<String, ModuleEntry>,
}

impl BundleTable {
  pub fn new(entry: impl Into<String>) -> Self {
    Self { entry: entry.into(), modules: FxHashMap::default() }
  }

  pub fn entry(&self) -> &str {
    &self.entry
  }

  #[must_use]
  pub fn with_module<F>(
    mut self,
    id: impl Into<String>,
    import_map: &[(&str, &str)],
    factory: F,
  ) -> Self
  where
    F: Fn(&mut Require<'_, '_>, &mut Module) -> anyhow::Result<()> + 'static,
  {
    self.insert(
      id.into(),
      ModuleEntry {
        import_map: import_map
          .iter()
          .map(|(specifier, target)| (specifier.to_string(), target.to_string()))
          .collect(),
        factory: Box::new(factory),
      },
    );
    self
  }

  pub fn insert(&mut self, id: String, entry: ModuleEntry) {
    self.modules.insert(id, entry);
  }

  pub fn get(&self, id: &str) -> Option<(&str, &ModuleEntry)> {
    self.modules.get_key_value(id).map(|(id, entry)| (id.as_str(), entry))
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }
}
