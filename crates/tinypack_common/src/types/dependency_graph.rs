use tinypack_utils::indexmap::FxIndexMap;

use crate::{ImportMap, ModuleId, ModuleRecord};

/// Every module reachable from the entry, keyed by id.
///
/// Iteration order is discovery order, which is the pre-order of the depth-first traversal
/// that built the graph. A module is present from the moment it is reserved, before its
/// dependencies are visited, so finding an id here is what stops a revisit or a cycle.
#[derive(Debug)]
pub struct DependencyGraph {
  entry: ModuleId,
  modules: FxIndexMap<ModuleId, ModuleRecord>,
}

impl DependencyGraph {
  pub fn new(entry: ModuleId) -> Self {
    Self { entry, modules: FxIndexMap::default() }
  }

  pub fn entry(&self) -> &ModuleId {
    &self.entry
  }

  pub fn contains(&self, id: &ModuleId) -> bool {
    self.modules.contains_key(id)
  }

  /// Inserts a record with its code and an empty import map.
  ///
  /// Returns `false` and leaves the graph untouched if `id` was already reserved.
  pub fn reserve(&mut self, id: ModuleId, code: String) -> bool {
    if self.modules.contains_key(&id) {
      return false;
    }
    self.modules.insert(id, ModuleRecord { code, import_map: ImportMap::default() });
    true
  }

  /// Attaches the final import map once every dependency of `id` has been visited.
  pub fn finish(&mut self, id: &ModuleId, import_map: ImportMap) {
    if let Some(record) = self.modules.get_mut(id) {
      record.import_map = import_map;
    }
  }

  pub fn get(&self, id: &ModuleId) -> Option<&ModuleRecord> {
    self.modules.get(id)
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&ModuleId, &ModuleRecord)> {
    self.modules.iter()
  }

  pub fn ids(&self) -> impl Iterator<Item = &ModuleId> {
    self.modules.keys()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reserve_is_first_writer_wins() {
    let mut graph = DependencyGraph::new("/a.js".into());
    assert!(graph.reserve("/a.js".into(), "first".to_string()));
    assert!(!graph.reserve("/a.js".into(), "second".to_string()));
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.get(&"/a.js".into()).unwrap().code, "first");
  }

  #[test]
  fn iteration_follows_reservation_order() {
    let mut graph = DependencyGraph::new("/a.js".into());
    for id in ["/a.js", "/c.js", "/b.js"] {
      graph.reserve(id.into(), String::new());
    }
    let ids = graph.ids().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(ids, ["/a.js", "/c.js", "/b.js"]);
  }

  #[test]
  fn finish_attaches_import_map() {
    let mut graph = DependencyGraph::new("/a.js".into());
    graph.reserve("/a.js".into(), String::new());
    assert!(graph.get(&"/a.js".into()).unwrap().import_map.is_empty());

    let mut import_map = ImportMap::default();
    import_map.insert("./b".into(), "/b.js".into());
    graph.finish(&"/a.js".into(), import_map);

    let record = graph.get(&"/a.js".into()).unwrap();
    assert_eq!(record.import_map.get("./b"), Some(&ModuleId::from("/b.js")));
  }
}
