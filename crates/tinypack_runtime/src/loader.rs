use anyhow::Context;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use tinypack_utils::indexmap::FxIndexMap;

use crate::BundleTable;

pub type Exports = Map<String, Value>;

/// The container a factory publishes through. `module.exports` doubles as the `exports`
/// shorthand.
#[derive(Debug, Default)]
pub struct Module {
  pub exports: Exports,
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
  #[error("Cannot find module '{id}'")]
  ModuleNotFound { id: String },

  #[error("Cannot find module '{specifier}' imported by '{importer}'")]
  UnknownSpecifier { importer: String, specifier: String },
}

/// Instantiates modules out of a [`BundleTable`].
///
/// Per module and per loader the lifecycle is `uninstantiated → instantiating →
/// instantiated`. A factory runs at most once: finished exports are cached, and a `require`
/// that re-enters a module whose factory is still running gets an empty exports object
/// instead of recursing into it again.
pub struct Loader<'table> {
  table: &'table BundleTable,
  cache: FxHashMap<&'table str, Exports>,
  count: FxHashMap<&'table str, u32>,
}

impl<'table> Loader<'table> {
  pub fn new(table: &'table BundleTable) -> Self {
    Self { table, cache: FxHashMap::default(), count: FxHashMap::default() }
  }

  /// Loads the entry module with a fresh loader, the way a bundle starts executing.
  pub fn run(table: &'table BundleTable) -> anyhow::Result<Exports> {
    Self::new(table).load(table.entry())
  }

  pub fn load(&mut self, id: &str) -> anyhow::Result<Exports> {
    if let Some(exports) = self.cache.get(id) {
      return Ok(exports.clone());
    }

    let table = self.table;
    let (id, entry) =
      table.get(id).ok_or_else(|| RuntimeError::ModuleNotFound { id: id.to_string() })?;

    let count = self.count.entry(id).or_default();
    *count += 1;
    tracing::trace!(id, attempt = *count, "Instantiating module");

    let mut module = Module::default();
    let mut require = Require { loader: self, importer: id, import_map: &entry.import_map };
    (entry.factory)(&mut require, &mut module)
      .with_context(|| format!("Failed to instantiate '{id}'"))?;

    self.cache.insert(id, module.exports.clone());
    Ok(module.exports)
  }

  /// How many times the factory of `id` has been entered.
  pub fn instantiation_count(&self, id: &str) -> u32 {
    self.count.get(id).copied().unwrap_or_default()
  }

  pub fn is_instantiating(&self, id: &str) -> bool {
    self.instantiation_count(id) > 0 && !self.cache.contains_key(id)
  }
}

/// The module-scoped dependency loader handed to a factory.
pub struct Require<'loader, 'table> {
  loader: &'loader mut Loader<'table>,
  importer: &'table str,
  import_map: &'table FxIndexMap<String, String>,
}

impl Require<'_, '_> {
  pub fn require(&mut self, specifier: &str) -> anyhow::Result<Exports> {
    let target = self.import_map.get(specifier).ok_or_else(|| RuntimeError::UnknownSpecifier {
      importer: self.importer.to_string(),
      specifier: specifier.to_string(),
    })?;

    if self.loader.is_instantiating(target) {
      tracing::trace!(importer = self.importer, target, "Circular require, returning a stub");
      return Ok(Exports::new());
    }

    self.loader.load(target)
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use serde_json::json;

  use super::*;

  type Log = Rc<RefCell<Vec<String>>>;

  fn logging(log: &Log, message: &str) -> impl Fn() {
    let log = Rc::clone(log);
    let message = message.to_string();
    move || log.borrow_mut().push(message.clone())
  }

  #[test]
  fn entry_observes_value_exported_by_dependency() {
    let log = Log::default();
    let print = Rc::clone(&log);
    let table = BundleTable::new("a")
      .with_module("a", &[("./b", "b")], move |require, _module| {
        let b = require.require("./b")?;
        print.borrow_mut().push(format!("answer is {}", b["answer"]));
        Ok(())
      })
      .with_module("b", &[], |_require, module| {
        module.exports.insert("answer".to_string(), json!(42));
        Ok(())
      });

    Loader::run(&table).unwrap();
    assert_eq!(*log.borrow(), ["answer is 42"]);
  }

  #[test]
  fn circular_require_gets_a_stub() {
    let table = BundleTable::new("a")
      .with_module("a", &[("./b", "b")], |require, module| {
        let b = require.require("./b")?;
        module.exports.insert("fromB".to_string(), b["value"].clone());
        Ok(())
      })
      .with_module("b", &[("./a", "a")], |require, module| {
        let a = require.require("./a")?;
        module.exports.insert("sawEmptyA".to_string(), json!(a.is_empty()));
        module.exports.insert("value".to_string(), json!("b"));
        Ok(())
      });

    let mut loader = Loader::new(&table);
    let a = loader.load("a").unwrap();
    assert_eq!(a["fromB"], json!("b"));

    let b = loader.load("b").unwrap();
    assert_eq!(b["sawEmptyA"], json!(true));
    assert_eq!(loader.instantiation_count("a"), 1);
    assert_eq!(loader.instantiation_count("b"), 1);
  }

  #[test]
  fn self_import_terminates() {
    let table = BundleTable::new("a").with_module("a", &[("./a", "a")], |require, module| {
      let own = require.require("./a")?;
      module.exports.insert("sawEmptySelf".to_string(), json!(own.is_empty()));
      Ok(())
    });

    let a = Loader::run(&table).unwrap();
    assert_eq!(a["sawEmptySelf"], json!(true));
  }

  #[test]
  fn shared_dependency_runs_once() {
    let log = Log::default();
    let run_d = logging(&log, "d");
    let table = BundleTable::new("a")
      .with_module("a", &[("./b", "b"), ("./c", "c")], |require, _module| {
        require.require("./b")?;
        require.require("./c")?;
        Ok(())
      })
      .with_module("b", &[("./d", "d")], |require, _module| require.require("./d").map(drop))
      .with_module("c", &[("./d", "d")], |require, _module| require.require("./d").map(drop))
      .with_module("d", &[], move |_require, module| {
        run_d();
        module.exports.insert("shared".to_string(), json!(true));
        Ok(())
      });

    let mut loader = Loader::new(&table);
    loader.load("a").unwrap();
    assert_eq!(*log.borrow(), ["d"]);
    assert_eq!(loader.instantiation_count("d"), 1);

    // Later loads are served from the cache.
    assert_eq!(loader.load("d").unwrap()["shared"], json!(true));
    assert_eq!(loader.instantiation_count("d"), 1);
  }

  #[test]
  fn dependencies_run_before_the_rest_of_the_importer() {
    let log = Log::default();
    let (a_before, a_after, run_b) =
      (logging(&log, "a:before"), logging(&log, "a:after"), logging(&log, "b"));
    let table = BundleTable::new("a")
      .with_module("a", &[("./b", "b")], move |require, _module| {
        a_before();
        require.require("./b")?;
        a_after();
        Ok(())
      })
      .with_module("b", &[], move |_require, _module| {
        run_b();
        Ok(())
      });

    Loader::run(&table).unwrap();
    assert_eq!(*log.borrow(), ["a:before", "b", "a:after"]);
  }

  #[test]
  fn unknown_specifier_is_a_runtime_error() {
    let table = BundleTable::new("a").with_module("a", &[], |require, _module| {
      require.require("./missing")?;
      Ok(())
    });

    let err = Loader::run(&table).unwrap_err();
    let cause = err.root_cause().downcast_ref::<RuntimeError>().unwrap();
    assert!(matches!(cause, RuntimeError::UnknownSpecifier { specifier, .. } if specifier == "./missing"));
  }

  #[test]
  fn unresolved_target_is_a_runtime_error() {
    let table = BundleTable::new("a").with_module("a", &[("./b", "/src/b")], |require, _module| {
      require.require("./b")?;
      Ok(())
    });

    let err = Loader::run(&table).unwrap_err();
    assert_eq!(err.root_cause().to_string(), "Cannot find module '/src/b'");
  }

  #[test]
  fn each_loader_starts_fresh() {
    let log = Log::default();
    let run_a = logging(&log, "a");
    let table = BundleTable::new("a").with_module("a", &[], move |_require, _module| {
      run_a();
      Ok(())
    });

    Loader::run(&table).unwrap();
    Loader::run(&table).unwrap();
    assert_eq!(log.borrow().len(), 2);
  }
}
