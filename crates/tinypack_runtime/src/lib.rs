//! A native rendition of the loader that bundles carry.
//!
//! A bundle is a table of linked units: every module has an import map and a factory, and
//! modules are instantiated on demand through [`Loader::load`]. The state machine is the
//! one the generated JavaScript runtime implements, so both behave the same on cycles.

mod bundle_table;
mod loader;

pub use crate::{
  bundle_table::{BundleTable, ModuleEntry, ModuleFactory},
  loader::{Exports, Loader, Module, Require, RuntimeError},
};
