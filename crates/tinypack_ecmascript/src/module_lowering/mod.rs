mod binding_names;
mod import_references;

use std::path::Path;

use arcstr::ArcStr;
use oxc::{
  ast::{
    ast::{
      Declaration, ExportAllDeclaration, ExportDefaultDeclaration, ExportDefaultDeclarationKind,
      ExportNamedDeclaration, ImportDeclaration, ImportDeclarationSpecifier, ModuleExportName,
      Program, Statement,
    },
    Visit,
  },
  semantic::{SymbolId, SymbolTable},
  span::{GetSpan, Span},
};
use rustc_hash::FxHashMap;
use string_wizard::MagicString;
use tinypack_common::CompiledModule;
use tinypack_utils::{
  ecmascript::{js_string_literal, legitimize_identifier_name, property_access_str},
  path_ext::PathExt,
};

use self::{binding_names::collect_declared_names, import_references::ImportReferences};

/// Rewrites the module syntax of one program into CommonJS, in place, by span edits.
///
/// Apart from references to imported bindings, everything that isn't an `import`/`export`
/// statement is left byte-for-byte intact. The generated code reads its dependencies through
/// `require` and publishes its bindings on `exports`, the two names the bundle's module
/// factory provides.
pub struct ModuleLowering<'text> {
  magic_string: MagicString<'text>,
  imports: Vec<ArcStr>,
  /// `Object.defineProperty(exports, ...)` calls, emitted before any `require`.
  export_getters: Vec<String>,
  /// Lowered imports. ESM imports are hoisted, so these go to the top as well.
  hoisted_requires: Vec<String>,
  used_binding_names: FxHashMap<String, u32>,
  /// Import symbol to its read on the required exports, e.g. `__b.count`.
  import_accesses: FxHashMap<SymbolId, String>,
  /// `export { local as exported }`, resolved once every import is known.
  local_exports: Vec<(String, String, Option<SymbolId>)>,
}

impl<'text> ModuleLowering<'text> {
  pub fn new(source: &'text str) -> Self {
    Self {
      magic_string: MagicString::new(source),
      imports: Vec::new(),
      export_getters: Vec::new(),
      hoisted_requires: Vec::new(),
      used_binding_names: FxHashMap::default(),
      import_accesses: FxHashMap::default(),
      local_exports: Vec::new(),
    }
  }

  /// `symbols` must come from semantic analysis of `program`.
  pub fn lower(mut self, program: &Program<'_>, symbols: &SymbolTable) -> CompiledModule {
    if let Some(hashbang) = &program.hashbang {
      self.remove(hashbang.span);
    }

    for stmt in &program.body {
      match stmt {
        Statement::ImportDeclaration(decl) => self.lower_import(decl),
        Statement::ExportNamedDeclaration(decl) => self.lower_export_named(decl, symbols),
        Statement::ExportDefaultDeclaration(decl) => self.lower_export_default(decl),
        Statement::ExportAllDeclaration(decl) => self.lower_export_all(decl),
        _ => {}
      }
    }

    // Imports are hoisted, so an `export { a }` may precede the import of `a`.
    for (exported, local, symbol_id) in std::mem::take(&mut self.local_exports) {
      match symbol_id.and_then(|symbol_id| self.import_accesses.get(&symbol_id)) {
        Some(access) => {
          let access = access.clone();
          self.add_export_getter(&exported, &access);
        }
        None => self.add_export_getter(&exported, &local),
      }
    }

    ImportReferences {
      symbols,
      accesses: &self.import_accesses,
      magic_string: &mut self.magic_string,
    }
    .visit_program(program);

    let mut prelude = String::from("\"use strict\";\n");
    prelude.push_str("Object.defineProperty(exports, \"__esModule\", { value: true });\n");
    for line in self.export_getters.iter().chain(self.hoisted_requires.iter()) {
      prelude.push_str(line);
      prelude.push('\n');
    }
    self.magic_string.prepend(prelude);

    CompiledModule { code: self.magic_string.to_string(), imports: self.imports }
  }

  fn lower_import(&mut self, decl: &ImportDeclaration<'_>) {
    let source = decl.source.value.as_str();
    self.imports.push(source.into());
    self.remove(decl.span);

    let specifiers = match &decl.specifiers {
      Some(specifiers) if !specifiers.is_empty() => specifiers,
      // `import "./a"` and `import {} from "./a"` only run the module.
      _ => {
        self.hoisted_requires.push(format!("require({});", js_string_literal(source)));
        return;
      }
    };

    let binding = self.require_into_binding(source);
    for specifier in specifiers {
      let (local, access) = match specifier {
        ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
          (&spec.local, property_access_str(&binding, "default"))
        }
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
          (&spec.local, binding.clone())
        }
        ImportDeclarationSpecifier::ImportSpecifier(spec) => {
          (&spec.local, property_access_str(&binding, spec.imported.name().as_str()))
        }
      };
      if let Some(symbol_id) = local.symbol_id.get() {
        self.import_accesses.insert(symbol_id, access);
      }
    }
  }

  fn lower_export_named(&mut self, decl: &ExportNamedDeclaration<'_>, symbols: &SymbolTable) {
    if let Some(source) = &decl.source {
      // export { a as b } from "./a"
      let source = source.value.as_str();
      self.imports.push(source.into());
      self.remove(decl.span);
      let binding = self.require_into_binding(source);
      for specifier in &decl.specifiers {
        let value = property_access_str(&binding, specifier.local.name().as_str());
        self.add_export_getter(specifier.exported.name().as_str(), &value);
      }
      return;
    }

    if let Some(declaration) = &decl.declaration {
      // export const a = 1; export function f() {}; export class C {}
      self.remove(Span::new(decl.span.start, declaration.span().start));
      let names = match declaration {
        Declaration::VariableDeclaration(var_decl) => var_decl
          .declarations
          .iter()
          .flat_map(|declarator| collect_declared_names(&declarator.id))
          .collect(),
        Declaration::FunctionDeclaration(func) => {
          func.id.iter().map(|id| id.name.to_string()).collect()
        }
        Declaration::ClassDeclaration(class) => {
          class.id.iter().map(|id| id.name.to_string()).collect()
        }
        _ => Vec::new(),
      };
      for name in names {
        self.add_export_getter(&name, &name);
      }
      return;
    }

    // export { a, b as c }
    self.remove(decl.span);
    for specifier in &decl.specifiers {
      let symbol_id = match &specifier.local {
        ModuleExportName::IdentifierReference(ident) => ident
          .reference_id
          .get()
          .and_then(|reference_id| symbols.get_reference(reference_id).symbol_id()),
        _ => None,
      };
      self.local_exports.push((
        specifier.exported.name().to_string(),
        specifier.local.name().to_string(),
        symbol_id,
      ));
    }
  }

  fn lower_export_default(&mut self, decl: &ExportDefaultDeclaration<'_>) {
    let declared = match &decl.declaration {
      ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
        func.id.as_ref().map(|id| (func.span, id.name.as_str()))
      }
      ExportDefaultDeclarationKind::ClassDeclaration(class) => {
        class.id.as_ref().map(|id| (class.span, id.name.as_str()))
      }
      _ => None,
    };

    if let Some((declaration_span, name)) = declared {
      // export default function main() {}
      self.remove(Span::new(decl.span.start, declaration_span.start));
      self.add_export_getter("default", name);
    } else {
      // export default <expression>, including anonymous functions and classes.
      // The expression itself stays in place, references to imports inside it get rewritten.
      let expression = decl.declaration.span();
      let _ = self.magic_string.update(
        decl.span.start as usize,
        expression.start as usize,
        "exports.default = ",
      );
      if expression.end < decl.span.end {
        let _ = self.magic_string.update(expression.end as usize, decl.span.end as usize, ";");
      } else {
        self.magic_string.append_left(expression.end as usize, ";");
      }
    }
  }

  fn lower_export_all(&mut self, decl: &ExportAllDeclaration<'_>) {
    let source = decl.source.value.as_str();
    self.imports.push(source.into());
    self.remove(decl.span);
    let binding = self.require_into_binding(source);

    if let Some(exported) = &decl.exported {
      // export * as ns from "./a"
      self.add_export_getter(exported.name().as_str(), &binding);
    } else {
      // export * from "./a", local exports and `default` are never overwritten.
      self.hoisted_requires.push(format!(
        "Object.keys({binding}).forEach(function (key) {{ if (key === \"default\" || key === \"__esModule\" || Object.prototype.hasOwnProperty.call(exports, key)) return; Object.defineProperty(exports, key, {{ enumerable: true, get: function () {{ return {binding}[key]; }} }}); }});"
      ));
    }
  }

  /// Emits `var <binding> = require("<source>");` and returns the binding.
  fn require_into_binding(&mut self, source: &str) -> String {
    let name = legitimize_identifier_name(&Path::new(source).representative_file_name());
    let binding = match self.used_binding_names.get_mut(&name) {
      Some(count) => {
        *count += 1;
        format!("__{name}${count}")
      }
      None => {
        self.used_binding_names.insert(name.clone(), 0);
        format!("__{name}")
      }
    };
    self.hoisted_requires.push(format!("var {binding} = require({});", js_string_literal(source)));
    binding
  }

  fn add_export_getter(&mut self, exported: &str, value: &str) {
    self.export_getters.push(format!(
      "Object.defineProperty(exports, {}, {{ enumerable: true, get: function () {{ return {value}; }} }});",
      js_string_literal(exported)
    ));
  }

  fn remove(&mut self, span: Span) {
    if span.start < span.end {
      let _ = self.magic_string.remove(span.start as usize, span.end as usize);
    }
  }
}
