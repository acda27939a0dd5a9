use oxc::{allocator::Allocator, parser::Parser, semantic::SemanticBuilder, span::SourceType};
use tinypack_common::{CompiledModule, ModuleCompiler, ModuleId};
use tinypack_error::{BuildErrorKind, BuildResult};

use crate::module_lowering::ModuleLowering;

/// Compiles ES modules into code that runs inside a `function (require, module, exports)`
/// factory.
#[derive(Debug, Default, Clone, Copy)]
pub struct EcmaCompiler;

impl EcmaCompiler {
  pub fn compile_source(id: &str, source: &str) -> BuildResult<CompiledModule> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::default().with_module(true)).parse();

    if ret.panicked || !ret.errors.is_empty() {
      let message = if ret.errors.is_empty() {
        "Parser aborted".to_string()
      } else {
        ret.errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
      };
      Err(BuildErrorKind::Compile { id: id.to_string(), message })?;
    }

    let semantic = SemanticBuilder::new().build(&ret.program).semantic;
    let compiled = ModuleLowering::new(source).lower(&ret.program, semantic.symbols());
    tracing::debug!(id, imports = compiled.imports.len(), "Compiled module");
    Ok(compiled)
  }
}

impl ModuleCompiler for EcmaCompiler {
  fn compile(&self, id: &ModuleId, source: &str) -> BuildResult<CompiledModule> {
    Self::compile_source(id, source)
  }
}

#[cfg(test)]
mod tests {
  use tinypack_error::BuildErrorKind;

  use super::*;

  fn compile(source: &str) -> CompiledModule {
    EcmaCompiler::compile_source("/project/src/main.js", source).unwrap()
  }

  fn imports(source: &str) -> Vec<String> {
    compile(source).imports.iter().map(ToString::to_string).collect()
  }

  #[test]
  fn imports_are_listed_in_declaration_order() {
    let source = r#"
import b from "./b";
import { c } from "./c";
export { d } from "./d";
import "./b";
export * from "./e";
const later = 1;
"#;
    assert_eq!(imports(source), ["./b", "./c", "./d", "./b", "./e"]);
  }

  #[test]
  fn module_without_imports() {
    assert!(imports("console.log('hello');").is_empty());
  }

  #[test]
  fn syntax_errors_are_compile_failures() {
    let err = EcmaCompiler::compile_source("/project/src/broken.js", "import { from './a';")
      .unwrap_err();
    let kinds = err.kinds().collect::<Vec<_>>();
    assert!(matches!(
      kinds.as_slice(),
      [BuildErrorKind::Compile { id, .. }] if id == "/project/src/broken.js"
    ));
  }

  #[test]
  fn imports_become_hoisted_requires() {
    let code = compile(
      r#"console.log(value, answer, renamed, ns);
import answer, { value, other as renamed } from "./b";
import * as ns from "./c";
import "./side-effect";"#,
    )
    .code;

    assert!(code.starts_with("\"use strict\";\n"));
    assert!(code.contains("var __b = require(\"./b\");"));
    assert!(code.contains("var __c = require(\"./c\");"));
    assert!(code.contains("require(\"./side-effect\");"));
    assert!(code.contains("console.log(__b.value, __b.default, __b.other, __c);"));
    assert!(!code.contains("import "));
    assert!(!code.contains("var value"));
    assert!(code.find("require(\"./b\")").unwrap() < code.find("console.log").unwrap());
  }

  #[test]
  fn imported_bindings_are_read_on_every_use() {
    let code = compile(
      r#"import { count, increment } from "./counter";
increment();
const snapshot = { count, total: count + 1 };
function shadowed(count) { return count; }
({ count } = other);
export default count;
export { count as current };"#,
    )
    .code;

    assert!(code.contains("(0, __counter.increment)();"));
    assert!(code.contains("const snapshot = { count: __counter.count, total: __counter.count + 1 };"));
    assert!(code.contains("function shadowed(count) { return count; }"));
    assert!(code.contains("({ count: __counter.count } = other);"));
    assert!(code.contains("exports.default = __counter.count;"));
    assert!(code.contains(
      "Object.defineProperty(exports, \"current\", { enumerable: true, get: function () { return __counter.count; } });"
    ));
  }

  #[test]
  fn repeated_import_sources_get_distinct_bindings() {
    let code = compile("import { a } from './lib';\nimport { b } from './lib';\nb(a);").code;
    assert!(code.contains("var __lib = require(\"./lib\");"));
    assert!(code.contains("var __lib$1 = require(\"./lib\");"));
    assert!(code.contains("(0, __lib$1.b)(__lib.a);"));
  }

  #[test]
  fn exported_declarations_get_live_getters() {
    let code = compile(
      "export const a = 1, { b, c: [d] } = obj;\nexport function f() {}\nexport class K {}\nlet x = 1;\nexport { x, x as y };",
    )
    .code;

    for name in ["a", "b", "d", "f", "K", "x", "y"] {
      assert!(
        code.contains(&format!("Object.defineProperty(exports, \"{name}\", {{ enumerable: true")),
        "missing getter for {name} in:\n{code}"
      );
    }
    assert!(code.contains("const a = 1, { b, c: [d] } = obj;"));
    assert!(code.contains("function f() {}"));
    assert!(code.contains("class K {}"));
    assert!(code.contains("get: function () { return x; }"));
    assert!(!code.contains("export "));
  }

  #[test]
  fn default_exports() {
    let expression = compile("export default 40 + 2;").code;
    assert!(expression.contains("exports.default = 40 + 2;"));

    let anonymous = compile("export default function () { return 1; }").code;
    assert!(anonymous.contains("exports.default = function () { return 1; };"));

    let named = compile("export default function main() {}").code;
    assert!(named.contains("function main() {}"));
    assert!(named.contains("Object.defineProperty(exports, \"default\", { enumerable: true, get: function () { return main; } });"));
  }

  #[test]
  fn re_exports() {
    let code = compile("export { a as b, default } from './x';\nexport * as ns from './y';\nexport * from './z';").code;

    assert!(code.contains("var __x = require(\"./x\");"));
    assert!(code.contains("get: function () { return __x.a; }"));
    assert!(code.contains("get: function () { return __x.default; }"));
    assert!(code.contains("Object.defineProperty(exports, \"ns\", { enumerable: true, get: function () { return __y; } });"));
    assert!(code.contains("Object.keys(__z).forEach(function (key) {"));
  }

  #[test]
  fn string_export_names_are_quoted() {
    let code = compile("const a = 1;\nexport { a as \"kebab-case\" };").code;
    assert!(code.contains("Object.defineProperty(exports, \"kebab-case\""));
  }

  #[test]
  fn hashbang_is_dropped() {
    let code = compile("#!/usr/bin/env node\nconsole.log(1);").code;
    assert!(!code.contains("#!"));
    assert!(code.contains("console.log(1);"));
  }
}
