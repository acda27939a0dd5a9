use std::path::Path;

use tinypack_common::{ModuleId, ModuleRecord};
use tinypack_utils::ecmascript::js_string_literal;

/// Renders one bundle table entry: the module's import map and a factory wrapping its code.
pub fn render_module(id: &ModuleId, module: &ModuleRecord, cwd: &Path) -> String {
  let stable_id = id.stabilize(cwd);
  let import_map = module
    .import_map
    .iter()
    .map(|(specifier, target)| {
      format!("{}: {}", js_string_literal(specifier), js_string_literal(&target.stabilize(cwd)))
    })
    .collect::<Vec<_>>()
    .join(", ");

  let mut rendered = String::with_capacity(module.code.len() + stable_id.len() * 3 + 128);
  rendered.push_str(&js_string_literal(&stable_id));
  rendered.push_str(": {\n  importMap: {");
  rendered.push_str(&import_map);
  rendered.push_str("},\n  factory: function (require, module, exports) {\n");
  rendered.push_str("//#region ");
  rendered.push_str(&stable_id);
  rendered.push('\n');
  if !module.code.is_empty() {
    rendered.push_str(module.code.trim_end());
    rendered.push('\n');
  }
  rendered.push_str("//#endregion\n  }\n}");
  rendered
}

#[cfg(all(test, unix))]
mod tests {
  use tinypack_common::ImportMap;

  use super::*;

  #[test]
  fn render_factory_with_import_map() {
    let mut import_map = ImportMap::default();
    import_map.insert("./b".into(), "/project/src/b.js".into());
    import_map.insert("../shared/c.js".into(), "/project/shared/c.js".into());
    let module = ModuleRecord { code: "var b = require(\"./b\");\n".to_string(), import_map };

    let rendered = render_module(&"/project/src/a.js".into(), &module, Path::new("/project"));
    assert_eq!(
      rendered,
      r#""src/a.js": {
  importMap: {"./b": "src/b.js", "../shared/c.js": "shared/c.js"},
  factory: function (require, module, exports) {
//#region src/a.js
var b = require("./b");
//#endregion
  }
}"#
    );
  }

  #[test]
  fn ids_are_quoted() {
    let module = ModuleRecord { code: String::new(), import_map: ImportMap::default() };
    let rendered =
      render_module(&"/project/it's \"here\".js".into(), &module, Path::new("/project"));
    assert!(rendered.starts_with(r#""it's \"here\".js": {"#));
    assert!(rendered.contains("importMap: {},"));
  }
}
