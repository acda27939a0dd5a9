use std::path::Path;

use tinypack_common::ModuleId;
use tinypack_error::BuildErrorKind;
use tinypack_fs::FileSystem;

pub fn load_source(
  fs: &dyn FileSystem,
  id: &ModuleId,
  importer: Option<&ModuleId>,
) -> Result<String, BuildErrorKind> {
  fs.read_to_string(Path::new(&**id)).map_err(|source| BuildErrorKind::Load {
    id: id.to_string(),
    importer: importer.map(ToString::to_string),
    source,
  })
}
