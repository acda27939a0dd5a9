use std::path::Path;

pub trait PathExt {
  fn expect_to_str(&self) -> &str;

  fn representative_file_name(&self) -> String;
}

impl PathExt for Path {
  fn expect_to_str(&self) -> &str {
    self.to_str().unwrap_or_else(|| {
      panic!("Failed to convert {:?} to valid utf8 str", self.display());
    })
  }

  /// It doesn't ensure the file name is a valid identifier in JS.
  fn representative_file_name(&self) -> String {
    let file_name =
      self.file_stem().map_or_else(|| self.to_string_lossy(), |stem| stem.to_string_lossy());

    match &*file_name {
      // "index": Node.js use `index` as a special name for directory import.
      "index" | "mod" => self
        .parent()
        .and_then(Path::file_stem)
        .map_or_else(|| file_name.to_string(), |parent| parent.to_string_lossy().into_owned()),
      _ => file_name.into_owned(),
    }
  }
}

#[test]
fn test_representative_file_name() {
  let cwd = Path::new(".").join("project");
  let path = cwd.join("src").join("vue.js");
  assert_eq!(path.representative_file_name(), "vue");

  let path = cwd.join("vue").join("index.js");
  assert_eq!(path.representative_file_name(), "vue");

  let path = Path::new("./b");
  assert_eq!(path.representative_file_name(), "b");
}
