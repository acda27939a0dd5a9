mod build_error_kind;

use std::ops::{Deref, DerefMut};

pub use crate::build_error_kind::BuildErrorKind;

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Returns the typed failure kind of every error that carries one.
  pub fn kinds(&self) -> impl Iterator<Item = &BuildErrorKind> {
    self.0.iter().filter_map(|err| err.downcast_ref::<BuildErrorKind>())
  }
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (idx, error) in self.0.iter().enumerate() {
      if idx > 0 {
        writeln!(f)?;
      }
      write!(f, "{error:#}")?;
    }
    Ok(())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<BuildErrorKind> for BuildError {
  fn from(error: BuildErrorKind) -> Self {
    Self(vec![error.into()])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn kinds_are_recovered_from_anyhow() {
  let err = BuildError::from(vec![
    anyhow::anyhow!("plain failure"),
    BuildErrorKind::Compile { id: "/src/a.js".into(), message: "Unexpected token".into() }.into(),
  ]);

  let kinds = err.kinds().collect::<Vec<_>>();
  assert_eq!(kinds.len(), 1);
  assert!(matches!(kinds[0], BuildErrorKind::Compile { .. }));
  assert_eq!(err.to_string(), "plain failure\nFailed to compile /src/a.js: Unexpected token");
}
