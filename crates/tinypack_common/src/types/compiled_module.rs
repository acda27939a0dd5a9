use arcstr::ArcStr;

/// What the compiler hands back for one module.
#[derive(Debug, Clone, Default)]
pub struct CompiledModule {
  pub code: String,
  /// Import specifiers as written in the source, in declaration order.
  pub imports: Vec<ArcStr>,
}
