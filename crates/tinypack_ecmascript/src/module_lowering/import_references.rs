use oxc::{
  ast::{
    ast::{
      AssignmentTargetPropertyIdentifier, CallExpression, ExportNamedDeclaration, Expression,
      IdentifierReference, ImportDeclaration, ObjectProperty,
    },
    visit::walk,
    Visit,
  },
  semantic::{SymbolId, SymbolTable},
  span::Span,
};
use rustc_hash::FxHashMap;
use string_wizard::MagicString;

/// Rewrites every reference to an import binding into a read of the required exports, e.g.
/// `count` into `__b.count`.
///
/// Reading through the exports object on each use is what keeps imports live: the exporting
/// module publishes getters, so later assignments over there are observed here.
pub struct ImportReferences<'me, 'text> {
  pub symbols: &'me SymbolTable,
  /// Import symbol to the expression that reads it.
  pub accesses: &'me FxHashMap<SymbolId, String>,
  pub magic_string: &'me mut MagicString<'text>,
}

impl ImportReferences<'_, '_> {
  fn access_of(&self, ident: &IdentifierReference<'_>) -> Option<&str> {
    let reference_id = ident.reference_id.get()?;
    let symbol_id = self.symbols.get_reference(reference_id).symbol_id()?;
    self.accesses.get(&symbol_id).map(String::as_str)
  }

  fn overwrite(&mut self, span: Span, content: String) {
    // Distinct references never share a span, so the edit always applies.
    let _ = self.magic_string.update(span.start as usize, span.end as usize, content);
  }
}

impl<'a> Visit<'a> for ImportReferences<'_, '_> {
  // Import statements are removed as a whole.
  fn visit_import_declaration(&mut self, _it: &ImportDeclaration<'a>) {}

  fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
    // `export { a }` is removed and exported through a getter, only a declaration stays.
    if let Some(declaration) = &it.declaration {
      self.visit_declaration(declaration);
    }
  }

  fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
    if let Some(access) = self.access_of(ident) {
      let access = access.to_string();
      self.overwrite(ident.span, access);
    }
  }

  fn visit_object_property(&mut self, prop: &ObjectProperty<'a>) {
    if prop.shorthand {
      if let Expression::Identifier(ident) = &prop.value {
        if let Some(access) = self.access_of(ident) {
          let content = format!("{}: {access}", ident.name);
          self.overwrite(prop.span, content);
          return;
        }
      }
    }
    walk::walk_object_property(self, prop);
  }

  fn visit_assignment_target_property_identifier(
    &mut self,
    it: &AssignmentTargetPropertyIdentifier<'a>,
  ) {
    // ({ a } = obj) and ({ a = 1 } = obj)
    if let Some(access) = self.access_of(&it.binding) {
      let content = format!("{}: {access}", it.binding.name);
      self.overwrite(it.binding.span, content);
    }
    if let Some(init) = &it.init {
      self.visit_expression(init);
    }
  }

  fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
    if let Expression::Identifier(ident) = &call.callee {
      if let Some(access) = self.access_of(ident) {
        // An imported function is called without a receiver.
        let content = format!("(0, {access})");
        self.overwrite(ident.span, content);
        self.visit_arguments(&call.arguments);
        return;
      }
    }
    walk::walk_call_expression(self, call);
  }
}
