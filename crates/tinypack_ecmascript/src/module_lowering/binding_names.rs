use oxc::ast::ast::{BindingPattern, BindingPatternKind};

/// Names a declaration pattern binds, e.g. `a`, `b` and `c` for `{ a, b: [b], ...c }`.
pub fn collect_declared_names(pattern: &BindingPattern<'_>) -> Vec<String> {
  let mut names = Vec::new();
  collect_into(pattern, &mut names);
  names
}

fn collect_into(pattern: &BindingPattern<'_>, names: &mut Vec<String>) {
  match &pattern.kind {
    BindingPatternKind::BindingIdentifier(ident) => names.push(ident.name.to_string()),
    BindingPatternKind::ObjectPattern(object) => {
      for property in &object.properties {
        collect_into(&property.value, names);
      }
      if let Some(rest) = &object.rest {
        collect_into(&rest.argument, names);
      }
    }
    BindingPatternKind::ArrayPattern(array) => {
      for element in array.elements.iter().flatten() {
        collect_into(element, names);
      }
      if let Some(rest) = &array.rest {
        collect_into(&rest.argument, names);
      }
    }
    BindingPatternKind::AssignmentPattern(assignment) => collect_into(&assignment.left, names),
  }
}
