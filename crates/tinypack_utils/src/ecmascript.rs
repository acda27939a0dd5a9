use oxc::syntax::identifier;

pub fn is_validate_identifier_name(name: &str) -> bool {
  identifier::is_identifier_name(name)
}

/// Quotes `value` as a JavaScript string literal.
pub fn js_string_literal(value: &str) -> String {
  // A JSON string is always a valid JS string literal.
  serde_json::Value::from(value).to_string()
}

pub fn property_access_str(obj: &str, prop: &str) -> String {
  if is_validate_identifier_name(prop) {
    let mut s = String::with_capacity(obj.len() + prop.len() + 1);
    s.push_str(obj);
    s.push('.');
    s.push_str(prop);
    s
  } else {
    format!("{obj}[{}]", js_string_literal(prop))
  }
}

/// Turns an arbitrary name, such as a file stem, into something usable as a binding name.
pub fn legitimize_identifier_name(name: &str) -> String {
  let mut legitimized = String::with_capacity(name.len() + 1);
  for (idx, char) in name.chars().enumerate() {
    if idx == 0 && !identifier::is_identifier_start(char) {
      legitimized.push('_');
      if identifier::is_identifier_part(char) {
        legitimized.push(char);
        continue;
      }
    }
    if identifier::is_identifier_part(char) {
      legitimized.push(char);
    } else if idx > 0 {
      legitimized.push('_');
    }
  }
  if legitimized.is_empty() {
    legitimized.push('_');
  }
  legitimized
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("😈"));
}

#[test]
fn test_property_access_str() {
  assert_eq!(property_access_str("_b", "value"), "_b.value");
  assert_eq!(property_access_str("_b", "some-name"), "_b[\"some-name\"]");
}

#[test]
fn test_legitimize_identifier_name() {
  assert_eq!(legitimize_identifier_name("math"), "math");
  assert_eq!(legitimize_identifier_name("lodash-es"), "lodash_es");
  assert_eq!(legitimize_identifier_name("1st"), "_1st");
  assert_eq!(legitimize_identifier_name(""), "_");
}
