use serde_json::Value;

use verbena_engine::{
  HandlerError, InputSchema, NodeHandler, OutputSchema, ResolvedInputs, RunContext,
};

/// Looks up a dotted path inside a structured value.
///
/// Path segments are separated by `.`; a literal dot in a key is escaped as
/// `\.`. Numeric segments index into arrays. A missing segment yields `null`
/// rather than an error.
pub struct ValuePath;

impl NodeHandler for ValuePath {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new()
      .required("object", "any")
      .required("value_path", "string")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("any", "value").cacheable()
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    _ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    let object = inputs.required("object")?;
    let path = inputs.required_str("value_path")?;
    Ok(get_nested(object, &split_path(path)).cloned().unwrap_or(Value::Null))
  }
}

/// Split a dotted path into segments, honoring `\.` escapes.
fn split_path(path: &str) -> Vec<String> {
  if path.is_empty() {
    return Vec::new();
  }

  let mut segments = Vec::new();
  let mut current = String::new();
  let mut chars = path.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '\\' if chars.peek() == Some(&'.') => {
        chars.next();
        current.push('.');
      }
      '.' => {
        segments.push(std::mem::take(&mut current));
      }
      other => current.push(other),
    }
  }
  segments.push(current);
  segments
}

/// Walk a value along path segments: object keys, or array indices when the
/// segment is numeric.
fn get_nested<'a>(value: &'a Value, segments: &[String]) -> Option<&'a Value> {
  let mut current = value;
  for segment in segments {
    current = match current {
      Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
      Value::Object(map) => map.get(segment)?,
      _ => return None,
    };
  }
  Some(current)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn splits_on_dots() {
    assert_eq!(split_path("a.b.c"), vec!["a", "b", "c"]);
    assert_eq!(split_path(""), Vec::<String>::new());
  }

  #[test]
  fn escaped_dots_stay_in_the_segment() {
    assert_eq!(split_path(r"a\.b.c"), vec!["a.b", "c"]);
  }

  #[test]
  fn walks_objects_and_arrays() {
    let value = json!({"a": {"b": [{"c": 42}]}});
    assert_eq!(
      get_nested(&value, &split_path("a.b.0.c")),
      Some(&json!(42))
    );
  }

  #[test]
  fn missing_segments_yield_none() {
    let value = json!({"a": 1});
    assert_eq!(get_nested(&value, &split_path("a.b")), None);
    assert_eq!(get_nested(&value, &split_path("z")), None);
  }
}
