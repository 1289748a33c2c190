use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The mutable key/value store shared by all node evaluations within one run.
///
/// Created by the host (possibly seeded with initial values), mutated by
/// handlers through their [`RunContext`](crate::RunContext), discarded at run
/// end. Each run owns its memory exclusively; no locking is needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMemory {
  values: HashMap<String, Value>,
}

impl RunMemory {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.values.get(key)
  }

  pub fn set(&mut self, key: impl Into<String>, value: Value) {
    self.values.insert(key.into(), value);
  }

  pub fn remove(&mut self, key: &str) -> Option<Value> {
    self.values.remove(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.values.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.values.iter()
  }
}

impl From<HashMap<String, Value>> for RunMemory {
  fn from(values: HashMap<String, Value>) -> Self {
    Self { values }
  }
}

impl FromIterator<(String, Value)> for RunMemory {
  fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
    Self {
      values: iter.into_iter().collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn set_get_remove_round_trip() {
    let mut memory = RunMemory::new();
    assert!(memory.is_empty());

    memory.set("k", json!(true));
    assert_eq!(memory.get("k"), Some(&json!(true)));
    assert!(memory.contains_key("k"));

    memory.set("k", json!(42));
    assert_eq!(memory.get("k"), Some(&json!(42)));
    assert_eq!(memory.len(), 1);

    assert_eq!(memory.remove("k"), Some(json!(42)));
    assert_eq!(memory.get("k"), None);
  }

  #[test]
  fn seeding_from_a_map() {
    let memory: RunMemory = [("a".to_string(), json!(1)), ("b".to_string(), json!("x"))]
      .into_iter()
      .collect();
    assert_eq!(memory.get("a"), Some(&json!(1)));
    assert_eq!(memory.get("b"), Some(&json!("x")));
  }
}
