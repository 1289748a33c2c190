use serde::{Deserialize, Serialize};

/// One declared input: a name plus a value-kind tag ("string", "number",
/// "boolean", "any", ...). The engine treats the kind as an opaque label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
  pub name: String,
  pub kind: String,
}

/// The input schema a handler exposes: required inputs must resolve to a
/// producer edge or a config literal; optional inputs are omitted when
/// nothing feeds them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
  pub required: Vec<InputSpec>,
  pub optional: Vec<InputSpec>,
}

impl InputSchema {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn required(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
    self.required.push(InputSpec {
      name: name.into(),
      kind: kind.into(),
    });
    self
  }

  pub fn optional(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
    self.optional.push(InputSpec {
      name: name.into(),
      kind: kind.into(),
    });
    self
  }
}

/// The output schema a handler exposes: a value-kind tag, a display name,
/// and whether the engine may reuse the last result for identical resolved
/// inputs within a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
  pub kind: String,
  pub name: String,
  pub cacheable: bool,
}

impl OutputSchema {
  pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      kind: kind.into(),
      name: name.into(),
      cacheable: false,
    }
  }

  pub fn cacheable(mut self) -> Self {
    self.cacheable = true;
    self
  }
}
