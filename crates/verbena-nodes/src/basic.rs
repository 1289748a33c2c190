use serde_json::Value;

use verbena_engine::{
  HandlerError, InputSchema, NodeHandler, OutputSchema, ResolvedInputs, RunContext,
};

/// A literal value node. The value comes from the authored config (or an
/// upstream edge) under the `value` input; the output kind tag is fixed per
/// registered kind. Cacheable: the same input always yields the same output.
pub struct Constant {
  kind: &'static str,
}

impl Constant {
  pub fn new(kind: &'static str) -> Self {
    Self { kind }
  }
}

impl NodeHandler for Constant {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new().required("value", self.kind)
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new(self.kind, "value").cacheable()
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    _ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    Ok(inputs.required("value")?.clone())
  }
}

/// Forwards its `value` input unchanged. The optional `ignored_input` exists
/// purely to sequence this node after another one.
pub struct PassThrough;

impl NodeHandler for PassThrough {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new()
      .required("value", "any")
      .optional("ignored_input", "any")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("any", "value")
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    _ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    Ok(inputs.required("value")?.clone())
  }
}

/// String concatenation of inputs `a` and `b`.
pub struct Concat;

impl NodeHandler for Concat {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new()
      .required("a", "string")
      .required("b", "string")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("string", "text").cacheable()
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    _ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    let a = inputs.required_str("a")?;
    let b = inputs.required_str("b")?;
    Ok(Value::String(format!("{a}{b}")))
  }
}

/// Numeric addition of inputs `a` and `b`.
pub struct Add;

impl NodeHandler for Add {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new()
      .required("a", "number")
      .required("b", "number")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("number", "sum").cacheable()
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    _ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    let a = number(inputs, "a")?;
    let b = number(inputs, "b")?;
    serde_json::Number::from_f64(a + b)
      .map(Value::Number)
      .ok_or_else(|| HandlerError::failed("addition produced a non-finite number"))
  }
}

fn number(inputs: &ResolvedInputs, name: &str) -> Result<f64, HandlerError> {
  inputs
    .required(name)?
    .as_f64()
    .ok_or_else(|| HandlerError::InputType {
      input: name.to_string(),
      expected: "number".to_string(),
    })
}
