use serde_json::Value;

use verbena_engine::{
  HandlerError, InputSchema, NodeHandler, OutputSchema, ResolvedInputs, RunContext,
};

/// Reads a key from run memory. Produces `null` when the key is absent.
/// Never cacheable: memory may change between visits.
pub struct MemoryRead;

impl NodeHandler for MemoryRead {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new().required("key", "string")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("any", "value")
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    let key = inputs.required_str("key")?;
    Ok(ctx.memory.get(key).cloned().unwrap_or(Value::Null))
  }
}

/// Writes a key/value pair into run memory and forwards the value.
pub struct MemoryWrite;

impl NodeHandler for MemoryWrite {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new()
      .required("key", "string")
      .required("value", "any")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("any", "value")
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    let key = inputs.required_str("key")?;
    let value = inputs.required("value")?.clone();
    ctx.memory.set(key.to_string(), value.clone());
    Ok(value)
  }
}
