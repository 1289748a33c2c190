//! Built-in control-flow node handlers.
//!
//! Every construct here reduces to writing override entries: a condition
//! parks a jump on its untaken branch, a loop head parks a jump on its
//! loop-end (repeat) or on its own linear successor (skip the body), and
//! break/continue park jumps on the node that would otherwise run next. The
//! dispatcher consumes each entry exactly once; the linear order itself is
//! never touched.

use std::sync::Arc;

use serde_json::Value;

use crate::context::RunContext;
use crate::error::HandlerError;
use crate::overrides::RuntimeAction;
use crate::registry::{ControlRole, NodeHandler, NodeRegistry};
use crate::resolve::ResolvedInputs;
use crate::schema::{InputSchema, OutputSchema};
use crate::validate;

/// Truthiness of a memory value, used by loop heads: `null`, `false`, `0`,
/// the empty string, and empty collections are falsy.
pub fn truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(a) => !a.is_empty(),
    Value::Object(o) => !o.is_empty(),
  }
}

/// Condition node: compares its two inputs for equality and steers execution
/// into the matching branch.
///
/// The taken branch always gets an `Evaluate` entry, cancelling a jump a
/// flipped outcome parked there in an earlier loop iteration. When the taken
/// branch is the linear successor, the untaken branch gets a jump straight to
/// branch-end so its handler never runs; otherwise the condition redirects
/// its own successor to the taken branch and the untaken branch is never
/// reached, so nothing is parked on it.
pub struct IfEqual;

impl NodeHandler for IfEqual {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new().required("a", "any").required("b", "any")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("boolean", "condition")
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    let taken_true = inputs.required("a")? == inputs.required("b")?;

    let companions = validate::branch_companions(ctx)?;
    let (taken, untaken) = if taken_true {
      (companions.true_id, companions.false_id)
    } else {
      (companions.false_id, companions.true_id)
    };

    ctx.overrides.set(taken.clone(), RuntimeAction::Evaluate);
    if ctx.linear_successor() == Some(taken.as_str()) {
      ctx
        .overrides
        .set(untaken, RuntimeAction::Goto(companions.end_id));
    } else {
      ctx.overrides.set(ctx.node_id, RuntimeAction::Goto(taken));
    }

    Ok(Value::Bool(taken_true))
  }
}

/// Pass-through placeholder used for branch entries and join points
/// (branch-true/false/end, loop-end). Forwards its optional `value` input
/// and has no side effects; its significance is structural.
pub struct JoinPoint;

impl NodeHandler for JoinPoint {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new().optional("value", "any")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("any", "value")
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    _ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    Ok(inputs.optional("value").cloned().unwrap_or(Value::Null))
  }
}

/// Loop head: re-reads a named condition value from run memory on every
/// visit.
///
/// Truthy: parks a jump back to itself on the loop-end, so finishing the body
/// repeats the loop. Falsy: parks a jump to the loop-end on its own linear
/// successor, skipping the body entirely, and cancels any re-entry jump
/// still parked on the loop-end from a continue-shortened iteration.
pub struct WhileLoop;

impl NodeHandler for WhileLoop {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new().required("condition_key", "string")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("boolean", "loop")
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    let key = inputs.required_str("condition_key")?;
    let companions = validate::loop_companions(ctx)?;

    let active = ctx.memory.get(key).is_some_and(truthy);
    if active {
      ctx.overrides.set(
        companions.end_id,
        RuntimeAction::Goto(ctx.node_id.to_string()),
      );
    } else {
      // loop_companions rejected an empty body, so a linear successor
      // distinct from the loop-end exists.
      if let Some(next) = ctx.linear_successor().map(str::to_string) {
        ctx
          .overrides
          .set(next, RuntimeAction::Goto(companions.end_id.clone()));
      }
      ctx.overrides.set(companions.end_id, RuntimeAction::Evaluate);
    }

    Ok(Value::Bool(active))
  }
}

/// Exits the enclosing loop: jumps whatever follows it straight to the
/// loop-end, and cancels the repeat jump parked there so the head is not
/// re-visited.
pub struct BreakLoop;

impl NodeHandler for BreakLoop {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new().optional("value", "any")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("any", "break")
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    let head_id = validate::enclosing_loop_head(ctx)?;
    let end_id = validate::loop_end_of(ctx, &head_id)?;

    ctx.overrides.set(end_id.clone(), RuntimeAction::Evaluate);
    match ctx.linear_successor().map(str::to_string) {
      Some(next) if next != end_id => {
        ctx.overrides.set(next, RuntimeAction::Goto(end_id));
      }
      Some(_) => {} // the loop-end follows immediately; the cancel above suffices
      None => {
        ctx.overrides.set(ctx.node_id, RuntimeAction::Goto(end_id));
      }
    }

    Ok(inputs.optional("value").cloned().unwrap_or(Value::Null))
  }
}

/// Skips the remainder of the body for this iteration: jumps whatever
/// follows it back to the loop head, which re-reads its condition.
pub struct ContinueLoop;

impl NodeHandler for ContinueLoop {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new().optional("value", "any")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("any", "continue")
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    let head_id = validate::enclosing_loop_head(ctx)?;

    match ctx.linear_successor().map(str::to_string) {
      Some(next) => {
        ctx.overrides.set(next, RuntimeAction::Goto(head_id));
      }
      None => {
        ctx.overrides.set(ctx.node_id, RuntimeAction::Goto(head_id));
      }
    }

    Ok(inputs.optional("value").cloned().unwrap_or(Value::Null))
  }
}

/// Terminates the run after evaluating, regardless of remaining nodes.
pub struct Exit;

impl NodeHandler for Exit {
  fn input_schema(&self) -> InputSchema {
    InputSchema::new().optional("value", "any")
  }

  fn output_schema(&self) -> OutputSchema {
    OutputSchema::new("any", "exit")
  }

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError> {
    ctx.overrides.set(ctx.node_id, RuntimeAction::Return);
    Ok(inputs.optional("value").cloned().unwrap_or(Value::Null))
  }
}

/// Register the built-in control-flow node kinds.
pub fn register_control_nodes(registry: &mut NodeRegistry) {
  registry.register_control("IfEqual", Arc::new(IfEqual), ControlRole::Condition);
  registry.register_control("IfEqualTrue", Arc::new(JoinPoint), ControlRole::BranchTrue);
  registry.register_control("IfEqualFalse", Arc::new(JoinPoint), ControlRole::BranchFalse);
  registry.register_control("EndIfEqual", Arc::new(JoinPoint), ControlRole::BranchEnd);
  registry.register_control("WhileLoop", Arc::new(WhileLoop), ControlRole::LoopHead);
  registry.register_control("EndWhileLoop", Arc::new(JoinPoint), ControlRole::LoopEnd);
  registry.register_control("Break", Arc::new(BreakLoop), ControlRole::Break);
  registry.register_control("Continue", Arc::new(ContinueLoop), ControlRole::Continue);
  registry.register("Exit", Arc::new(Exit));
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn truthiness_of_memory_values() {
    assert!(!truthy(&Value::Null));
    assert!(!truthy(&json!(false)));
    assert!(!truthy(&json!(0)));
    assert!(!truthy(&json!("")));
    assert!(!truthy(&json!([])));
    assert!(truthy(&json!(true)));
    assert!(truthy(&json!(1)));
    assert!(truthy(&json!(-5)));
    assert!(truthy(&json!("x")));
    assert!(truthy(&json!([0])));
  }
}
