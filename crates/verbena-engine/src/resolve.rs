//! Input resolution.
//!
//! For each declared input of the node being dispatched: a slot-tagged edge
//! feeds it from the producing node's last evaluation result (recomputed if
//! not yet computed this run), otherwise a config literal under the input
//! name supplies it. A required input with neither fails the run.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use verbena_graph::{Graph, LinearOrder, Node};

use crate::dispatch::{self, RunState};
use crate::error::{EngineError, HandlerError};
use crate::memory::RunMemory;
use crate::registry::NodeRegistry;
use crate::schema::{InputSchema, InputSpec};

/// One resolved input: the value plus the producer node it came from, if it
/// was edge-fed rather than a config literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInput {
  pub name: String,
  pub kind: String,
  pub values: Value,
  pub producer: Option<String>,
}

/// The structure passed to a handler: resolved required and optional inputs,
/// keyed by input name. Optional inputs with no producer and no literal are
/// absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedInputs {
  pub node_id: String,
  pub required: HashMap<String, ResolvedInput>,
  pub optional: HashMap<String, ResolvedInput>,
}

impl ResolvedInputs {
  /// Value of a required input. Handlers declare the input in their schema,
  /// so a miss here is a handler bug surfaced as [`HandlerError`].
  pub fn required(&self, name: &str) -> Result<&Value, HandlerError> {
    self
      .required
      .get(name)
      .map(|input| &input.values)
      .ok_or_else(|| HandlerError::MissingInput(name.to_string()))
  }

  /// Required input coerced to a string.
  pub fn required_str(&self, name: &str) -> Result<&str, HandlerError> {
    self.required(name)?.as_str().ok_or_else(|| {
      HandlerError::InputType {
        input: name.to_string(),
        expected: "string".to_string(),
      }
    })
  }

  /// Value of an optional input, if anything fed it.
  pub fn optional(&self, name: &str) -> Option<&Value> {
    self.optional.get(name).map(|input| &input.values)
  }
}

/// Gather the declared inputs of `node` for dispatch.
pub(crate) fn resolve_inputs(
  node: &Node,
  schema: &InputSchema,
  graph: &Graph,
  order: &LinearOrder,
  registry: &NodeRegistry,
  state: &mut RunState,
  memory: &mut RunMemory,
) -> Result<ResolvedInputs, EngineError> {
  let mut resolved = ResolvedInputs {
    node_id: node.id.clone(),
    ..Default::default()
  };

  for spec in &schema.required {
    match resolve_one(node, spec, graph, order, registry, state, memory)? {
      Some(input) => {
        resolved.required.insert(spec.name.clone(), input);
      }
      None => {
        return Err(EngineError::UnresolvedInput {
          node_id: node.id.clone(),
          kind: node.kind.clone(),
          input: spec.name.clone(),
        });
      }
    }
  }

  for spec in &schema.optional {
    if let Some(input) = resolve_one(node, spec, graph, order, registry, state, memory)? {
      resolved.optional.insert(spec.name.clone(), input);
    }
  }

  Ok(resolved)
}

/// Resolve a single declared input, or `None` when nothing feeds it.
fn resolve_one(
  node: &Node,
  spec: &InputSpec,
  graph: &Graph,
  order: &LinearOrder,
  registry: &NodeRegistry,
  state: &mut RunState,
  memory: &mut RunMemory,
) -> Result<Option<ResolvedInput>, EngineError> {
  if let Some(producer) = graph.producer_for(&node.id, &spec.name) {
    // Topological order normally guarantees the producer already ran; an
    // override may have skipped it, in which case it is recomputed here.
    if !state.results.contains_key(&producer.id) {
      dispatch::evaluate_node(&producer.id, graph, order, registry, state, memory)?;
    }
    let values = state.results[&producer.id].values.clone();
    return Ok(Some(ResolvedInput {
      name: spec.name.clone(),
      kind: spec.kind.clone(),
      values,
      producer: Some(producer.id.clone()),
    }));
  }

  if let Some(literal) = node.config.get(&spec.name) {
    return Ok(Some(ResolvedInput {
      name: spec.name.clone(),
      kind: spec.kind.clone(),
      values: literal.clone(),
      producer: None,
    }));
  }

  Ok(None)
}

/// Canonical fingerprint of a node's resolved input values, used to decide
/// whether a cacheable result may be reused within the run.
pub(crate) fn fingerprint(inputs: &ResolvedInputs) -> String {
  let canonical: BTreeMap<&str, &Value> = inputs
    .required
    .iter()
    .chain(inputs.optional.iter())
    .map(|(name, input)| (name.as_str(), &input.values))
    .collect();
  serde_json::to_string(&canonical).unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn input(name: &str, values: Value) -> (String, ResolvedInput) {
    (
      name.to_string(),
      ResolvedInput {
        name: name.to_string(),
        kind: "any".to_string(),
        values,
        producer: None,
      },
    )
  }

  #[test]
  fn fingerprint_is_order_independent() {
    let mut a = ResolvedInputs::default();
    a.required.extend([input("x", json!(1)), input("y", json!(2))]);
    let mut b = ResolvedInputs::default();
    b.required.extend([input("y", json!(2)), input("x", json!(1))]);

    assert_eq!(fingerprint(&a), fingerprint(&b));
  }

  #[test]
  fn fingerprint_tracks_value_changes() {
    let mut a = ResolvedInputs::default();
    a.required.extend([input("x", json!(1))]);
    let mut b = ResolvedInputs::default();
    b.required.extend([input("x", json!(2))]);

    assert_ne!(fingerprint(&a), fingerprint(&b));
  }

  #[test]
  fn required_accessors_surface_misses() {
    let inputs = ResolvedInputs::default();
    assert!(matches!(
      inputs.required("a"),
      Err(HandlerError::MissingInput(name)) if name == "a"
    ));
    assert_eq!(inputs.optional("a"), None);
  }
}
