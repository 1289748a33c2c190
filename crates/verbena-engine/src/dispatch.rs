//! The dispatcher: the top-level loop that drives a run to completion.
//!
//! A single cursor walks the linear order. Before a node is evaluated, a
//! pending override for it is consumed (jump, bypass, or terminate without
//! invoking the handler); after it is evaluated, an override the handler
//! wrote on its own id redirects the cursor instead of the linear successor.
//! Every entry is consumed exactly once.

use std::collections::HashMap;

use tracing::{debug, error, info, instrument};
use uuid::Uuid;
use verbena_graph::{Graph, LinearOrder, StructureError};

use crate::context::RunContext;
use crate::error::{EngineError, HandlerError};
use crate::memory::RunMemory;
use crate::overrides::{OverrideTable, RuntimeAction};
use crate::registry::NodeRegistry;
use crate::resolve;
use crate::result::{EvaluationResult, RunReport};

/// Mutable state owned by one run: results, cache fingerprints, pending
/// overrides, and the dispatch log.
#[derive(Default)]
pub(crate) struct RunState {
  pub results: HashMap<String, EvaluationResult>,
  pub fingerprints: HashMap<String, String>,
  pub overrides: OverrideTable,
  pub visits: Vec<String>,
}

/// The execution engine. Holds the node registry; all per-run state lives in
/// the run itself, so one engine can serve many sequential runs and each run
/// gets its own memory.
pub struct Engine {
  registry: NodeRegistry,
}

impl Engine {
  pub fn new(registry: NodeRegistry) -> Self {
    Self { registry }
  }

  pub fn registry(&self) -> &NodeRegistry {
    &self.registry
  }

  /// Compute the linear order for a graph, excluding loop back-edges
  /// recognized by the registry's control roles.
  pub fn linear_order(&self, graph: &Graph) -> Result<LinearOrder, StructureError> {
    verbena_graph::linearize(graph, |from, to| self.registry.is_back_edge(from, to))
  }

  /// Execute a graph against the given run memory, driving the cursor state
  /// machine until no next node exists.
  ///
  /// Any structure, input-resolution, or handler error aborts the run; the
  /// failing node's id and kind are attached. Nothing is retried.
  #[instrument(name = "graph_run", skip_all)]
  pub fn run(&self, graph: &Graph, memory: &mut RunMemory) -> Result<RunReport, EngineError> {
    let run_id = Uuid::new_v4().to_string();
    let order = self.linear_order(graph)?;

    info!(
      run_id = %run_id,
      node_count = graph.len(),
      "run_started"
    );

    let mut state = RunState::default();
    let mut cursor: Option<String> = order.first().map(str::to_string);

    while let Some(node_id) = cursor {
      // A pending override for this node is consumed before evaluation.
      if let Some(action) = state.overrides.take(&node_id) {
        debug!(run_id = %run_id, node_id = %node_id, action = ?action, "override_consumed");
        match action {
          RuntimeAction::Goto(target) => {
            cursor = Some(target);
            continue;
          }
          RuntimeAction::Bypass => {
            cursor = order.successor_of(&node_id).map(str::to_string);
            continue;
          }
          RuntimeAction::Return => break,
          RuntimeAction::Evaluate => {}
        }
      }

      if let Err(e) = evaluate_node(&node_id, graph, &order, &self.registry, &mut state, memory) {
        error!(run_id = %run_id, node_id = %node_id, error = %e, "run_failed");
        return Err(e);
      }
      state.visits.push(node_id.clone());

      let planned = order.successor_of(&node_id).map(str::to_string);
      debug!(run_id = %run_id, node_id = %node_id, next = ?planned, "next_action_planned");

      // The handler may have redirected its own successor.
      cursor = match state.overrides.take(&node_id) {
        Some(RuntimeAction::Goto(target)) => Some(target),
        Some(RuntimeAction::Return) => None,
        Some(RuntimeAction::Bypass) | Some(RuntimeAction::Evaluate) | None => planned,
      };
      debug!(run_id = %run_id, node_id = %node_id, next = ?cursor, "next_action_resolved");
    }

    info!(
      run_id = %run_id,
      visited = state.visits.len(),
      pending_overrides = state.overrides.len(),
      "run_completed"
    );

    Ok(RunReport {
      run_id,
      visits: state.visits,
      results: state.results,
      pending_overrides: state.overrides.len(),
    })
  }
}

/// Evaluate one node: resolve inputs, apply the caching policy, invoke the
/// handler, and record the result. Also called by the input resolver to
/// recompute a producer whose result is missing.
pub(crate) fn evaluate_node(
  node_id: &str,
  graph: &Graph,
  order: &LinearOrder,
  registry: &NodeRegistry,
  state: &mut RunState,
  memory: &mut RunMemory,
) -> Result<EvaluationResult, EngineError> {
  let node = graph
    .node(node_id)
    .ok_or_else(|| StructureError::UnknownNode {
      node_id: node_id.to_string(),
    })?;

  let handler = registry
    .handler(&node.kind)
    .ok_or_else(|| EngineError::UnknownKind {
      node_id: node.id.clone(),
      kind: node.kind.clone(),
    })?;

  let inputs = resolve::resolve_inputs(
    node,
    &handler.input_schema(),
    graph,
    order,
    registry,
    state,
    memory,
  )?;

  let output = handler.output_schema();
  let fingerprint = resolve::fingerprint(&inputs);

  if output.cacheable
    && state.fingerprints.get(node_id) == Some(&fingerprint)
    && let Some(cached) = state.results.get(node_id)
  {
    debug!(node_id = %node_id, kind = %node.kind, "cache_hit");
    return Ok(cached.clone());
  }

  let values = {
    let mut ctx = RunContext {
      node_id: &node.id,
      graph,
      order,
      registry,
      memory,
      overrides: &mut state.overrides,
    };
    handler.evaluate(&inputs, &mut ctx).map_err(|e| match e {
      HandlerError::Structure(structure) => EngineError::Structure(structure),
      other => EngineError::Handler {
        node_id: node.id.clone(),
        kind: node.kind.clone(),
        source: other,
      },
    })?
  };

  debug!(node_id = %node_id, kind = %node.kind, "node_evaluated");

  let result = EvaluationResult {
    node_id: node.id.clone(),
    kind: output.kind,
    name: output.name,
    values,
    cacheable: output.cacheable,
  };
  state.fingerprints.insert(node.id.clone(), fingerprint);
  state.results.insert(node.id.clone(), result.clone());

  Ok(result)
}
