use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use verbena_graph::Node;

use crate::context::RunContext;
use crate::error::HandlerError;
use crate::resolve::ResolvedInputs;
use crate::schema::{InputSchema, OutputSchema};

/// The contract a node kind plugs into the engine with.
///
/// A handler exposes its input/output schemas and an evaluation operation.
/// Evaluation receives the resolved input structure plus a [`RunContext`]
/// granting read/write access to run memory and the override table, and read
/// access to the graph, the linear order, and the handler's own node id. The
/// engine never inspects a handler beyond this contract.
pub trait NodeHandler: Send + Sync {
  fn input_schema(&self) -> InputSchema;

  fn output_schema(&self) -> OutputSchema;

  fn evaluate(
    &self,
    inputs: &ResolvedInputs,
    ctx: &mut RunContext<'_>,
  ) -> Result<Value, HandlerError>;
}

/// Structural role a node kind plays in a control-flow construct.
///
/// Companion requirements are validated against roles, not concrete kind
/// names, so alternative condition kinds can share the same branch nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRole {
  /// Evaluates a boolean and steers execution to one of its branches.
  Condition,
  /// Entry marker of the taken-when-true branch.
  BranchTrue,
  /// Entry marker of the taken-when-false branch.
  BranchFalse,
  /// Join point where both branches converge.
  BranchEnd,
  /// Loop head; re-reads its condition each iteration.
  LoopHead,
  /// Join point after the loop body.
  LoopEnd,
  /// Exits the enclosing loop.
  Break,
  /// Skips to the next iteration of the enclosing loop.
  Continue,
}

impl ControlRole {
  /// Human-readable role name used in structure errors.
  pub fn describe(self) -> &'static str {
    match self {
      ControlRole::Condition => "condition",
      ControlRole::BranchTrue => "branch-true",
      ControlRole::BranchFalse => "branch-false",
      ControlRole::BranchEnd => "branch-end",
      ControlRole::LoopHead => "loop-head",
      ControlRole::LoopEnd => "loop-end",
      ControlRole::Break => "break",
      ControlRole::Continue => "continue",
    }
  }
}

struct RegistryEntry {
  handler: Arc<dyn NodeHandler>,
  role: Option<ControlRole>,
}

/// Maps a node-kind identifier to its handler and optional control role.
///
/// New node kinds are added by registration; the engine itself never needs
/// modification.
#[derive(Default)]
pub struct NodeRegistry {
  entries: HashMap<String, RegistryEntry>,
}

impl NodeRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a plain data node kind. Replaces any previous registration.
  pub fn register(&mut self, kind: impl Into<String>, handler: Arc<dyn NodeHandler>) {
    self.entries.insert(
      kind.into(),
      RegistryEntry {
        handler,
        role: None,
      },
    );
  }

  /// Register a node kind that plays a structural control-flow role.
  pub fn register_control(
    &mut self,
    kind: impl Into<String>,
    handler: Arc<dyn NodeHandler>,
    role: ControlRole,
  ) {
    self.entries.insert(
      kind.into(),
      RegistryEntry {
        handler,
        role: Some(role),
      },
    );
  }

  pub fn contains(&self, kind: &str) -> bool {
    self.entries.contains_key(kind)
  }

  pub fn handler(&self, kind: &str) -> Option<Arc<dyn NodeHandler>> {
    self.entries.get(kind).map(|e| Arc::clone(&e.handler))
  }

  pub fn role(&self, kind: &str) -> Option<ControlRole> {
    self.entries.get(kind).and_then(|e| e.role)
  }

  /// Whether an edge is a loop back-edge, recognized purely by node kind.
  /// Such edges are skipped when the graph is linearized.
  pub fn is_back_edge(&self, from: &Node, to: &Node) -> bool {
    self.role(&from.kind) == Some(ControlRole::LoopEnd)
      && self.role(&to.kind) == Some(ControlRole::LoopHead)
  }
}
