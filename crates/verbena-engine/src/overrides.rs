use std::collections::HashMap;

/// A pending redirection instruction, keyed by the node id it fires at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeAction {
  /// Evaluate the node normally. Written to cancel an earlier redirection.
  Evaluate,
  /// Skip the node's handler and continue to its linear successor.
  Bypass,
  /// Jump the cursor to the named node without evaluating the current one.
  Goto(String),
  /// Terminate the run.
  Return,
}

/// Per-run table of pending redirection instructions.
///
/// This is the entire control-flow vocabulary of the engine: condition and
/// loop handlers write entries when they evaluate, and the dispatcher
/// consumes each entry exactly once. At most one entry is pending per node
/// id; a later write replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
  pending: HashMap<String, RuntimeAction>,
}

impl OverrideTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Write a pending action for a node id, replacing any earlier entry.
  pub fn set(&mut self, node_id: impl Into<String>, action: RuntimeAction) {
    self.pending.insert(node_id.into(), action);
  }

  /// Consume the pending action for a node id, clearing the entry.
  pub fn take(&mut self, node_id: &str) -> Option<RuntimeAction> {
    self.pending.remove(node_id)
  }

  /// Inspect the pending action for a node id without consuming it.
  pub fn pending(&self, node_id: &str) -> Option<&RuntimeAction> {
    self.pending.get(node_id)
  }

  pub fn len(&self) -> usize {
    self.pending.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pending.is_empty()
  }
}
