//! Error taxonomy for the execution engine.

use thiserror::Error;
use verbena_graph::StructureError;

/// A failure raised inside a node handler.
#[derive(Debug, Error)]
pub enum HandlerError {
  /// Control-flow wiring around the node is malformed. Surfaced to the host
  /// as [`EngineError::Structure`].
  #[error(transparent)]
  Structure(#[from] StructureError),

  /// A declared required input was not present in the resolved structure.
  #[error("missing required input '{0}'")]
  MissingInput(String),

  /// An input resolved to a value of the wrong shape.
  #[error("input '{input}' has unexpected type: expected {expected}")]
  InputType { input: String, expected: String },

  /// Handler-specific failure.
  #[error("{0}")]
  Failed(String),
}

impl HandlerError {
  pub fn failed(message: impl Into<String>) -> Self {
    HandlerError::Failed(message.into())
  }
}

/// Fatal run errors. None are retried; the run aborts and reports the
/// offending node.
#[derive(Debug, Error)]
pub enum EngineError {
  /// Malformed graph or control-flow wiring.
  #[error(transparent)]
  Structure(#[from] StructureError),

  /// A node's kind has no registry entry.
  #[error("node kind '{kind}' not found in registry for node '{node_id}'")]
  UnknownKind { node_id: String, kind: String },

  /// A required input has no connected producer and no config default.
  #[error("unresolved required input '{input}' for node '{node_id}' ({kind})")]
  UnresolvedInput {
    node_id: String,
    kind: String,
    input: String,
  },

  /// A node's evaluation failed internally.
  #[error("handler failed for node '{node_id}' ({kind}): {source}")]
  Handler {
    node_id: String,
    kind: String,
    #[source]
    source: HandlerError,
  },
}
