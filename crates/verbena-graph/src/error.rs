use thiserror::Error;

/// Malformed graph structure or control-flow wiring.
///
/// Dangling references and genuine cycles are caught at build/linearize time;
/// companion cardinality is validated lazily, when the relevant control-flow
/// node is first evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructureError {
  #[error("duplicate node id '{node_id}'")]
  DuplicateNode { node_id: String },

  #[error("edge references unknown node '{missing}': from={from}, to={to}")]
  UnknownEdgeNode {
    from: String,
    to: String,
    missing: String,
  },

  #[error("node id '{node_id}' does not exist in the graph")]
  UnknownNode { node_id: String },

  #[error("graph is not linearizable, cycle among nodes: {node_ids:?}")]
  Cycle { node_ids: Vec<String> },

  #[error(
    "expected exactly one {expected} successor of node '{node_id}' ({kind}), found {found}"
  )]
  CompanionCardinality {
    node_id: String,
    kind: String,
    expected: String,
    found: usize,
  },

  #[error("loop head '{node_id}' ({kind}) has no body nodes")]
  EmptyLoopBody { node_id: String, kind: String },

  #[error(
    "expected exactly one loop-head predecessor of node '{node_id}' ({kind}), found {found}"
  )]
  LoopHeadCardinality {
    node_id: String,
    kind: String,
    found: usize,
  },
}
