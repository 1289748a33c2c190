use verbena_graph::{Graph, LinearOrder, Node};

use crate::memory::RunMemory;
use crate::overrides::OverrideTable;
use crate::registry::NodeRegistry;

/// The narrowly-scoped context a handler evaluates against.
///
/// Handlers coordinate through this object instead of holding references to
/// each other: it carries the run's shared memory and override table plus
/// read access to the graph, the linear order, the registry, and the
/// handler's own node id. One context is built per evaluation and owned by
/// the single run thread.
pub struct RunContext<'a> {
  pub node_id: &'a str,
  pub graph: &'a Graph,
  pub order: &'a LinearOrder,
  pub registry: &'a NodeRegistry,
  pub memory: &'a mut RunMemory,
  pub overrides: &'a mut OverrideTable,
}

impl RunContext<'_> {
  /// The graph record of the node being evaluated.
  pub fn node(&self) -> &Node {
    self
      .graph
      .node(self.node_id)
      .expect("evaluating node is always present in the graph")
  }

  /// The node immediately after this one in linear order, if any.
  pub fn linear_successor(&self) -> Option<&str> {
    self.order.successor_of(self.node_id)
  }
}
