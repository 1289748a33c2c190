use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::error::StructureError;
use crate::graph::{Graph, Node};

/// The fixed topological visitation sequence for one graph.
///
/// Computed once per run and never mutated afterwards; control-flow
/// redirection moves a cursor over this sequence, it never reorders it.
#[derive(Debug, Clone)]
pub struct LinearOrder {
  order: Vec<String>,
  positions: HashMap<String, usize>,
}

impl LinearOrder {
  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }

  pub fn first(&self) -> Option<&str> {
    self.order.first().map(String::as_str)
  }

  /// Position of a node id in the sequence.
  pub fn position(&self, node_id: &str) -> Option<usize> {
    self.positions.get(node_id).copied()
  }

  /// The node immediately after `node_id` in the sequence, if any.
  pub fn successor_of(&self, node_id: &str) -> Option<&str> {
    let pos = self.position(node_id)?;
    self.order.get(pos + 1).map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.order.iter().map(String::as_str)
  }

  pub fn as_slice(&self) -> &[String] {
    &self.order
  }
}

/// Deterministic topological sort (Kahn's algorithm, ties broken by node
/// insertion order) over the forward edges of a graph.
///
/// `is_back_edge` recognizes loop back-edges by the producer/consumer node
/// kinds; those edges are excluded from in-degree counting and from the
/// acyclic check, so a loop construct does not make the graph unlinearizable.
/// Any cycle left over after excluding back-edges is a [`StructureError`].
pub fn linearize<F>(graph: &Graph, is_back_edge: F) -> Result<LinearOrder, StructureError>
where
  F: Fn(&Node, &Node) -> bool,
{
  let mut in_degree = vec![0usize; graph.len()];
  let mut forward: Vec<Vec<usize>> = vec![Vec::new(); graph.len()];

  for edge in graph.edges() {
    let from = graph.node_at(edge.from);
    let to = graph.node_at(edge.to);
    if is_back_edge(from, to) {
      continue;
    }
    in_degree[edge.to] += 1;
    forward[edge.from].push(edge.to);
  }

  // Min-heap on insertion position keeps ready nodes in authoring order.
  let mut ready: BinaryHeap<Reverse<usize>> = in_degree
    .iter()
    .enumerate()
    .filter(|&(_, &degree)| degree == 0)
    .map(|(position, _)| Reverse(position))
    .collect();

  let mut order = Vec::with_capacity(graph.len());
  let mut positions = HashMap::with_capacity(graph.len());

  while let Some(Reverse(position)) = ready.pop() {
    positions.insert(graph.node_at(position).id.clone(), order.len());
    order.push(graph.node_at(position).id.clone());

    for &next in &forward[position] {
      in_degree[next] -= 1;
      if in_degree[next] == 0 {
        ready.push(Reverse(next));
      }
    }
  }

  if order.len() < graph.len() {
    let node_ids = graph
      .nodes()
      .filter(|n| !positions.contains_key(&n.id))
      .map(|n| n.id.clone())
      .collect();
    return Err(StructureError::Cycle { node_ids });
  }

  Ok(LinearOrder { order, positions })
}

/// Linearize treating every edge as a forward edge. Suitable for graphs with
/// no loop constructs.
pub fn linearize_forward(graph: &Graph) -> Result<LinearOrder, StructureError> {
  linearize(graph, |_, _| false)
}
