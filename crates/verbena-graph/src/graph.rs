use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::def::GraphDef;
use crate::error::StructureError;

/// A node in the built graph: identity, kind tag, and static config.
/// Immutable for the lifetime of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
  pub id: String,
  pub kind: String,
  pub config: Map<String, Value>,
}

/// A resolved edge between two node positions, optionally tagged with the
/// consumer input slot it feeds.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
  pub from: usize,
  pub to: usize,
  pub input_slot: Option<String>,
}

/// The in-memory graph model.
///
/// Holds nodes in insertion order plus derived successor/predecessor indices.
/// Edges describe data dependency and companionship, not execution order;
/// execution order is computed separately by [`linearize`](crate::linearize).
#[derive(Debug, Clone)]
pub struct Graph {
  nodes: Vec<Node>,
  index: HashMap<String, usize>,
  edges: Vec<Edge>,
  successors: Vec<Vec<usize>>,
  predecessors: Vec<Vec<usize>>,
}

impl Graph {
  /// Build a graph from a definition.
  ///
  /// Fails if a node id is duplicated or an edge references an unknown id.
  pub fn build(def: &GraphDef) -> Result<Self, StructureError> {
    let mut nodes = Vec::with_capacity(def.nodes.len());
    let mut index = HashMap::with_capacity(def.nodes.len());

    for record in &def.nodes {
      if index
        .insert(record.id.clone(), nodes.len())
        .is_some()
      {
        return Err(StructureError::DuplicateNode {
          node_id: record.id.clone(),
        });
      }
      nodes.push(Node {
        id: record.id.clone(),
        kind: record.kind.clone(),
        config: record.config.clone(),
      });
    }

    let mut edges = Vec::with_capacity(def.edges.len());
    let mut successors = vec![Vec::new(); nodes.len()];
    let mut predecessors = vec![Vec::new(); nodes.len()];

    for edge in &def.edges {
      let from = *index.get(&edge.from).ok_or_else(|| {
        StructureError::UnknownEdgeNode {
          from: edge.from.clone(),
          to: edge.to.clone(),
          missing: edge.from.clone(),
        }
      })?;
      let to = *index.get(&edge.to).ok_or_else(|| {
        StructureError::UnknownEdgeNode {
          from: edge.from.clone(),
          to: edge.to.clone(),
          missing: edge.to.clone(),
        }
      })?;

      successors[from].push(to);
      predecessors[to].push(from);
      edges.push(Edge {
        from,
        to,
        input_slot: edge.input_slot.clone(),
      });
    }

    Ok(Self {
      nodes,
      index,
      edges,
      successors,
      predecessors,
    })
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Get a node by id.
  pub fn node(&self, node_id: &str) -> Option<&Node> {
    self.index.get(node_id).map(|&i| &self.nodes[i])
  }

  /// Insertion position of a node id.
  pub fn position(&self, node_id: &str) -> Option<usize> {
    self.index.get(node_id).copied()
  }

  /// All nodes in insertion order.
  pub fn nodes(&self) -> impl Iterator<Item = &Node> {
    self.nodes.iter()
  }

  /// All edges in definition order.
  pub fn edges(&self) -> impl Iterator<Item = &Edge> {
    self.edges.iter()
  }

  pub fn node_at(&self, position: usize) -> &Node {
    &self.nodes[position]
  }

  /// Immediate successors of a node, in edge definition order.
  pub fn successors(&self, node_id: &str) -> impl Iterator<Item = &Node> {
    self
      .index
      .get(node_id)
      .map(|&i| self.successors[i].as_slice())
      .unwrap_or(&[])
      .iter()
      .map(|&i| &self.nodes[i])
  }

  /// Immediate predecessors of a node, in edge definition order.
  pub fn predecessors(&self, node_id: &str) -> impl Iterator<Item = &Node> {
    self
      .index
      .get(node_id)
      .map(|&i| self.predecessors[i].as_slice())
      .unwrap_or(&[])
      .iter()
      .map(|&i| &self.nodes[i])
  }

  /// The producer node feeding the named input slot on a consumer, if any.
  ///
  /// Only slot-tagged edges feed inputs; untagged edges declare ordering and
  /// control-flow companionship.
  pub fn producer_for(&self, consumer_id: &str, input_slot: &str) -> Option<&Node> {
    let to = *self.index.get(consumer_id)?;
    self
      .edges
      .iter()
      .find(|e| e.to == to && e.input_slot.as_deref() == Some(input_slot))
      .map(|e| &self.nodes[e.from])
  }
}
