use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A serializable graph definition as produced by an authoring tool.
///
/// Node order is significant: it is the insertion order used to break ties
/// when the graph is linearized, so two loads of the same definition always
/// execute in the same sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDef {
  pub nodes: Vec<NodeRecord>,
  #[serde(default)]
  pub edges: Vec<EdgeDef>,
}

/// A single authored node: identity, kind tag, and static widget values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
  pub id: String,
  pub kind: String,
  /// Literal widget values, keyed by input name. Consulted by the input
  /// resolver when no edge feeds the input.
  #[serde(default)]
  pub config: Map<String, Value>,
}

/// A directed edge from a producer node to a consumer node.
///
/// An edge with an `input_slot` feeds that named input on the consumer from
/// the producer's output. An edge without a slot only declares ordering and
/// control-flow companionship (e.g. a condition node to its branch nodes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDef {
  pub from: String,
  pub to: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub input_slot: Option<String>,
}

impl EdgeDef {
  pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
    Self {
      from: from.into(),
      to: to.into(),
      input_slot: None,
    }
  }

  pub fn slotted(
    from: impl Into<String>,
    to: impl Into<String>,
    input_slot: impl Into<String>,
  ) -> Self {
    Self {
      from: from.into(),
      to: to.into(),
      input_slot: Some(input_slot.into()),
    }
  }
}
