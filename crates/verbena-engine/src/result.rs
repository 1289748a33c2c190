use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The value produced by one node evaluation, tagged with the declared
/// output kind and caching flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
  pub node_id: String,
  pub kind: String,
  pub name: String,
  pub values: Value,
  pub cacheable: bool,
}

/// The outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  /// Unique run id, present on every log event of the run.
  pub run_id: String,
  /// Node ids in dispatch order: every node whose evaluation step ran
  /// (handler invoked or cache served). Nodes skipped by an override do not
  /// appear.
  pub visits: Vec<String>,
  /// Last evaluation result per dispatched node, keyed by node id.
  pub results: HashMap<String, EvaluationResult>,
  /// Override entries still pending at termination. Redirections are only
  /// parked on nodes the cursor will reach, so this is normally zero; a
  /// nonzero count means a handler parked an entry the run never consumed.
  pub pending_overrides: usize,
}
