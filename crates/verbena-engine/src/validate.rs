//! Structural validation of control-flow constructs.
//!
//! Companion requirements are defined relative to a control node's immediate
//! graph successors/predecessors and are validated lazily, when the control
//! node itself is evaluated. Companions are matched by [`ControlRole`], not
//! by concrete kind name.

use verbena_graph::StructureError;

use crate::context::RunContext;
use crate::registry::ControlRole;

/// The companion node ids a condition node steers between.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchCompanions {
  pub true_id: String,
  pub false_id: String,
  pub end_id: String,
}

/// The companion node ids of a loop head.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopCompanions {
  pub end_id: String,
}

fn exactly_one_successor(
  ctx: &RunContext<'_>,
  role: ControlRole,
) -> Result<String, StructureError> {
  let matches: Vec<String> = ctx
    .graph
    .successors(ctx.node_id)
    .filter(|n| ctx.registry.role(&n.kind) == Some(role))
    .map(|n| n.id.clone())
    .collect();

  if matches.len() != 1 {
    let node = ctx.node();
    return Err(StructureError::CompanionCardinality {
      node_id: node.id.clone(),
      kind: node.kind.clone(),
      expected: role.describe().to_string(),
      found: matches.len(),
    });
  }
  Ok(matches.into_iter().next().expect("length checked above"))
}

/// Validate a condition node's companions: exactly one successor each of
/// role branch-true, branch-false, and branch-end.
pub fn branch_companions(ctx: &RunContext<'_>) -> Result<BranchCompanions, StructureError> {
  Ok(BranchCompanions {
    true_id: exactly_one_successor(ctx, ControlRole::BranchTrue)?,
    false_id: exactly_one_successor(ctx, ControlRole::BranchFalse)?,
    end_id: exactly_one_successor(ctx, ControlRole::BranchEnd)?,
  })
}

/// Validate a loop head's companions: exactly one loop-end successor, at
/// least one body successor, and a non-empty body in linear order.
pub fn loop_companions(ctx: &RunContext<'_>) -> Result<LoopCompanions, StructureError> {
  let end_id = exactly_one_successor(ctx, ControlRole::LoopEnd)?;

  let node = ctx.node();
  let has_body_successor = ctx
    .graph
    .successors(ctx.node_id)
    .any(|n| ctx.registry.role(&n.kind) != Some(ControlRole::LoopEnd));
  if !has_body_successor {
    return Err(StructureError::EmptyLoopBody {
      node_id: node.id.clone(),
      kind: node.kind.clone(),
    });
  }

  // A loop-end directly after the head in linear order means a body of zero
  // nodes, which the redirection protocol cannot express.
  if ctx.linear_successor() == Some(end_id.as_str()) {
    return Err(StructureError::EmptyLoopBody {
      node_id: node.id.clone(),
      kind: node.kind.clone(),
    });
  }

  Ok(LoopCompanions { end_id })
}

/// Locate the unique loop-head among a break/continue node's immediate
/// predecessors.
pub fn enclosing_loop_head(ctx: &RunContext<'_>) -> Result<String, StructureError> {
  let heads: Vec<String> = ctx
    .graph
    .predecessors(ctx.node_id)
    .filter(|n| ctx.registry.role(&n.kind) == Some(ControlRole::LoopHead))
    .map(|n| n.id.clone())
    .collect();

  if heads.len() != 1 {
    let node = ctx.node();
    return Err(StructureError::LoopHeadCardinality {
      node_id: node.id.clone(),
      kind: node.kind.clone(),
      found: heads.len(),
    });
  }
  Ok(heads.into_iter().next().expect("length checked above"))
}

/// The loop-end successor of a given loop head (used by break to find its
/// jump target).
pub fn loop_end_of(ctx: &RunContext<'_>, head_id: &str) -> Result<String, StructureError> {
  let ends: Vec<String> = ctx
    .graph
    .successors(head_id)
    .filter(|n| ctx.registry.role(&n.kind) == Some(ControlRole::LoopEnd))
    .map(|n| n.id.clone())
    .collect();

  if ends.len() != 1 {
    let head = ctx
      .graph
      .node(head_id)
      .ok_or_else(|| StructureError::UnknownNode {
        node_id: head_id.to_string(),
      })?;
    return Err(StructureError::CompanionCardinality {
      node_id: head.id.clone(),
      kind: head.kind.clone(),
      expected: ControlRole::LoopEnd.describe().to_string(),
      found: ends.len(),
    });
  }
  Ok(ends.into_iter().next().expect("length checked above"))
}
