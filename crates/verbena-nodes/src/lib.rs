//! Verbena Nodes
//!
//! A small catalog of built-in data nodes: constants, pass-through, run
//! memory access, dotted-path lookup, and basic string/number operations.
//! The full node library lives outside the engine; these are the
//! representatives the CLI and tests run real graphs with.

mod basic;
mod memory;
mod value_path;

pub use basic::{Add, Concat, Constant, PassThrough};
pub use memory::{MemoryRead, MemoryWrite};
pub use value_path::ValuePath;

use std::sync::Arc;

use verbena_engine::{NodeRegistry, register_control_nodes};

/// Register the built-in data node kinds.
pub fn register_builtin_nodes(registry: &mut NodeRegistry) {
  registry.register("Text", Arc::new(Constant::new("string")));
  registry.register("Integer", Arc::new(Constant::new("number")));
  registry.register("Float", Arc::new(Constant::new("number")));
  registry.register("Toggle", Arc::new(Constant::new("boolean")));
  registry.register("PassThrough", Arc::new(PassThrough));
  registry.register("MemoryRead", Arc::new(MemoryRead));
  registry.register("MemoryWrite", Arc::new(MemoryWrite));
  registry.register("ValuePath", Arc::new(ValuePath));
  registry.register("Concat", Arc::new(Concat));
  registry.register("Add", Arc::new(Add));
}

/// A registry with both the control-flow kinds and the built-in data kinds.
pub fn default_registry() -> NodeRegistry {
  let mut registry = NodeRegistry::new();
  register_control_nodes(&mut registry);
  register_builtin_nodes(&mut registry);
  registry
}
