//! Verbena Engine
//!
//! The execution core of the node-graph workflow engine. This crate provides:
//! - the [`NodeRegistry`] and the [`NodeHandler`] contract node kinds plug
//!   into
//! - [`RunMemory`], the mutable key/value store scoped to one run
//! - the [`OverrideTable`], the single redirection protocol through which
//!   conditionals and loops steer the dispatch cursor
//! - the input resolver, which gathers a node's declared inputs from
//!   upstream results or literal config
//! - the control-flow handlers (condition/branch and loop/break/continue)
//! - the [`Engine`] dispatcher that drives a run to completion
//!
//! Execution is single-threaded and synchronous: handlers run to completion
//! before the cursor advances, and each run owns its memory and override
//! table exclusively.

mod context;
mod control;
mod dispatch;
mod error;
mod memory;
mod overrides;
mod registry;
mod resolve;
mod result;
mod schema;
mod validate;

pub use context::RunContext;
pub use control::{register_control_nodes, truthy};
pub use dispatch::Engine;
pub use error::{EngineError, HandlerError};
pub use memory::RunMemory;
pub use overrides::{OverrideTable, RuntimeAction};
pub use registry::{ControlRole, NodeHandler, NodeRegistry};
pub use resolve::{ResolvedInput, ResolvedInputs};
pub use result::{EvaluationResult, RunReport};
pub use schema::{InputSchema, InputSpec, OutputSchema};
