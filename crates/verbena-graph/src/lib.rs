//! Verbena Graph
//!
//! This crate holds the static half of the execution engine: the serializable
//! graph definition format produced by authoring tools, the in-memory graph
//! model (nodes, edges, successor/predecessor indices), and the linearizer
//! that computes the fixed topological visitation order.
//!
//! Nothing in this crate is mutated during a run. Control flow is implemented
//! entirely in `verbena-engine` by redirecting a cursor over the
//! [`LinearOrder`] computed here; the graph itself stays acyclic and static.

mod def;
mod error;
mod graph;
mod linearize;

pub use def::{EdgeDef, GraphDef, NodeRecord};
pub use error::StructureError;
pub use graph::{Edge, Graph, Node};
pub use linearize::{LinearOrder, linearize, linearize_forward};
