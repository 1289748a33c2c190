//! End-to-end tests for the built-in node catalog, run through the engine.

use serde_json::{Value, json};

use verbena_engine::{Engine, EngineError, RunMemory, RunReport};
use verbena_graph::{Graph, GraphDef};
use verbena_nodes::default_registry;

fn build_graph(def: Value) -> Graph {
  let def: GraphDef = serde_json::from_value(def).expect("valid graph definition");
  Graph::build(&def).expect("buildable graph")
}

fn run(def: Value, memory: &mut RunMemory) -> Result<RunReport, EngineError> {
  Engine::new(default_registry()).run(&build_graph(def), memory)
}

#[test]
fn memory_write_then_read_round_trips() {
  let mut memory = RunMemory::new();
  let report = run(
    json!({
      "nodes": [
        {"id": "write", "kind": "MemoryWrite", "config": {"key": "test_key", "value": "test_value"}},
        {"id": "read", "kind": "MemoryRead", "config": {"key": "test_key"}}
      ],
      "edges": [{"from": "write", "to": "read"}]
    }),
    &mut memory,
  )
  .unwrap();

  assert_eq!(report.results["read"].values, json!("test_value"));
  assert_eq!(memory.get("test_key"), Some(&json!("test_value")));
}

#[test]
fn memory_read_of_an_absent_key_yields_null() {
  let mut memory = RunMemory::new();
  let report = run(
    json!({
      "nodes": [{"id": "read", "kind": "MemoryRead", "config": {"key": "nope"}}],
      "edges": []
    }),
    &mut memory,
  )
  .unwrap();

  assert_eq!(report.results["read"].values, Value::Null);
}

#[test]
fn constants_flow_through_slotted_edges() {
  let mut memory = RunMemory::new();
  let report = run(
    json!({
      "nodes": [
        {"id": "greeting", "kind": "Text", "config": {"value": "hello"}},
        {"id": "pass", "kind": "PassThrough"}
      ],
      "edges": [{"from": "greeting", "to": "pass", "input_slot": "value"}]
    }),
    &mut memory,
  )
  .unwrap();

  assert_eq!(report.results["greeting"].values, json!("hello"));
  assert_eq!(report.results["pass"].values, json!("hello"));
}

#[test]
fn concat_joins_two_producers() {
  let mut memory = RunMemory::new();
  let report = run(
    json!({
      "nodes": [
        {"id": "left", "kind": "Text", "config": {"value": "foo"}},
        {"id": "right", "kind": "Text", "config": {"value": "bar"}},
        {"id": "cat", "kind": "Concat"}
      ],
      "edges": [
        {"from": "left", "to": "cat", "input_slot": "a"},
        {"from": "right", "to": "cat", "input_slot": "b"}
      ]
    }),
    &mut memory,
  )
  .unwrap();

  assert_eq!(report.results["cat"].values, json!("foobar"));
  assert!(report.results["cat"].cacheable);
}

#[test]
fn add_sums_config_literals() {
  let mut memory = RunMemory::new();
  let report = run(
    json!({
      "nodes": [{"id": "sum", "kind": "Add", "config": {"a": 1, "b": 2}}],
      "edges": []
    }),
    &mut memory,
  )
  .unwrap();

  assert_eq!(report.results["sum"].values.as_f64(), Some(3.0));
}

#[test]
fn add_rejects_non_numeric_inputs() {
  let mut memory = RunMemory::new();
  let err = run(
    json!({
      "nodes": [{"id": "sum", "kind": "Add", "config": {"a": "x", "b": 2}}],
      "edges": []
    }),
    &mut memory,
  )
  .unwrap_err();

  assert!(matches!(
    err,
    EngineError::Handler { node_id, kind, .. } if node_id == "sum" && kind == "Add"
  ));
}

#[test]
fn value_path_extracts_nested_fields() {
  let mut memory = RunMemory::new();
  let report = run(
    json!({
      "nodes": [
        {"id": "lookup", "kind": "ValuePath", "config": {
          "object": {"user": {"tags": ["admin", "ops"]}},
          "value_path": "user.tags.1"
        }}
      ],
      "edges": []
    }),
    &mut memory,
  )
  .unwrap();

  assert_eq!(report.results["lookup"].values, json!("ops"));
}

#[test]
fn value_path_missing_segment_yields_null() {
  let mut memory = RunMemory::new();
  let report = run(
    json!({
      "nodes": [
        {"id": "lookup", "kind": "ValuePath", "config": {
          "object": {"a": 1},
          "value_path": "a.b.c"
        }}
      ],
      "edges": []
    }),
    &mut memory,
  )
  .unwrap();

  assert_eq!(report.results["lookup"].values, Value::Null);
}

#[test]
fn pass_through_sequencing_input_is_optional() {
  let mut memory = RunMemory::new();
  let report = run(
    json!({
      "nodes": [
        {"id": "first", "kind": "Integer", "config": {"value": 7}},
        {"id": "second", "kind": "PassThrough", "config": {"value": "later"}}
      ],
      "edges": [{"from": "first", "to": "second", "input_slot": "ignored_input"}]
    }),
    &mut memory,
  )
  .unwrap();

  assert_eq!(report.visits, vec!["first", "second"]);
  assert_eq!(report.results["second"].values, json!("later"));
}
