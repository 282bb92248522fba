//! WASM bindings for VCircuit Core.
//!
//! This module exposes a [`Graph`] to JavaScript so a browser front end can
//! build circuits, step them and draw the port states.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuit } from 'vcircuit_core';
//!
//! await init();
//!
//! const circuit = new WasmCircuit();
//! const a = circuit.add_constant(1.0, "a");
//! const b = circuit.add_constant(0.0, "b");
//! const and = circuit.add_and(2, "and");
//! circuit.connect(a, 0, and, 0);
//! circuit.connect(b, 0, and, 1);
//!
//! circuit.update();
//! circuit.output(and, 0); // 0
//! ```
//!
//! Invalid signals cross the boundary as `undefined`.

use wasm_bindgen::prelude::*;

use crate::circuit::{Graph, NodeId};
use crate::components::{
    And, Constant, Memory, Multiplication, Negate, Not, Or, Reciprocal, Sum, TriangleWave,
    TriangleWaveConfig, Xor,
};
use crate::error::CircuitError;
use crate::node::Node;
use crate::signal::Signal;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: CircuitError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_signal(value: Option<f64>) -> Signal {
    value.map_or(Signal::INVALID, Signal::from_float)
}

/// JavaScript-facing circuit graph.
#[wasm_bindgen]
#[derive(Default)]
pub struct WasmCircuit {
    graph: Graph,
}

impl WasmCircuit {
    fn add<N: Node>(&mut self, node: N, name: &str) -> u32 {
        self.graph.create_node(node.named(name)).index() as u32
    }
}

#[wasm_bindgen]
impl WasmCircuit {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCircuit {
        Self::default()
    }

    /// Add a constant source. `undefined` creates an invalid source.
    pub fn add_constant(&mut self, value: Option<f64>, name: &str) -> u32 {
        self.add(Constant::new(to_signal(value)), name)
    }

    pub fn add_triangle_wave(&mut self, min: f64, max: f64, start: f64, delta: f64, name: &str) -> u32 {
        let config = TriangleWaveConfig::new()
            .with_range(min, max)
            .with_start(start)
            .with_delta(delta);
        self.add(TriangleWave::with_config(config), name)
    }

    pub fn add_and(&mut self, num_inputs: usize, name: &str) -> u32 {
        self.add(And::new(num_inputs), name)
    }

    pub fn add_or(&mut self, num_inputs: usize, name: &str) -> u32 {
        self.add(Or::new(num_inputs), name)
    }

    pub fn add_xor(&mut self, num_inputs: usize, name: &str) -> u32 {
        self.add(Xor::new(num_inputs), name)
    }

    pub fn add_not(&mut self, name: &str) -> u32 {
        self.add(Not::new(), name)
    }

    pub fn add_sum(&mut self, num_inputs: usize, name: &str) -> u32 {
        self.add(Sum::new(num_inputs), name)
    }

    pub fn add_multiplication(&mut self, num_inputs: usize, name: &str) -> u32 {
        self.add(Multiplication::new(num_inputs), name)
    }

    pub fn add_negate(&mut self, name: &str) -> u32 {
        self.add(Negate::new(), name)
    }

    pub fn add_reciprocal(&mut self, name: &str) -> u32 {
        self.add(Reciprocal::new(), name)
    }

    pub fn add_memory(&mut self, name: &str) -> u32 {
        self.add(Memory::new(), name)
    }

    pub fn remove_node(&mut self, id: u32) -> Result<(), JsValue> {
        self.graph.remove_node(NodeId::from(id as usize)).map(drop).map_err(to_js)
    }

    pub fn connect(&mut self, from: u32, output: usize, to: u32, input: usize) -> Result<(), JsValue> {
        self.graph
            .connect(NodeId::from(from as usize), output, NodeId::from(to as usize), input)
            .map_err(to_js)
    }

    /// Remove the wire into an input port. Returns whether one existed.
    pub fn disconnect_input(&mut self, node: u32, input: usize) -> bool {
        self.graph
            .disconnect_input(NodeId::from(node as usize), input)
            .is_some()
    }

    pub fn set_constant(&mut self, id: u32, value: Option<f64>) -> Result<(), JsValue> {
        self.graph
            .set_constant(NodeId::from(id as usize), to_signal(value))
            .map_err(to_js)
    }

    /// Run one propagation pass and return the ids calculated, in order.
    pub fn update(&mut self) -> Result<Vec<u32>, JsValue> {
        let report = self.graph.update().map_err(to_js)?;
        Ok(report.calculated().iter().map(|id| id.index() as u32).collect())
    }

    pub fn input(&self, id: u32, index: usize) -> Result<Option<f64>, JsValue> {
        let node = self.graph.node(NodeId::from(id as usize)).map_err(to_js)?;
        node.input(index).map(|s| s.value()).map_err(to_js)
    }

    pub fn output(&self, id: u32, index: usize) -> Result<Option<f64>, JsValue> {
        let node = self.graph.node(NodeId::from(id as usize)).map_err(to_js)?;
        node.output(index).map(|s| s.value()).map_err(to_js)
    }

    /// Recorded history of a memory node; invalid entries become `NaN`.
    pub fn history(&self, id: u32) -> Result<Vec<f64>, JsValue> {
        let id = NodeId::from(id as usize);
        match self.graph.node_as::<Memory>(id).map_err(to_js)? {
            Some(memory) => Ok(memory
                .history()
                .iter()
                .map(|s| s.value().unwrap_or(f64::NAN))
                .collect()),
            None => Err(JsValue::from_str(&format!("Node {} is not a Memory", id))),
        }
    }

    pub fn node_ids(&self) -> Vec<u32> {
        self.graph
            .node_ids()
            .into_iter()
            .map(|id| id.index() as u32)
            .collect()
    }

    pub fn name(&self, id: u32) -> Result<String, JsValue> {
        let node = self.graph.node(NodeId::from(id as usize)).map_err(to_js)?;
        Ok(node.name().to_string())
    }

    pub fn set_name(&mut self, id: u32, name: String) -> Result<(), JsValue> {
        let node = self.graph.node_mut(NodeId::from(id as usize)).map_err(to_js)?;
        node.set_name(name);
        Ok(())
    }

    pub fn kind(&self, id: u32) -> Result<String, JsValue> {
        let node = self.graph.node(NodeId::from(id as usize)).map_err(to_js)?;
        Ok(node.kind().to_string())
    }

    pub fn num_inputs(&self, id: u32) -> Result<usize, JsValue> {
        let node = self.graph.node(NodeId::from(id as usize)).map_err(to_js)?;
        Ok(node.num_inputs())
    }

    pub fn num_outputs(&self, id: u32) -> Result<usize, JsValue> {
        let node = self.graph.node(NodeId::from(id as usize)).map_err(to_js)?;
        Ok(node.num_outputs())
    }

    /// All connections flattened as `[from, output, to, input, ...]`.
    pub fn connections(&self) -> Vec<u32> {
        self.graph
            .connections()
            .iter()
            .flat_map(|c| {
                [
                    c.from.index() as u32,
                    c.output as u32,
                    c.to.index() as u32,
                    c.input as u32,
                ]
            })
            .collect()
    }

    /// One line per node, `name: in a b; out c`.
    pub fn dump(&self) -> String {
        self.graph.to_string()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
