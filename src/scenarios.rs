//! Canned circuits for the CLI frontend.
//!
//! Each scenario builds a small graph, drives its constant sources with a
//! fixed schedule and dumps the whole graph before the first tick and after
//! every tick.

use std::io::Write;

use clap::ValueEnum;
use tracing::info;

use crate::circuit::{Graph, NodeId, PassReport};
use crate::components::{And, Constant, Memory, Not, Or, Sum, TriangleWave, Xor};
use crate::error::Result;
use crate::node::Node;
use crate::signal::Signal;

/// Number of ticks a scenario runs when none is requested.
pub const DEFAULT_TICKS: usize = 5;

/// Input pairs fed to the two gate sources, one row per tick.
const GATE_SCHEDULE: [[Signal; 2]; 5] = [
    [Signal::OFF, Signal::OFF],
    [Signal::ON, Signal::OFF],
    [Signal::OFF, Signal::ON],
    [Signal::ON, Signal::ON],
    [Signal::INVALID, Signal::ON],
];

const INVERTER_SCHEDULE: [[Signal; 1]; 3] = [[Signal::ON], [Signal::OFF], [Signal::INVALID]];

/// Built-in demonstration circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Two sources feeding an And and an Or gate
    Gates,
    /// A source through two chained inverters
    Inverters,
    /// Four constants summed, then inverted twice, beside an unwired Xor
    Arithmetic,
    /// A triangle wave recorded by a memory sink
    Wave,
    /// Two inverters wired into a loop with no outside input
    Feedback,
}

/// A scenario's graph plus the sources it drives each tick.
#[derive(Debug)]
pub struct Demo {
    graph: Graph,
    sources: Vec<NodeId>,
    schedule: Vec<Vec<Signal>>,
    recorder: Option<NodeId>,
}

impl Demo {
    /// Build the circuit for a scenario.
    pub fn build(scenario: Scenario) -> Result<Self> {
        match scenario {
            Scenario::Gates => Self::gates(),
            Scenario::Inverters => Self::inverters(),
            Scenario::Arithmetic => Self::arithmetic(),
            Scenario::Wave => Self::wave(),
            Scenario::Feedback => Self::feedback(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Apply the schedule row for `tick` and run one propagation pass.
    ///
    /// The schedule wraps around when there are more ticks than rows.
    pub fn tick(&mut self, tick: usize) -> Result<PassReport> {
        if !self.schedule.is_empty() {
            let row = &self.schedule[tick % self.schedule.len()];
            for (&id, &signal) in self.sources.iter().zip(row) {
                self.graph.set_constant(id, signal)?;
            }
        }
        self.graph.update()
    }

    /// Run `ticks` passes, dumping the graph before the first and after each.
    pub fn run<W: Write>(&mut self, ticks: usize, dump: &mut GraphDump<W>) -> Result<Vec<PassReport>> {
        dump.write_section("before", &self.graph)?;

        let mut reports = Vec::with_capacity(ticks);
        for tick in 0..ticks {
            let report = self.tick(tick)?;
            info!(tick, calculated = report.len(), "tick complete");
            dump.write_section(&format!("tick {}", tick + 1), &self.graph)?;
            reports.push(report);
        }

        if let Some(id) = self.recorder {
            if let Some(memory) = self.graph.node_as::<Memory>(id)? {
                dump.write_history(memory.history())?;
            }
        }

        dump.flush()?;
        Ok(reports)
    }

    fn gates() -> Result<Self> {
        let mut graph = Graph::new();
        let input1 = graph.create_node(Constant::new(true).named("input1"));
        let input2 = graph.create_node(Constant::new(true).named("input2"));
        let and = graph.create_node(And::new(2).named("and"));
        let or = graph.create_node(Or::new(2).named("or"));

        graph.connect(input1, 0, and, 0)?;
        graph.connect(input2, 0, and, 1)?;
        graph.connect(input1, 0, or, 0)?;
        graph.connect(input2, 0, or, 1)?;

        Ok(Self {
            graph,
            sources: vec![input1, input2],
            schedule: GATE_SCHEDULE.iter().map(|row| row.to_vec()).collect(),
            recorder: None,
        })
    }

    fn inverters() -> Result<Self> {
        let mut graph = Graph::new();
        let input = graph.create_node(Constant::new(true).named("input"));
        let first = graph.create_node(Not::new().named("not1"));
        let second = graph.create_node(Not::new().named("not2"));

        graph.connect(input, 0, first, 0)?;
        graph.connect(first, 0, second, 0)?;

        Ok(Self {
            graph,
            sources: vec![input],
            schedule: INVERTER_SCHEDULE.iter().map(|row| row.to_vec()).collect(),
            recorder: None,
        })
    }

    fn arithmetic() -> Result<Self> {
        let mut graph = Graph::new();
        let n1 = graph.create_node(Constant::new(true).named("node_1"));
        let n2 = graph.create_node(Sum::new(4).named("node_2"));
        let n3 = graph.create_node(Not::new().named("node_3"));
        let n4 = graph.create_node(Not::new().named("node_4"));
        graph.create_node(Xor::new(3).named("node_5"));
        let n6 = graph.create_node(Constant::new(false).named("node_6"));
        let n7 = graph.create_node(Constant::new(-1.0).named("node_7"));
        let n8 = graph.create_node(Constant::new(0.5).named("node_8"));

        graph.connect(n1, 0, n2, 0)?;
        graph.connect(n6, 0, n2, 1)?;
        graph.connect(n7, 0, n2, 2)?;
        graph.connect(n8, 0, n2, 3)?;
        graph.connect(n2, 0, n3, 0)?;
        graph.connect(n3, 0, n4, 0)?;

        Ok(Self {
            graph,
            sources: Vec::new(),
            schedule: Vec::new(),
            recorder: None,
        })
    }

    fn wave() -> Result<Self> {
        let mut graph = Graph::new();
        let wave = graph.create_node(TriangleWave::default().named("wave"));
        let memory = graph.create_node(Memory::new().named("memory"));
        graph.connect(wave, 0, memory, 0)?;

        Ok(Self {
            graph,
            sources: Vec::new(),
            schedule: Vec::new(),
            recorder: Some(memory),
        })
    }

    fn feedback() -> Result<Self> {
        let mut graph = Graph::new();
        let a = graph.create_node(Not::new().named("a"));
        let b = graph.create_node(Not::new().named("b"));
        graph.connect(a, 0, b, 0)?;
        graph.connect(b, 0, a, 0)?;

        Ok(Self {
            graph,
            sources: Vec::new(),
            schedule: Vec::new(),
            recorder: None,
        })
    }
}

/// Text writer for graph dumps.
pub struct GraphDump<W: Write> {
    writer: W,
}

impl<W: Write> GraphDump<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a `----------label----------` banner followed by the graph.
    pub fn write_section(&mut self, label: &str, graph: &Graph) -> Result<()> {
        writeln!(self.writer, "----------{}----------", label)?;
        writeln!(self.writer, "{}", graph)?;
        Ok(())
    }

    /// Write a recorded signal sequence on one line.
    pub fn write_history(&mut self, history: &[Signal]) -> Result<()> {
        write!(self.writer, "history:")?;
        for signal in history {
            write!(self.writer, " {}", signal)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Build a scenario and run it, writing dumps to `writer`.
pub fn run_scenario<W: Write>(scenario: Scenario, ticks: usize, writer: W) -> Result<Vec<PassReport>> {
    let mut demo = Demo::build(scenario)?;
    let mut dump = GraphDump::new(writer);
    demo.run(ticks, &mut dump)
}
