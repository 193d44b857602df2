use petgraph::dot::{Config, Dot};
use petgraph::graph::NodeIndex;
use petgraph::Graph;

use crate::expr::Expression;

/// Builder handed to [`Expression::describe`]: a label per node, an
/// edge per operand.
pub struct ExprGraph {
    graph: Graph<String, ()>,
}

impl ExprGraph {
    fn new() -> Self {
        Self {
            graph: Graph::new(),
        }
    }

    pub fn add_node(&mut self, label: impl Into<String>) -> NodeIndex {
        self.graph.add_node(label.into())
    }

    /// Edges run operand to consumer, so rendered graphs read in
    /// dataflow direction.
    pub fn add_edge(&mut self, operand: NodeIndex, consumer: NodeIndex) {
        self.graph.add_edge(operand, consumer, ());
    }
}

/// The labelled operand-to-consumer graph of `expr`.
///
/// A node appears once per operand slot: a subtree used twice shows up
/// twice, faithfully mirroring how evaluation will walk the tree.
pub fn to_petgraph<E: Expression>(expr: &E) -> Graph<String, ()> {
    let mut builder = ExprGraph::new();
    expr.describe(&mut builder);
    builder.graph
}

/// Graphviz DOT rendering of `expr`, for eyeballing what a tree will
/// do before paying for its evaluation.
pub fn to_dot<E: Expression>(expr: &E) -> String {
    let graph = to_petgraph(expr);
    format!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
}
