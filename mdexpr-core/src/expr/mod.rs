pub mod map;
pub mod matmul;
mod operators;
pub mod reduce;
pub mod transpose;
pub mod zip;

use petgraph::graph::NodeIndex;

use crate::dot::ExprGraph;
use crate::element::Element;
use crate::shape::Shape;
use crate::store::Store;

/// A lazy multidimensional expression.
///
/// Constructing an expression computes nothing; [`Expression::at`]
/// pulls exactly one element through the tree, and [`Expression::eval`]
/// runs a single row-major pass into a fresh [`Store`]. Reads never
/// mutate operands, so a subtree may appear several times in one tree
/// and every access may be repeated freely.
///
/// Combinators take their operands by value. Since `&E` is itself an
/// expression, passing a reference borrows a named array or subtree
/// while passing an owned value consumes a temporary; the type makes
/// the ownership transfer explicit at the call site.
pub trait Expression {
    type Elem: Element;

    /// The expression's shape. Nodes derive it from their children;
    /// matmul and transpose report the shape synthesized when the node
    /// was built.
    fn shape(&self) -> Shape;

    /// The element at `index`, which must hold exactly `rank()`
    /// entries, each below the matching extent. Arity violations fail
    /// fast; they are never silently truncated.
    fn at(&self, index: &[usize]) -> Self::Elem;

    /// Add this node and its operands to a diagnostic graph, returning
    /// the node's own index. See [`crate::to_dot`].
    fn describe(&self, graph: &mut ExprGraph) -> NodeIndex;

    fn extent(&self, axis: usize) -> usize {
        self.shape().extent(axis)
    }

    fn rank(&self) -> usize {
        self.shape().rank()
    }

    /// Materialize into a freshly allocated store.
    fn eval(&self) -> Store<Self::Elem>
    where
        Self: Sized,
    {
        Store::from_expr(self)
    }
}

impl<E: Expression> Expression for &E {
    type Elem = E::Elem;

    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn at(&self, index: &[usize]) -> Self::Elem {
        (**self).at(index)
    }

    fn describe(&self, graph: &mut ExprGraph) -> NodeIndex {
        (**self).describe(graph)
    }

    fn extent(&self, axis: usize) -> usize {
        (**self).extent(axis)
    }

    fn rank(&self) -> usize {
        (**self).rank()
    }
}
