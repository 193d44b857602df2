use petgraph::graph::NodeIndex;

use crate::dot::ExprGraph;
use crate::element::{Element, Numeric};
use crate::error::{Error, Result};
use crate::expr::Expression;
use crate::shape::Shape;

/// A binary element combine applied lazily by [`Zip`].
///
/// Closures of two arguments qualify through the blanket impl; the
/// named implementors back the arithmetic operator sugar.
pub trait ZipFn<L, R> {
    type Output: Element;

    fn apply(&self, lhs: L, rhs: R) -> Self::Output;

    /// Label used by the DOT exporter.
    fn name(&self) -> &'static str {
        "fn"
    }
}

impl<L, R, O, F> ZipFn<L, R> for F
where
    O: Element,
    F: Fn(L, R) -> O,
{
    type Output = O;

    #[inline]
    fn apply(&self, lhs: L, rhs: R) -> O {
        self(lhs, rhs)
    }
}

macro_rules! combiner {
    ($name:ident, $op:tt, $label:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl<T: Numeric> ZipFn<T, T> for $name {
            type Output = T;

            #[inline]
            fn apply(&self, lhs: T, rhs: T) -> T {
                lhs $op rhs
            }

            fn name(&self) -> &'static str {
                $label
            }
        }
    };
}

combiner!(AddOp, +, "+");
combiner!(SubOp, -, "-");
combiner!(MulOp, *, "*");
combiner!(DivOp, /, "/");

/// Lazy elementwise combination of two index-compatible operands.
pub struct Zip<L, R, F> {
    lhs: L,
    rhs: R,
    f: F,
}

/// Combine corresponding elements of `lhs` and `rhs` with `f`.
///
/// The operands must agree in rank and in every extent. The check runs
/// here, at construction, so a mismatched pair never reaches element
/// access.
pub fn zip<L, R, F>(lhs: L, rhs: R, f: F) -> Result<Zip<L, R, F>>
where
    L: Expression,
    R: Expression,
    F: ZipFn<L::Elem, R::Elem>,
{
    if let Some(axis) = lhs.shape().first_mismatch(&rhs.shape()) {
        return Err(Error::ShapeMismatch {
            lhs: lhs.shape(),
            rhs: rhs.shape(),
            axis,
        });
    }
    Ok(Zip { lhs, rhs, f })
}

impl<L, R, F> Expression for Zip<L, R, F>
where
    L: Expression,
    R: Expression,
    F: ZipFn<L::Elem, R::Elem>,
{
    type Elem = F::Output;

    /// The right operand's shape; both operands agree in every extent
    /// by construction.
    fn shape(&self) -> Shape {
        self.rhs.shape()
    }

    fn at(&self, index: &[usize]) -> Self::Elem {
        self.f.apply(self.lhs.at(index), self.rhs.at(index))
    }

    fn describe(&self, graph: &mut ExprGraph) -> NodeIndex {
        let lhs = self.lhs.describe(graph);
        let rhs = self.rhs.describe(graph);
        let node = graph.add_node(format!("Zip({})", self.f.name()));
        graph.add_edge(lhs, node);
        graph.add_edge(rhs, node);
        node
    }
}
