use std::ops::Neg;

use petgraph::graph::NodeIndex;

use crate::dot::ExprGraph;
use crate::element::{Element, Numeric};
use crate::expr::Expression;
use crate::shape::Shape;

/// A unary element transform applied lazily by [`Map`].
///
/// Any `Fn(T) -> O` closure qualifies through the blanket impl, so
/// `map(expr, |v| v as f64)` works directly. The named implementors
/// below carry a folded-in scalar and back the scalar operator sugar.
pub trait MapFn<T> {
    type Output: Element;

    fn apply(&self, value: T) -> Self::Output;

    /// Label used by the DOT exporter.
    fn name(&self) -> &'static str {
        "fn"
    }
}

impl<T, O, F> MapFn<T> for F
where
    O: Element,
    F: Fn(T) -> O,
{
    type Output = O;

    #[inline]
    fn apply(&self, value: T) -> O {
        self(value)
    }
}

/// Multiply every element by a constant: `c * v`.
#[derive(Debug, Clone, Copy)]
pub struct Scale<T>(pub T);

impl<T: Numeric> MapFn<T> for Scale<T> {
    type Output = T;

    #[inline]
    fn apply(&self, value: T) -> T {
        self.0 * value
    }

    fn name(&self) -> &'static str {
        "scale"
    }
}

/// Divide every element by a constant: `v / c`. The divisor divides
/// directly, so integer elements truncate exactly as `/` does.
#[derive(Debug, Clone, Copy)]
pub struct ScaleDiv<T>(pub T);

impl<T: Numeric> MapFn<T> for ScaleDiv<T> {
    type Output = T;

    #[inline]
    fn apply(&self, value: T) -> T {
        value / self.0
    }

    fn name(&self) -> &'static str {
        "div"
    }
}

/// Divide a constant by every element: `c / v`.
#[derive(Debug, Clone, Copy)]
pub struct ScaleRecip<T>(pub T);

impl<T: Numeric> MapFn<T> for ScaleRecip<T> {
    type Output = T;

    #[inline]
    fn apply(&self, value: T) -> T {
        self.0 / value
    }

    fn name(&self) -> &'static str {
        "recip"
    }
}

/// Elementwise negation, `-v`.
#[derive(Debug, Clone, Copy)]
pub struct Negate;

impl<T> MapFn<T> for Negate
where
    T: Element + Neg<Output = T>,
{
    type Output = T;

    #[inline]
    fn apply(&self, value: T) -> T {
        -value
    }

    fn name(&self) -> &'static str {
        "neg"
    }
}

/// Lazy unary transform of a single operand.
///
/// Shape and extents pass straight through from the operand; only the
/// element type may change.
pub struct Map<E, F> {
    src: E,
    f: F,
}

impl<E, F> Map<E, F> {
    pub(crate) fn new(src: E, f: F) -> Self {
        Self { src, f }
    }
}

/// Apply `f` lazily to every element of `src`.
///
/// Nothing is computed here; each access applies `f` to the matching
/// operand element.
pub fn map<E, F>(src: E, f: F) -> Map<E, F>
where
    E: Expression,
    F: MapFn<E::Elem>,
{
    Map::new(src, f)
}

impl<E, F> Expression for Map<E, F>
where
    E: Expression,
    F: MapFn<E::Elem>,
{
    type Elem = F::Output;

    fn shape(&self) -> Shape {
        self.src.shape()
    }

    fn at(&self, index: &[usize]) -> Self::Elem {
        self.f.apply(self.src.at(index))
    }

    fn describe(&self, graph: &mut ExprGraph) -> NodeIndex {
        let src = self.src.describe(graph);
        let node = graph.add_node(format!("Map({})", self.f.name()));
        graph.add_edge(src, node);
        node
    }
}
