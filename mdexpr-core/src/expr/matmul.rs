use petgraph::graph::NodeIndex;

use crate::dot::ExprGraph;
use crate::element::Numeric;
use crate::error::{Error, MatmulFault, Result};
use crate::expr::Expression;
use crate::shape::{Shape, MAX_RANK};

/// Shape of `lhs x rhs`. Checks run in a fixed order so the reported
/// fault is deterministic: rank first, then batch axes left to right,
/// then the inner pair. Batch axes keep whichever operand's axis is
/// fixed; rows come from the left operand, columns from the right.
fn matmul_shape(lhs: &Shape, rhs: &Shape) -> Result<Shape> {
    let rank = lhs.rank();
    if rank != rhs.rank() || rank < 2 {
        return Err(Error::DimensionMismatch {
            lhs: *lhs,
            rhs: *rhs,
            fault: MatmulFault::Rank,
        });
    }
    for axis in 0..rank - 2 {
        if lhs.extent(axis) != rhs.extent(axis) {
            return Err(Error::DimensionMismatch {
                lhs: *lhs,
                rhs: *rhs,
                fault: MatmulFault::Batch(axis),
            });
        }
    }
    let inner_l = lhs.extent(rank - 1);
    let inner_r = rhs.extent(rank - 2);
    if inner_l != inner_r {
        return Err(Error::DimensionMismatch {
            lhs: *lhs,
            rhs: *rhs,
            fault: MatmulFault::Inner(inner_l, inner_r),
        });
    }
    Ok(Shape::from_axes((0..rank).map(|axis| {
        if axis < rank - 2 {
            if lhs.is_fixed(axis) {
                (lhs.extent(axis), true)
            } else {
                (rhs.extent(axis), rhs.is_fixed(axis))
            }
        } else if axis == rank - 2 {
            (lhs.extent(axis), lhs.is_fixed(axis))
        } else {
            (rhs.extent(axis), rhs.is_fixed(axis))
        }
    })))
}

/// Lazy matrix product over the trailing two axes, batched over the
/// leading axes.
pub struct MatMul<L, R> {
    lhs: L,
    rhs: R,
    shape: Shape,
}

/// Multiply `lhs` by `rhs`.
///
/// Both operands need the same rank, at least 2; leading batch axes
/// must agree pairwise and the left operand's last extent must equal
/// the right operand's second-to-last. All checks run here, so a node
/// that exists is valid.
///
/// Each element access walks the shared axis once: O(k) operand reads,
/// nothing cached. Materialize with [`Expression::eval`] before
/// feeding a product into further heavy use.
pub fn matmul<L, R>(lhs: L, rhs: R) -> Result<MatMul<L, R>>
where
    L: Expression,
    R: Expression<Elem = L::Elem>,
    L::Elem: Numeric,
{
    let shape = matmul_shape(&lhs.shape(), &rhs.shape())?;
    Ok(MatMul { lhs, rhs, shape })
}

impl<T, L, R> Expression for MatMul<L, R>
where
    T: Numeric,
    L: Expression<Elem = T>,
    R: Expression<Elem = T>,
{
    type Elem = T;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn at(&self, index: &[usize]) -> T {
        let rank = self.shape.rank();
        let inner = self.lhs.shape().extent(rank - 1);
        let mut li = [0usize; MAX_RANK];
        let mut ri = [0usize; MAX_RANK];
        li[..rank].copy_from_slice(index);
        ri[..rank].copy_from_slice(index);
        let mut acc = T::ZERO;
        for k in 0..inner {
            li[rank - 1] = k;
            ri[rank - 2] = k;
            acc = acc + self.lhs.at(&li[..rank]) * self.rhs.at(&ri[..rank]);
        }
        acc
    }

    fn describe(&self, graph: &mut ExprGraph) -> NodeIndex {
        let lhs = self.lhs.describe(graph);
        let rhs = self.rhs.describe(graph);
        let node = graph.add_node(format!("MatMul{}", self.shape));
        graph.add_edge(lhs, node);
        graph.add_edge(rhs, node);
        node
    }
}
