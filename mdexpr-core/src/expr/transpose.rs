use petgraph::graph::NodeIndex;

use crate::dot::ExprGraph;
use crate::error::{Error, Result};
use crate::expr::Expression;
use crate::shape::{Shape, MAX_RANK};

fn reorder(src: &Shape, order: &[usize]) -> Shape {
    Shape::from_axes(order.iter().map(|&axis| (src.extent(axis), src.is_fixed(axis))))
}

/// Lazy axis permutation. Output axis `k` draws its extent, fixedness
/// and index entry from source axis `order[k]`; no element moves.
pub struct Transpose<E> {
    src: E,
    order: [usize; MAX_RANK],
    shape: Shape,
}

/// Reverse all axes: the rank-2 transpose, generalized. Always valid,
/// so no `Result`.
pub fn transpose<E: Expression>(src: E) -> Transpose<E> {
    let shape = src.shape();
    let rank = shape.rank();
    let mut order = [0usize; MAX_RANK];
    for (k, slot) in order[..rank].iter_mut().enumerate() {
        *slot = rank - 1 - k;
    }
    Transpose {
        shape: reorder(&shape, &order[..rank]),
        src,
        order,
    }
}

/// Permute axes so that output axis `k` reads source axis `order[k]`.
///
/// `order` must name every source axis exactly once. Too short, too
/// long, out-of-range entries and repeats are all rejected.
pub fn permute<E: Expression>(src: E, order: &[usize]) -> Result<Transpose<E>> {
    let shape = src.shape();
    let rank = shape.rank();
    let mut seen = [false; MAX_RANK];
    let bijective = order.len() == rank
        && order.iter().all(|&axis| {
            if axis < rank && !seen[axis] {
                seen[axis] = true;
                true
            } else {
                false
            }
        });
    if !bijective {
        return Err(Error::InvalidPermutation {
            rank,
            perm: order.to_vec(),
        });
    }
    let mut buf = [0usize; MAX_RANK];
    buf[..rank].copy_from_slice(order);
    Ok(Transpose {
        shape: reorder(&shape, order),
        src,
        order: buf,
    })
}

impl<E: Expression> Expression for Transpose<E> {
    type Elem = E::Elem;

    fn shape(&self) -> Shape {
        self.shape
    }

    /// Scatter the incoming index back into source axis order, then
    /// delegate: entry `k` lands at source axis `order[k]`.
    fn at(&self, index: &[usize]) -> Self::Elem {
        let rank = self.shape.rank();
        assert_eq!(
            index.len(),
            rank,
            "expected {} indices, got {}",
            rank,
            index.len()
        );
        let mut src_index = [0usize; MAX_RANK];
        for (k, &i) in index.iter().enumerate() {
            src_index[self.order[k]] = i;
        }
        self.src.at(&src_index[..rank])
    }

    fn describe(&self, graph: &mut ExprGraph) -> NodeIndex {
        let src = self.src.describe(graph);
        let rank = self.shape.rank();
        let node = graph.add_node(format!("Transpose{:?}", &self.order[..rank]));
        graph.add_edge(src, node);
        node
    }
}
