use crate::shape::{Shape, MAX_RANK};

/// Advance `index` one step in row-major order (last axis fastest).
/// Returns `false` once the index space is exhausted.
fn advance(index: &mut [usize; MAX_RANK], shape: &Shape) -> bool {
    let mut axis = shape.rank();
    while axis > 0 {
        axis -= 1;
        index[axis] += 1;
        if index[axis] < shape.extent(axis) {
            return true;
        }
        index[axis] = 0;
    }
    false
}

/// Call `f` once per valid multi-index of `shape`, axis 0 slowest and
/// the last axis fastest. Shapes with a zero-sized axis produce no
/// calls. The cursor lives on the stack; nothing is allocated.
pub fn for_each_index<F>(shape: &Shape, mut f: F)
where
    F: FnMut(&[usize]),
{
    if shape.element_count() == 0 {
        return;
    }
    let rank = shape.rank();
    let mut index = [0usize; MAX_RANK];
    loop {
        f(&index[..rank]);
        if !advance(&mut index, shape) {
            break;
        }
    }
}

/// Left fold over every multi-index of `shape`, in the same row-major
/// order as [`for_each_index`]. The order is contractual: reductions
/// built on this fold are deterministic even for combines that are not
/// associative or commutative.
pub fn fold_indices<B, F>(shape: &Shape, init: B, mut f: F) -> B
where
    F: FnMut(B, &[usize]) -> B,
{
    if shape.element_count() == 0 {
        return init;
    }
    let rank = shape.rank();
    let mut index = [0usize; MAX_RANK];
    let mut acc = init;
    loop {
        acc = f(acc, &index[..rank]);
        if !advance(&mut index, shape) {
            break;
        }
    }
    acc
}
