use crate::element::{Element, Numeric};
use crate::expr::Expression;
use crate::index::fold_indices;

/// A deferred whole-expression fold.
///
/// Reductions have no shape and are not expressions themselves; the
/// only way out is [`Reduce::evaluate`], which yields the bare
/// accumulator. Feeding the result back into a tree is an explicit,
/// visible step at the call site.
pub struct Reduce<E, F, A> {
    src: E,
    f: F,
    init: A,
}

/// Fold every element of `src` into an accumulator seeded with `init`.
///
/// Nothing runs until [`Reduce::evaluate`] is called. The accumulator
/// type is unconstrained beyond `Clone`, so non-element accumulators
/// such as `String` work.
pub fn reduce<E, A, F>(src: E, init: A, f: F) -> Reduce<E, F, A>
where
    E: Expression,
    A: Clone,
    F: Fn(A, E::Elem) -> A,
{
    Reduce { src, f, init }
}

impl<E, F, A> Reduce<E, F, A>
where
    E: Expression,
    A: Clone,
    F: Fn(A, E::Elem) -> A,
{
    /// Run the fold over every element in row-major order, axis 0
    /// slowest. The order is part of the contract: order-sensitive
    /// combines produce identical results on every run. An empty
    /// source yields the seed untouched.
    pub fn evaluate(&self) -> A {
        fold_indices(&self.src.shape(), self.init.clone(), |acc, index| {
            (self.f)(acc, self.src.at(index))
        })
    }
}

/// Sum of all elements; zero for an empty source.
pub fn sum<E>(expr: E) -> E::Elem
where
    E: Expression,
    E::Elem: Numeric,
{
    reduce(expr, E::Elem::ZERO, |acc, v| acc + v).evaluate()
}

/// Smallest element; the type's `MAX` sentinel for an empty source.
pub fn min<E>(expr: E) -> E::Elem
where
    E: Expression,
{
    reduce(expr, E::Elem::MAX, |acc, v| if v < acc { v } else { acc }).evaluate()
}

/// Largest element; the type's `MIN` sentinel for an empty source.
pub fn max<E>(expr: E) -> E::Elem
where
    E: Expression,
{
    reduce(expr, E::Elem::MIN, |acc, v| if v > acc { v } else { acc }).evaluate()
}

/// True when `pred` holds for every element; vacuously true for an
/// empty source.
pub fn all<E, P>(expr: E, pred: P) -> bool
where
    E: Expression,
    P: Fn(E::Elem) -> bool,
{
    reduce(expr, true, |acc, v| acc && pred(v)).evaluate()
}

/// True when `pred` holds for at least one element; false for an empty
/// source.
pub fn any<E, P>(expr: E, pred: P) -> bool
where
    E: Expression,
    P: Fn(E::Elem) -> bool,
{
    reduce(expr, false, |acc, v| acc || pred(v)).evaluate()
}
