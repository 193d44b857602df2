//! `std::ops` sugar for expression nodes.
//!
//! Arithmetic between expressions builds [`Zip`] nodes and panics on a
//! shape mismatch, mirroring the checked [`zip`] constructor whose
//! `Result` form stays available for recoverable handling. Scalar
//! forms fold the constant into a [`Map`] node. Impls are generated
//! per node type, in owned and borrowed flavors, so `&a + &b` borrows
//! named stores while `a + b` consumes temporaries.

use std::ops;

use crate::element::{Element, Numeric};
use crate::expr::map::{Map, MapFn, Negate, Scale, ScaleDiv, ScaleRecip};
use crate::expr::matmul::MatMul;
use crate::expr::transpose::Transpose;
use crate::expr::zip::{zip, AddOp, DivOp, MulOp, SubOp, Zip, ZipFn};
use crate::expr::Expression;
use crate::store::{Store, View};

macro_rules! expr_binop {
    ([$($g:tt)*] $t:ty, $trait:ident, $method:ident, $combine:ident) => {
        impl<$($g)*, Rhs> ops::$trait<Rhs> for $t
        where
            Rhs: Expression<Elem = <$t as Expression>::Elem>,
            <$t as Expression>::Elem: Numeric,
        {
            type Output = Zip<$t, Rhs, $combine>;

            /// Panics when the operands are not index-compatible; the
            /// fallible form is [`zip`].
            fn $method(self, rhs: Rhs) -> Self::Output {
                match zip(self, rhs, $combine) {
                    Ok(node) => node,
                    Err(e) => panic!("{e}"),
                }
            }
        }
    };
}

macro_rules! expr_arith {
    ([$($g:tt)*] $t:ty) => {
        expr_binop!([$($g)*] $t, Add, add, AddOp);
        expr_binop!([$($g)*] $t, Sub, sub, SubOp);
        expr_binop!([$($g)*] $t, Mul, mul, MulOp);
        expr_binop!([$($g)*] $t, Div, div, DivOp);

        impl<$($g)*> ops::Neg for $t
        where
            <$t as Expression>::Elem: ops::Neg<Output = <$t as Expression>::Elem>,
        {
            type Output = Map<$t, Negate>;

            fn neg(self) -> Self::Output {
                Map::new(self, Negate)
            }
        }
    };
}

macro_rules! scalar_arith_with {
    ([$($g:tt)*] $t:ty, $p:ty) => {
        impl<$($g)*> ops::Mul<$p> for $t
        where
            $t: Expression<Elem = $p>,
        {
            type Output = Map<$t, Scale<$p>>;

            fn mul(self, rhs: $p) -> Self::Output {
                Map::new(self, Scale(rhs))
            }
        }

        impl<$($g)*> ops::Mul<$t> for $p
        where
            $t: Expression<Elem = $p>,
        {
            type Output = Map<$t, Scale<$p>>;

            fn mul(self, rhs: $t) -> Self::Output {
                Map::new(rhs, Scale(self))
            }
        }

        impl<$($g)*> ops::Div<$p> for $t
        where
            $t: Expression<Elem = $p>,
        {
            type Output = Map<$t, ScaleDiv<$p>>;

            fn div(self, rhs: $p) -> Self::Output {
                Map::new(self, ScaleDiv(rhs))
            }
        }

        impl<$($g)*> ops::Div<$t> for $p
        where
            $t: Expression<Elem = $p>,
        {
            type Output = Map<$t, ScaleRecip<$p>>;

            fn div(self, rhs: $t) -> Self::Output {
                Map::new(rhs, ScaleRecip(self))
            }
        }
    };
}

macro_rules! scalar_arith {
    ([$($g:tt)*] $t:ty) => {
        scalar_arith_with!([$($g)*] $t, u8);
        scalar_arith_with!([$($g)*] $t, u32);
        scalar_arith_with!([$($g)*] $t, i32);
        scalar_arith_with!([$($g)*] $t, i64);
        scalar_arith_with!([$($g)*] $t, f32);
        scalar_arith_with!([$($g)*] $t, f64);
        #[cfg(feature = "half")]
        scalar_arith_with!([$($g)*] $t, ::half::f16);
        #[cfg(feature = "bfloat")]
        scalar_arith_with!([$($g)*] $t, ::half::bf16);
    };
}

macro_rules! node_operators {
    ([$($g:tt)*] $t:ty) => {
        expr_arith!([$($g)*] $t);
        scalar_arith!([$($g)*] $t);
    };
}

node_operators!([T: Element] Store<T>);
node_operators!(['a, T: Element] &'a Store<T>);
node_operators!(['a, T: Element] View<'a, T>);
node_operators!([E: Expression, F: MapFn<E::Elem>] Map<E, F>);
node_operators!(['a, E: Expression, F: MapFn<E::Elem>] &'a Map<E, F>);
node_operators!([L: Expression, R: Expression, F: ZipFn<L::Elem, R::Elem>] Zip<L, R, F>);
node_operators!(['a, L: Expression, R: Expression, F: ZipFn<L::Elem, R::Elem>] &'a Zip<L, R, F>);
node_operators!([T: Numeric, L: Expression<Elem = T>, R: Expression<Elem = T>] MatMul<L, R>);
node_operators!(['a, T: Numeric, L: Expression<Elem = T>, R: Expression<Elem = T>] &'a MatMul<L, R>);
node_operators!([E: Expression] Transpose<E>);
node_operators!(['a, E: Expression] &'a Transpose<E>);
