//! Lazy expression trees over multidimensional arrays.
//!
//! Arrays come in one concrete form, the [`Store`]; everything else is a lightweight
//! description of work. Maps, zips, matrix products and transposes nest into trees that hold
//! their operands and nothing more, so building an expression allocates no buffers and touches
//! no elements.
//!
//! Work happens in exactly two places: [`Expression::at`] pulls a single element through the
//! whole tree on demand, and [`Expression::eval`] (or [`Store::assign`]) materializes the tree
//! in one row-major pass with no intermediate arrays. A deep arithmetic expression therefore
//! costs one fused chain per element instead of one allocation per operator.
//!
//! ## A quick guide
//! - Leaves are [`Store`]s, and cheap [`View`]s of them. Build with [`Store::zeros`],
//!   [`Store::full`], [`Store::from_fn`], [`Store::rand`] and friends.
//! - Arithmetic operators nest lazily: `&a + &b` borrows named arrays, `a + b` consumes
//!   temporaries. [`matmul`] and [`transpose`] / [`permute`] are lazy too.
//! - Reductions ([`sum`], [`min`], [`max`], [`all`], [`any`], [`reduce`]) are eager and return
//!   a bare value, never an expression.
//! - [`Expression::eval`] produces a fresh [`Store`]; [`Store::assign`] refills an existing
//!   one.
//! - [`to_dot`] renders any tree for graphviz when you want to see what you built before
//!   paying for it.
//!
//! ## What can you do with it?
//! ```
//! use mdexpr_core::{matmul, sum, transpose, Expression, Shape, Store};
//!
//! let a: Store<f32> = Store::from_fn(Shape::fixed(&[2, 3]), |ix| (ix[0] * 3 + ix[1]) as f32);
//! let b: Store<f32> = Store::full(Shape::dynamic(&[2, 3]), 0.5);
//!
//! // Nothing below computes or allocates yet.
//! let scaled = (&a + &b) * 2.0f32;
//! let flipped = transpose(&b);
//! let prod = matmul(&scaled, &flipped).unwrap();
//!
//! // Single elements come straight through the tree.
//! assert_eq!(scaled.at(&[0, 1]), 3.0);
//!
//! // One pass materializes the product.
//! let out = prod.eval();
//! assert_eq!(out.shape().sizes(), vec![2, 2]);
//! assert!(sum(&out) > 0.0);
//! ```

mod dot;
mod element;
mod error;
mod expr;
mod index;
mod shape;
mod store;

pub use dot::{to_dot, to_petgraph, ExprGraph};
pub use element::{Element, Numeric};
pub use error::{Error, MatmulFault, Result};
pub use expr::map::{map, Map, MapFn, Negate, Scale, ScaleDiv, ScaleRecip};
pub use expr::matmul::{matmul, MatMul};
pub use expr::reduce::{all, any, max, min, reduce, sum, Reduce};
pub use expr::transpose::{permute, transpose, Transpose};
pub use expr::zip::{zip, AddOp, DivOp, MulOp, SubOp, Zip, ZipFn};
pub use expr::Expression;
pub use index::{fold_indices, for_each_index};
pub use shape::{Extent, Shape, MAX_RANK};
pub use store::{Store, View, ViewMut};
