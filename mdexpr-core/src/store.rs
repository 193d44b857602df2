use petgraph::graph::NodeIndex;
use rand::distributions::{Distribution, Standard};
use rand::Rng;

use crate::bail;
use crate::dot::ExprGraph;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::expr::Expression;
use crate::index::for_each_index;
use crate::shape::{Shape, MAX_RANK};

fn contiguous_strides(shape: &Shape) -> [usize; MAX_RANK] {
    let mut strides = [0usize; MAX_RANK];
    let mut step = 1;
    for axis in (0..shape.rank()).rev() {
        strides[axis] = step;
        step *= shape.extent(axis);
    }
    strides
}

/// Offset for the checked accessors. Arity and range violations come
/// back as errors, never panics.
fn checked_offset(shape: &Shape, strides: &[usize; MAX_RANK], index: &[usize]) -> Result<usize> {
    if index.len() != shape.rank() {
        bail!("expected {} indices, got {}", shape.rank(), index.len());
    }
    let mut offset = 0;
    for (axis, &i) in index.iter().enumerate() {
        let extent = shape.extent(axis);
        if i >= extent {
            return Err(Error::IndexOutOfRange {
                axis,
                index: i,
                extent,
            });
        }
        offset += i * strides[axis];
    }
    Ok(offset)
}

/// Offset for the `Expression::at` fast path: arity always asserted,
/// per-axis range only in debug builds.
fn element_offset(shape: &Shape, strides: &[usize; MAX_RANK], index: &[usize]) -> usize {
    assert_eq!(
        index.len(),
        shape.rank(),
        "expected {} indices, got {}",
        shape.rank(),
        index.len()
    );
    index
        .iter()
        .enumerate()
        .map(|(axis, &i)| {
            debug_assert!(
                i < shape.extent(axis),
                "index {i} out of range for axis {axis} of extent {}",
                shape.extent(axis)
            );
            i * strides[axis]
        })
        .sum()
}

/// Overwrite `data` from `expr`, checking compatibility before the
/// first element is written so a failed assignment leaves the buffer
/// untouched.
fn assign_into<T, E>(shape: &Shape, data: &mut [T], expr: &E) -> Result<()>
where
    E: Expression<Elem = T>,
{
    let src = expr.shape();
    if let Some(axis) = shape.first_mismatch(&src) {
        return Err(Error::ShapeMismatch {
            lhs: *shape,
            rhs: src,
            axis,
        });
    }
    // Traversal order matches the row-major layout, so a running
    // position stands in for the offset computation.
    let mut pos = 0;
    for_each_index(shape, |index| {
        data[pos] = expr.at(index);
        pos += 1;
    });
    Ok(())
}

/// An owned, shaped, row-major buffer: the leaf every tree bottoms out
/// in, and the result of materializing one.
///
/// `Store` is itself an [`Expression`], so freshly built stores and
/// evaluation results drop into larger trees alike. Borrowing with `&`
/// (or [`Store::view`]) lets one store feed several operand slots of
/// the same tree.
#[derive(Clone, Debug)]
pub struct Store<T> {
    data: Vec<T>,
    shape: Shape,
    strides: [usize; MAX_RANK],
}

impl<T: Element> Store<T> {
    fn from_parts(data: Vec<T>, shape: Shape) -> Self {
        debug_assert_eq!(data.len(), shape.element_count());
        Self {
            strides: contiguous_strides(&shape),
            data,
            shape,
        }
    }

    /// A store with every element set to `value`.
    pub fn full(shape: Shape, value: T) -> Self {
        let data = vec![value; shape.element_count()];
        Self::from_parts(data, shape)
    }

    /// A store of zeros.
    pub fn zeros(shape: Shape) -> Self {
        Self::full(shape, T::ZERO)
    }

    /// A store of ones.
    pub fn ones(shape: Shape) -> Self {
        Self::full(shape, T::ONE)
    }

    /// Build elementwise from an index closure, visited in row-major
    /// order.
    pub fn from_fn<F>(shape: Shape, mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let mut data = Vec::with_capacity(shape.element_count());
        for_each_index(&shape, |index| data.push(f(index)));
        Self::from_parts(data, shape)
    }

    /// Adopt an existing row-major buffer. The length must match the
    /// shape's element count exactly.
    pub fn from_vec(data: Vec<T>, shape: Shape) -> Result<Self> {
        if data.len() != shape.element_count() {
            bail!(
                "buffer holds {} elements but shape {} needs {}",
                data.len(),
                shape,
                shape.element_count()
            );
        }
        Ok(Self::from_parts(data, shape))
    }

    /// Materialize `expr` in one row-major pass. Every node computes
    /// exactly once per element; nothing in the tree is mutated.
    pub fn from_expr<E>(expr: &E) -> Self
    where
        E: Expression<Elem = T> + ?Sized,
    {
        let shape = expr.shape();
        let mut data = Vec::with_capacity(shape.element_count());
        for_each_index(&shape, |index| data.push(expr.at(index)));
        Self::from_parts(data, shape)
    }

    /// Fill from the uniform `Standard` distribution.
    pub fn rand(shape: Shape) -> Self
    where
        Standard: Distribution<T>,
    {
        let mut rng = rand::thread_rng();
        let data = (0..shape.element_count()).map(|_| rng.gen()).collect();
        Self::from_parts(data, shape)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Checked read.
    pub fn get(&self, index: &[usize]) -> Result<T> {
        let offset = checked_offset(&self.shape, &self.strides, index)?;
        Ok(self.data[offset])
    }

    /// Checked write of a single element.
    pub fn set(&mut self, index: &[usize], value: T) -> Result<()> {
        let offset = checked_offset(&self.shape, &self.strides, index)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Overwrite this store's elements from an index-compatible
    /// expression. On a shape mismatch the store is left exactly as it
    /// was.
    ///
    /// The borrow checker rules out reading this store inside `expr`
    /// while it is being written, so no element can observe a
    /// half-updated buffer.
    pub fn assign<E>(&mut self, expr: &E) -> Result<()>
    where
        E: Expression<Elem = T>,
    {
        assign_into(&self.shape, &mut self.data, expr)
    }

    /// Read-only view over this store's buffer.
    pub fn view(&self) -> View<'_, T> {
        View {
            data: &self.data,
            shape: self.shape,
            strides: self.strides,
        }
    }

    /// Mutable view over this store's buffer.
    pub fn view_mut(&mut self) -> ViewMut<'_, T> {
        ViewMut {
            data: &mut self.data,
            shape: self.shape,
            strides: self.strides,
        }
    }

    /// The backing buffer in row-major order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Copy the backing buffer out.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.clone()
    }
}

macro_rules! randn {
    ($t:ty) => {
        impl Store<$t> {
            /// Fill from a normal distribution with the given mean and
            /// standard deviation.
            pub fn randn(shape: Shape, mean: $t, std: $t) -> Result<Self> {
                let normal = match rand_distr::Normal::new(mean, std) {
                    Ok(normal) => normal,
                    Err(_) => bail!("invalid normal distribution: mean {mean}, std {std}"),
                };
                let mut rng = rand::thread_rng();
                let data = (0..shape.element_count())
                    .map(|_| normal.sample(&mut rng))
                    .collect();
                Ok(Self::from_parts(data, shape))
            }
        }
    };
}

randn!(f32);
randn!(f64);

impl<T: Element> Expression for Store<T> {
    type Elem = T;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn at(&self, index: &[usize]) -> T {
        self.data[element_offset(&self.shape, &self.strides, index)]
    }

    fn describe(&self, graph: &mut ExprGraph) -> NodeIndex {
        graph.add_node(format!("Store{}", self.shape))
    }
}

/// A read-only, non-owning leaf over a store's buffer. `Copy`, so one
/// view can feed any number of operand slots.
#[derive(Clone, Copy, Debug)]
pub struct View<'a, T> {
    data: &'a [T],
    shape: Shape,
    strides: [usize; MAX_RANK],
}

impl<T: Element> View<'_, T> {
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Checked read.
    pub fn get(&self, index: &[usize]) -> Result<T> {
        let offset = checked_offset(&self.shape, &self.strides, index)?;
        Ok(self.data[offset])
    }

    /// The viewed buffer in row-major order.
    pub fn data(&self) -> &[T] {
        self.data
    }
}

impl<T: Element> Expression for View<'_, T> {
    type Elem = T;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn at(&self, index: &[usize]) -> T {
        self.data[element_offset(&self.shape, &self.strides, index)]
    }

    fn describe(&self, graph: &mut ExprGraph) -> NodeIndex {
        graph.add_node(format!("View{}", self.shape))
    }
}

/// A mutable, non-owning window over a store's buffer.
///
/// Deliberately not an [`Expression`]: a writable window is a write
/// target, and reading one from inside a tree that is also writing it
/// is exactly the aliasing the borrow checker is meant to refuse. Take
/// a [`View`] for reading.
#[derive(Debug)]
pub struct ViewMut<'a, T> {
    data: &'a mut [T],
    shape: Shape,
    strides: [usize; MAX_RANK],
}

impl<T: Element> ViewMut<'_, T> {
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Checked read.
    pub fn get(&self, index: &[usize]) -> Result<T> {
        let offset = checked_offset(&self.shape, &self.strides, index)?;
        Ok(self.data[offset])
    }

    /// Checked write of a single element.
    pub fn set(&mut self, index: &[usize], value: T) -> Result<()> {
        let offset = checked_offset(&self.shape, &self.strides, index)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Overwrite the viewed elements from an index-compatible
    /// expression; checks run before the first write.
    pub fn assign<E>(&mut self, expr: &E) -> Result<()>
    where
        E: Expression<Elem = T>,
    {
        assign_into(&self.shape, self.data, expr)
    }
}
