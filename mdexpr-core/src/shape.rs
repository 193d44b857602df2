use std::fmt;

/// Largest supported rank. Keeping shapes inside an inline array keeps
/// them `Copy` and keeps element access free of allocation.
pub const MAX_RANK: usize = 6;

/// A per-axis size declaration: either bound where the shape pattern is
/// written down, or supplied later when the shape value is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    Fixed(usize),
    Dynamic,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Axis {
    size: usize,
    fixed: bool,
}

/// Resolved per-axis extents of an array or expression.
///
/// Every axis remembers whether its size was fixed in the declaration or
/// resolved at construction; shape synthesis (matmul, transpose) uses
/// that to keep as much static knowledge as possible. Rank is between 1
/// and [`MAX_RANK`]. Zero-sized axes are representable and simply make
/// every traversal empty.
#[derive(Clone, Copy)]
pub struct Shape {
    axes: [Axis; MAX_RANK],
    rank: usize,
}

impl Shape {
    fn with_rank(rank: usize) -> Self {
        assert!(
            (1..=MAX_RANK).contains(&rank),
            "rank must be between 1 and {MAX_RANK}, got {rank}"
        );
        Self {
            axes: [Axis {
                size: 0,
                fixed: true,
            }; MAX_RANK],
            rank,
        }
    }

    /// Build a shape from a declaration pattern, supplying one size per
    /// [`Extent::Dynamic`] slot in axis order.
    ///
    /// Panics if the rank is outside `1..=MAX_RANK` or the number of
    /// supplied sizes does not match the number of dynamic axes.
    pub fn build(pattern: &[Extent], dynamic: &[usize]) -> Self {
        let wanted = pattern
            .iter()
            .filter(|e| matches!(e, Extent::Dynamic))
            .count();
        assert_eq!(
            wanted,
            dynamic.len(),
            "pattern declares {wanted} dynamic axes but {} sizes were supplied",
            dynamic.len()
        );
        let mut shape = Self::with_rank(pattern.len());
        let mut next_dynamic = 0;
        for (axis, ext) in shape.axes.iter_mut().zip(pattern) {
            *axis = match *ext {
                Extent::Fixed(size) => Axis { size, fixed: true },
                Extent::Dynamic => {
                    let size = dynamic[next_dynamic];
                    next_dynamic += 1;
                    Axis { size, fixed: false }
                }
            };
        }
        shape
    }

    /// A shape whose every axis is fixed.
    pub fn fixed(sizes: &[usize]) -> Self {
        let mut shape = Self::with_rank(sizes.len());
        for (axis, &size) in shape.axes.iter_mut().zip(sizes) {
            *axis = Axis { size, fixed: true };
        }
        shape
    }

    /// A shape whose every axis was resolved at construction.
    pub fn dynamic(sizes: &[usize]) -> Self {
        let mut shape = Self::with_rank(sizes.len());
        for (axis, &size) in shape.axes.iter_mut().zip(sizes) {
            *axis = Axis { size, fixed: false };
        }
        shape
    }

    /// Assemble a shape from `(size, fixed)` pairs. Used by the shape
    /// synthesis in matmul and transpose.
    pub(crate) fn from_axes<I>(axes: I) -> Self
    where
        I: IntoIterator<Item = (usize, bool)>,
    {
        let mut buf = [Axis {
            size: 0,
            fixed: true,
        }; MAX_RANK];
        let mut rank = 0;
        for (size, fixed) in axes {
            assert!(rank < MAX_RANK, "rank must be at most {MAX_RANK}");
            buf[rank] = Axis { size, fixed };
            rank += 1;
        }
        let mut shape = Self::with_rank(rank);
        shape.axes = buf;
        shape
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Size of one axis. Panics if `axis >= rank`.
    pub fn extent(&self, axis: usize) -> usize {
        assert!(
            axis < self.rank,
            "axis {axis} out of bounds for rank {}",
            self.rank
        );
        self.axes[axis].size
    }

    /// Whether the axis size was part of the declaration.
    pub fn is_fixed(&self, axis: usize) -> bool {
        assert!(
            axis < self.rank,
            "axis {axis} out of bounds for rank {}",
            self.rank
        );
        self.axes[axis].fixed
    }

    /// Total number of elements: the product of all extents.
    pub fn element_count(&self) -> usize {
        self.axes[..self.rank].iter().map(|a| a.size).product()
    }

    /// All extents in axis order.
    pub fn sizes(&self) -> Vec<usize> {
        self.axes[..self.rank].iter().map(|a| a.size).collect()
    }

    /// First axis where the sizes disagree. Shapes whose common prefix
    /// agrees but whose ranks differ report the shorter rank.
    pub fn first_mismatch(&self, other: &Shape) -> Option<usize> {
        let common = self.rank.min(other.rank);
        for axis in 0..common {
            if self.axes[axis].size != other.axes[axis].size {
                return Some(axis);
            }
        }
        (self.rank != other.rank).then_some(common)
    }

    /// Equal rank and equal per-axis sizes. Fixed/dynamic provenance
    /// plays no part in compatibility.
    pub fn index_compatible(&self, other: &Shape) -> bool {
        self.first_mismatch(other).is_none()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.axes[..self.rank] == other.axes[..other.rank]
    }
}

impl Eq for Shape {}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, axis) in self.axes[..self.rank].iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", axis.size)?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, axis) in self.axes[..self.rank].iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if !axis.fixed {
                write!(f, "dyn ")?;
            }
            write!(f, "{}", axis.size)?;
        }
        write!(f, ")")
    }
}
