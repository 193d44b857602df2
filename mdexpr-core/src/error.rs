use std::fmt;

use crate::shape::Shape;

/// Why a pair of shapes cannot be matrix-multiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatmulFault {
    /// Operand ranks differ, or either rank is below 2.
    Rank,
    /// A leading batch axis differs between the operands.
    Batch(usize),
    /// lhs columns vs rhs rows, carrying both extents.
    Inner(usize, usize),
}

impl fmt::Display for MatmulFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rank => write!(f, "ranks must be equal and at least 2"),
            Self::Batch(axis) => write!(f, "batch axis {axis} differs"),
            Self::Inner(lhs_k, rhs_k) => {
                write!(f, "inner dimensions {lhs_k} and {rhs_k} do not line up")
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Message: {0}")]
    Msg(String),

    #[error("{inner}\n{backtrace}")]
    WithBacktrace {
        inner: Box<Self>,
        backtrace: Box<std::backtrace::Backtrace>,
    },

    /// Operands are not index-compatible.
    #[error("shapes {lhs} and {rhs} differ at axis {axis}")]
    ShapeMismatch { lhs: Shape, rhs: Shape, axis: usize },

    /// Matrix multiplication operands do not line up.
    #[error("cannot matmul {lhs} by {rhs}: {fault}")]
    DimensionMismatch {
        lhs: Shape,
        rhs: Shape,
        fault: MatmulFault,
    },

    /// The axis order passed to a transpose is not a bijection.
    #[error("{perm:?} is not a permutation of {rank} axes")]
    InvalidPermutation { rank: usize, perm: Vec<usize> },

    #[error("index {index} out of range for axis {axis} of extent {extent}")]
    IndexOutOfRange {
        axis: usize,
        index: usize,
        extent: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn bt(self) -> Self {
        let backtrace = std::backtrace::Backtrace::capture();
        match backtrace.status() {
            std::backtrace::BacktraceStatus::Disabled
            | std::backtrace::BacktraceStatus::Unsupported => self,
            _ => Self::WithBacktrace {
                inner: Box::new(self),
                backtrace: Box::new(backtrace),
            },
        }
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Msg(format!($msg).into()).bt())
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Msg(format!($err).into()).bt())
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Msg(format!($fmt, $($arg)*).into()).bt())
    };
}
