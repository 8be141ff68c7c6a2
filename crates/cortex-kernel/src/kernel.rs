//! The [`Kernel`] trait and the built-in [`KernelKind`] neighbourhoods.
//!
//! Kernels are stateless neighbourhood readers selected once per run. The
//! tick engine holds them as [`KernelSpec`] values: built-in kinds dispatch
//! through a `match`, plugin kernels through a trait object.

use std::fmt;
use std::sync::Arc;

use cortex_core::{ComputationError, Energy};
use cortex_grid::SharedGrid;
use smallvec::SmallVec;

use crate::neighbourhood::{gather_offsets, DIAGONAL_OFFSETS, DIRECT_OFFSETS};

/// Neighbour energies gathered for one cell. Inline up to 8 values.
pub type Neighbours = SmallVec<[Energy; 8]>;

/// Reads the neighbourhood of one cell from the current grid.
///
/// # Contract
///
/// - `gather()` appends the neighbour values to `out`, which the caller
///   clears beforehand. The number of appended values is the neighbour
///   count the node update averages over.
/// - `gather()` MUST be deterministic and read only `grid`; it is called
///   concurrently for disjoint cells without synchronisation.
/// - Returning `Err` aborts the run at the next barrier.
///
/// # Examples
///
/// A kernel that only looks at the cell to the east:
///
/// ```
/// use cortex_core::ComputationError;
/// use cortex_grid::SharedGrid;
/// use cortex_kernel::{Kernel, Neighbours};
///
/// struct East;
///
/// impl Kernel for East {
///     fn name(&self) -> &str { "east" }
///
///     fn gather(
///         &self,
///         grid: &SharedGrid,
///         x: usize,
///         y: usize,
///         out: &mut Neighbours,
///     ) -> Result<(), ComputationError> {
///         out.push(grid.get(x + 1, y).unwrap_or(0.0));
///         Ok(())
///     }
/// }
///
/// assert_eq!(East.name(), "east");
/// ```
pub trait Kernel: Send + Sync {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Append the neighbour energies of `(x, y)` to `out`.
    fn gather(
        &self,
        grid: &SharedGrid,
        x: usize,
        y: usize,
        out: &mut Neighbours,
    ) -> Result<(), ComputationError>;
}

/// The built-in neighbourhoods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// The 4 orthogonally adjacent cells, zero-filled at the border.
    DirectFour,
    /// The 4 diagonally adjacent cells, zero-filled at the border.
    DiagonalFour,
}

impl KernelKind {
    /// Every built-in kind.
    pub const ALL: [KernelKind; 2] = [KernelKind::DirectFour, KernelKind::DiagonalFour];

    /// Resolve a configured kernel name (as returned by [`Kernel::name`]).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Stable configuration name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DirectFour => "direct4",
            Self::DiagonalFour => "diagonal4",
        }
    }

    /// Number of values this kind always produces.
    pub fn neighbour_count(self) -> usize {
        match self {
            Self::DirectFour | Self::DiagonalFour => 4,
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Kernel for KernelKind {
    fn name(&self) -> &str {
        self.as_str()
    }

    #[inline]
    fn gather(
        &self,
        grid: &SharedGrid,
        x: usize,
        y: usize,
        out: &mut Neighbours,
    ) -> Result<(), ComputationError> {
        match self {
            Self::DirectFour => gather_offsets(grid, x, y, &DIRECT_OFFSETS, out),
            Self::DiagonalFour => gather_offsets(grid, x, y, &DIAGONAL_OFFSETS, out),
        }
        Ok(())
    }
}

/// A kernel chosen by configuration: built-in or plugin.
#[derive(Clone)]
pub enum KernelSpec {
    /// One of the built-in neighbourhoods.
    Builtin(KernelKind),
    /// A user-supplied kernel.
    Custom(Arc<dyn Kernel>),
}

impl KernelSpec {
    /// Wrap a plugin kernel.
    pub fn custom(kernel: impl Kernel + 'static) -> Self {
        Self::Custom(Arc::new(kernel))
    }
}

impl From<KernelKind> for KernelSpec {
    fn from(kind: KernelKind) -> Self {
        Self::Builtin(kind)
    }
}

impl fmt::Debug for KernelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(kind) => f.debug_tuple("Builtin").field(kind).finish(),
            Self::Custom(kernel) => f.debug_tuple("Custom").field(&kernel.name()).finish(),
        }
    }
}

impl Kernel for KernelSpec {
    fn name(&self) -> &str {
        match self {
            Self::Builtin(kind) => kind.as_str(),
            Self::Custom(kernel) => kernel.name(),
        }
    }

    #[inline]
    fn gather(
        &self,
        grid: &SharedGrid,
        x: usize,
        y: usize,
        out: &mut Neighbours,
    ) -> Result<(), ComputationError> {
        match self {
            Self::Builtin(kind) => kind.gather(grid, x, y, out),
            Self::Custom(kernel) => kernel.gather(grid, x, y, out),
        }
    }
}
