//! # zorder-region
//!
//! Morton (Z-order) interval decomposition and set algebra for spatial
//! indexing: given an axis-aligned box over interleaved integer
//! coordinates, decompose it into a sorted, disjoint list of Morton-aligned
//! cells or contiguous runs, and combine such lists with union,
//! intersection, and difference.
//!
//! ## Key Features
//!
//! - **LITMAX/BIGMIN decomposition**: any 2D axis-aligned box becomes a
//!   sorted list of Morton intervals via the Tropf/Herzog Z-curve splitter.
//! - **Region set algebra**: union, intersection, and difference over
//!   sorted, disjoint interval lists, exposed as `|`, `&`, and `-`.
//! - **Two instantiations**: `(D=2, B=32)` and `(D=3, B=21)`, selected by
//!   the zero-sized [`morton::Dim2`]/[`morton::Dim3`] marker types.
//! - **Hardware bit-interleaving** via BMI2 `pdep`/`pext` when available,
//!   falling back to a portable log-step implementation otherwise.
//!
//! ## Example
//!
//! ```rust
//! use zorder_region::aabb::AABB;
//! use zorder_region::morton::Dim2;
//!
//! // Codes 0 and 3 decode to the opposite corners (0, 0) and (1, 1): a
//! // fully Morton-aligned 2x2 box, so it decomposes to a single interval.
//! let aabb: AABB<Dim2> = AABB::new(0, 3);
//! let region = aabb.to_intervals();
//! assert_eq!(region.area(), 4);
//! ```

pub mod aabb;
pub mod bits;
pub mod cell;
pub mod error;
pub mod interval;
pub mod morton;
pub mod region;

pub use crate::aabb::AABB;
pub use crate::cell::TreeCell;
pub use crate::error::{Error, Result};
pub use crate::interval::Interval;
pub use crate::morton::{Dim2, Dim3, Morton2D, Morton3D, MortonCode, MortonDim};
pub use crate::region::Region;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
