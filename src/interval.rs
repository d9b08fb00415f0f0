//! A closed range of Morton codes, optionally tagged with user data.

use crate::bits;
use crate::morton::MortonDim;
use std::marker::PhantomData;

/// An inclusive Morton-code range `[start, end]`, with `start <= end`.
///
/// `T` defaults to `()`. Ordering and equality are entrywise on
/// `(start, end, data)` — for `T = ()` this automatically reduces to
/// comparing only `(start, end)`, since `()` compares equal to itself
/// unconditionally; no separate "is the payload present" branch is needed
/// the way the C++ `std::monostate` special case required.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: serde::Serialize",
        deserialize = "T: serde::Deserialize<'de>"
    ))
)]
pub struct Interval<Dim: MortonDim, T = ()> {
    pub start: u64,
    pub end: u64,
    pub data: T,
    #[cfg_attr(feature = "serde", serde(skip))]
    _dim: PhantomData<Dim>,
}

impl<Dim: MortonDim, T: std::fmt::Debug> std::fmt::Debug for Interval<Dim, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interval")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("data", &self.data)
            .finish()
    }
}

impl<Dim: MortonDim> Interval<Dim, ()> {
    /// Construct an untagged interval.
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            end,
            data: (),
            _dim: PhantomData,
        }
    }
}

impl<Dim: MortonDim, T> Interval<Dim, T> {
    /// Construct a tagged interval.
    pub fn with_data(start: u64, end: u64, data: T) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            end,
            data,
            _dim: PhantomData,
        }
    }

    /// `start <= c <= end`.
    #[inline]
    pub fn contains(&self, c: u64) -> bool {
        self.start <= c && c <= self.end
    }

    /// `end - start + 1`.
    #[inline]
    pub fn area(&self) -> u64 {
        debug_assert!(self.start <= self.end);
        self.end - self.start + 1
    }

    /// `ctz64(start) / D`, or `u64::MAX` ("infinity") when `start == 0`.
    #[inline]
    pub fn start_alignment(&self) -> u64 {
        if self.start != 0 {
            self.start.trailing_zeros() as u64 / Dim::DIMENSION as u64
        } else {
            u64::MAX
        }
    }

    /// `ctz64(end) / D`, or `u64::MAX` ("infinity") when `end == 0`.
    #[inline]
    pub fn end_alignment(&self) -> u64 {
        if self.end != 0 {
            self.end.trailing_zeros() as u64 / Dim::DIMENSION as u64
        } else {
            u64::MAX
        }
    }

    /// Intersection with `other`. The returned interval carries `self`'s
    /// payload. Undefined (per the caller's own judgement) if `self.data`
    /// and `other.data` would need to compare equal and do not — the
    /// precondition is on the caller, not enforced here, matching the
    /// behaviour of the routine this is grounded on.
    pub fn intersect<M>(&self, other: &Interval<Dim, M>) -> Option<Self>
    where
        T: Clone,
    {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start > end {
            None
        } else {
            Some(Self::with_data(start, end, self.data.clone()))
        }
    }

    /// Greedy maximal-aligned decomposition of this interval into Morton
    /// cells, sorted and disjoint.
    pub fn to_cells(&self) -> Vec<Self>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        let mut s = self.start;
        while s <= self.end {
            let amax = bits::align_max(s, self.end, Dim::DIMENSION, Dim::BITS_PER_DIM);
            out.push(Self::with_data(s, amax, self.data.clone()));
            if amax == u64::MAX {
                break;
            }
            s = amax + 1;
        }
        out
    }

    /// As [`Interval::to_cells`], but each emitted cell's end is additionally
    /// capped at `s + (1 << max_level)`. The source formula omits the `D`
    /// factor one might expect; that is preserved here as the contract (see
    /// the design notes on `to_cells(max_level)`).
    pub fn to_cells_capped(&self, max_level: u32) -> Vec<Self>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        let mut s = self.start;
        let cap = 1u64 << max_level;
        while s <= self.end {
            let amax = bits::align_max(s, self.end, Dim::DIMENSION, Dim::BITS_PER_DIM)
                .min(s.saturating_add(cap));
            out.push(Self::with_data(s, amax, self.data.clone()));
            if amax == u64::MAX {
                break;
            }
            s = amax + 1;
        }
        out
    }

    /// Histogram of `to_cells()` levels: `(level, count)` pairs, sorted
    /// ascending by level.
    pub fn count_cells(&self) -> Vec<(u64, u64)> {
        let mut out: Vec<(u64, u64)> = Vec::new();
        let mut s = self.start;
        while s <= self.end {
            let amax = bits::align_max(s, self.end, Dim::DIMENSION, Dim::BITS_PER_DIM);
            let level = bits::fast_log2(amax.wrapping_sub(s).wrapping_add(1)) / Dim::DIMENSION as u64;
            match out.iter_mut().find(|(l, _)| *l == level) {
                Some((_, count)) => *count += 1,
                None => out.push((level, 1)),
            }
            if amax == u64::MAX {
                break;
            }
            s = amax + 1;
        }
        out.sort_unstable();
        out
    }

    /// The smallest Morton-aligned cell that encloses this interval,
    /// carrying this interval's payload.
    pub fn parent(&self) -> Self
    where
        T: Clone,
    {
        let level = bits::unifying_level(self.start, self.end, Dim::DIMENSION);
        let p = bits::parent_aligned(self.start, level, Dim::DIMENSION);
        Self::with_data(p, p + bits::level_mask(level, Dim::DIMENSION), self.data.clone())
    }
}
