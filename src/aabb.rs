//! Axis-aligned bounding boxes in Morton space and their decomposition into
//! sorted Morton-aligned cells or coalesced contiguous runs.

use crate::bits;
use crate::interval::Interval;
use crate::morton::{Dim2, MortonDim};
use crate::region::Region;
use std::marker::PhantomData;

/// An axis-aligned box represented as a single `[min, max]` Morton pair.
/// `min == max` represents a single-cell box.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AABB<Dim: MortonDim> {
    pub min: u64,
    pub max: u64,
    _dim: PhantomData<Dim>,
}

impl<Dim: MortonDim> AABB<Dim> {
    pub fn new(min: u64, max: u64) -> Self {
        debug_assert!(max >= min);
        Self {
            min,
            max,
            _dim: PhantomData,
        }
    }

    /// Whether `[min, max]` is exactly one cell at some Z-curve level: `min`
    /// is aligned to at least the cell's size, the span is a power of two,
    /// and that power's exponent is a multiple of `D`.
    pub fn is_morton_aligned(&self) -> bool {
        debug_assert!(self.max >= self.min);
        let align_max = if self.min != 0 {
            self.min.trailing_zeros() as u64
        } else {
            u64::MAX
        };
        let diff = self.max.wrapping_sub(self.min).wrapping_add(1);
        let align = diff.trailing_zeros() as u64;
        let d = Dim::DIMENSION as u64;
        align / d <= align_max / d && diff.count_ones() == 1 && align % d == 0
    }

    /// View this (already aligned) box as its covering interval.
    pub fn to_cell(&self) -> Interval<Dim, ()> {
        debug_assert!(self.is_morton_aligned());
        Interval::new(self.min, self.max)
    }
}

impl AABB<Dim2> {
    /// Split `[min, max]` at the point where the Z-curve leaves the box:
    /// returns `(LITMAX, BIGMIN)` with `min <= LITMAX < BIGMIN <= max`, such
    /// that every code in `(LITMAX, BIGMIN)` decodes outside the box.
    ///
    /// Precondition: the box is not already Morton-aligned (equivalently,
    /// `min != max`); callers must check alignment first.
    ///
    /// See https://en.wikipedia.org/wiki/Z-order_curve#Use_with_one-dimensional_data_structures_for_range_searching
    pub fn next_address(&self) -> (u64, u64) {
        debug_assert!(self.max != self.min, "next_address requires an unaligned box");
        let mut litmax = self.max;
        let mut bigmin = self.min;

        // One more than the 1-based bit position of the highest differing
        // bit; matches the proven arithmetic below exactly (see DESIGN.md).
        let index = 65 - (self.min ^ self.max).leading_zeros() as u64;
        let half = index / 2;
        let mask: u64 = !((1u64 << half) - 1);
        let inc: u64 = 1u64 << (half - 1);
        let axis = (index % 2) as u32;

        let mut part = (bits::compact_bits_2(self.min >> axis) & mask) + inc;
        let axis_mask = bits::MORTON_2_X_MASK << axis;

        bigmin &= !axis_mask;
        bigmin |= bits::expand_bits_2(part) << axis;

        part -= 1;
        litmax &= !axis_mask;
        litmax |= bits::expand_bits_2(part) << axis;

        (litmax, bigmin)
    }

    /// All Morton-aligned cells within this box, sorted ascending by start.
    pub fn to_cells(&self) -> Region<Dim2, ()> {
        let span = tracing::trace_span!("aabb_to_cells", min = self.min, max = self.max);
        let _enter = span.enter();

        let mut inputs = vec![*self];
        let mut outputs = Vec::new();
        while let Some(aabb) = inputs.pop() {
            if aabb.is_morton_aligned() {
                outputs.push(aabb.to_cell());
                continue;
            }
            let (litmax, bigmin) = aabb.next_address();
            let first = AABB::new(aabb.min, litmax);
            let second = AABB::new(bigmin, aabb.max);
            debug_assert!(first.max >= first.min);
            debug_assert!(second.max >= second.min);
            inputs.push(second);
            inputs.push(first);
        }
        Region::from_sorted_unchecked(outputs)
    }

    /// The coarsest sorted, disjoint run decomposition: as [`AABB::to_cells`]
    /// but adjacent aligned cells are coalesced when contiguous.
    pub fn to_intervals(&self) -> Region<Dim2, ()> {
        let span = tracing::trace_span!("aabb_to_intervals", min = self.min, max = self.max);
        let _enter = span.enter();

        let mut inputs = vec![*self];
        let mut outputs: Vec<Interval<Dim2, ()>> = Vec::new();
        while let Some(aabb) = inputs.pop() {
            if aabb.is_morton_aligned() {
                match outputs.last_mut() {
                    Some(last) if last.end + 1 == aabb.min => {
                        last.end = aabb.max;
                    }
                    _ => outputs.push(aabb.to_cell()),
                }
                continue;
            }
            let (litmax, bigmin) = aabb.next_address();
            let first = AABB::new(aabb.min, litmax);
            let second = AABB::new(bigmin, aabb.max);
            debug_assert!(first.max >= first.min);
            debug_assert!(second.max >= second.min);
            inputs.push(second);
            inputs.push(first);
        }
        Region::from_sorted_unchecked(outputs)
    }

    /// A Morton code strictly greater than `m`, lying just outside this box
    /// along whichever wall `m` sits against.
    ///
    /// The source this is grounded on duplicates `ctz(max_x)` where it
    /// should read `ctz(max_y)`, and the routine is unexercised by its own
    /// test suite; this is the corrected formula (see DESIGN.md).
    pub fn get_next_morton_outside(&self, m: u64) -> u64 {
        use crate::morton::Morton2D;
        let [min_x, min_y] = Morton2D::from_raw(self.min).decode();
        let [max_x, max_y] = Morton2D::from_raw(self.max).decode();
        let [x, y] = Morton2D::from_raw(m).decode();
        debug_assert!(x == min_x || y == min_y);

        let max_x1 = max_x as u64 + 1;
        let max_y1 = max_y as u64 + 1;
        let min_x = (min_x as u64).min(1u64 << 63);
        let min_y = (min_y as u64).min(1u64 << 63);

        let ctz = |v: u64| if v == 0 { 64 } else { v.trailing_zeros() as u64 };
        let l = ctz(min_x).min(ctz(min_y)).min(ctz(max_x1)).min(ctz(max_y1))
            * Dim2::DIMENSION as u64;

        let shift = u32::try_from(l).unwrap_or(64);
        let base = if shift >= 64 { 0 } else { (m >> shift) << shift };
        let step = if shift >= 64 { 0 } else { 1u64 << shift };
        base + step
    }

    /// A lazy, forward-only iterator over the same decomposition as
    /// [`AABB::to_intervals`].
    pub fn iter(&self) -> IntoIntervals {
        IntoIntervals::new(*self)
    }

    /// An iterator already in the finished state, for equality comparisons.
    pub fn iter_end(&self) -> IntoIntervals {
        let mut it = IntoIntervals::new(*self);
        it.finished = true;
        it
    }
}

/// The streaming form of [`AABB::to_intervals`].
///
/// Internally a small state machine: work-stack pops either extend the
/// pending interval (`Accumulating`), or flush it as the next yielded value
/// and restart accumulation, until the stack is exhausted (`Done`).
pub struct IntoIntervals {
    parent: AABB<Dim2>,
    inputs: Vec<AABB<Dim2>>,
    curr: Option<Interval<Dim2, ()>>,
    index: usize,
    finished: bool,
}

impl IntoIntervals {
    fn new(parent: AABB<Dim2>) -> Self {
        Self {
            parent,
            inputs: vec![parent],
            curr: None,
            index: 0,
            finished: false,
        }
    }

    fn advance(&mut self) -> Option<Interval<Dim2, ()>> {
        while let Some(aabb) = self.inputs.pop() {
            if aabb.is_morton_aligned() {
                match &mut self.curr {
                    None => {
                        self.curr = Some(aabb.to_cell());
                        continue;
                    }
                    Some(c) if c.end + 1 == aabb.min => {
                        c.end = aabb.max;
                        continue;
                    }
                    Some(_) => {
                        let flushed = self.curr.replace(aabb.to_cell());
                        self.index += 1;
                        return flushed;
                    }
                }
            }
            let (litmax, bigmin) = aabb.next_address();
            let first = AABB::new(aabb.min, litmax);
            let second = AABB::new(bigmin, aabb.max);
            self.inputs.push(second);
            self.inputs.push(first);
        }
        self.finished = true;
        self.curr.take()
    }
}

impl Iterator for IntoIntervals {
    type Item = Interval<Dim2, ()>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.advance()
    }
}

impl PartialEq for IntoIntervals {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent
            && self.finished == other.finished
            && (self.finished || self.index == other.index)
    }
}
