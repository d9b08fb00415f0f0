//! A sorted, disjoint set of [`Interval`]s and the set algebra over it:
//! union, intersection, and difference, plus the containment and coverage
//! queries built on top.

use crate::interval::Interval;
use crate::morton::MortonDim;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

/// A region of Morton space: zero or more non-overlapping, non-adjacent
/// (after coalescing) intervals, kept sorted ascending by `start`.
///
/// `T` defaults to `()`; the set operators below are scoped to matching
/// payload types only (Rust's coherence rules make the source's
/// `std::monostate`-wildcard overloads across mismatched `T` impractical to
/// port without specialization — see DESIGN.md). With `T = ()` every
/// payload trivially compares equal, which reproduces the wildcard
/// behaviour for the common untagged case.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: serde::Serialize",
        deserialize = "T: serde::Deserialize<'de>"
    ))
)]
pub struct Region<Dim: MortonDim, T = ()> {
    pub intervals: Vec<Interval<Dim, T>>,
}

impl<Dim: MortonDim, T> Region<Dim, T> {
    /// The region containing nothing.
    pub fn empty() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// A region made of a single interval.
    pub fn from_interval(interval: Interval<Dim, T>) -> Self {
        Self {
            intervals: vec![interval],
        }
    }

    /// Build a region directly from intervals already known to be sorted
    /// and disjoint (e.g. the output of `AABB::to_cells`/`to_intervals`).
    pub(crate) fn from_sorted_unchecked(intervals: Vec<Interval<Dim, T>>) -> Self {
        debug_assert!(
            intervals.windows(2).all(|w| w[0].end < w[1].start),
            "intervals passed to from_sorted_unchecked must be sorted and disjoint"
        );
        Self { intervals }
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total count of Morton codes covered by this region.
    pub fn area(&self) -> u64 {
        self.intervals.iter().map(Interval::area).sum()
    }

    /// Whether `c` falls inside any interval of this region.
    pub fn contains(&self, c: u64) -> bool {
        // Intervals are sorted by start; binary search on start is valid
        // since they are also disjoint.
        match self.intervals.binary_search_by(|iv| iv.start.cmp(&c)) {
            Ok(_) => true,
            Err(idx) => idx > 0 && self.intervals[idx - 1].contains(c),
        }
    }

    /// Whether this region shares any Morton code with `other`.
    pub fn intersects(&self, other: &Self) -> bool {
        let (a, b) = (&self.intervals, &other.intervals);
        let (mut i, mut j) = (0usize, 0usize);
        while i < a.len() && j < b.len() {
            if a[i].end < b[j].start {
                i += 1;
            } else if b[j].end < a[i].start {
                j += 1;
            } else {
                return true;
            }
        }
        false
    }
}

impl<Dim: MortonDim, T: Clone> Region<Dim, T> {
    /// Greedy maximal-aligned decomposition of every interval into cells.
    pub fn to_cells(&self) -> Self {
        let mut out = Vec::new();
        for iv in &self.intervals {
            out.extend(iv.to_cells());
        }
        Self { intervals: out }
    }

    /// As [`Region::to_cells`], capped per-interval at `max_level`.
    pub fn to_cells_capped(&self, max_level: u32) -> Self {
        let mut out = Vec::new();
        for iv in &self.intervals {
            out.extend(iv.to_cells_capped(max_level));
        }
        Self { intervals: out }
    }

    /// Histogram of cell levels across the whole region: `(level, count)`
    /// pairs, sorted ascending by level.
    ///
    /// Aggregated by sorting once at the end rather than maintaining sorted
    /// insertion order incrementally, which is where the source this is
    /// grounded on loses entries when a new level is smaller than every key
    /// already inserted.
    pub fn count_cells(&self) -> Vec<(u64, u64)> {
        let mut out: Vec<(u64, u64)> = Vec::new();
        for iv in &self.intervals {
            for (level, count) in iv.count_cells() {
                match out.iter_mut().find(|(l, _)| *l == level) {
                    Some((_, c)) => *c += count,
                    None => out.push((level, count)),
                }
            }
        }
        out.sort_unstable();
        out
    }
}

impl<Dim: MortonDim, T: Clone + PartialEq> Region<Dim, T> {
    /// The sorted merge of `self` and `other`, coalescing overlapping or
    /// adjacent intervals whose payloads agree.
    pub fn union(&self, other: &Self) -> Self {
        let (a, b) = (&self.intervals, &other.intervals);
        let mut out: Vec<Interval<Dim, T>> = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0usize, 0usize);
        while i < a.len() || j < b.len() {
            let take_a = j >= b.len() || (i < a.len() && a[i].start <= b[j].start);
            let next = if take_a {
                let v = a[i].clone();
                i += 1;
                v
            } else {
                let v = b[j].clone();
                j += 1;
                v
            };
            match out.last_mut() {
                Some(last)
                    if last.data == next.data
                        && next.start <= last.end.saturating_add(1) =>
                {
                    if next.end > last.end {
                        last.end = next.end;
                    }
                }
                _ => out.push(next),
            }
        }
        Self { intervals: out }
    }

    /// The intervals shared by `self` and `other`. Each resulting interval
    /// carries `self`'s payload.
    pub fn intersection(&self, other: &Self) -> Self {
        let (a, b) = (&self.intervals, &other.intervals);
        let mut out = Vec::new();
        let (mut i, mut j) = (0usize, 0usize);
        while i < a.len() && j < b.len() {
            let start = a[i].start.max(b[j].start);
            let end = a[i].end.min(b[j].end);
            if start <= end {
                out.push(Interval::with_data(start, end, a[i].data.clone()));
            }
            if a[i].end < b[j].end {
                i += 1;
            } else {
                j += 1;
            }
        }
        Self { intervals: out }
    }

    /// `self` with every Morton code in `other` removed.
    pub fn difference(&self, other: &Self) -> Self {
        let b = &other.intervals;
        let mut out = Vec::new();
        let mut j0 = 0usize;
        for iv in &self.intervals {
            let mut s = iv.start;
            while j0 < b.len() && b[j0].end < s {
                j0 += 1;
            }
            let mut k = j0;
            while s <= iv.end {
                if k >= b.len() || b[k].start > iv.end {
                    out.push(Interval::with_data(s, iv.end, iv.data.clone()));
                    break;
                }
                if b[k].start > s {
                    out.push(Interval::with_data(s, b[k].start - 1, iv.data.clone()));
                }
                if b[k].end >= iv.end {
                    break;
                }
                s = b[k].end + 1;
                k += 1;
            }
        }
        Self { intervals: out }
    }
}

impl<Dim: MortonDim, T: Clone + PartialEq> BitOr for &Region<Dim, T> {
    type Output = Region<Dim, T>;
    fn bitor(self, rhs: Self) -> Region<Dim, T> {
        self.union(rhs)
    }
}

impl<Dim: MortonDim, T: Clone + PartialEq> BitOrAssign<&Region<Dim, T>> for Region<Dim, T> {
    fn bitor_assign(&mut self, rhs: &Region<Dim, T>) {
        *self = (&*self).union(rhs);
    }
}

impl<Dim: MortonDim, T: Clone + PartialEq> BitAnd for &Region<Dim, T> {
    type Output = Region<Dim, T>;
    fn bitand(self, rhs: Self) -> Region<Dim, T> {
        self.intersection(rhs)
    }
}

impl<Dim: MortonDim, T: Clone + PartialEq> BitAndAssign<&Region<Dim, T>> for Region<Dim, T> {
    fn bitand_assign(&mut self, rhs: &Region<Dim, T>) {
        *self = (&*self).intersection(rhs);
    }
}

impl<Dim: MortonDim, T: Clone + PartialEq> Sub for &Region<Dim, T> {
    type Output = Region<Dim, T>;
    fn sub(self, rhs: Self) -> Region<Dim, T> {
        self.difference(rhs)
    }
}

impl<Dim: MortonDim, T: Clone + PartialEq> SubAssign<&Region<Dim, T>> for Region<Dim, T> {
    fn sub_assign(&mut self, rhs: &Region<Dim, T>) {
        *self = (&*self).difference(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morton::Dim2;

    type R = Region<Dim2>;
    type I = Interval<Dim2>;

    fn r(pairs: &[(u64, u64)]) -> R {
        R {
            intervals: pairs.iter().map(|&(s, e)| I::new(s, e)).collect(),
        }
    }

    #[test]
    fn union_coalesces_overlap() {
        let a = r(&[(0, 3), (8, 11)]);
        let b = r(&[(2, 9)]);
        let got = a.union(&b);
        assert_eq!(
            got.intervals.iter().map(|i| (i.start, i.end)).collect::<Vec<_>>(),
            vec![(0, 11)]
        );
    }

    #[test]
    fn union_coalesces_adjacent() {
        let a = r(&[(0, 3)]);
        let b = r(&[(4, 7)]);
        let got = a.union(&b);
        assert_eq!(
            got.intervals.iter().map(|i| (i.start, i.end)).collect::<Vec<_>>(),
            vec![(0, 7)]
        );
    }

    #[test]
    fn intersection_splits_on_gaps() {
        let a = r(&[(0, 3), (8, 11)]);
        let b = r(&[(2, 9)]);
        let got = a.intersection(&b);
        assert_eq!(
            got.intervals.iter().map(|i| (i.start, i.end)).collect::<Vec<_>>(),
            vec![(2, 3), (8, 9)]
        );
    }

    #[test]
    fn difference_leaves_remainder() {
        let a = r(&[(0, 3), (8, 11)]);
        let b = r(&[(2, 9)]);
        let got = a.difference(&b);
        assert_eq!(
            got.intervals.iter().map(|i| (i.start, i.end)).collect::<Vec<_>>(),
            vec![(0, 1), (10, 11)]
        );
    }

    #[test]
    fn difference_with_empty_other_is_identity() {
        let a = r(&[(0, 3), (8, 11)]);
        let empty = R::empty();
        assert_eq!(a.difference(&empty), a);
    }

    #[test]
    fn intersects_true_and_false() {
        let a = r(&[(0, 3), (8, 11)]);
        assert!(a.intersects(&r(&[(2, 9)])));
        assert!(!a.intersects(&r(&[(4, 7)])));
    }

    #[test]
    fn contains_point() {
        let a = r(&[(0, 3), (8, 11)]);
        assert!(a.contains(0));
        assert!(a.contains(11));
        assert!(!a.contains(5));
        assert!(!a.contains(12));
    }

    #[test]
    fn area_sums_intervals() {
        let a = r(&[(0, 3), (8, 11)]);
        assert_eq!(a.area(), 8);
    }

    #[test]
    fn to_cells_multi_interval() {
        let region = r(&[(1, 15), (57, 57), (59, 63)]);
        let got: Vec<(u64, u64)> = region
            .to_cells()
            .intervals
            .iter()
            .map(|i| (i.start, i.end))
            .collect();
        assert_eq!(
            got,
            vec![
                (1, 1),
                (2, 2),
                (3, 3),
                (4, 7),
                (8, 11),
                (12, 15),
                (57, 57),
                (59, 59),
                (60, 63),
            ]
        );
    }

    #[test]
    fn count_cells_multi_interval() {
        let region = r(&[(0, 21), (23, 31)]);
        assert_eq!(region.count_cells(), vec![(0, 3), (1, 3), (2, 1)]);
    }

    #[test]
    fn operators_match_methods() {
        let a = r(&[(0, 3), (8, 11)]);
        let b = r(&[(2, 9)]);
        assert_eq!(&a | &b, a.union(&b));
        assert_eq!(&a & &b, a.intersection(&b));
        assert_eq!(&a - &b, a.difference(&b));
    }

    proptest::proptest! {
        #[test]
        fn union_commutative(lo1 in 0u64..4096, span1 in 0u64..256, lo2 in 0u64..4096, span2 in 0u64..256) {
            let a = crate::aabb::AABB::<Dim2>::new(lo1, lo1 + span1).to_intervals();
            let b = crate::aabb::AABB::<Dim2>::new(lo2, lo2 + span2).to_intervals();
            proptest::prop_assert_eq!(a.union(&b), b.union(&a));
        }

        #[test]
        fn intersection_commutative(lo1 in 0u64..4096, span1 in 0u64..256, lo2 in 0u64..4096, span2 in 0u64..256) {
            let a = crate::aabb::AABB::<Dim2>::new(lo1, lo1 + span1).to_intervals();
            let b = crate::aabb::AABB::<Dim2>::new(lo2, lo2 + span2).to_intervals();
            proptest::prop_assert_eq!(a.intersection(&b), b.intersection(&a));
        }

        #[test]
        fn inclusion_exclusion(lo1 in 0u64..4096, span1 in 0u64..256, lo2 in 0u64..4096, span2 in 0u64..256) {
            let a = crate::aabb::AABB::<Dim2>::new(lo1, lo1 + span1).to_intervals();
            let b = crate::aabb::AABB::<Dim2>::new(lo2, lo2 + span2).to_intervals();
            let union_area = a.union(&b).area();
            let intersection_area = a.intersection(&b).area();
            proptest::prop_assert_eq!(union_area + intersection_area, a.area() + b.area());
        }

        #[test]
        fn difference_and_intersection_partition(lo1 in 0u64..4096, span1 in 0u64..256, lo2 in 0u64..4096, span2 in 0u64..256) {
            let a = crate::aabb::AABB::<Dim2>::new(lo1, lo1 + span1).to_intervals();
            let b = crate::aabb::AABB::<Dim2>::new(lo2, lo2 + span2).to_intervals();
            let diff_area = a.difference(&b).area();
            let intersection_area = a.intersection(&b).area();
            proptest::prop_assert_eq!(diff_area + intersection_area, a.area());
        }
    }
}
