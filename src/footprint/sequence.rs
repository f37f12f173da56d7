//! Fixed-capacity sequence of swept-footprint boxes.
//!
//! The sequence is an arena ring: a preallocated slot array addressed by
//! three monotonically increasing cursors (`anchor`, `claimed`, `frontier`)
//! reduced modulo capacity. It never reallocates; filling every slot is a
//! `CapacityExceeded` error rather than a silent overwrite.

use std::ops::Range;

use crate::core::{Bearing, Point2D};
use crate::error::{Result, SweepError};
use crate::geometry::Obb;

/// One element of a footprint sequence: an oriented box the vehicle occupies
/// at some step of the walk, plus its sequence index and an at-rest flag the
/// claim layer may set for a parked vehicle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FootprintSegment {
    pub index: u32,
    pub obb: Obb,
    pub at_rest: bool,
}

/// Deduplicated sequence of oriented boxes describing the space a vehicle
/// sweeps along a path. Built once by the shape cache, read-only afterwards.
#[derive(Clone, Debug)]
pub struct FootprintSequence {
    slots: Vec<FootprintSegment>,
    anchor: u64,
    claimed: u64,
    frontier: u64,
}

impl FootprintSequence {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![FootprintSegment::default(); capacity],
            anchor: 0,
            claimed: 0,
            frontier: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live segments, `anchor` through `frontier`.
    #[inline]
    pub fn len(&self) -> usize {
        (self.frontier - self.anchor) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frontier == self.anchor
    }

    #[inline]
    pub fn anchor(&self) -> u64 {
        self.anchor
    }

    #[inline]
    pub fn claimed(&self) -> u64 {
        self.claimed
    }

    #[inline]
    pub fn frontier(&self) -> u64 {
        self.frontier
    }

    /// Segment at the given index, if it lies in the live window.
    pub fn get(&self, index: u32) -> Option<&FootprintSegment> {
        let position = u64::from(index);
        if position < self.anchor || position >= self.frontier {
            return None;
        }
        Some(&self.slots[(position % self.capacity() as u64) as usize])
    }

    /// Live segments in walk order.
    pub fn iter(&self) -> impl Iterator<Item = &FootprintSegment> {
        (self.anchor..self.frontier).map(move |position| {
            &self.slots[(position % self.capacity() as u64) as usize]
        })
    }

    /// Most recently appended segment.
    pub fn tail(&self) -> Option<&FootprintSegment> {
        if self.is_empty() {
            return None;
        }
        Some(&self.slots[((self.frontier - 1) % self.capacity() as u64) as usize])
    }

    /// Appends a box built from a center, half-lengths and bearing. Returns
    /// `Ok(false)` when the box duplicates the current tail.
    pub fn grow_center(
        &mut self,
        center: Point2D,
        half_x: f64,
        half_y: f64,
        bearing: Bearing,
    ) -> Result<bool> {
        self.append(Obb::new(center, half_x, half_y, bearing))
    }

    /// Appends a box spanning two reference points: centered at their
    /// midpoint, oriented along the rear-to-front bearing.
    pub fn grow_front_rear(
        &mut self,
        front: Point2D,
        rear: Point2D,
        half_x: f64,
        half_y: f64,
    ) -> Result<bool> {
        let bearing = Bearing::new(rear.bearing_to(&front));
        self.append(Obb::new(rear.midpoint(&front), half_x, half_y, bearing))
    }

    fn append(&mut self, obb: Obb) -> Result<bool> {
        let index = match self.tail() {
            Some(tail) if tail.obb.approx_eq(&obb) => return Ok(false),
            Some(tail) => tail.index + 1,
            None => 0,
        };
        if self.len() == self.capacity() {
            return Err(SweepError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        let slot = (self.frontier % self.capacity() as u64) as usize;
        self.slots[slot] = FootprintSegment {
            index,
            obb,
            at_rest: false,
        };
        self.frontier += 1;
        Ok(true)
    }

    /// Flags a live segment as occupied by a vehicle at rest. Returns whether
    /// the segment exists.
    pub fn mark_rest(&mut self, index: u32) -> bool {
        let position = u64::from(index);
        if position < self.anchor || position >= self.frontier {
            return false;
        }
        let slot = (position % self.capacity() as u64) as usize;
        self.slots[slot].at_rest = true;
        true
    }

    /// Moves the claimed cursor forward to `to`, never backwards and never
    /// past the frontier. Returns the cursor after the move.
    pub fn advance_claimed(&mut self, to: u64) -> u64 {
        self.claimed = to.clamp(self.claimed, self.frontier);
        self.claimed
    }

    /// Rewinds the claimed and frontier cursors to just past the anchor,
    /// keeping only the starting segment live.
    pub fn reset_cursors(&mut self) {
        let rewound = (self.anchor + 1).min(self.frontier);
        self.claimed = rewound;
        self.frontier = rewound;
    }

    /// First pair of overlapping segments between an index range of this
    /// sequence and one of `other`, scanning this sequence ascending in the
    /// outer loop. Indices outside either live window are skipped.
    pub fn overlaps_range(
        &self,
        self_range: Range<u32>,
        other: &FootprintSequence,
        other_range: Range<u32>,
    ) -> Option<(u32, u32)> {
        for mine in self.range_segments(self_range) {
            for theirs in other.range_segments(other_range.clone()) {
                if mine.obb.overlaps(&theirs.obb) {
                    return Some((mine.index, theirs.index));
                }
            }
        }
        None
    }

    /// First segment in the index range whose box overlaps `obb`.
    pub fn overlaps_obb(&self, range: Range<u32>, obb: &Obb) -> Option<u32> {
        self.range_segments(range)
            .find(|segment| segment.obb.overlaps(obb))
            .map(|segment| segment.index)
    }

    fn range_segments(&self, range: Range<u32>) -> impl Iterator<Item = &FootprintSegment> {
        range.filter_map(move |index| self.get(index))
    }
}
