//! Build-once, reuse-many footprint sequences keyed by shape and direction.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use log::{debug, warn};

use crate::config::SweepConfig;
use crate::core::TravelDirection;
use crate::error::Result;
use crate::footprint::FootprintSequence;
use crate::source::{GuidePath, ShapeId, ShapeSource};

/// Cache key: one footprint sequence per shape and boundary direction pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub shape: ShapeId,
    pub entry: TravelDirection,
    pub exit: TravelDirection,
}

impl CacheKey {
    pub fn new(shape: ShapeId, entry: TravelDirection, exit: TravelDirection) -> Self {
        Self { shape, entry, exit }
    }

    /// The stem orientation all other direction pairs derive from.
    pub fn is_canonical(&self) -> bool {
        self.entry == TravelDirection::XInc && self.exit == TravelDirection::YInc
    }

    pub fn canonical(&self) -> CacheKey {
        CacheKey {
            shape: self.shape,
            entry: TravelDirection::XInc,
            exit: TravelDirection::YInc,
        }
    }
}

/// Lazily built store of footprint sequences.
///
/// The canonical direction pair of a shape is walked once ("stem"); every
/// other direction pair is derived from the stem by reflection across the
/// horizontal axis. Entries are immutable once inserted and shared via
/// `Arc`, so repeated lookups return the identical instance.
pub struct FootprintCache {
    source: Arc<dyn ShapeSource>,
    config: SweepConfig,
    entries: RwLock<HashMap<CacheKey, Arc<FootprintSequence>>>,
    builders: Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>,
}

impl FootprintCache {
    pub fn new(source: Arc<dyn ShapeSource>, config: SweepConfig) -> Self {
        Self {
            source,
            config,
            entries: RwLock::new(HashMap::new()),
            builders: Mutex::new(HashMap::new()),
        }
    }

    /// The footprint sequence for one shape traversal, building and caching
    /// it on first demand. Returns `None` when the shape data cannot produce
    /// a sequence; the failure is logged, never propagated as a panic.
    pub fn base_footprint(
        &self,
        shape: ShapeId,
        entry: TravelDirection,
        exit: TravelDirection,
    ) -> Option<Arc<FootprintSequence>> {
        let key = CacheKey::new(shape, entry, exit);
        match self.lookup_or_build(key) {
            Ok(sequence) => Some(sequence),
            Err(error) => {
                warn!("[FootprintCache] cannot build footprint for {key:?}: {error}");
                None
            }
        }
    }

    /// Cached sequence for a key, without building on miss.
    pub fn lookup(&self, key: &CacheKey) -> Option<Arc<FootprintSequence>> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// Drops every cached sequence. Test and tooling support.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
        if let Ok(mut builders) = self.builders.lock() {
            builders.clear();
        }
    }

    fn lookup_or_build(&self, key: CacheKey) -> Result<Arc<FootprintSequence>> {
        if let Some(sequence) = self.lookup(&key) {
            return Ok(sequence);
        }

        // One builder per key; losers of the race see the winner's entry in
        // the second lookup.
        let gate = self.builder_gate(&key);
        let _build = gate.as_ref().and_then(|gate| gate.lock().ok());
        if let Some(sequence) = self.lookup(&key) {
            return Ok(sequence);
        }

        let sequence = if key.is_canonical() {
            self.build_stem(key.shape)?
        } else {
            let stem = self.lookup_or_build(key.canonical())?;
            self.mirror_stem(&stem)?
        };
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, Arc::clone(&sequence));
        }
        debug!(
            "[FootprintCache] built footprint for {key:?}, {} segments",
            sequence.len()
        );
        Ok(sequence)
    }

    fn builder_gate(&self, key: &CacheKey) -> Option<Arc<Mutex<()>>> {
        let mut builders = self.builders.lock().ok()?;
        Some(Arc::clone(builders.entry(*key).or_default()))
    }

    /// Walks the canonical traversal of a shape and converts the walked
    /// wheel-frame boxes into physical footprint boxes.
    fn build_stem(&self, shape: ShapeId) -> Result<Arc<FootprintSequence>> {
        let curves = self.source.curves(shape)?;
        let clearances = self.source.clearances(shape)?;
        let path = GuidePath::from_curves(&curves.front, &curves.rear)?;

        let mut walked = FootprintSequence::with_capacity(self.config.capacity);
        walked.grow_along_path(&path, 0.0, 0.0, &self.config)?;

        let half_x = 0.5 * (clearances.front + clearances.rear);
        let half_y = 0.5 * (clearances.inner + clearances.outer);

        let mut sequence = FootprintSequence::with_capacity(self.config.capacity);
        let (entry_front, entry_rear) = path.entry_points();
        sequence.grow_front_rear(
            entry_front,
            entry_rear,
            self.config.straight_half_length,
            self.config.straight_half_width,
        )?;
        for segment in walked.iter() {
            let center = segment.obb.centroid_offset(
                clearances.front,
                clearances.rear,
                clearances.inner,
                clearances.outer,
            );
            sequence.grow_center(center, half_x, half_y, segment.obb.bearing())?;
        }
        let (exit_front, exit_rear) = path.exit_points();
        sequence.grow_front_rear(
            exit_front,
            exit_rear,
            self.config.straight_half_length,
            self.config.straight_half_width,
        )?;
        Ok(Arc::new(sequence))
    }

    /// Derives a non-canonical sequence by reflecting every stem box.
    fn mirror_stem(&self, stem: &FootprintSequence) -> Result<Arc<FootprintSequence>> {
        let mut sequence = FootprintSequence::with_capacity(self.config.capacity);
        for segment in stem.iter() {
            let mirrored = segment.obb.mirror_x();
            sequence.grow_center(
                mirrored.center(),
                mirrored.half_x(),
                mirrored.half_y(),
                mirrored.bearing(),
            )?;
        }
        Ok(Arc::new(sequence))
    }
}
