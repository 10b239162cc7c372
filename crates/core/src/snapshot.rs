//! Immutable bed occupancy snapshot for one ward.
//!
//! A snapshot is produced by a [`crate::provider::WardDataProvider`] each time a ward is
//! selected and is replaced, never mutated, on the next ward selection.

use crate::{BedError, BedId, BedResult, NonEmptyText};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Occupancy of one ward at one point in time.
///
/// Invariants held by construction:
/// - `bed_ids` contains no duplicates; its order is the grid layout order.
/// - every member of `occupied` is a member of `bed_ids`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BedSnapshot {
    ward: NonEmptyText,
    bed_ids: Vec<BedId>,
    occupied: BTreeSet<BedId>,
}

impl BedSnapshot {
    /// Build a snapshot from an ordered list of beds and the set of occupied ones.
    ///
    /// # Errors
    ///
    /// - `BedError::DuplicateBedId` if `bed_ids` or `occupied` repeats an identifier.
    /// - `BedError::UnknownOccupiedBed` if an occupied bed is not in `bed_ids`.
    pub fn new(
        ward: NonEmptyText,
        bed_ids: Vec<BedId>,
        occupied: impl IntoIterator<Item = BedId>,
    ) -> BedResult<Self> {
        let mut seen = HashSet::with_capacity(bed_ids.len());
        for id in &bed_ids {
            if !seen.insert(id) {
                return Err(BedError::DuplicateBedId(id.to_string()));
            }
        }

        let mut occupied_set = BTreeSet::new();
        for id in occupied {
            if !seen.contains(&id) {
                return Err(BedError::UnknownOccupiedBed(id.to_string()));
            }
            if occupied_set.contains(&id) {
                return Err(BedError::DuplicateBedId(id.to_string()));
            }
            occupied_set.insert(id);
        }

        Ok(Self {
            ward,
            bed_ids,
            occupied: occupied_set,
        })
    }

    pub fn ward(&self) -> &NonEmptyText {
        &self.ward
    }

    /// Bed identifiers in layout order.
    pub fn bed_ids(&self) -> &[BedId] {
        &self.bed_ids
    }

    pub fn contains(&self, bed_id: &BedId) -> bool {
        self.bed_ids.contains(bed_id)
    }

    pub fn is_occupied(&self, bed_id: &BedId) -> bool {
        self.occupied.contains(bed_id)
    }

    /// True only for beds that are part of the ward and not occupied.
    pub fn is_available(&self, bed_id: &BedId) -> bool {
        self.contains(bed_id) && !self.is_occupied(bed_id)
    }

    /// Available beds in layout order.
    pub fn available_beds(&self) -> impl Iterator<Item = &BedId> {
        self.bed_ids.iter().filter(|id| !self.occupied.contains(*id))
    }

    pub fn has_available_bed(&self) -> bool {
        self.occupied.len() < self.bed_ids.len()
    }

    pub fn summary(&self) -> WardSummary {
        let total = self.bed_ids.len();
        let occupied = self.occupied.len();
        WardSummary {
            total,
            occupied,
            available: total - occupied,
        }
    }
}

/// Derived bed counts shown in the ward information panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WardSummary {
    pub total: usize,
    pub occupied: usize,
    pub available: usize,
}
