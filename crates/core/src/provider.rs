//! Ward data providers.
//!
//! A provider turns a ward name into an immutable [`BedSnapshot`]. Two implementations live
//! here:
//! - [`RandomWardProvider`] generates placeholder occupancy from the configured bed counts.
//! - [`StaticWardProvider`] returns pre-built snapshots and is fully deterministic; it is the
//!   shape a live occupancy feed takes.
//!
//! Both refuse ward names that are not configured.

use crate::config::{WardConfig, WardTable};
use crate::constants::BED_NUMBER_WIDTH;
use crate::snapshot::BedSnapshot;
use crate::validation::{validate_bed_counts, validate_bed_prefix};
use crate::{BedError, BedId, BedResult, NonEmptyText};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Source of occupancy snapshots, keyed by ward name.
pub trait WardDataProvider {
    /// Produce a fresh snapshot for `ward_name`.
    ///
    /// # Errors
    ///
    /// Returns `BedError::WardNotConfigured` for unknown wards.
    fn snapshot(&mut self, ward_name: &str) -> BedResult<BedSnapshot>;

    /// Whether the provider knows `ward_name` at all.
    fn is_configured(&self, ward_name: &str) -> bool;
}

/// Format the identifier of bed `number` (1-based) in a ward with `prefix`.
pub fn bed_id_for(prefix: &str, number: usize) -> BedResult<BedId> {
    Ok(BedId::new(format!(
        "{prefix}-{number:0width$}",
        width = BED_NUMBER_WIDTH
    ))?)
}

/// Generate a snapshot with exactly `occupied_count` occupied beds chosen uniformly at random
/// without replacement.
///
/// Beds are numbered `1..=total_beds` and identified as `<prefix>-<NN>`.
///
/// # Errors
///
/// Rejects `total_beds == 0`, `occupied_count > total_beds` and malformed prefixes before any
/// generation happens.
pub fn generate_snapshot<R: Rng + ?Sized>(
    ward: NonEmptyText,
    prefix: &str,
    total_beds: usize,
    occupied_count: usize,
    rng: &mut R,
) -> BedResult<BedSnapshot> {
    validate_bed_counts(total_beds, occupied_count)?;
    validate_bed_prefix(prefix)?;

    let bed_ids = (1..=total_beds)
        .map(|n| bed_id_for(prefix, n))
        .collect::<BedResult<Vec<_>>>()?;

    let occupied: Vec<BedId> = rand::seq::index::sample(rng, total_beds, occupied_count)
        .into_iter()
        .map(|i| bed_ids[i].clone())
        .collect();

    tracing::debug!(
        ward = %ward,
        total_beds,
        occupied_count,
        "generated ward occupancy snapshot"
    );

    BedSnapshot::new(ward, bed_ids, occupied)
}

/// Placeholder provider drawing occupancy at random from the configured counts.
pub struct RandomWardProvider<R = StdRng> {
    table: WardTable,
    rng: R,
}

impl RandomWardProvider<StdRng> {
    /// Provider seeded from OS entropy.
    pub fn from_entropy(table: WardTable) -> Self {
        Self {
            table,
            rng: StdRng::from_entropy(),
        }
    }

    /// Provider with reproducible occupancy.
    pub fn seeded(table: WardTable, seed: u64) -> Self {
        Self {
            table,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build from an optional seed, as resolved by [`crate::CoreConfig`].
    pub fn from_seed(table: WardTable, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(table, seed),
            None => Self::from_entropy(table),
        }
    }
}

impl<R: Rng> RandomWardProvider<R> {
    fn generate(ward: &WardConfig, rng: &mut R) -> BedResult<BedSnapshot> {
        generate_snapshot(
            ward.name().clone(),
            ward.prefix(),
            ward.total_beds(),
            ward.occupied_beds(),
            rng,
        )
    }
}

impl<R: Rng> WardDataProvider for RandomWardProvider<R> {
    fn snapshot(&mut self, ward_name: &str) -> BedResult<BedSnapshot> {
        let ward = self.table.get(ward_name)?;
        Self::generate(ward, &mut self.rng)
    }

    fn is_configured(&self, ward_name: &str) -> bool {
        self.table.contains(ward_name)
    }
}

/// Deterministic provider serving fixed snapshots.
#[derive(Clone, Debug, Default)]
pub struct StaticWardProvider {
    snapshots: HashMap<String, BedSnapshot>,
}

impl StaticWardProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the snapshot served for the snapshot's ward.
    pub fn insert(&mut self, snapshot: BedSnapshot) {
        self.snapshots
            .insert(snapshot.ward().as_str().to_string(), snapshot);
    }

    /// Convenience builder: `prefix-01..=prefix-total`, with the listed bed numbers occupied.
    pub fn with_ward(
        mut self,
        ward_name: &str,
        prefix: &str,
        total_beds: usize,
        occupied_numbers: &[usize],
    ) -> BedResult<Self> {
        validate_bed_prefix(prefix)?;
        validate_bed_counts(total_beds, occupied_numbers.len())?;
        let ward = NonEmptyText::new(ward_name)?;
        let bed_ids = (1..=total_beds)
            .map(|n| bed_id_for(prefix, n))
            .collect::<BedResult<Vec<_>>>()?;
        let occupied = occupied_numbers
            .iter()
            .map(|&n| bed_id_for(prefix, n))
            .collect::<BedResult<Vec<_>>>()?;
        self.insert(BedSnapshot::new(ward, bed_ids, occupied)?);
        Ok(self)
    }
}

impl WardDataProvider for StaticWardProvider {
    fn snapshot(&mut self, ward_name: &str) -> BedResult<BedSnapshot> {
        self.snapshots
            .get(ward_name.trim())
            .cloned()
            .ok_or_else(|| BedError::WardNotConfigured(ward_name.to_string()))
    }

    fn is_configured(&self, ward_name: &str) -> bool {
        self.snapshots.contains_key(ward_name.trim())
    }
}
