//! Constants used throughout the wardbed core crate.
//!
//! This module contains layout, labelling and configuration constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Number of bed cells rendered per grid row.
pub const GRID_COLUMNS: usize = 4;

/// Minimum digit count of the sequential bed number (`GM-03`, not `GM-3`).
pub const BED_NUMBER_WIDTH: usize = 2;

/// Label shown in the side panel when no bed is selected.
pub const NO_SELECTION_LABEL: &str = "None selected";

/// Environment variable naming a YAML ward table to load at startup.
pub const WARDS_FILE_ENV: &str = "WARDBED_WARDS_FILE";

/// Environment variable holding an RNG seed for reproducible occupancy.
pub const SEED_ENV: &str = "WARDBED_SEED";

/// Demo ward table: `(name, prefix, total beds, occupied beds)`, in display order.
pub const DEFAULT_WARDS: &[(&str, &str, usize, usize)] = &[
    ("General Medicine", "GM", 20, 16),
    ("Cardiology", "CARD", 16, 10),
    ("Neurology", "NEURO", 12, 8),
    ("Orthopedics", "ORTHO", 15, 9),
    ("Surgery", "SURG", 18, 12),
    ("Pediatrics", "PEDS", 24, 18),
    ("Intensive Care", "ICU", 8, 7),
    ("Coronary Care", "CCU", 6, 4),
    ("Obstetrics", "OB", 10, 6),
    ("Gynecology", "GYN", 8, 5),
    ("Oncology", "ONC", 12, 9),
    ("Pulmonology", "PULM", 10, 7),
    ("Nephrology", "NEPH", 8, 5),
    ("Gastroenterology", "GASTRO", 10, 8),
    ("Neonatal ICU", "NICU", 12, 10),
    ("Psychiatric", "PSYCH", 20, 15),
    ("Rehabilitation", "REHAB", 16, 12),
];
