//! Input validation utilities.
//!
//! This module contains functions for validating ward configuration inputs before
//! they are used to generate bed identifiers.

use crate::{BedError, BedResult};

/// Validates that a bed-number prefix is safe to embed in a bed identifier.
///
/// The prefix becomes the leading part of every bed identifier in the ward (`<prefix>-<NN>`),
/// which in turn lands in the bed-number form field. This function:
/// - Rejects empty or whitespace-only strings
/// - Bounds the length
/// - Restricts characters to ASCII alphanumerics
///
/// # Errors
///
/// Returns a `BedError::InvalidInput` if the prefix is invalid.
pub fn validate_bed_prefix(prefix: &str) -> BedResult<()> {
    const MAX_PREFIX_LEN: usize = 16;

    if prefix.trim().is_empty() {
        return Err(BedError::InvalidInput("bed prefix cannot be empty".into()));
    }

    if prefix.len() > MAX_PREFIX_LEN {
        return Err(BedError::InvalidInput(format!(
            "bed prefix exceeds maximum length of {} characters",
            MAX_PREFIX_LEN
        )));
    }

    if !prefix.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(BedError::InvalidInput(format!(
            "bed prefix '{}' contains invalid characters (only ASCII alphanumerics allowed)",
            prefix
        )));
    }

    Ok(())
}

/// Validates the provider input contract: `total_beds >= 1` and
/// `occupied_count <= total_beds`.
///
/// # Errors
///
/// Returns `BedError::InvalidBedCounts` when either bound is violated.
pub fn validate_bed_counts(total_beds: usize, occupied_count: usize) -> BedResult<()> {
    if total_beds == 0 || occupied_count > total_beds {
        return Err(BedError::InvalidBedCounts {
            total_beds,
            occupied_count,
        });
    }
    Ok(())
}
