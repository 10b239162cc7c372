//! Inpatient transfer outcome derived from the submitted form fields.
//!
//! The widget itself never submits anything. This is how the receiving side reads the
//! fields it produced: a transfer only completes when a bed is available, otherwise the
//! patient is placed on the ward's waiting list.

use crate::form::FormFields;
use crate::selection::AvailabilityFlag;
use crate::{BedError, BedResult, NonEmptyText};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InpatientTransfer {
    pub destination_ward: NonEmptyText,
    /// Bed number as submitted; `None` when the field was empty.
    pub bed_number: Option<String>,
    pub is_bed_available: bool,
    /// Only recorded when no bed is available.
    pub waiting_list_position: Option<u32>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl InpatientTransfer {
    /// Interpret submitted form fields.
    ///
    /// # Errors
    ///
    /// Returns `BedError::InvalidInput` if no destination ward was chosen.
    pub fn from_form(
        fields: &FormFields,
        waiting_list_position: Option<u32>,
        now: DateTime<Utc>,
    ) -> BedResult<Self> {
        let destination_ward = NonEmptyText::new(&fields.destination_ward)
            .map_err(|_| BedError::InvalidInput("destination ward is required".into()))?;

        let is_bed_available = fields.is_bed_available == Some(AvailabilityFlag::Yes);
        let bed_number = Some(fields.bed_number.trim())
            .filter(|b| !b.is_empty())
            .map(str::to_string);

        Ok(Self {
            destination_ward,
            bed_number,
            is_bed_available,
            waiting_list_position: if is_bed_available {
                None
            } else {
                waiting_list_position
            },
            is_completed: is_bed_available,
            completed_at: is_bed_available.then_some(now),
        })
    }
}
