//! Externally visible form fields driven by the selection state.

use crate::selection::{AvailabilityFlag, SelectionState};
use serde::Serialize;

/// Values the surrounding transfer form reads.
///
/// The controller is the only writer; the page reflects these values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormFields {
    /// Value of the destination ward select, empty when none is chosen.
    pub destination_ward: String,
    /// Bed-number field. Empty string when no bed is selected.
    pub bed_number: String,
    /// Checked availability radio, if any.
    pub is_bed_available: Option<AvailabilityFlag>,
    /// Whether the waiting-list panel is shown.
    pub waiting_list_visible: bool,
}

impl FormFields {
    pub fn from_state(state: &SelectionState) -> Self {
        let destination_ward = state
            .current_ward()
            .map(|w| w.to_string())
            .or_else(|| state.unconfigured_ward().map(str::to_string))
            .unwrap_or_default();

        Self {
            destination_ward,
            bed_number: state
                .selected_bed()
                .map(|b| b.to_string())
                .unwrap_or_default(),
            is_bed_available: state.availability(),
            waiting_list_visible: state.waiting_list_visible(),
        }
    }
}
