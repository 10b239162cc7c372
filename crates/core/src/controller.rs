//! Bed selection controller.
//!
//! Mediates between the ward select, the bed grid, bed clicks and the availability radios.
//! All handlers run synchronously to completion; the controller is the single writer of
//! [`SelectionState`].

use crate::form::FormFields;
use crate::provider::WardDataProvider;
use crate::render::{render_view, WidgetView};
use crate::selection::{AvailabilityFlag, ClickOutcome, SelectionState, WidgetPhase};
use crate::{BedError, BedId, BedResult};

/// What the hosting page looks like when the widget initialises.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageBinding {
    /// Whether the page contains a bed-selection container at all.
    pub has_container: bool,
    /// Ward already chosen in the select control, e.g. when a form is re-displayed.
    pub destination_ward: Option<String>,
    /// Availability radio already checked on the page.
    pub is_bed_available: Option<AvailabilityFlag>,
}

pub struct BedSelectionController<P> {
    provider: P,
    state: SelectionState,
}

impl<P: WardDataProvider> BedSelectionController<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: SelectionState::new(),
        }
    }

    /// Bind the widget to a page.
    ///
    /// Returns `None` on pages without a bed-selection container. A ward that is already
    /// chosen is displayed with nothing selected, and the availability radios keep the value
    /// the page was rendered with.
    pub fn mount(provider: P, page: &PageBinding) -> Option<Self> {
        if !page.has_container {
            tracing::debug!("no bed-selection container on page; widget not bound");
            return None;
        }

        let mut controller = Self::new(provider);
        let ward = page
            .destination_ward
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty());

        controller.state = match ward {
            None => SelectionState::new().with_availability_if(page.is_bed_available),
            Some(ward) => match controller.provider.snapshot(ward) {
                Ok(snapshot) => SelectionState::restored(snapshot, page.is_bed_available),
                Err(e) => {
                    tracing::warn!(ward, error = %e, "pre-selected ward could not be displayed");
                    SelectionState::new()
                        .with_availability_if(page.is_bed_available)
                        .with_unconfigured_ward(ward)
                }
            },
        };

        Some(controller)
    }

    /// Ward select changed.
    ///
    /// Fetches a fresh snapshot, clears any selection and suggests `yes` availability when at
    /// least one bed is free, `no` otherwise. A blank ward name returns the widget to its
    /// empty state.
    ///
    /// # Errors
    ///
    /// Returns the provider error (normally `BedError::WardNotConfigured`). The widget is then
    /// in the "ward not configured" state: no grid, no selection.
    pub fn on_ward_changed(&mut self, ward_name: &str) -> BedResult<()> {
        let state = std::mem::take(&mut self.state);
        let ward_name = ward_name.trim();

        if ward_name.is_empty() {
            self.state = state.without_ward();
            return Ok(());
        }

        match self.provider.snapshot(ward_name) {
            Ok(snapshot) => {
                let summary = snapshot.summary();
                self.state = state.with_ward(snapshot);
                tracing::info!(
                    ward = ward_name,
                    total = summary.total,
                    available = summary.available,
                    availability = ?self.state.availability(),
                    "ward displayed"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(ward = ward_name, error = %e, "ward not displayed");
                self.state = state.with_unconfigured_ward(ward_name);
                Err(e)
            }
        }
    }

    /// Bed cell clicked. Clicks on occupied or unknown beds are ignored.
    pub fn on_bed_clicked(&mut self, bed_id: &BedId) -> ClickOutcome {
        let state = std::mem::take(&mut self.state);
        let (state, outcome) = state.click(bed_id);
        self.state = state;

        match &outcome {
            ClickOutcome::Selected(bed) => tracing::info!(bed = %bed, "bed selected"),
            ClickOutcome::Ignored(reason) => {
                tracing::warn!(bed = %bed_id, reason = %reason, "bed click ignored")
            }
        }
        outcome
    }

    /// Availability radio changed by the user. `no` clears any bed selection.
    pub fn on_availability_flag_changed(&mut self, flag: AvailabilityFlag) {
        let state = std::mem::take(&mut self.state);
        let cleared = flag == AvailabilityFlag::No && state.selected_bed().is_some();
        self.state = state.with_availability(flag);

        if cleared {
            tracing::info!("bed selection cleared by availability override");
        }
        tracing::debug!(availability = %flag, "availability changed");
    }

    /// Parse a bed id and forward it to [`Self::on_bed_clicked`].
    pub fn on_bed_clicked_str(&mut self, bed_id: &str) -> BedResult<ClickOutcome> {
        let bed_id = BedId::new(bed_id).map_err(BedError::from)?;
        Ok(self.on_bed_clicked(&bed_id))
    }

    pub fn render(&self) -> WidgetView {
        render_view(&self.state)
    }

    pub fn form_fields(&self) -> FormFields {
        FormFields::from_state(&self.state)
    }

    pub fn phase(&self) -> WidgetPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }
}
