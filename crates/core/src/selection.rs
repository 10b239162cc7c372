//! Selection state and its transitions.
//!
//! [`SelectionState`] is an owned value; every transition consumes the previous state and
//! returns the next one, so the widget logic is testable without any UI attached.
//!
//! The transitions keep these relations exact:
//! 1. a selected bed is always an available bed of the current snapshot;
//! 2. a selected bed implies availability `yes`;
//! 3. availability `no` implies no selected bed;
//! 4. a ward change always clears the selection.

use crate::snapshot::BedSnapshot;
use crate::{BedError, BedId, NonEmptyText};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value of the "is a bed available" radio group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityFlag {
    /// A bed is being assigned.
    Yes,
    /// No bed assigned; the waiting list panel is shown.
    No,
}

impl AvailabilityFlag {
    /// Form value of the radio input.
    pub fn as_str(self) -> &'static str {
        match self {
            AvailabilityFlag::Yes => "yes",
            AvailabilityFlag::No => "no",
        }
    }

    /// Default suggested for a freshly displayed ward.
    pub fn suggested_for(snapshot: &BedSnapshot) -> Self {
        if snapshot.has_available_bed() {
            AvailabilityFlag::Yes
        } else {
            AvailabilityFlag::No
        }
    }
}

impl fmt::Display for AvailabilityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityFlag {
    type Err = BedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(AvailabilityFlag::Yes),
            "no" => Ok(AvailabilityFlag::No),
            other => Err(BedError::InvalidInput(format!(
                "availability must be 'yes' or 'no', got '{other}'"
            ))),
        }
    }
}

/// Where the widget is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetPhase {
    NoWardSelected,
    /// The last ward change named a ward missing from the ward table.
    WardNotConfigured,
    WardSelected,
    BedSelected,
}

/// Why a bed click left the state untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IgnoredClick {
    NoWardSelected,
    UnknownBed(BedId),
    OccupiedBed(BedId),
}

impl fmt::Display for IgnoredClick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoredClick::NoWardSelected => write!(f, "no ward is displayed"),
            IgnoredClick::UnknownBed(id) => write!(f, "bed {id} is not in the displayed ward"),
            IgnoredClick::OccupiedBed(id) => write!(f, "bed {id} is occupied"),
        }
    }
}

/// Result of a bed click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(BedId),
    Ignored(IgnoredClick),
}

/// Transient selection state owned by the controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    current_ward: Option<NonEmptyText>,
    current_snapshot: Option<BedSnapshot>,
    selected_bed: Option<BedId>,
    availability: Option<AvailabilityFlag>,
    unconfigured_ward: Option<String>,
}

impl SelectionState {
    /// Nothing displayed, no radio checked.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_ward(&self) -> Option<&NonEmptyText> {
        self.current_ward.as_ref()
    }

    pub fn current_snapshot(&self) -> Option<&BedSnapshot> {
        self.current_snapshot.as_ref()
    }

    pub fn selected_bed(&self) -> Option<&BedId> {
        self.selected_bed.as_ref()
    }

    /// `None` until a ward is chosen or the user touches the radios.
    pub fn availability(&self) -> Option<AvailabilityFlag> {
        self.availability
    }

    pub fn unconfigured_ward(&self) -> Option<&str> {
        self.unconfigured_ward.as_deref()
    }

    pub fn waiting_list_visible(&self) -> bool {
        self.availability == Some(AvailabilityFlag::No)
    }

    pub fn phase(&self) -> WidgetPhase {
        match (&self.current_snapshot, &self.selected_bed) {
            (Some(_), Some(_)) => WidgetPhase::BedSelected,
            (Some(_), None) => WidgetPhase::WardSelected,
            (None, _) if self.unconfigured_ward.is_some() => WidgetPhase::WardNotConfigured,
            (None, _) => WidgetPhase::NoWardSelected,
        }
    }

    /// Display a new ward: selection cleared, availability suggested from the snapshot.
    pub fn with_ward(self, snapshot: BedSnapshot) -> Self {
        let availability = Some(AvailabilityFlag::suggested_for(&snapshot));
        Self {
            current_ward: Some(snapshot.ward().clone()),
            current_snapshot: Some(snapshot),
            selected_bed: None,
            availability,
            unconfigured_ward: None,
        }
    }

    /// Display a ward for a form that is being re-shown with a ward already chosen.
    ///
    /// Selection is cleared but the availability radios keep the value the page carried.
    pub fn restored(snapshot: BedSnapshot, availability: Option<AvailabilityFlag>) -> Self {
        Self {
            current_ward: Some(snapshot.ward().clone()),
            current_snapshot: Some(snapshot),
            selected_bed: None,
            availability,
            unconfigured_ward: None,
        }
    }

    /// The selected ward is missing from the ward table: drop the grid and any selection.
    ///
    /// The availability radios are left as they were.
    pub fn with_unconfigured_ward(self, ward_name: impl Into<String>) -> Self {
        Self {
            current_ward: None,
            current_snapshot: None,
            selected_bed: None,
            availability: self.availability,
            unconfigured_ward: Some(ward_name.into()),
        }
    }

    /// The ward select went back to its blank option.
    pub fn without_ward(self) -> Self {
        Self {
            availability: self.availability,
            ..Self::default()
        }
    }

    /// Select `bed_id` if it is an available bed of the displayed ward.
    pub fn click(self, bed_id: &BedId) -> (Self, ClickOutcome) {
        let verdict = match &self.current_snapshot {
            None => Err(IgnoredClick::NoWardSelected),
            Some(s) if !s.contains(bed_id) => Err(IgnoredClick::UnknownBed(bed_id.clone())),
            Some(s) if s.is_occupied(bed_id) => Err(IgnoredClick::OccupiedBed(bed_id.clone())),
            Some(_) => Ok(()),
        };

        match verdict {
            Err(reason) => (self, ClickOutcome::Ignored(reason)),
            Ok(()) => (
                Self {
                    selected_bed: Some(bed_id.clone()),
                    availability: Some(AvailabilityFlag::Yes),
                    ..self
                },
                ClickOutcome::Selected(bed_id.clone()),
            ),
        }
    }

    /// User override of the availability radios. `no` always clears the selection.
    pub fn with_availability(self, flag: AvailabilityFlag) -> Self {
        let selected_bed = match flag {
            AvailabilityFlag::Yes => self.selected_bed,
            AvailabilityFlag::No => None,
        };
        Self {
            selected_bed,
            availability: Some(flag),
            ..self
        }
    }

    pub(crate) fn with_availability_if(self, flag: Option<AvailabilityFlag>) -> Self {
        match flag {
            Some(flag) => self.with_availability(flag),
            None => self,
        }
    }

    /// True when the selection relations listed in the module docs hold.
    pub fn is_consistent(&self) -> bool {
        let Some(bed) = &self.selected_bed else {
            return true;
        };
        let bed_ok = self
            .current_snapshot
            .as_ref()
            .is_some_and(|s| s.is_available(bed));
        bed_ok && self.availability == Some(AvailabilityFlag::Yes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(ward: &str, prefix: &str, total: usize, occupied: &[usize]) -> BedSnapshot {
        let id = |n: usize| BedId::new(format!("{prefix}-{n:02}")).unwrap();
        BedSnapshot::new(
            NonEmptyText::new(ward).unwrap(),
            (1..=total).map(id).collect(),
            occupied.iter().map(|&n| id(n)).collect::<Vec<_>>(),
        )
        .unwrap()
    }

    fn bed(id: &str) -> BedId {
        BedId::new(id).unwrap()
    }

    #[test]
    fn test_new_state_has_no_ward() {
        let state = SelectionState::new();
        assert_eq!(state.phase(), WidgetPhase::NoWardSelected);
        assert_eq!(state.availability(), None);
        assert!(!state.waiting_list_visible());
    }

    #[test]
    fn test_with_ward_suggests_yes_when_a_bed_is_free() {
        let state = SelectionState::new()
            .with_ward(snapshot("Intensive Care", "ICU", 8, &[1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(state.phase(), WidgetPhase::WardSelected);
        assert_eq!(state.availability(), Some(AvailabilityFlag::Yes));
        assert!(!state.waiting_list_visible());
    }

    #[test]
    fn test_with_ward_suggests_no_when_full() {
        let state =
            SelectionState::new().with_ward(snapshot("Coronary Care", "CCU", 2, &[1, 2]));
        assert_eq!(state.availability(), Some(AvailabilityFlag::No));
        assert!(state.waiting_list_visible());
    }

    #[test]
    fn test_click_available_bed_selects_and_forces_yes() {
        let state = SelectionState::new()
            .with_ward(snapshot("Surgery", "SURG", 4, &[1]))
            .with_availability(AvailabilityFlag::No);

        let (state, outcome) = state.click(&bed("SURG-02"));
        assert_eq!(outcome, ClickOutcome::Selected(bed("SURG-02")));
        assert_eq!(state.selected_bed(), Some(&bed("SURG-02")));
        assert_eq!(state.availability(), Some(AvailabilityFlag::Yes));
        assert_eq!(state.phase(), WidgetPhase::BedSelected);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_click_occupied_bed_is_ignored() {
        let state = SelectionState::new().with_ward(snapshot("Surgery", "SURG", 4, &[1]));
        let (state, _) = state.click(&bed("SURG-03"));

        let (after, outcome) = state.clone().click(&bed("SURG-01"));
        assert_eq!(outcome, ClickOutcome::Ignored(IgnoredClick::OccupiedBed(bed("SURG-01"))));
        assert_eq!(after, state);
    }

    #[test]
    fn test_click_unknown_bed_is_ignored() {
        let state = SelectionState::new().with_ward(snapshot("Surgery", "SURG", 4, &[]));
        let (after, outcome) = state.clone().click(&bed("ICU-01"));
        assert_eq!(outcome, ClickOutcome::Ignored(IgnoredClick::UnknownBed(bed("ICU-01"))));
        assert_eq!(after, state);
    }

    #[test]
    fn test_click_without_ward_is_ignored() {
        let (state, outcome) = SelectionState::new().click(&bed("GM-01"));
        assert_eq!(outcome, ClickOutcome::Ignored(IgnoredClick::NoWardSelected));
        assert_eq!(state, SelectionState::new());
    }

    #[test]
    fn test_second_click_moves_selection() {
        let state = SelectionState::new().with_ward(snapshot("Surgery", "SURG", 4, &[]));
        let (state, _) = state.click(&bed("SURG-01"));
        let (state, _) = state.click(&bed("SURG-04"));
        assert_eq!(state.selected_bed(), Some(&bed("SURG-04")));
    }

    #[test]
    fn test_availability_no_clears_selection() {
        let state = SelectionState::new().with_ward(snapshot("Surgery", "SURG", 4, &[]));
        let (state, _) = state.click(&bed("SURG-02"));

        let state = state.with_availability(AvailabilityFlag::No);
        assert_eq!(state.selected_bed(), None);
        assert!(state.waiting_list_visible());
        assert_eq!(state.phase(), WidgetPhase::WardSelected);
    }

    #[test]
    fn test_availability_yes_keeps_selection() {
        let state = SelectionState::new().with_ward(snapshot("Surgery", "SURG", 4, &[]));
        let (state, _) = state.click(&bed("SURG-02"));
        let state = state.with_availability(AvailabilityFlag::Yes);
        assert_eq!(state.selected_bed(), Some(&bed("SURG-02")));
        assert!(!state.waiting_list_visible());
    }

    #[test]
    fn test_ward_change_resets_selection() {
        let state = SelectionState::new().with_ward(snapshot("Surgery", "SURG", 4, &[]));
        let (state, _) = state.click(&bed("SURG-02"));
        let state = state.with_ward(snapshot("Oncology", "ONC", 2, &[1, 2]));

        assert_eq!(state.selected_bed(), None);
        assert_eq!(state.current_ward().map(|w| w.as_str()), Some("Oncology"));
        assert_eq!(state.availability(), Some(AvailabilityFlag::No));
    }

    #[test]
    fn test_unconfigured_ward_drops_grid_but_keeps_radios() {
        let state = SelectionState::new().with_ward(snapshot("Surgery", "SURG", 4, &[]));
        let (state, _) = state.click(&bed("SURG-02"));
        let state = state.with_unconfigured_ward("Maternity");

        assert_eq!(state.phase(), WidgetPhase::WardNotConfigured);
        assert_eq!(state.unconfigured_ward(), Some("Maternity"));
        assert_eq!(state.current_snapshot(), None);
        assert_eq!(state.selected_bed(), None);
        assert_eq!(state.availability(), Some(AvailabilityFlag::Yes));
    }

    #[test]
    fn test_without_ward_returns_to_no_ward() {
        let state = SelectionState::new().with_ward(snapshot("Surgery", "SURG", 4, &[]));
        let (state, _) = state.click(&bed("SURG-01"));
        let state = state.without_ward();
        assert_eq!(state.phase(), WidgetPhase::NoWardSelected);
        assert_eq!(state.selected_bed(), None);
        assert_eq!(state.availability(), Some(AvailabilityFlag::Yes));
    }

    #[test]
    fn test_restored_keeps_page_availability() {
        let state = SelectionState::restored(
            snapshot("Surgery", "SURG", 4, &[]),
            Some(AvailabilityFlag::No),
        );
        assert_eq!(state.phase(), WidgetPhase::WardSelected);
        assert!(state.waiting_list_visible());
    }

    #[test]
    fn test_availability_flag_parsing() {
        assert_eq!("yes".parse::<AvailabilityFlag>().unwrap(), AvailabilityFlag::Yes);
        assert_eq!(" NO ".parse::<AvailabilityFlag>().unwrap(), AvailabilityFlag::No);
        assert!("maybe".parse::<AvailabilityFlag>().is_err());
        assert_eq!(AvailabilityFlag::Yes.to_string(), "yes");
    }
}
