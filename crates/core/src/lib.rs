//! # Wardbed Core
//!
//! Ward/bed state model and selection protocol for the inpatient transfer form.
//!
//! This crate contains:
//! - Ward configuration (`ward name -> bed counts`) and YAML loading
//! - Occupancy snapshots and the providers that produce them
//! - The selection state machine and the controller driving it
//! - Grid rendering and the form-field projection
//!
//! **No UI toolkit concerns**: the controller exposes plain operations and returns views; how
//! they are drawn and bound to input events belongs to the host.

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod form;
pub mod provider;
pub mod render;
pub mod selection;
pub mod snapshot;
pub mod transfer;
pub mod validation;

pub use config::{CoreConfig, WardConfig, WardTable};
pub use controller::{BedSelectionController, PageBinding};
pub use error::{BedError, BedResult};
pub use form::FormFields;
pub use provider::{RandomWardProvider, StaticWardProvider, WardDataProvider};
pub use render::{BedCell, CellState, GridView, WidgetView};
pub use selection::{AvailabilityFlag, ClickOutcome, IgnoredClick, SelectionState, WidgetPhase};
pub use snapshot::{BedSnapshot, WardSummary};
pub use transfer::InpatientTransfer;
pub use wardbed_types::{BedId, NonEmptyText, TextError};
