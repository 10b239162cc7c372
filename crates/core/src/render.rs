//! Bed grid rendering.
//!
//! The view is a disposable projection of [`SelectionState`], rebuilt in full on every call.
//! It is `Serialize` so a front end can consume it as JSON, and `Display` for terminals.

use crate::constants::{GRID_COLUMNS, NO_SELECTION_LABEL};
use crate::selection::SelectionState;
use crate::snapshot::{BedSnapshot, WardSummary};
use crate::BedId;
use serde::Serialize;
use std::fmt;

/// Display state of one bed cell. Exactly one applies at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Available,
    Occupied,
    Selected,
}

impl CellState {
    /// Legend order shown in the grid header.
    pub const LEGEND: [CellState; 3] = [
        CellState::Available,
        CellState::Occupied,
        CellState::Selected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CellState::Available => "Available",
            CellState::Occupied => "Occupied",
            CellState::Selected => "Selected",
        }
    }

    fn marker(self) -> (char, char) {
        match self {
            CellState::Available => (' ', ' '),
            CellState::Occupied => ('#', '#'),
            CellState::Selected => ('*', '*'),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BedCell {
    pub bed_id: BedId,
    pub state: CellState,
    /// Whether a click handler is bound. Never true for occupied beds.
    pub selectable: bool,
}

/// Rendered grid plus ward information panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GridView {
    pub ward: String,
    pub title: String,
    pub legend: [CellState; 3],
    pub rows: Vec<Vec<BedCell>>,
    pub summary: WardSummary,
    pub selected_label: String,
}

impl GridView {
    pub fn cells(&self) -> impl Iterator<Item = &BedCell> {
        self.rows.iter().flatten()
    }

    pub fn cell(&self, bed_id: &BedId) -> Option<&BedCell> {
        self.cells().find(|c| &c.bed_id == bed_id)
    }
}

/// What the bed-selection container shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum WidgetView {
    NoWardSelected,
    WardNotConfigured { ward: String },
    Grid(GridView),
}

/// Lay out `snapshot` as rows of [`GRID_COLUMNS`] cells in `bed_ids` order.
///
/// `selected` marks at most one cell; an id that is not an available bed marks nothing.
pub fn render_grid(snapshot: &BedSnapshot, selected: Option<&BedId>) -> GridView {
    let cells: Vec<BedCell> = snapshot
        .bed_ids()
        .iter()
        .map(|id| {
            let state = if snapshot.is_occupied(id) {
                CellState::Occupied
            } else if selected == Some(id) {
                CellState::Selected
            } else {
                CellState::Available
            };
            BedCell {
                bed_id: id.clone(),
                state,
                selectable: state != CellState::Occupied,
            }
        })
        .collect();

    let rows = cells
        .chunks(GRID_COLUMNS)
        .map(|row| row.to_vec())
        .collect();

    let selected_label = selected
        .filter(|id| snapshot.is_available(id))
        .map(|id| id.to_string())
        .unwrap_or_else(|| NO_SELECTION_LABEL.to_string());

    GridView {
        ward: snapshot.ward().to_string(),
        title: format!("{} Ward - {} Beds", snapshot.ward(), snapshot.bed_ids().len()),
        legend: CellState::LEGEND,
        rows,
        summary: snapshot.summary(),
        selected_label,
    }
}

/// Render the whole widget for `state`.
pub fn render_view(state: &SelectionState) -> WidgetView {
    match (state.current_snapshot(), state.unconfigured_ward()) {
        (Some(snapshot), _) => WidgetView::Grid(render_grid(snapshot, state.selected_bed())),
        (None, Some(ward)) => WidgetView::WardNotConfigured {
            ward: ward.to_string(),
        },
        (None, None) => WidgetView::NoWardSelected,
    }
}

impl fmt::Display for GridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        let legend: Vec<String> = self
            .legend
            .iter()
            .map(|s| {
                let (l, r) = s.marker();
                format!("[{l}{r}] {}", s.label())
            })
            .collect();
        writeln!(f, "{}", legend.join("  "))?;
        writeln!(f)?;

        let width = self.cells().map(|c| c.bed_id.as_str().len()).max().unwrap_or(0);
        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .map(|c| {
                    let (l, r) = c.state.marker();
                    format!("[{l}{:<width$}{r}]", c.bed_id.as_str())
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }

        writeln!(f)?;
        writeln!(f, "Total Beds: {}", self.summary.total)?;
        writeln!(f, "Occupied Beds: {}", self.summary.occupied)?;
        writeln!(f, "Available Beds: {}", self.summary.available)?;
        write!(f, "Selected Bed: {}", self.selected_label)
    }
}

impl fmt::Display for WidgetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetView::NoWardSelected => write!(f, "Select a destination ward to see its beds."),
            WidgetView::WardNotConfigured { ward } => {
                write!(f, "Ward '{ward}' is not configured; no beds to show.")
            }
            WidgetView::Grid(grid) => fmt::Display::fmt(grid, f),
        }
    }
}
