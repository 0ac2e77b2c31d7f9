// src/timeline/mod.rs
// =============================================================================
// Everything between "we have commits" and "the user sees them".
//
// Submodules:
// - state:  the ViewState snapshot and its transitions
// - date:   IST date/time labels
// - render: text and JSON output for the terminal
// - export: printable HTML handed to the system viewer
// =============================================================================

mod date;
mod export;
mod render;
pub(crate) mod state;

pub use export::{default_export_name, open_in_viewer, write_export, ExportError};
pub use render::{render_json, render_timeline, visitor_badge};
pub use state::{Clock, SystemClock, ViewState};
