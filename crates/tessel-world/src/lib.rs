//! Tile grid storage, the derived run index, and broad-phase overlap queries.
#![forbid(unsafe_code)]

pub mod config;
pub mod draw;
pub mod error;
pub mod grid;
pub mod overlap;
pub mod runs;
pub mod shared;

pub use config::{RebuildPolicy, WorldConfig};
pub use draw::{Camera, DrawItem, draw_list};
pub use error::{GridError, GridResult};
pub use grid::WorldGrid;
pub use overlap::{Probe, first_overlap, overlapping_runs, overlaps, overlaps_solid};
pub use runs::{Run, RunEntry, RunIndex, build_runs, scan_row};
pub use shared::SharedWorld;
