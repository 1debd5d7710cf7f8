//! Time-penalized driving score for simulated vehicle runs.
//!
//! A run's 20 Hz route-completion signal is multiplied by a cumulative
//! infraction penalty, downsampled to 2 Hz and charted with infraction and
//! scenario-trigger markers.

pub mod config;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
